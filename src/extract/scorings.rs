use tracing::debug;

use crate::document::{whole, ScheduleDocument, TeamSide};
use crate::error::{AppError, Result};
use crate::periods::scoring_periods_of;
use crate::types::ScoringRecord;

/// Fans every schedule entry out over the scoring periods of `matchup_period`.
///
/// A side with no points under a scoring period scores 0 for it. A
/// non-numeric key in a side's points mapping means the payload is not what
/// this extractor understands, so the whole document is rejected.
pub fn extract_scorings(doc: &ScheduleDocument, matchup_period: u32) -> Result<Vec<ScoringRecord>> {
    let scoring_periods = scoring_periods_of(matchup_period);
    let mut records = Vec::with_capacity(doc.schedule.len() * scoring_periods.len());

    for entry in &doc.schedule {
        check_period_keys(&entry.home)?;
        check_period_keys(&entry.away)?;

        for &scoring_period in scoring_periods {
            records.push(ScoringRecord {
                home_team_id: entry.home.team_id,
                away_team_id: entry.away.team_id,
                home_points: points_in(&entry.home, scoring_period),
                away_points: points_in(&entry.away, scoring_period),
                matchup_period_id: matchup_period,
                scoring_period_id: scoring_period,
            });
        }
    }

    Ok(records)
}

fn points_in(side: &TeamSide, scoring_period: u32) -> i64 {
    match side.points_by_scoring_period.get(&scoring_period.to_string()) {
        Some(&points) => whole(points),
        None => {
            debug!(team_id = side.team_id, scoring_period, "[SCORINGS] no points recorded, using 0");
            0
        }
    }
}

fn check_period_keys(side: &TeamSide) -> Result<()> {
    match side
        .points_by_scoring_period
        .keys()
        .find(|key| key.parse::<u32>().is_err())
    {
        Some(key) => Err(AppError::Parse(format!(
            "team {} has non-numeric scoring period key {key:?}",
            side.team_id
        ))),
        None => Ok(()),
    }
}
