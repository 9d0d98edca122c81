use crate::document::{whole, ScheduleDocument};
use crate::types::MatchupRecord;

/// One record per schedule entry, using each side's matchup totals.
pub fn extract_matchups(doc: &ScheduleDocument, matchup_period: u32) -> Vec<MatchupRecord> {
    doc.schedule
        .iter()
        .map(|entry| MatchupRecord {
            home_team_id: entry.home.team_id,
            away_team_id: entry.away.team_id,
            home_points: whole(entry.home.total_points),
            away_points: whole(entry.away.total_points),
            matchup_period_id: matchup_period,
        })
        .collect()
}
