use tracing::debug;

use crate::document::{whole, ScheduleDocument, TeamSide};
use crate::error::Result;
use crate::periods::scoring_periods_of;
use crate::source::StatsSource;
use crate::types::RosteredPlayerRecord;

/// Lineups in `doc` as of `scoring_period`: home roster first, then away, per entry.
pub fn extract_rostered_players(
    doc: &ScheduleDocument,
    scoring_period: u32,
) -> Vec<RosteredPlayerRecord> {
    let mut records = Vec::new();
    for entry in &doc.schedule {
        push_side(&entry.home, scoring_period, &mut records);
        push_side(&entry.away, scoring_period, &mut records);
    }
    records
}

fn push_side(side: &TeamSide, scoring_period: u32, out: &mut Vec<RosteredPlayerRecord>) {
    out.extend(
        side.roster_for_current_scoring_period
            .entries
            .iter()
            .map(|player| RosteredPlayerRecord {
                pro_player_id: player.player_id,
                team_id: side.team_id,
                fantasy_points: whole(player.player_pool_entry.applied_stat_total),
                lineup_slot_id: player.lineup_slot_id,
                minutes_played: player.minutes_played(),
                scoring_period_id: scoring_period,
            }),
    );
}

/// Fetches the matchup's schedule once per scoring period, since the roster
/// endpoint only reports lineups as of the requested day. Calls run
/// sequentially; the first failure aborts the whole matchup period.
pub async fn collect_rostered_players<S>(
    source: &S,
    matchup_period: u32,
) -> Result<Vec<RosteredPlayerRecord>>
where
    S: StatsSource + ?Sized,
{
    let mut records = Vec::new();
    for &scoring_period in scoring_periods_of(matchup_period) {
        let doc = source
            .fetch_for_scoring_period(matchup_period, scoring_period)
            .await?;
        let before = records.len();
        records.extend(extract_rostered_players(&doc, scoring_period));
        debug!(
            matchup_period,
            scoring_period,
            rows = records.len() - before,
            "[ROSTERS] scoring period extracted"
        );
    }
    Ok(records)
}
