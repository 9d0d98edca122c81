use tracing::info;

use crate::error::Result;
use crate::extract::{
    collect_rostered_players, extract_matchups, extract_pro_player_scorings, extract_scorings,
};
use crate::output::{write_records, Destination, RecordKind, TabularWriter};
use crate::source::{PlayerStatsSource, StatsSource};
use crate::types::PeriodSummary;

/// Extracts and writes every record set of one matchup period.
///
/// Matchups and scorings share a single matchup-scoped fetch; rostered
/// players need one fetch per scoring period. The first fetch, parse or
/// write error stops the period and is returned to the caller.
pub async fn process_period<S, W>(
    source: &S,
    writer: &W,
    matchup_period: u32,
) -> Result<PeriodSummary>
where
    S: StatsSource + ?Sized,
    W: TabularWriter + ?Sized,
{
    let doc = source.fetch_for_matchup_period(matchup_period).await?;

    let matchups = extract_matchups(&doc, matchup_period);
    let matchups = write_records(
        writer,
        &Destination::for_period(RecordKind::Matchups, matchup_period),
        &matchups,
    )?;
    info!(matchup_period, kind = %RecordKind::Matchups, rows = matchups, "[MATCHUPS] written");

    let scorings = extract_scorings(&doc, matchup_period)?;
    let scorings = write_records(
        writer,
        &Destination::for_period(RecordKind::Scorings, matchup_period),
        &scorings,
    )?;
    info!(matchup_period, kind = %RecordKind::Scorings, rows = scorings, "[SCORINGS] written");

    let players = collect_rostered_players(source, matchup_period).await?;
    let rostered_players = write_records(
        writer,
        &Destination::for_period(RecordKind::RosteredPlayers, matchup_period),
        &players,
    )?;
    info!(matchup_period, kind = %RecordKind::RosteredPlayers, rows = rostered_players, "[ROSTERS] written");

    Ok(PeriodSummary {
        matchups,
        scorings,
        rostered_players,
    })
}

/// League-wide pro player stat lines, written once per run.
pub async fn process_pro_players<S, W>(source: &S, writer: &W) -> Result<usize>
where
    S: PlayerStatsSource + ?Sized,
    W: TabularWriter + ?Sized,
{
    let doc = source.fetch_player_stats().await?;
    let records = extract_pro_player_scorings(&doc);
    let rows = write_records(
        writer,
        &Destination::league_wide(RecordKind::ProPlayerScorings),
        &records,
    )?;
    info!(kind = %RecordKind::ProPlayerScorings, rows, "[PRO PLAYERS] written");
    Ok(rows)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::document::{PlayerInfoDocument, ScheduleDocument};
    use crate::error::AppError;
    use crate::extract::fixtures::schedule;
    use crate::output::memory::MemoryWriter;
    use crate::periods::scoring_periods_of;
    use crate::types::{MatchupRecord, TabularRecord};

    pub const PAIRS: &[(i64, i64)] = &[(1, 2), (3, 4), (5, 6)];
    pub const ROSTER_SIZE: i64 = 2;

    /// Deterministic league: three pairings, two-player rosters, and a set of
    /// matchup periods whose calls fail.
    #[derive(Default)]
    pub struct FakeLeague {
        pub failing: HashSet<u32>,
        /// Scoring periods whose roster call fails.
        pub failing_days: HashSet<u32>,
        pub calls: AtomicUsize,
    }

    impl FakeLeague {
        pub fn failing(periods: &[u32]) -> Self {
            Self { failing: periods.iter().copied().collect(), ..Default::default() }
        }

        fn check(&self, matchup_period: u32) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.contains(&matchup_period) {
                return Err(AppError::Status { status: 500, body: "boom".to_string() });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl StatsSource for FakeLeague {
        async fn fetch_for_matchup_period(&self, mp: u32) -> Result<ScheduleDocument> {
            self.check(mp)?;
            Ok(schedule(PAIRS, scoring_periods_of(mp), ROSTER_SIZE))
        }

        async fn fetch_for_scoring_period(&self, mp: u32, sp: u32) -> Result<ScheduleDocument> {
            self.check(mp)?;
            if self.failing_days.contains(&sp) {
                return Err(AppError::Parse(format!("bad roster payload for day {sp}")));
            }
            Ok(schedule(PAIRS, scoring_periods_of(mp), ROSTER_SIZE))
        }
    }

    #[async_trait]
    impl PlayerStatsSource for FakeLeague {
        async fn fetch_player_stats(&self) -> Result<PlayerInfoDocument> {
            Ok(serde_json::from_str(
                r#"{"players":[{"player":{"id":7,"stats":[{"proTeamId":1,"appliedTotal":12.0,"scoringPeriodId":3}]}}]}"#,
            )?)
        }
    }

    #[tokio::test]
    async fn writes_three_tables_per_period() {
        let league = FakeLeague::default();
        let writer = MemoryWriter::default();

        let summary = process_period(&league, &writer, 2).await.unwrap();

        let days = scoring_periods_of(2).len();
        assert_eq!(
            summary,
            PeriodSummary {
                matchups: PAIRS.len(),
                scorings: PAIRS.len() * days,
                rostered_players: PAIRS.len() * 2 * ROSTER_SIZE as usize * days,
            }
        );
        // one matchup-scoped call, then one per scoring period
        assert_eq!(league.calls.load(Ordering::SeqCst), 1 + days);

        let tables = writer.snapshot();
        assert_eq!(tables.len(), 3);
        let (header, rows) = &tables[&Destination::for_period(RecordKind::Matchups, 2)];
        assert_eq!(header, &MatchupRecord::HEADER.to_vec());
        assert_eq!(rows.len(), PAIRS.len());
        assert!(rows.iter().all(|row| row[4] == "2"));
        assert_eq!(
            tables[&Destination::for_period(RecordKind::Scorings, 2)].1.len(),
            summary.scorings
        );
        assert_eq!(
            tables[&Destination::for_period(RecordKind::RosteredPlayers, 2)].1.len(),
            summary.rostered_players
        );
    }

    #[tokio::test]
    async fn fetch_failure_writes_nothing() {
        let league = FakeLeague::failing(&[7]);
        let writer = MemoryWriter::default();

        let err = process_period(&league, &writer, 7).await.unwrap_err();
        assert!(matches!(err, AppError::Status { status: 500, .. }));
        assert!(writer.snapshot().is_empty());
    }

    #[tokio::test]
    async fn roster_failure_keeps_earlier_tables() {
        let league = FakeLeague {
            failing_days: [scoring_periods_of(3)[1]].into_iter().collect(),
            ..Default::default()
        };
        let writer = MemoryWriter::default();

        let err = process_period(&league, &writer, 3).await.unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));

        let tables = writer.snapshot();
        assert!(tables.contains_key(&Destination::for_period(RecordKind::Matchups, 3)));
        assert!(tables.contains_key(&Destination::for_period(RecordKind::Scorings, 3)));
        assert!(!tables.contains_key(&Destination::for_period(RecordKind::RosteredPlayers, 3)));
    }

    #[tokio::test]
    async fn write_failure_stops_the_period() {
        let league = FakeLeague::default();
        let writer = MemoryWriter {
            fail_on: vec![Destination::for_period(RecordKind::Matchups, 4)],
            ..Default::default()
        };

        let err = process_period(&league, &writer, 4).await.unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
        assert!(writer.snapshot().is_empty());
        assert_eq!(league.calls.load(Ordering::SeqCst), 1, "no roster calls after a failed write");
    }

    #[tokio::test]
    async fn pro_players_written_league_wide() {
        let league = FakeLeague::default();
        let writer = MemoryWriter::default();

        let rows = process_pro_players(&league, &writer).await.unwrap();
        assert_eq!(rows, 1);

        let tables = writer.snapshot();
        let (_, rows) = &tables[&Destination::league_wide(RecordKind::ProPlayerScorings)];
        assert_eq!(rows, &vec![vec!["7", "1", "12", "0", "3"]]);
    }
}
