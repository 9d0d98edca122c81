use std::collections::BTreeMap;
use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{error, info};

use crate::error::{AppError, Result};
use crate::output::TabularWriter;
use crate::periods::MatchupRange;
use crate::pipeline::process_period;
use crate::source::StatsSource;
use crate::types::PeriodSummary;

/// Outcome of every matchup period of a run, keyed by matchup period.
pub type RunOutcome = BTreeMap<u32, Result<PeriodSummary>>;

/// Processes every matchup period of `range` concurrently, one task per period.
///
/// Each task builds its own source with `make_source` and shares nothing else
/// but the writer. All tasks start at once and are awaited together; a
/// failing or panicking period only affects its own entry in the outcome.
pub async fn run_periods<S, W, F>(range: MatchupRange, make_source: F, writer: Arc<W>) -> RunOutcome
where
    S: StatsSource + 'static,
    W: TabularWriter + ?Sized + 'static,
    F: Fn() -> Result<S> + Send + Sync + 'static,
{
    info!(lower = range.lower(), upper = range.upper(), "[RUN] launching {} matchup periods", range.len());

    let make_source = Arc::new(make_source);
    let (periods, handles): (Vec<u32>, Vec<_>) = range
        .iter()
        .map(|matchup_period| {
            let make_source = Arc::clone(&make_source);
            let writer = Arc::clone(&writer);
            let handle = tokio::spawn(async move {
                let outcome = match (*make_source)() {
                    Ok(source) => process_period(&source, writer.as_ref(), matchup_period).await,
                    Err(e) => Err(e),
                };
                match &outcome {
                    Ok(summary) => info!(matchup_period, %summary, "[PERIOD] matchup period {matchup_period} done"),
                    Err(e) => error!(matchup_period, "[PERIOD] matchup period {matchup_period} failed: {e}"),
                }
                outcome
            });
            (matchup_period, handle)
        })
        .unzip();

    let joined = join_all(handles).await;

    periods
        .into_iter()
        .zip(joined)
        .map(|(matchup_period, joined)| {
            let outcome = joined.unwrap_or_else(|e| {
                error!(matchup_period, "[PERIOD] matchup period {matchup_period} task aborted: {e}");
                Err(AppError::Task(e.to_string()))
            });
            (matchup_period, outcome)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::document::ScheduleDocument;
    use crate::output::memory::MemoryWriter;
    use crate::output::{Destination, RecordKind};
    use crate::periods::{MAX_MATCHUP_PERIOD, MIN_MATCHUP_PERIOD};
    use crate::pipeline::tests::FakeLeague;

    fn full_season() -> MatchupRange {
        MatchupRange::new(MIN_MATCHUP_PERIOD, MAX_MATCHUP_PERIOD).unwrap()
    }

    #[tokio::test]
    async fn concurrent_run_matches_sequential_runs() {
        let writer = Arc::new(MemoryWriter::default());
        let outcome = run_periods(full_season(), || Ok(FakeLeague::default()), Arc::clone(&writer)).await;
        assert_eq!(outcome.len(), 16);
        assert!(outcome.values().all(|r| r.is_ok()));

        let sequential = MemoryWriter::default();
        for mp in full_season().iter() {
            let summary = process_period(&FakeLeague::default(), &sequential, mp).await.unwrap();
            assert_eq!(outcome[&mp].as_ref().unwrap(), &summary);
        }

        assert_eq!(writer.snapshot(), sequential.snapshot());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn failing_period_is_isolated() {
        let writer = Arc::new(MemoryWriter::default());
        let outcome = run_periods(full_season(), || Ok(FakeLeague::failing(&[7])), Arc::clone(&writer)).await;

        assert!(matches!(outcome[&7], Err(AppError::Status { status: 500, .. })));

        let tables = writer.snapshot();
        let healthy = MemoryWriter::default();
        for mp in full_season().iter().filter(|&mp| mp != 7) {
            assert!(outcome[&mp].is_ok(), "period {mp} should succeed");
            process_period(&FakeLeague::default(), &healthy, mp).await.unwrap();
        }
        assert_eq!(tables, healthy.snapshot());
        assert!(!tables.keys().any(|d| d.matchup_period == Some(7)));
    }

    #[tokio::test]
    async fn single_period_range() {
        let writer = Arc::new(MemoryWriter::default());
        let range = MatchupRange::new(5, 5).unwrap();
        let outcome = run_periods(range, || Ok(FakeLeague::default()), Arc::clone(&writer)).await;

        assert_eq!(outcome.keys().copied().collect::<Vec<_>>(), vec![5]);
        let tables = writer.snapshot();
        assert_eq!(tables.len(), 3);
        assert!(tables.contains_key(&Destination::for_period(RecordKind::Scorings, 5)));
    }

    #[tokio::test]
    async fn source_construction_failure_is_per_period() {
        let writer = Arc::new(MemoryWriter::default());
        let range = MatchupRange::new(1, 3).unwrap();
        let outcome = run_periods(
            range,
            || -> Result<FakeLeague> { Err(AppError::Config("no cookies".to_string())) },
            Arc::clone(&writer),
        )
        .await;

        assert_eq!(outcome.len(), 3);
        assert!(outcome.values().all(|r| matches!(r, Err(AppError::Config(_)))));
        assert!(writer.snapshot().is_empty());
    }

    /// Panics on its first call.
    struct PanickingSource;

    #[async_trait::async_trait]
    impl StatsSource for PanickingSource {
        async fn fetch_for_matchup_period(&self, _: u32) -> Result<ScheduleDocument> {
            panic!("source bug")
        }

        async fn fetch_for_scoring_period(&self, _: u32, _: u32) -> Result<ScheduleDocument> {
            panic!("source bug")
        }
    }

    #[tokio::test]
    async fn panicking_task_reported_as_task_error() {
        let writer = Arc::new(MemoryWriter::default());
        let range = MatchupRange::new(2, 3).unwrap();
        let outcome = run_periods(range, || Ok(PanickingSource), writer).await;

        assert!(matches!(outcome[&2], Err(AppError::Task(_))));
        assert!(matches!(outcome[&3], Err(AppError::Task(_))));
    }

    #[tokio::test]
    async fn each_period_gets_its_own_source() {
        let built = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = Arc::clone(&built);
        let writer = Arc::new(MemoryWriter::default());
        let range = MatchupRange::new(1, 4).unwrap();

        let outcome = run_periods(
            range,
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(FakeLeague::default())
            },
            writer,
        )
        .await;

        assert_eq!(outcome.len(), 4);
        assert_eq!(built.load(Ordering::SeqCst), 4);
    }
}
