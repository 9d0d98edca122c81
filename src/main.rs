mod config;
mod document;
mod driver;
mod error;
mod extract;
mod output;
mod periods;
mod pipeline;
mod source;
mod types;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::driver::{run_periods, RunOutcome};
use crate::output::CsvWriter;
use crate::periods::MatchupRange;
use crate::pipeline::process_pro_players;
use crate::source::EspnClient;
use crate::types::PeriodSummary;

/// Dumps a fantasy basketball league's box scores to CSV, one set of files per matchup period.
#[derive(Parser)]
#[command(name = "boxscores")]
struct Cli {
    /// First matchup period to dump (1-16)
    lower: u32,

    /// Last matchup period to dump, inclusive (1-16)
    upper: u32,

    /// Also dump league-wide pro player stat lines
    #[arg(long)]
    pro_players: bool,

    /// Output root, overrides OUTPUT_DIR
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };
    if let Some(dir) = cli.output_dir {
        cfg.output_dir = dir;
    }

    let range = match MatchupRange::new(cli.lower, cli.upper) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    let failed = run(cfg, range, cli.pro_players).await;
    if failed > 0 {
        error!("{failed} unit(s) failed");
        std::process::exit(1);
    }
}

/// Returns the number of failed units.
async fn run(cfg: Config, range: MatchupRange, pro_players: bool) -> usize {
    let cfg = Arc::new(cfg);
    let writer = Arc::new(CsvWriter::new(cfg.output_dir.clone()));
    info!(output_dir = %writer.root().display(), league_id = cfg.league_id, season = cfg.season, "[RUN] starting");

    let source_cfg = Arc::clone(&cfg);
    let outcome = run_periods(range, move || EspnClient::new(&source_cfg), Arc::clone(&writer)).await;
    let mut failed = log_summary(&outcome);

    if pro_players {
        let result = match EspnClient::new(&cfg) {
            Ok(client) => process_pro_players(&client, writer.as_ref()).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            error!("[PRO PLAYERS] failed: {e}");
            failed += 1;
        }
    }

    failed
}

fn log_summary(outcome: &RunOutcome) -> usize {
    let mut totals = PeriodSummary::default();
    let mut failed = 0;
    for (matchup_period, result) in outcome {
        match result {
            Ok(summary) => {
                info!(matchup_period, "[RUN] matchup {matchup_period}: ok ({summary})");
                totals.matchups += summary.matchups;
                totals.scorings += summary.scorings;
                totals.rostered_players += summary.rostered_players;
            }
            Err(e) => {
                error!(matchup_period, "[RUN] matchup {matchup_period}: FAILED ({e})");
                failed += 1;
            }
        }
    }
    info!(
        ok = outcome.len() - failed,
        failed,
        "[RUN] done: {} of {} matchup periods written, {totals}",
        outcome.len() - failed,
        outcome.len(),
    );
    failed
}
