pub mod csv_writer;

use std::fmt;
use std::path::PathBuf;

use crate::error::Result;
use crate::types::TabularRecord;

pub use csv_writer::CsvWriter;

/// Record set a destination holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Matchups,
    Scorings,
    RosteredPlayers,
    ProPlayerScorings,
}

impl RecordKind {
    fn name(self) -> &'static str {
        match self {
            RecordKind::Matchups => "matchups",
            RecordKind::Scorings => "scorings",
            RecordKind::RosteredPlayers => "rostered_players",
            RecordKind::ProPlayerScorings => "pro_players_scorings",
        }
    }

    /// Per-period sets get their own directory; league-wide sets sit at the root.
    fn dir(self) -> Option<&'static str> {
        match self {
            RecordKind::ProPlayerScorings => None,
            kind => Some(kind.name()),
        }
    }

    fn file_stem(self) -> &'static str {
        match self {
            RecordKind::Matchups => "matchup",
            RecordKind::Scorings => "scorings",
            RecordKind::RosteredPlayers => "rostered-players",
            RecordKind::ProPlayerScorings => "pro_players_scorings",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where one record set lands, relative to the writer's root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Destination {
    pub kind: RecordKind,
    pub matchup_period: Option<u32>,
}

impl Destination {
    pub fn for_period(kind: RecordKind, matchup_period: u32) -> Self {
        Self { kind, matchup_period: Some(matchup_period) }
    }

    pub fn league_wide(kind: RecordKind) -> Self {
        Self { kind, matchup_period: None }
    }

    /// `<dir>/<stem>-<matchup period>.csv`, or `<stem>.csv` for league-wide sets.
    pub fn relative_path(&self) -> PathBuf {
        let file = match self.matchup_period {
            Some(mp) => format!("{}-{mp}.csv", self.kind.file_stem()),
            None => format!("{}.csv", self.kind.file_stem()),
        };
        match self.kind.dir() {
            Some(dir) => PathBuf::from(dir).join(file),
            None => PathBuf::from(file),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.relative_path().display())
    }
}

/// Sink for flat record sets. Each call replaces whatever the destination held.
pub trait TabularWriter: Send + Sync {
    fn write(&self, destination: &Destination, header: &[&str], rows: &[Vec<String>]) -> Result<()>;
}

/// Writes `records` with their own header. Returns the number of rows written.
pub fn write_records<W, R>(writer: &W, destination: &Destination, records: &[R]) -> Result<usize>
where
    W: TabularWriter + ?Sized,
    R: TabularRecord,
{
    let rows: Vec<Vec<String>> = records.iter().map(R::to_row).collect();
    writer.write(destination, R::HEADER, &rows)?;
    Ok(rows.len())
}

// ---------------------------------------------------------------------------
// In-memory writer for tests
// ---------------------------------------------------------------------------
