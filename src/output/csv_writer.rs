use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Destination, TabularWriter};
use crate::error::Result;

/// Writes each destination as a CSV file under `root`, creating directories as needed.
#[derive(Debug, Clone)]
pub struct CsvWriter {
    root: PathBuf,
}

impl CsvWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, destination: &Destination) -> PathBuf {
        self.root.join(destination.relative_path())
    }
}

impl TabularWriter for CsvWriter {
    fn write(&self, destination: &Destination, header: &[&str], rows: &[Vec<String>]) -> Result<()> {
        let path = self.path_of(destination);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(header)?;
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;

        debug!(path = %path.display(), rows = rows.len(), "[CSV] written");
        Ok(())
    }
}
