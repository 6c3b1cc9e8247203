//! JSON persistence of run results
//!
//! Each run is written once to `latency_test_results_YYYYMMDD_HHMMSS.json`
//! unless an explicit path is given. Failed probes carry the latency string
//! `"inf"` since JSON has no infinity literal.

use crate::error::{AppError, Result};
use crate::models::ResultsSet;
use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// On-disk artifact of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedResults {
    /// Local time the file was written
    pub timestamp: NaiveDateTime,
    pub results: ResultsSet,
}

/// Writes results sets to JSON files
#[derive(Debug, Clone)]
pub struct ResultsPersister {
    output_dir: PathBuf,
}

impl Default for ResultsPersister {
    fn default() -> Self {
        Self::new(crate::defaults::DEFAULT_OUTPUT_DIR)
    }
}

impl ResultsPersister {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// File name derived from a local timestamp
    pub fn default_filename(now: &DateTime<Local>) -> String {
        format!(
            "{}{}.json",
            crate::defaults::RESULTS_FILE_PREFIX,
            now.format("%Y%m%d_%H%M%S")
        )
    }

    /// Save results, logging instead of returning failures
    ///
    /// Returns the written path. An empty set writes nothing.
    pub fn save(&self, results: &ResultsSet, filename: Option<&Path>) -> Option<PathBuf> {
        if results.is_empty() {
            warn!("No results to save.");
            return None;
        }

        match self.try_save(results, filename) {
            Ok(path) => {
                info!("Results saved to {}", path.display());
                Some(path)
            }
            Err(e) => {
                error!("Failed to save results: {}", e);
                None
            }
        }
    }

    /// Save results, propagating I/O and serialization errors
    pub fn try_save(&self, results: &ResultsSet, filename: Option<&Path>) -> Result<PathBuf> {
        let now = Local::now();
        let path = match filename {
            Some(path) => path.to_path_buf(),
            None => {
                self.ensure_output_dir()?;
                self.output_dir.join(Self::default_filename(&now))
            }
        };

        let saved = SavedResults {
            timestamp: now.naive_local(),
            results: results.clone(),
        };

        let content = serde_json::to_string_pretty(&saved)?;
        fs::write(&path, content).map_err(|e| {
            AppError::io(format!("Failed to write results file '{}': {}", path.display(), e))
        })?;

        Ok(path)
    }

    /// Read a previously saved results file
    pub fn load(path: &Path) -> Result<SavedResults> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::io(format!("Failed to read results file '{}': {}", path.display(), e))
        })?;
        let saved = serde_json::from_str(&content)?;
        Ok(saved)
    }

    fn ensure_output_dir(&self) -> Result<()> {
        if !self.output_dir.as_os_str().is_empty() && !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir).map_err(|e| {
                AppError::io(format!(
                    "Failed to create output directory '{}': {}",
                    self.output_dir.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}
