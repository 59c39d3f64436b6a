//! Snapshot loader.
//!
//! A snapshot is a JSON or YAML document holding cycle and plan records as
//! the persistence collaborator would hand them over. It seeds the
//! in-memory repositories for the dashboard binary and for integration
//! tests.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

use crate::adapters::memory::{InMemoryCycleRepository, InMemoryPdiRepository};
use crate::domain::cycle::{CycleStatus, EvaluationCycle};
use crate::domain::foundation::Timestamp;
use crate::domain::pdi::DevelopmentPlan;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML snapshot: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported snapshot format '{0}' (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(SnapshotFormat::Json),
            "yaml" | "yml" => Ok(SnapshotFormat::Yaml),
            _ => Err(SnapshotError::UnsupportedFormat(ext)),
        }
    }
}

/// Cycle and plan records at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Pins `now` for reproducible reports. Absent means "use the clock".
    #[serde(default)]
    pub as_of: Option<Timestamp>,
    #[serde(default)]
    pub cycles: Vec<EvaluationCycle>,
    #[serde(default)]
    pub plans: Vec<DevelopmentPlan>,
}

impl Snapshot {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let format = SnapshotFormat::from_path(path)?;
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let snapshot = Self::parse(&content, format)?;
        tracing::info!(
            path = %path.display(),
            cycles = snapshot.cycles.len(),
            plans = snapshot.plans.len(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn parse(content: &str, format: SnapshotFormat) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = match format {
            SnapshotFormat::Json => serde_json::from_str(content)?,
            SnapshotFormat::Yaml => serde_yaml::from_str(content)?,
        };
        snapshot.warn_on_inconsistencies();
        Ok(snapshot)
    }

    /// Number of cycles recorded as OPEN. Anything above one is inconsistent
    /// data that the next activation will repair.
    pub fn open_cycle_count(&self) -> usize {
        self.cycles
            .iter()
            .filter(|c| c.status == CycleStatus::Open)
            .count()
    }

    /// Seeds fresh in-memory repositories with the snapshot records.
    pub fn into_repositories(self) -> (InMemoryCycleRepository, InMemoryPdiRepository) {
        (
            InMemoryCycleRepository::with_cycles(self.cycles),
            InMemoryPdiRepository::with_plans(self.plans),
        )
    }

    fn warn_on_inconsistencies(&self) {
        let open = self.open_cycle_count();
        if open > 1 {
            tracing::warn!(open_cycles = open, "Snapshot contains more than one open cycle");
        }
    }
}
