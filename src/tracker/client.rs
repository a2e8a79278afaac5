use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while querying the tracker
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Failed to start tracker: {0}")]
    SpawnFailed(#[from] std::io::Error),

    #[error("Tracker timed out after {0:?}")]
    Timeout(Duration),

    #[error("Tracker exited with code {0}")]
    NonZeroExit(i32),

    #[error("Tracker returned no output")]
    EmptyOutput,
}

/// Workflow state as reported by the tracker
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackerStatus {
    /// Whether the tracker answered at all
    pub available: bool,
    /// Identifier of the item being worked, if any
    pub active_work_item_id: Option<String>,
}

impl TrackerStatus {
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn idle() -> Self {
        Self {
            available: true,
            active_work_item_id: None,
        }
    }

    pub fn working_on<S: Into<String>>(id: S) -> Self {
        Self {
            available: true,
            active_work_item_id: Some(id.into()),
        }
    }

    pub fn has_active_work(&self) -> bool {
        self.available && self.active_work_item_id.is_some()
    }
}

/// Source of workflow state for the gatekeeper
///
/// Implementations never fail: anything that prevents a clear answer is
/// reported as [`TrackerStatus::unavailable`].
#[async_trait]
pub trait WorkTracker: Send + Sync {
    /// Ask whether an item is being worked in the project at `project_root`
    async fn query_active_work(&self, project_root: &Path) -> TrackerStatus;
}
