#![allow(dead_code)]

use async_trait::async_trait;
use chainlink_hooks::{TrackerStatus, WorkTracker};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// Helper to create a project directory containing a `.chainlink` marker
pub fn create_test_project() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let project_path = temp_dir.path().to_path_buf();

    fs::create_dir(project_path.join(".chainlink")).expect("Failed to create marker directory");

    (temp_dir, project_path)
}

/// Helper to create a directory with no marker anywhere inside it
pub fn create_untracked_dir() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().to_path_buf();
    (temp_dir, path)
}

/// Helper to write `.chainlink/hook-config.json`
pub fn write_hook_config(project_path: &Path, json: &str) {
    fs::write(project_path.join(".chainlink").join("hook-config.json"), json)
        .expect("Failed to write hook config");
}

/// Tracker stub that returns a fixed status and counts its calls
pub struct CountingTracker {
    status: TrackerStatus,
    calls: Arc<AtomicUsize>,
}

impl CountingTracker {
    pub fn new(status: TrackerStatus) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let tracker = Self {
            status,
            calls: Arc::clone(&calls),
        };
        (tracker, calls)
    }
}

#[async_trait]
impl WorkTracker for CountingTracker {
    async fn query_active_work(&self, _project_root: &Path) -> TrackerStatus {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.status.clone()
    }
}

/// Tracker stub that never answers in time
pub struct TimingOutTracker;

#[async_trait]
impl WorkTracker for TimingOutTracker {
    async fn query_active_work(&self, _project_root: &Path) -> TrackerStatus {
        TrackerStatus::unavailable()
    }
}

pub fn calls(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}
