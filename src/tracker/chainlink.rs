use crate::config::settings::TrackerSettings;
use crate::tracker::client::{TrackerError, TrackerStatus, WorkTracker};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Item id reported when the tracker says work is active but names no number
pub const ACTIVE_SENTINEL: &str = "active";

/// Queries the `chainlink` CLI for the current session
#[derive(Debug, Clone)]
pub struct ChainlinkTracker {
    program: String,
    status_args: Vec<String>,
    timeout: Duration,
    active_marker: String,
}

impl ChainlinkTracker {
    pub fn new(settings: &TrackerSettings) -> Self {
        Self {
            program: settings.program.clone(),
            status_args: settings.status_args.clone(),
            timeout: Duration::from_secs(settings.timeout_seconds),
            active_marker: settings.active_marker.clone(),
        }
    }

    /// Override the timeout (tests use sub-second bounds)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run the status query once and return its trimmed stdout
    ///
    /// The child is killed if the timeout elapses or the future is dropped.
    pub async fn run_status_query(&self, project_root: &Path) -> Result<String, TrackerError> {
        let child = Command::new(&self.program)
            .args(&self.status_args)
            .current_dir(project_root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => return Err(TrackerError::Timeout(self.timeout)),
        };

        if !output.status.success() {
            return Err(TrackerError::NonZeroExit(output.status.code().unwrap_or(-1)));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            return Err(TrackerError::EmptyOutput);
        }

        Ok(stdout)
    }
}

impl Default for ChainlinkTracker {
    fn default() -> Self {
        Self::new(&TrackerSettings::default())
    }
}

#[async_trait]
impl WorkTracker for ChainlinkTracker {
    async fn query_active_work(&self, project_root: &Path) -> TrackerStatus {
        match self.run_status_query(project_root).await {
            Ok(text) => parse_status(&text, &self.active_marker),
            Err(e) => {
                tracing::debug!(error = %e, program = %self.program, "tracker unavailable");
                TrackerStatus::unavailable()
            }
        }
    }
}

/// Structured status a tracker may print instead of free text
#[derive(Debug, Deserialize)]
struct StructuredStatus {
    has_active_item: bool,
    #[serde(default)]
    item_id: Option<serde_json::Value>,
}

/// Interpret tracker output
///
/// A JSON object `{"has_active_item": .., "item_id": ..}` is taken at its word.
/// Otherwise each line is scanned for `marker`; digits right after it become
/// the item id.
pub fn parse_status(text: &str, marker: &str) -> TrackerStatus {
    let trimmed = text.trim();

    if trimmed.starts_with('{') {
        if let Ok(status) = serde_json::from_str::<StructuredStatus>(trimmed) {
            if !status.has_active_item {
                return TrackerStatus::idle();
            }
            let id = match status.item_id {
                Some(serde_json::Value::String(s)) if !s.is_empty() => s,
                Some(serde_json::Value::Number(n)) => n.to_string(),
                _ => ACTIVE_SENTINEL.to_string(),
            };
            return TrackerStatus::working_on(id);
        }
    }

    for line in trimmed.lines() {
        if let Some(idx) = line.find(marker) {
            let rest = &line[idx + marker.len()..];
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            if digits.is_empty() {
                return TrackerStatus::working_on(ACTIVE_SENTINEL);
            }
            return TrackerStatus::working_on(digits);
        }
    }

    TrackerStatus::idle()
}
