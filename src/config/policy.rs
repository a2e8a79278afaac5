use crate::config::settings::ConfigError;
use crate::security::{DEFAULT_ALLOWED_BASH_PREFIXES, DEFAULT_BLOCKED_GIT_COMMANDS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory that marks the root of a tracked project
pub const MARKER_DIR: &str = ".chainlink";

/// Override file inside the marker directory
pub const OVERRIDE_FILE: &str = "hook-config.json";

/// Maximum number of directories inspected while looking for the marker
pub const MAX_ASCENT: usize = 10;

/// The rule sets in force for one evaluation
///
/// Defaults are compiled in. A project can override either list through
/// `.chainlink/hook-config.json`; each key is merged on its own, so an override
/// that only touches `allowed_bash_prefixes` keeps the default blocked list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyConfig {
    pub blocked_git_commands: Vec<String>,
    pub allowed_bash_prefixes: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            blocked_git_commands: to_owned_list(DEFAULT_BLOCKED_GIT_COMMANDS),
            allowed_bash_prefixes: to_owned_list(DEFAULT_ALLOWED_BASH_PREFIXES),
        }
    }
}

/// Contents of `hook-config.json`; every key is optional
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PolicyOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_git_commands: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_bash_prefixes: Option<Vec<String>>,
}

impl PolicyConfig {
    /// Apply an override on top of this policy, key by key
    ///
    /// A present key replaces the list wholesale (an explicit `[]` empties it).
    /// Empty-string entries are dropped since they would match every command.
    pub fn merge(mut self, over: PolicyOverride) -> Self {
        if let Some(blocked) = over.blocked_git_commands {
            if blocked.is_empty() {
                tracing::warn!("project override empties the blocked git command list");
            }
            self.blocked_git_commands = drop_empty(blocked);
        }
        if let Some(allowed) = over.allowed_bash_prefixes {
            self.allowed_bash_prefixes = drop_empty(allowed);
        }
        self
    }
}

/// Policy plus the project it was loaded for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPolicy {
    /// `None` when no marker directory was found; workflow gating is then off
    pub marker_dir: Option<PathBuf>,
    #[serde(flatten)]
    pub config: PolicyConfig,
}

impl ProjectPolicy {
    /// Policy for a location outside any tracked project
    pub fn untracked() -> Self {
        Self {
            marker_dir: None,
            config: PolicyConfig::default(),
        }
    }

    /// Directory holding the marker, used as the tracker's working directory
    pub fn project_root(&self) -> Option<&Path> {
        self.marker_dir.as_deref().and_then(Path::parent)
    }
}

/// Load the policy for the project containing `start`
///
/// Never fails: a missing marker, missing file, unreadable file or malformed
/// JSON all produce the defaults.
pub fn load_policy<P: AsRef<Path>>(start: P) -> ProjectPolicy {
    let Some(marker_dir) = find_marker_dir(start) else {
        return ProjectPolicy::untracked();
    };

    let config = match read_override(&marker_dir) {
        Ok(Some(over)) => PolicyConfig::default().merge(over),
        Ok(None) => PolicyConfig::default(),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring project hook config");
            PolicyConfig::default()
        }
    };

    ProjectPolicy {
        marker_dir: Some(marker_dir),
        config,
    }
}

/// Walk upward from `start` looking for the marker directory
///
/// At most [`MAX_ASCENT`] directories are inspected, `start` included.
/// A relative `start` is resolved against the current directory first.
pub fn find_marker_dir<P: AsRef<Path>>(start: P) -> Option<PathBuf> {
    let start = start.as_ref();
    let mut current = std::path::absolute(start).unwrap_or_else(|_| start.to_path_buf());

    for _ in 0..MAX_ASCENT {
        let candidate = current.join(MARKER_DIR);
        if candidate.is_dir() {
            return Some(candidate);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Read the override file, `Ok(None)` when it does not exist
pub fn read_override(marker_dir: &Path) -> Result<Option<PolicyOverride>, ConfigError> {
    let path = marker_dir.join(OVERRIDE_FILE);
    if !path.is_file() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&path)?;
    let over: PolicyOverride = serde_json::from_str(&contents)?;
    Ok(Some(over))
}

/// Write the default lists to the override file so a project can edit them
pub fn write_default_override(marker_dir: &Path, force: bool) -> Result<PathBuf, ConfigError> {
    let path = marker_dir.join(OVERRIDE_FILE);
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path));
    }

    fs::create_dir_all(marker_dir)?;

    let defaults = PolicyConfig::default();
    let over = PolicyOverride {
        blocked_git_commands: Some(defaults.blocked_git_commands),
        allowed_bash_prefixes: Some(defaults.allowed_bash_prefixes),
    };
    let contents = serde_json::to_string_pretty(&over)?;
    fs::write(&path, contents + "\n")?;

    Ok(path)
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn drop_empty(items: Vec<String>) -> Vec<String> {
    items.into_iter().filter(|s| !s.is_empty()).collect()
}
