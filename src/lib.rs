pub mod advisory;
pub mod audit;
pub mod config;
pub mod error;
pub mod gatekeeper;
pub mod hook;
pub mod security;
pub mod tracker;

// Re-export commonly used types for convenience
pub use config::{HookSettings, PolicyConfig, ProjectPolicy, load_policy};
pub use error::{HookError, HookResult};
pub use gatekeeper::Gatekeeper;
pub use hook::{Decision, DecisionStep, ToolEvent, ToolName, Verdict};
pub use security::{is_allowed_bash, is_blocked_git_mutation};
pub use tracker::{ChainlinkTracker, TrackerStatus, WorkTracker};
