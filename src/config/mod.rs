pub mod policy;
pub mod settings;

pub use policy::{PolicyConfig, PolicyOverride, ProjectPolicy, find_marker_dir, load_policy};
pub use settings::{AuditSettings, ConfigError, HookSettings, TrackerSettings};
