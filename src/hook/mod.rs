pub mod event;
pub mod verdict;

pub use event::{EventError, ToolEvent, ToolName};
pub use verdict::{AdvisoryOutput, Decision, DecisionStep, EXIT_STOP, Verdict};
