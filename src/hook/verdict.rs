use serde::Serialize;
use std::fmt;

/// Exit status the host reads as "stop and show the message"
pub const EXIT_STOP: i32 = 2;

pub const DENY_GIT_MUTATION: &str = "DENIED: Git mutation commands are not allowed. \
Commits, pushes, merges, rebases, and other git write operations \
are performed by the human, not the AI.\n\n\
Read-only git commands (status, diff, log, show, branch) are allowed.";

pub const BLOCK_NO_ACTIVE_ISSUE: &str = "BLOCKED: No active chainlink issue. \
Create and work on an issue before making changes.\n\n  \
chainlink quick \"<describe your task>\" -p <priority> -l <label>\n\n\
Or pick an existing issue:\n  \
chainlink list -s open\n  \
chainlink session work <id>";

/// The gatekeeper's answer for one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    /// Permanent refusal; nothing in the environment changes it
    Deny { message: String },
    /// Refusal the operator can resolve by starting tracked work
    Block { message: String },
}

impl Verdict {
    pub fn deny_git_mutation() -> Self {
        Verdict::Deny {
            message: DENY_GIT_MUTATION.to_string(),
        }
    }

    pub fn block_no_active_work() -> Self {
        Verdict::Block {
            message: BLOCK_NO_ACTIVE_ISSUE.to_string(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allow)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Verdict::Allow => None,
            Verdict::Deny { message } | Verdict::Block { message } => Some(message),
        }
    }

    /// Deny and Block share one failure status
    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Allow => 0,
            Verdict::Deny { .. } | Verdict::Block { .. } => EXIT_STOP,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Allow => "ALLOW",
            Verdict::Deny { .. } => "DENY",
            Verdict::Block { .. } => "BLOCK",
        }
    }
}

/// Which rule produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionStep {
    UnmanagedTool,
    BlockedGitMutation,
    AllowListed,
    NoProject,
    TrackerUnavailable,
    ActiveWork,
    NoActiveWork,
}

impl fmt::Display for DecisionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DecisionStep::UnmanagedTool => "unmanaged-tool",
            DecisionStep::BlockedGitMutation => "blocked-git-mutation",
            DecisionStep::AllowListed => "allow-listed",
            DecisionStep::NoProject => "no-project",
            DecisionStep::TrackerUnavailable => "tracker-unavailable",
            DecisionStep::ActiveWork => "active-work",
            DecisionStep::NoActiveWork => "no-active-work",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub verdict: Verdict,
    pub step: DecisionStep,
}

impl Decision {
    pub fn allow(step: DecisionStep) -> Self {
        Self {
            verdict: Verdict::Allow,
            step,
        }
    }
}

/// JSON shape for advisory hooks that add context without blocking
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AdvisoryOutput {
    #[serde(rename = "hookSpecificOutput")]
    pub hook_specific_output: HookSpecificOutput,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HookSpecificOutput {
    #[serde(rename = "hookEventName")]
    pub hook_event_name: String,
    #[serde(rename = "additionalContext")]
    pub additional_context: String,
}

impl AdvisoryOutput {
    pub fn new(event_name: &str, context: String) -> Self {
        Self {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: event_name.to_string(),
                additional_context: context,
            },
        }
    }
}
