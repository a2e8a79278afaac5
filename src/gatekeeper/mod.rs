use crate::config::policy::{ProjectPolicy, load_policy};
use crate::hook::event::ToolEvent;
use crate::hook::verdict::{Decision, DecisionStep, Verdict};
use crate::security::classifier::{CommandClass, classify};
use crate::tracker::client::WorkTracker;
use std::path::Path;

/// Decision state machine for PreToolUse events
///
/// Steps run in a fixed order and the first one that fires decides:
///
/// | Step | Condition | Verdict |
/// |------|-----------|---------|
/// | 1 | tool is not Write, Edit or Bash | Allow |
/// | 2 | Bash command contains a blocked git mutation | Deny |
/// | 3 | Bash command starts with an allowed prefix | Allow |
/// | 4 | no `.chainlink` directory above the working directory | Allow |
/// | 5 | tracker unreachable | Allow |
/// | 6 | tracker reports an active item | Allow |
/// | 7 | tracker reports no active item | Block |
///
/// Only step 2 refuses regardless of the environment. Every other failure
/// resolves to Allow.
pub struct Gatekeeper {
    tracker: Box<dyn WorkTracker>,
}

impl Gatekeeper {
    pub fn new(tracker: Box<dyn WorkTracker>) -> Self {
        Self { tracker }
    }

    /// Load the policy for `cwd` and decide
    pub async fn evaluate_in(&self, event: &ToolEvent, cwd: &Path) -> Decision {
        let policy = load_policy(cwd);
        self.decide(event, &policy).await
    }

    /// Decide an event under an already loaded policy
    ///
    /// The tracker is queried at most once, and only when steps 1-4 pass.
    pub async fn decide(&self, event: &ToolEvent, policy: &ProjectPolicy) -> Decision {
        let decision = self.run_steps(event, policy).await;
        tracing::debug!(
            verdict = decision.verdict.label(),
            step = %decision.step,
            subject = event.subject(),
            "gatekeeper decision"
        );
        decision
    }

    async fn run_steps(&self, event: &ToolEvent, policy: &ProjectPolicy) -> Decision {
        match event {
            ToolEvent::Other { .. } => return Decision::allow(DecisionStep::UnmanagedTool),
            ToolEvent::Bash { command } => match classify(command, &policy.config) {
                CommandClass::Blocked { prefix } => {
                    tracing::info!(%prefix, "denied git mutation");
                    return Decision {
                        verdict: Verdict::deny_git_mutation(),
                        step: DecisionStep::BlockedGitMutation,
                    };
                }
                CommandClass::Allowed => return Decision::allow(DecisionStep::AllowListed),
                CommandClass::Gated => {}
            },
            ToolEvent::Write { .. } | ToolEvent::Edit { .. } => {}
        }

        let Some(project_root) = policy.project_root() else {
            return Decision::allow(DecisionStep::NoProject);
        };

        let status = self.tracker.query_active_work(project_root).await;
        if !status.available {
            return Decision::allow(DecisionStep::TrackerUnavailable);
        }

        if status.has_active_work() {
            return Decision::allow(DecisionStep::ActiveWork);
        }

        Decision {
            verdict: Verdict::block_no_active_work(),
            step: DecisionStep::NoActiveWork,
        }
    }
}
