use chainlink_hooks::advisory::post_edit_reminder;
use chainlink_hooks::audit::AuditLogger;
use chainlink_hooks::config::policy::{MARKER_DIR, find_marker_dir, load_policy, write_default_override};
use chainlink_hooks::{
    ChainlinkTracker, Decision, Gatekeeper, HookResult, HookSettings, ProjectPolicy, ToolEvent,
    ToolName,
};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chainlink-hooks")]
#[command(version, about = "Assistant lifecycle hooks that keep edits tied to chainlink issues")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// PreToolUse gate: deny git mutations, block untracked edits (reads the event on stdin)
    WorkCheck,

    /// PostToolUse reminder after editing a code file (reads the event on stdin)
    PostEdit,

    /// Inspect or scaffold the project hook policy
    Policy {
        #[command(subcommand)]
        action: PolicyAction,
    },
}

#[derive(Subcommand, Debug)]
enum PolicyAction {
    /// Print the effective policy as JSON
    Show {
        /// Directory to resolve the project from (default: current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Write the default hook-config.json into the project's .chainlink directory
    Init {
        /// Directory to resolve the project from (default: current directory)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Overwrite an existing hook-config.json
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // stdout belongs to the hook protocol; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let code = match cli.command {
        Command::WorkCheck => work_check().await,
        Command::PostEdit => post_edit(),
        Command::Policy { action } => match run_policy(action) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
    };

    std::process::exit(code);
}

/// Read the hook event from stdin; unreadable input counts as an unrecognized tool
fn read_event() -> ToolEvent {
    ToolEvent::from_reader(io::stdin().lock()).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "treating hook input as unrecognized");
        ToolEvent::unrecognized()
    })
}

async fn work_check() -> i32 {
    let event = read_event();
    if event.tool_name() == ToolName::Other {
        return 0;
    }

    let settings = HookSettings::load_or_default();
    let gatekeeper = Gatekeeper::new(Box::new(ChainlinkTracker::new(&settings.tracker)));

    let cwd = std::env::current_dir();
    let decision = match &cwd {
        Ok(cwd) => gatekeeper.evaluate_in(&event, cwd).await,
        Err(e) => {
            tracing::warn!(error = %e, "no working directory; workflow gating disabled");
            gatekeeper.decide(&event, &ProjectPolicy::untracked()).await
        }
    };

    if settings.audit.enabled {
        let cwd = cwd.unwrap_or_default();
        record_audit(&settings, &event, &decision, &cwd);
    }

    if let Some(message) = decision.verdict.message() {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{}", message);
        let _ = out.flush();
    }

    decision.verdict.exit_code()
}

fn record_audit(settings: &HookSettings, event: &ToolEvent, decision: &Decision, cwd: &Path) {
    let result = settings
        .audit_log_path()
        .map_err(io::Error::other)
        .and_then(AuditLogger::with_path)
        .and_then(|logger| logger.log_decision(event, decision, cwd));

    if let Err(e) = result {
        tracing::warn!(error = %e, "failed to write audit log");
    }
}

fn post_edit() -> i32 {
    let event = read_event();

    if let Some(output) = post_edit_reminder(&event) {
        match serde_json::to_string(&output) {
            Ok(json) => {
                let mut out = io::stdout().lock();
                let _ = writeln!(out, "{}", json);
                let _ = out.flush();
            }
            Err(e) => tracing::warn!(error = %e, "failed to encode post-edit reminder"),
        }
    }

    0
}

fn run_policy(action: PolicyAction) -> HookResult<()> {
    match action {
        PolicyAction::Show { dir } => {
            let dir = resolve_dir(dir)?;
            let policy = load_policy(&dir);
            println!("{}", serde_json::to_string_pretty(&policy)?);
        }
        PolicyAction::Init { dir, force } => {
            let dir = resolve_dir(dir)?;
            let marker = find_marker_dir(&dir).unwrap_or_else(|| dir.join(MARKER_DIR));
            let path = write_default_override(&marker, force)?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}

fn resolve_dir(dir: Option<PathBuf>) -> io::Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir),
        None => std::env::current_dir(),
    }
}
