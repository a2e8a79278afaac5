pub mod classifier;

pub use classifier::{CommandClass, classify, is_allowed_bash, is_blocked_git_mutation};

/// Git commands that rewrite history or publish it
///
/// These are denied unconditionally when they appear at the start of a command
/// or right after a chaining operator. A project override may replace this list,
/// but nothing (missing tracker, missing project) can bypass the check itself.
pub const DEFAULT_BLOCKED_GIT_COMMANDS: &[&str] = &[
    // History
    "git push",
    "git commit",
    "git merge",
    "git rebase",
    "git cherry-pick",
    "git reset",
    // Working tree
    "git checkout .",
    "git restore .",
    "git clean",
    "git stash",
    // Refs and patches
    "git tag",
    "git am",
    "git apply",
    "git branch -d",
    "git branch -D",
    "git branch -m",
];

/// Command prefixes that skip workflow gating
///
/// Read-only git queries, build/test tooling and shell navigation. Matching is
/// by plain prefix on the trimmed command, so `ls` also admits `lsblk`.
pub const DEFAULT_ALLOWED_BASH_PREFIXES: &[&str] = &[
    // Tracker itself
    "chainlink ",
    // Read-only git
    "git status",
    "git diff",
    "git log",
    "git branch",
    "git show",
    // Rust
    "cargo test",
    "cargo build",
    "cargo check",
    "cargo clippy",
    "cargo fmt",
    // JavaScript / Python
    "npm test",
    "npm run",
    "npx ",
    "tsc",
    "node ",
    "python ",
    // Shell
    "ls",
    "dir",
    "pwd",
    "echo",
];
