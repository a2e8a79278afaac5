// End-to-end tests of the chainlink-hooks binary: stdin payload in, stdout + exit code out

mod helpers;

use helpers::{create_test_project, create_untracked_dir};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_chainlink-hooks");

/// Write a settings file whose tracker is a shell snippet
fn settings_with_tracker(dir: &Path, script: &str) -> std::path::PathBuf {
    let path = dir.join("settings.toml");
    let contents = format!(
        "[tracker]\nprogram = \"sh\"\nstatus_args = [\"-c\", {:?}]\ntimeout_seconds = 2\n",
        script
    );
    fs::write(&path, contents).unwrap();
    path
}

/// Settings pointing at a tracker binary that does not exist
fn settings_without_tracker(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("settings.toml");
    fs::write(&path, "[tracker]\nprogram = \"chainlink-hooks-missing-tracker\"\n").unwrap();
    path
}

fn run_hook(args: &[&str], cwd: &Path, settings: &Path, stdin: &str) -> Output {
    let mut child = Command::new(BIN)
        .args(args)
        .current_dir(cwd)
        .env("CHAINLINK_HOOKS_CONFIG", settings)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start chainlink-hooks");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();

    child.wait_with_output().expect("Failed to wait for chainlink-hooks")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_work_check_denies_git_push() {
    let (_temp, project) = create_test_project();
    let settings_dir = TempDir::new().unwrap();
    let settings = settings_without_tracker(settings_dir.path());

    let output = run_hook(
        &["work-check"],
        &project,
        &settings,
        r#"{"tool_name":"Bash","tool_input":{"command":"git push origin main"}}"#,
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).starts_with("DENIED:"));
}

#[test]
fn test_work_check_allows_ls_silently() {
    let (_temp, project) = create_test_project();
    let settings_dir = TempDir::new().unwrap();
    let settings = settings_without_tracker(settings_dir.path());

    let output = run_hook(
        &["work-check"],
        &project,
        &settings,
        r#"{"tool_name":"Bash","tool_input":{"command":"ls -la"}}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_work_check_denies_git_push_with_odd_extra_fields() {
    let (_temp, project) = create_test_project();
    let settings_dir = TempDir::new().unwrap();
    let settings = settings_without_tracker(settings_dir.path());

    let output = run_hook(
        &["work-check"],
        &project,
        &settings,
        r#"{"tool_name":"Bash","tool_input":{"command":"git push","file_path":1}}"#,
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).starts_with("DENIED:"));
}

#[test]
fn test_work_check_malformed_input_allows() {
    let (_temp, project) = create_test_project();
    let settings_dir = TempDir::new().unwrap();
    let settings = settings_without_tracker(settings_dir.path());

    for payload in ["", "not json", "[1,2,3]", r#"{"tool_name":"Read"}"#] {
        let output = run_hook(&["work-check"], &project, &settings, payload);
        assert_eq!(output.status.code(), Some(0), "payload {:?}", payload);
        assert!(output.stdout.is_empty());
    }
}

#[test]
fn test_work_check_missing_tracker_fails_open() {
    let (_temp, project) = create_test_project();
    let settings_dir = TempDir::new().unwrap();
    let settings = settings_without_tracker(settings_dir.path());

    let output = run_hook(
        &["work-check"],
        &project,
        &settings,
        r#"{"tool_name":"Write","tool_input":{"file_path":"a.py"}}"#,
    );

    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_work_check_outside_project_allows() {
    let (_temp, dir) = create_untracked_dir();
    let settings_dir = TempDir::new().unwrap();
    let settings = settings_without_tracker(settings_dir.path());

    let output = run_hook(
        &["work-check"],
        &dir,
        &settings,
        r#"{"tool_name":"Edit","tool_input":{"file_path":"a.py"}}"#,
    );

    assert_eq!(output.status.code(), Some(0));
}

#[cfg(unix)]
#[test]
fn test_work_check_blocks_without_active_issue() {
    let (_temp, project) = create_test_project();
    let settings_dir = TempDir::new().unwrap();
    let settings = settings_with_tracker(settings_dir.path(), "echo 'No active session'");

    let output = run_hook(
        &["work-check"],
        &project,
        &settings,
        r#"{"tool_name":"Write","tool_input":{"file_path":"a.py"}}"#,
    );

    assert_eq!(output.status.code(), Some(2));
    let text = stdout(&output);
    assert!(text.starts_with("BLOCKED:"));
    assert!(text.contains("chainlink list -s open"));
}

#[cfg(unix)]
#[test]
fn test_work_check_allows_with_active_issue() {
    let (_temp, project) = create_test_project();
    let settings_dir = TempDir::new().unwrap();
    let settings = settings_with_tracker(settings_dir.path(), "echo 'Working on: #42 Fix it'");

    let output = run_hook(
        &["work-check"],
        &project,
        &settings,
        r#"{"tool_name":"Write","tool_input":{"file_path":"a.py"}}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[cfg(unix)]
#[test]
fn test_work_check_writes_audit_log() {
    let (_temp, project) = create_test_project();
    let settings_dir = TempDir::new().unwrap();
    let log_path = settings_dir.path().join("logs").join("audit.log");
    let settings = settings_dir.path().join("settings.toml");
    fs::write(
        &settings,
        format!(
            "[tracker]\nprogram = \"chainlink-hooks-missing-tracker\"\n\n[audit]\nenabled = true\npath = {:?}\n",
            log_path.display().to_string()
        ),
    )
    .unwrap();

    let output = run_hook(
        &["work-check"],
        &project,
        &settings,
        r#"{"tool_name":"Bash","tool_input":{"command":"git commit -m x"}}"#,
    );
    assert_eq!(output.status.code(), Some(2));

    let content = fs::read_to_string(&log_path).unwrap();
    assert!(content.contains("[DENY blocked-git-mutation]"));
    assert!(content.contains("git commit -m x"));
}

#[test]
fn test_post_edit_reminder_for_code() {
    let (_temp, dir) = create_untracked_dir();
    let settings_dir = TempDir::new().unwrap();
    let settings = settings_without_tracker(settings_dir.path());

    let output = run_hook(
        &["post-edit"],
        &dir,
        &settings,
        r#"{"tool_name":"Edit","tool_input":{"file_path":"src/main.rs"}}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["hookSpecificOutput"]["hookEventName"], "PostToolUse");
    assert!(
        json["hookSpecificOutput"]["additionalContext"]
            .as_str()
            .unwrap()
            .contains("src/main.rs")
    );
}

#[test]
fn test_post_edit_silent_for_non_code() {
    let (_temp, dir) = create_untracked_dir();
    let settings_dir = TempDir::new().unwrap();
    let settings = settings_without_tracker(settings_dir.path());

    let output = run_hook(
        &["post-edit"],
        &dir,
        &settings,
        r#"{"tool_name":"Write","tool_input":{"file_path":"notes.md"}}"#,
    );

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_policy_init_then_show() {
    let (_temp, dir) = create_untracked_dir();
    let settings_dir = TempDir::new().unwrap();
    let settings = settings_without_tracker(settings_dir.path());
    let dir_arg = dir.to_string_lossy().to_string();

    let output = run_hook(&["policy", "init", "--dir", &dir_arg], &dir, &settings, "");
    assert_eq!(output.status.code(), Some(0));
    assert!(dir.join(".chainlink").join("hook-config.json").is_file());

    // Refuses to overwrite without --force
    let output = run_hook(&["policy", "init", "--dir", &dir_arg], &dir, &settings, "");
    assert_eq!(output.status.code(), Some(1));

    let output = run_hook(&["policy", "show", "--dir", &dir_arg], &dir, &settings, "");
    assert_eq!(output.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["marker_dir"].as_str().unwrap().ends_with(".chainlink"));
    assert!(
        json["blocked_git_commands"]
            .as_array()
            .unwrap()
            .iter()
            .any(|v| v == "git push")
    );
}

#[test]
fn test_policy_show_relative_dir_searches_above_cwd() {
    let (_temp, project) = create_test_project();
    let cwd = project.join("a");
    fs::create_dir_all(cwd.join("b")).unwrap();
    let settings_dir = TempDir::new().unwrap();
    let settings = settings_without_tracker(settings_dir.path());

    let output = run_hook(&["policy", "show", "--dir", "b"], &cwd, &settings, "");
    assert_eq!(output.status.code(), Some(0));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let marker = json["marker_dir"].as_str().unwrap();
    assert!(marker.ends_with(".chainlink"));
    assert!(!marker.contains("/a/"));
}
