use crate::hook::event::ToolEvent;
use crate::hook::verdict::AdvisoryOutput;

/// Extensions treated as source code
pub const CODE_EXTENSIONS: &[&str] = &[
    ".rs", ".py", ".js", ".ts", ".tsx", ".jsx", ".go", ".java", ".c", ".cpp", ".h", ".hpp", ".cs",
    ".rb", ".php", ".swift", ".kt", ".scala", ".zig", ".odin",
];

pub fn is_code_file(path: &str) -> bool {
    CODE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Build the PostToolUse reminder for a Write/Edit of a code file, `None` otherwise
///
/// Never blocks: it only adds context for the assistant's next turn.
pub fn post_edit_reminder(event: &ToolEvent) -> Option<AdvisoryOutput> {
    let path = match event {
        ToolEvent::Write { file_path } | ToolEvent::Edit { file_path } => file_path,
        _ => return None,
    };

    if !is_code_file(path) {
        return None;
    }

    let context = format!(
        "After modifying {}:\n\
         - Verify no TODO/FIXME placeholders were left behind\n\
         - Check for unused imports that should be removed\n\
         - Ensure error handling is complete (no unwrap/panic on user input)\n\
         - If this change requires updates elsewhere, make them now",
        path
    );

    Some(AdvisoryOutput::new("PostToolUse", context))
}
