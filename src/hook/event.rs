use serde::Deserialize;
use serde_json::Value;
use std::io::Read;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Failed to read hook input: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Invalid hook payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Tools the gatekeeper knows how to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    Write,
    Edit,
    Bash,
    Other,
}

impl ToolName {
    pub fn parse(name: &str) -> Self {
        match name {
            "Write" => ToolName::Write,
            "Edit" => ToolName::Edit,
            "Bash" => ToolName::Bash,
            _ => ToolName::Other,
        }
    }
}

/// One proposed tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolEvent {
    Bash { command: String },
    Write { file_path: String },
    Edit { file_path: String },
    Other { name: String },
}

/// Raw payload as sent by the host
#[derive(Debug, Deserialize)]
struct HookInput {
    #[serde(default)]
    tool_name: String,
    #[serde(default)]
    tool_input: Value,
}

/// String field of `tool_input`, empty when missing or not a string
fn input_field(tool_input: &Value, key: &str) -> String {
    tool_input
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

impl ToolEvent {
    /// Event standing in for absent or unparsable input
    pub fn unrecognized() -> Self {
        ToolEvent::Other {
            name: String::new(),
        }
    }

    /// Parse a host payload
    ///
    /// Only the field the tool uses is read. A missing or non-string value
    /// becomes an empty string; unrelated fields never affect the result.
    pub fn from_json(payload: &str) -> Result<Self, EventError> {
        let input: HookInput = serde_json::from_str(payload)?;
        let tool_input = &input.tool_input;

        let event = match ToolName::parse(&input.tool_name) {
            ToolName::Bash => ToolEvent::Bash {
                command: input_field(tool_input, "command"),
            },
            ToolName::Write => ToolEvent::Write {
                file_path: input_field(tool_input, "file_path"),
            },
            ToolName::Edit => ToolEvent::Edit {
                file_path: input_field(tool_input, "file_path"),
            },
            ToolName::Other => ToolEvent::Other {
                name: input.tool_name,
            },
        };

        Ok(event)
    }

    /// Read and parse a whole payload from a reader (stdin in the binary)
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, EventError> {
        let mut payload = String::new();
        reader.read_to_string(&mut payload)?;
        Self::from_json(&payload)
    }

    pub fn tool_name(&self) -> ToolName {
        match self {
            ToolEvent::Bash { .. } => ToolName::Bash,
            ToolEvent::Write { .. } => ToolName::Write,
            ToolEvent::Edit { .. } => ToolName::Edit,
            ToolEvent::Other { .. } => ToolName::Other,
        }
    }

    /// Shell command, for Bash events only
    pub fn command(&self) -> Option<&str> {
        match self {
            ToolEvent::Bash { command } => Some(command),
            _ => None,
        }
    }

    /// Target file, for Write and Edit events only
    pub fn file_path(&self) -> Option<&str> {
        match self {
            ToolEvent::Write { file_path } | ToolEvent::Edit { file_path } => Some(file_path),
            _ => None,
        }
    }

    /// Short description for logs: the command or the file path
    pub fn subject(&self) -> &str {
        match self {
            ToolEvent::Bash { command } => command,
            ToolEvent::Write { file_path } | ToolEvent::Edit { file_path } => file_path,
            ToolEvent::Other { name } => name,
        }
    }
}
