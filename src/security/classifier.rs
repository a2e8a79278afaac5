use crate::config::policy::PolicyConfig;

/// Operators after which a second command starts
///
/// Each is matched together with the single space that follows it, so
/// `echo ok && git push` is caught while `echo ok &&git push` is not.
const CHAIN_OPERATORS: &[&str] = &["&&", ";", "|"];

/// How a shell command relates to the policy in force
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandClass {
    /// Contains a blocked git mutation (the matching prefix is kept for reporting)
    Blocked { prefix: String },
    /// Starts with an allow-listed prefix
    Allowed,
    /// Neither; subject to workflow gating
    Gated,
}

/// Classify a shell command against a policy
///
/// The blocked check always runs first: an allow-listed prefix never rescues
/// a command that also smuggles a blocked mutation.
pub fn classify(command: &str, policy: &PolicyConfig) -> CommandClass {
    if let Some(prefix) = blocked_prefix(command, &policy.blocked_git_commands) {
        return CommandClass::Blocked {
            prefix: prefix.to_string(),
        };
    }

    if is_allowed_bash(command, &policy.allowed_bash_prefixes) {
        return CommandClass::Allowed;
    }

    CommandClass::Gated
}

/// Check whether a command is a blocked git mutation
///
/// This is a string test, not a shell parse. Quoting, variables, subshells and
/// extra whitespace around operators all slip past it.
pub fn is_blocked_git_mutation<S: AsRef<str>>(command: &str, blocked: &[S]) -> bool {
    blocked_prefix(command, blocked).is_some()
}

/// Return the first blocked prefix the command matches, if any
pub fn blocked_prefix<'a, S: AsRef<str>>(command: &str, blocked: &'a [S]) -> Option<&'a str> {
    let command = command.trim();

    // Leading position
    for prefix in blocked {
        let prefix = prefix.as_ref();
        if command.starts_with(prefix) {
            return Some(prefix);
        }
    }

    // Chained position: "&& git push", "; git push", "| git push"
    for prefix in blocked {
        let prefix = prefix.as_ref();
        for op in CHAIN_OPERATORS {
            if command.contains(&format!("{} {}", op, prefix)) {
                return Some(prefix);
            }
        }
    }

    None
}

/// Check whether a command starts with an allow-listed prefix
///
/// Only the leading command counts. `ls && cargo publish` is allowed by `ls`
/// because gating is about work tracking, while blocked mutations anywhere in
/// the chain are still caught by [`is_blocked_git_mutation`] first.
pub fn is_allowed_bash<S: AsRef<str>>(command: &str, allowed: &[S]) -> bool {
    let command = command.trim();
    allowed.iter().any(|prefix| command.starts_with(prefix.as_ref()))
}
