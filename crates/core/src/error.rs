//! Error types for the ruleclaw domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Tool failures never escape the tool executor; they are rendered into
//! conversation text.

use thiserror::Error;

/// Failures raised while resolving or running a single tool call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("unknown tool '{0}'")]
    NotFound(String),

    #[error("invalid arguments for {tool_name}: {reason}")]
    InvalidArguments { tool_name: String, reason: String },

    #[error("{tool_name} failed: {reason}")]
    ExecutionFailed { tool_name: String, reason: String },
}

impl ToolError {
    /// Shorthand for an execution failure.
    pub fn failed(tool_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::ExecutionFailed {
            tool_name: tool_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Shorthand for an argument schema mismatch.
    pub fn invalid(tool_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool_name: tool_name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_failure_displays_correctly() {
        let err = ToolError::failed("calc", "division by zero");
        assert_eq!(err.to_string(), "calc failed: division by zero");
    }

    #[test]
    fn not_found_names_the_tool() {
        let err = ToolError::NotFound("weather".into());
        assert_eq!(err.to_string(), "unknown tool 'weather'");
    }

    #[test]
    fn invalid_arguments_displays_reason() {
        let err = ToolError::invalid("calc", "missing required argument 'expression'");
        assert!(err.to_string().contains("calc"));
        assert!(err.to_string().contains("expression"));
    }
}
