//! Responder — produces the next assistant message for a turn.
//!
//! [`RuleBasedResponder`] is the built-in implementation: it answers tool
//! results with a summary and maps user text onto `utc_now`, `calc`, or a
//! help message using fixed keyword and character rules.

use ruleclaw_core::agent::TurnState;
use ruleclaw_core::message::{Message, ToolCallRequest};

/// Keywords that route a user message to the `utc_now` tool.
const TIME_KEYWORDS: [&str; 2] = ["utc", "time"];

const ARITHMETIC_OPERATORS: [char; 4] = ['+', '-', '*', '/'];

pub const HELP_MESSAGE: &str = "Try a math expression (e.g., 12*(7+3)/2) or ask for UTC time.";
pub const EMPTY_PROMPT: &str = "Send a question.";

/// Produces exactly one new message from the current turn state.
pub trait Responder: Send + Sync {
    fn respond(&self, state: &TurnState) -> Message;
}

/// Keyword and pattern rules over the latest message.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedResponder;

impl Responder for RuleBasedResponder {
    fn respond(&self, state: &TurnState) -> Message {
        // Ids are the 1-based step that issues the request.
        let call_id = (state.steps + 1).to_string();

        match state.history.last() {
            Some(Message::ToolResult { content, .. }) => Message::assistant(format!("Result: {content}")),
            Some(Message::User { content }) => respond_to_user(content, call_id),
            Some(Message::Assistant { .. }) | None => Message::assistant(EMPTY_PROMPT),
        }
    }
}

fn respond_to_user(content: &str, call_id: String) -> Message {
    let text = content.trim();
    let lower = text.to_lowercase();

    if TIME_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Message::assistant_with_tools(
            "Calling utc_now()",
            vec![ToolCallRequest::new(call_id, "utc_now")],
        );
    }

    if let Some(expr) = extract_expression(text) {
        return Message::assistant_with_tools(
            format!("Calling calc({expr})"),
            vec![ToolCallRequest::new(call_id, "calc").with_argument("expression", expr)],
        );
    }

    Message::assistant(HELP_MESSAGE)
}

fn is_expression_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || "+-*/().".contains(c)
}

/// Pull the first maximal run of expression characters out of `text`.
///
/// Only the first run is considered. It qualifies when, once trimmed, it
/// holds at least one digit and one arithmetic operator.
pub fn extract_expression(text: &str) -> Option<&str> {
    let start = text.find(is_expression_char)?;
    let rest = &text[start..];
    let end = rest.find(|c: char| !is_expression_char(c)).unwrap_or(rest.len());
    let run = rest[..end].trim();

    let has_digit = run.chars().any(|c| c.is_ascii_digit());
    let has_operator = run.contains(ARITHMETIC_OPERATORS);
    (has_digit && has_operator).then_some(run)
}
