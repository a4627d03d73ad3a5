//! Router — decides whether a turn continues into tool execution.

use ruleclaw_core::agent::Route;
use ruleclaw_core::message::History;

/// Pick the next transition after a responder step.
///
/// The step ceiling wins over everything else; below it, only an assistant
/// message carrying tool calls keeps the turn going.
pub fn route(history: &History, steps: u32, step_limit: u32) -> Route {
    if steps >= step_limit {
        return Route::Stop;
    }

    match history.last() {
        Some(last) if last.is_assistant() && last.has_tool_calls() => Route::ContinueWithTools,
        _ => Route::Stop,
    }
}
