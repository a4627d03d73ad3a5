//! Turn state and the small vocabulary of the agent loop.

use serde::{Deserialize, Serialize};

use crate::message::{History, Message};

/// Per-turn state: the transcript plus how many responder steps ran.
#[derive(Debug, Clone, Default)]
pub struct TurnState {
    pub history: History,

    /// Responder invocations in the current turn. Only ever increases.
    pub steps: u32,
}

impl TurnState {
    /// Start a new turn on top of an existing history.
    pub fn new(history: History) -> Self {
        Self { history, steps: 0 }
    }

    /// Append a responder message and count the step.
    pub fn record_response(&mut self, message: Message) {
        self.history.push(message);
        self.steps += 1;
    }
}

/// Router decision after each responder step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// The last message asks for tools and there is budget left.
    ContinueWithTools,
    Stop,
}

/// States of the per-turn loop controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopState {
    AwaitingResponse,
    AwaitingToolResults,
    Done,
}

/// Why a turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The responder produced a message without tool calls.
    Answered,
    /// The step ceiling was reached.
    StepLimit,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Answered => write!(f, "answered"),
            Self::StepLimit => write!(f, "step_limit"),
        }
    }
}

/// What a finished turn hands back to the caller.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The new baseline history for the next turn.
    pub history: History,

    /// Content of the most recent assistant message (empty if none).
    pub answer: String,

    pub steps: u32,
    pub stop_reason: StopReason,
}
