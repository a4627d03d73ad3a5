//! The agent loop controller.

use std::sync::Arc;

use chrono::Utc;
use ruleclaw_config::{AgentSettings, DEFAULT_STEP_LIMIT};
use ruleclaw_core::agent::{LoopState, Route, StopReason, TurnOutcome, TurnState};
use ruleclaw_core::event::{DomainEvent, EventBus};
use ruleclaw_core::message::{History, Message};
use ruleclaw_core::tool::ToolRegistry;
use tracing::{debug, info, warn};

use crate::executor::ToolExecutor;
use crate::responder::{Responder, RuleBasedResponder};
use crate::router::route;

/// Drives one user turn through responder, router, and tool executor.
pub struct AgentLoop {
    /// Produces the next assistant message
    responder: Arc<dyn Responder>,

    /// Runs requested tools
    executor: ToolExecutor,

    /// Maximum responder steps per turn
    step_limit: u32,

    /// Whether to append a notice when the limit cuts off pending tool calls
    step_limit_notice: bool,

    /// Event bus for domain events
    event_bus: Option<Arc<EventBus>>,
}

impl AgentLoop {
    /// Create a loop with the rule-based responder and the default step limit.
    pub fn new(tools: Arc<ToolRegistry>) -> Self {
        Self {
            responder: Arc::new(RuleBasedResponder),
            executor: ToolExecutor::new(tools),
            step_limit: DEFAULT_STEP_LIMIT,
            step_limit_notice: true,
            event_bus: None,
        }
    }

    /// Create a loop using the `[agent]` section of the config.
    pub fn from_settings(settings: &AgentSettings, tools: Arc<ToolRegistry>) -> Self {
        Self::new(tools)
            .with_step_limit(settings.step_limit)
            .with_step_limit_notice(settings.step_limit_notice)
    }

    /// Replace the responder.
    pub fn with_responder(mut self, responder: Arc<dyn Responder>) -> Self {
        self.responder = responder;
        self
    }

    /// Set the maximum responder steps per turn. Values below 1 become 1.
    pub fn with_step_limit(mut self, limit: u32) -> Self {
        self.step_limit = limit.max(1);
        self
    }

    pub fn with_step_limit_notice(mut self, enabled: bool) -> Self {
        self.step_limit_notice = enabled;
        self
    }

    /// Attach an event bus; tool events are published through it too.
    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.executor = self.executor.with_event_bus(bus.clone());
        self.event_bus = Some(bus);
        self
    }

    pub fn step_limit(&self) -> u32 {
        self.step_limit
    }

    pub fn tools(&self) -> &ToolRegistry {
        self.executor.registry()
    }

    fn publish(&self, event: DomainEvent) {
        if let Some(bus) = &self.event_bus {
            bus.publish(event);
        }
    }

    /// Run one user turn.
    ///
    /// Appends `user_text` to `prior`, then alternates between responder
    /// steps and tool execution until the router stops. Returns the grown
    /// history and the latest assistant answer. Never fails: tool problems
    /// are already conversation content by the time they reach this loop.
    pub async fn run_turn(&self, prior: History, user_text: &str) -> TurnOutcome {
        let mut history = prior;
        history.push(Message::user(user_text));
        let mut turn = TurnState::new(history);
        let conversation_id = turn.history.id().to_string();

        info!(
            conversation_id = %conversation_id,
            messages = turn.history.len(),
            step_limit = self.step_limit,
            "Starting turn"
        );
        self.publish(DomainEvent::TurnStarted {
            conversation_id: conversation_id.clone(),
            timestamp: Utc::now(),
        });

        let mut state = LoopState::AwaitingResponse;
        loop {
            state = match state {
                LoopState::AwaitingResponse => {
                    let message = self.responder.respond(&turn);
                    let requested_tools = message.tool_calls().len();
                    turn.record_response(message);

                    debug!(
                        conversation_id = %conversation_id,
                        steps = turn.steps,
                        requested_tools,
                        "Responder step"
                    );
                    self.publish(DomainEvent::ResponseGenerated {
                        conversation_id: conversation_id.clone(),
                        steps: turn.steps,
                        requested_tools,
                        timestamp: Utc::now(),
                    });

                    match route(&turn.history, turn.steps, self.step_limit) {
                        Route::ContinueWithTools => LoopState::AwaitingToolResults,
                        Route::Stop => LoopState::Done,
                    }
                }
                LoopState::AwaitingToolResults => {
                    let results = match turn.history.last() {
                        Some(last) => self.executor.run_tools(last).await,
                        None => Vec::new(),
                    };
                    turn.history.extend(results);
                    LoopState::AwaitingResponse
                }
                LoopState::Done => break,
            };
        }

        // Stopping with tool calls still pending can only mean the ceiling hit.
        let pending = turn.history.last().is_some_and(Message::has_tool_calls);
        let stop_reason = if pending {
            StopReason::StepLimit
        } else {
            StopReason::Answered
        };

        if pending {
            warn!(
                conversation_id = %conversation_id,
                steps = turn.steps,
                "Step limit reached with tool calls pending"
            );
            if self.step_limit_notice {
                turn.history.push(Message::assistant(format!(
                    "Stopped after {} steps without a final answer.",
                    turn.steps
                )));
            }
        }

        let answer = turn
            .history
            .last_assistant()
            .map(|m| m.content().to_string())
            .unwrap_or_default();

        info!(
            conversation_id = %conversation_id,
            steps = turn.steps,
            stop_reason = %stop_reason,
            "Turn complete"
        );
        self.publish(DomainEvent::TurnCompleted {
            conversation_id,
            steps: turn.steps,
            stop_reason,
            timestamp: Utc::now(),
        });

        TurnOutcome {
            history: turn.history,
            answer,
            steps: turn.steps,
            stop_reason,
        }
    }
}
