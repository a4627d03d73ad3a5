//! Tool executor — turns tool-call requests into tool-result messages.
//!
//! Every request yields exactly one result, in request order. Unknown
//! tools, argument mismatches, and tool failures all become ordinary
//! result content; nothing here returns an error.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::future::join_all;
use ruleclaw_core::error::ToolError;
use ruleclaw_core::event::{DomainEvent, EventBus};
use ruleclaw_core::message::{Message, ToolCallRequest};
use ruleclaw_core::tool::ToolRegistry;
use tracing::{debug, warn};

pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
    event_bus: Option<Arc<EventBus>>,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            event_bus: None,
        }
    }

    /// Publish a `ToolExecuted` event for every call.
    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(bus);
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run every tool call carried by `message`.
    ///
    /// Sibling calls run concurrently; results keep request order. A message
    /// without tool calls yields no results.
    pub async fn run_tools(&self, message: &Message) -> Vec<Message> {
        let calls = message.tool_calls();
        if calls.is_empty() {
            return Vec::new();
        }

        debug!(tool_count = calls.len(), "Executing tool calls");
        join_all(calls.iter().map(|call| self.run_one(call))).await
    }

    async fn run_one(&self, call: &ToolCallRequest) -> Message {
        let call_id = call.reply_id().to_string();
        let start = Instant::now();
        let result = self.registry.execute(call).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let (success, content) = match result {
            Ok(output) => (true, output),
            Err(ToolError::NotFound(name)) => {
                warn!(tool = %name, call_id = %call_id, "Unknown tool requested");
                (false, format!("Error: unknown tool '{name}'"))
            }
            Err(e) => {
                warn!(tool = %call.tool_name, call_id = %call_id, error = %e, "Tool execution failed");
                (false, format!("Tool error: {e}"))
            }
        };

        if let Some(bus) = &self.event_bus {
            bus.publish(DomainEvent::ToolExecuted {
                tool_name: call.tool_name.clone(),
                call_id: call_id.clone(),
                success,
                duration_ms,
                timestamp: Utc::now(),
            });
        }

        Message::tool_result(call_id, content)
    }
}
