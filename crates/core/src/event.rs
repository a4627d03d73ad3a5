//! Domain event system — lets observers follow a turn without touching the loop.
//!
//! The agent publishes events as a turn progresses. Subscribers (the CLI in
//! verbose mode, tests) receive them over a broadcast channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::agent::StopReason;

/// All domain events in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainEvent {
    /// A user message opened a new turn
    TurnStarted {
        conversation_id: String,
        timestamp: DateTime<Utc>,
    },

    /// The responder produced a message
    ResponseGenerated {
        conversation_id: String,
        steps: u32,
        requested_tools: usize,
        timestamp: DateTime<Utc>,
    },

    /// A tool call was resolved (successfully or not)
    ToolExecuted {
        tool_name: String,
        call_id: String,
        success: bool,
        duration_ms: u64,
        timestamp: DateTime<Utc>,
    },

    /// The turn reached its terminal state
    TurnCompleted {
        conversation_id: String,
        steps: u32,
        stop_reason: StopReason,
        timestamp: DateTime<Utc>,
    },
}

/// A broadcast-based event bus for domain events.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub.
pub struct EventBus {
    sender: broadcast::Sender<Arc<DomainEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: DomainEvent) {
        // No subscribers is fine
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to receive events.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<DomainEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn event_bus_publish_subscribe() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(DomainEvent::ToolExecuted {
            tool_name: "calc".into(),
            call_id: "1".into(),
            success: true,
            duration_ms: 0,
            timestamp: Utc::now(),
        });

        let event = rx.recv().await.unwrap();
        match event.as_ref() {
            DomainEvent::ToolExecuted { tool_name, success, .. } => {
                assert_eq!(tool_name, "calc");
                assert!(success);
            }
            _ => panic!("Expected ToolExecuted event"),
        }
    }

    #[test]
    fn event_bus_no_subscribers_doesnt_panic() {
        let bus = EventBus::new(16);
        bus.publish(DomainEvent::TurnCompleted {
            conversation_id: "test".into(),
            steps: 1,
            stop_reason: StopReason::Answered,
            timestamp: Utc::now(),
        });
    }
}
