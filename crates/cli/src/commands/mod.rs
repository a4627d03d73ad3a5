pub mod ask;
pub mod chat;
pub mod config_cmd;
pub mod tools;

use std::sync::Arc;

use ruleclaw_agent::AgentLoop;
use ruleclaw_config::AppConfig;
use ruleclaw_core::event::EventBus;
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

/// Build the agent from config. In verbose mode every domain event is logged.
pub fn build_agent(config: &AppConfig, verbose: bool) -> AgentLoop {
    let agent = AgentLoop::from_settings(&config.agent, Arc::new(ruleclaw_tools::default_registry()));
    if !verbose {
        return agent;
    }

    let bus = Arc::new(EventBus::default());
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => debug!(event = ?event, "Domain event"),
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "Event log lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });
    agent.with_event_bus(bus)
}
