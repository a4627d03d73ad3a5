//! `ruleclaw ask` — answer a single message and exit.

use ruleclaw_config::AppConfig;
use ruleclaw_core::message::History;

pub async fn run(config: &AppConfig, message: &str, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let agent = super::build_agent(config, verbose);
    let outcome = agent.run_turn(History::new(), message).await;

    tracing::debug!(steps = outcome.steps, stop_reason = %outcome.stop_reason, "Answered");
    println!("{}", outcome.answer);
    Ok(())
}
