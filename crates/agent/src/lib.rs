//! The agent loop — the heart of ruleclaw.
//!
//! Each user turn follows a **Respond → Route → Act** cycle:
//!
//! 1. **Receive** a user message and append it to the history
//! 2. **Respond**: the responder adds one assistant message
//! 3. **Route**: if that message asks for tools and budget remains, continue
//! 4. **Act**: run the requested tools, append their results, go to step 2
//! 5. **Stop**: return the history and the latest assistant answer
//!
//! The loop never runs more responder steps than the configured step limit.

pub mod executor;
pub mod loop_runner;
pub mod responder;
pub mod router;

pub use executor::ToolExecutor;
pub use loop_runner::AgentLoop;
pub use responder::{Responder, RuleBasedResponder};
pub use router::route;
