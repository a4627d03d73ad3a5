//! # ruleclaw Core
//!
//! Domain types, traits, and error definitions for the ruleclaw agent loop.
//! This crate has **no runtime dependencies** beyond serde and a broadcast
//! channel. It defines the model that the tools, agent, and CLI crates
//! implement against.
//!
//! ## Invariants
//!
//! - Messages are an explicit tagged enum: `User`, `Assistant`, `ToolResult`.
//! - History is append-only; nothing outside this crate can reorder or
//!   truncate a transcript.
//! - Tool arguments are checked against the tool's schema before it runs.

pub mod agent;
pub mod error;
pub mod event;
pub mod message;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use agent::{LoopState, Route, StopReason, TurnOutcome, TurnState};
pub use error::ToolError;
pub use event::{DomainEvent, EventBus};
pub use message::{ConversationId, History, Message, ToolCallRequest};
pub use tool::{ArgumentSchema, Tool, ToolArgs, ToolDefinition, ToolRegistry};
