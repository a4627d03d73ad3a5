//! Built-in tool implementations for ruleclaw.
//!
//! Two tools ship with the agent: `calc` for basic arithmetic and
//! `utc_now` for the current UTC time.

pub mod calculator;
pub mod utc_now;

use ruleclaw_core::tool::ToolRegistry;

pub use calculator::{CalcError, CalculatorTool, evaluate};
pub use utc_now::UtcNowTool;

/// Create a tool registry with all built-in tools.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(CalculatorTool));
    registry.register(Box::new(UtcNowTool));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_builtins() {
        let registry = default_registry();
        assert_eq!(registry.names(), ["calc", "utc_now"]);
    }
}
