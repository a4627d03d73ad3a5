//! `ruleclaw tools` — list the built-in tools.

use ruleclaw_core::tool::{ArgumentSchema, ToolDefinition};

pub fn run() {
    let registry = ruleclaw_tools::default_registry();
    println!("Available tools ({}):", registry.len());
    for def in registry.definitions() {
        println!("  {}", describe(&def));
    }
}

fn describe(def: &ToolDefinition) -> String {
    let signature = match def.schema {
        ArgumentSchema::None => format!("{}()", def.name),
        ArgumentSchema::Text { name } => format!("{}({name}: string)", def.name),
    };
    format!("{signature:<28} {}", def.description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_signatures() {
        let defs = ruleclaw_tools::default_registry().definitions();
        let lines: Vec<_> = defs.iter().map(describe).collect();
        assert!(lines[0].starts_with("calc(expression: string)"));
        assert!(lines[1].starts_with("utc_now()"));
    }
}
