//! Tool trait — the abstraction over agent capabilities.
//!
//! A tool is a named capability with a typed argument schema. The registry
//! is built once at startup and shared read-only with the agent loop.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::ToolError;
use crate::message::ToolCallRequest;

/// The argument shapes a tool can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArgumentSchema {
    /// The tool takes no arguments.
    None,
    /// Exactly one required string argument under `name`.
    Text { name: &'static str },
}

/// Arguments after validation against an [`ArgumentSchema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolArgs {
    None,
    Text(String),
}

impl ArgumentSchema {
    /// Check a raw argument map against this schema.
    ///
    /// Unknown keys are rejected for every shape.
    pub fn validate(&self, tool_name: &str, raw: &Map<String, Value>) -> Result<ToolArgs, ToolError> {
        match self {
            Self::None => match raw.keys().next() {
                Some(key) => Err(ToolError::invalid(tool_name, format!("unexpected argument '{key}'"))),
                None => Ok(ToolArgs::None),
            },
            Self::Text { name } => {
                if let Some(key) = raw.keys().find(|k| k.as_str() != *name) {
                    return Err(ToolError::invalid(tool_name, format!("unexpected argument '{key}'")));
                }
                match raw.get(*name) {
                    Some(Value::String(s)) => Ok(ToolArgs::Text(s.clone())),
                    Some(_) => Err(ToolError::invalid(tool_name, format!("argument '{name}' must be a string"))),
                    None => Err(ToolError::invalid(
                        tool_name,
                        format!("missing required argument '{name}'"),
                    )),
                }
            }
        }
    }
}

/// Name, description, and schema of a tool, for listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub schema: ArgumentSchema,
}

/// The core Tool trait.
///
/// Built-in tools (`calc`, `utc_now`) implement this and are registered in
/// the [`ToolRegistry`]. A tool returns text on success; any failure is an
/// `Err` that the executor turns into conversation content.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "calc").
    fn name(&self) -> &str;

    /// A one-line description of what this tool does.
    fn description(&self) -> &str;

    /// The argument shape this tool accepts.
    fn schema(&self) -> ArgumentSchema;

    /// Run the tool with already-validated arguments.
    async fn invoke(&self, args: ToolArgs) -> Result<String, ToolError>;

    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            schema: self.schema(),
        }
    }
}

/// A registry of available tools, keyed by name.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// All tool definitions, sorted by name.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<_> = self.tools.values().map(|t| t.to_definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Resolve, validate, and run a tool call.
    pub async fn execute(&self, call: &ToolCallRequest) -> Result<String, ToolError> {
        let tool = self
            .get(&call.tool_name)
            .ok_or_else(|| ToolError::NotFound(call.tool_name.clone()))?;
        let args = tool.schema().validate(tool.name(), &call.arguments)?;
        tool.invoke(args).await
    }

    /// List all registered tool names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry").field("tools", &self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// A simple test tool for unit tests.
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str { "echo" }
        fn description(&self) -> &str { "Echoes back the input" }
        fn schema(&self) -> ArgumentSchema {
            ArgumentSchema::Text { name: "text" }
        }
        async fn invoke(&self, args: ToolArgs) -> Result<String, ToolError> {
            match args {
                ToolArgs::Text(text) => Ok(text),
                ToolArgs::None => Err(ToolError::failed("echo", "nothing to echo")),
            }
        }
    }

    fn raw(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn registry_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        assert!(registry.get("echo").is_some());
        assert!(registry.get("nonexistent").is_none());
        assert_eq!(registry.names(), ["echo"]);
    }

    #[test]
    fn registry_definitions() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        let defs = registry.definitions();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "echo");
        assert_eq!(defs[0].schema, ArgumentSchema::Text { name: "text" });
    }

    #[tokio::test]
    async fn registry_execute_tool() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let call = ToolCallRequest::new("call_1", "echo").with_argument("text", "hello world");
        let result = registry.execute(&call).await.unwrap();
        assert_eq!(result, "hello world");
    }

    #[tokio::test]
    async fn registry_execute_missing_tool() {
        let registry = ToolRegistry::new();
        let call = ToolCallRequest::new("call_1", "nonexistent");
        let err = registry.execute(&call).await.unwrap_err();
        assert_eq!(err, ToolError::NotFound("nonexistent".into()));
    }

    #[tokio::test]
    async fn registry_rejects_schema_mismatch() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        let call = ToolCallRequest::new("1", "echo").with_argument("text", 42);
        let err = registry.execute(&call).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }

    #[test]
    fn none_schema_accepts_empty_map_only() {
        assert_eq!(ArgumentSchema::None.validate("t", &Map::new()), Ok(ToolArgs::None));
        let err = ArgumentSchema::None.validate("t", &raw(json!({"x": 1}))).unwrap_err();
        assert_eq!(err.to_string(), "invalid arguments for t: unexpected argument 'x'");
    }

    #[test]
    fn text_schema_requires_its_field() {
        let schema = ArgumentSchema::Text { name: "expression" };
        assert_eq!(
            schema.validate("calc", &raw(json!({"expression": "1+1"}))),
            Ok(ToolArgs::Text("1+1".into()))
        );

        let missing = schema.validate("calc", &Map::new()).unwrap_err();
        assert!(missing.to_string().contains("missing required argument 'expression'"));

        let extra = schema
            .validate("calc", &raw(json!({"expression": "1", "mode": "fast"})))
            .unwrap_err();
        assert!(extra.to_string().contains("unexpected argument 'mode'"));
    }
}
