//! Message and History domain types.
//!
//! These are the value objects that flow through a turn:
//! the user speaks → the responder answers or asks for a tool →
//! the executor replies with tool results → the responder summarizes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a conversation (one CLI session).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A request, carried by an assistant message, to run one tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Correlates the eventual tool result with this request
    pub id: String,

    /// Name of the tool to invoke
    pub tool_name: String,

    /// Raw arguments; validated against the tool's schema before invocation
    #[serde(default)]
    pub arguments: serde_json::Map<String, serde_json::Value>,
}

impl ToolCallRequest {
    pub fn new(id: impl Into<String>, tool_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tool_name: tool_name.into(),
            arguments: serde_json::Map::new(),
        }
    }

    /// Add a single argument.
    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// The id a result for this request is filed under. Falls back to the
    /// tool name when the request carries no id.
    pub fn reply_id(&self) -> &str {
        if self.id.is_empty() {
            &self.tool_name
        } else {
            &self.id
        }
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Message {
    /// Text typed by the end user
    User { content: String },

    /// Produced by the responder, optionally asking for tool calls
    Assistant {
        content: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCallRequest>,
    },

    /// Output of one tool call
    ToolResult { call_id: String, content: String },
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    /// Create a plain assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    /// Create an assistant message that requests tool calls.
    pub fn assistant_with_tools(content: impl Into<String>, tool_calls: Vec<ToolCallRequest>) -> Self {
        Self::Assistant {
            content: content.into(),
            tool_calls,
        }
    }

    /// Create a tool result message.
    pub fn tool_result(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::ToolResult {
            call_id: call_id.into(),
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::User { content } | Self::Assistant { content, .. } | Self::ToolResult { content, .. } => {
                content
            }
        }
    }

    /// Tool calls requested by this message (empty unless assistant).
    pub fn tool_calls(&self) -> &[ToolCallRequest] {
        match self {
            Self::Assistant { tool_calls, .. } => tool_calls,
            Self::User { .. } | Self::ToolResult { .. } => &[],
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls().is_empty()
    }

    pub fn is_assistant(&self) -> bool {
        matches!(self, Self::Assistant { .. })
    }
}

/// An ordered, append-only conversation transcript.
///
/// Messages can only be added at the end. The history is handed to the agent
/// loop for one turn and returned as the baseline for the next.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    /// Conversation this transcript belongs to
    id: ConversationId,

    /// Ordered messages
    messages: Vec<Message>,
}

impl History {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    /// Append a message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Append several messages, keeping their order.
    pub fn extend(&mut self, messages: impl IntoIterator<Item = Message>) {
        self.messages.extend(messages);
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The most recent assistant message, if any.
    pub fn last_assistant(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.is_assistant())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl From<Vec<Message>> for History {
    fn from(messages: Vec<Message>) -> Self {
        Self {
            id: ConversationId::new(),
            messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("Hello, agent!");
        assert!(matches!(msg, Message::User { .. }));
        assert_eq!(msg.content(), "Hello, agent!");
        assert!(msg.tool_calls().is_empty());
    }

    #[test]
    fn assistant_with_tools_reports_calls() {
        let msg = Message::assistant_with_tools(
            "Calling calc(1+1)",
            vec![ToolCallRequest::new("1", "calc").with_argument("expression", "1+1")],
        );
        assert!(msg.is_assistant());
        assert!(msg.has_tool_calls());
        assert_eq!(msg.tool_calls()[0].arguments["expression"], "1+1");
    }

    #[test]
    fn reply_id_falls_back_to_tool_name() {
        let call = ToolCallRequest::new("", "utc_now");
        assert_eq!(call.reply_id(), "utc_now");
        let call = ToolCallRequest::new("7", "utc_now");
        assert_eq!(call.reply_id(), "7");
    }

    #[test]
    fn history_appends_in_order() {
        let mut history = History::new();
        history.push(Message::user("first"));
        history.extend(vec![Message::assistant("second"), Message::tool_result("1", "third")]);

        let contents: Vec<_> = history.iter().map(Message::content).collect();
        assert_eq!(contents, ["first", "second", "third"]);
        assert_eq!(history.last().map(Message::content), Some("third"));
    }

    #[test]
    fn last_assistant_skips_tool_results() {
        let mut history = History::new();
        history.push(Message::user("q"));
        history.push(Message::assistant("a"));
        history.push(Message::tool_result("1", "r"));
        assert_eq!(history.last_assistant().map(Message::content), Some("a"));
    }

    #[test]
    fn message_serializes_with_role_tag() {
        let msg = Message::tool_result("1", "4");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "tool_result");
        assert_eq!(json["call_id"], "1");

        let plain = serde_json::to_value(Message::assistant("hi")).unwrap();
        assert!(plain.get("tool_calls").is_none());
    }
}
