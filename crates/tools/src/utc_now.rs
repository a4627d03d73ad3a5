//! UTC clock tool.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use ruleclaw_core::error::ToolError;
use ruleclaw_core::tool::{ArgumentSchema, Tool, ToolArgs};

/// Returns the current UTC time as an ISO-8601 timestamp.
pub struct UtcNowTool;

#[async_trait]
impl Tool for UtcNowTool {
    fn name(&self) -> &str {
        "utc_now"
    }

    fn description(&self) -> &str {
        "Return the current UTC time in ISO format."
    }

    fn schema(&self) -> ArgumentSchema {
        ArgumentSchema::None
    }

    async fn invoke(&self, _args: ToolArgs) -> Result<String, ToolError> {
        Ok(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn returns_parseable_utc_timestamp() {
        let before = Utc::now();
        let out = UtcNowTool.invoke(ToolArgs::None).await.unwrap();
        let parsed = DateTime::parse_from_rfc3339(&out).unwrap();

        assert!(out.ends_with("+00:00"), "expected explicit UTC offset: {out}");
        assert_eq!(parsed.offset().local_minus_utc(), 0);
        assert!(parsed.with_timezone(&Utc) >= before - chrono::Duration::seconds(1));
    }

    #[test]
    fn takes_no_arguments() {
        assert_eq!(UtcNowTool.schema(), ArgumentSchema::None);
    }
}
