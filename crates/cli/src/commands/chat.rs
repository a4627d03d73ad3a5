//! `ruleclaw chat` — interactive terminal session.
//!
//! Reads one line per turn, runs it through the agent loop on top of the
//! session history, and prints the latest assistant answer. History lives
//! only as long as the session.

use std::io::Write;

use ruleclaw_agent::AgentLoop;
use ruleclaw_config::{AppConfig, CliSettings};
use ruleclaw_core::message::History;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

pub const BANNER: &str = "Simple CLI Agent (rule-based router) — type 'exit' to quit";

pub async fn run(config: &AppConfig, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let agent = super::build_agent(config, verbose);
    let session = Session::new(&agent, &config.cli);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let history = session.run(stdin, &mut stdout).await?;

    tracing::debug!(messages = history.len(), "Session ended");
    Ok(())
}

/// An empty line or an exit command ends the session.
fn is_exit(line: &str) -> bool {
    line.is_empty()
        || ["exit", "quit", "/exit", "/quit", ":q"]
            .iter()
            .any(|cmd| line.eq_ignore_ascii_case(cmd))
}

/// One interactive conversation over arbitrary input and output streams.
pub struct Session<'a> {
    agent: &'a AgentLoop,
    settings: &'a CliSettings,
}

impl<'a> Session<'a> {
    pub fn new(agent: &'a AgentLoop, settings: &'a CliSettings) -> Self {
        Self { agent, settings }
    }

    /// Run turns until an exit command or end of input. Returns the history.
    pub async fn run<R, W>(&self, mut input: R, out: &mut W) -> std::io::Result<History>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        if self.settings.show_banner {
            writeln!(out, "{BANNER}\n")?;
        }

        let mut history = History::new();
        let mut line = String::new();

        loop {
            write!(out, "{}", self.settings.prompt)?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line).await? == 0 {
                // EOF (Ctrl+D)
                writeln!(out)?;
                break;
            }

            let text = line.trim();
            if is_exit(text) {
                break;
            }

            let outcome = self.agent.run_turn(history, text).await;
            history = outcome.history;
            writeln!(out, "Assistant: {}\n", outcome.answer)?;
        }

        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn agent() -> AgentLoop {
        AgentLoop::new(Arc::new(ruleclaw_tools::default_registry()))
    }

    async fn transcript(input: &str, settings: &CliSettings) -> (String, History) {
        let agent = agent();
        let mut out = Vec::new();
        let history = Session::new(&agent, settings)
            .run(input.as_bytes(), &mut out)
            .await
            .unwrap();
        (String::from_utf8(out).unwrap(), history)
    }

    #[test]
    fn exit_commands() {
        assert!(is_exit(""));
        assert!(is_exit("exit"));
        assert!(is_exit("EXIT"));
        assert!(is_exit("/quit"));
        assert!(!is_exit("exit now"));
        assert!(!is_exit("2+2"));
    }

    #[tokio::test]
    async fn answers_each_line_until_exit() {
        let (out, history) = transcript("what's 2+2\nhello\nexit\n2*3\n", &CliSettings::default()).await;

        assert!(out.starts_with(BANNER));
        assert!(out.contains("You: Assistant: Result: 4\n"));
        assert!(out.contains("Assistant: Try a math expression"));
        assert!(!out.contains("Result: 6"));
        // 4 messages for the calc turn, 2 for the help turn
        assert_eq!(history.len(), 6);
    }

    #[tokio::test]
    async fn empty_line_ends_session() {
        let (out, history) = transcript("\n1+1\n", &CliSettings::default()).await;
        assert!(history.is_empty());
        assert!(!out.contains("Assistant:"));
    }

    #[tokio::test]
    async fn eof_ends_session_and_respects_settings() {
        let settings = CliSettings {
            prompt: "> ".into(),
            show_banner: false,
        };
        let (out, history) = transcript("10 / 0", &settings).await;

        assert!(!out.contains(BANNER));
        assert!(out.starts_with("> Assistant: Result: Tool error: calc failed: division by zero"));
        assert_eq!(history.len(), 4);
    }
}
