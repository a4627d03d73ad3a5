//! Calculator tool — evaluates arithmetic expressions.
//!
//! Supports `+`, `-`, `*`, `/`, parentheses, decimal numbers, and unary
//! signs. Anything else is rejected before parsing. Evaluation is a
//! recursive-descent parser over `f64`; nothing is ever executed.

use async_trait::async_trait;
use ruleclaw_core::error::ToolError;
use ruleclaw_core::tool::{ArgumentSchema, Tool, ToolArgs};
use thiserror::Error;
use tracing::debug;

pub struct CalculatorTool;

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calc"
    }

    fn description(&self) -> &str {
        "Evaluate a basic arithmetic expression: digits, + - * / ( ) . and spaces."
    }

    fn schema(&self) -> ArgumentSchema {
        ArgumentSchema::Text { name: "expression" }
    }

    async fn invoke(&self, args: ToolArgs) -> Result<String, ToolError> {
        let ToolArgs::Text(expr) = args else {
            return Err(ToolError::invalid(self.name(), "missing required argument 'expression'"));
        };

        let value = evaluate(&expr).map_err(|e| ToolError::failed(self.name(), e))?;
        debug!(expression = %expr, value, "Evaluated expression");
        Ok(format_number(value))
    }
}

/// Print integral values without a fractional part.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Everything that can go wrong evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("empty expression")]
    Empty,

    #[error("disallowed character '{0}'")]
    DisallowedCharacter(char),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unexpected token {0}")]
    UnexpectedToken(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("expected closing parenthesis")]
    UnclosedParen,

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFinite,

    #[error("expression nested deeper than {} levels", MAX_DEPTH)]
    TooDeep,
}

// ── Recursive-descent expression evaluator ────────────────────────────────

/// Evaluate an arithmetic expression string.
pub fn evaluate(expr: &str) -> Result<f64, CalcError> {
    if let Some(c) = expr.chars().find(|c| !is_allowed(*c)) {
        return Err(CalcError::DisallowedCharacter(c));
    }

    let tokens = tokenize(expr)?;
    if tokens.is_empty() {
        return Err(CalcError::Empty);
    }

    let mut parser = Parser::new(&tokens);
    let result = parser.parse_expr()?;
    if let Some(tok) = parser.peek() {
        return Err(CalcError::UnexpectedToken(tok.to_string()));
    }
    if !result.is_finite() {
        return Err(CalcError::NonFinite);
    }
    Ok(result)
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || "+-*/().".contains(c)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "'{n}'"),
            Self::Plus => write!(f, "'+'"),
            Self::Minus => write!(f, "'-'"),
            Self::Star => write!(f, "'*'"),
            Self::Slash => write!(f, "'/'"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            c if c.is_whitespace() => i += 1,
            '+' => { tokens.push(Token::Plus); i += 1; }
            '-' => { tokens.push(Token::Minus); i += 1; }
            '*' => { tokens.push(Token::Star); i += 1; }
            '/' => { tokens.push(Token::Slash); i += 1; }
            '(' => { tokens.push(Token::LParen); i += 1; }
            ')' => { tokens.push(Token::RParen); i += 1; }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let num_str: String = chars[start..i].iter().collect();
                let num: f64 = num_str
                    .parse()
                    .map_err(|_| CalcError::InvalidNumber(num_str.clone()))?;
                tokens.push(Token::Number(num));
            }
            c => return Err(CalcError::DisallowedCharacter(c)),
        }
    }

    Ok(tokens)
}

/// Maximum nesting of parentheses and unary signs.
const MAX_DEPTH: usize = 256;

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Run `f` one nesting level deeper, failing past `MAX_DEPTH`.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, CalcError>,
    ) -> Result<T, CalcError> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::TooDeep);
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    // expr = term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Result<f64, CalcError> {
        let mut left = self.parse_term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.consume();
                    left += self.parse_term()?;
                }
                Token::Minus => {
                    self.consume();
                    left -= self.parse_term()?;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    // term = unary (('*' | '/') unary)*
    fn parse_term(&mut self) -> Result<f64, CalcError> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.consume();
                    left *= self.parse_unary()?;
                }
                Token::Slash => {
                    self.consume();
                    let right = self.parse_unary()?;
                    if right == 0.0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    left /= right;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    // unary = ('+' | '-') unary | primary
    fn parse_unary(&mut self) -> Result<f64, CalcError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.consume();
                Ok(-self.nested(Self::parse_unary)?)
            }
            Some(Token::Plus) => {
                self.consume();
                self.nested(Self::parse_unary)
            }
            _ => self.parse_primary(),
        }
    }

    // primary = NUMBER | '(' expr ')'
    fn parse_primary(&mut self) -> Result<f64, CalcError> {
        match self.consume() {
            Some(Token::Number(n)) => Ok(*n),
            Some(Token::LParen) => {
                let val = self.nested(Self::parse_expr)?;
                match self.consume() {
                    Some(Token::RParen) => Ok(val),
                    _ => Err(CalcError::UnclosedParen),
                }
            }
            Some(tok) => Err(CalcError::UnexpectedToken(tok.to_string())),
            None => Err(CalcError::UnexpectedEnd),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_addition() {
        assert_eq!(evaluate("2+2").unwrap(), 4.0);
    }

    #[test]
    fn operator_precedence() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
    }

    #[test]
    fn parentheses() {
        assert_eq!(evaluate("12*(7+3)/2").unwrap(), 60.0);
    }

    #[test]
    fn division() {
        assert_eq!(evaluate("10 / 4").unwrap(), 2.5);
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(evaluate("10 / 0"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn unary_signs() {
        assert_eq!(evaluate("-5 + 3").unwrap(), -2.0);
        assert_eq!(evaluate("+5 - -3").unwrap(), 8.0);
    }

    #[test]
    fn decimals() {
        assert_eq!(evaluate("3.14 * 2").unwrap(), 6.28);
    }

    #[test]
    fn disallowed_characters_rejected_before_parsing() {
        assert_eq!(evaluate("2 ** x"), Err(CalcError::DisallowedCharacter('x')));
        assert_eq!(evaluate("2^3"), Err(CalcError::DisallowedCharacter('^')));
    }

    #[test]
    fn malformed_expressions() {
        assert_eq!(evaluate("2 +"), Err(CalcError::UnexpectedEnd));
        assert_eq!(evaluate("(1 + 2"), Err(CalcError::UnclosedParen));
        assert_eq!(evaluate("1 2"), Err(CalcError::UnexpectedToken("'2'".into())));
        assert_eq!(evaluate("1..2"), Err(CalcError::InvalidNumber("1..2".into())));
        assert_eq!(evaluate("2 ** 3"), Err(CalcError::UnexpectedToken("'*'".into())));
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let nested = format!("{}1+1{}", "(".repeat(50_000), ")".repeat(50_000));
        assert_eq!(evaluate(&nested), Err(CalcError::TooDeep));
        assert_eq!(evaluate(&"-".repeat(50_000)), Err(CalcError::TooDeep));

        let shallow = format!("{}1+1{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(evaluate(&shallow).unwrap(), 2.0);
    }

    #[test]
    fn empty_expression() {
        assert_eq!(evaluate(""), Err(CalcError::Empty));
        assert_eq!(evaluate("   "), Err(CalcError::Empty));
    }

    #[test]
    fn format_number_drops_integral_fraction() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-7.0), "-7");
    }

    #[tokio::test]
    async fn tool_invoke() {
        let result = CalculatorTool
            .invoke(ToolArgs::Text("2+2".into()))
            .await
            .unwrap();
        assert_eq!(result, "4");
    }

    #[tokio::test]
    async fn tool_formats_decimals() {
        let result = CalculatorTool
            .invoke(ToolArgs::Text("10 / 3".into()))
            .await
            .unwrap();
        assert!(result.starts_with("3.333"));
    }

    #[tokio::test]
    async fn tool_reports_evaluation_errors() {
        let err = CalculatorTool
            .invoke(ToolArgs::Text("10 / 0".into()))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "calc failed: division by zero");
    }

    #[tokio::test]
    async fn tool_without_expression() {
        let result = CalculatorTool.invoke(ToolArgs::None).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments { .. })));
    }

    #[test]
    fn tool_definition() {
        let def = CalculatorTool.to_definition();
        assert_eq!(def.name, "calc");
        assert_eq!(def.schema, ArgumentSchema::Text { name: "expression" });
    }
}
