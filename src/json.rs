//! `serde_json` adapters for [`TokenReader`] and [`TokenWriter`].

use serde_json::Value;

use crate::token::{Position, Token, TokenReader, TokenWriter};

/// Collects written tokens as JSON values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonTokenWriter {
    values: Vec<Value>,
}

impl JsonTokenWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// The most recently written token
    pub fn last(&self) -> Option<&Value> {
        self.values.last()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl TokenWriter for JsonTokenWriter {
    fn write_null(&mut self) {
        self.values.push(Value::Null);
    }

    fn write_string(&mut self, text: &str) {
        self.values.push(Value::String(text.to_owned()));
    }
}

/// A reader positioned on a single token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenBuffer {
    token: Token,
    position: Position,
}

impl TokenBuffer {
    pub fn new(token: Token) -> Self {
        Self {
            token,
            position: Position::default(),
        }
    }

    /// Wraps a JSON value. Containers surface only as their start token.
    pub fn from_json(value: &Value) -> Self {
        Self::new(Token::from(value))
    }

    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

impl TokenReader for TokenBuffer {
    fn token(&self) -> &Token {
        &self.token
    }

    fn position(&self) -> Position {
        self.position.clone()
    }
}

impl From<&Value> for Token {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Boolean(*b),
            Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)), Self::Integer),
            Value::String(s) => Self::String(s.clone()),
            Value::Array(_) => Self::StartArray,
            Value::Object(_) => Self::StartObject,
        }
    }
}
