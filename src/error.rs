//! Crate-wide error types.
//!
//! Mirrors the teacher's hand-rolled error idiom (`why_lib::lexer::LexError`,
//! `why_lib::parser::ParseError`): a small struct carrying a message and an
//! optional source position, with `Display` + `std::error::Error` impls.
//! No out-of-band exceptions — failures surface in-band via result
//! sentinels (see `crate::memo`), this type is only used for the handful of
//! truly fatal conditions (bad input source, reader I/O failure).

use std::{error::Error, fmt::Display};

use crate::reader::Span;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LexError {
    pub message: String,
    pub position: Option<Span>,
}

impl LexError {
    pub fn new(message: impl Into<String>, position: Option<Span>) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

impl Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.position {
            Some(pos) => write!(f, "{} at {pos}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl Error for LexError {}

pub type LexResult<T> = Result<T, LexError>;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseError {
    pub message: String,
    pub position: Option<Span>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: Option<Span>) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    pub fn eof(item: &str) -> Self {
        Self {
            message: format!("hit EOF while parsing {item}"),
            position: None,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.position {
            Some(pos) => write!(f, "{} at {pos}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;
