//! §3 "Token" / "Token-type" — a small integer tag plus an optional
//! captured data slice and a source span.

use serde::{Deserialize, Serialize};

use crate::reader::Span;

/// A small integer tag (§3). `ILLEGAL` (0) and `EOF` (1) are reserved
/// across every tokenizer in this crate; user/grammar token-types start
/// at 2 and are assigned by each tokenizer module.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TokenType(pub u32);

impl TokenType {
    pub const ILLEGAL: TokenType = TokenType(0);
    pub const EOF: TokenType = TokenType(1);

    /// First token-type value available to a tokenizer's own vocabulary.
    pub const FIRST_USER: u32 = 2;
}

/// A lexed token: type tag, an optional captured data slice, and the
/// `(startRow,startCol)-(endRow,endCol)` span it occupies (§3). `data` is
/// present only for token-types declared data-bearing by their tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Token {
    pub ty: TokenType,
    pub data: Option<String>,
    pub span: Span,
}

impl Token {
    pub fn is(&self, ty: TokenType) -> bool {
        self.ty == ty
    }

    /// Data with the default empty string substituted for punctuation
    /// tokens, which never carry a `data` slice.
    pub fn data_or_empty(&self) -> &str {
        self.data.as_deref().unwrap_or("")
    }
}
