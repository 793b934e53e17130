//! Lexer-rule AST shapes (§5 of `SPEC_FULL.md`): modeled for data-model
//! completeness even though no lexer-rule-body production is specified by
//! spec §4.G's grammar. `TopLevel::lexer_rules` is always empty after a
//! parse produced by this crate.
//!
//! Grounded on `examples/original_source/pkg/ast/lexer.go`.

use serde::{Deserialize, Serialize};

use crate::token::Token;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexerRule {
    pub fragment: bool,
    pub name: String,
    pub body: LexerAlternatives,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexerAlternatives {
    pub alts: Vec<Vec<LexerNode>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LexerNode {
    Alternatives(LexerAlternatives),
    Not(Box<LexerNode>),
    ZeroOrMore(Box<LexerNode>),
    OneOrMore(Box<LexerNode>),
    ZeroOrOne(Box<LexerNode>),
    RuleRef(String),
    Token(Token),
    AnyChar,
    CharClass(String),
}
