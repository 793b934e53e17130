//! §3 "Parse-tree nodes" — the parser-rule half of the grammar AST.
//!
//! Grounded on `examples/original_source/pkg/ast/parser.go`, generalized
//! from Go's `interface{ ParserNode() }` marker-interface pattern into a
//! tagged sum (§9 "Polymorphic AST nodes").

use serde::{Deserialize, Serialize};

use crate::{
    ast::lexer::LexerRule,
    grammar::lexer::{PLUS, QUEST_MARK, STAR},
    token::Token,
};

/// Root of a parsed grammar (§3 `TopLevel`). `lexer_rules` is always empty
/// after a parse produced by this crate's grammar front-end — no lexer
/// rule body production is specified by §4.G's grammar — the field exists
/// so the data model has a place for them, exactly mirroring the
/// asymmetry already present in `original_source` (see `SPEC_FULL.md` §5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopLevel {
    pub parser_rules: Vec<ParserRule>,
    pub lexer_rules: Vec<LexerRule>,
}

impl TopLevel {
    pub fn new(parser_rules: Vec<ParserRule>) -> Self {
        Self {
            parser_rules,
            lexer_rules: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserRule {
    pub name: String,
    pub body: Alternatives,
}

/// Outer order is alternation order (ordered choice); inner order is
/// concatenation (§3 `Alternatives`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternatives {
    pub alts: Vec<Vec<ParserNode>>,
}

impl Alternatives {
    pub fn new(alts: Vec<Vec<ParserNode>>) -> Self {
        Self { alts }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParserNode {
    Alternatives(Alternatives),
    ZeroOrMore(Box<ParserNode>),
    OneOrMore(Box<ParserNode>),
    ZeroOrOne(Box<ParserNode>),
    RuleRef(String),
    LexerRuleRef(String),
    TokenLiteral(Token),
}

impl ParserNode {
    /// §4.F `NewNestedNode`: wraps `inner` in `OneOrMore`/`ZeroOrMore`/
    /// `ZeroOrOne` per `suffix`'s token type, or returns `inner` unchanged
    /// if no suffix was present. Any other suffix token type is a
    /// programming error (§7) — the grammar parser never calls this with
    /// one, since `suffix` only ever matches `+`/`*`/`?`.
    pub fn new_nested(inner: ParserNode, suffix: Option<Token>) -> ParserNode {
        let Some(suffix) = suffix else {
            return inner;
        };
        match suffix.ty {
            t if t == PLUS => ParserNode::OneOrMore(Box::new(inner)),
            t if t == STAR => ParserNode::ZeroOrMore(Box::new(inner)),
            t if t == QUEST_MARK => ParserNode::ZeroOrOne(Box::new(inner)),
            other => panic!("new_nested: unexpected suffix token type {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_nested_passes_through_with_no_suffix() {
        let inner = ParserNode::RuleRef("x".into());
        assert_eq!(ParserNode::new_nested(inner.clone(), None), inner);
    }

    #[test]
    fn new_nested_wraps_per_suffix_type() {
        let inner = ParserNode::RuleRef("x".into());
        let mut suffix = Token::default();
        suffix.ty = PLUS;
        assert_eq!(
            ParserNode::new_nested(inner.clone(), Some(suffix)),
            ParserNode::OneOrMore(Box::new(ParserNode::RuleRef("x".into())))
        );
    }

    #[test]
    #[should_panic]
    fn new_nested_panics_on_bad_suffix() {
        let inner = ParserNode::RuleRef("x".into());
        let mut suffix = Token::default();
        suffix.ty = crate::grammar::lexer::COLON;
        ParserNode::new_nested(inner, Some(suffix));
    }
}
