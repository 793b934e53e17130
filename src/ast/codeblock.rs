//! §3 "Code-blocks sidecar" — the tree produced by `codeblock::parser`.
//!
//! Grounded on `examples/original_source/pkg/ast/pgparser.go`, reshaped
//! per spec.md's data model (`Body{ parser, codeBlocks: CodeBlocks }`,
//! `CodeBlocks{ language, blocks }`) rather than the flatter
//! `Body{ Parser, CodeBlocks []*CodeBlock }` the retrieved Go draft shows
//! — see `SPEC_FULL.md` §4 for why this crate follows spec.md here.

use serde::{Deserialize, Serialize};

use crate::token::Token;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub parser: String,
    pub code_blocks: CodeBlocks,
}

impl Body {
    /// §4.F `NewBody`: strips the surrounding single-quote characters from
    /// the `STRING` literal's data (safe by construction — the tokenizer
    /// only ever produces `STRING` tokens bounded by ASCII quotes).
    pub fn new(parser_literal: &str, code_blocks: CodeBlocks) -> Self {
        let parser = parser_literal
            .strip_prefix('\'')
            .and_then(|s| s.strip_suffix('\''))
            .unwrap_or(parser_literal)
            .to_string();
        Self {
            parser,
            code_blocks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeBlocks {
    pub language: String,
    pub blocks: Vec<CodeBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub rule: String,
    pub ty: Option<String>,
    pub code: String,
}

impl CodeBlock {
    /// §4.F `NewCodeBlock`: trims the fixed `->` prefix from the type
    /// token's data and the `{{`/`}}` delimiters from the code token's
    /// data; the rule name (which may carry a dotted sub-alternative
    /// suffix, e.g. `rule_body.sub1`) passes through verbatim.
    pub fn new(rule: impl Into<String>, ty_token: Option<&Token>, code_token: &Token) -> Self {
        let ty = ty_token.map(|t| {
            t.data_or_empty()
                .strip_prefix("->")
                .unwrap_or(t.data_or_empty())
                .trim()
                .to_string()
        });
        let raw = code_token.data_or_empty();
        let code = raw
            .strip_prefix("{{")
            .and_then(|s| s.strip_suffix("}}"))
            .unwrap_or(raw)
            .trim()
            .to_string();
        Self {
            rule: rule.into(),
            ty,
            code,
        }
    }
}
