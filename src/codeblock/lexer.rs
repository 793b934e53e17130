//! §4.G.2/§6 — the code-block-grammar tokenizer.
//!
//! Grounded on `examples/original_source/pkg/pgtoken/pg_tokenizer.go`, with
//! one deliberate generalization: `RULE_NAME` here also accepts `.` inside
//! the identifier (spec §6: "Rule-names here may contain a dot (e.g.
//! `rule_body.sub1`) — unlike the parser grammar"), addressing an anonymous
//! sub-alternative produced by `grammar::parser`'s parenthesized groups.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::{
    reader::Reader,
    token::{Token, TokenType},
    tokenizer::{skip_trivia, Tokenizer},
};

pub const RULE_NAME: TokenType = TokenType(2);
pub const STRING: TokenType = TokenType(3);
pub const TYPE: TokenType = TokenType(4);
pub const CODE_BLOCK: TokenType = TokenType(5);
pub const PARSER: TokenType = TokenType(6);
pub const CODE: TokenType = TokenType(7);
pub const EQUALS: TokenType = TokenType(8);
pub const LBRACE: TokenType = TokenType(9);
pub const RBRACE: TokenType = TokenType(10);
pub const LPAREN: TokenType = TokenType(11);
pub const RPAREN: TokenType = TokenType(12);

static KEYWORDS: Lazy<HashMap<&'static str, TokenType>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("parser", PARSER);
    m.insert("code", CODE);
    m
});

/// The code-block-grammar tokenizer (§4.G.2). Unlike [`crate::grammar::lexer::GrammarLexer`]
/// this has no mode switch — every token type is reachable from one state.
pub struct CodeBlockLexer {
    reader: Reader,
}

impl CodeBlockLexer {
    pub fn new(reader: Reader) -> Self {
        Self { reader }
    }

    pub fn from_str(input: &str) -> Self {
        Self::new(Reader::from_str(input))
    }

    fn process_rule_name(&mut self, out: &mut Token) -> bool {
        let r = &mut self.reader;
        if !r.match_char_in_range('a', 'z') {
            return false;
        }
        while r.match_char_in_range('A', 'Z')
            || r.match_char_in_range('a', 'z')
            || r.match_char_in_range('0', '9')
            || r.match_char('_')
            || r.match_char('.')
        {}

        r.build_token_data(RULE_NAME, out);

        if let Some(&kw) = out.data.as_deref().and_then(|d| KEYWORDS.get(d)) {
            out.ty = kw;
            out.data = None;
        }
        true
    }
}

impl Tokenizer for CodeBlockLexer {
    fn next_token(&mut self, out: &mut Token) {
        if !skip_trivia(&mut self.reader, out) {
            return;
        }

        if self.process_rule_name(out) {
            return;
        }

        let r = &mut self.reader;
        match r.current() {
            '\'' => {
                r.advance();
                let mut matched = false;
                while r.match_seq("\\'") || r.match_char_except('\'') {
                    matched = true;
                }
                if !matched {
                    r.build_token_data_next(TokenType::ILLEGAL, out);
                    return;
                }
                if !r.match_char('\'') {
                    r.build_token_data_next(TokenType::ILLEGAL, out);
                    return;
                }
                r.build_token_data(STRING, out);
            }
            '-' => {
                r.advance();
                if !r.match_char('>') {
                    r.build_token_data_next(TokenType::ILLEGAL, out);
                    return;
                }
                if !r.match_until_seq("{{") {
                    r.build_token_data_next(TokenType::ILLEGAL, out);
                    return;
                }
                r.build_token_data(TYPE, out);
            }
            '=' => r.build_token_next(EQUALS, out),
            '{' => {
                r.advance();
                if !r.match_char('{') {
                    r.build_token(LBRACE, out);
                    return;
                }
                if !r.match_until_seq("}}") {
                    r.build_token_data_next(TokenType::ILLEGAL, out);
                    return;
                }
                r.match_seq("}}");
                r.build_token_data(CODE_BLOCK, out);
            }
            '}' => r.build_token_next(RBRACE, out),
            '(' => r.build_token_next(LPAREN, out),
            ')' => r.build_token_next(RPAREN, out),
            crate::reader::EOF_CHAR => r.build_token(TokenType::EOF, out),
            other => {
                log::trace!("unrecognized byte '{other}' at {}", r.row_col());
                r.build_token_data_next(TokenType::ILLEGAL, out);
            }
        }
    }
}
