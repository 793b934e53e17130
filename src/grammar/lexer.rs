//! §4.C/§6 — the grammar-front-end tokenizer: regular mode plus the
//! char-class mode entered between `[` and `]`.
//!
//! Grounded on `examples/original_source/pkg/token/tokenizer.go`.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::{
    reader::Reader,
    token::{Token, TokenType},
    tokenizer::{skip_trivia, Tokenizer},
};

// Regular mode, char set.
pub const RULE_NAME: TokenType = TokenType(2);
pub const TOKEN_NAME: TokenType = TokenType(3);
// Sequences.
pub const TOKEN_LIT: TokenType = TokenType(4);
// Keywords.
pub const FRAGMENT: TokenType = TokenType(5);
pub const SKIP_ACTION: TokenType = TokenType(6);
pub const PUSH_ACTION: TokenType = TokenType(7);
pub const POP_ACTION: TokenType = TokenType(8);
// Basic sequences.
pub const RARROW: TokenType = TokenType(9);
pub const DOT: TokenType = TokenType(10);
pub const COLON: TokenType = TokenType(11);
pub const SEMI: TokenType = TokenType(12);
pub const PIPE: TokenType = TokenType(13);
pub const LPAREN: TokenType = TokenType(14);
pub const RPAREN: TokenType = TokenType(15);
pub const PLUS: TokenType = TokenType(16);
pub const STAR: TokenType = TokenType(17);
pub const QUEST_MARK: TokenType = TokenType(18);
pub const TILDE: TokenType = TokenType(19);
pub const COMMA: TokenType = TokenType(20);
pub const LBRACK: TokenType = TokenType(21);
// Char-class mode, char set.
pub const BASIC_CHAR: TokenType = TokenType(22);
// Char-class mode, basic sequences.
pub const UNICODE_ESCAPE_CHAR: TokenType = TokenType(23);
pub const ESCAPE_CHAR: TokenType = TokenType(24);
pub const DASH: TokenType = TokenType(25);
pub const RBRACK: TokenType = TokenType(26);

static KEYWORDS: Lazy<HashMap<&'static str, TokenType>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("fragment", FRAGMENT);
    m.insert("skip", SKIP_ACTION);
    m.insert("pushMode", PUSH_ACTION);
    m.insert("popMode", POP_ACTION);
    m
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Regular,
    CharClass,
}

/// The parser-grammar tokenizer (§4.C). Mode-aware: `[` both emits
/// `LBRACK` and switches to char-class mode; `]` emits `RBRACK` and
/// switches back.
pub struct GrammarLexer {
    reader: Reader,
    mode: Mode,
}

impl GrammarLexer {
    pub fn new(reader: Reader) -> Self {
        Self {
            reader,
            mode: Mode::Regular,
        }
    }

    pub fn from_str(input: &str) -> Self {
        Self::new(Reader::from_str(input))
    }

    fn process_rule_name(&mut self, out: &mut Token) -> bool {
        if !self.reader.match_char_in_range('a', 'z') {
            return false;
        }
        while self.reader.match_char_in_range('A', 'Z')
            || self.reader.match_char_in_range('a', 'z')
            || self.reader.match_char_in_range('0', '9')
            || self.reader.match_char('_')
        {}

        self.reader.build_token_data(RULE_NAME, out);

        if let Some(&kw) = out.data.as_deref().and_then(|d| KEYWORDS.get(d)) {
            out.ty = kw;
            out.data = None;
        }
        true
    }

    fn process_token_name(&mut self, out: &mut Token) -> bool {
        if !self.reader.match_char_in_range('A', 'Z') {
            return false;
        }
        while self.reader.match_char_in_range('A', 'Z')
            || self.reader.match_char_in_range('a', 'z')
            || self.reader.match_char_in_range('0', '9')
            || self.reader.match_char('_')
        {}

        self.reader.build_token_data(TOKEN_NAME, out);
        true
    }

    fn char_class_next_token(&mut self, ch: char, out: &mut Token) {
        let r = &mut self.reader;
        match ch {
            '\\' => match r.advance() {
                'u' => {
                    r.advance();
                    r.mark();
                    let mut matched = false;
                    while r.match_char_in_range('A', 'F')
                        || r.match_char_in_range('a', 'f')
                        || r.match_char_in_range('0', '9')
                    {
                        matched = true;
                    }
                    if matched {
                        r.build_token_data(UNICODE_ESCAPE_CHAR, out);
                        return;
                    }

                    r.reset();
                    if !r.match_char('{') {
                        r.build_token_data_next(TokenType::ILLEGAL, out);
                        return;
                    }
                    let mut matched = false;
                    while r.match_char_in_range('A', 'F')
                        || r.match_char_in_range('a', 'f')
                        || r.match_char_in_range('0', '9')
                    {
                        matched = true;
                    }
                    if !matched {
                        r.build_token_data_next(TokenType::ILLEGAL, out);
                        return;
                    }
                    if !r.match_char('}') {
                        r.build_token_data_next(TokenType::ILLEGAL, out);
                        return;
                    }
                    r.build_token_data(UNICODE_ESCAPE_CHAR, out);
                }
                _ => r.build_token_data_next(ESCAPE_CHAR, out),
            },
            '-' => r.build_token_next(DASH, out),
            ']' => {
                r.build_token_next(RBRACK, out);
                self.mode = Mode::Regular;
            }
            _ => r.build_token_data_next(BASIC_CHAR, out),
        }
    }
}

impl Tokenizer for GrammarLexer {
    fn next_token(&mut self, out: &mut Token) {
        if self.mode == Mode::CharClass {
            let ch = self.reader.current();
            self.char_class_next_token(ch, out);
            return;
        }

        if !skip_trivia(&mut self.reader, out) {
            return;
        }

        if self.process_rule_name(out) {
            return;
        }
        if self.process_token_name(out) {
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
                r.build_token_data(TOKEN_LIT, out);
            }
            '-' => {
                r.advance();
                if !r.match_char('>') {
                    r.build_token_data_next(TokenType::ILLEGAL, out);
                    return;
                }
                r.build_token(RARROW, out);
            }
            '.' => r.build_token_next(DOT, out),
            ':' => r.build_token_next(COLON, out),
            ';' => r.build_token_next(SEMI, out),
            '|' => r.build_token_next(PIPE, out),
            '(' => r.build_token_next(LPAREN, out),
            ')' => r.build_token_next(RPAREN, out),
            '+' => r.build_token_next(PLUS, out),
            '*' => r.build_token_next(STAR, out),
            '?' => r.build_token_next(QUEST_MARK, out),
            '~' => r.build_token_next(TILDE, out),
            ',' => r.build_token_next(COMMA, out),
            '[' => {
                r.build_token_next(LBRACK, out);
                self.mode = Mode::CharClass;
            }
            crate::reader::EOF_CHAR => r.build_token(TokenType::EOF, out),
            other => {
                log::trace!("unrecognized byte '{other}' at {}", r.row_col());
                r.build_token_data_next(TokenType::ILLEGAL, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        let mut lex = GrammarLexer::from_str(input);
        let mut out = Vec::new();
        loop {
            let mut tok = Token::default();
            lex.next_token(&mut tok);
            let done = tok.ty == TokenType::EOF;
            out.push(tok);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn comment_stripping_scenario_3() {
        let toks = tokenize("a /* x */ b // y\nc");
        let types: Vec<TokenType> = toks.iter().map(|t| t.ty).collect();
        assert_eq!(types, vec![RULE_NAME, RULE_NAME, RULE_NAME, TokenType::EOF]);
        let data: Vec<_> = toks.iter().map(|t| t.data.as_deref()).collect();
        assert_eq!(data, vec![Some("a"), Some("b"), Some("c"), None]);
    }

    #[test]
    fn char_class_mode_transitions_scenario_4() {
        let toks = tokenize("[a-z\\uffff\\u{abcd}]");
        let types: Vec<TokenType> = toks.iter().map(|t| t.ty).collect();
        assert_eq!(
            types,
            vec![
                LBRACK,
                BASIC_CHAR,
                DASH,
                BASIC_CHAR,
                UNICODE_ESCAPE_CHAR,
                UNICODE_ESCAPE_CHAR,
                RBRACK,
                TokenType::EOF,
            ]
        );
    }

    #[test]
    fn keywords_reclassify_rule_names() {
        let toks = tokenize("fragment skip pushMode popMode plain");
        let types: Vec<TokenType> = toks.iter().map(|t| t.ty).collect();
        assert_eq!(
            types,
            vec![
                FRAGMENT,
                SKIP_ACTION,
                PUSH_ACTION,
                POP_ACTION,
                RULE_NAME,
                TokenType::EOF
            ]
        );
    }

    #[test]
    fn token_lit_captures_quotes() {
        let toks = tokenize("':'");
        assert_eq!(toks[0].ty, TOKEN_LIT);
        assert_eq!(toks[0].data.as_deref(), Some("':'"));
    }

    #[test]
    fn unrecognized_byte_is_illegal() {
        let toks = tokenize("@");
        assert_eq!(toks[0].ty, TokenType::ILLEGAL);
    }

    /// §8 "Round-trip (token-level)": concatenating `token.data` (or the
    /// fixed lexeme for punctuation) reproduces the input minus discarded
    /// whitespace/comments.
    #[test]
    fn token_level_round_trip_reproduces_input_minus_trivia() {
        fn lexeme(tok: &Token) -> &'static str {
            match tok.ty {
                t if t == COLON => ":",
                t if t == SEMI => ";",
                t if t == PIPE => "|",
                t if t == PLUS => "+",
                t if t == STAR => "*",
                t if t == QUEST_MARK => "?",
                _ => "",
            }
        }

        let input = "r: 'a' 'b' | 'a' 'c';";
        let toks = tokenize(input);
        let mut rebuilt = String::new();
        for tok in &toks {
            if tok.ty == TokenType::EOF {
                break;
            }
            match &tok.data {
                Some(d) => rebuilt.push_str(d),
                None => rebuilt.push_str(lexeme(tok)),
            }
        }
        assert_eq!(rebuilt, "r:'a''b'|'a''c';");
    }
}
