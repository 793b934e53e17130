//! §4.A/§4.B — the char reader and the lexer primitives built on top of it.
//!
//! Grounded on `examples/original_source/pkg/lexer/lexer.go`: a single
//! struct owns the byte buffer, the decode cursor, row/column tracking and a
//! one-slot rollback mark, and also carries the matcher primitives as
//! inherent methods (the original keeps char-reader state and primitives in
//! one `Lexer` struct rather than splitting them across two types, and we
//! follow that rather than inventing an artificial trait boundary).

use std::{
    fmt::Display,
    fs,
    io::{self, Read},
    path::Path,
};

/// Reserved code point returned once the cursor has passed the last byte.
pub const EOF_CHAR: char = '\u{ffff}';
/// Reserved code point returned on a decoding fault or a stray BOM.
pub const ERROR_CHAR: char = '\u{fffe}';
const BOM_CHAR: char = '\u{feff}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy)]
struct Mark {
    pos: usize,
    next_pos: usize,
    row: u32,
    col: u32,
    curr: char,
}

/// Decodes `bytes` as a single UTF-8 code point, returning `(char, size)`.
/// Mirrors `utf8.DecodeRune`: on a fault the size is the number of bytes to
/// skip (always 1 here, matching the reader's advance-by-one recovery).
fn decode(bytes: &[u8]) -> (char, usize) {
    let b0 = bytes[0];
    if b0 < 0x80 {
        return (b0 as char, 1);
    }
    let max = bytes.len().min(4);
    for len in 2..=max {
        if let Ok(s) = std::str::from_utf8(&bytes[..len]) {
            if let Some(c) = s.chars().next() {
                return (c, len);
            }
        }
    }
    (ERROR_CHAR, 1)
}

/// A cursor over a byte buffer assumed to be well-formed UTF-8 (§3 "Source
/// buffer"). Owns the single rollback mark described in §4.A/§9: marking and
/// resetting must not be interleaved with token-building calls.
pub struct Reader {
    input: Vec<u8>,
    pos: usize,
    next_pos: usize,
    curr: char,
    row: u32,
    col: u32,
    token_start: usize,
    start_row: u32,
    start_col: u32,
    mark: Option<Mark>,
}

impl Reader {
    pub fn from_str(input: &str) -> Self {
        Self::from_bytes(input.as_bytes().to_vec())
    }

    pub fn from_reader<R: Read>(mut r: R) -> io::Result<Self> {
        let mut buf = Vec::new();
        r.read_to_end(&mut buf)?;
        Ok(Self::from_bytes(buf))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Self::from_reader(fs::File::open(path)?)
    }

    fn from_bytes(input: Vec<u8>) -> Self {
        let mut reader = Self {
            input,
            pos: 0,
            next_pos: 0,
            curr: '\0',
            row: 1,
            col: 0,
            token_start: 0,
            start_row: 1,
            start_col: 1,
            mark: None,
        };
        reader.advance();
        reader
    }

    pub fn current(&self) -> char {
        self.curr
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn row_col(&self) -> Position {
        Position {
            row: self.row,
            col: self.col,
        }
    }

    /// §4.A contract: row/col update per the *previous* `curr`; end-of-input
    /// leaves row/col untouched.
    pub fn advance(&mut self) -> char {
        if self.next_pos >= self.input.len() {
            self.curr = EOF_CHAR;
            return self.curr;
        }

        if self.curr == '\n' {
            self.row += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }

        self.pos = self.next_pos;
        let (ch, size) = decode(&self.input[self.pos..]);
        self.curr = if ch == BOM_CHAR && self.pos > 0 {
            ERROR_CHAR
        } else {
            ch
        };
        self.next_pos += size;
        self.curr
    }

    /// Overwrites the single mark slot. Must not be nested with another
    /// `mark()` before a matching `reset()` (§5, §9).
    pub fn mark(&mut self) {
        self.mark = Some(Mark {
            pos: self.pos,
            next_pos: self.next_pos,
            row: self.row,
            col: self.col,
            curr: self.curr,
        });
    }

    /// Restores the state captured by the last `mark()`. A programming
    /// error to call with no mark taken.
    pub fn reset(&mut self) {
        let m = self.mark.expect("reset() called with no active mark");
        self.pos = m.pos;
        self.next_pos = m.next_pos;
        self.row = m.row;
        self.col = m.col;
        self.curr = m.curr;
    }

    pub fn token_start_position(&self) -> Position {
        Position {
            row: self.start_row,
            col: self.start_col,
        }
    }

    // -- §4.B lexer primitives --------------------------------------------

    pub fn match_char(&mut self, c: char) -> bool {
        if self.curr != c {
            return false;
        }
        self.advance();
        true
    }

    pub fn match_char_except(&mut self, c: char) -> bool {
        if self.curr == c || self.curr == EOF_CHAR {
            return false;
        }
        self.advance();
        true
    }

    pub fn match_char_in_range(&mut self, a: char, b: char) -> bool {
        if self.curr < a || self.curr > b {
            return false;
        }
        self.advance();
        true
    }

    pub fn match_char_except_in_range(&mut self, a: char, b: char) -> bool {
        if self.curr == EOF_CHAR || (self.curr >= a && self.curr <= b) {
            return false;
        }
        self.advance();
        true
    }

    pub fn match_char_in_seq(&mut self, seq: &str) -> bool {
        if seq.contains(self.curr) && self.curr != EOF_CHAR {
            self.advance();
            return true;
        }
        false
    }

    pub fn match_char_except_in_seq(&mut self, seq: &str) -> bool {
        if self.curr == EOF_CHAR || seq.contains(self.curr) {
            return false;
        }
        self.advance();
        true
    }

    /// Rolls back via the single mark slot on mismatch (§4.B) — must not be
    /// called while another mark window is open.
    pub fn match_seq(&mut self, seq: &str) -> bool {
        self.mark();
        for c in seq.chars() {
            if self.curr != c {
                self.reset();
                return false;
            }
            self.advance();
        }
        true
    }

    /// Consumes code points until `seq` is the upcoming text or end-of-input
    /// is reached; leaves the cursor positioned *before* `seq` (§4.B table).
    /// Returns whether `seq` was actually found before end-of-input, so a
    /// caller building a delimited token (e.g. a `{{ ... }}` code block) can
    /// tell an unterminated one from a clean stop.
    pub fn match_until_seq(&mut self, seq: &str) -> bool {
        let needle = seq.as_bytes();
        loop {
            if self.curr == EOF_CHAR {
                return false;
            }
            if self.input[self.pos..].starts_with(needle) {
                return true;
            }
            self.advance();
        }
    }

    // -- token-building helpers --------------------------------------------

    pub fn discard_token_data(&mut self) {
        self.token_start = self.pos;
        self.start_row = self.row;
        self.start_col = self.col;
    }

    pub fn discard_token_data_next(&mut self) {
        self.advance();
        self.discard_token_data();
    }

    fn span(&self) -> Span {
        Span {
            start: Position {
                row: self.start_row,
                col: self.start_col,
            },
            end: Position {
                row: self.row,
                col: self.col,
            },
        }
    }

    pub fn build_token(&mut self, ty: crate::token::TokenType, out: &mut crate::token::Token) {
        out.ty = ty;
        out.span = self.span();
        out.data = None;
        self.discard_token_data();
    }

    pub fn build_token_next(&mut self, ty: crate::token::TokenType, out: &mut crate::token::Token) {
        self.advance();
        self.build_token(ty, out);
    }

    /// Captures `[token_start, pos)` as `data`. Uses a lossy UTF-8 decode
    /// rather than panicking: a fault inside the span means the source
    /// contained a byte `decode()` (§4.A) couldn't resolve, which is
    /// exactly the recoverable "decoding fault" case §7 describes — the
    /// caller building an `ILLEGAL` token around it still needs `data` to
    /// come back, not abort the parse.
    pub fn build_token_data(&mut self, ty: crate::token::TokenType, out: &mut crate::token::Token) {
        let text = String::from_utf8_lossy(&self.input[self.token_start..self.pos]).into_owned();
        self.build_token(ty, out);
        out.data = Some(text);
    }

    pub fn build_token_data_next(
        &mut self,
        ty: crate::token::TokenType,
        out: &mut crate::token::Token,
    ) {
        self.advance();
        self.build_token_data(ty, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Token, TokenType};

    const BOGUS: TokenType = TokenType(100);

    fn assert_token(tok: &Token, data: &str, sr: u32, sc: u32, er: u32, ec: u32) {
        assert_eq!(tok.ty, BOGUS);
        assert_eq!(tok.data.as_deref(), Some(data));
        assert_eq!(tok.span.start, Position { row: sr, col: sc });
        assert_eq!(tok.span.end, Position { row: er, col: ec });
    }

    fn input() -> &'static str {
        "abc\n\tde/* blah blah\n\t  */fghi\u{1F60A}"
    }

    #[test]
    fn lexer_primitive_walk() {
        let mut r = Reader::from_str(input());
        let mut tok = Token::default();

        assert!(!r.match_char('b'));
        assert!(r.match_char('a'));
        r.build_token_data(BOGUS, &mut tok);
        assert_token(&tok, "a", 1, 1, 1, 1);

        assert!(!r.match_char_except('b'));
        assert!(r.match_char_except('a'));
        r.build_token_data(BOGUS, &mut tok);
        assert_token(&tok, "b", 1, 2, 1, 2);

        assert!(!r.match_seq("c\n\tdf"));
        assert!(r.match_seq("c\n\tde"));
        r.build_token_data(BOGUS, &mut tok);
        assert_token(&tok, "c\n\tde", 1, 3, 2, 3);
    }

    #[test]
    fn match_until_seq_stops_before_the_sequence() {
        let mut r = Reader::from_str("abc*/d");
        r.match_until_seq("*/");
        assert_eq!(r.current(), '*');
        r.discard_token_data();
        assert!(r.match_seq("*/"));
        let mut tok = Token::default();
        r.build_token_data(BOGUS, &mut tok);
        assert_eq!(tok.data.as_deref(), Some("*/"));
        assert_eq!(r.current(), 'd');
    }

    #[test]
    fn mark_reset_restores_state_exactly() {
        let mut r = Reader::from_str("abcdef");
        r.advance();
        r.mark();
        r.advance();
        r.advance();
        r.reset();
        assert_eq!(r.current(), 'b');
    }

    #[test]
    fn multibyte_span_occupies_one_column() {
        let mut r = Reader::from_str(input());
        for _ in 0.."abc\n\tde".chars().count() {
            r.advance();
        }
        r.match_until_seq("*/");
        r.match_seq("*/");
        r.discard_token_data();
        for _ in 0.."fghi".chars().count() {
            r.advance();
        }
        assert_eq!(r.current(), '\u{1F60A}');
        r.advance();
        assert_eq!(r.current(), EOF_CHAR);
    }

    /// A stray invalid byte reaching `build_token_data` via a path loaded
    /// through `Reader::from_path` (which, unlike `source::Source`, does no
    /// UTF-8 validation up front) must come back as a lossily-decoded
    /// `ILLEGAL` token instead of panicking.
    #[test]
    fn invalid_byte_from_path_is_illegal_not_a_panic() {
        use crate::{
            grammar::lexer::{GrammarLexer, RULE_NAME},
            tokenizer::Tokenizer,
        };

        let mut path = std::env::temp_dir();
        path.push("scanpeg_invalid_utf8_test_input.g4");
        std::fs::write(&path, [b'a', 0x80, b'b']).expect("temp file write must succeed");

        let reader = Reader::from_path(&path).expect("from_path must read raw bytes without validating UTF-8");
        std::fs::remove_file(&path).ok();

        let mut lexer = GrammarLexer::new(reader);
        let mut toks = Vec::new();
        loop {
            let mut tok = Token::default();
            lexer.next_token(&mut tok);
            let done = tok.ty == TokenType::EOF;
            toks.push(tok);
            if done {
                break;
            }
        }

        let types: Vec<TokenType> = toks.iter().map(|t| t.ty).collect();
        assert_eq!(
            types,
            vec![RULE_NAME, TokenType::ILLEGAL, RULE_NAME, TokenType::EOF]
        );
        assert_eq!(toks[1].data.as_deref(), Some("\u{fffd}"));
    }

    #[test]
    fn bom_past_offset_zero_is_an_error_char() {
        let mut bytes = vec![b'a'];
        bytes.extend_from_slice('\u{feff}'.to_string().as_bytes());
        let mut r = Reader::from_bytes(bytes);
        assert_eq!(r.current(), 'a');
        r.advance();
        assert_eq!(r.current(), ERROR_CHAR);
    }

    #[test]
    fn row_col_track_newlines() {
        let mut r = Reader::from_str("ab\ncd");
        assert_eq!(r.row_col(), Position { row: 1, col: 1 });
        r.advance();
        assert_eq!(r.row_col(), Position { row: 1, col: 2 });
        r.advance();
        assert_eq!(r.row_col(), Position { row: 1, col: 3 });
        r.advance();
        assert_eq!(r.row_col(), Position { row: 2, col: 1 });
    }
}
