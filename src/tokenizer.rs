//! §4.C — the tokenizer contract shared by every front-end this crate
//! assembles (the grammar lexer and the code-block lexer). A tokenizer is
//! pull-based: one token per call, no look-behind.

use crate::{reader::Reader, token::Token};

pub trait Tokenizer {
    /// Writes the next token into `out`. Called repeatedly by
    /// [`crate::parser::Parser`] as it needs more lookahead; must emit
    /// `TokenType::EOF` forever once end-of-input is reached.
    fn next_token(&mut self, out: &mut Token);
}

/// Regular-mode whitespace/comment skip loop, shared by the grammar lexer
/// and the code-block lexer (`original_source/pkg/token/tokenizer.go` and
/// `pkg/pgtoken/pg_tokenizer.go` duplicate this loop verbatim; this crate
/// factors it once). Consumes `[ \t\r\n\f]+`, `//...EOL`, and `/*...*/`
/// (consuming the trailing `*/`, per the Open Question in §9) until `curr`
/// is none of those. Returns `true` once the loop exits cleanly; `false` if
/// a lone `/` was followed by neither `/` nor `*`, in which case `out` has
/// already been built as an `ILLEGAL` token and the caller should return
/// immediately.
pub(crate) fn skip_trivia(r: &mut Reader, out: &mut Token) -> bool {
    use crate::token::TokenType;

    loop {
        match r.current() {
            '/' => match r.advance() {
                '/' => {
                    r.advance();
                    while r.match_char_except_in_seq("\r\n") {}
                    r.discard_token_data();
                }
                '*' => {
                    r.advance();
                    r.match_until_seq("*/");
                    r.match_seq("*/");
                    r.discard_token_data();
                }
                _ => {
                    log::trace!("lone '/' is neither a comment nor a token, at {}", r.row_col());
                    r.build_token_data_next(TokenType::ILLEGAL, out);
                    return false;
                }
            },
            ' ' | '\t' | '\r' | '\n' | '\u{0c}' => {
                r.advance();
                while r.match_char_in_seq(" \t\r\n\u{0c}") {}
                r.discard_token_data();
            }
            _ => return true,
        }
    }
}
