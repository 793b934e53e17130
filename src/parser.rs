//! §4.D — the parser runtime: a pull-based token buffer with absolute
//! positions, token lookahead, and the two match disciplines rule bodies
//! are built from.
//!
//! Grounded on `examples/original_source/runtime/go/parser.go`, with the
//! §9 Open Question fix applied: `next_token` returns the token it just
//! stored at `pos`, not unconditionally `&tokens[0]`.

use crate::{token::{Token, TokenType}, tokenizer::Tokenizer};

/// Owns the token buffer for one parse. Positions handed out by `pos()`
/// are indices into that buffer; tokens are never discarded, so a
/// rollback is a position rewind, never a truncation (§3 "Token buffer").
pub struct Parser<T> {
    tokenizer: T,
    tokens: Vec<Token>,
    // -1 before the first token is pulled; always >= 0 after `new` returns.
    pos: i64,
}

impl<T: Tokenizer> Parser<T> {
    pub fn new(tokenizer: T) -> Self {
        let mut parser = Self {
            tokenizer,
            tokens: Vec::new(),
            pos: -1,
        };
        parser.next_token();
        parser
    }

    pub fn pos(&self) -> usize {
        debug_assert!(self.pos >= 0, "pos() read before the first token was pulled");
        self.pos as usize
    }

    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos as i64;
    }

    pub fn curr_token(&self) -> &Token {
        &self.tokens[self.pos()]
    }

    /// Advances to the next position, pulling a fresh token from the
    /// tokenizer only the first time that position is visited.
    pub fn next_token(&mut self) -> &Token {
        self.pos += 1;
        let idx = self.pos as usize;
        if idx >= self.tokens.len() {
            let mut tok = Token::default();
            self.tokenizer.next_token(&mut tok);
            self.tokens.push(tok);
        }
        &self.tokens[idx]
    }

    /// Match-or-rollback: on a type mismatch, rewinds to `old_pos` and
    /// returns `None`; a rule body chains this across its concatenated
    /// parts so the *last* call's rollback restores the rule's entry
    /// position on overall failure (§4.E algorithm).
    pub fn match_or_rollback(&mut self, tt: TokenType, old_pos: usize) -> Option<Token> {
        let tok = self.curr_token().clone();
        if tok.ty != tt {
            self.set_pos(old_pos);
            return None;
        }
        self.next_token();
        Some(tok)
    }

    /// Try-match: like `match_or_rollback` but never rewinds on mismatch —
    /// used for the interior alternatives of an ordered-choice group,
    /// where the caller (not this call) owns positional recovery.
    pub fn try_match(&mut self, tt: TokenType) -> Option<Token> {
        let tok = self.curr_token().clone();
        if tok.ty != tt {
            return None;
        }
        self.next_token();
        Some(tok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::Span;

    const A: TokenType = TokenType(2);
    const B: TokenType = TokenType(3);

    struct Scripted {
        remaining: Vec<TokenType>,
    }

    impl Tokenizer for Scripted {
        fn next_token(&mut self, out: &mut Token) {
            let ty = if self.remaining.is_empty() {
                TokenType::EOF
            } else {
                self.remaining.remove(0)
            };
            out.ty = ty;
            out.data = None;
            out.span = Span::default();
        }
    }

    #[test]
    fn construction_pulls_the_first_token() {
        let p = Parser::new(Scripted {
            remaining: vec![A, B],
        });
        assert_eq!(p.pos(), 0);
        assert_eq!(p.curr_token().ty, A);
    }

    #[test]
    fn match_or_rollback_advances_on_match_and_rewinds_on_mismatch() {
        let mut p = Parser::new(Scripted {
            remaining: vec![A, B],
        });
        let old = p.pos();
        assert!(p.match_or_rollback(B, old).is_none());
        assert_eq!(p.pos(), old, "mismatch must rewind to old_pos");

        assert!(p.match_or_rollback(A, old).is_some());
        assert_eq!(p.curr_token().ty, B);
    }

    #[test]
    fn try_match_does_not_rewind_on_mismatch() {
        let mut p = Parser::new(Scripted {
            remaining: vec![A, B],
        });
        assert!(p.try_match(B).is_none());
        // position unchanged, still sitting on A
        assert_eq!(p.curr_token().ty, A);
    }

    #[test]
    fn next_token_returns_the_token_just_stored_not_the_first() {
        let mut p = Parser::new(Scripted {
            remaining: vec![A, B],
        });
        assert_eq!(p.next_token().ty, B);
        assert_eq!(p.next_token().ty, TokenType::EOF);
    }
}
