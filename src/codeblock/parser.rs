//! §4.G.2 — the code-block-grammar recursive-descent parser.
//!
//! Grounded on `examples/original_source/pkg/pgparser/parser.go`, with one
//! addition per spec.md §4.G.2 (not present in the retrieved Go source):
//! `code_blocks` accepts an optional `'(' STRING ')'` language literal —
//! see `SPEC_FULL.md` §4 for the grounding note on this deviation.

use crate::{
    ast::codeblock::{Body, CodeBlock, CodeBlocks},
    codeblock::lexer::{CODE, CODE_BLOCK, EQUALS, LBRACE, LPAREN, PARSER, RBRACE, RPAREN,
        RULE_NAME, STRING, TYPE},
    memo::Memo,
    parser::Parser,
    token::TokenType,
    tokenizer::Tokenizer,
};

pub struct CodeBlockParser<T> {
    p: Parser<T>,

    body: Memo<Body>,
    parser_decl: Memo<String>,
    code_blocks: Memo<CodeBlocks>,
    code_block: Memo<CodeBlock>,
}

impl<T: Tokenizer> CodeBlockParser<T> {
    pub fn new(tokenizer: T) -> Self {
        Self {
            p: Parser::new(tokenizer),
            body: Memo::new(),
            parser_decl: Memo::new(),
            code_blocks: Memo::new(),
            code_block: Memo::new(),
        }
    }

    /// Parses `body: parser_decl code_blocks EOF;` (§4.G.2).
    pub fn parse(&mut self) -> Option<Body> {
        self.memo_body()
    }

    // *** body ***

    fn memo_body(&mut self) -> Option<Body> {
        let pos = self.p.pos();
        if let Some(cached) = self.body.get(pos) {
            return cached;
        }
        let result = self.parse_body();
        self.body.insert(pos, result.clone());
        result
    }

    fn parse_body(&mut self) -> Option<Body> {
        let old_pos = self.p.pos();

        // ### parser_decl ###
        let Some(parser_decl) = self.memo_parser_decl() else {
            self.p.set_pos(old_pos);
            return None;
        };

        // ### code_blocks ###
        let Some(code_blocks) = self.memo_code_blocks() else {
            self.p.set_pos(old_pos);
            return None;
        };

        // ### EOF ###
        self.p.match_or_rollback(TokenType::EOF, old_pos)?;

        Some(Body::new(&parser_decl, code_blocks))
    }

    // *** parser_decl ***

    fn memo_parser_decl(&mut self) -> Option<String> {
        let pos = self.p.pos();
        if let Some(cached) = self.parser_decl.get(pos) {
            return cached;
        }
        let result = self.parse_parser_decl();
        self.parser_decl.insert(pos, result.clone());
        result
    }

    fn parse_parser_decl(&mut self) -> Option<String> {
        let old_pos = self.p.pos();

        // ### 'parser' ###
        self.p.match_or_rollback(PARSER, old_pos)?;

        // ### '=' ###
        if self.p.match_or_rollback(EQUALS, old_pos).is_none() {
            return None;
        }

        // ### STRING ###
        let string_tok = self.p.match_or_rollback(STRING, old_pos)?;

        Some(string_tok.data_or_empty().to_string())
    }

    // *** code_blocks ***

    fn memo_code_blocks(&mut self) -> Option<CodeBlocks> {
        let pos = self.p.pos();
        if let Some(cached) = self.code_blocks.get(pos) {
            return cached;
        }
        let result = self.parse_code_blocks();
        self.code_blocks.insert(pos, result.clone());
        result
    }

    fn parse_code_blocks(&mut self) -> Option<CodeBlocks> {
        let old_pos = self.p.pos();

        // ### 'code' ###
        self.p.match_or_rollback(CODE, old_pos)?;

        // ### ('(' STRING ')')? ###
        let language = if self.p.try_match(LPAREN).is_some() {
            let Some(lang_tok) = self.p.match_or_rollback(STRING, old_pos) else {
                return None;
            };
            if self.p.match_or_rollback(RPAREN, old_pos).is_none() {
                return None;
            }
            strip_quotes(lang_tok.data_or_empty()).to_string()
        } else {
            String::new()
        };

        // ### '{' ###
        if self.p.match_or_rollback(LBRACE, old_pos).is_none() {
            return None;
        }

        // ### code_block* ###
        let mut blocks = Vec::new();
        while let Some(block) = self.memo_code_block() {
            blocks.push(block);
        }

        // ### '}' ###
        self.p.match_or_rollback(RBRACE, old_pos)?;

        Some(CodeBlocks { language, blocks })
    }

    // *** code_block ***

    fn memo_code_block(&mut self) -> Option<CodeBlock> {
        let pos = self.p.pos();
        if let Some(cached) = self.code_block.get(pos) {
            return cached;
        }
        let result = self.parse_code_block();
        self.code_block.insert(pos, result.clone());
        result
    }

    fn parse_code_block(&mut self) -> Option<CodeBlock> {
        let old_pos = self.p.pos();

        // ### RULE_NAME ###
        let rule_name_tok = self.p.match_or_rollback(RULE_NAME, old_pos)?;

        // ### TYPE? ###
        let type_tok = self.p.try_match(TYPE);

        // ### CODE_BLOCK ###
        let code_block_tok = self.p.match_or_rollback(CODE_BLOCK, old_pos)?;

        Some(CodeBlock::new(
            rule_name_tok.data_or_empty().to_string(),
            type_tok.as_ref(),
            &code_block_tok,
        ))
    }
}

/// `parser = 'parse.g4'`'s `STRING` payload keeps its surrounding quotes
/// (same convention as the parser grammar's `TOKEN_LIT`); the language
/// literal needs the same stripping `Body::new` already does for `parser`.
fn strip_quotes(data: &str) -> &str {
    data.strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codeblock::lexer::CodeBlockLexer;

    fn parse(src: &str) -> Option<Body> {
        let mut p = CodeBlockParser::new(CodeBlockLexer::from_str(src));
        p.parse()
    }

    #[test]
    fn code_block_grammar_scenario_2() {
        let body = parse(
            "parser = 'parse.g4'\n\ncode('go') { top_level -> *ast.TopLevel {{ return ast.NewTopLevel(parseRules) }} }",
        )
        .expect("scenario 2 input must parse");

        assert_eq!(body.parser, "parse.g4");
        assert_eq!(body.code_blocks.language, "go");
        assert_eq!(body.code_blocks.blocks.len(), 1);
        let block = &body.code_blocks.blocks[0];
        assert_eq!(block.rule, "top_level");
        assert_eq!(block.ty.as_deref(), Some("*ast.TopLevel"));
        assert_eq!(block.code, "return ast.NewTopLevel(parseRules)");
    }

    #[test]
    fn language_literal_is_optional() {
        let body = parse("parser = 'parse.g4'\n\ncode { }").expect("must parse without language");
        assert_eq!(body.code_blocks.language, "");
        assert!(body.code_blocks.blocks.is_empty());
    }

    #[test]
    fn dotted_rule_name_in_code_block() {
        let body = parse("parser = 'x.g4'\n\ncode { rule_body.sub1 {{ body }} }")
            .expect("dotted rule name must parse");
        assert_eq!(body.code_blocks.blocks[0].rule, "rule_body.sub1");
    }

    #[test]
    fn missing_parser_decl_fails() {
        assert!(parse("code { }").is_none());
    }
}
