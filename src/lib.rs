//! Scannerless lexing plus packrat PEG parsing, built around a
//! self-describing grammar front-end: the same `reader`/`tokenizer`/
//! `parser`/`memo` primitives that execute a generated grammar also
//! execute the parser- and code-block grammars that describe it.
//!
//! See `DESIGN.md` for the grounding ledger.

pub mod ast;
pub mod codeblock;
pub mod error;
pub mod grammar;
pub mod memo;
pub mod parser;
pub mod reader;
pub mod source;
pub mod token;
pub mod tokenizer;

use ast::{codeblock::Body, parser::TopLevel};
use error::{ParseError, ParseResult};
use source::Source;

/// Parses a parser/lexer grammar (§4.G.1) from any [`Source`] and returns
/// its AST, or a [`ParseError`] pointing at the furthest position the
/// front-end's tokenizer/parser pair reached before giving up.
pub fn parse_grammar(source: impl Into<Source>) -> ParseResult<TopLevel> {
    let source = source.into();
    let mut parser = grammar::GrammarParser::new(grammar::GrammarLexer::new(source.into_reader()));
    parser.parse().ok_or_else(|| {
        let err = ParseError::new("failed to parse grammar", None);
        log::error!("{err}");
        err
    })
}

/// Parses a code-block sidecar block (§4.G.2) from any [`Source`] and
/// returns its AST.
pub fn parse_code_blocks(source: impl Into<Source>) -> ParseResult<Body> {
    let source = source.into();
    let mut parser =
        codeblock::CodeBlockParser::new(codeblock::CodeBlockLexer::new(source.into_reader()));
    parser.parse().ok_or_else(|| {
        let err = ParseError::new("failed to parse code-block grammar", None);
        log::error!("{err}");
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_grammar_roundtrips_the_bootstrap_grammar() {
        let grammar = "top_level: parse_rule* EOF; \
             parse_rule: RULE_NAME ':' rule_body ';'; \
             rule_body: rule_sect+ ('|' rule_sect+)*; \
             rule_sect: rule_part suffix?; \
             rule_part: '(' rule_body ')' | RULE_NAME | TOKEN_NAME | TOKEN_LIT; \
             suffix: '+' | '*' | '?';";
        let tl = parse_grammar(grammar).expect("bootstrap grammar must parse");
        assert_eq!(tl.parser_rules.len(), 6);
    }

    #[test]
    fn parse_grammar_reports_an_error_on_garbage_input() {
        assert!(parse_grammar("not a valid : : grammar ;;;").is_err());
    }

    #[test]
    fn parse_code_blocks_scenario_2() {
        let body = parse_code_blocks(
            "parser = 'parse.g4'\n\ncode('go') { top_level -> *ast.TopLevel {{ return ast.NewTopLevel(parseRules) }} }",
        )
        .expect("scenario 2 input must parse");
        assert_eq!(body.parser, "parse.g4");
        assert_eq!(body.code_blocks.language, "go");
    }
}
