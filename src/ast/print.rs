//! §4.F "Pretty-printer contract" — a deterministic, indented,
//! line-oriented tree dump. Three-space indent steps, a fixed `└──`
//! prefix per non-root line (§8 "Pretty-print determinism").
//!
//! Grounded on `examples/original_source/pkg/ast/print.go`'s `print`
//! helper, generalized into one writer shared by both AST halves instead
//! of Go's per-type hand-rolled `strings.Builder` usage.

use std::fmt::Write as _;

use super::{
    codeblock::Body,
    parser::{Alternatives, ParserNode, ParserRule, TopLevel},
};

const INDENT_WIDTH: usize = 3;

struct Printer {
    buf: String,
    indent: usize,
}

impl Printer {
    fn new() -> Self {
        Self {
            buf: String::new(),
            indent: 0,
        }
    }

    fn prefix(&mut self) {
        if self.indent > 0 {
            for _ in 0..self.indent * INDENT_WIDTH {
                self.buf.push(' ');
            }
            self.buf.push_str("└──");
        }
    }

    fn label(&mut self, s: &str) {
        self.prefix();
        let _ = writeln!(self.buf, "{s}:");
    }

    fn pair(&mut self, label: &str, value: &str) {
        self.prefix();
        let _ = writeln!(self.buf, "{label}: {value}");
    }

    fn with_indent(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent += 1;
        f(self);
        self.indent -= 1;
    }
}

/// Strips surrounding single quotes for `Token Literal`'s `Data:` field
/// (§6: "Surrounding quotes of TOKEN_LIT are stripped in Data").
fn stripped_literal_data(data: &str) -> &str {
    data.strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(data)
}

fn print_node(p: &mut Printer, node: &ParserNode) {
    match node {
        ParserNode::Alternatives(alts) => print_alternatives(p, alts),
        ParserNode::ZeroOrMore(inner) => {
            p.label("ZeroOrMore");
            p.with_indent(|p| print_node(p, inner));
        }
        ParserNode::OneOrMore(inner) => {
            p.label("OneOrMore");
            p.with_indent(|p| print_node(p, inner));
        }
        ParserNode::ZeroOrOne(inner) => {
            p.label("ZeroOrOne");
            p.with_indent(|p| print_node(p, inner));
        }
        ParserNode::RuleRef(name) => p.pair("ParserRuleRef", name),
        ParserNode::LexerRuleRef(name) => p.pair("LexerRuleRef", name),
        ParserNode::TokenLiteral(tok) => {
            p.label("Token Literal");
            p.with_indent(|p| p.pair("Data", stripped_literal_data(tok.data_or_empty())));
        }
    }
}

fn print_alternatives(p: &mut Printer, alts: &Alternatives) {
    p.label("Alternatives");
    p.with_indent(|p| {
        for (i, alt) in alts.alts.iter().enumerate() {
            p.label(&format!("Alternative {i}"));
            p.with_indent(|p| {
                for node in alt {
                    print_node(p, node);
                }
            });
        }
    });
}

fn print_parser_rule(p: &mut Printer, rule: &ParserRule) {
    p.pair("ParserRule", &rule.name);
    p.with_indent(|p| print_alternatives(p, &rule.body));
}

/// Renders `tl` per §4.F/§6: `TopLevel:` at the root (no prefix), one
/// `ParserRule: <name>` entry per rule, each followed by its body.
pub fn print_top_level(tl: &TopLevel) -> String {
    let mut p = Printer::new();
    p.label("TopLevel");
    p.with_indent(|p| {
        for rule in &tl.parser_rules {
            print_parser_rule(p, rule);
        }
    });
    p.buf
}

/// Renders a code-block `Body` per §6's structural labels (`Parser`,
/// `Code Blocks`, `Language`, `Code Block`, `Rule`, `Type`, `Code`).
pub fn print_body(body: &Body) -> String {
    let mut p = Printer::new();
    p.label("Body");
    p.with_indent(|p| {
        p.pair("Parser", &body.parser);
        p.label("Code Blocks");
        p.with_indent(|p| {
            p.pair("Language", &body.code_blocks.language);
            for block in &body.code_blocks.blocks {
                p.label("Code Block");
                p.with_indent(|p| {
                    p.pair("Rule", &block.rule);
                    if let Some(ty) = &block.ty {
                        p.pair("Type", ty);
                    }
                    p.pair("Code", &format!("{{{{ {} }}}}", block.code));
                });
            }
        });
    });
    p.buf
}

impl std::fmt::Display for TopLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&print_top_level(self))
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&print_body(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{codeblock::CodeBlock, parser::ParserRule};
    use crate::grammar::lexer::TOKEN_LIT;
    use crate::token::Token;

    fn token_lit(data: &str) -> Token {
        let mut t = Token::default();
        t.ty = TOKEN_LIT;
        t.data = Some(data.to_string());
        t
    }

    #[test]
    fn pretty_print_determinism() {
        let tl = TopLevel::new(vec![ParserRule {
            name: "suffix".into(),
            body: Alternatives::new(vec![
                vec![ParserNode::TokenLiteral(token_lit("'+'"))],
                vec![ParserNode::TokenLiteral(token_lit("'*'"))],
                vec![ParserNode::TokenLiteral(token_lit("'?'"))],
            ]),
        }]);

        let first = print_top_level(&tl);
        let second = print_top_level(&tl);
        assert_eq!(first, second);

        let expected = r#"TopLevel:
   └──ParserRule: suffix
      └──Alternatives:
         └──Alternative 0:
            └──Token Literal:
               └──Data: +
         └──Alternative 1:
            └──Token Literal:
               └──Data: *
         └──Alternative 2:
            └──Token Literal:
               └──Data: ?
"#;
        assert_eq!(first, expected);
    }

    /// Same fixture as `pretty_print_determinism`, asserted via an inline
    /// `insta` snapshot instead of a hand-copied string literal — matches
    /// `willruggiano-postgres_lsp`'s parser-crate tests, which snapshot
    /// structured textual output the same way this printer does (§8
    /// "Pretty-print determinism").
    #[test]
    fn pretty_print_snapshot() {
        let tl = TopLevel::new(vec![ParserRule {
            name: "suffix".into(),
            body: Alternatives::new(vec![
                vec![ParserNode::TokenLiteral(token_lit("'+'"))],
                vec![ParserNode::TokenLiteral(token_lit("'*'"))],
                vec![ParserNode::TokenLiteral(token_lit("'?'"))],
            ]),
        }]);

        insta::assert_snapshot!(print_top_level(&tl), @r###"
        TopLevel:
           └──ParserRule: suffix
              └──Alternatives:
                 └──Alternative 0:
                    └──Token Literal:
                       └──Data: +
                 └──Alternative 1:
                    └──Token Literal:
                       └──Data: *
                 └──Alternative 2:
                    └──Token Literal:
                       └──Data: ?
        "###);
    }

    #[test]
    fn body_print_matches_structural_labels() {
        let body = Body {
            parser: "parse.g4".into(),
            code_blocks: crate::ast::codeblock::CodeBlocks {
                language: "go".into(),
                blocks: vec![CodeBlock {
                    rule: "top_level".into(),
                    ty: Some("*ast.TopLevel".into()),
                    code: "return ast.NewTopLevel(parseRules)".into(),
                }],
            },
        };
        let printed = print_body(&body);
        let expected = r#"Body:
   └──Parser: parse.g4
   └──Code Blocks:
      └──Language: go
      └──Code Block:
         └──Rule: top_level
         └──Type: *ast.TopLevel
         └──Code: {{ return ast.NewTopLevel(parseRules) }}
"#;
        assert_eq!(printed, expected);
    }
}
