//! §4.G.1 — the parser-grammar recursive-descent parser, memoized per
//! §4.E. Grounded on `examples/original_source/pkg/parser/parser.go`,
//! whose `NewParseGenParser` keeps one `map[int]*T` per rule; this crate
//! keeps that same explicit-struct-of-maps shape (one [`Memo`] field per
//! rule) rather than a single cache keyed by rule id, so each rule's memo
//! type stays concrete instead of going through a trait object.

use crate::{
    ast::parser::{Alternatives, ParserNode, ParserRule, TopLevel},
    grammar::lexer::{COLON, LPAREN, PIPE, PLUS, QUEST_MARK, RPAREN, RULE_NAME, SEMI, STAR,
        TOKEN_LIT, TOKEN_NAME},
    memo::Memo,
    parser::Parser,
    token::{Token, TokenType},
    tokenizer::Tokenizer,
};

/// `rule_body: rule_sect+ ('|' rule_sect+)*` — the repeated `'|'
/// rule_sect+` group, kept as its own memoized sub-rule exactly as the
/// teacher's generated code does (`ruleBodySub1` in the grounding file).
#[derive(Debug, Clone, PartialEq)]
struct RuleBodySub1 {
    rule_sects: Vec<ParserNode>,
}

/// `rule_part: '(' rule_body ')' | ...` — the parenthesized alternative,
/// memoized separately; its result is unwrapped (the parens themselves do
/// not survive into the AST) by `parse_rule_part`.
#[derive(Debug, Clone, PartialEq)]
struct RulePartSub1 {
    body: Alternatives,
}

pub struct GrammarParser<T> {
    p: Parser<T>,

    top_level: Memo<TopLevel>,
    parse_rule: Memo<ParserRule>,
    rule_body: Memo<Alternatives>,
    rule_body_sub1: Memo<RuleBodySub1>,
    rule_sect: Memo<ParserNode>,
    rule_part: Memo<ParserNode>,
    rule_part_sub1: Memo<RulePartSub1>,
    suffix: Memo<Token>,
}

impl<T: Tokenizer> GrammarParser<T> {
    pub fn new(tokenizer: T) -> Self {
        Self {
            p: Parser::new(tokenizer),
            top_level: Memo::new(),
            parse_rule: Memo::new(),
            rule_body: Memo::new(),
            rule_body_sub1: Memo::new(),
            rule_sect: Memo::new(),
            rule_part: Memo::new(),
            rule_part_sub1: Memo::new(),
            suffix: Memo::new(),
        }
    }

    /// Parses `top_level: parse_rule* EOF;` — the only entry point a
    /// caller needs (§4.G). `None` on overall failure.
    pub fn parse(&mut self) -> Option<TopLevel> {
        self.memo_top_level()
    }

    // *** top_level ***

    fn memo_top_level(&mut self) -> Option<TopLevel> {
        let pos = self.p.pos();
        if let Some(cached) = self.top_level.get(pos) {
            return cached;
        }
        let result = self.parse_top_level();
        self.top_level.insert(pos, result.clone());
        result
    }

    fn parse_top_level(&mut self) -> Option<TopLevel> {
        let old_pos = self.p.pos();

        // ### parse_rule* ###
        let mut parser_rules = Vec::new();
        while let Some(rule) = self.memo_parse_rule() {
            parser_rules.push(rule);
        }

        // ### EOF ###
        self.p.match_or_rollback(TokenType::EOF, old_pos)?;

        Some(TopLevel::new(parser_rules))
    }

    // *** parse_rule ***

    fn memo_parse_rule(&mut self) -> Option<ParserRule> {
        let pos = self.p.pos();
        if let Some(cached) = self.parse_rule.get(pos) {
            return cached;
        }
        let result = self.parse_parse_rule();
        self.parse_rule.insert(pos, result.clone());
        result
    }

    fn parse_parse_rule(&mut self) -> Option<ParserRule> {
        let old_pos = self.p.pos();

        // ### RULE_NAME ###
        let rule_name_tok = self.p.match_or_rollback(RULE_NAME, old_pos)?;

        // ### ':' ###
        if self.p.match_or_rollback(COLON, old_pos).is_none() {
            return None;
        }

        // ### rule_body ###
        let Some(rule_body) = self.memo_rule_body() else {
            self.p.set_pos(old_pos);
            return None;
        };

        // ### ';' ###
        self.p.match_or_rollback(SEMI, old_pos)?;

        Some(ParserRule {
            name: rule_name_tok.data_or_empty().to_string(),
            body: rule_body,
        })
    }

    // *** rule_body ***

    fn memo_rule_body(&mut self) -> Option<Alternatives> {
        let pos = self.p.pos();
        if let Some(cached) = self.rule_body.get(pos) {
            return cached;
        }
        let result = self.parse_rule_body();
        self.rule_body.insert(pos, result.clone());
        result
    }

    fn parse_rule_body(&mut self) -> Option<Alternatives> {
        let old_pos = self.p.pos();

        // ### rule_sect+ ###
        let mut rule_sects = Vec::new();
        while let Some(sect) = self.memo_rule_sect() {
            rule_sects.push(sect);
        }
        if rule_sects.is_empty() {
            self.p.set_pos(old_pos);
            return None;
        }

        // ### ('|' rule_sect+)* ###
        let mut subs = Vec::new();
        while let Some(sub) = self.memo_rule_body_sub1() {
            subs.push(sub);
        }

        let mut alts = vec![rule_sects];
        alts.extend(subs.into_iter().map(|s| s.rule_sects));
        Some(Alternatives::new(alts))
    }

    // *** rule_body - '|' rule_sect+ ***

    fn memo_rule_body_sub1(&mut self) -> Option<RuleBodySub1> {
        let pos = self.p.pos();
        if let Some(cached) = self.rule_body_sub1.get(pos) {
            return cached;
        }
        let result = self.parse_rule_body_sub1();
        self.rule_body_sub1.insert(pos, result.clone());
        result
    }

    fn parse_rule_body_sub1(&mut self) -> Option<RuleBodySub1> {
        let old_pos = self.p.pos();

        // ### '|' ###
        self.p.match_or_rollback(PIPE, old_pos)?;

        // ### rule_sect+ ###
        let mut rule_sects = Vec::new();
        while let Some(sect) = self.memo_rule_sect() {
            rule_sects.push(sect);
        }
        if rule_sects.is_empty() {
            self.p.set_pos(old_pos);
            return None;
        }

        Some(RuleBodySub1 { rule_sects })
    }

    // *** rule_sect ***

    fn memo_rule_sect(&mut self) -> Option<ParserNode> {
        let pos = self.p.pos();
        if let Some(cached) = self.rule_sect.get(pos) {
            return cached;
        }
        let result = self.parse_rule_sect();
        self.rule_sect.insert(pos, result.clone());
        result
    }

    fn parse_rule_sect(&mut self) -> Option<ParserNode> {
        let old_pos = self.p.pos();

        // ### rule_part ###
        let Some(rule_part) = self.memo_rule_part() else {
            self.p.set_pos(old_pos);
            return None;
        };

        // ### suffix? ###
        let suffix = self.memo_suffix();

        Some(ParserNode::new_nested(rule_part, suffix))
    }

    // *** rule_part ***

    fn memo_rule_part(&mut self) -> Option<ParserNode> {
        let pos = self.p.pos();
        if let Some(cached) = self.rule_part.get(pos) {
            return cached;
        }
        let result = self.parse_rule_part();
        self.rule_part.insert(pos, result.clone());
        result
    }

    fn parse_rule_part(&mut self) -> Option<ParserNode> {
        let old_pos = self.p.pos();

        // ### '(' rule_body ')' ### — parens don't survive into the AST.
        if let Some(sub) = self.memo_rule_part_sub1() {
            return Some(ParserNode::Alternatives(sub.body));
        }

        // ### RULE_NAME ###
        if let Some(tok) = self.p.try_match(RULE_NAME) {
            return Some(ParserNode::RuleRef(tok.data_or_empty().to_string()));
        }

        // ### TOKEN_NAME ###
        if let Some(tok) = self.p.try_match(TOKEN_NAME) {
            return Some(ParserNode::LexerRuleRef(tok.data_or_empty().to_string()));
        }

        // ### TOKEN_LIT ###
        let tok = self.p.match_or_rollback(TOKEN_LIT, old_pos)?;
        Some(ParserNode::TokenLiteral(tok))
    }

    // *** rule_part - '(' rule_body ')' ***

    fn memo_rule_part_sub1(&mut self) -> Option<RulePartSub1> {
        let pos = self.p.pos();
        if let Some(cached) = self.rule_part_sub1.get(pos) {
            return cached;
        }
        let result = self.parse_rule_part_sub1();
        self.rule_part_sub1.insert(pos, result.clone());
        result
    }

    fn parse_rule_part_sub1(&mut self) -> Option<RulePartSub1> {
        let old_pos = self.p.pos();

        // ### '(' ###
        self.p.match_or_rollback(LPAREN, old_pos)?;

        // ### rule_body ###
        let Some(body) = self.memo_rule_body() else {
            self.p.set_pos(old_pos);
            return None;
        };

        // ### ')' ###
        self.p.match_or_rollback(RPAREN, old_pos)?;

        Some(RulePartSub1 { body })
    }

    // *** suffix ***

    fn memo_suffix(&mut self) -> Option<Token> {
        let pos = self.p.pos();
        if let Some(cached) = self.suffix.get(pos) {
            return cached;
        }
        let result = self.parse_suffix();
        self.suffix.insert(pos, result.clone());
        result
    }

    fn parse_suffix(&mut self) -> Option<Token> {
        let old_pos = self.p.pos();

        // ### '+' ###
        if let Some(tok) = self.p.try_match(PLUS) {
            return Some(tok);
        }
        // ### '*' ###
        if let Some(tok) = self.p.try_match(STAR) {
            return Some(tok);
        }
        // ### '?' ###
        self.p.match_or_rollback(QUEST_MARK, old_pos)
    }
}
