//! Recursive-descent parser for the grammar language.

use indexmap::IndexMap;

use crate::{
    AstFactory, BraceMatcher, Expr, GrammarFile, Result, Rule, SourceContext, Span,
    lexer::{Token, TokenKind, unquote},
};

/// Verify that every brace in the token stream is balanced.
pub(crate) fn check_braces(
    tokens: &[Token<'_>],
    matcher: &dyn BraceMatcher,
    ctx: &SourceContext,
) -> Result<()> {
    let mut stack: Vec<(char, Span)> = Vec::new();

    for token in tokens {
        let Some(c) = token.kind.brace_char() else {
            continue;
        };
        if matcher.closing_for(c).is_some() {
            stack.push((c, token.span.clone()));
        } else if matcher.is_closing(c) {
            match stack.pop() {
                None => return Err(ctx.unmatched_brace(c, token.span.clone())),
                Some((open, open_span)) if matcher.closing_for(open) != Some(c) => {
                    return Err(ctx.mismatched_brace(open, open_span, c, token.span.clone()));
                }
                Some(_) => {}
            }
        }
    }

    match stack.pop() {
        Some((open, span)) => Err(ctx.unclosed_brace(open, span)),
        None => Ok(()),
    }
}

/// Named tokens are written in upper case (`STRING`, `NUMBER_2`).
fn is_token_name(name: &str) -> bool {
    name.chars().any(|c| c.is_ascii_alphabetic()) && !name.chars().any(|c| c.is_ascii_lowercase())
}

pub(crate) struct Parser<'a, 'src> {
    tokens: &'a [Token<'src>],
    pos: usize,
    ctx: &'a SourceContext,
    factory: &'a dyn AstFactory,
}

impl<'a, 'src> Parser<'a, 'src> {
    pub(crate) fn new(
        tokens: &'a [Token<'src>],
        ctx: &'a SourceContext,
        factory: &'a dyn AstFactory,
    ) -> Self {
        Self {
            tokens,
            pos: 0,
            ctx,
            factory,
        }
    }

    pub(crate) fn parse_file(mut self, name: String) -> Result<GrammarFile> {
        let mut attributes = IndexMap::new();
        let mut rules = Vec::new();

        while let Some(kind) = self.peek_kind() {
            match kind {
                TokenKind::LBrace => self.parse_attributes(&mut attributes)?,
                TokenKind::Semi => self.pos += 1,
                _ => rules.push(self.parse_rule()?),
            }
        }

        Ok(self.factory.create_file(name, attributes, rules))
    }

    fn parse_attributes(&mut self, attributes: &mut IndexMap<String, String>) -> Result<()> {
        self.expect(TokenKind::LBrace, "'{'")?;
        loop {
            let token = self.bump("attribute name or '}'")?;
            match token.kind {
                TokenKind::RBrace => return Ok(()),
                TokenKind::Semi => continue,
                TokenKind::Ident => {
                    let key = token.text.to_string();
                    self.expect(TokenKind::Eq, "'='")?;
                    let value = self.bump("attribute value")?;
                    let value = match value.kind {
                        TokenKind::Str => unquote(value.text),
                        TokenKind::Ident => value.text.to_string(),
                        _ => return Err(self.unexpected(&value, "attribute value")),
                    };
                    attributes.insert(key, value);
                }
                _ => return Err(self.unexpected(&token, "attribute name or '}'")),
            }
        }
    }

    fn parse_rule(&mut self) -> Result<Rule> {
        let start = self.peek().map_or(0, |t| t.span.start);

        let private = self.peek().is_some_and(|t| t.text == "private")
            && self.peek_at(1).is_some_and(|t| t.kind == TokenKind::Ident);
        if private {
            self.pos += 1;
        }

        let name = self.expect(TokenKind::Ident, "rule name")?;
        self.expect(TokenKind::Define, "'::='")?;
        let expr = self.parse_choice()?;
        let end = self.tokens[self.pos - 1].span.end;

        if self.peek().is_some_and(|t| t.kind == TokenKind::Semi) {
            self.pos += 1;
        }

        Ok(self
            .factory
            .create_rule(name.text.to_string(), private, expr, start..end))
    }

    fn parse_choice(&mut self) -> Result<Expr> {
        let mut alternatives = vec![self.parse_sequence()?];
        while self.peek().is_some_and(|t| t.kind == TokenKind::Pipe) {
            self.pos += 1;
            alternatives.push(self.parse_sequence()?);
        }

        if alternatives.len() == 1 {
            Ok(alternatives.swap_remove(0))
        } else {
            Ok(Expr::Choice(alternatives))
        }
    }

    fn parse_sequence(&mut self) -> Result<Expr> {
        let mut items = Vec::new();
        while let Some(kind) = self.peek_kind() {
            if self.at_rule_start() {
                break;
            }
            match kind {
                TokenKind::Ident | TokenKind::Str | TokenKind::LParen | TokenKind::LBracket => {
                    items.push(self.parse_postfix()?)
                }
                _ => break,
            }
        }

        if items.len() == 1 {
            Ok(items.swap_remove(0))
        } else {
            Ok(Expr::Sequence(items))
        }
    }

    fn parse_postfix(&mut self) -> Result<Expr> {
        let mut expr = self.parse_primary()?;
        while let Some(kind) = self.peek_kind() {
            expr = match kind {
                TokenKind::Star => Expr::ZeroOrMore(Box::new(expr)),
                TokenKind::Plus => Expr::OneOrMore(Box::new(expr)),
                TokenKind::Question => Expr::Optional(Box::new(expr)),
                _ => break,
            };
            self.pos += 1;
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let token = self.bump("expression")?;
        match token.kind {
            TokenKind::Ident if is_token_name(token.text) => Ok(Expr::Token(token.text.to_string())),
            TokenKind::Ident => Ok(Expr::Reference(token.text.to_string())),
            TokenKind::Str => Ok(Expr::Literal(unquote(token.text))),
            TokenKind::LParen => {
                let inner = self.parse_choice()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::LBracket => {
                let inner = self.parse_choice()?;
                self.expect(TokenKind::RBracket, "']'")?;
                Ok(Expr::Optional(Box::new(inner)))
            }
            _ => Err(self.unexpected(&token, "expression")),
        }
    }

    /// `name ::=` or `private name ::=` starts the next rule.
    fn at_rule_start(&self) -> bool {
        let is = |offset: usize, kind: TokenKind| {
            self.peek_at(offset).is_some_and(|t| t.kind == kind)
        };
        if is(0, TokenKind::Ident) && is(1, TokenKind::Define) {
            return true;
        }
        self.peek().is_some_and(|t| t.text == "private")
            && is(1, TokenKind::Ident)
            && is(2, TokenKind::Define)
    }

    fn peek(&self) -> Option<&Token<'src>> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token<'src>> {
        self.tokens.get(self.pos + offset)
    }

    fn bump(&mut self, expected: &str) -> Result<Token<'src>> {
        match self.tokens.get(self.pos) {
            Some(token) => {
                self.pos += 1;
                Ok(token.clone())
            }
            None => Err(self.eof(expected)),
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token<'src>> {
        let token = self.bump(expected)?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(self.unexpected(&token, expected))
        }
    }

    fn unexpected(&self, token: &Token<'_>, expected: &str) -> Box<crate::Error> {
        self.ctx
            .syntax_error(token.describe(), expected, token.span.clone())
    }

    fn eof(&self, expected: &str) -> Box<crate::Error> {
        let end = self.ctx.src().len();
        self.ctx.syntax_error("end of file", expected, end..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BnfAstFactory, BnfBraceMatcher, Error, lexer::tokenize};

    fn parse(src: &str) -> Result<GrammarFile> {
        let ctx = SourceContext::new(src, "test.bnf");
        let tokens = tokenize(src, &ctx)?;
        check_braces(&tokens, &BnfBraceMatcher, &ctx)?;
        Parser::new(&tokens, &ctx, &BnfAstFactory).parse_file("test.bnf".to_string())
    }

    #[test]
    fn test_parse_empty() {
        let grammar = parse("").unwrap();
        assert!(grammar.rules.is_empty());
        assert!(grammar.attributes.is_empty());
        assert_eq!(grammar.name, "test.bnf");
    }

    #[test]
    fn test_parse_attributes() {
        let grammar = parse(
            r#"{
                parserClass = "demo::JsonParser"
                generateDir = gen;
            }"#,
        )
        .unwrap();

        assert_eq!(grammar.attribute("parserClass"), Some("demo::JsonParser"));
        assert_eq!(grammar.attribute("generateDir"), Some("gen"));
    }

    #[test]
    fn test_parse_rules_without_separators() {
        let grammar = parse(
            "root ::= value*\n\
             value ::= STRING | NUMBER | array\n\
             private array ::= '[' value (',' value)* ']'",
        )
        .unwrap();

        let names: Vec<_> = grammar.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["root", "value", "array"]);
        assert!(grammar.rule("array").unwrap().private);
        assert!(!grammar.rule("value").unwrap().private);
    }

    #[test]
    fn test_parse_expression_shapes() {
        let grammar = parse("item ::= KEY [ '=' value ] tail? rest+ ;").unwrap();
        let rule = grammar.rule("item").unwrap();

        assert_eq!(
            rule.expr,
            Expr::Sequence(vec![
                Expr::Token("KEY".into()),
                Expr::Optional(Box::new(Expr::Sequence(vec![
                    Expr::Literal("=".into()),
                    Expr::Reference("value".into()),
                ]))),
                Expr::Optional(Box::new(Expr::Reference("tail".into()))),
                Expr::OneOrMore(Box::new(Expr::Reference("rest".into()))),
            ])
        );
    }

    #[test]
    fn test_parse_choice() {
        let grammar = parse("a ::= b | C | 'd'").unwrap();
        assert_eq!(
            grammar.rule("a").unwrap().expr,
            Expr::Choice(vec![
                Expr::Reference("b".into()),
                Expr::Token("C".into()),
                Expr::Literal("d".into()),
            ])
        );
    }

    #[test]
    fn test_rule_named_private() {
        let grammar = parse("private ::= A").unwrap();
        let rule = grammar.rule("private").unwrap();
        assert!(!rule.private);
    }

    #[test]
    fn test_rule_span_covers_body() {
        let src = "root ::= A B;";
        let grammar = parse(src).unwrap();
        let span = grammar.rule("root").unwrap().span.clone();
        assert_eq!(&src[span], "root ::= A B");
    }

    #[test]
    fn test_missing_define() {
        let err = parse("root A").unwrap_err();
        assert!(matches!(*err, Error::Syntax { ref expected, .. } if expected == "'::='"));
    }

    #[test]
    fn test_unexpected_eof() {
        let err = parse("root").unwrap_err();
        assert!(matches!(*err, Error::Syntax { ref found, .. } if found == "end of file"));
    }

    #[test]
    fn test_unclosed_brace() {
        let err = parse("root ::= (A B").unwrap_err();
        assert!(matches!(*err, Error::UnclosedBrace { open: '(', .. }));
    }

    #[test]
    fn test_unmatched_brace() {
        let err = parse("root ::= A )").unwrap_err();
        assert!(matches!(*err, Error::UnmatchedBrace { close: ')', .. }));
    }

    #[test]
    fn test_mismatched_brace() {
        let err = parse("root ::= [A )").unwrap_err();
        assert!(matches!(
            *err,
            Error::MismatchedBrace {
                open: '[',
                close: ')',
                ..
            }
        ));
    }
}
