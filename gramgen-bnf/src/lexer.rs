//! Tokenizer for the grammar language.

use crate::{Result, SourceContext, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    /// `=`
    Eq,
    /// `::=`
    Define,
    Pipe,
    Star,
    Plus,
    Question,
    Semi,
    Ident,
    /// Quoted literal; the token text includes the quotes.
    Str,
}

impl TokenKind {
    /// The brace character for brace tokens.
    pub(crate) fn brace_char(self) -> Option<char> {
        match self {
            TokenKind::LBrace => Some('{'),
            TokenKind::RBrace => Some('}'),
            TokenKind::LParen => Some('('),
            TokenKind::RParen => Some(')'),
            TokenKind::LBracket => Some('['),
            TokenKind::RBracket => Some(']'),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Span,
}

impl Token<'_> {
    /// Human-readable description for error messages.
    pub(crate) fn describe(&self) -> String {
        match self.kind {
            TokenKind::Ident => format!("identifier '{}'", self.text),
            TokenKind::Str => format!("literal {}", self.text),
            _ => format!("'{}'", self.text),
        }
    }
}

pub(crate) fn tokenize<'src>(src: &'src str, ctx: &SourceContext) -> Result<Vec<Token<'src>>> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let start = pos;
        let c = bytes[pos];

        if c.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        if src[pos..].starts_with("//") {
            pos = src[pos..].find('\n').map_or(bytes.len(), |n| pos + n);
            continue;
        }

        if src[pos..].starts_with("/*") {
            match src[pos + 2..].find("*/") {
                Some(n) => pos += n + 4,
                None => return Err(ctx.unterminated_comment(start..start + 2)),
            }
            continue;
        }

        if src[pos..].starts_with("::=") {
            pos += 3;
            tokens.push(Token {
                kind: TokenKind::Define,
                text: &src[start..pos],
                span: start..pos,
            });
            continue;
        }

        let single = match c {
            b'{' => Some(TokenKind::LBrace),
            b'}' => Some(TokenKind::RBrace),
            b'(' => Some(TokenKind::LParen),
            b')' => Some(TokenKind::RParen),
            b'[' => Some(TokenKind::LBracket),
            b']' => Some(TokenKind::RBracket),
            b'=' => Some(TokenKind::Eq),
            b'|' => Some(TokenKind::Pipe),
            b'*' => Some(TokenKind::Star),
            b'+' => Some(TokenKind::Plus),
            b'?' => Some(TokenKind::Question),
            b';' => Some(TokenKind::Semi),
            _ => None,
        };
        if let Some(kind) = single {
            pos += 1;
            tokens.push(Token {
                kind,
                text: &src[start..pos],
                span: start..pos,
            });
            continue;
        }

        if c == b'"' || c == b'\'' {
            pos += 1;
            loop {
                match bytes.get(pos) {
                    None | Some(b'\n') => return Err(ctx.unterminated_string(start..start + 1)),
                    Some(b'\\') => pos += 2,
                    Some(&q) if q == c => {
                        pos += 1;
                        break;
                    }
                    Some(_) => pos += 1,
                }
            }
            tokens.push(Token {
                kind: TokenKind::Str,
                text: &src[start..pos],
                span: start..pos,
            });
            continue;
        }

        if c.is_ascii_alphabetic() || c == b'_' {
            while bytes
                .get(pos)
                .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
            {
                pos += 1;
            }
            tokens.push(Token {
                kind: TokenKind::Ident,
                text: &src[start..pos],
                span: start..pos,
            });
            continue;
        }

        let ch = src[pos..].chars().next().unwrap_or('\u{fffd}');
        return Err(ctx.unexpected_char(ch, start..start + ch.len_utf8()));
    }

    Ok(tokens)
}

/// Strip the quotes from a literal token and resolve simple escapes.
pub(crate) fn unquote(text: &str) -> String {
    let inner = &text[1..text.len().saturating_sub(1).max(1)];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let ctx = SourceContext::new(src, "test.bnf");
        tokenize(src, &ctx)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_rule() {
        assert_eq!(
            kinds("root ::= item* ';'"),
            vec![
                TokenKind::Ident,
                TokenKind::Define,
                TokenKind::Ident,
                TokenKind::Star,
                TokenKind::Str,
            ]
        );
    }

    #[test]
    fn test_tokenize_skips_comments() {
        assert_eq!(
            kinds("// header\nroot /* inline */ ::= A"),
            vec![TokenKind::Ident, TokenKind::Define, TokenKind::Ident]
        );
    }

    #[test]
    fn test_tokenize_attributes() {
        assert_eq!(
            kinds(r#"{ parserClass = "demo::Parser" }"#),
            vec![
                TokenKind::LBrace,
                TokenKind::Ident,
                TokenKind::Eq,
                TokenKind::Str,
                TokenKind::RBrace,
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let src = "a ::= 'oops";
        let ctx = SourceContext::new(src, "test.bnf");
        let err = tokenize(src, &ctx).unwrap_err();
        assert!(matches!(*err, Error::UnterminatedString { .. }));
    }

    #[test]
    fn test_unterminated_comment() {
        let src = "a ::= b /* never closed";
        let ctx = SourceContext::new(src, "test.bnf");
        let err = tokenize(src, &ctx).unwrap_err();
        assert!(matches!(*err, Error::UnterminatedComment { .. }));
    }

    #[test]
    fn test_unexpected_char() {
        let src = "a ::= b @";
        let ctx = SourceContext::new(src, "test.bnf");
        let err = tokenize(src, &ctx).unwrap_err();
        assert!(matches!(*err, Error::UnexpectedChar { ch: '@', .. }));
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("'{'"), "{");
        assert_eq!(unquote(r#""a\"b""#), "a\"b");
        assert_eq!(unquote(r"'\n'"), "\n");
        assert_eq!(unquote("''"), "");
    }
}
