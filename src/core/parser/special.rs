//! Single-character commands: escapes, accents and line breaks

use super::DocParser;
use crate::core::tokens::TokenKind;
use crate::core::tree::Node;
use crate::data::symbols::compose_accent;
use crate::utils::error::{ParseError, ParseResult};

impl<'c> DocParser<'c> {
    pub(crate) fn special_command(&mut self, c: char, line: usize) -> ParseResult<Node> {
        match c {
            '{' | '}' | '%' | '$' | '^' | '#' | '&' | '_' | ' ' => Ok(Node::Text(c.to_string())),
            '\'' | '`' | '~' | '"' | 'c' => self.accent(c, line),
            '\\' => Ok(Node::Break),
            _ => Err(ParseError::structural(format!("no handler for \\{} command", c), line)),
        }
    }

    /// `\"o`, `\"{o}` and `\"{}`
    ///
    /// Anything but text or a group after the accent leaves the bare accent
    /// character.
    fn accent(&mut self, accent: char, line: usize) -> ParseResult<Node> {
        let eof = || ParseError::unexpected_end(format!("after \\{}", accent), line);
        let tok = self.tokens.pop().ok_or_else(eof)?;

        match tok.kind {
            TokenKind::BGroup => {
                let inner = self.tokens.pop().ok_or_else(eof)?;
                if inner.kind == TokenKind::EGroup {
                    return Ok(Node::Text(accent.to_string()));
                }
                let letter = match inner.split_first_char() {
                    Some((letter, None)) if inner.kind == TokenKind::Text => letter,
                    _ => return Err(wrong_argtype(accent, inner.line)),
                };
                let close = self.tokens.pop().ok_or_else(eof)?;
                if close.kind != TokenKind::EGroup {
                    return Err(wrong_argtype(accent, close.line));
                }
                Ok(Node::Text(compose(accent, letter)))
            }
            TokenKind::Text => match tok.split_first_char() {
                Some((letter, rest)) => {
                    if let Some(rest) = rest {
                        self.tokens.push(rest);
                    }
                    Ok(Node::Text(compose(accent, letter)))
                }
                None => Ok(Node::Text(accent.to_string())),
            },
            _ => {
                self.tokens.push(tok);
                Ok(Node::Text(accent.to_string()))
            }
        }
    }
}

fn compose(accent: char, letter: char) -> String {
    compose_accent(accent, letter).unwrap_or_else(|| letter.to_string())
}

fn wrong_argtype(accent: char, line: usize) -> ParseError {
    ParseError::structural(format!("wrong argument type for \\{}", accent), line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ParserConfig;
    use crate::core::lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> ParseResult<Node> {
        let config = ParserConfig::new();
        let mut parser = DocParser::new(tokenize(input)?, "test", &config);
        Ok(parser.parse()?.children.flatten())
    }

    #[test]
    fn test_escapes_are_literal() {
        assert_eq!(parse("50\\% of \\$x").unwrap(), Node::text("50% of $x"));
        assert_eq!(parse("a\\_b\\#c\\&d").unwrap(), Node::text("a_b#c&d"));
    }

    #[test]
    fn test_accent_forms() {
        assert_eq!(parse("\\\"o").unwrap(), Node::text("ö"));
        assert_eq!(parse("\\\"{o}").unwrap(), Node::text("ö"));
        assert_eq!(parse("\\\"{}").unwrap(), Node::text("\""));
        assert_eq!(parse("\\'eaux").unwrap(), Node::text("éaux"));
        assert_eq!(parse("\\c{c}").unwrap(), Node::text("ç"));
    }

    #[test]
    fn test_accent_before_non_text() {
        // the bare accent and the following space run together as text
        assert_eq!(parse("\\~~").unwrap(), Node::text("~ "));
        assert_eq!(
            parse("\\'\\\\").unwrap(),
            Node::NodeList([Node::text("'"), Node::Break].into_iter().collect())
        );
    }

    #[test]
    fn test_accent_group_must_hold_one_letter() {
        assert!(parse("\\'{ab}").is_err());
        assert!(parse("\\'").is_err());
    }

    #[test]
    fn test_line_break() {
        let node = parse("a\\\\b").unwrap();
        assert_eq!(
            node,
            Node::NodeList([Node::text("a"), Node::Break, Node::text("b")].into_iter().collect())
        );
    }

    #[test]
    fn test_unknown_special() {
        let err = parse("\\@").unwrap_err();
        assert!(err.to_string().contains("no handler for \\@ command"));
    }
}
