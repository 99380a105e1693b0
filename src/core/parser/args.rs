//! Argument-spec interpreter

use super::{DocParser, Until};
use crate::core::config::ArgSlot;
use crate::core::tokens::{Token, TokenKind};
use crate::core::tree::Node;
use crate::utils::error::{ParseError, ParseResult};

impl<'c> DocParser<'c> {
    /// Read one argument per slot.
    ///
    /// Comments and whitespace-only text before an argument are skipped. A
    /// missing optional argument yields `Node::Empty`; an ungrouped mandatory
    /// argument is the first character of the following text.
    pub(crate) fn parse_args(&mut self, command: &str, slots: &[ArgSlot]) -> ParseResult<Vec<Node>> {
        let mut args = Vec::with_capacity(slots.len());

        for (index, &slot) in slots.iter().enumerate() {
            let tok = match self.next_significant() {
                Some(tok) => tok,
                None if slot.is_optional() => {
                    args.push(Node::Empty);
                    continue;
                }
                None => {
                    return Err(ParseError::unexpected_end(
                        format!("while reading arguments of {}", command),
                        self.tokens.line(),
                    ))
                }
            };
            let line = tok.line;

            let arg = if slot.is_optional() {
                if tok.kind != TokenKind::BOptional {
                    self.tokens.push(tok);
                    args.push(Node::Empty);
                    continue;
                }
                self.parse_until(Until::OptionalEnd, false)?
            } else {
                match tok.kind {
                    TokenKind::BGroup => self.parse_until(Until::Eof, true)?,
                    TokenKind::Text => self.first_char_argument(&tok),
                    _ => {
                        return Err(ParseError::structural(
                            format!("{}: non-grouped non-text arguments not supported", command),
                            line,
                        ))
                    }
                }
            };

            if slot.is_text_only() && !arg.is_text_like() {
                return Err(ParseError::text_only(command, index, line));
            }
            args.push(arg);
        }

        Ok(args)
    }

    fn next_significant(&mut self) -> Option<Token> {
        while let Some(tok) = self.tokens.pop() {
            if tok.kind == TokenKind::Comment || tok.is_blank_text() {
                continue;
            }
            return Some(tok);
        }
        None
    }

    /// `\foo bar` passes `b` and leaves `ar` in the stream
    fn first_char_argument(&mut self, tok: &Token) -> Node {
        match tok.split_first_char() {
            Some((first, rest)) => {
                if let Some(rest) = rest {
                    self.tokens.push(rest);
                }
                Node::Text(first.to_string())
            }
            None => Node::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ParserConfig;
    use crate::core::lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn args_of(input: &str, slots: &[ArgSlot]) -> ParseResult<Vec<Node>> {
        let config = ParserConfig::new();
        let tokens = tokenize(input).unwrap();
        let mut parser = DocParser::new(tokens, "test", &config);
        parser.parse_args("\\test", slots)
    }

    #[test]
    fn test_grouped_and_optional() {
        let args = args_of("[opt]{body}", &[ArgSlot::Optional, ArgSlot::Mandatory]).unwrap();
        assert_eq!(args, vec![Node::text("opt"), Node::text("body")]);
    }

    #[test]
    fn test_missing_optional_is_empty() {
        let args = args_of(" {body}", &[ArgSlot::OptionalText, ArgSlot::Mandatory]).unwrap();
        assert_eq!(args, vec![Node::Empty, Node::text("body")]);
    }

    #[test]
    fn test_ungrouped_takes_first_char() {
        let config = ParserConfig::new();
        let tokens = tokenize("abc").unwrap();
        let mut parser = DocParser::new(tokens, "test", &config);
        let args = parser.parse_args("\\test", &[ArgSlot::Mandatory]).unwrap();
        assert_eq!(args, vec![Node::text("a")]);
        assert_eq!(parser.tokens.pop().map(|t| t.value), Some("bc".to_string()));
    }

    #[test]
    fn test_comments_are_skipped() {
        let args = args_of("% note\n{x}", &[ArgSlot::MandatoryText]).unwrap();
        assert_eq!(args, vec![Node::text("x")]);
    }

    #[test]
    fn test_text_only_violation_reports_index() {
        let err = args_of("{a}{\\emph{b}}", &[ArgSlot::Mandatory, ArgSlot::MandatoryText]).unwrap_err();
        assert_eq!(
            err,
            ParseError::ContentConstraint {
                command: "\\test".to_string(),
                index: 1,
                line: 1,
            }
        );
    }

    #[test]
    fn test_ungrouped_command_is_rejected() {
        let err = args_of("\\foo", &[ArgSlot::Mandatory]).unwrap_err();
        assert!(matches!(err, ParseError::Structural { .. }));
    }

    #[test]
    fn test_eof_in_mandatory_argument() {
        assert!(args_of("", &[ArgSlot::Mandatory]).is_err());
        assert_eq!(args_of("", &[ArgSlot::Optional]).unwrap(), vec![Node::Empty]);
    }
}
