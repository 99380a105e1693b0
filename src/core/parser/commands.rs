//! Command handlers

use tracing::trace;

use super::DocParser;
use crate::core::config::{ArgSlot, CommandHandler, NodeShape};
use crate::core::tokens::TokenKind;
use crate::core::tree::{CommandKind, CommandNode, EnvironmentNode, IndexNode, Node, NodeList};
use crate::data::symbols::SIMPLE_TEXT;
use crate::utils::error::{ParseError, ParseResult};

impl<'c> DocParser<'c> {
    pub(crate) fn run_command(
        &mut self,
        name: &str,
        handler: &'c CommandHandler,
        line: usize,
    ) -> ParseResult<Node> {
        let display = format!("\\{}", name);
        match handler {
            CommandHandler::Generic { spec, shape } => {
                let args = self.parse_args(&display, spec.slots())?;
                Ok(build_generic(name, *shape, args))
            }
            CommandHandler::Sectioning => self.sectioning(name, &display),
            CommandHandler::Metadata { key } => {
                let value = self.single_arg(&display, ArgSlot::Mandatory)?;
                trace!(key, "metadata");
                self.params.insert((*key).to_string(), value);
                Ok(Node::Empty)
            }
            CommandHandler::Notice { kind } => {
                let content = self.single_arg(&display, ArgSlot::Mandatory)?;
                Ok(Node::Environment(EnvironmentNode {
                    name: "notice".to_string(),
                    args: vec![Node::text(*kind)],
                    content: Box::new(content),
                }))
            }
            CommandHandler::Contents => {
                let title = self.single_arg(&display, ArgSlot::Mandatory)?;
                Ok(Node::Toc(Box::new(title)))
            }
            CommandHandler::SkipConditional => {
                while let Some(tok) = self.tokens.pop() {
                    if tok.is_command("fi") {
                        return Ok(Node::Empty);
                    }
                }
                Err(ParseError::unexpected_end("while looking for \\fi", line))
            }
            CommandHandler::Cedilla => self.special_command('c', line),
            CommandHandler::Unwrap => self.single_arg(&display, ArgSlot::Mandatory),
            CommandHandler::Alias(target) => {
                let config = self.config;
                match config.command(target) {
                    Some(handler) => self.run_command(target, handler, line),
                    None => Err(ParseError::UnsupportedCommand {
                        name: (*target).to_string(),
                        line,
                    }),
                }
            }
            CommandHandler::Verb => self.verb(line),
            CommandHandler::StModIndex => {
                let module = self.single_arg(&display, ArgSlot::MandatoryText)?;
                Ok(Node::command(
                    "declaremodule",
                    vec![Node::Empty, Node::text("standard"), module],
                ))
            }
            CommandHandler::Begin => self.begin_environment(line),
        }
    }

    pub(crate) fn single_arg(&mut self, command: &str, slot: ArgSlot) -> ParseResult<Node> {
        let mut args = self.parse_args(command, &[slot])?;
        Ok(args.pop().unwrap_or(Node::Empty))
    }

    /// A heading directly followed by `\label{...}` absorbs the label
    fn sectioning(&mut self, name: &str, display: &str) -> ParseResult<Node> {
        let mut heading = self.single_arg(display, ArgSlot::Mandatory)?;

        while let Some(tok) = self.tokens.pop() {
            if tok.is_command("label") {
                let label = self.single_arg("\\label", ArgSlot::MandatoryText)?;
                let mut fused = NodeList::new();
                fused.append(heading);
                fused.append(Node::command("label", vec![label]));
                heading = Node::NodeList(fused);
                break;
            }
            if tok.is_blank_text() {
                continue;
            }
            self.tokens.push(tok);
            break;
        }

        Ok(Node::Sectioning(CommandNode::new(name, vec![heading])))
    }

    /// `\verb|...|`: delimiter, body, delimiter
    fn verb(&mut self, line: usize) -> ParseResult<Node> {
        let mut parts = self.tokens.pop_many(3);
        if parts.len() < 3 {
            return Err(ParseError::unexpected_end("in \\verb", line));
        }
        let body = parts.swap_remove(1);
        if body.kind != TokenKind::Text {
            return Err(ParseError::structural("\\verb: malformed body", body.line));
        }
        Ok(Node::inline("code", vec![Node::Text(body.raw)]))
    }
}

fn build_generic(name: &str, shape: NodeShape, args: Vec<Node>) -> Node {
    match shape {
        NodeShape::Command => Node::command(name, args),
        NodeShape::DescLine => Node::Command(CommandNode::with_kind(CommandKind::DescLine, name, args)),
        NodeShape::ExtLink => Node::Command(CommandNode::with_kind(CommandKind::ExtLink, name, args)),
        NodeShape::Inline => Node::inline(name, args),
        NodeShape::Index => Node::Index(IndexNode {
            name: name.to_string(),
            index_args: args,
        }),
        NodeShape::SimpleText => match SIMPLE_TEXT.get(name) {
            Some(text) => Node::SimpleCmd {
                name: name.to_string(),
                text: (*text).to_string(),
            },
            None => Node::Empty,
        },
        NodeShape::Ignore => Node::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ParserConfig;
    use crate::core::lexer::tokenize;
    use crate::core::tree::RootNode;
    use pretty_assertions::assert_eq;

    fn parse_with(input: &str, config: &ParserConfig) -> ParseResult<RootNode> {
        let mut parser = DocParser::new(tokenize(input)?, "test", config);
        parser.parse()
    }

    fn parse(input: &str) -> ParseResult<Node> {
        Ok(parse_with(input, &ParserConfig::new())?.children.flatten())
    }

    #[test]
    fn test_generic_shapes() {
        assert_eq!(
            parse("\\emph{x}").unwrap(),
            Node::inline("emph", vec![Node::text("x")])
        );
        assert_eq!(
            parse("\\indexii{a}{b}").unwrap(),
            Node::Index(IndexNode {
                name: "indexii".to_string(),
                index_args: vec![Node::text("a"), Node::text("b")],
            })
        );
        assert_eq!(
            parse("\\ldots").unwrap(),
            Node::SimpleCmd {
                name: "ldots".to_string(),
                text: "...".to_string()
            }
        );
        assert_eq!(parse("\\usepackage[utf8]{inputenc}").unwrap(), Node::Empty);
    }

    #[test]
    fn test_simple_text_merges_into_text() {
        assert_eq!(parse("a\\ldots{} b").unwrap(), Node::text("a... b"));
    }

    #[test]
    fn test_sectioning_fuses_label() {
        let node = parse("\\section{Intro}\n\\label{sec:Intro}").unwrap();
        let expected = Node::Sectioning(CommandNode::new(
            "section",
            vec![Node::NodeList(
                [
                    Node::text("Intro"),
                    Node::command("label", vec![Node::text("sec:Intro")]),
                ]
                .into_iter()
                .collect(),
            )],
        ));
        assert_eq!(node, expected);
    }

    #[test]
    fn test_sectioning_without_label() {
        let node = parse("\\section*{Intro}\nText").unwrap();
        assert_eq!(
            node,
            Node::NodeList(
                [
                    Node::Sectioning(CommandNode::new("section*", vec![Node::text("Intro")])),
                    Node::text("Text"),
                ]
                .into_iter()
                .collect()
            )
        );
    }

    #[test]
    fn test_metadata_last_write_wins() {
        let root = parse_with(
            "\\title{First}\\author{Me}\\title{Second}",
            &ParserConfig::new(),
        )
        .unwrap();
        assert!(root.children.is_empty());
        assert_eq!(root.param_text("title"), Some("Second"));
        assert_eq!(root.param_text("author"), Some("Me"));
    }

    #[test]
    fn test_notice_and_contents() {
        assert_eq!(
            parse("\\note{Careful}").unwrap(),
            Node::Environment(EnvironmentNode {
                name: "notice".to_string(),
                args: vec![Node::text("note")],
                content: Box::new(Node::text("Careful")),
            })
        );
        assert_eq!(
            parse("\\rstcontents{Contents}").unwrap(),
            Node::Toc(Box::new(Node::text("Contents")))
        );
    }

    #[test]
    fn test_conditional_is_skipped() {
        assert_eq!(parse("a \\ifx\\foo\\bar\\fi b").unwrap(), Node::text("a b"));
        assert!(parse("\\ifx never closed").is_err());
    }

    #[test]
    fn test_unwrap_and_alias() {
        assert_eq!(parse("\\mbox{boxed}").unwrap(), Node::text("boxed"));
        assert_eq!(
            parse("\\pytype{int}").unwrap(),
            Node::inline("class", vec![Node::text("int")])
        );
    }

    #[test]
    fn test_verb() {
        assert_eq!(
            parse("\\verb|a{b}|").unwrap(),
            Node::inline("code", vec![Node::text("a{b}")])
        );
    }

    #[test]
    fn test_stmodindex() {
        assert_eq!(
            parse("\\stmodindex{os}").unwrap(),
            Node::command(
                "declaremodule",
                vec![Node::Empty, Node::text("standard"), Node::text("os")]
            )
        );
    }

    #[test]
    fn test_extlink_and_desc_line_kinds() {
        let config = ParserConfig::new().with_extlink("issue", "https://bugs/%s", "issue ");
        let node = parse_with("\\issue{42}", &config).unwrap().children.flatten();
        assert_eq!(
            node,
            Node::Command(CommandNode::with_kind(
                CommandKind::ExtLink,
                "issue",
                vec![Node::text("42")]
            ))
        );
    }
}
