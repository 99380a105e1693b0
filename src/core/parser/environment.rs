//! Environment handlers
//!
//! `\begin{name}` is looked up in the environment table; every handler
//! consumes its environment up to and including the matching `\end{name}`.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::{DocParser, Stop, Until};
use crate::core::config::{ArgSlot, ArgSpec, EnvironmentHandler};
use crate::core::search::{content_slice, descendants_of, find_caption_node_in, find_label_in};
use crate::core::tokens::TokenKind;
use crate::core::tree::{
    DescEnvironmentNode, EnvironmentNode, FloatKind, FloatNode, FloatOptions, ListItem, ListKind,
    ListNode, ListingNode, MathNode, Node, NodeKind, NodeList,
};
use crate::utils::error::{ParseError, ParseResult};

lazy_static! {
    static ref MATH_LABEL: Regex = Regex::new(r"\\label\{(\S*)\}").unwrap();
}

/// Label used for display math without `\label`
const DEFAULT_MATH_LABEL: &str = "dummy";

impl<'c> DocParser<'c> {
    pub(crate) fn begin_environment(&mut self, line: usize) -> ParseResult<Node> {
        let name = self.single_arg("\\begin", ArgSlot::MandatoryText)?;
        let name = name.as_text().unwrap_or_default().to_string();

        let config = self.config;
        let handler = config
            .environment(&name)
            .ok_or_else(|| ParseError::UnsupportedEnvironment {
                name: name.clone(),
                line: self.tokens.next_line(),
            })?;
        debug!(environment = %name, line, "begin");

        match handler {
            EnvironmentHandler::Generic { spec, description } => {
                self.generic_environment(&name, spec, *description)
            }
            EnvironmentHandler::Transparent => self.parse_until(Until::EnvironmentEnd(&name), false),
            EnvironmentHandler::Verbatim => {
                let text = self.capture_raw(&name, line)?;
                Ok(Node::Verbatim(Box::new(Node::Text(text))))
            }
            EnvironmentHandler::RstVerbatim => {
                let text = self.capture_raw(&name, line)?;
                Ok(Node::RstVerbatim(Box::new(Node::Text(text))))
            }
            EnvironmentHandler::Listing => {
                let args = self.parse_args("lstlisting", &[ArgSlot::Optional])?;
                let text = self.capture_raw(&name, line)?;
                Ok(Node::Listing(ListingNode {
                    content: Box::new(Node::Text(text)),
                    args,
                }))
            }
            EnvironmentHandler::Alltt => self.alltt(&name, line),
            EnvironmentHandler::Math => self.display_math(&name, line),
            EnvironmentHandler::List(kind) => {
                self.list_environment(&name, *kind, "item", ArgSlot::Optional)
            }
            EnvironmentHandler::Definitions => {
                self.list_environment(&name, ListKind::Definitions, "term", ArgSlot::Mandatory)
            }
            EnvironmentHandler::FixedTable { suffix, columns } => {
                self.fixed_table(&name, suffix, *columns, line)
            }
            EnvironmentHandler::Tabular => self.tabular(&name, line),
            EnvironmentHandler::Float(kind) => self.float_environment(&name, *kind),
            EnvironmentHandler::ProductionList => self.production_list(&name, line),
        }
    }

    fn generic_environment(&mut self, name: &str, spec: &ArgSpec, description: bool) -> ParseResult<Node> {
        let args = self.parse_args(name, spec.slots())?;
        let content = Box::new(self.parse_until(Until::EnvironmentEnd(name), false)?);
        let node = if description {
            Node::DescEnvironment(DescEnvironmentNode {
                name: name.to_string(),
                args,
                content,
                additional: Vec::new(),
            })
        } else {
            Node::Environment(EnvironmentNode {
                name: name.to_string(),
                args,
                content,
            })
        };
        Ok(node)
    }

    /// Whether the next three tokens are `{name}`
    fn closes(&self, name: &str) -> bool {
        match self.tokens.peek_many(3).as_slice() {
            [open, text, close] => {
                open.kind == TokenKind::BGroup
                    && text.kind == TokenKind::Text
                    && text.value == name
                    && close.kind == TokenKind::EGroup
            }
            _ => false,
        }
    }

    /// Raw source text up to `\end{name}`, which is consumed
    fn capture_raw(&mut self, name: &str, line: usize) -> ParseResult<String> {
        let mut text = String::new();
        loop {
            let tok = self
                .tokens
                .pop()
                .ok_or_else(|| ParseError::unexpected_end(format!("in {} environment", name), line))?;
            if tok.is_command("end") && self.closes(name) {
                self.tokens.pop_many(3);
                return Ok(text);
            }
            text.push_str(&tok.raw);
        }
    }

    /// Literal text where commands are still interpreted
    fn alltt(&mut self, name: &str, line: usize) -> ParseResult<Node> {
        let mut nodes = NodeList::new();
        loop {
            let tok = self
                .tokens
                .pop()
                .ok_or_else(|| ParseError::unexpected_end(format!("in {} environment", name), line))?;
            match tok.kind {
                TokenKind::Command if tok.value == "end" => {
                    self.finish_environment(name, tok.line)?;
                    break;
                }
                TokenKind::Command => {
                    let mut chars = tok.value.chars();
                    let node = match (chars.next(), chars.next()) {
                        (Some(c), None) if !c.is_alphabetic() => self.special_command(c, tok.line)?,
                        _ => {
                            let config = self.config;
                            match config.command(&tok.value) {
                                Some(handler) => self.run_command(&tok.value, handler, tok.line)?,
                                None => {
                                    return Err(ParseError::structural(
                                        format!("no handler for \\{} command", tok.value),
                                        tok.line,
                                    ))
                                }
                            }
                        }
                    };
                    nodes.append(node);
                }
                TokenKind::Comment => nodes.append(Node::Comment(tok.value)),
                _ => nodes.append(Node::Text(tok.raw)),
            }
        }
        Ok(Node::Verbatim(Box::new(nodes.flatten())))
    }

    /// Display math is kept as raw source, one text node per line
    fn display_math(&mut self, name: &str, line: usize) -> ParseResult<Node> {
        let mut raw = format!("\\begin{{{}}}", name);
        let mut depth = 0usize;
        loop {
            let tok = self
                .tokens
                .pop()
                .ok_or_else(|| ParseError::unexpected_end(format!("in {} environment", name), line))?;
            if depth == 0 && tok.is_command("end") && self.closes(name) {
                raw.push_str(&tok.raw);
                for closing in self.tokens.pop_many(3) {
                    raw.push_str(&closing.raw);
                }
                break;
            }
            match tok.kind {
                TokenKind::BGroup => depth += 1,
                TokenKind::EGroup => depth = depth.saturating_sub(1),
                _ => {}
            }
            raw.push_str(&tok.raw);
        }

        let label = MATH_LABEL
            .captures(&raw)
            .and_then(|caps| caps.get(1))
            .map_or(DEFAULT_MATH_LABEL, |m| m.as_str())
            .to_string();
        let content = raw.split('\n').map(Node::text).collect();
        Ok(Node::Math(MathNode {
            content,
            label: Some(label),
            raw: Some(raw),
        }))
    }

    /// Items start at `\<marker>`; anything before the first marker is dropped
    fn list_environment(
        &mut self,
        name: &str,
        kind: ListKind,
        marker: &str,
        label_slot: ArgSlot,
    ) -> ParseResult<Node> {
        let until = Until::ItemOrEnd { env: name, marker };
        let (_, mut stop) = self.parse_nodes(until, false)?;

        let mut items = Vec::new();
        let display = format!("\\{}", marker);
        while stop == Stop::Marker {
            let label = self.single_arg(&display, label_slot)?;
            let (content, next) = self.parse_nodes(until, false)?;
            items.push(ListItem {
                label,
                content: content.flatten(),
            });
            stop = next;
        }

        Ok(Node::List(ListNode::new(kind, items)))
    }

    fn float_environment(&mut self, name: &str, kind: FloatKind) -> ParseResult<Node> {
        let args = self.parse_args(name, &[ArgSlot::OptionalText])?;
        let content = self.parse_until(Until::EnvironmentEnd(name), false)?;

        let scope = content_slice(&content);
        let mut options = FloatOptions {
            label: find_label_in(scope),
            caption: find_caption_node_in(scope).cloned().map(Box::new),
            ..FloatOptions::default()
        };
        if kind == FloatKind::Figure {
            options.listing = descendants_of(scope)
                .find(|node| node.kind() == NodeKind::Listing)
                .cloned()
                .map(Box::new);
            let centered = scope
                .iter()
                .any(|node| matches!(node, Node::Command(cmd) if cmd.name == "centering"));
            if centered {
                options.align = Some("center".to_string());
            }
        }

        Ok(Node::Float(FloatNode {
            kind,
            name: name.to_string(),
            args,
            content: Box::new(content),
            options,
        }))
    }

    /// Grammar productions; other content is dropped
    fn production_list(&mut self, name: &str, line: usize) -> ParseResult<Node> {
        let group = self.single_arg(name, ArgSlot::OptionalText)?;
        let mut items = Vec::new();
        loop {
            let tok = self
                .tokens
                .pop()
                .ok_or_else(|| ParseError::unexpected_end(format!("in {} environment", name), line))?;
            if tok.kind != TokenKind::Command {
                continue;
            }
            match tok.value.as_str() {
                "production" => {
                    let mut args = self
                        .parse_args("\\production", &[ArgSlot::MandatoryText, ArgSlot::Mandatory])?
                        .into_iter();
                    items.push(ListItem {
                        label: args.next().unwrap_or(Node::Empty),
                        content: args.next().unwrap_or(Node::Empty),
                    });
                }
                "productioncont" => {
                    let content = self.single_arg("\\productioncont", ArgSlot::Mandatory)?;
                    items.push(ListItem {
                        label: Node::Empty,
                        content,
                    });
                }
                "end" => {
                    self.finish_environment(name, tok.line)?;
                    break;
                }
                _ => {}
            }
        }

        let mut list = ListNode::new(ListKind::ProductionList, items);
        list.group = Some(Box::new(group));
        Ok(Node::List(list))
    }
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
    fn test_plain_environment() {
        assert_eq!(
            parse("\\begin{quote}Hi\\end{quote}").unwrap(),
            Node::Environment(EnvironmentNode {
                name: "quote".to_string(),
                args: vec![],
                content: Box::new(Node::text("Hi")),
            })
        );
    }

    #[test]
    fn test_transparent_environment() {
        assert_eq!(
            parse("\\begin{document}Body\\end{document}").unwrap(),
            Node::text("Body")
        );
    }

    #[test]
    fn test_mismatched_end() {
        let err = parse("\\begin{quote}x\\end{center}").unwrap_err();
        assert!(err.to_string().contains("expected \\end{quote}"));
    }

    #[test]
    fn test_unknown_environment() {
        let err = parse("\\begin{frobnicate}x\\end{frobnicate}").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedEnvironment { ref name, .. } if name == "frobnicate"));
    }

    #[test]
    fn test_verbatim_is_raw() {
        let node = parse("\\begin{verbatim}\n\\foo{ bar }% x\n\\end{verbatim}").unwrap();
        assert_eq!(node, Node::Verbatim(Box::new(Node::text("\n\\foo{ bar }% x\n"))));
    }

    #[test]
    fn test_verbatim_ignores_other_ends() {
        let node = parse("\\begin{verbatim}\\end{quote}\\end{verbatim}").unwrap();
        assert_eq!(node, Node::Verbatim(Box::new(Node::text("\\end{quote}"))));
    }

    #[test]
    fn test_verbatim_ignores_closer_in_group() {
        let node = parse("\\begin{verbatim}a\\end{{verbatim}}b\\end{verbatim}").unwrap();
        assert_eq!(node, Node::Verbatim(Box::new(Node::text("a\\end{{verbatim}}b"))));
    }

    #[test]
    fn test_unclosed_group_in_environment() {
        let err = parse("\\begin{quote}{a\\end{quote}").unwrap_err();
        assert!(matches!(err, ParseError::Structural { line: 1, .. }));
    }

    #[test]
    fn test_unterminated_verbatim() {
        assert!(parse("\\begin{verbatim}never ends").is_err());
    }

    #[test]
    fn test_listing_with_options() {
        let node = parse("\\begin{lstlisting}[language=C]\nint x;\n\\end{lstlisting}").unwrap();
        assert_eq!(
            node,
            Node::Listing(ListingNode {
                content: Box::new(Node::text("\nint x;\n")),
                args: vec![Node::text("language=C")],
            })
        );
    }

    #[test]
    fn test_alltt_interprets_commands() {
        let node = parse("\\begin{alltt}a \\emph{b}\\end{alltt}").unwrap();
        assert_eq!(
            node,
            Node::Verbatim(Box::new(Node::NodeList(
                [Node::text("a "), Node::inline("emph", vec![Node::text("b")])]
                    .into_iter()
                    .collect()
            )))
        );
    }

    #[test]
    fn test_display_math() {
        let node = parse("\\begin{equation}\n{x}^2\n\\label{eq:sq}\n\\end{equation}").unwrap();
        match node {
            Node::Math(math) => {
                assert_eq!(math.label.as_deref(), Some("eq:sq"));
                assert_eq!(
                    math.raw.as_deref(),
                    Some("\\begin{equation}\n{x}^2\n\\label{eq:sq}\n\\end{equation}")
                );
                assert_eq!(math.content.len(), 4);
                assert_eq!(math.content[1], Node::text("{x}^2"));
            }
            other => panic!("expected math, got {:?}", other),
        }
    }

    #[test]
    fn test_display_math_default_label() {
        match parse("\\begin{displaymath}x\\end{displaymath}").unwrap() {
            Node::Math(math) => assert_eq!(math.label.as_deref(), Some("dummy")),
            other => panic!("expected math, got {:?}", other),
        }
    }

    #[test]
    fn test_itemize_drops_preamble() {
        let node = parse("\\begin{itemize}junk\\item one\\item[b] two\\end{itemize}").unwrap();
        assert_eq!(
            node,
            Node::List(ListNode::new(
                ListKind::Itemize,
                vec![
                    ListItem {
                        label: Node::Empty,
                        content: Node::text("one"),
                    },
                    ListItem {
                        label: Node::text("b"),
                        content: Node::text(" two"),
                    },
                ]
            ))
        );
    }

    #[test]
    fn test_definitions_use_term() {
        let node = parse("\\begin{definitions}\\term{a}x\\end{definitions}").unwrap();
        match node {
            Node::List(list) => {
                assert_eq!(list.kind, ListKind::Definitions);
                assert_eq!(list.items[0].label, Node::text("a"));
                assert_eq!(list.items[0].content, Node::text("x"));
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_lists() {
        let node = parse(
            "\\begin{itemize}\\item a\\begin{enumerate}\\item b\\end{enumerate}\\item c\\end{itemize}",
        )
        .unwrap();
        match node {
            Node::List(list) => {
                assert_eq!(list.items.len(), 2);
                assert_eq!(list.items[1].content, Node::text("c"));
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_figure_options() {
        let input = "\\begin{figure}[h]\\centering\n\\caption{A Plot}\\label{Fig:Plot}\\end{figure}";
        match parse(input).unwrap() {
            Node::Float(float) => {
                assert_eq!(float.kind, FloatKind::Figure);
                assert_eq!(float.args, vec![Node::text("h")]);
                assert_eq!(float.options.label.as_deref(), Some("fig:plot"));
                assert_eq!(float.options.align.as_deref(), Some("center"));
                assert_eq!(
                    float.options.caption.as_deref(),
                    Some(&Node::command("caption", vec![Node::Empty, Node::text("A Plot")]))
                );
                assert_eq!(float.options.listing, None);
            }
            other => panic!("expected float, got {:?}", other),
        }
    }

    #[test]
    fn test_table_float_has_no_align() {
        let input = "\\begin{table}\\centering\\caption{T}\\end{table}";
        match parse(input).unwrap() {
            Node::Float(float) => {
                assert_eq!(float.kind, FloatKind::Table);
                assert_eq!(float.options.align, None);
                assert_eq!(float.options.label, None);
            }
            other => panic!("expected float, got {:?}", other),
        }
    }

    #[test]
    fn test_production_list() {
        let input = "\\begin{productionlist}[grammar]\n\\production{expr}{term}\n\\productioncont{| term}\n\\end{productionlist}";
        match parse(input).unwrap() {
            Node::List(list) => {
                assert_eq!(list.kind, ListKind::ProductionList);
                assert_eq!(list.group.as_deref(), Some(&Node::text("grammar")));
                assert_eq!(list.items.len(), 2);
                assert_eq!(list.items[0].label, Node::text("expr"));
                assert_eq!(list.items[1].label, Node::Empty);
                assert_eq!(list.items[1].content, Node::text("| term"));
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_description_environment() {
        let node = parse("\\begin{funcdesc}{spam}{a, b}Does spam.\\end{funcdesc}").unwrap();
        match node {
            Node::DescEnvironment(env) => {
                assert_eq!(env.args, vec![Node::text("spam"), Node::text("a, b")]);
                assert_eq!(*env.content, Node::text("Does spam."));
            }
            other => panic!("expected description environment, got {:?}", other),
        }
    }
}
