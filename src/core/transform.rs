//! Post-parse restructuring
//!
//! A single post-order sweep over the finished tree. Description
//! environments collect the additional signature lines (`\funcline`,
//! `\methodline`, ...) found among their top-level content into
//! `additional`; the lines themselves stay in the content.
//!
//! The sweep appends, so it must run exactly once per tree. `DocParser::parse`
//! already runs it.

use crate::core::search::content_slice;
use crate::core::tree::{CommandKind, DescLine, Node, RootNode};

pub fn transform(root: &mut RootNode) {
    for child in root.walk_mut() {
        visit(child);
    }
}

fn visit(node: &mut Node) {
    for child in node.walk_mut() {
        visit(child);
    }
    if let Node::DescEnvironment(env) = node {
        let lines: Vec<DescLine> = content_slice(&env.content)
            .iter()
            .filter_map(|item| match item {
                Node::Command(cmd) if cmd.kind == CommandKind::DescLine => Some(DescLine {
                    name: cmd.name.clone(),
                    args: cmd.args.clone(),
                }),
                _ => None,
            })
            .collect();
        env.additional.extend(lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tree::{CommandNode, DescEnvironmentNode, NodeList};
    use pretty_assertions::assert_eq;

    fn desc(content: Node) -> Node {
        Node::DescEnvironment(DescEnvironmentNode {
            name: "funcdesc".to_string(),
            args: vec![Node::text("f"), Node::Empty],
            content: Box::new(content),
            additional: vec![],
        })
    }

    fn funcline(name: &str) -> Node {
        Node::Command(CommandNode::with_kind(
            CommandKind::DescLine,
            "funcline",
            vec![Node::text(name), Node::Empty],
        ))
    }

    #[test]
    fn test_collects_top_level_lines() {
        let content: NodeList = [funcline("g"), Node::text("Doc"), funcline("h")]
            .into_iter()
            .collect();
        let mut root = RootNode::new("t", [desc(Node::NodeList(content))].into_iter().collect());
        transform(&mut root);

        match &root.children.as_slice()[0] {
            Node::DescEnvironment(env) => {
                let names: Vec<&str> = env.additional.iter().map(|l| l.args[0].as_text().unwrap()).collect();
                assert_eq!(names, vec!["g", "h"]);
                assert_eq!(env.additional[0].name, "funcline");
                // the lines remain in the content
                assert!(matches!(&*env.content, Node::NodeList(list) if list.len() == 3));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_single_line_content_and_nesting() {
        let inner = desc(funcline("inner"));
        let outer = Node::command("wrapper", vec![inner]);
        let mut root = RootNode::new("t", [outer].into_iter().collect());
        transform(&mut root);

        match &root.children.as_slice()[0] {
            Node::Command(cmd) => match &cmd.args[0] {
                Node::DescEnvironment(env) => assert_eq!(env.additional.len(), 1),
                other => panic!("unexpected {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_nested_lines_are_not_collected() {
        let content = Node::command("wrapper", vec![funcline("deep")]);
        let mut root = RootNode::new("t", [desc(content)].into_iter().collect());
        transform(&mut root);
        match &root.children.as_slice()[0] {
            Node::DescEnvironment(env) => assert!(env.additional.is_empty()),
            other => panic!("unexpected {:?}", other),
        }
    }
}
