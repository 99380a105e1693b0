use tracing::debug;

use super::colspec::{count_columns, split_cells};
use crate::core::config::ArgSlot;
use crate::core::parser::{DocParser, Stop, Until};
use crate::core::tokens::TokenKind;
use crate::core::tree::{Node, TabularNode};
use crate::utils::error::{ParseError, ParseResult};

impl<'c> DocParser<'c> {
    /// `\begin{tableii}{colspec}{format}{head 1}{head 2}` with `\lineii` rows
    pub(crate) fn fixed_table(
        &mut self,
        name: &str,
        suffix: &str,
        columns: usize,
        line: usize,
    ) -> ParseResult<Node> {
        let mut slots = vec![ArgSlot::MandatoryText, ArgSlot::MandatoryText];
        slots.extend(std::iter::repeat(ArgSlot::Mandatory).take(columns));
        let mut args = self.parse_args(name, &slots)?;
        let headings = args.split_off(2);
        let format = args[1].as_text().unwrap_or_default().to_string();
        let colspec = args[0].as_text().map(str::to_string);

        let row_command = format!("line{}", suffix);
        let row_display = format!("\\{}", row_command);
        let row_slots = vec![ArgSlot::Mandatory; columns];
        let mut rows = Vec::new();
        loop {
            let tok = self
                .tokens
                .pop()
                .ok_or_else(|| ParseError::unexpected_end(format!("in {} environment", name), line))?;
            if tok.kind != TokenKind::Command {
                continue;
            }
            if tok.value == row_command {
                rows.push(self.parse_args(&row_display, &row_slots)?);
            } else if tok.value == "end" {
                self.finish_environment(name, tok.line)?;
                break;
            }
        }

        // the first column is typeset with the table's format command
        for row in rows.iter_mut() {
            if let Some(first) = row.first_mut() {
                if !first.is_empty_node() {
                    let cell = std::mem::replace(first, Node::Empty);
                    *first = Node::inline(format.clone(), vec![cell]);
                }
            }
        }

        Ok(Node::Tabular(TabularNode {
            columns,
            headings,
            rows,
            colspec,
        }))
    }

    /// Free-form `tabular` and `longtable`
    pub(crate) fn tabular(&mut self, name: &str, line: usize) -> ParseResult<Node> {
        let colspec = self.raw_group(name, line)?;
        let columns = count_columns(&colspec);

        let mut accepted = Vec::new();
        loop {
            let (row, stop) = self.parse_nodes(Until::RowOrEnd(name), false)?;
            let cells = split_cells(row);
            if cells.len() == columns {
                accepted.push(cells);
            } else {
                debug!(
                    environment = name,
                    expected = columns,
                    found = cells.len(),
                    "dropping table row"
                );
            }
            if stop == Stop::EnvironmentEnd {
                break;
            }
        }

        if accepted.is_empty() {
            return Err(ParseError::TableShape {
                colspec,
                columns,
                line,
            });
        }
        let headings = accepted.remove(0);

        Ok(Node::Tabular(TabularNode {
            columns,
            headings,
            rows: accepted,
            colspec: Some(colspec),
        }))
    }

    /// Source text of the next brace group, without the outer braces
    fn raw_group(&mut self, name: &str, line: usize) -> ParseResult<String> {
        let eof = || ParseError::unexpected_end(format!("in {} column spec", name), line);

        let open = loop {
            let tok = self.tokens.pop().ok_or_else(eof)?;
            if tok.kind != TokenKind::Comment && !tok.is_blank_text() {
                break tok;
            }
        };
        if open.kind != TokenKind::BGroup {
            return Err(ParseError::structural(
                format!("{}: column spec must be a brace group", name),
                open.line,
            ));
        }

        let mut raw = String::new();
        let mut depth = 1usize;
        loop {
            let tok = self.tokens.pop().ok_or_else(eof)?;
            match tok.kind {
                TokenKind::BGroup => depth += 1,
                TokenKind::EGroup => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(raw);
                    }
                }
                _ => {}
            }
            raw.push_str(&tok.raw);
        }
    }
}
