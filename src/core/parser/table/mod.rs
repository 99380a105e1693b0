//! Table parsing
//!
//! Two families of tables are recognized:
//! - fixed-arity tables (`tableii` ... `longtablev`), whose rows are
//!   `\lineii{..}{..}`-style commands and whose headings are environment
//!   arguments
//! - free-form `tabular`/`longtable`, whose rows are split on `\\` and `&`
//!
//! Both produce a `Node::Tabular`. Free-form rows whose cell count does not
//! match the column spec are dropped; the first remaining row is the heading.

mod colspec;
mod parser;


pub use colspec::{count_columns, split_cells};
