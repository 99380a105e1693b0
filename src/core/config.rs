//! Parser configuration
//!
//! The command and environment tables are expanded once from the static
//! declarations in `data::commands` into handler descriptors. Callers may add
//! extension links, killer commands and further generic commands before
//! handing the configuration to a parser.

use fxhash::FxHashMap;
use indexmap::{IndexMap, IndexSet};

use crate::core::tree::{FloatKind, ListKind};
use crate::data::commands::{
    DEFAULT_KILLER_COMMANDS, DESC_ENVIRONMENTS, DESC_LINE_COMMANDS, FIXED_TABLES,
    IGNORED_COMMANDS, INDEX_COMMANDS, INLINE_COMMANDS, MATH_ENVIRONMENTS, METADATA_COMMANDS,
    PLAIN_COMMANDS, PLAIN_ENVIRONMENTS, SECTIONING_COMMANDS, TRANSPARENT_ENVIRONMENTS,
};
use crate::data::symbols::SIMPLE_TEXT;
use crate::utils::error::{ParseError, ParseResult};

/// One declared argument slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgSlot {
    /// `M`: brace group
    Mandatory,
    /// `T`: brace group with text-only content
    MandatoryText,
    /// `O`: optional bracket group
    Optional,
    /// `Q`: optional bracket group with text-only content
    OptionalText,
}

impl ArgSlot {
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'M' => Some(ArgSlot::Mandatory),
            'T' => Some(ArgSlot::MandatoryText),
            'O' => Some(ArgSlot::Optional),
            'Q' => Some(ArgSlot::OptionalText),
            _ => None,
        }
    }

    pub fn is_optional(self) -> bool {
        matches!(self, ArgSlot::Optional | ArgSlot::OptionalText)
    }

    pub fn is_text_only(self) -> bool {
        matches!(self, ArgSlot::MandatoryText | ArgSlot::OptionalText)
    }
}

/// Parsed argument spec, e.g. `QTM`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgSpec {
    slots: Vec<ArgSlot>,
}

impl ArgSpec {
    pub fn parse(name: &str, code: &str) -> ParseResult<Self> {
        let slots = code
            .chars()
            .map(|c| {
                ArgSlot::from_code(c).ok_or_else(|| ParseError::InvalidArgSpec {
                    name: name.to_string(),
                    spec: code.to_string(),
                    slot: c,
                })
            })
            .collect::<ParseResult<Vec<_>>>()?;
        Ok(ArgSpec { slots })
    }

    /// Spec from the built-in tables, which are covered by tests
    fn builtin(code: &'static str) -> Self {
        ArgSpec {
            slots: code.chars().filter_map(ArgSlot::from_code).collect(),
        }
    }

    pub fn slots(&self) -> &[ArgSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Node produced by a generic command handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    Command,
    DescLine,
    Inline,
    Index,
    ExtLink,
    /// Fixed text from `SIMPLE_TEXT`
    SimpleText,
    /// Arguments are consumed, nothing is produced
    Ignore,
}

/// How a command name is handled
#[derive(Debug, Clone, PartialEq)]
pub enum CommandHandler {
    Generic { spec: ArgSpec, shape: NodeShape },
    Sectioning,
    /// Store the argument in the document metadata under `key`
    Metadata { key: &'static str },
    /// `\note{...}`, `\warning{...}`
    Notice { kind: &'static str },
    /// `\rstcontents{title}`
    Contents,
    /// `\ifx ... \fi` is skipped
    SkipConditional,
    /// `\c` cedilla accent
    Cedilla,
    /// Returns its single argument unwrapped
    Unwrap,
    /// Handled exactly like another command
    Alias(&'static str),
    Verb,
    StModIndex,
    Begin,
}

/// How an environment name is handled
#[derive(Debug, Clone, PartialEq)]
pub enum EnvironmentHandler {
    Generic { spec: ArgSpec, description: bool },
    Transparent,
    Verbatim,
    RstVerbatim,
    Listing,
    Alltt,
    Math,
    List(ListKind),
    Definitions,
    FixedTable { suffix: &'static str, columns: usize },
    Tabular,
    Float(FloatKind),
    ProductionList,
}

/// External link registration: `(pattern, prefix)` metadata for the writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtLink {
    pub pattern: String,
    pub prefix: String,
}

/// Parser configuration
#[derive(Debug, Clone)]
pub struct ParserConfig {
    commands: FxHashMap<String, CommandHandler>,
    environments: FxHashMap<String, EnvironmentHandler>,
    extlinks: IndexMap<String, ExtLink>,
    killers: IndexSet<String>,

    /// Non-strict mode: unknown commands are recorded and skipped.
    /// Default: true
    pub non_strict: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        let mut commands = FxHashMap::default();

        let generic_tables = [
            (&PLAIN_COMMANDS, NodeShape::Command),
            (&DESC_LINE_COMMANDS, NodeShape::DescLine),
            (&INLINE_COMMANDS, NodeShape::Inline),
            (&INDEX_COMMANDS, NodeShape::Index),
            (&IGNORED_COMMANDS, NodeShape::Ignore),
        ];
        for (table, shape) in generic_tables {
            for (name, code) in table.entries() {
                commands.insert(
                    name.to_string(),
                    CommandHandler::Generic {
                        spec: ArgSpec::builtin(*code),
                        shape,
                    },
                );
            }
        }
        for name in SIMPLE_TEXT.keys() {
            commands.insert(
                name.to_string(),
                CommandHandler::Generic {
                    spec: ArgSpec::default(),
                    shape: NodeShape::SimpleText,
                },
            );
        }
        for name in SECTIONING_COMMANDS {
            commands.insert(name.to_string(), CommandHandler::Sectioning);
        }
        for (name, key) in METADATA_COMMANDS.entries() {
            commands.insert(name.to_string(), CommandHandler::Metadata { key: *key });
        }

        let special = [
            ("note", CommandHandler::Notice { kind: "note" }),
            ("warning", CommandHandler::Notice { kind: "warning" }),
            ("rstcontents", CommandHandler::Contents),
            ("ifx", CommandHandler::SkipConditional),
            ("c", CommandHandler::Cedilla),
            ("mbox", CommandHandler::Unwrap),
            ("leftline", CommandHandler::Unwrap),
            ("Large", CommandHandler::Unwrap),
            ("pytype", CommandHandler::Alias("class")),
            ("nodename", CommandHandler::Alias("label")),
            ("verb", CommandHandler::Verb),
            ("stmodindex", CommandHandler::StModIndex),
            ("begin", CommandHandler::Begin),
        ];
        for (name, handler) in special {
            commands.insert(name.to_string(), handler);
        }

        let mut environments = FxHashMap::default();
        for (name, code) in PLAIN_ENVIRONMENTS.entries() {
            environments.insert(
                name.to_string(),
                EnvironmentHandler::Generic {
                    spec: ArgSpec::builtin(*code),
                    description: false,
                },
            );
        }
        for (name, code) in DESC_ENVIRONMENTS.entries() {
            environments.insert(
                name.to_string(),
                EnvironmentHandler::Generic {
                    spec: ArgSpec::builtin(*code),
                    description: true,
                },
            );
        }
        for name in TRANSPARENT_ENVIRONMENTS {
            environments.insert(name.to_string(), EnvironmentHandler::Transparent);
        }
        for name in MATH_ENVIRONMENTS {
            environments.insert(name.to_string(), EnvironmentHandler::Math);
        }
        for (suffix, columns) in FIXED_TABLES {
            let handler = EnvironmentHandler::FixedTable {
                suffix: *suffix,
                columns: *columns,
            };
            environments.insert(format!("table{}", suffix), handler.clone());
            environments.insert(format!("longtable{}", suffix), handler);
        }

        let special = [
            ("verbatim", EnvironmentHandler::Verbatim),
            ("rstverbatim", EnvironmentHandler::RstVerbatim),
            ("lstlisting", EnvironmentHandler::Listing),
            ("alltt", EnvironmentHandler::Alltt),
            ("itemize", EnvironmentHandler::List(ListKind::Itemize)),
            ("enumerate", EnvironmentHandler::List(ListKind::Enumerate)),
            ("description", EnvironmentHandler::List(ListKind::Description)),
            ("definitions", EnvironmentHandler::Definitions),
            ("tabular", EnvironmentHandler::Tabular),
            ("longtable", EnvironmentHandler::Tabular),
            ("figure", EnvironmentHandler::Float(FloatKind::Figure)),
            ("table", EnvironmentHandler::Float(FloatKind::Table)),
            ("productionlist", EnvironmentHandler::ProductionList),
        ];
        for (name, handler) in special {
            environments.insert(name.to_string(), handler);
        }

        Self {
            commands,
            environments,
            extlinks: IndexMap::new(),
            killers: DEFAULT_KILLER_COMMANDS.iter().map(|s| s.to_string()).collect(),
            non_strict: true,
        }
    }
}

impl ParserConfig {
    /// Create a configuration with the built-in tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict mode configuration (errors on unknown commands)
    pub fn strict() -> Self {
        Self {
            non_strict: false,
            ..Self::default()
        }
    }

    /// Register an external link command taking one mandatory argument
    pub fn with_extlink(
        mut self,
        name: impl Into<String>,
        pattern: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        let name = name.into();
        self.commands.insert(
            name.clone(),
            CommandHandler::Generic {
                spec: ArgSpec {
                    slots: vec![ArgSlot::Mandatory],
                },
                shape: NodeShape::ExtLink,
            },
        );
        self.extlinks.insert(
            name,
            ExtLink {
                pattern: pattern.into(),
                prefix: prefix.into(),
            },
        );
        self
    }

    /// Treat `name` as fatal when it has no handler
    pub fn with_killer(mut self, name: impl Into<String>) -> Self {
        self.killers.insert(name.into());
        self
    }

    /// Register a generic command, replacing any existing handler
    pub fn register_command(&mut self, name: &str, spec: &str, shape: NodeShape) -> ParseResult<()> {
        let spec = ArgSpec::parse(name, spec)?;
        self.commands
            .insert(name.to_string(), CommandHandler::Generic { spec, shape });
        Ok(())
    }

    /// Register a generic (or description) environment
    pub fn register_environment(&mut self, name: &str, spec: &str, description: bool) -> ParseResult<()> {
        let spec = ArgSpec::parse(name, spec)?;
        self.environments
            .insert(name.to_string(), EnvironmentHandler::Generic { spec, description });
        Ok(())
    }

    pub fn command(&self, name: &str) -> Option<&CommandHandler> {
        self.commands.get(name)
    }

    pub fn environment(&self, name: &str) -> Option<&EnvironmentHandler> {
        self.environments.get(name)
    }

    pub fn is_killer(&self, name: &str) -> bool {
        self.killers.contains(name)
    }

    pub fn extlinks(&self) -> &IndexMap<String, ExtLink> {
        &self.extlinks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_argspecs_are_valid() {
        let tables = [
            &PLAIN_COMMANDS,
            &DESC_LINE_COMMANDS,
            &INLINE_COMMANDS,
            &INDEX_COMMANDS,
            &IGNORED_COMMANDS,
            &PLAIN_ENVIRONMENTS,
            &DESC_ENVIRONMENTS,
        ];
        for table in tables {
            for (name, code) in table.entries() {
                let spec = ArgSpec::parse(name, code).unwrap();
                assert_eq!(spec.len(), code.len(), "{}", name);
            }
        }
    }

    #[test]
    fn test_argspec_rejects_unknown_slot() {
        let err = ArgSpec::parse("foo", "MX").unwrap_err();
        assert!(matches!(err, ParseError::InvalidArgSpec { slot: 'X', .. }));
    }

    #[test]
    fn test_default_tables() {
        let config = ParserConfig::new();
        assert_eq!(config.command("section"), Some(&CommandHandler::Sectioning));
        assert!(matches!(
            config.command("ldots"),
            Some(CommandHandler::Generic {
                shape: NodeShape::SimpleText,
                ..
            })
        ));
        assert_eq!(
            config.environment("longtableiii"),
            Some(&EnvironmentHandler::FixedTable {
                suffix: "iii",
                columns: 3
            })
        );
        assert!(config.is_killer("em"));
        assert!(config.non_strict);
        assert!(!ParserConfig::strict().non_strict);
    }

    #[test]
    fn test_extlink_registration() {
        let config = ParserConfig::new().with_extlink("issue", "https://example.org/%s", "#");
        assert_eq!(config.extlinks()["issue"].prefix, "#");
        match config.command("issue") {
            Some(CommandHandler::Generic { spec, shape }) => {
                assert_eq!(*shape, NodeShape::ExtLink);
                assert_eq!(spec.slots(), &[ArgSlot::Mandatory]);
            }
            other => panic!("unexpected handler {:?}", other),
        }
    }

    #[test]
    fn test_register_command_validates_spec() {
        let mut config = ParserConfig::new();
        assert!(config.register_command("xyz", "TZ", NodeShape::Inline).is_err());
        config.register_command("xyz", "TM", NodeShape::Inline).unwrap();
        assert!(config.command("xyz").is_some());
    }
}
