//! Document diagnostics
//!
//! Parsing stops at the first fatal error, while unknown commands are only
//! collected. This module turns both into user-facing diagnostics:
//!
//! - a fatal `ParseError` becomes one error with its source line
//! - all unrecognized command names of a document become one aggregate warning
//!
//! ## Example
//!
//! ```rust
//! use ltxdoc::diagnostics::check_document;
//! use ltxdoc::ParserConfig;
//!
//! let result = check_document(r"\begin{quote}x", "doc.tex", &ParserConfig::new());
//! assert!(result.has_errors());
//! ```

use indexmap::IndexSet;
use std::fmt;

use crate::core::config::ParserConfig;
use crate::core::lexer::tokenize;
use crate::core::parser::DocParser;
use crate::utils::error::ParseError;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - the tree is complete but some input was skipped
    Warning,
    /// Error - the document could not be parsed
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    /// Source identifier, usually the file name
    pub source: Option<String>,
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            source: None,
            suggestion: None,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(err: &ParseError) -> Self {
        let diag = Diagnostic::new(DiagnosticLevel::Error, err.to_string());
        let diag = match err.line() {
            Some(line) => diag.with_line(line),
            None => diag,
        };
        match err {
            ParseError::UnsupportedCommand { .. } => {
                diag.with_suggestion("register a handler or parse in non-strict mode")
            }
            ParseError::UnsupportedEnvironment { .. } => {
                diag.with_suggestion("register the environment with ParserConfig::register_environment")
            }
            _ => diag,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: level: message
        //         --> source:line
        //         = help: suggestion

        write!(f, "{}: {}", self.level, self.message)?;

        match (&self.source, self.line) {
            (Some(source), Some(line)) => write!(f, "\n  --> {}:{}", source, line)?,
            (Some(source), None) => write!(f, "\n  --> {}", source)?,
            (None, Some(line)) => write!(f, "\n  --> line {}", line)?,
            (None, None) => {}
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// One warning listing every unrecognized command, if there were any
pub fn unrecognized_commands_report(names: &IndexSet<String>) -> Option<Diagnostic> {
    if names.is_empty() {
        return None;
    }
    let listed: Vec<String> = names.iter().map(|name| format!("\\{}", name)).collect();
    Some(
        Diagnostic::new(
            DiagnosticLevel::Warning,
            format!(
                "the following commands are not recognized and were ignored: {}",
                listed.join(", ")
            ),
        )
        .with_suggestion("register handlers for them in the parser configuration"),
    )
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    pub diagnostics: Vec<Diagnostic>,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        for (count, noun) in [
            (self.errors, "error"),
            (self.warnings, "warning"),
            (self.infos, "note"),
        ] {
            if count > 0 {
                parts.push(format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" }));
            }
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Parse a document and report what went wrong, without keeping the tree
pub fn check_document(input: &str, source: &str, config: &ParserConfig) -> CheckResult {
    let mut result = CheckResult::new();

    let tokens = match tokenize(input) {
        Ok(tokens) => tokens,
        Err(err) => {
            result.add(Diagnostic::from(&err).with_source(source));
            return result;
        }
    };

    let mut parser = DocParser::new(tokens, source, config);
    match parser.parse() {
        Ok(_) => {
            for diag in parser.finish() {
                result.add(diag.with_source(source));
            }
        }
        Err(err) => result.add(Diagnostic::from(&err).with_source(source)),
    }

    result
}

/// Render diagnostics followed by a summary line
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    if use_color {
        if result.has_errors() {
            output.push_str("\x1b[31m");
        } else if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}
