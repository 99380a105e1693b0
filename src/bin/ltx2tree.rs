//! ltx2tree CLI - parse documentation LaTeX and print the document tree

use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

use ltxdoc::{
    diagnostics::{check_document, format_diagnostics, CheckResult, Diagnostic},
    parse_document_with_config, ParsedDocument, ParserConfig,
};

#[derive(Parser)]
#[command(name = "ltx2tree")]
#[command(version)]
#[command(about = "Parse documentation LaTeX into a document tree", long_about = None)]
struct Cli {
    /// Input files (reads from stdin if none are given)
    inputs: Vec<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Pretty print JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Strict mode: unknown commands are errors
    #[arg(long)]
    strict: bool,

    /// Register an external link command as `name|pattern|prefix`
    #[arg(long, value_name = "NAME|PATTERN|PREFIX")]
    extlink: Vec<String>,

    /// Treat a command as fatal when it has no handler
    #[arg(long, value_name = "NAME")]
    killer: Vec<String>,

    /// Check mode - report problems without printing the tree
    #[arg(long)]
    check: bool,

    /// Disable colored output (for check mode)
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// JSON serialization of the tree
    Json,
    /// Rust debug representation
    Debug,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {}", message);
            std::process::exit(2);
        }
    };

    let sources = read_inputs(&cli.inputs)?;

    if cli.check {
        let mut total = CheckResult::new();
        for (name, input) in &sources {
            for diag in check_document(input, name, &config).diagnostics {
                total.add(diag);
            }
        }
        println!("{}", format_diagnostics(&total, !cli.no_color));
        if total.has_errors() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let mut documents = Vec::new();
    let mut failed = false;
    for (name, input) in &sources {
        match parse_document_with_config(input, name, &config) {
            Ok(doc) => {
                for diag in doc.diagnostics() {
                    warn!(source = %name, "{}", diag.message);
                }
                documents.push(doc);
            }
            Err(err) => {
                eprintln!("{}", Diagnostic::from(&err).with_source(name.as_str()));
                failed = true;
                if !err.is_document_local() {
                    error!("configuration error, giving up");
                    std::process::exit(2);
                }
                debug!(source = %name, "skipping document");
            }
        }
    }

    let rendered = render(&documents, cli.format, cli.pretty)?;
    match cli.output {
        Some(ref path) => {
            fs::write(path, rendered)?;
            eprintln!("✓ Output written to: {}", path);
        }
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(rendered.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_config(cli: &Cli) -> Result<ParserConfig, String> {
    let mut config = if cli.strict {
        ParserConfig::strict()
    } else {
        ParserConfig::new()
    };
    for spec in &cli.extlink {
        let mut parts = spec.splitn(3, '|');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(pattern), Some(prefix)) if !name.is_empty() => {
                config = config.with_extlink(name, pattern, prefix);
            }
            _ => return Err(format!("invalid --extlink {:?}, expected NAME|PATTERN|PREFIX", spec)),
        }
    }
    for name in &cli.killer {
        config = config.with_killer(name.as_str());
    }
    Ok(config)
}

fn read_inputs(paths: &[String]) -> io::Result<Vec<(String, String)>> {
    if paths.is_empty() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(vec![("<stdin>".to_string(), buffer)]);
    }
    paths
        .iter()
        .map(|path| Ok((path.clone(), fs::read_to_string(path)?)))
        .collect()
}

fn render(documents: &[ParsedDocument], format: Format, pretty: bool) -> io::Result<String> {
    match format {
        Format::Debug => Ok(documents
            .iter()
            .map(|doc| {
                if pretty {
                    format!("{:#?}", doc.root)
                } else {
                    format!("{:?}", doc.root)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")),
        Format::Json => {
            let values: Vec<serde_json::Value> = documents
                .iter()
                .map(|doc| {
                    serde_json::json!({
                        "root": doc.root,
                        "unrecognized": doc.unrecognized,
                    })
                })
                .collect();
            let value = match <[serde_json::Value; 1]>::try_from(values) {
                Ok([single]) => single,
                Err(values) => serde_json::Value::Array(values),
            };
            let text = if pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };
            text.map_err(io::Error::other)
        }
    }
}
