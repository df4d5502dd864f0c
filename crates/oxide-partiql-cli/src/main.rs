//! partiql-parse CLI
//!
//! Parses one PartiQL statement and prints its AST.

use std::collections::BTreeMap;
use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser as ClapParser, ValueEnum};
use serde::Serialize;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use oxide_partiql_core::config::DEFAULT_MAX_DEPTH;
use oxide_partiql_core::parser::PropertyValue;
use oxide_partiql_core::{DialectKind, Lexer, ParseError, Parser, ParserConfig, Statement, ToSexpr};

/// Print the AST of a PartiQL statement.
#[derive(ClapParser)]
#[command(name = "partiql-parse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Statement to parse (read from stdin if omitted).
    query: Option<String>,

    /// Grammar target.
    #[arg(short, long, env = "PARTIQL_DIALECT", default_value_t = DialectKind::Extended)]
    dialect: DialectKind,

    /// Maximum nesting depth.
    #[arg(long, env = "PARTIQL_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Indent the S-expression output.
    #[arg(short, long)]
    pretty: bool,

    /// Print the token stream instead of the AST.
    #[arg(long)]
    tokens: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Sexp)]
    format: Format,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Sexp,
    Json,
}

#[derive(Serialize)]
struct StatementReport {
    kind: &'static str,
    line: u32,
    column: u32,
    length: usize,
    ast: String,
}

#[derive(Serialize)]
struct ErrorReport {
    code: &'static str,
    message: String,
    properties: BTreeMap<&'static str, serde_json::Value>,
}

impl From<&ParseError> for ErrorReport {
    fn from(err: &ParseError) -> Self {
        let properties = err
            .properties()
            .into_iter()
            .map(|(property, value)| {
                let value = match value {
                    PropertyValue::Integer(n) => serde_json::Value::from(n),
                    PropertyValue::String(s) => serde_json::Value::from(s),
                };
                (property.as_str(), value)
            })
            .collect();
        Self {
            code: err.code.as_str(),
            message: err.to_string(),
            properties,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let source = match cli.query {
        Some(ref query) => query.clone(),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read statement from stdin")?;
            buffer
        }
    };

    let config = ParserConfig::new()
        .with_dialect(cli.dialect)
        .with_max_depth(cli.max_depth);
    debug!(dialect = %config.dialect, max_depth = config.max_depth, "configured");

    let result = if cli.tokens {
        print_tokens(&source, cli.format)
    } else {
        Parser::with_config(&source, config)
            .parse_statement()
            .map(|stmt| print_statement(&stmt, &cli))
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            match cli.format {
                Format::Sexp => eprintln!("{err}"),
                Format::Json => {
                    let report = ErrorReport::from(&err);
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_statement(stmt: &Statement, cli: &Cli) {
    let sexpr = stmt.to_sexpr();
    let ast = if cli.pretty {
        sexpr.pretty()
    } else {
        sexpr.render()
    };

    match cli.format {
        Format::Sexp => println!("{ast}"),
        Format::Json => {
            let report = StatementReport {
                kind: stmt.kind.name(),
                line: stmt.location.line,
                column: stmt.location.column,
                length: stmt.location.length,
                ast,
            };
            // Serializing plain strings and integers cannot fail.
            if let Ok(json) = serde_json::to_string_pretty(&report) {
                println!("{json}");
            }
        }
    }
}

fn print_tokens(source: &str, format: Format) -> Result<(), ParseError> {
    let tokens = Lexer::new(source).tokenize()?;
    for token in &tokens {
        match format {
            Format::Sexp => println!(
                "{}:{}\t{}\t{}",
                token.line,
                token.column,
                token.kind.description(),
                token.text
            ),
            Format::Json => println!(
                "{}",
                serde_json::json!({
                    "line": token.line,
                    "column": token.column,
                    "description": token.kind.description(),
                    "text": token.text,
                })
            ),
        }
    }
    Ok(())
}
