//! Command-line entry point: render a JSON-described grammar as GBNF.
//!
//! ```text
//! bramble [--simplify] [--verbose] <path>
//! ```
//!
//! When the root expression is a derivation rule, every rule nested beneath it
//! is validated and printed, one per line. Any other expression is printed as
//! a single line.
#![allow(clippy::multiple_crate_versions)]

use std::process::ExitCode;

use bramble::{parse_expr, validate, GrammarError, RuleSet};
use facet::Facet;
use tracing::{debug, Level};

#[derive(Debug, Facet)]
struct Args {
    /// JSON file describing the grammar.
    #[facet(positional)]
    path: String,

    /// Simplify before rendering.
    #[facet(named, short = 's', default)]
    simplify: bool,

    /// Log progress to stderr.
    #[facet(named, short = 'v', default)]
    verbose: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid arguments: {0}")]
    Args(String),
    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error("validation failed: {0}")]
    Validation(#[from] bramble::ValidationError),
}

fn run(args: &Args) -> Result<String, CliError> {
    let json = std::fs::read_to_string(&args.path).map_err(|source| CliError::Read {
        path: args.path.clone(),
        source,
    })?;
    let grammar = parse_expr(&json)?;
    debug!(path = %args.path, depth = grammar.depth(), "parsed grammar");

    if grammar.as_rule().is_some() {
        let mut rules = RuleSet::collect(&grammar);
        validate(&rules)?;
        if args.simplify {
            rules = rules.simplify();
        }
        debug!(rules = rules.len(), "rendering rule set");
        return Ok(rules.render()?);
    }

    let grammar = if args.simplify {
        grammar.simplify()
    } else {
        Some(grammar)
    };
    let line = match grammar {
        Some(g) => g.render()?,
        None => None,
    };
    Ok(line.map(|l| l + "\n").unwrap_or_default())
}

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let refs: Vec<&str> = argv.iter().map(String::as_str).collect();
    let args: Args = match facet_args::from_slice(&refs) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", CliError::Args(e.to_string()));
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .init();

    match run(&args) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
