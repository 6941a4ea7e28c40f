//! Implementations of `dlc`'s four subcommands.
//!
//! Each command reads the whole source file up front — there is no
//! incremental or streaming mode (spec.md §6 "Persisted state: None. The
//! compiler is a pure file-to-stdout filter.") — and prints to stdout;
//! lex/parse/semantic errors are returned to `main` rather than printed
//! here, so the CLI controls the exit code in one place.

mod dump;
mod render;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{CliError, Result};

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.display().to_string(),
        source,
    })
}

/// `dlc source FILE`: dump the raw file text unchanged.
pub fn run_source(path: &Path) -> Result<()> {
    let source = read_source(path)?;
    debug!(bytes = source.len(), "read source");
    print!("{source}");
    Ok(())
}

/// `dlc lex FILE` (the default command): tokenize and print one token per
/// line as `LINE:COLUMN KIND`.
pub fn run_lex(path: &Path) -> Result<()> {
    let source = read_source(path)?;
    let tokens = dlc_lex::Lexer::lex_all(&source)?;
    debug!(count = tokens.len(), "lexed token stream");
    for token in &tokens {
        println!("{} {}", token.span, token.kind);
    }
    Ok(())
}

/// `dlc parse FILE`: parse and dump the raw AST verbatim (diagnostic only,
/// not bit-exact — spec.md §6 "Debug serialization").
pub fn run_parse(path: &Path) -> Result<()> {
    let source = read_source(path)?;
    let ast = dlc_par::parse(&source)?;
    debug!("parsed top-level block");
    println!("{}", dump::dump_ast(&ast));
    Ok(())
}

/// `dlc pp FILE`: parse, annotate, and re-render the AST as indented
/// pseudo-source (spec.md §6 "Debug serialization"; operator rendering
/// grounded in `original_source/di_prettyprint.c`'s `is_binop` table).
pub fn run_pp(path: &Path) -> Result<()> {
    let source = read_source(path)?;
    let ast = dlc_par::parse(&source)?;
    let annotations = dlc_sem::annotate(&ast)?;
    debug!(warnings = annotations.warnings().len(), "annotated AST");
    for warning in annotations.warnings() {
        println!("warning: {warning}");
    }
    println!("{}", render::render(&ast));
    Ok(())
}
