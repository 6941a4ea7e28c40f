//! `dlc` — lex, parse, and annotate source files for a small,
//! layout-sensitive expression language.
//!
//! `dlc [COMMAND] FILE` with commands `source`, `lex`, `parse`, `pp`;
//! `lex` runs when no command is given (spec.md §6 "CLI"). The pipeline
//! halts at the first lex/parse/semantic error — there is no recovery
//! (spec.md §1 Non-goals) — so each command runs at most one pass past
//! where the error occurred.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use error::CliError;

#[derive(Parser, Debug)]
#[command(name = "dlc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lexer, parser, and lifetime annotator for a small expression language")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug-level tracing of each pass's progress.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the file's raw source text.
    Source(FileArgs),
    /// Tokenize the file and print its token stream.
    Lex(FileArgs),
    /// Parse the file and dump the raw AST.
    Parse(FileArgs),
    /// Parse, annotate, and re-render the file as pseudo-source.
    Pp(FileArgs),
}

#[derive(Parser, Debug)]
struct FileArgs {
    /// Source file to process.
    file: PathBuf,
}

/// The subcommand names `normalize_args` recognizes; anything else in that
/// position is treated as a `FILE` argument to the implicit default `lex`.
const COMMAND_NAMES: &[&str] = &["source", "lex", "parse", "pp"];

/// Inserts the default `lex` subcommand when `argv[1]` isn't one of
/// [`COMMAND_NAMES`] (spec.md §6 "Default command is `lex`"), so `dlc
/// foo.dlc` behaves like `dlc lex foo.dlc`.
fn normalize_args(argv: Vec<String>) -> Vec<String> {
    let Some(first) = argv.get(1) else {
        return argv;
    };
    if COMMAND_NAMES.contains(&first.as_str()) || first.starts_with('-') {
        return argv;
    }
    let mut out = Vec::with_capacity(argv.len() + 1);
    out.push(argv[0].clone());
    out.push("lex".to_string());
    out.extend(argv.into_iter().skip(1));
    out
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_level(false))
        .try_init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args().collect())) {
        Ok(cli) => cli,
        Err(err) => {
            // clap errors (bad flags, missing FILE, --help/--version) are
            // already formatted for a terminal; print as-is. `--help`/
            // `--version` report a zero exit code; anything else is a
            // usage error (spec.md §6 "1 for usage or runtime errors").
            let is_display_request = err.exit_code() == 0;
            let _ = err.print();
            return if is_display_request { ExitCode::SUCCESS } else { ExitCode::FAILURE };
        }
    };

    init_tracing(cli.verbose);
    debug!(command = ?cli.command, "dispatching");

    let result = match &cli.command {
        Commands::Source(args) => commands::run_source(&args.file),
        Commands::Lex(args) => commands::run_lex(&args.file),
        Commands::Parse(args) => commands::run_parse(&args.file),
        Commands::Pp(args) => commands::run_pp(&args.file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", render_error(&err));
            ExitCode::FAILURE
        }
    }
}

/// Renders a top-level error the way spec.md §6 specifies: the parser gets
/// its own wording ("Parse error on line L, column C: MSG"), everything
/// else falls back to the generic `L:C: MSG` a `Diagnostic` uses.
fn render_error(err: &CliError) -> String {
    match err {
        CliError::Parse(dlc_par::ParseError::UnexpectedToken { span, .. })
        | CliError::Parse(dlc_par::ParseError::ExpectedToken { span, .. })
        | CliError::Parse(dlc_par::ParseError::UnexpectedEof { span, .. })
        | CliError::Parse(dlc_par::ParseError::ArityMismatch { span, .. })
        | CliError::Parse(dlc_par::ParseError::InvalidContext { span, .. }) => {
            format!("Parse error on line {}, column {}: {}", span.line, span.column, err)
        }
        CliError::Lex(inner) => format!("{}", inner),
        CliError::Sem(inner) => format!("{}: {}", inner.span(), inner),
        CliError::ReadFile { .. } => format!("{err}"),
    }
}
