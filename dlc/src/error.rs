//! Top-level error type for the `dlc` CLI.
//!
//! Library errors (`LexError`, `ParseError`, `SemError`) already carry their
//! own `Display` wording and a [`dlc_util::Span`]; this type only adds the
//! handful of things that are purely the CLI's concern — reading the input
//! file, and `clap`'s own usage errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("couldn't read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Lex(#[from] dlc_lex::LexError),

    #[error(transparent)]
    Parse(#[from] dlc_par::ParseError),

    #[error(transparent)]
    Sem(#[from] dlc_sem::SemError),
}

pub type Result<T> = std::result::Result<T, CliError>;
