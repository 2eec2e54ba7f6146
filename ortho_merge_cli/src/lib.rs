//! Library interface for the `ortho-merge` command.
//!
//! The binary reads JSON or TOML documents, deep merges them in the order
//! given with [`ortho_merge`], and writes the result as pretty JSON.

pub mod cli;
pub mod error;
pub mod input;
pub mod output;
pub mod telemetry;

use ortho_merge::{DEFAULT_ENV_PREFIX, MergeOptions, Value};

use crate::cli::Args;
use crate::error::CliError;

/// Resolve the merge options for `args`.
///
/// The options file is overlaid with `ORTHO_MERGE_*` environment variables,
/// and command-line flags win over both.
///
/// # Errors
///
/// Returns [`CliError::Merge`] when the options file or environment cannot
/// be parsed.
pub fn resolve_options(args: &Args) -> Result<MergeOptions, CliError> {
    let loaded = MergeOptions::load_layered(args.options.as_deref(), DEFAULT_ENV_PREFIX)?;
    Ok(loaded.layer(args.merge_options()))
}

/// Merge every input named by `args` and write the result.
///
/// # Errors
///
/// Returns a [`CliError`] when an input cannot be read or parsed, the merge
/// fails, or the output cannot be written.
pub fn run(args: &Args) -> Result<(), CliError> {
    let options = resolve_options(args)?;
    let sources = args
        .inputs
        .iter()
        .map(|path| input::read_structure(path))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::info!(inputs = sources.len(), "merging documents");

    let merged = options.into_merger().merge(&sources)?;
    let document = Value::from(merged).to_json()?;
    output::write_document(args.output.as_deref(), &document)
}
