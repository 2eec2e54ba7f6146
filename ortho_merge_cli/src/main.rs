//! Binary entrypoint for `ortho-merge`.

use std::process::ExitCode;

use clap::Parser;
use ortho_merge_cli::cli::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    let outcome =
        ortho_merge_cli::telemetry::init(args.verbose).and_then(|()| ortho_merge_cli::run(&args));
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "ortho-merge failed");
            ExitCode::FAILURE
        }
    }
}
