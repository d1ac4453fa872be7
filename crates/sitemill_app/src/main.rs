mod cli;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use log::error;

use sitemill_engine::{convert_tree, write_manifest};

fn main() -> ExitCode {
    let args = cli::Args::parse();
    logging::initialize(args.verbose, args.quiet);

    let options = args.to_options();
    let summary = match convert_tree(&options) {
        Ok(summary) => summary,
        Err(err) => {
            error!("conversion aborted: {err}");
            return ExitCode::FAILURE;
        }
    };

    if args.manifest {
        let generated_utc = chrono::Utc::now().to_rfc3339();
        if let Err(err) = write_manifest(&options.target_dir, &summary, &generated_utc) {
            error!("failed to write manifest: {err}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
