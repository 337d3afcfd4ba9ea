use clap::Parser;
use downsort::cli::{self, Args};
use downsort::logging;
use downsort::output::OutputFormatter;
use std::path::Path;

fn main() {
    let args = Args::parse();
    logging::init(Path::new("."));

    // Per-file problems are tallied and logged during the scan; only an
    // unusable setup lands here, and the exit code stays 0 either way.
    if let Err(e) = cli::run(args) {
        OutputFormatter::error(&e);
    }
}
