//! CLI entry point for multi-resolution texture synthesis

use clap::Parser;
use env_logger::Env;
use texsynth::io::cli::{Cli, FileProcessor};

fn main() -> texsynth::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp_millis()
        .init();

    let mut processor = FileProcessor::new(cli);
    processor.process()
}
