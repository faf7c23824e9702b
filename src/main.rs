//! CLI entry point for the wave function collapse map generator

use clap::Parser;
use wavetile::io::cli::{Cli, MapProcessor};

fn main() -> wavetile::Result<()> {
    let cli = Cli::parse();
    if let Some(level) = cli.log_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
    let mut processor = MapProcessor::new(cli);
    processor.process()
}
