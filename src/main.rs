//! CLI entry point for the estimation figure renderer

use clap::Parser;
use glucofit::io::cli::{Cli, FigureProcessor};

fn main() -> glucofit::Result<()> {
    let cli = Cli::parse();
    let mut processor = FigureProcessor::new(cli);
    processor.process()
}
