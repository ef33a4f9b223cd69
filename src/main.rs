//! CLI entry point for point pattern reconstruction

use clap::Parser;
use patternrecon::io::cli::{Cli, FileProcessor};

fn main() -> patternrecon::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let processor = FileProcessor::new(cli);
    processor.process()
}
