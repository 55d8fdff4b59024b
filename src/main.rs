use anyhow::Result;
use clap::Parser;

use rmdash::cli::{Cli, Commands};
use rmdash::commands::{frame, map, types};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Frame(args) => frame::run(&cli, args),
        Commands::Map(args) => map::run(&cli, args),
        Commands::Types(args) => types::run(&cli, args),
    }
}
