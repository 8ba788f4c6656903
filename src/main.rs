mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    jmx2locust::logger::init_logger(cli.verbose);

    cli::run(cli)
}
