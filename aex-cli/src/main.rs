//! aex-cli - Command line tool for the automobile export choropleth data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "aex-cli",
    version,
    about = "Automobile export choropleth data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: aex_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    aex_cmd::run(cli.command)
}
