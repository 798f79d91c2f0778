//! BitBuoy CLI - command line tool for the BitBuoy measurement API.

use clap::Parser;

#[derive(Parser)]
#[command(name = "bitbuoy", version, about = "BitBuoy sensor buoy toolkit")]
struct Cli {
    #[command(flatten)]
    api: bitbuoy_cmd::ApiArgs,

    #[command(subcommand)]
    command: bitbuoy_cmd::Command,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    bitbuoy_cmd::run(cli.api, cli.command).await
}
