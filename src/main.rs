use anyhow::Result;
use clap::Parser;
use lvm2::{
    args::Cli,
    commands::{Command, command_from_args},
    logging::setup_logging,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.global_args.debug);

    let format = cli.global_args.format.unwrap_or_default();
    let mut command = command_from_args(cli.command, format)?;

    command.execute().await
}
