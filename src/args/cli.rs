//! Root command for the CLI.
//!
//! Global flags live on [`Cli`], the resource subcommands are defined in [`LvmArgs`](super::LvmArgs).
use clap::{Args, Parser};

use crate::formatting::Format;

use super::LvmArgs;

/// Manage LVM2 volume groups, logical volumes and physical volumes
#[derive(Parser)]
#[command(name = "lvm2", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global_args: GlobalArgs,

    #[command(subcommand)]
    pub command: LvmArgs,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Enable debug logging.
    ///
    /// Every command line sent to the toolkit is logged.
    /// The log level can also be set with the `LVM2_LOG` environment variable, `LVM2_LOG_ALL`
    /// shows logs of all crates.
    #[arg(global = true, long, short = 'D', default_value = "false")]
    pub debug: bool,

    /// Output format.
    #[arg(global = true, long = "output", short = 'o')]
    pub format: Option<Format>,
}
