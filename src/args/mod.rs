//! CLI argument parsing layer.
//!
//! This module provides the CLI interface using clap derive macros.
//! The business logic layer is [`crate::commands`], which receives these parsed arguments.

use anyhow::bail;
use clap::{Args, Subcommand};

use crate::{command::CommandOptions, resources::SizeSpec};

mod cli;

pub use cli::{Cli, GlobalArgs};

/// Root command, one subcommand per kind of LVM object.
#[derive(Subcommand)]
pub enum LvmArgs {
    /// Manage volume groups.
    #[command(subcommand)]
    Vg(VgArgs),
    /// Manage logical volumes.
    #[command(subcommand)]
    Lv(LvArgs),
    /// Manage physical volumes.
    #[command(subcommand)]
    Pv(PvArgs),
}

/// Options passed on to the toolkit.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ToolOptions {
    /// Run the toolkit in test mode, no metadata is updated.
    #[arg(long)]
    pub test: bool,

    /// Ask the toolkit for verbose output.
    ///
    /// Listings show additional columns.
    #[arg(long)]
    pub verbose: bool,
}

impl From<ToolOptions> for CommandOptions {
    fn from(options: ToolOptions) -> Self {
        CommandOptions {
            test: options.test,
            verbose: options.verbose,
        }
    }
}

/// Size of a logical volume, either in bytes with a unit or in extents.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SizeArgs {
    /// Size with an optional unit suffix, e.g. 4M, 10G or +1G.
    #[arg(long, short = 'L', allow_hyphen_values = true)]
    pub size: Option<String>,

    /// Number of logical extents.
    #[arg(long, short = 'l')]
    pub extents: Option<u64>,
}

impl TryFrom<SizeArgs> for SizeSpec {
    type Error = anyhow::Error;

    fn try_from(args: SizeArgs) -> Result<Self, Self::Error> {
        match (args.size, args.extents) {
            (Some(size), None) => Ok(SizeSpec::Size(size)),
            (None, Some(extents)) => Ok(SizeSpec::Extents(extents)),
            (Some(_), Some(_)) => bail!("cannot specify both size and extents"),
            (None, None) => bail!("must specify either size or extents"),
        }
    }
}

#[derive(Subcommand)]
pub enum VgArgs {
    #[command(alias = "ls")]
    List(VgList),
    Show(VgShow),
    Create(VgCreate),
    Rename(VgRename),
    #[command(alias = "rm")]
    Remove(VgRemove),
    /// Add physical volumes to a volume group.
    Extend(VgDevices),
    /// Remove physical volumes from a volume group.
    Reduce(VgDevices),
}

/// List all volume groups.
#[derive(Args)]
pub struct VgList {
    #[command(flatten)]
    pub options: ToolOptions,
}

/// Show a single volume group.
#[derive(Args)]
pub struct VgShow {
    /// Name of the volume group.
    pub name: String,

    #[command(flatten)]
    pub options: ToolOptions,
}

/// Create a volume group.
#[derive(Args)]
pub struct VgCreate {
    /// Name of the new volume group.
    pub name: String,

    /// Block devices to use as physical volumes.
    #[arg(required = true)]
    pub devices: Vec<String>,

    /// Physical extent size, defaults to 4M.
    #[arg(long, short = 's')]
    pub physical_extent_size: Option<String>,

    #[command(flatten)]
    pub options: ToolOptions,
}

/// Rename a volume group.
#[derive(Args)]
pub struct VgRename {
    pub old_name: String,
    pub new_name: String,

    #[command(flatten)]
    pub options: ToolOptions,
}

/// Remove a volume group.
///
/// The command prompts you to confirm the operation when you run the command without the --force option.
#[derive(Args)]
pub struct VgRemove {
    /// Name of the volume group to remove.
    pub name: String,

    /// Skip the confirmation prompt.
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    pub options: ToolOptions,
}

/// Add physical volumes to, or remove them from, a volume group.
#[derive(Args)]
pub struct VgDevices {
    /// Name of the volume group.
    pub name: String,

    /// Block devices to add or remove.
    #[arg(required = true)]
    pub devices: Vec<String>,

    #[command(flatten)]
    pub options: ToolOptions,
}

#[derive(Subcommand)]
pub enum LvArgs {
    #[command(alias = "ls")]
    List(LvList),
    Create(LvCreate),
    Rename(LvRename),
    #[command(alias = "rm")]
    Remove(LvRemove),
    /// Add space to a logical volume.
    Extend(LvResize),
    /// Remove space from a logical volume.
    Reduce(LvResize),
}

/// List logical volumes.
#[derive(Args)]
pub struct LvList {
    /// Only list the logical volumes of this volume group.
    #[arg(long)]
    pub vg: Option<String>,

    #[command(flatten)]
    pub options: ToolOptions,
}

/// Create a logical volume.
#[derive(Args)]
pub struct LvCreate {
    /// Volume group to create the logical volume in.
    pub volume_group: String,

    /// Name of the new logical volume.
    pub name: String,

    #[command(flatten)]
    pub size: SizeArgs,

    #[command(flatten)]
    pub options: ToolOptions,
}

/// Rename a logical volume.
#[derive(Args)]
pub struct LvRename {
    pub volume_group: String,
    pub name: String,
    pub new_name: String,

    #[command(flatten)]
    pub options: ToolOptions,
}

/// Remove a logical volume.
///
/// The command prompts you to confirm the operation when you run the command without the --force option.
#[derive(Args)]
pub struct LvRemove {
    pub volume_group: String,
    pub name: String,

    /// Skip the confirmation prompt.
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    pub options: ToolOptions,
}

/// Grow or shrink a logical volume.
#[derive(Args)]
pub struct LvResize {
    pub volume_group: String,
    pub name: String,

    #[command(flatten)]
    pub size: SizeArgs,

    #[command(flatten)]
    pub options: ToolOptions,
}

#[derive(Subcommand)]
pub enum PvArgs {
    #[command(alias = "ls")]
    List(PvList),
    /// Show a single physical volume.
    Show(PvDevice),
    /// Initialize a block device for use by LVM.
    Create(PvDevice),
    #[command(alias = "rm")]
    Remove(PvRemove),
}

/// List all physical volumes.
#[derive(Args)]
pub struct PvList {
    #[command(flatten)]
    pub options: ToolOptions,
}

/// Show or initialize a physical volume.
#[derive(Args)]
pub struct PvDevice {
    /// Block device of the physical volume.
    pub device: String,

    #[command(flatten)]
    pub options: ToolOptions,
}

/// Remove the LVM label from a block device.
///
/// The command prompts you to confirm the operation when you run the command without the --force option.
#[derive(Args)]
pub struct PvRemove {
    /// Block device of the physical volume.
    pub device: String,

    /// Skip the confirmation prompt.
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    pub options: ToolOptions,
}
