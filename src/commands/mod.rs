//! This module contains business logic for the commands for the application.
//!
//! The main entry point is the [`command_from_args`] function which converts CLI arguments into a command.
use anyhow::Result;

use crate::{
    args::{LvArgs, LvmArgs, PvArgs, VgArgs},
    commands::{
        change::{Apply, Change},
        list::{List, ListTarget},
        remove::{Remove, RemoveTarget},
    },
    dependencies::ProcessError,
    executor::ExecuteError,
    formatting::Format,
    resources::{Lvm, SizeSpec},
};
pub use core::{Command, CommandWithOutput, CommandWithOutputExt};

pub mod change;
mod core;
pub mod list;
pub mod remove;

/// Convert CLI arguments into a command.
///
/// The output of the command will be formatted using the provided format and printed to stdout.
pub fn command_from_args(args: LvmArgs, format: Format) -> Result<Box<dyn Command>> {
    match args {
        LvmArgs::Vg(vg_args) => vg_command_from_args(vg_args, format),
        LvmArgs::Lv(lv_args) => lv_command_from_args(lv_args, format),
        LvmArgs::Pv(pv_args) => pv_command_from_args(pv_args, format),
    }
}

fn vg_command_from_args(args: VgArgs, format: Format) -> Result<Box<dyn Command>> {
    match args {
        VgArgs::List(list_args) => List::new(
            ListTarget::VolumeGroups,
            list_args.options.into(),
            Lvm::new(),
        )
        .with_print_to_stdout(format),
        VgArgs::Show(show_args) => List::new(
            ListTarget::VolumeGroup(show_args.name),
            show_args.options.into(),
            Lvm::new(),
        )
        .with_print_to_stdout(format),
        VgArgs::Create(create_args) => Apply::new(
            Change::CreateVolumeGroup {
                name: create_args.name,
                physical_extent_size: create_args.physical_extent_size,
                devices: create_args.devices,
            },
            create_args.options.into(),
        )
        .with_print_to_stdout(format),
        VgArgs::Rename(rename_args) => Apply::new(
            Change::RenameVolumeGroup {
                old_name: rename_args.old_name,
                new_name: rename_args.new_name,
            },
            rename_args.options.into(),
        )
        .with_print_to_stdout(format),
        VgArgs::Remove(remove_args) => Remove::new(
            RemoveTarget::VolumeGroup(remove_args.name),
            remove_args.force,
            remove_args.options.into(),
        )
        .with_print_to_stdout(format),
        VgArgs::Extend(extend_args) => Apply::new(
            Change::ExtendVolumeGroup {
                name: extend_args.name,
                devices: extend_args.devices,
            },
            extend_args.options.into(),
        )
        .with_print_to_stdout(format),
        VgArgs::Reduce(reduce_args) => Apply::new(
            Change::ReduceVolumeGroup {
                name: reduce_args.name,
                devices: reduce_args.devices,
            },
            reduce_args.options.into(),
        )
        .with_print_to_stdout(format),
    }
}

fn lv_command_from_args(args: LvArgs, format: Format) -> Result<Box<dyn Command>> {
    match args {
        LvArgs::List(list_args) => {
            let target = match list_args.vg {
                Some(volume_group) => ListTarget::LogicalVolumesIn(volume_group),
                None => ListTarget::LogicalVolumes,
            };
            List::new(target, list_args.options.into(), Lvm::new()).with_print_to_stdout(format)
        }
        LvArgs::Create(create_args) => Apply::new(
            Change::CreateLogicalVolume {
                volume_group: create_args.volume_group,
                name: create_args.name,
                size: SizeSpec::try_from(create_args.size)?,
            },
            create_args.options.into(),
        )
        .with_print_to_stdout(format),
        LvArgs::Rename(rename_args) => Apply::new(
            Change::RenameLogicalVolume {
                volume_group: rename_args.volume_group,
                name: rename_args.name,
                new_name: rename_args.new_name,
            },
            rename_args.options.into(),
        )
        .with_print_to_stdout(format),
        LvArgs::Remove(remove_args) => Remove::new(
            RemoveTarget::LogicalVolume {
                volume_group: remove_args.volume_group,
                name: remove_args.name,
            },
            remove_args.force,
            remove_args.options.into(),
        )
        .with_print_to_stdout(format),
        LvArgs::Extend(extend_args) => Apply::new(
            Change::ExtendLogicalVolume {
                volume_group: extend_args.volume_group,
                name: extend_args.name,
                size: SizeSpec::try_from(extend_args.size)?,
            },
            extend_args.options.into(),
        )
        .with_print_to_stdout(format),
        LvArgs::Reduce(reduce_args) => Apply::new(
            Change::ReduceLogicalVolume {
                volume_group: reduce_args.volume_group,
                name: reduce_args.name,
                size: SizeSpec::try_from(reduce_args.size)?,
            },
            reduce_args.options.into(),
        )
        .with_print_to_stdout(format),
    }
}

fn pv_command_from_args(args: PvArgs, format: Format) -> Result<Box<dyn Command>> {
    match args {
        PvArgs::List(list_args) => List::new(
            ListTarget::PhysicalVolumes,
            list_args.options.into(),
            Lvm::new(),
        )
        .with_print_to_stdout(format),
        PvArgs::Show(show_args) => List::new(
            ListTarget::PhysicalVolume(show_args.device),
            show_args.options.into(),
            Lvm::new(),
        )
        .with_print_to_stdout(format),
        PvArgs::Create(create_args) => Apply::new(
            Change::CreatePhysicalVolume {
                device: create_args.device,
            },
            create_args.options.into(),
        )
        .with_print_to_stdout(format),
        PvArgs::Remove(remove_args) => Remove::new(
            RemoveTarget::PhysicalVolume(remove_args.device),
            remove_args.force,
            remove_args.options.into(),
        )
        .with_print_to_stdout(format),
    }
}

/// Message shown to the user for a failed toolkit call.
///
/// The toolkit explains failures on stderr, which is more useful than the exit status.
pub(crate) fn error_message(error: &ExecuteError) -> String {
    match error {
        ExecuteError::Process(ProcessError::Exited { stderr, .. }) if !stderr.trim().is_empty() => {
            stderr.trim().to_string()
        }
        other => other.to_string(),
    }
}
