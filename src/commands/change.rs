//! Command to create, rename, extend or reduce LVM objects.
//!
//! A failing toolkit call is one of the possible outcomes of a change and is reported as
//! [`ChangeResult::Failed`], only problems of the CLI itself are returned as errors.

use std::fmt::Display;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::{
    command::CommandOptions,
    commands::{CommandWithOutput, error_message},
    executor::ExecuteError,
    interaction::{Interaction, SpinnerInteraction},
    resources::{Lvm, SizeSpec},
};

/// A change to an LVM object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    CreateVolumeGroup {
        name: String,
        physical_extent_size: Option<String>,
        devices: Vec<String>,
    },
    RenameVolumeGroup {
        old_name: String,
        new_name: String,
    },
    ExtendVolumeGroup {
        name: String,
        devices: Vec<String>,
    },
    ReduceVolumeGroup {
        name: String,
        devices: Vec<String>,
    },
    CreateLogicalVolume {
        volume_group: String,
        name: String,
        size: SizeSpec,
    },
    RenameLogicalVolume {
        volume_group: String,
        name: String,
        new_name: String,
    },
    ExtendLogicalVolume {
        volume_group: String,
        name: String,
        size: SizeSpec,
    },
    ReduceLogicalVolume {
        volume_group: String,
        name: String,
        size: SizeSpec,
    },
    CreatePhysicalVolume {
        device: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Rename,
    Extend,
    Reduce,
}

impl Action {
    fn past(self) -> &'static str {
        match self {
            Action::Create => "Created",
            Action::Rename => "Renamed",
            Action::Extend => "Extended",
            Action::Reduce => "Reduced",
        }
    }

    fn progressive(self) -> &'static str {
        match self {
            Action::Create => "Creating",
            Action::Rename => "Renaming",
            Action::Extend => "Extending",
            Action::Reduce => "Reducing",
        }
    }
}

impl Change {
    fn action(&self) -> Action {
        match self {
            Change::CreateVolumeGroup { .. }
            | Change::CreateLogicalVolume { .. }
            | Change::CreatePhysicalVolume { .. } => Action::Create,
            Change::RenameVolumeGroup { .. } | Change::RenameLogicalVolume { .. } => {
                Action::Rename
            }
            Change::ExtendVolumeGroup { .. } | Change::ExtendLogicalVolume { .. } => {
                Action::Extend
            }
            Change::ReduceVolumeGroup { .. } | Change::ReduceLogicalVolume { .. } => {
                Action::Reduce
            }
        }
    }

    /// The object the change applies to, as shown to the user.
    fn object(&self) -> String {
        match self {
            Change::CreateVolumeGroup { name, .. }
            | Change::ExtendVolumeGroup { name, .. }
            | Change::ReduceVolumeGroup { name, .. } => format!("volume group '{name}'"),
            Change::RenameVolumeGroup { old_name, new_name } => {
                format!("volume group '{old_name}' to '{new_name}'")
            }
            Change::CreateLogicalVolume {
                volume_group, name, ..
            }
            | Change::ExtendLogicalVolume {
                volume_group, name, ..
            }
            | Change::ReduceLogicalVolume {
                volume_group, name, ..
            } => format!("logical volume '{volume_group}/{name}'"),
            Change::RenameLogicalVolume {
                volume_group,
                name,
                new_name,
            } => format!("logical volume '{volume_group}/{name}' to '{new_name}'"),
            Change::CreatePhysicalVolume { device } => format!("physical volume '{device}'"),
        }
    }
}

/// Applies a single [`Change`].
pub struct Apply {
    change: Change,
    options: CommandOptions,

    interaction: Box<dyn SpinnerInteraction + Send>,
    lvm: Lvm,
}

impl Apply {
    pub fn new(change: Change, options: CommandOptions) -> Self {
        Self {
            change,
            options,
            interaction: Box::new(Interaction::new()),
            lvm: Lvm::new(),
        }
    }
}

async fn apply(lvm: &Lvm, change: &Change, options: CommandOptions) -> Result<(), ExecuteError> {
    match change {
        Change::CreateVolumeGroup {
            name,
            physical_extent_size,
            devices,
        } => {
            lvm.vg()
                .create(name, physical_extent_size.as_deref(), devices, options)
                .await?;
        }
        Change::RenameVolumeGroup { old_name, new_name } => {
            lvm.vg().rename(old_name, new_name, options).await?;
        }
        Change::ExtendVolumeGroup { name, devices } => {
            lvm.vg().extend(name, devices, options).await?;
        }
        Change::ReduceVolumeGroup { name, devices } => {
            lvm.vg().reduce(name, devices, options).await?;
        }
        Change::CreateLogicalVolume {
            volume_group,
            name,
            size,
        } => {
            lvm.lv().create(name, size, volume_group, options).await?;
        }
        Change::RenameLogicalVolume {
            volume_group,
            name,
            new_name,
        } => {
            lvm.lv()
                .rename(volume_group, name, new_name, options)
                .await?;
        }
        Change::ExtendLogicalVolume {
            volume_group,
            name,
            size,
        } => {
            lvm.lv().extend(volume_group, name, size, options).await?;
        }
        Change::ReduceLogicalVolume {
            volume_group,
            name,
            size,
        } => {
            lvm.lv().reduce(volume_group, name, size, options).await?;
        }
        Change::CreatePhysicalVolume { device } => {
            lvm.pv().create(device, options).await?;
        }
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ChangeResult {
    Done {
        action: Action,
        object: String,
    },
    Failed {
        action: Action,
        object: String,
        error: String,
    },
}

impl Display for ChangeResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Done { action, object } => write!(f, "{} {}", action.past(), object),
            Self::Failed {
                action,
                object,
                error,
            } => write!(
                f,
                "{} {} failed: {}",
                action.progressive(),
                object,
                error
            ),
        }
    }
}

#[async_trait]
impl CommandWithOutput for Apply {
    type Output = ChangeResult;

    async fn execute(&mut self) -> Result<Self::Output> {
        let action = self.change.action();
        let object = self.change.object();

        // Stopped when _spinner goes out of scope
        let _spinner = self
            .interaction
            .start_spinner(format!("{} {}...", action.progressive(), object))?;

        if let Err(e) = apply(&self.lvm, &self.change, self.options).await {
            return Ok(ChangeResult::Failed {
                action,
                object,
                error: error_message(&e),
            });
        }

        Ok(ChangeResult::Done { action, object })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dependencies::{ProcessError, mocks::MockRunner},
        interaction::mocks::{MockInteraction, noop_spinner},
        resources::test_support::{expect_command, never_called},
    };

    fn spinner_expecting(message: &'static str) -> Box<MockInteraction> {
        let mut interaction = MockInteraction::new();
        interaction
            .expect_start_spinner()
            .withf(move |msg| msg == message)
            .times(1)
            .return_once(|_| Ok(noop_spinner()));
        Box::new(interaction)
    }

    #[tokio::test]
    async fn test_create_volume_group() {
        let mut apply = Apply {
            change: Change::CreateVolumeGroup {
                name: "vg0".to_string(),
                physical_extent_size: None,
                devices: vec!["/dev/loop0".to_string()],
            },
            options: CommandOptions::default(),
            interaction: spinner_expecting("Creating volume group 'vg0'..."),
            lvm: Lvm::with_runner(expect_command(
                "vgcreate --yes --reportformat json vg0 -s 4M /dev/loop0",
                "",
            )),
        };

        let result = apply.execute().await.expect("execute should succeed");

        assert_eq!(
            result,
            ChangeResult::Done {
                action: Action::Create,
                object: "volume group 'vg0'".to_string(),
            }
        );
        assert_eq!(result.to_string(), "Created volume group 'vg0'");
    }

    #[tokio::test]
    async fn test_rename_logical_volume() {
        let mut apply = Apply {
            change: Change::RenameLogicalVolume {
                volume_group: "vg0".to_string(),
                name: "lv0".to_string(),
                new_name: "lv1".to_string(),
            },
            options: CommandOptions::builder().test(true).build(),
            interaction: spinner_expecting("Renaming logical volume 'vg0/lv0' to 'lv1'..."),
            lvm: Lvm::with_runner(expect_command(
                "lvrename --yes --reportformat json --test vg0/lv0 lv1",
                "",
            )),
        };

        let result = apply.execute().await.expect("execute should succeed");

        assert_eq!(
            result.to_string(),
            "Renamed logical volume 'vg0/lv0' to 'lv1'"
        );
    }

    #[tokio::test]
    async fn test_extend_logical_volume() {
        let mut apply = Apply {
            change: Change::ExtendLogicalVolume {
                volume_group: "vg0".to_string(),
                name: "lv0".to_string(),
                size: SizeSpec::Size("+1G".to_string()),
            },
            options: CommandOptions::default(),
            interaction: spinner_expecting("Extending logical volume 'vg0/lv0'..."),
            lvm: Lvm::with_runner(expect_command(
                "lvextend --yes --reportformat json vg0/lv0 -L +1G",
                "",
            )),
        };

        let result = apply.execute().await.expect("execute should succeed");

        assert_eq!(
            result,
            ChangeResult::Done {
                action: Action::Extend,
                object: "logical volume 'vg0/lv0'".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_invalid_name_is_failed_outcome() {
        let mut apply = Apply {
            change: Change::CreateLogicalVolume {
                volume_group: "vg0".to_string(),
                name: "pvmove".to_string(),
                size: SizeSpec::Extents(1),
            },
            options: CommandOptions::default(),
            interaction: spinner_expecting("Creating logical volume 'vg0/pvmove'..."),
            lvm: Lvm::with_runner(never_called()),
        };

        let result = apply.execute().await.expect("execute should succeed");

        assert_eq!(
            result,
            ChangeResult::Failed {
                action: Action::Create,
                object: "logical volume 'vg0/pvmove'".to_string(),
                error: "Invalid LVM name: pvmove.".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_toolkit_failure_reports_stderr() {
        let mut runner = MockRunner::new();
        runner.expect_run().times(1).return_once(|command_line| {
            Err(ProcessError::Exited {
                command: command_line.to_string(),
                code: Some(5),
                signal: None,
                stdout: String::new(),
                stderr: "  Device /dev/sdz not found.\n".to_string(),
            })
        });

        let mut apply = Apply {
            change: Change::CreatePhysicalVolume {
                device: "/dev/sdz".to_string(),
            },
            options: CommandOptions::default(),
            interaction: spinner_expecting("Creating physical volume '/dev/sdz'..."),
            lvm: Lvm::with_runner(runner),
        };

        let result = apply.execute().await.expect("execute should succeed");

        assert_eq!(
            result.to_string(),
            "Creating physical volume '/dev/sdz' failed: Device /dev/sdz not found."
        );
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"outcome":"failed","action":"create","object":"physical volume '/dev/sdz'","error":"Device /dev/sdz not found."}"#
        );
    }
}
