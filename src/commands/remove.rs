use std::fmt::Display;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;

use crate::{
    command::CommandOptions,
    commands::{CommandWithOutput, error_message},
    executor::ExecuteError,
    interaction::{
        ConfirmationPrompt, ConfirmationPromptOptions, ConfirmationPromptResult, Interaction,
        SpinnerInteraction,
    },
    resources::Lvm,
};

// Interaction dependencies for the remove command
pub trait RemoveInteraction: ConfirmationPrompt + SpinnerInteraction + Send {}
impl<T: ConfirmationPrompt + SpinnerInteraction + Send> RemoveInteraction for T {}

/// The LVM object to remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveTarget {
    VolumeGroup(String),
    LogicalVolume { volume_group: String, name: String },
    PhysicalVolume(String),
}

impl RemoveTarget {
    fn warning(&self) -> &'static str {
        match self {
            RemoveTarget::VolumeGroup(_) => {
                "This operation will remove the volume group. Its logical volumes must be removed first."
            }
            RemoveTarget::LogicalVolume { .. } => {
                "This operation will remove the logical volume, and all of its data. This action cannot be undone."
            }
            RemoveTarget::PhysicalVolume(_) => {
                "This operation will wipe the LVM label from the device."
            }
        }
    }
}

impl Display for RemoveTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoveTarget::VolumeGroup(name) => write!(f, "volume group '{name}'"),
            RemoveTarget::LogicalVolume { volume_group, name } => {
                write!(f, "logical volume '{volume_group}/{name}'")
            }
            RemoveTarget::PhysicalVolume(device) => write!(f, "physical volume '{device}'"),
        }
    }
}

pub struct Remove {
    target: RemoveTarget,
    force: bool,
    options: CommandOptions,

    interaction: Box<dyn RemoveInteraction>,
    lvm: Lvm,
}

impl Remove {
    pub fn new(target: RemoveTarget, force: bool, options: CommandOptions) -> Self {
        Self {
            target,
            force,
            options,
            interaction: Box::new(Interaction::new()),
            lvm: Lvm::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RemoveResult {
    Removed { object: String },
    Failed { object: String, error: String },
    Canceled { object: String },
}

impl Display for RemoveResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Removed { object } => write!(f, "Removed {}", object),
            Self::Failed { object, error } => write!(f, "Removing {} failed: {}", object, error),
            Self::Canceled { .. } => write!(f, "Nothing removed"),
        }
    }
}

async fn remove(
    lvm: &Lvm,
    target: &RemoveTarget,
    options: CommandOptions,
) -> Result<(), ExecuteError> {
    match target {
        RemoveTarget::VolumeGroup(name) => {
            lvm.vg().remove(name, options).await?;
        }
        RemoveTarget::LogicalVolume { volume_group, name } => {
            lvm.lv().remove(volume_group, name, options).await?;
        }
        RemoveTarget::PhysicalVolume(device) => {
            lvm.pv().remove(device, options).await?;
        }
    }

    Ok(())
}

#[async_trait]
impl CommandWithOutput for Remove {
    type Output = RemoveResult;

    async fn execute(&mut self) -> Result<Self::Output> {
        let object = self.target.to_string();

        if !self.force {
            let confirmation = self
                .interaction
                .confirm(
                    ConfirmationPromptOptions::builder()
                        .pre_confirmation_help_text(self.target.warning())
                        .message(format!("Are you sure you want to remove {object}?"))
                        .default(false)
                        .build(),
                )
                .context("confirming removal")?;

            if matches!(
                confirmation,
                ConfirmationPromptResult::No | ConfirmationPromptResult::Canceled
            ) {
                return Ok(RemoveResult::Canceled { object });
            }
        }

        // Stopped when _spinner goes out of scope
        let _spinner = self
            .interaction
            .start_spinner(format!("Removing {object}..."))?;

        if let Err(e) = remove(&self.lvm, &self.target, self.options).await {
            return Ok(RemoveResult::Failed {
                object,
                error: error_message(&e),
            });
        }

        Ok(RemoveResult::Removed { object })
    }
}
