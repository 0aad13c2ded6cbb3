//! Physical volume operations.
//!
//! Physical volumes are addressed by their block device path, which is not an LVM name and is
//! passed through without name validation.

use std::sync::LazyLock;

use crate::{
    command::{CommandDescriptor, CommandOptions, CommandTemplate, Invocation, LvmCommand},
    executor::{ExecuteError, Executor, Response},
    models::PhysicalVolumes,
};

use super::list_records;

fn template(command: LvmCommand, no_args: bool) -> CommandTemplate {
    CommandTemplate::new(
        CommandDescriptor::builder()
            .command(command)
            .json(true)
            .no_args(no_args)
            .build(),
    )
}

static LIST_ALL: LazyLock<CommandTemplate> = LazyLock::new(|| template(LvmCommand::Pvs, true));
static LIST: LazyLock<CommandTemplate> = LazyLock::new(|| template(LvmCommand::Pvs, false));
static CREATE: LazyLock<CommandTemplate> =
    LazyLock::new(|| template(LvmCommand::PvCreate, false));
static REMOVE: LazyLock<CommandTemplate> =
    LazyLock::new(|| template(LvmCommand::PvRemove, false));

/// Physical volume operations.
pub struct PhysicalVolumeCatalog<'a> {
    executor: &'a Executor,
}

impl<'a> PhysicalVolumeCatalog<'a> {
    pub fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    pub async fn list(
        &self,
        options: CommandOptions,
    ) -> Result<Response<Option<PhysicalVolumes>>, ExecuteError> {
        let command_line = LIST_ALL.render(&Invocation::new(options, Vec::new()));
        list_records(self.executor, &command_line, &options, None).await
    }

    pub async fn get(
        &self,
        device: &str,
        options: CommandOptions,
    ) -> Result<Response<Option<PhysicalVolumes>>, ExecuteError> {
        let command_line = LIST.render(&Invocation::new(options, vec![device.to_string()]));
        list_records(self.executor, &command_line, &options, None).await
    }

    /// Initialize a block device for use by LVM.
    pub async fn create(
        &self,
        device: &str,
        options: CommandOptions,
    ) -> Result<Response<String>, ExecuteError> {
        let command_line = CREATE.render(&Invocation::new(options, vec![device.to_string()]));
        self.executor.execute_text(&command_line, None).await
    }

    pub async fn remove(
        &self,
        device: &str,
        options: CommandOptions,
    ) -> Result<Response<String>, ExecuteError> {
        let command_line = REMOVE.render(&Invocation::new(options, vec![device.to_string()]));
        self.executor.execute_text(&command_line, None).await
    }
}
