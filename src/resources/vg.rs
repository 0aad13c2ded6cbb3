//! Volume group operations.

use std::sync::LazyLock;

use crate::{
    command::{CommandDescriptor, CommandOptions, CommandTemplate, Invocation, LvmCommand},
    executor::{ExecuteError, Executor, Response},
    models::VolumeGroups,
    names::validate_volume_group_name,
};

use super::list_records;

/// Extent size used when creating a volume group without an explicit one.
pub const DEFAULT_PHYSICAL_EXTENT_SIZE: &str = "4M";

fn template(command: LvmCommand, no_args: bool) -> CommandTemplate {
    CommandTemplate::new(
        CommandDescriptor::builder()
            .command(command)
            .json(true)
            .no_args(no_args)
            .build(),
    )
}

static LIST_ALL: LazyLock<CommandTemplate> = LazyLock::new(|| template(LvmCommand::Vgs, true));
static LIST: LazyLock<CommandTemplate> = LazyLock::new(|| template(LvmCommand::Vgs, false));
static CREATE: LazyLock<CommandTemplate> =
    LazyLock::new(|| template(LvmCommand::VgCreate, false));
static RENAME: LazyLock<CommandTemplate> =
    LazyLock::new(|| template(LvmCommand::VgRename, false));
static REMOVE: LazyLock<CommandTemplate> =
    LazyLock::new(|| template(LvmCommand::VgRemove, false));
static EXTEND: LazyLock<CommandTemplate> =
    LazyLock::new(|| template(LvmCommand::VgExtend, false));
static REDUCE: LazyLock<CommandTemplate> =
    LazyLock::new(|| template(LvmCommand::VgReduce, false));

/// Volume group operations.
pub struct VolumeGroupCatalog<'a> {
    executor: &'a Executor,
}

impl<'a> VolumeGroupCatalog<'a> {
    pub fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    /// Retrieve all volume groups.
    pub async fn list(
        &self,
        options: CommandOptions,
    ) -> Result<Response<Option<VolumeGroups>>, ExecuteError> {
        let command_line = LIST_ALL.render(&Invocation::new(options, Vec::new()));
        list_records(self.executor, &command_line, &options, None).await
    }

    /// Retrieve a single volume group.
    ///
    /// The toolkit reports a list, it holds exactly one volume group on success.
    pub async fn get(
        &self,
        name: &str,
        options: CommandOptions,
    ) -> Result<Response<Option<VolumeGroups>>, ExecuteError> {
        let command_line = LIST.render(&Invocation::new(options, vec![name.to_string()]));
        list_records(
            self.executor,
            &command_line,
            &options,
            Some(&|| validate_volume_group_name(name)),
        )
        .await
    }

    /// Create a volume group on the given block devices.
    ///
    /// `physical_extent_size` defaults to [`DEFAULT_PHYSICAL_EXTENT_SIZE`].
    pub async fn create(
        &self,
        name: &str,
        physical_extent_size: Option<&str>,
        devices: &[String],
        options: CommandOptions,
    ) -> Result<Response<String>, ExecuteError> {
        let mut args = vec![
            name.to_string(),
            "-s".to_string(),
            physical_extent_size
                .unwrap_or(DEFAULT_PHYSICAL_EXTENT_SIZE)
                .to_string(),
        ];
        args.extend(devices.iter().cloned());

        let command_line = CREATE.render(&Invocation::new(options, args));
        self.executor
            .execute_text(&command_line, Some(&|| validate_volume_group_name(name)))
            .await
    }

    pub async fn rename(
        &self,
        old_name: &str,
        new_name: &str,
        options: CommandOptions,
    ) -> Result<Response<String>, ExecuteError> {
        let args = vec![old_name.to_string(), new_name.to_string()];

        let command_line = RENAME.render(&Invocation::new(options, args));
        self.executor
            .execute_text(
                &command_line,
                Some(&|| {
                    validate_volume_group_name(old_name)?;
                    validate_volume_group_name(new_name)
                }),
            )
            .await
    }

    pub async fn remove(
        &self,
        name: &str,
        options: CommandOptions,
    ) -> Result<Response<String>, ExecuteError> {
        let command_line = REMOVE.render(&Invocation::new(options, vec![name.to_string()]));
        self.executor
            .execute_text(&command_line, Some(&|| validate_volume_group_name(name)))
            .await
    }

    /// Add physical volumes to a volume group.
    pub async fn extend(
        &self,
        name: &str,
        devices: &[String],
        options: CommandOptions,
    ) -> Result<Response<String>, ExecuteError> {
        let command_line = EXTEND.render(&Invocation::new(options, with_devices(name, devices)));
        self.executor
            .execute_text(&command_line, Some(&|| validate_volume_group_name(name)))
            .await
    }

    /// Remove physical volumes from a volume group.
    pub async fn reduce(
        &self,
        name: &str,
        devices: &[String],
        options: CommandOptions,
    ) -> Result<Response<String>, ExecuteError> {
        let command_line = REDUCE.render(&Invocation::new(options, with_devices(name, devices)));
        self.executor
            .execute_text(&command_line, Some(&|| validate_volume_group_name(name)))
            .await
    }
}

fn with_devices(name: &str, devices: &[String]) -> Vec<String> {
    std::iter::once(name.to_string())
        .chain(devices.iter().cloned())
        .collect()
}
