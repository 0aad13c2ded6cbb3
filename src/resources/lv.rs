//! Logical volume operations.

use std::sync::LazyLock;

use crate::{
    command::{CommandDescriptor, CommandOptions, CommandTemplate, Invocation, LvmCommand},
    executor::{ExecuteError, Executor, Response},
    models::LogicalVolumes,
    names::{NameError, validate_logical_volume_name, validate_volume_group_name},
};

use super::{SizeSpec, list_records};

fn template(command: LvmCommand, no_args: bool) -> CommandTemplate {
    CommandTemplate::new(
        CommandDescriptor::builder()
            .command(command)
            .json(true)
            .no_args(no_args)
            .build(),
    )
}

static LIST_ALL: LazyLock<CommandTemplate> = LazyLock::new(|| template(LvmCommand::Lvs, true));
static LIST: LazyLock<CommandTemplate> = LazyLock::new(|| template(LvmCommand::Lvs, false));
static CREATE: LazyLock<CommandTemplate> =
    LazyLock::new(|| template(LvmCommand::LvCreate, false));
static RENAME: LazyLock<CommandTemplate> =
    LazyLock::new(|| template(LvmCommand::LvRename, false));
static REMOVE: LazyLock<CommandTemplate> =
    LazyLock::new(|| template(LvmCommand::LvRemove, false));
static EXTEND: LazyLock<CommandTemplate> =
    LazyLock::new(|| template(LvmCommand::LvExtend, false));
static REDUCE: LazyLock<CommandTemplate> =
    LazyLock::new(|| template(LvmCommand::LvReduce, false));

/// Path of a logical volume as the toolkit expects it, `<vg>/<lv>`.
fn volume_path(volume_group: &str, name: &str) -> String {
    format!("{volume_group}/{name}")
}

fn validate_volume(volume_group: &str, name: &str) -> Result<(), NameError> {
    validate_logical_volume_name(name)?;
    validate_volume_group_name(volume_group)
}

/// Logical volume operations.
pub struct LogicalVolumeCatalog<'a> {
    executor: &'a Executor,
}

impl<'a> LogicalVolumeCatalog<'a> {
    pub fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    /// Retrieve all logical volumes.
    pub async fn list(
        &self,
        options: CommandOptions,
    ) -> Result<Response<Option<LogicalVolumes>>, ExecuteError> {
        let command_line = LIST_ALL.render(&Invocation::new(options, Vec::new()));
        list_records(self.executor, &command_line, &options, None).await
    }

    /// Retrieve the logical volumes of a volume group.
    pub async fn list_in(
        &self,
        volume_group: &str,
        options: CommandOptions,
    ) -> Result<Response<Option<LogicalVolumes>>, ExecuteError> {
        let command_line = LIST.render(&Invocation::new(options, vec![volume_group.to_string()]));
        list_records(
            self.executor,
            &command_line,
            &options,
            Some(&|| validate_volume_group_name(volume_group)),
        )
        .await
    }

    /// Create a logical volume in a volume group.
    pub async fn create(
        &self,
        name: &str,
        size: &SizeSpec,
        volume_group: &str,
        options: CommandOptions,
    ) -> Result<Response<String>, ExecuteError> {
        let mut args = vec!["-n".to_string(), name.to_string()];
        size.push_args(&mut args);
        args.push(volume_group.to_string());

        let command_line = CREATE.render(&Invocation::new(options, args));
        self.executor
            .execute_text(&command_line, Some(&|| validate_volume(volume_group, name)))
            .await
    }

    pub async fn rename(
        &self,
        volume_group: &str,
        name: &str,
        new_name: &str,
        options: CommandOptions,
    ) -> Result<Response<String>, ExecuteError> {
        let args = vec![volume_path(volume_group, name), new_name.to_string()];

        let command_line = RENAME.render(&Invocation::new(options, args));
        self.executor
            .execute_text(
                &command_line,
                Some(&|| {
                    validate_volume(volume_group, name)?;
                    validate_logical_volume_name(new_name)
                }),
            )
            .await
    }

    pub async fn remove(
        &self,
        volume_group: &str,
        name: &str,
        options: CommandOptions,
    ) -> Result<Response<String>, ExecuteError> {
        let args = vec![volume_path(volume_group, name)];

        let command_line = REMOVE.render(&Invocation::new(options, args));
        self.executor
            .execute_text(&command_line, Some(&|| validate_volume(volume_group, name)))
            .await
    }

    /// Add space to a logical volume.
    pub async fn extend(
        &self,
        volume_group: &str,
        name: &str,
        size: &SizeSpec,
        options: CommandOptions,
    ) -> Result<Response<String>, ExecuteError> {
        let mut args = vec![volume_path(volume_group, name)];
        size.push_args(&mut args);

        let command_line = EXTEND.render(&Invocation::new(options, args));
        self.executor
            .execute_text(&command_line, Some(&|| validate_volume(volume_group, name)))
            .await
    }

    /// Remove space from a logical volume.
    pub async fn reduce(
        &self,
        volume_group: &str,
        name: &str,
        size: &SizeSpec,
        options: CommandOptions,
    ) -> Result<Response<String>, ExecuteError> {
        let mut args = vec![volume_path(volume_group, name)];
        size.push_args(&mut args);

        let command_line = REDUCE.render(&Invocation::new(options, args));
        self.executor
            .execute_text(&command_line, Some(&|| validate_volume(volume_group, name)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::Records,
        resources::{
            Lvm,
            test_support::{expect_command, never_called},
        },
    };

    #[tokio::test]
    async fn test_list() {
        let lvm = Lvm::with_runner(expect_command(
            "lvs --yes --reportformat json",
            r#"{"report":[{"lv":[{"lv_name":"root","vg_name":"vg0","lv_size":"4.00m"},{"lv_name":"home","vg_name":"vg1"}]}]}"#,
        ));

        let response = lvm
            .lv()
            .list(CommandOptions::default())
            .await
            .expect("list should succeed");

        match response.data {
            Some(Records::Brief(volumes)) => {
                let names: Vec<_> = volumes.iter().map(|lv| lv.lv_name.as_str()).collect();
                assert_eq!(names, ["root", "home"]);
                assert_eq!(volumes[0].lv_size, "4.00m");
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_in_empty_group() {
        let lvm = Lvm::with_runner(expect_command(
            "lvs --yes --reportformat json vg0",
            r#"{"report":[{"lv":[]}]}"#,
        ));

        let response = lvm
            .lv()
            .list_in("vg0", CommandOptions::default())
            .await
            .expect("list should succeed");

        assert_eq!(response.data, Some(Records::Brief(Vec::new())));
    }

    #[tokio::test]
    async fn test_list_in_verbose() {
        let lvm = Lvm::with_runner(expect_command(
            "lvs --yes --reportformat json --verbose vg0",
            r#"{"report":[{"lv":[{"lv_name":"root","lv_uuid":"u-1","seg_count":"1"}]}]}"#,
        ));

        let response = lvm
            .lv()
            .list_in("vg0", CommandOptions::builder().verbose(true).build())
            .await
            .expect("list should succeed");

        match response.data {
            Some(Records::Verbose(volumes)) => {
                assert_eq!(volumes[0].base.lv_name, "root");
                assert_eq!(volumes[0].lv_uuid, "u-1");
                assert_eq!(volumes[0].seg_count, "1");
            }
            other => panic!("unexpected data: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_with_size() {
        let lvm = Lvm::with_runner(expect_command(
            "lvcreate --yes --reportformat json -n lv0 -L 4M vg0",
            "  Logical volume \"lv0\" created.\n",
        ));

        let response = lvm
            .lv()
            .create(
                "lv0",
                &SizeSpec::Size("4M".to_string()),
                "vg0",
                CommandOptions::default(),
            )
            .await
            .expect("create should succeed");

        assert_eq!(response.data, "  Logical volume \"lv0\" created.\n");
    }

    #[tokio::test]
    async fn test_create_with_extents() {
        let lvm = Lvm::with_runner(expect_command(
            "lvcreate --yes --reportformat json --test -n lv0 -l 10 vg0",
            "",
        ));

        lvm.lv()
            .create(
                "lv0",
                &SizeSpec::Extents(10),
                "vg0",
                CommandOptions::builder().test(true).build(),
            )
            .await
            .expect("create should succeed");
    }

    #[tokio::test]
    async fn test_create_rejects_long_name() {
        let lvm = Lvm::with_runner(never_called());
        let name = "l".repeat(65);

        let result = lvm
            .lv()
            .create(&name, &SizeSpec::Extents(1), "vg0", CommandOptions::default())
            .await;

        assert!(matches!(
            result,
            Err(ExecuteError::Validation(NameError::Length { max: 64, .. }))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_group() {
        let lvm = Lvm::with_runner(never_called());

        let result = lvm
            .lv()
            .create("lv0", &SizeSpec::Extents(1), "vg0; rm -rf /", CommandOptions::default())
            .await;

        assert!(matches!(
            result,
            Err(ExecuteError::Validation(NameError::Pattern { .. }))
        ));
    }

    #[tokio::test]
    async fn test_rename() {
        let lvm = Lvm::with_runner(expect_command(
            "lvrename --yes --reportformat json vg0/lv0 lv1",
            "",
        ));

        lvm.lv()
            .rename("vg0", "lv0", "lv1", CommandOptions::default())
            .await
            .expect("rename should succeed");
    }

    #[tokio::test]
    async fn test_rename_rejects_reserved_new_name() {
        let lvm = Lvm::with_runner(never_called());

        let result = lvm
            .lv()
            .rename("vg0", "lv0", "lv_mimage_0", CommandOptions::default())
            .await;

        assert!(matches!(
            result,
            Err(ExecuteError::Validation(NameError::ReservedSubstring { .. }))
        ));
    }

    #[tokio::test]
    async fn test_remove() {
        let lvm = Lvm::with_runner(expect_command(
            "lvremove --yes --reportformat json vg0/lv0",
            "",
        ));

        lvm.lv()
            .remove("vg0", "lv0", CommandOptions::default())
            .await
            .expect("remove should succeed");
    }

    #[tokio::test]
    async fn test_extend() {
        let lvm = Lvm::with_runner(expect_command(
            "lvextend --yes --reportformat json vg0/lv0 -L +1G",
            "",
        ));

        lvm.lv()
            .extend(
                "vg0",
                "lv0",
                &SizeSpec::Size("+1G".to_string()),
                CommandOptions::default(),
            )
            .await
            .expect("extend should succeed");
    }

    #[tokio::test]
    async fn test_reduce() {
        let lvm = Lvm::with_runner(expect_command(
            "lvreduce --yes --reportformat json vg0/lv0 -l 5",
            "",
        ));

        lvm.lv()
            .reduce("vg0", "lv0", &SizeSpec::Extents(5), CommandOptions::default())
            .await
            .expect("reduce should succeed");
    }
}
