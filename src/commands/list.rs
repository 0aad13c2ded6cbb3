//! Command to list volume groups, logical volumes or physical volumes.
//!
//! Listings are printed as a table with the same column headers the toolkit uses in its own
//! reports. With `--verbose` the toolkit reports more columns and the table grows accordingly.

use std::fmt::Display;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::Serialize;

use crate::{
    command::CommandOptions,
    commands::CommandWithOutput,
    executor::Response,
    models::{LogicalVolumes, PhysicalVolumes, Records, VolumeGroups},
    resources::Lvm,
    table::Table,
};

/// What to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListTarget {
    VolumeGroups,
    VolumeGroup(String),
    LogicalVolumes,
    LogicalVolumesIn(String),
    PhysicalVolumes,
    PhysicalVolume(String),
}

pub struct List {
    target: ListTarget,
    options: CommandOptions,
    lvm: Lvm,
}

impl List {
    pub fn new(target: ListTarget, options: CommandOptions, lvm: Lvm) -> Self {
        Self {
            target,
            options,
            lvm,
        }
    }
}

/// Records returned by the list command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ListResult {
    VolumeGroups(VolumeGroups),
    LogicalVolumes(LogicalVolumes),
    PhysicalVolumes(PhysicalVolumes),
}

impl From<&ListResult> for Table {
    fn from(value: &ListResult) -> Self {
        match value {
            ListResult::VolumeGroups(Records::Brief(groups)) => Table::from_iter(
                groups,
                &[
                    ("VG", |g| g.vg_name.clone()),
                    ("#PV", |g| g.pv_count.clone()),
                    ("#LV", |g| g.lv_count.clone()),
                    ("#SN", |g| g.snap_count.clone()),
                    ("Attr", |g| g.vg_attr.clone()),
                    ("VSize", |g| g.vg_size.clone()),
                    ("VFree", |g| g.vg_free.clone()),
                ],
            ),
            ListResult::VolumeGroups(Records::Verbose(groups)) => Table::from_iter(
                groups,
                &[
                    ("VG", |g| g.base.vg_name.clone()),
                    ("Attr", |g| g.base.vg_attr.clone()),
                    ("Ext", |g| g.vg_extent_size.clone()),
                    ("#PV", |g| g.base.pv_count.clone()),
                    ("#LV", |g| g.base.lv_count.clone()),
                    ("#SN", |g| g.base.snap_count.clone()),
                    ("VSize", |g| g.base.vg_size.clone()),
                    ("VFree", |g| g.base.vg_free.clone()),
                    ("VG UUID", |g| g.vg_uuid.clone()),
                    ("VProfile", |g| g.vg_profile.clone()),
                ],
            ),
            ListResult::LogicalVolumes(Records::Brief(volumes)) => Table::from_iter(
                volumes,
                &[
                    ("LV", |v| v.lv_name.clone()),
                    ("VG", |v| v.vg_name.clone()),
                    ("Attr", |v| v.lv_attr.clone()),
                    ("LSize", |v| v.lv_size.clone()),
                    ("Pool", |v| v.pool_lv.clone()),
                    ("Origin", |v| v.origin.clone()),
                    ("Data%", |v| v.data_percent.clone()),
                    ("Meta%", |v| v.metadata_percent.clone()),
                    ("Move", |v| v.move_pv.clone()),
                    ("Log", |v| v.mirror_log.clone()),
                    ("Cpy%Sync", |v| v.copy_percent.clone()),
                    ("Convert", |v| v.convert_lv.clone()),
                ],
            ),
            ListResult::LogicalVolumes(Records::Verbose(volumes)) => Table::from_iter(
                volumes,
                &[
                    ("LV", |v| v.base.lv_name.clone()),
                    ("VG", |v| v.base.vg_name.clone()),
                    ("#Seg", |v| v.seg_count.clone()),
                    ("Attr", |v| v.base.lv_attr.clone()),
                    ("LSize", |v| v.base.lv_size.clone()),
                    ("Maj", |v| v.lv_major.clone()),
                    ("Min", |v| v.lv_minor.clone()),
                    ("KMaj", |v| v.lv_kernel_major.clone()),
                    ("KMin", |v| v.lv_kernel_minor.clone()),
                    ("Pool", |v| v.base.pool_lv.clone()),
                    ("Origin", |v| v.base.origin.clone()),
                    ("LV UUID", |v| v.lv_uuid.clone()),
                    ("LProfile", |v| v.lv_profile.clone()),
                ],
            ),
            ListResult::PhysicalVolumes(Records::Brief(volumes)) => Table::from_iter(
                volumes,
                &[
                    ("PV", |v| v.pv_name.clone()),
                    ("VG", |v| v.vg_name.clone()),
                    ("Fmt", |v| v.pv_fmt.clone()),
                    ("Attr", |v| v.pv_attr.clone()),
                    ("PSize", |v| v.pv_size.clone()),
                    ("PFree", |v| v.pv_free.clone()),
                ],
            ),
            ListResult::PhysicalVolumes(Records::Verbose(volumes)) => Table::from_iter(
                volumes,
                &[
                    ("PV", |v| v.base.pv_name.clone()),
                    ("VG", |v| v.base.vg_name.clone()),
                    ("Fmt", |v| v.base.pv_fmt.clone()),
                    ("Attr", |v| v.base.pv_attr.clone()),
                    ("PSize", |v| v.base.pv_size.clone()),
                    ("PFree", |v| v.base.pv_free.clone()),
                    ("DevSize", |v| v.dev_size.clone()),
                    ("PV UUID", |v| v.pv_uuid.clone()),
                ],
            ),
        }
    }
}

impl Display for ListResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Table::from(self).fmt(f)
    }
}

/// Take the records out of a response, failing when the report could not be read.
fn records<T>(response: Response<Option<T>>, command: &str) -> Result<T> {
    match response.data {
        Some(records) => Ok(records),
        None => {
            let reasons: Vec<String> = response
                .diagnostics
                .iter()
                .map(ToString::to_string)
                .collect();
            bail!(
                "could not read the report of {}: {}",
                command,
                reasons.join(", ")
            )
        }
    }
}

#[async_trait]
impl CommandWithOutput for List {
    type Output = ListResult;

    async fn execute(&mut self) -> Result<Self::Output> {
        let options = self.options;

        Ok(match &self.target {
            ListTarget::VolumeGroups => ListResult::VolumeGroups(records(
                self.lvm
                    .vg()
                    .list(options)
                    .await
                    .context("listing volume groups")?,
                "vgs",
            )?),
            ListTarget::VolumeGroup(name) => ListResult::VolumeGroups(records(
                self.lvm
                    .vg()
                    .get(name, options)
                    .await
                    .with_context(|| format!("getting volume group '{name}'"))?,
                "vgs",
            )?),
            ListTarget::LogicalVolumes => ListResult::LogicalVolumes(records(
                self.lvm
                    .lv()
                    .list(options)
                    .await
                    .context("listing logical volumes")?,
                "lvs",
            )?),
            ListTarget::LogicalVolumesIn(volume_group) => ListResult::LogicalVolumes(records(
                self.lvm
                    .lv()
                    .list_in(volume_group, options)
                    .await
                    .with_context(|| {
                        format!("listing logical volumes of volume group '{volume_group}'")
                    })?,
                "lvs",
            )?),
            ListTarget::PhysicalVolumes => ListResult::PhysicalVolumes(records(
                self.lvm
                    .pv()
                    .list(options)
                    .await
                    .context("listing physical volumes")?,
                "pvs",
            )?),
            ListTarget::PhysicalVolume(device) => ListResult::PhysicalVolumes(records(
                self.lvm
                    .pv()
                    .get(device, options)
                    .await
                    .with_context(|| format!("getting physical volume '{device}'"))?,
                "pvs",
            )?),
        })
    }
}
