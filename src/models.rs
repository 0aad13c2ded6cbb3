//! Records reported by the LVM2 summary commands (`vgs`, `lvs`, `pvs`).
//!
//! The toolkit reports every column as a string, sizes included (e.g. `"4.00m"`). Each record
//! comes in a brief variant, holding the default columns, and a verbose variant holding the
//! columns the toolkit adds when `--verbose` is passed.

use serde::{Deserialize, Serialize};

/// Records of a summary report, in the variant selected by
/// [`CommandOptions::verbose`](crate::command::CommandOptions::verbose).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Records<B, V> {
    Brief(Vec<B>),
    Verbose(Vec<V>),
}

impl<B, V> Records<B, V> {
    pub fn len(&self) -> usize {
        match self {
            Records::Brief(records) => records.len(),
            Records::Verbose(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Volume group, default `vgs` columns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeGroup {
    pub vg_name: String,
    pub pv_count: String,
    pub lv_count: String,
    pub snap_count: String,
    pub vg_attr: String,
    pub vg_size: String,
    pub vg_free: String,
}

/// Volume group, `vgs --verbose` columns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeGroupVerbose {
    #[serde(flatten)]
    pub base: VolumeGroup,
    #[serde(default)]
    pub vg_extent_size: String,
    #[serde(default)]
    pub vg_uuid: String,
    #[serde(default)]
    pub vg_profile: String,
}

/// Logical volume, default `lvs` columns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogicalVolume {
    pub lv_name: String,
    pub vg_name: String,
    pub lv_attr: String,
    pub lv_size: String,
    pub pool_lv: String,
    pub origin: String,
    pub data_percent: String,
    pub metadata_percent: String,
    pub move_pv: String,
    pub mirror_log: String,
    pub copy_percent: String,
    pub convert_lv: String,
}

/// Logical volume, `lvs --verbose` columns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalVolumeVerbose {
    #[serde(flatten)]
    pub base: LogicalVolume,
    #[serde(default)]
    pub seg_count: String,
    #[serde(default)]
    pub lv_major: String,
    #[serde(default)]
    pub lv_minor: String,
    #[serde(default)]
    pub lv_kernel_major: String,
    #[serde(default)]
    pub lv_kernel_minor: String,
    #[serde(default)]
    pub lv_uuid: String,
    #[serde(default)]
    pub lv_profile: String,
}

/// Physical volume, default `pvs` columns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalVolume {
    pub pv_name: String,
    pub vg_name: String,
    pub pv_fmt: String,
    pub pv_attr: String,
    pub pv_size: String,
    pub pv_free: String,
}

/// Physical volume, `pvs --verbose` columns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalVolumeVerbose {
    #[serde(flatten)]
    pub base: PhysicalVolume,
    #[serde(default)]
    pub dev_size: String,
    #[serde(default)]
    pub pv_uuid: String,
}

pub type VolumeGroups = Records<VolumeGroup, VolumeGroupVerbose>;
pub type LogicalVolumes = Records<LogicalVolume, LogicalVolumeVerbose>;
pub type PhysicalVolumes = Records<PhysicalVolume, PhysicalVolumeVerbose>;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_logical_volume_from_report() {
        let lv: LogicalVolume = serde_json::from_value(json!({
            "lv_name": "root",
            "vg_name": "vg0",
            "lv_attr": "-wi-ao----",
            "lv_size": "4.00m",
            "pool_lv": "",
            "origin": "",
            "data_percent": "",
            "metadata_percent": "",
            "move_pv": "",
            "mirror_log": "",
            "copy_percent": "",
            "convert_lv": ""
        }))
        .unwrap();

        assert_eq!(lv.lv_name, "root");
        assert_eq!(lv.vg_name, "vg0");
        assert_eq!(lv.lv_size, "4.00m");
    }

    #[test]
    fn test_verbose_record_flattens_base_columns() {
        let vg: VolumeGroupVerbose = serde_json::from_value(json!({
            "vg_name": "vg0",
            "vg_attr": "wz--n-",
            "vg_extent_size": "4.00m",
            "pv_count": "1",
            "lv_count": "2",
            "snap_count": "0",
            "vg_size": "<10.00g",
            "vg_free": "2.00g",
            "vg_uuid": "abc",
            "vg_profile": ""
        }))
        .unwrap();

        assert_eq!(vg.base.vg_name, "vg0");
        assert_eq!(vg.base.lv_count, "2");
        assert_eq!(vg.vg_extent_size, "4.00m");
        assert_eq!(vg.vg_uuid, "abc");
    }

    #[test]
    fn test_missing_columns_default_to_empty() {
        let pv: PhysicalVolume = serde_json::from_value(json!({"pv_name": "/dev/loop0"})).unwrap();
        assert_eq!(pv.pv_name, "/dev/loop0");
        assert_eq!(pv.vg_name, "");
    }

    #[test]
    fn test_records_serialize_as_plain_list() {
        let records: PhysicalVolumes = Records::Brief(vec![PhysicalVolume {
            pv_name: "/dev/loop0".to_string(),
            ..Default::default()
        }]);

        assert_eq!(records.len(), 1);
        assert_eq!(
            serde_json::to_value(&records).unwrap()[0]["pv_name"],
            json!("/dev/loop0")
        );
    }
}
