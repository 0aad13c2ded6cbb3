//! Validation of LVM object names.
//!
//! Names end up interpolated into a shell command line, so every name that comes from a caller
//! has to pass [`validate_name`] before the command is launched. The rules mirror the ones the
//! LVM2 toolkit enforces itself (see `lvm(8)`, "VALID NAMES").

use std::sync::LazyLock;

use regex::Regex;

/// Names LVM refuses outright.
const RESERVED_NAMES: &[&str] = &[".", "..", "snapshot", "pvmove"];

/// Substrings LVM uses for its own hidden sub-volumes.
const RESERVED_SUBSTRINGS: &[&str] = &["_mlog", "_mimage"];

// The length rule runs first, so the pattern only ever sees non-empty names.
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.+][A-Za-z0-9_.+-]*$").expect("valid name regex"));

/// The kind of object a name belongs to.
///
/// The kinds only differ in the maximum length they allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    LogicalVolume,
    VolumeGroup,
}

impl NameKind {
    pub fn max_length(self) -> usize {
        match self {
            NameKind::LogicalVolume => 64,
            NameKind::VolumeGroup => 128,
        }
    }
}

/// The rule a rejected name violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("Invalid LVM name length: {name} (max {max} characters).")]
    Length { name: String, max: usize },
    #[error("Invalid LVM name: {name}.")]
    Reserved { name: String },
    #[error("Invalid LVM name: {name}.")]
    ReservedSubstring { name: String, substring: &'static str },
    #[error("Invalid LVM name: {name}.")]
    Pattern { name: String },
}

impl NameError {
    /// The name that was rejected.
    pub fn name(&self) -> &str {
        match self {
            NameError::Length { name, .. }
            | NameError::Reserved { name }
            | NameError::ReservedSubstring { name, .. }
            | NameError::Pattern { name } => name,
        }
    }
}

/// Validate a name for the given kind of object.
///
/// Rules are checked in order and the first one that fails is reported:
/// 1. the length is between 1 and [`NameKind::max_length`] characters
/// 2. the name is not a reserved name
/// 3. the name does not contain a reserved substring
/// 4. the name only uses `A-Z a-z 0-9 _ . + -` and does not start with `-`
pub fn validate_name(name: &str, kind: NameKind) -> Result<(), NameError> {
    let max = kind.max_length();
    let length = name.chars().count();
    if length < 1 || length > max {
        return Err(NameError::Length {
            name: name.to_string(),
            max,
        });
    }

    if RESERVED_NAMES.contains(&name) {
        return Err(NameError::Reserved {
            name: name.to_string(),
        });
    }

    if let Some(substring) = RESERVED_SUBSTRINGS
        .iter()
        .copied()
        .find(|substring| name.contains(substring))
    {
        return Err(NameError::ReservedSubstring {
            name: name.to_string(),
            substring,
        });
    }

    if !NAME_PATTERN.is_match(name) {
        return Err(NameError::Pattern {
            name: name.to_string(),
        });
    }

    Ok(())
}

/// Validate a logical volume name.
pub fn validate_logical_volume_name(name: &str) -> Result<(), NameError> {
    validate_name(name, NameKind::LogicalVolume)
}

/// Validate a volume group name.
pub fn validate_volume_group_name(name: &str) -> Result<(), NameError> {
    validate_name(name, NameKind::VolumeGroup)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["vg0", "data_lv", "a.b+c-d", "_hidden", "+plus", "x"] {
            assert_eq!(validate_logical_volume_name(name), Ok(()), "{name}");
            assert_eq!(validate_volume_group_name(name), Ok(()), "{name}");
        }
    }

    #[test]
    fn test_length_limits() {
        let lv_max = "a".repeat(64);
        assert_eq!(validate_logical_volume_name(&lv_max), Ok(()));

        let too_long = "a".repeat(65);
        assert_eq!(
            validate_logical_volume_name(&too_long),
            Err(NameError::Length {
                name: too_long.clone(),
                max: 64
            })
        );
        // The same name is fine for a volume group.
        assert_eq!(validate_volume_group_name(&too_long), Ok(()));

        let vg_too_long = "a".repeat(129);
        assert!(matches!(
            validate_volume_group_name(&vg_too_long),
            Err(NameError::Length { max: 128, .. })
        ));
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(
            validate_volume_group_name(""),
            Err(NameError::Length {
                name: String::new(),
                max: 128
            })
        );
    }

    #[test]
    fn test_reserved_names() {
        for name in [".", "..", "snapshot", "pvmove"] {
            assert_eq!(
                validate_logical_volume_name(name),
                Err(NameError::Reserved {
                    name: name.to_string()
                })
            );
        }
    }

    #[test]
    fn test_snapshot_is_reserved_for_volume_groups() {
        assert!(matches!(
            validate_volume_group_name("snapshot"),
            Err(NameError::Reserved { .. })
        ));
    }

    #[test]
    fn test_reserved_substrings() {
        assert_eq!(
            validate_logical_volume_name("lv_mlog"),
            Err(NameError::ReservedSubstring {
                name: "lv_mlog".to_string(),
                substring: "_mlog"
            })
        );
        assert!(matches!(
            validate_logical_volume_name("my_mimage_2"),
            Err(NameError::ReservedSubstring {
                substring: "_mimage",
                ..
            })
        ));
    }

    #[test]
    fn test_pattern() {
        for name in ["-lv", "has space", "semi;colon", "quote\"", "slash/", "dollar$"] {
            assert_eq!(
                validate_logical_volume_name(name),
                Err(NameError::Pattern {
                    name: name.to_string()
                }),
                "{name}"
            );
        }

        // Hyphens are only rejected at the start.
        assert_eq!(validate_logical_volume_name("lv-1"), Ok(()));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            validate_logical_volume_name(&"a".repeat(65))
                .unwrap_err()
                .to_string(),
            format!("Invalid LVM name length: {} (max 64 characters).", "a".repeat(65))
        );
        assert_eq!(
            validate_logical_volume_name("-lv").unwrap_err().to_string(),
            "Invalid LVM name: -lv."
        );
        assert_eq!(
            validate_logical_volume_name("pvmove").unwrap_err().name(),
            "pvmove"
        );
    }
}
