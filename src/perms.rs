use std::fmt;

use crate::core::Result;
use crate::error::FsError;

/// Which component of a permission triple failed validation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BitsField {
    Owner,
    Group,
    Others,
}

impl fmt::Display for BitsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitsField::Owner => write!(f, "Owner"),
            BitsField::Group => write!(f, "Group"),
            BitsField::Others => write!(f, "Others"),
        }
    }
}

/// A POSIX-style access mode as an owner/group/others triple.
///
/// Each component must be strictly within `[1, 7]`. This is a constrained
/// three-digit octal builder, not a general mode encoder: `0` is rejected.
/// Values are immutable once constructed; rendering yields the 4-character
/// octal form, e.g. `(7, 5, 5)` renders as `"0755"`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PosixPermissions {
    owner: u32,
    group: u32,
    others: u32,
}

impl PosixPermissions {
    /// Validates each component against `[1, 7]` and builds the triple.
    pub fn new(owner: u32, group: u32, others: u32) -> Result<Self> {
        for (field, value) in [
            (BitsField::Owner, owner),
            (BitsField::Group, group),
            (BitsField::Others, others),
        ] {
            if !(1..=7).contains(&value) {
                return Err(FsError::InvalidBits { field, value });
            }
        }
        Ok(Self {
            owner,
            group,
            others,
        })
    }

    /// Numeric mode for the OS, `owner << 6 | group << 3 | others`.
    pub fn mode(&self) -> u32 {
        (self.owner << 6) | (self.group << 3) | self.others
    }
}

impl Default for PosixPermissions {
    /// Full access for everyone: `0777`.
    fn default() -> Self {
        Self {
            owner: 7,
            group: 7,
            others: 7,
        }
    }
}

impl fmt::Display for PosixPermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0{}{}{}", self.owner, self.group, self.others)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_as_four_character_octal() {
        let perms = PosixPermissions::new(7, 5, 5).unwrap();
        assert_eq!(perms.to_string(), "0755");

        let perms = PosixPermissions::new(1, 1, 1).unwrap();
        assert_eq!(perms.to_string(), "0111");

        let perms = PosixPermissions::new(6, 4, 2).unwrap();
        assert_eq!(perms.to_string(), "0642");
    }

    #[test]
    fn test_default_is_0777() {
        assert_eq!(PosixPermissions::default().to_string(), "0777");
    }

    #[test]
    fn test_mode_matches_octal_rendering() {
        assert_eq!(PosixPermissions::new(7, 5, 5).unwrap().mode(), 0o755);
        assert_eq!(PosixPermissions::default().mode(), 0o777);
    }

    #[test]
    fn test_rejects_out_of_range_owner_bits() {
        let err = PosixPermissions::new(0, 7, 7).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Owner bits value of 0 is out of the [1-7] range."
        );
    }

    #[test]
    fn test_rejects_out_of_range_group_bits() {
        let err = PosixPermissions::new(7, 8, 7).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Group bits value of 8 is out of the [1-7] range."
        );
    }

    #[test]
    fn test_rejects_out_of_range_others_bits() {
        let err = PosixPermissions::new(7, 7, 12).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Others bits value of 12 is out of the [1-7] range."
        );
    }

    #[test]
    fn test_reports_field_and_value() {
        match PosixPermissions::new(7, 9, 7).unwrap_err() {
            FsError::InvalidBits { field, value } => {
                assert_eq!(field, BitsField::Group);
                assert_eq!(value, 9);
            }
            other => panic!("expected InvalidBits, got {other:?}"),
        }
    }
}
