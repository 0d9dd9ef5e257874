//! Behavioral device classes produced by the classifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::IvClassError;

/// The behavioral class assigned to a measured device.
///
/// All five classes carry a feature-to-weight mapping and are scorable.
/// Ground-truth labels are restricted to [`DeviceClass::LABELABLE`] unless a
/// store explicitly opts in to memcapacitive labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Memristive,
    Ohmic,
    Capacitive,
    Conductive,
    Memcapacitive,
}

impl DeviceClass {
    /// Every scorable class.
    pub const ALL: [DeviceClass; 5] = [
        DeviceClass::Memristive,
        DeviceClass::Ohmic,
        DeviceClass::Capacitive,
        DeviceClass::Conductive,
        DeviceClass::Memcapacitive,
    ];

    /// Classes accepted as ground-truth labels by default.
    pub const LABELABLE: [DeviceClass; 4] = [
        DeviceClass::Memristive,
        DeviceClass::Ohmic,
        DeviceClass::Capacitive,
        DeviceClass::Conductive,
    ];

    /// Lowercase canonical name, matching the persisted JSON form.
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceClass::Memristive => "memristive",
            DeviceClass::Ohmic => "ohmic",
            DeviceClass::Capacitive => "capacitive",
            DeviceClass::Conductive => "conductive",
            DeviceClass::Memcapacitive => "memcapacitive",
        }
    }

    /// Whether this class belongs to the default label set.
    pub fn is_labelable(self) -> bool {
        Self::LABELABLE.contains(&self)
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceClass {
    type Err = IvClassError;

    /// Case-insensitive parse; `"Memristive"` and `"memristive"` both succeed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memristive" => Ok(DeviceClass::Memristive),
            "ohmic" => Ok(DeviceClass::Ohmic),
            "capacitive" => Ok(DeviceClass::Capacitive),
            "conductive" => Ok(DeviceClass::Conductive),
            "memcapacitive" => Ok(DeviceClass::Memcapacitive),
            _ => Err(IvClassError::InvalidLabel {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            "Memristive".parse::<DeviceClass>().unwrap(),
            DeviceClass::Memristive
        );
        assert_eq!(
            "OHMIC".parse::<DeviceClass>().unwrap(),
            DeviceClass::Ohmic
        );
    }

    #[test]
    fn parse_rejects_unknown_class() {
        assert!("banana".parse::<DeviceClass>().is_err());
    }

    #[test]
    fn memcapacitive_is_scorable_but_not_labelable() {
        assert!(DeviceClass::ALL.contains(&DeviceClass::Memcapacitive));
        assert!(!DeviceClass::Memcapacitive.is_labelable());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&DeviceClass::Capacitive).unwrap();
        assert_eq!(json, "\"capacitive\"");
    }
}
