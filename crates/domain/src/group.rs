//! Power-off rotation groups of the Kyiv region grid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A rotation group: the unit the operator staggers outages by.
///
/// Serialized and displayed as the dotted form used on the operator's site
/// (`"6.1"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PowerOffGroup {
    OneOne,
    OneTwo,
    TwoOne,
    TwoTwo,
    ThreeOne,
    ThreeTwo,
    FourOne,
    FourTwo,
    FiveOne,
    FiveTwo,
    SixOne,
    SixTwo,
}

impl PowerOffGroup {
    /// Every group, in operator order.
    pub const ALL: [Self; 12] = [
        Self::OneOne,
        Self::OneTwo,
        Self::TwoOne,
        Self::TwoTwo,
        Self::ThreeOne,
        Self::ThreeTwo,
        Self::FourOne,
        Self::FourTwo,
        Self::FiveOne,
        Self::FiveTwo,
        Self::SixOne,
        Self::SixTwo,
    ];

    /// Dotted group label (`"6.1"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneOne => "1.1",
            Self::OneTwo => "1.2",
            Self::TwoOne => "2.1",
            Self::TwoTwo => "2.2",
            Self::ThreeOne => "3.1",
            Self::ThreeTwo => "3.2",
            Self::FourOne => "4.1",
            Self::FourTwo => "4.2",
            Self::FiveOne => "5.1",
            Self::FiveTwo => "5.2",
            Self::SixOne => "6.1",
            Self::SixTwo => "6.2",
        }
    }

    /// Key under which the operator publishes this group's hourly slots.
    #[must_use]
    pub fn schedule_key(self) -> String {
        format!("GPV{}", self.as_str())
    }
}

impl fmt::Display for PowerOffGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerOffGroup {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let label = trimmed.strip_prefix("GPV").unwrap_or(trimmed);
        Self::ALL
            .into_iter()
            .find(|group| group.as_str() == label)
            .ok_or_else(|| ValidationError::UnknownGroup(s.to_string()))
    }
}

impl TryFrom<String> for PowerOffGroup {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PowerOffGroup> for String {
    fn from(group: PowerOffGroup) -> Self {
        group.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_dotted_label() {
        assert_eq!("6.1".parse::<PowerOffGroup>(), Ok(PowerOffGroup::SixOne));
        assert_eq!("1.2".parse::<PowerOffGroup>(), Ok(PowerOffGroup::OneTwo));
    }

    #[test]
    fn should_parse_operator_key() {
        assert_eq!(
            "GPV3.2".parse::<PowerOffGroup>(),
            Ok(PowerOffGroup::ThreeTwo)
        );
    }

    #[test]
    fn should_reject_unknown_group() {
        let err = "7.1".parse::<PowerOffGroup>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownGroup("7.1".to_string()));
    }

    #[test]
    fn should_build_schedule_key() {
        assert_eq!(PowerOffGroup::SixOne.schedule_key(), "GPV6.1");
    }

    #[test]
    fn should_roundtrip_every_group_through_display() {
        for group in PowerOffGroup::ALL {
            assert_eq!(group.to_string().parse::<PowerOffGroup>(), Ok(group));
        }
    }

    #[test]
    fn should_serialize_as_dotted_string() {
        let json = serde_json::to_string(&PowerOffGroup::FiveTwo).unwrap();
        assert_eq!(json, "\"5.2\"");
        let parsed: PowerOffGroup = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, PowerOffGroup::FiveTwo);
    }

    #[test]
    fn should_fail_to_deserialize_unknown_group() {
        let result = serde_json::from_str::<PowerOffGroup>("\"9.9\"");
        assert!(result.is_err());
    }
}
