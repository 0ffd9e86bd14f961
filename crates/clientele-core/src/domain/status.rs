use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle shared by appointments and tasks. Any status may move to any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityStatus {
    #[default]
    Pending,
    Done,
    Cancelled,
}

impl ActivityStatus {
    pub const ALL: [ActivityStatus; 3] = [
        ActivityStatus::Pending,
        ActivityStatus::Done,
        ActivityStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Pending => "PENDING",
            ActivityStatus::Done => "DONE",
            ActivityStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(ActivityStatus::Pending),
            "DONE" => Ok(ActivityStatus::Done),
            "CANCELLED" => Ok(ActivityStatus::Cancelled),
            other => Err(CoreError::InvalidStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ActivityStatus;
    use std::str::FromStr;

    #[test]
    fn parses_stored_names_only() {
        for status in ActivityStatus::ALL {
            assert_eq!(ActivityStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert!(ActivityStatus::from_str("pending").is_err());
        assert!(ActivityStatus::from_str("ARCHIVED").is_err());
    }
}
