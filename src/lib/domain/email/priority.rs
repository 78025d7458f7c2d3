//! Message priority and its transport-level mapping

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Priority requested by the caller
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    /// Low priority
    Low,

    /// Medium priority
    Medium,

    /// High priority
    #[default]
    High,
}

impl FromStr for Priority {
    type Err = std::convert::Infallible;

    /// Unrecognized values fall back to [`Priority::Medium`], which maps to
    /// [`TransportPriority::Normal`]. Never an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "low" => Priority::Low,
            "high" => Priority::High,
            _ => Priority::Medium,
        })
    }
}

/// Priority level as understood by the transport
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportPriority {
    /// Low transport priority
    Low,

    /// Normal transport priority
    #[default]
    Normal,

    /// High transport priority
    High,
}

impl TransportPriority {
    /// The `X-Priority` header value for this level
    pub fn x_priority(&self) -> &'static str {
        match self {
            TransportPriority::Low => "5",
            TransportPriority::Normal => "3",
            TransportPriority::High => "1",
        }
    }
}

impl From<Priority> for TransportPriority {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Low => TransportPriority::Low,
            Priority::Medium => TransportPriority::Normal,
            Priority::High => TransportPriority::High,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_mapping() {
        assert_eq!(TransportPriority::from(Priority::Low), TransportPriority::Low);
        assert_eq!(
            TransportPriority::from(Priority::Medium),
            TransportPriority::Normal
        );
        assert_eq!(
            TransportPriority::from(Priority::High),
            TransportPriority::High
        );
    }

    #[test]
    fn test_unrecognized_priority_maps_to_normal() {
        let priority: Priority = "urgent!!".parse().unwrap();

        assert_eq!(TransportPriority::from(priority), TransportPriority::Normal);
    }

    #[test]
    fn test_default_priority_is_high() {
        assert_eq!(Priority::default(), Priority::High);
    }

    #[test]
    fn test_x_priority_values() {
        assert_eq!(TransportPriority::Low.x_priority(), "5");
        assert_eq!(TransportPriority::Normal.x_priority(), "3");
        assert_eq!(TransportPriority::High.x_priority(), "1");
    }
}
