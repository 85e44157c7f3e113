//! Hackathon listings

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use crate::error::{CoreError, Result};
use crate::id::{HackathonId, UserId};

/// How an event (or a participant's preference) is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventFormat {
    Online,
    InPerson,
    Hybrid,
}

impl Display for EventFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventFormat::Online => write!(f, "online"),
            EventFormat::InPerson => write!(f, "in_person"),
            EventFormat::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// A hackathon listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hackathon {
    pub id: HackathonId,

    /// The user who listed the event
    pub owner_id: UserId,

    pub title: String,
    pub description: String,

    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: chrono::DateTime<chrono::Utc>,

    pub format: EventFormat,

    /// Venue for in-person and hybrid events
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub theme: Option<String>,

    pub max_team_size: u32,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Hackathon {
    /// Validate a listing before it is written.
    ///
    /// The end date must not precede the start date and teams need at least
    /// one member.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::invalid_input("title", "title cannot be empty"));
        }
        if self.end_date < self.start_date {
            return Err(CoreError::invalid_input(
                "end_date",
                "end date cannot be before start date",
            ));
        }
        if self.max_team_size == 0 {
            return Err(CoreError::invalid_input(
                "max_team_size",
                "team size must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn sample() -> Hackathon {
        let start = Utc::now();
        Hackathon {
            id: HackathonId::generate(),
            owner_id: UserId::generate(),
            title: "Global AI Hack".to_string(),
            description: "48 hours of building".to_string(),
            start_date: start,
            end_date: start + Duration::days(2),
            format: EventFormat::Hybrid,
            location: Some("Berlin".to_string()),
            theme: Some("AI/ML".to_string()),
            max_team_size: 4,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_hackathon() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_dates() {
        let mut hack = sample();
        hack.end_date = hack.start_date - Duration::hours(1);
        assert!(matches!(
            hack.validate().unwrap_err(),
            CoreError::InvalidInput { .. }
        ));
    }

    #[test]
    fn test_rejects_zero_team_size() {
        let mut hack = sample();
        hack.max_team_size = 0;
        assert!(hack.validate().is_err());
    }

    #[test]
    fn test_rejects_blank_title() {
        let mut hack = sample();
        hack.title = "   ".to_string();
        assert!(hack.validate().is_err());
    }

    #[test]
    fn test_format_serialization() {
        let json = serde_json::to_string(&EventFormat::InPerson).unwrap();
        assert_eq!(json, "\"in_person\"");

        let parsed: EventFormat = serde_json::from_str("\"hybrid\"").unwrap();
        assert_eq!(parsed, EventFormat::Hybrid);
    }
}
