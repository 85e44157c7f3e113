//! User profiles and teammate search
//!
//! A profile is keyed 1:1 by the authenticated user's identity. Skills,
//! spoken languages, and hackathon interests live as embedded collections on
//! the profile row rather than as separate tables.

use serde::{Deserialize, Serialize};

use crate::hackathon::EventFormat;
use crate::id::UserId;

/// Whether a user is looking for a team right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    ActivelyLooking,
    Open,
    Busy,
}

/// Self-assessed skill level, shared by skills and spoken languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub proficiency: Proficiency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpokenLanguage {
    pub language: String,
    pub proficiency: Proficiency,
}

/// A kind of hackathon the user wants to be matched for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HackathonInterest {
    pub interest: String,
    pub format: EventFormat,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location_preference: Option<String>,
}

/// User profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// The authenticated user this profile belongs to
    pub user_id: UserId,

    pub full_name: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub avatar_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timezone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub github_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub linkedin_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub website_url: Option<String>,

    pub availability: Availability,

    #[serde(default)]
    pub skills: Vec<Skill>,

    #[serde(default)]
    pub languages: Vec<SpokenLanguage>,

    #[serde(default)]
    pub interests: Vec<HackathonInterest>,

    pub created_at: chrono::DateTime<chrono::Utc>,

    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Profile {
    /// A fresh profile with nothing but a name, available but not searching
    pub fn new(user_id: UserId, full_name: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            user_id,
            full_name: full_name.into(),
            avatar_url: None,
            location: None,
            timezone: None,
            github_url: None,
            linkedin_url: None,
            website_url: None,
            availability: Availability::Open,
            skills: Vec::new(),
            languages: Vec::new(),
            interests: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Filters for teammate search.
///
/// All criteria are optional and combined with AND; an empty filter matches
/// every profile. Matching happens over the fetched rows, the same shape the
/// search screen applies.
#[derive(Debug, Clone, Default)]
pub struct ProfileFilter {
    /// Substring match against name or any skill name
    pub search: Option<String>,
    /// Substring match against skill names only
    pub skill: Option<String>,
    /// Substring match against location
    pub location: Option<String>,
    /// Match against any declared hackathon interest format
    pub format: Option<EventFormat>,
}

impl ProfileFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.skill.is_none()
            && self.location.is_none()
            && self.format.is_none()
    }

    pub fn matches(&self, profile: &Profile) -> bool {
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let name_hit = profile.full_name.to_lowercase().contains(&term);
            let skill_hit = profile
                .skills
                .iter()
                .any(|s| s.name.to_lowercase().contains(&term));
            if !name_hit && !skill_hit {
                return false;
            }
        }

        if let Some(skill) = &self.skill {
            let skill = skill.to_lowercase();
            if !profile
                .skills
                .iter()
                .any(|s| s.name.to_lowercase().contains(&skill))
            {
                return false;
            }
        }

        if let Some(location) = &self.location {
            let location = location.to_lowercase();
            match &profile.location {
                Some(loc) if loc.to_lowercase().contains(&location) => {}
                _ => return false,
            }
        }

        if let Some(format) = self.format {
            if !profile.interests.iter().any(|i| i.format == format) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rustacean() -> Profile {
        let mut profile = Profile::new(UserId::generate(), "Ada Lovelace");
        profile.location = Some("London, UK".to_string());
        profile.skills = vec![
            Skill {
                name: "Rust".to_string(),
                proficiency: Proficiency::Expert,
            },
            Skill {
                name: "UI/UX".to_string(),
                proficiency: Proficiency::Beginner,
            },
        ];
        profile.interests = vec![HackathonInterest {
            interest: "Climate Tech".to_string(),
            format: EventFormat::Online,
            location_preference: None,
        }];
        profile
    }

    #[test]
    fn test_empty_filter_matches_everyone() {
        let filter = ProfileFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&rustacean()));
    }

    #[test]
    fn test_search_matches_name_or_skill() {
        let by_name = ProfileFilter {
            search: Some("lovelace".to_string()),
            ..Default::default()
        };
        let by_skill = ProfileFilter {
            search: Some("rust".to_string()),
            ..Default::default()
        };
        let miss = ProfileFilter {
            search: Some("haskell".to_string()),
            ..Default::default()
        };

        assert!(by_name.matches(&rustacean()));
        assert!(by_skill.matches(&rustacean()));
        assert!(!miss.matches(&rustacean()));
    }

    #[test]
    fn test_location_filter() {
        let hit = ProfileFilter {
            location: Some("london".to_string()),
            ..Default::default()
        };
        let miss = ProfileFilter {
            location: Some("tokyo".to_string()),
            ..Default::default()
        };

        assert!(hit.matches(&rustacean()));
        assert!(!miss.matches(&rustacean()));

        // Profiles without a location never match a location filter
        let mut nowhere = rustacean();
        nowhere.location = None;
        assert!(!hit.matches(&nowhere));
    }

    #[test]
    fn test_format_filter() {
        let online = ProfileFilter {
            format: Some(EventFormat::Online),
            ..Default::default()
        };
        let in_person = ProfileFilter {
            format: Some(EventFormat::InPerson),
            ..Default::default()
        };

        assert!(online.matches(&rustacean()));
        assert!(!in_person.matches(&rustacean()));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let filter = ProfileFilter {
            skill: Some("rust".to_string()),
            location: Some("london".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&rustacean()));

        let conflicting = ProfileFilter {
            skill: Some("rust".to_string()),
            location: Some("tokyo".to_string()),
            ..Default::default()
        };
        assert!(!conflicting.matches(&rustacean()));
    }
}
