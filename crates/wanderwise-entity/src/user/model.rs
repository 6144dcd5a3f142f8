//! Principal (authenticated user) and profile models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::role::UserRole;

/// Self-declared gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    PreferNotToSay,
}

impl Gender {
    /// Parse a stored value, ignoring anything unrecognised.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "non_binary" | "non-binary" => Some(Self::NonBinary),
            "prefer_not_to_say" => Some(Self::PreferNotToSay),
            _ => None,
        }
    }

    /// Return the gender as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::NonBinary => "non_binary",
            Self::PreferNotToSay => "prefer_not_to_say",
        }
    }
}

/// Public profile details of a principal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub experience: Option<String>,
}

impl Profile {
    /// First and last name joined, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// The authenticated user held by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Public handle.
    pub username: String,
    /// Platform role.
    pub role: UserRole,
    /// Profile details.
    pub profile: Profile,
    /// Date of birth, when provided.
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    /// Gender, when provided.
    #[serde(default)]
    pub gender: Option<Gender>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Whether the account may sign in.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Principal {
    /// Name shown to other users: full name, falling back to the username.
    pub fn display_name(&self) -> String {
        let full = self.profile.full_name();
        if full.is_empty() {
            self.username.clone()
        } else {
            full
        }
    }
}

fn default_true() -> bool {
    true
}

/// A partial profile change. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub languages: Option<Vec<String>>,
    pub experience: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
}

impl ProfileUpdate {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Return a copy of `principal` with this update merged in.
    pub fn merged_into(&self, principal: &Principal) -> Principal {
        let mut merged = principal.clone();
        let profile = &mut merged.profile;

        if let Some(v) = &self.first_name {
            profile.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            profile.last_name = v.clone();
        }
        if let Some(v) = &self.phone {
            profile.phone = Some(v.clone());
        }
        if let Some(v) = &self.location {
            profile.location = Some(v.clone());
        }
        if let Some(v) = &self.bio {
            profile.bio = Some(v.clone());
        }
        if let Some(v) = &self.avatar_url {
            profile.avatar_url = Some(v.clone());
        }
        if let Some(v) = &self.languages {
            profile.languages = v.clone();
        }
        if let Some(v) = &self.experience {
            profile.experience = Some(v.clone());
        }
        if let Some(v) = self.date_of_birth {
            merged.date_of_birth = Some(v);
        }
        if let Some(v) = self.gender {
            merged.gender = Some(v);
        }

        merged
    }
}

/// Fields submitted at registration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Registration {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 3, max = 30, message = "Username must be 3-30 characters"))]
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    pub role: UserRole,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<Gender>,
}

/// A row of the `profiles` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub languages: Vec<String>,
    pub experience: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl ProfileRow {
    /// Convert the row into a principal. Unknown roles fall back to traveler.
    pub fn into_principal(self) -> Principal {
        let role = self.role.parse().unwrap_or(UserRole::Traveler);
        Principal {
            id: self.id,
            email: self.email,
            username: self.username,
            role,
            profile: Profile {
                first_name: self.first_name,
                last_name: self.last_name,
                phone: self.phone,
                location: self.location,
                bio: self.bio,
                avatar_url: self.avatar_url,
                languages: self.languages,
                experience: self.experience,
            },
            date_of_birth: self.date_of_birth,
            gender: self.gender.as_deref().and_then(Gender::parse),
            created_at: self.created_at,
            is_active: self.is_active,
        }
    }
}
