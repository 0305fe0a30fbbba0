//! HTTP DTOs for user and profile endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::user::Me;
use crate::domain::user::UserProfile;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to edit the caller's profile. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditProfileRequest {
    pub name: Option<String>,
    pub username: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// The caller's own profile.
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
    pub image: Option<String>,
    pub onboarded: bool,
}

impl From<Me> for MeResponse {
    fn from(me: Me) -> Self {
        Self {
            id: me.id.as_str().to_string(),
            username: me.username,
            name: me.name,
            image: me.image.map(|i| i.as_str().to_string()),
            onboarded: me.onboarded,
        }
    }
}

/// A public profile page with all counters.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub name: Option<String>,
    pub username: String,
    pub image: Option<String>,
    pub outfit_post_count: i32,
    pub hoodie_post_count: i32,
    pub shirt_post_count: i32,
    pub pants_post_count: i32,
    pub shoes_post_count: i32,
    pub watch_post_count: i32,
    pub image_count: i32,
    pub like_count: i32,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.as_str().to_string(),
            name: profile.name,
            username: profile.username,
            image: profile.image.map(|i| i.as_str().to_string()),
            outfit_post_count: profile.counts.outfit,
            hoodie_post_count: profile.counts.hoodie,
            shirt_post_count: profile.counts.shirt,
            pants_post_count: profile.counts.pants,
            shoes_post_count: profile.counts.shoes,
            watch_post_count: profile.counts.watch,
            image_count: profile.counts.images,
            like_count: profile.counts.likes,
        }
    }
}

/// Response for username existence checks.
#[derive(Debug, Clone, Serialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

/// Response for profile edits.
#[derive(Debug, Clone, Serialize)]
pub struct EditProfileResponse {
    pub username: String,
}

/// Response for profile image replacement.
#[derive(Debug, Clone, Serialize)]
pub struct SetImageResponse {
    pub image: String,
    pub upload_url: String,
}

/// Standard error envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            code: "CONFLICT".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}
