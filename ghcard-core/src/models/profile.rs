//! The normalized profile card record.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Canonical profile record consumed by the renderer.
///
/// Produced only by [`crate::normalize`]; every optional field has already
/// been defaulted. The fields are read-only outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProfile {
    pub(crate) name: String,
    pub(crate) login: String,
    pub(crate) avatar_url: String,
    pub(crate) bio: String,
    pub(crate) blog_url: String,
    pub(crate) profile_url: String,
    pub(crate) location: String,
    pub(crate) map_link: String,
    pub(crate) public_repo_count: u64,
    pub(crate) follower_count: u64,
    pub(crate) following_count: u64,
    pub(crate) star_total: u64,
    pub(crate) color_choice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) member_since: Option<DateTime<Utc>>,
}

impl NormalizedProfile {
    /// Display name, falling back to the login.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// GitHub login.
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Avatar image URL, empty when GitHub sent none.
    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }

    /// Biography, empty when unset.
    pub fn bio(&self) -> &str {
        &self.bio
    }

    /// Blog URL with a scheme, or `#`.
    pub fn blog_url(&self) -> &str {
        &self.blog_url
    }

    /// Profile page URL, or `#`.
    pub fn profile_url(&self) -> &str {
        &self.profile_url
    }

    /// Location text or the placeholder.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Map search link for the location, or `#`.
    pub fn map_link(&self) -> &str {
        &self.map_link
    }

    /// Number of public repositories.
    pub fn public_repo_count(&self) -> u64 {
        self.public_repo_count
    }

    /// Number of followers.
    pub fn follower_count(&self) -> u64 {
        self.follower_count
    }

    /// Number of followed users.
    pub fn following_count(&self) -> u64 {
        self.following_count
    }

    /// Aggregated star count.
    pub fn star_total(&self) -> u64 {
        self.star_total
    }

    /// Color chosen by the user, passed through verbatim.
    pub fn color_choice(&self) -> &str {
        &self.color_choice
    }

    /// Account creation time, when known.
    pub fn member_since(&self) -> Option<DateTime<Utc>> {
        self.member_since
    }

    /// Returns true if the profile has a real location.
    pub fn has_location(&self) -> bool {
        self.map_link != crate::NO_LINK
    }

    /// Returns true if the profile has a blog link.
    pub fn has_blog(&self) -> bool {
        self.blog_url != crate::NO_LINK
    }
}
