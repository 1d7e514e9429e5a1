//! Raw GitHub API records.
//!
//! Only the fields the card uses are modelled; unknown fields are ignored.
//! Every field tolerates being absent so a sparse user object still
//! deserializes and the normalizer can fill defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user object from `GET /users/{login}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUserProfile {
    /// GitHub login.
    #[serde(default)]
    pub login: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Free-form biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// Blog or website, often without a scheme. GitHub sends `""` when unset.
    #[serde(default)]
    pub blog: Option<String>,
    /// Free-form location text.
    #[serde(default)]
    pub location: Option<String>,
    /// Profile page URL.
    #[serde(default)]
    pub html_url: Option<String>,
    /// Number of public repositories.
    #[serde(default)]
    pub public_repos: Option<u64>,
    /// Number of followers.
    #[serde(default)]
    pub followers: Option<u64>,
    /// Number of followed users.
    #[serde(default)]
    pub following: Option<u64>,
    /// Account creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A repository object from `GET /users/{login}/repos` or `/starred`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRepository {
    /// Repository name.
    #[serde(default)]
    pub name: String,
    /// Star count.
    #[serde(default)]
    pub stargazers_count: u64,
}

impl RawRepository {
    /// Sums the star counts of a page of repositories.
    pub fn star_sum(repos: &[RawRepository]) -> u64 {
        repos.iter().map(|r| r.stargazers_count).sum()
    }
}
