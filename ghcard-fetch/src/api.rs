//! The GitHub request seam.
//!
//! The paginator and the pipeline only talk to GitHub through
//! [`GitHubApi`], so tests can substitute canned pages.

use async_trait::async_trait;
use ghcard_core::{RawRepository, RawUserProfile};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::client::GitHubClient;
use crate::error::HttpError;

// ============================================================================
// Star Source
// ============================================================================

/// Which stars the card counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StarSource {
    /// Stars received: sum of `stargazers_count` over the user's repositories.
    #[default]
    Received,
    /// Stars given: number of repositories the user has starred.
    Given,
}

impl StarSource {
    /// Returns the lowercase name used in config and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Given => "given",
        }
    }
}

impl fmt::Display for StarSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// GitHub API Trait
// ============================================================================

/// Requests the card needs from GitHub.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// `GET /users/{login}`.
    async fn user(&self, login: &str) -> Result<RawUserProfile, HttpError>;

    /// `GET /users/{login}/repos?page={page}&per_page={per_page}`.
    async fn repos_page(
        &self,
        login: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawRepository>, HttpError>;

    /// `GET /users/{login}/starred?page={page}&per_page={per_page}`.
    async fn starred_page(
        &self,
        login: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawRepository>, HttpError>;

    /// Fetches one page of the listing that backs `source`.
    async fn star_page(
        &self,
        source: StarSource,
        login: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawRepository>, HttpError> {
        match source {
            StarSource::Received => self.repos_page(login, page, per_page).await,
            StarSource::Given => self.starred_page(login, page, per_page).await,
        }
    }
}

/// Path of the user lookup.
pub fn user_path(login: &str) -> String {
    format!("/users/{login}")
}

/// Path of one page of the user's repositories.
pub fn repos_path(login: &str, page: u32, per_page: u32) -> String {
    format!("/users/{login}/repos?page={page}&per_page={per_page}")
}

/// Path of one page of the user's starred repositories.
pub fn starred_path(login: &str, page: u32, per_page: u32) -> String {
    format!("/users/{login}/starred?page={page}&per_page={per_page}")
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn user(&self, login: &str) -> Result<RawUserProfile, HttpError> {
        self.fetch(&user_path(login)).await
    }

    async fn repos_page(
        &self,
        login: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawRepository>, HttpError> {
        self.fetch(&repos_path(login, page, per_page)).await
    }

    async fn starred_page(
        &self,
        login: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawRepository>, HttpError> {
        self.fetch(&starred_path(login, page, per_page)).await
    }
}
