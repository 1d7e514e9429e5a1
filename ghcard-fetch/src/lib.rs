// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # ghcard Fetch
//!
//! GitHub REST access for the `ghcard` profile card tool.
//!
//! - [`client::GitHubClient`] - GET against a fixed API host, JSON in, classified errors out
//! - [`api::GitHubApi`] - The request seam the pipeline and paginator depend on
//! - [`paginator::Paginator`] - Star aggregation across every repository page
//!
//! Nothing in this crate retries. A failed request surfaces as an
//! [`HttpError`] and the caller decides what to do with it.
//!
//! ## Example
//!
//! ```ignore
//! use ghcard_fetch::{GitHubApi, GitHubClient, Paginator, StarSource};
//!
//! let client = GitHubClient::new()?;
//! let user = client.user("octocat").await?;
//! let paginator = Paginator::new(&client, 100);
//! let stars = paginator
//!     .collect_star_total("octocat", user.public_repos.unwrap_or(0))
//!     .await?;
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod paginator;

pub use api::{GitHubApi, StarSource};
pub use client::{ClientSettings, GitHubClient, DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS, USER_AGENT};
pub use error::HttpError;
pub use paginator::{Paginator, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
