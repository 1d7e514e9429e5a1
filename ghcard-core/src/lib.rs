// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # ghcard Core
//!
//! Core types and pure transformations for the `ghcard` profile card tool.
//!
//! This crate has no I/O. It provides:
//!
//! - Raw GitHub API records ([`RawUserProfile`], [`RawRepository`])
//! - The canonical card record ([`NormalizedProfile`])
//! - The color palette offered to users ([`ColorChoice`], [`Theme`])
//! - Login validation ([`validate_login`])
//! - The profile normalizer ([`normalize`])
//!
//! ## Example
//!
//! ```
//! use ghcard_core::{normalize, RawUserProfile};
//!
//! let raw: RawUserProfile = serde_json::from_str(r#"{"login": "octocat", "name": null}"#).unwrap();
//! let profile = normalize(&raw, 5, "blue");
//!
//! assert_eq!(profile.name(), "octocat");
//! assert_eq!(profile.star_total(), 5);
//! ```

pub mod error;
pub mod login;
pub mod models;
pub mod normalize;

// Re-export error types
pub use error::CoreError;

// Re-export model types
pub use models::{ColorChoice, NormalizedProfile, RawRepository, RawUserProfile, Theme};

pub use login::{validate_login, MAX_LOGIN_LEN};
pub use normalize::{normalize, MAPS_PLACE_URL, NO_LINK, NO_LOCATION, NO_NAME};
