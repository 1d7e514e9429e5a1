//! Domain models for ghcard.
//!
//! ## Submodules
//!
//! - [`github`] - Raw records as returned by the GitHub REST API
//! - [`profile`] - The normalized card record
//! - [`palette`] - Color choices and their themes

mod github;
mod palette;
mod profile;

// Re-export everything at the models level
pub use github::{RawRepository, RawUserProfile};
pub use palette::{ColorChoice, Theme};
pub use profile::NormalizedProfile;
