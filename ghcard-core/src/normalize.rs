//! Profile normalization.
//!
//! Maps a [`RawUserProfile`] plus the aggregated star total and the chosen
//! color into a [`NormalizedProfile`]. Text fields resolve through a fixed
//! fallback chain each; a value that is absent or blank after trimming
//! counts as missing, so `null` and `""` behave the same.

use url::form_urlencoded;

use crate::models::{NormalizedProfile, RawUserProfile};

/// Name shown when neither a display name nor a login is present.
pub const NO_NAME: &str = "No Name Provided";

/// Location shown when the user has none.
pub const NO_LOCATION: &str = "No Location Provided";

/// Link target used for absent URLs.
pub const NO_LINK: &str = "#";

/// Place-search URL prefix for location links.
pub const MAPS_PLACE_URL: &str = "https://www.google.com/maps/place/";

// ============================================================================
// Defaulting Table
// ============================================================================

/// Where a text field's value may come from.
#[derive(Debug, Clone, Copy)]
enum Source {
    Name,
    Login,
    AvatarUrl,
    Bio,
    Blog,
    HtmlUrl,
    Location,
    Literal(&'static str),
}

impl Source {
    fn read(self, raw: &RawUserProfile) -> Option<&str> {
        let value = match self {
            Self::Name => raw.name.as_deref(),
            Self::Login => Some(raw.login.as_str()),
            Self::AvatarUrl => raw.avatar_url.as_deref(),
            Self::Bio => raw.bio.as_deref(),
            Self::Blog => raw.blog.as_deref(),
            Self::HtmlUrl => raw.html_url.as_deref(),
            Self::Location => raw.location.as_deref(),
            Self::Literal(text) => return Some(text),
        };
        value.map(str::trim).filter(|v| !v.is_empty())
    }
}

const NAME: &[Source] = &[Source::Name, Source::Login, Source::Literal(NO_NAME)];
const LOGIN: &[Source] = &[Source::Login, Source::Literal("")];
const AVATAR_URL: &[Source] = &[Source::AvatarUrl, Source::Literal("")];
const BIO: &[Source] = &[Source::Bio, Source::Literal("")];
const PROFILE_URL: &[Source] = &[Source::HtmlUrl, Source::Literal(NO_LINK)];
const BLOG: &[Source] = &[Source::Blog];
const LOCATION: &[Source] = &[Source::Location];

/// Returns the first present value in the chain.
fn resolve<'a>(raw: &'a RawUserProfile, chain: &[Source]) -> Option<&'a str> {
    chain.iter().find_map(|source| source.read(raw))
}

fn resolve_text(raw: &RawUserProfile, chain: &[Source]) -> String {
    resolve(raw, chain).unwrap_or_default().to_string()
}

// ============================================================================
// Normalizer
// ============================================================================

/// Builds the card record from a raw user, the star total and a color.
///
/// Never fails; missing fields get defaults. The color is not validated.
pub fn normalize(raw: &RawUserProfile, star_total: u64, color_choice: &str) -> NormalizedProfile {
    let blog_url = resolve(raw, BLOG).map_or_else(|| NO_LINK.to_string(), with_scheme);

    let (location, map_link) = match resolve(raw, LOCATION) {
        Some(place) => (place.to_string(), map_link(place)),
        None => (NO_LOCATION.to_string(), NO_LINK.to_string()),
    };

    NormalizedProfile {
        name: resolve_text(raw, NAME),
        login: resolve_text(raw, LOGIN),
        avatar_url: resolve_text(raw, AVATAR_URL),
        bio: resolve_text(raw, BIO),
        blog_url,
        profile_url: resolve_text(raw, PROFILE_URL),
        location,
        map_link,
        public_repo_count: raw.public_repos.unwrap_or(0),
        follower_count: raw.followers.unwrap_or(0),
        following_count: raw.following.unwrap_or(0),
        star_total,
        color_choice: color_choice.to_string(),
        member_since: raw.created_at,
    }
}

/// Prefixes `https://` when the URL carries no scheme.
fn with_scheme(url: &str) -> String {
    if has_scheme(url) {
        url.to_string()
    } else if let Some(rest) = url.strip_prefix("//") {
        format!("https://{rest}")
    } else {
        format!("https://{url}")
    }
}

/// A scheme is `letter *(letter / digit / "+" / "-" / ".")` followed by `://`.
fn has_scheme(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Place-search link with the location form-encoded (spaces become `+`).
fn map_link(location: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(location.as_bytes()).collect();
    format!("{MAPS_PLACE_URL}{encoded}")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(login: &str) -> RawUserProfile {
        RawUserProfile {
            login: login.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_name_falls_back_to_login() {
        let profile = normalize(&raw("octocat"), 0, "blue");
        assert_eq!(profile.name(), "octocat");
    }

    #[test]
    fn test_name_placeholder_without_login() {
        let profile = normalize(&raw(""), 0, "blue");
        assert_eq!(profile.name(), NO_NAME);
    }

    #[test]
    fn test_blank_name_counts_as_missing() {
        let mut user = raw("octocat");
        user.name = Some("   ".to_string());
        assert_eq!(normalize(&user, 0, "blue").name(), "octocat");
    }

    #[test]
    fn test_name_is_trimmed() {
        let mut user = raw("octocat");
        user.name = Some(" The Octocat ".to_string());
        assert_eq!(normalize(&user, 0, "blue").name(), "The Octocat");
    }

    #[test]
    fn test_bio_defaults_to_empty() {
        let mut user = raw("octocat");
        assert_eq!(normalize(&user, 0, "blue").bio(), "");

        user.bio = Some(String::new());
        assert_eq!(normalize(&user, 0, "blue").bio(), "");
    }

    #[test]
    fn test_blog_absent_or_empty() {
        let mut user = raw("octocat");
        assert_eq!(normalize(&user, 0, "blue").blog_url(), NO_LINK);

        user.blog = Some(String::new());
        let profile = normalize(&user, 0, "blue");
        assert_eq!(profile.blog_url(), NO_LINK);
        assert!(!profile.has_blog());
    }

    #[test]
    fn test_blog_scheme_handling() {
        let cases = [
            ("github.blog", "https://github.blog"),
            ("http://example.com", "http://example.com"),
            ("https://example.com/a", "https://example.com/a"),
            ("HTTPS://EXAMPLE.COM", "HTTPS://EXAMPLE.COM"),
            ("//cdn.example.com", "https://cdn.example.com"),
            ("localhost:8080", "https://localhost:8080"),
            ("ftp://files.example.com", "ftp://files.example.com"),
        ];

        for (input, expected) in cases {
            let mut user = raw("octocat");
            user.blog = Some(input.to_string());
            assert_eq!(normalize(&user, 0, "blue").blog_url(), expected, "blog {input}");
        }
    }

    #[test]
    fn test_missing_location() {
        let profile = normalize(&raw("octocat"), 0, "blue");
        assert_eq!(profile.location(), NO_LOCATION);
        assert_eq!(profile.map_link(), NO_LINK);
        assert!(!profile.has_location());
    }

    #[test]
    fn test_location_whitespace_becomes_plus() {
        let mut user = raw("octocat");
        user.location = Some("San Francisco CA".to_string());
        let profile = normalize(&user, 0, "blue");

        assert_eq!(profile.location(), "San Francisco CA");
        assert!(profile.map_link().contains("San+Francisco+CA"));
        assert!(profile.map_link().starts_with(MAPS_PLACE_URL));
    }

    #[test]
    fn test_location_punctuation_is_encoded() {
        let mut user = raw("octocat");
        user.location = Some("Zürich, CH".to_string());
        let profile = normalize(&user, 0, "blue");
        assert_eq!(
            profile.map_link(),
            format!("{MAPS_PLACE_URL}Z%C3%BCrich%2C+CH")
        );
    }

    #[test]
    fn test_counts_pass_through_and_default_to_zero() {
        let mut user = raw("octocat");
        user.public_repos = Some(8);
        user.followers = Some(20);
        let profile = normalize(&user, 42, "red");

        assert_eq!(profile.public_repo_count(), 8);
        assert_eq!(profile.follower_count(), 20);
        assert_eq!(profile.following_count(), 0);
        assert_eq!(profile.star_total(), 42);
    }

    #[test]
    fn test_color_is_not_validated() {
        let profile = normalize(&raw("octocat"), 0, "Chartreuse");
        assert_eq!(profile.color_choice(), "Chartreuse");
    }

    #[test]
    fn test_profile_url_default() {
        assert_eq!(normalize(&raw("octocat"), 0, "blue").profile_url(), NO_LINK);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut user = raw("octocat");
        user.name = Some("The Octocat".to_string());
        user.location = Some("San Francisco".to_string());
        user.blog = Some("github.blog".to_string());

        assert_eq!(normalize(&user, 7, "pink"), normalize(&user, 7, "pink"));
    }
}
