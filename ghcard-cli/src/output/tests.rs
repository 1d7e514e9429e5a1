//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

use ghcard_core::{normalize, ColorChoice, NormalizedProfile, RawUserProfile};
use ghcard_export::ExportReport;
use std::path::PathBuf;
use std::time::Duration;

use super::{JsonFormatter, TextFormatter};
use crate::pipeline::{RunReport, Stage};
use crate::ExitCode;

fn octocat() -> NormalizedProfile {
    let raw: RawUserProfile = serde_json::from_str(
        r#"{
            "login": "octocat",
            "name": "The Octocat",
            "bio": "Mascot",
            "blog": "https://github.blog",
            "location": "San Francisco",
            "html_url": "https://github.com/octocat",
            "public_repos": 8,
            "followers": 9999,
            "following": 9,
            "created_at": "2011-01-25T18:44:36Z"
        }"#,
    )
    .unwrap();
    normalize(&raw, 42, "blue")
}

fn report(html_path: Option<PathBuf>) -> RunReport {
    RunReport {
        profile: octocat(),
        export: ExportReport {
            pdf_path: PathBuf::from("/cards/The_Octocat.pdf"),
            html_path,
            converter: "/usr/bin/wkhtmltopdf".to_string(),
            duration: Duration::from_millis(1500),
        },
        stages: vec![
            Stage::AwaitingInput,
            Stage::FetchingUser,
            Stage::FetchingRepos,
            Stage::Normalizing,
            Stage::Exporting,
            Stage::Done,
        ],
    }
}

#[cfg(test)]
mod text_formatter_tests {
    use super::*;

    #[test]
    fn test_format_profile() {
        let output = TextFormatter::new(false).format_profile(&octocat());

        assert!(output.starts_with("The Octocat @octocat"));
        assert!(output.contains("Mascot"));
        assert!(output.contains("Location:   San Francisco"));
        assert!(output.contains("Map:        https://www.google.com/maps/place/San+Francisco"));
        assert!(output.contains("Blog:       https://github.blog"));
        assert!(output.contains("Followers:  9999"));
        assert!(output.contains("Stars:      42"));
        assert!(output.contains("Color:      blue"));
        assert!(output.contains("Member since January 2011"));
    }

    #[test]
    fn test_format_sparse_profile() {
        let raw = RawUserProfile {
            login: "ghost".to_string(),
            ..Default::default()
        };
        let output = TextFormatter::new(false).format_profile(&normalize(&raw, 0, "green"));

        assert!(output.starts_with("ghost\n"));
        assert!(output.contains("Location:   No Location Provided"));
        assert!(!output.contains("Map:"));
        assert!(!output.contains("Blog:"));
        assert!(!output.contains("Member since"));
    }

    #[test]
    fn test_format_report() {
        let output = TextFormatter::new(false).format_report(&report(None));

        assert!(output.starts_with("✓ PDF written to /cards/The_Octocat.pdf"));
        assert!(output.contains("The Octocat (blue), 42 stars"));
        assert!(output.contains("in 1500 ms"));
        assert!(!output.contains("HTML kept"));
    }

    #[test]
    fn test_format_report_with_html() {
        let output = TextFormatter::new(false)
            .format_report(&report(Some(PathBuf::from("/cards/The_Octocat.html"))));
        assert!(output.contains("HTML kept at /cards/The_Octocat.html"));
    }

    #[test]
    fn test_format_themes() {
        let output = TextFormatter::new(false).format_themes(ColorChoice::all());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Color"));
        assert!(lines[1].starts_with("green"));
        assert!(lines[2].contains("#26175A"));
        assert!(lines[4].starts_with("red"));
    }

    #[test]
    fn test_no_color_output_has_no_escapes() {
        let formatter = TextFormatter::new(false);
        assert!(!formatter.format_profile(&octocat()).contains('\x1b'));
        assert!(!formatter.format_themes(ColorChoice::all()).contains('\x1b'));
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_format_profile_camel_case() {
        let json = JsonFormatter::new(false).format(&octocat()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["login"], "octocat");
        assert_eq!(value["starTotal"], 42);
        assert_eq!(value["colorChoice"], "blue");
        assert_eq!(value["mapLink"], "https://www.google.com/maps/place/San+Francisco");
    }

    #[test]
    fn test_format_report() {
        let json = JsonFormatter::new(false).format_report(&report(None)).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["pdfPath"], "/cards/The_Octocat.pdf");
        assert!(value.get("htmlPath").is_none());
        assert_eq!(value["durationMs"], 1500);
        assert_eq!(value["profile"]["name"], "The Octocat");
        assert_eq!(value["stages"][0], "awaiting_input");
        assert_eq!(value["stages"][5], "done");
    }

    #[test]
    fn test_format_themes() {
        let json = JsonFormatter::new(false)
            .format_themes(ColorChoice::all())
            .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value.as_array().unwrap().len(), 4);
        assert_eq!(value[0]["name"], "green");
        assert_eq!(value[3]["headerBackground"], "#870603");
        assert_eq!(value[1]["photoBorderColor"], "#73448C");
    }

    #[test]
    fn test_format_error() {
        let json = JsonFormatter::new(false)
            .format_error("GitHub user 'x' not found.", "userNotFound", ExitCode::UserNotFound)
            .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["kind"], "userNotFound");
        assert_eq!(value["exitCode"], 2);
    }

    #[test]
    fn test_pretty_output() {
        let formatter = JsonFormatter::new(true);
        let json = formatter.format_themes(ColorChoice::all()).unwrap();
        assert!(json.contains('\n'));
    }
}
