//! HTML rendering of the profile card.
//!
//! Produces one self-contained document with inline CSS so any converter
//! can lay it out without fetching stylesheets. Only the avatar image is
//! referenced remotely.

use chrono::NaiveDate;
use ghcard_core::{ColorChoice, NormalizedProfile, Theme};
use std::fmt::Write as _;

use crate::converter::PaperSize;
use crate::error::ExportError;

/// Options that are not part of the profile itself.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Page size written into the `@page` rule.
    pub paper: PaperSize,
    /// Date printed in the footer, if any.
    pub generated_on: Option<NaiveDate>,
}

const CARD_CSS: &str = r"
* { box-sizing: border-box; }
html, body { margin: 0; padding: 0; }
body {
  background: var(--wrapper-background);
  font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif;
  color: #222;
  -webkit-print-color-adjust: exact;
  print-color-adjust: exact;
}
.wrapper { padding: 48px 40px; }
.header {
  background: var(--header-background);
  color: var(--header-color);
  border-radius: 12px;
  padding: 28px 24px;
  text-align: center;
}
.header img {
  width: 180px;
  height: 180px;
  border-radius: 50%;
  border: 6px solid var(--photo-border-color);
  object-fit: cover;
}
.header h1 { margin: 12px 0 4px; font-size: 34px; }
.header h2 { margin: 0 0 16px; font-size: 20px; font-weight: normal; }
.links a { color: var(--header-color); margin: 0 12px; text-decoration: none; font-weight: bold; }
.bio { text-align: center; font-size: 20px; margin: 28px 12px; }
.stats { display: table; width: 100%; border-spacing: 16px; }
.stat-row { display: table-row; }
.stat {
  display: table-cell;
  width: 50%;
  background: var(--header-background);
  color: var(--header-color);
  border-radius: 12px;
  padding: 18px;
  text-align: center;
}
.stat .label { font-size: 18px; }
.stat .value { font-size: 32px; font-weight: bold; margin-top: 6px; }
.footer { text-align: center; font-size: 12px; margin-top: 20px; opacity: 0.8; }
";

/// Renders the card for `profile`.
///
/// # Errors
///
/// Returns [`ExportError::Render`] when the profile's color is not in the palette.
pub fn render_html(profile: &NormalizedProfile, options: &RenderOptions) -> Result<String, ExportError> {
    let theme = profile.color_choice().parse::<ColorChoice>()?.theme();

    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(profile.name()));
    html.push_str("<style>\n");
    html.push_str(&theme_css(&theme, options.paper));
    html.push_str(CARD_CSS);
    html.push_str("</style>\n</head>\n<body>\n<div class=\"wrapper\">\n");

    // Header
    html.push_str("<div class=\"header\">\n");
    if !profile.avatar_url().is_empty() {
        let _ = writeln!(
            html,
            "<img src=\"{}\" alt=\"{} avatar\">",
            escape_html(profile.avatar_url()),
            escape_html(profile.login())
        );
    }
    let _ = writeln!(html, "<h1>Hi! My name is {}!</h1>", escape_html(profile.name()));
    if !profile.login().is_empty() && profile.login() != profile.name() {
        let _ = writeln!(html, "<h2>@{}</h2>", escape_html(profile.login()));
    }

    html.push_str("<div class=\"links\">\n");
    push_link(&mut html, profile.map_link(), profile.location());
    push_link(&mut html, profile.profile_url(), "GitHub");
    if profile.has_blog() {
        push_link(&mut html, profile.blog_url(), "Blog");
    }
    html.push_str("</div>\n</div>\n");

    if !profile.bio().is_empty() {
        let _ = writeln!(html, "<p class=\"bio\">{}</p>", escape_html(profile.bio()));
    }

    // Stats
    html.push_str("<div class=\"stats\">\n<div class=\"stat-row\">\n");
    push_stat(&mut html, "Public Repositories", profile.public_repo_count());
    push_stat(&mut html, "Followers", profile.follower_count());
    html.push_str("</div>\n<div class=\"stat-row\">\n");
    push_stat(&mut html, "GitHub Stars", profile.star_total());
    push_stat(&mut html, "Following", profile.following_count());
    html.push_str("</div>\n</div>\n");

    // Footer
    let mut footer = Vec::new();
    if let Some(since) = profile.member_since() {
        footer.push(format!("GitHub member since {}", since.format("%B %Y")));
    }
    if let Some(date) = options.generated_on {
        footer.push(format!("Generated {}", date.format("%Y-%m-%d")));
    }
    if !footer.is_empty() {
        let _ = writeln!(html, "<div class=\"footer\">{}</div>", footer.join(" &middot; "));
    }

    html.push_str("</div>\n</body>\n</html>\n");
    Ok(html)
}

fn theme_css(theme: &Theme, paper: PaperSize) -> String {
    format!(
        "@page {{ size: {}; margin: 0; }}\n:root {{\n  --wrapper-background: {};\n  --header-background: {};\n  --header-color: {};\n  --photo-border-color: {};\n}}\n",
        paper.name(),
        theme.wrapper_background,
        theme.header_background,
        theme.header_color,
        theme.photo_border_color,
    )
}

fn push_link(html: &mut String, href: &str, text: &str) {
    let _ = writeln!(
        html,
        "<a href=\"{}\">{}</a>",
        escape_html(href),
        escape_html(text)
    );
}

fn push_stat(html: &mut String, label: &str, value: u64) {
    let _ = writeln!(
        html,
        "<div class=\"stat\"><div class=\"label\">{label}</div><div class=\"value\">{value}</div></div>"
    );
}

/// Escapes text for use in element content and quoted attributes.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
