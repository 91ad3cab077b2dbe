//! Export rendering: the post projection and its three file formats.
//!
//! An `ExportedPost` is computed fresh from the wizard session at export
//! time and serialized to markdown, HTML, or JSON. Exporting once in any
//! format locks the post; that decision lives in `WizardState::lock_exported`,
//! not here.

use crate::config::Config;
use crate::model::{ExportMetadata, ExportedPost, Topic, WebsiteAnalysis, WizardState};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::ValueEnum;
use std::path::PathBuf;
use strum::AsRefStr;

/// Fixed attribution footer on markdown exports
const ATTRIBUTION: &str = "*Generated by AutoBlog, AI content for growing businesses*";

/// Maximum slug length in characters
const SLUG_MAX_LEN: usize = 50;

/// Maximum excerpt length in characters
const EXCERPT_MAX_LEN: usize = 160;

/// Export file formats. Zip is listed for parity with the product UI but
/// intentionally unimplemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    Markdown,
    Html,
    Json,
    Zip,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
            Self::Json => "json",
            Self::Zip => "zip",
        }
    }
}

/// Slugify a title: lowercase, `[a-z0-9-]` only, non-alphanumeric runs
/// collapsed to `-`, truncated to 50 characters
pub fn slug(title: &str) -> String {
    let mut s = slug::slugify(title);
    s.truncate(SLUG_MAX_LEN);
    s.trim_end_matches('-').to_string()
}

/// Word count as the product defines it: single-space splits, empty pieces
/// included
pub fn word_count(content: &str) -> usize {
    content.split(' ').count()
}

/// Reading time in minutes: one minute per started 1000 characters
pub fn reading_time(content: &str) -> usize {
    content.len().div_ceil(1000)
}

/// Leading excerpt, cut at a space boundary where possible
pub fn excerpt(content: &str) -> String {
    if content.chars().count() <= EXCERPT_MAX_LEN {
        return content.to_string();
    }
    let cut: String = content.chars().take(EXCERPT_MAX_LEN).collect();
    match cut.rfind(' ') {
        Some(pos) if pos > 0 => format!("{}...", &cut[..pos]),
        _ => format!("{cut}..."),
    }
}

/// Build the export projection from the current session
pub fn build_post(
    state: &WizardState,
    analysis: &WebsiteAnalysis,
    topic: Option<&Topic>,
) -> ExportedPost {
    let title = topic
        .map(|t| t.title.clone())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| format!("{} Insights", analysis.business_name));
    let content = &state.generated_content;

    let mut tags: Vec<String> = analysis.keywords.clone();
    if let Some(topic) = topic {
        if !topic.category.is_empty() && !tags.contains(&topic.category) {
            tags.push(topic.category.clone());
        }
    }

    let now = Utc::now().to_rfc3339();
    ExportedPost {
        slug: slug(&title),
        excerpt: excerpt(content),
        content: content.clone(),
        tags,
        category: topic
            .map(|t| t.category.clone())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| analysis.business_type.clone()),
        published_at: now.clone(),
        source: "AutoBlog".to_string(),
        source_website: state.website_url.clone(),
        brand_colors: analysis.brand_colors.clone(),
        metadata: ExportMetadata {
            word_count: word_count(content),
            reading_time: reading_time(content),
            generated_at: now,
            auto_generated: true,
        },
        title,
    }
}

// =============================================================================
// Format renderers
// =============================================================================

/// Markdown: H1 title, subheading, content, attribution, metadata lines
pub fn render_markdown(post: &ExportedPost, subheader: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", post.title));
    if !subheader.is_empty() {
        out.push_str(&format!("{subheader}\n\n"));
    }
    out.push_str(&post.content);
    out.push_str("\n\n---\n");
    out.push_str(ATTRIBUTION);
    out.push('\n');
    out.push_str(&format!("\nTags: {}\n", post.tags.join(", ")));
    out.push_str(&format!("Category: {}\n", post.category));
    out.push_str(&format!("Reading time: {} min\n", post.metadata.reading_time));
    out.push_str(&format!("Word count: {}\n", post.metadata.word_count));
    out.push_str(&format!("Source: {}\n", post.source_website));
    out
}

/// HTML: standalone document, inline CSS from the brand color triple,
/// newlines rendered as `<br>`
pub fn render_html(post: &ExportedPost) -> String {
    let colors = &post.brand_colors;
    let body = escape_html(&post.content).replace('\n', "<br>\n");
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="description" content="{description}">
<title>{title}</title>
<style>
  body {{ font-family: Georgia, serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; color: #222; background: {secondary}; }}
  h1 {{ color: {primary}; }}
  a {{ color: {accent}; }}
  .meta {{ color: {primary}; font-size: 0.85rem; border-top: 1px solid {accent}; padding-top: 0.75rem; margin-top: 2rem; }}
</style>
</head>
<body>
<article>
<h1>{title}</h1>
<div>{body}</div>
<div class="meta">{tags} &middot; {reading_time} min read &middot; Source: {source}</div>
</article>
</body>
</html>
"#,
        description = escape_html(&post.excerpt),
        title = escape_html(&post.title),
        primary = colors.primary,
        secondary = colors.secondary,
        accent = colors.accent,
        body = body,
        tags = escape_html(&post.tags.join(", ")),
        reading_time = post.metadata.reading_time,
        source = escape_html(&post.source_website),
    )
}

/// JSON: the flat projection as-is
pub fn render_json(post: &ExportedPost) -> Result<String> {
    serde_json::to_string_pretty(post).context("Failed to serialize exported post")
}

/// Write an export to the output directory; returns the written path
pub fn write_export(config: &Config, post: &ExportedPost, format: ExportFormat, body: &str) -> Result<PathBuf> {
    let dir = config.exports_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create exports dir: {}", dir.display()))?;

    let filename = format!("{}.{}", post.slug, format.extension());
    let path = dir.join(filename);
    std::fs::write(&path, body)
        .with_context(|| format!("Failed to write export: {}", path.display()))?;
    Ok(path)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BrandColors;

    fn fixture_post() -> ExportedPost {
        ExportedPost {
            title: "Five Ways to Calm a Worried Child".to_string(),
            slug: slug("Five Ways to Calm a Worried Child"),
            excerpt: "A short guide.".to_string(),
            content: "Line one.\nLine two.".to_string(),
            tags: vec!["parenting".to_string(), "wellness".to_string()],
            category: "Parenting".to_string(),
            published_at: "2026-01-01T00:00:00+00:00".to_string(),
            source: "AutoBlog".to_string(),
            source_website: "https://acme.com".to_string(),
            brand_colors: BrandColors::default(),
            metadata: ExportMetadata {
                word_count: word_count("Line one.\nLine two."),
                reading_time: reading_time("Line one.\nLine two."),
                generated_at: "2026-01-01T00:00:00+00:00".to_string(),
                auto_generated: true,
            },
        }
    }

    // =========================================================================
    // Slug Tests
    // =========================================================================

    #[test]
    fn slug_is_lowercase_and_dashed() {
        assert_eq!(slug("Five Ways to Calm"), "five-ways-to-calm");
    }

    #[test]
    fn slug_collapses_non_alphanumeric_runs() {
        assert_eq!(slug("Hello!!!   World???"), "hello-world");
    }

    #[test]
    fn slug_truncates_to_fifty_chars() {
        let long = "word ".repeat(30);
        let s = slug(&long);
        assert!(s.len() <= 50);
        assert!(!s.ends_with('-'));
    }

    #[test]
    fn slug_charset_is_constrained() {
        let s = slug("Crème brûlée & Fancy 100% Recipes!");
        assert!(s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    // =========================================================================
    // Metric Tests
    // =========================================================================

    #[test]
    fn word_count_matches_single_space_split() {
        assert_eq!(word_count("one two three"), 3);
        assert_eq!(word_count("one  two"), 3); // double space yields an empty piece
        assert_eq!(word_count(""), 1);
    }

    #[test]
    fn reading_time_is_ceiling_of_kchars() {
        assert_eq!(reading_time(&"x".repeat(5000)), 5);
        assert_eq!(reading_time(&"x".repeat(5001)), 6);
        assert_eq!(reading_time("short"), 1);
        assert_eq!(reading_time(""), 0);
    }

    #[test]
    fn excerpt_cuts_at_space_boundary() {
        let long = "word ".repeat(100);
        let e = excerpt(&long);
        assert!(e.ends_with("..."));
        assert!(e.chars().count() <= 164);
        assert_eq!(excerpt("short text"), "short text");
    }

    // =========================================================================
    // Renderer Tests
    // =========================================================================

    #[test]
    fn markdown_layout() {
        let post = fixture_post();
        insta::assert_snapshot!(render_markdown(&post, "A practical guide"), @r"
        # Five Ways to Calm a Worried Child

        A practical guide

        Line one.
        Line two.

        ---
        *Generated by AutoBlog, AI content for growing businesses*

        Tags: parenting, wellness
        Category: Parenting
        Reading time: 1 min
        Word count: 3
        Source: https://acme.com
        ");
    }

    #[test]
    fn html_uses_brand_colors_and_br() {
        let post = fixture_post();
        let html = render_html(&post);
        assert!(html.contains("#6B8CAE"));
        assert!(html.contains("#F4E5D3"));
        assert!(html.contains("#8FBC8F"));
        assert!(html.contains("Line one.<br>\nLine two."));
        assert!(html.contains("<title>Five Ways to Calm a Worried Child</title>"));
    }

    #[test]
    fn html_escapes_content() {
        let mut post = fixture_post();
        post.content = "1 < 2 & 3 > 2".to_string();
        let html = render_html(&post);
        assert!(html.contains("1 &lt; 2 &amp; 3 &gt; 2"));
    }

    #[test]
    fn json_export_shape() {
        let post = fixture_post();
        let json = render_json(&post).expect("json renders");
        let value: serde_json::Value = serde_json::from_str(&json).expect("json parses");
        assert_eq!(value["title"], "Five Ways to Calm a Worried Child");
        assert_eq!(value["slug"], "five-ways-to-calm-a-worried-child");
        assert_eq!(value["brandColors"]["primary"], "#6B8CAE");
        assert_eq!(value["metadata"]["autoGenerated"], true);
        assert_eq!(value["metadata"]["wordCount"], 3);
        assert_eq!(value["metadata"]["readingTime"], 1);
        assert_eq!(value["sourceWebsite"], "https://acme.com");
    }

    #[test]
    fn build_post_defaults_title_and_category() {
        let mut state = WizardState::default();
        state.website_url = "https://acme.com".to_string();
        state.generated_content = "Body text".to_string();
        let analysis = WebsiteAnalysis {
            business_name: "Acme".to_string(),
            business_type: "Tools".to_string(),
            ..Default::default()
        };
        let post = build_post(&state, &analysis, None);
        assert_eq!(post.title, "Acme Insights");
        assert_eq!(post.category, "Tools");
        assert_eq!(post.source_website, "https://acme.com");
    }
}
