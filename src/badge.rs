//! Badge decision logic.
//!
//! Turns one badge request plus the backend's answer into the exact text pair
//! and color handed to the SVG renderer. This is the only module with
//! branching business logic.

use crate::search::{SearchBackend, SearchOutcome};

/// Visual rendering style of the badge, purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Template {
    #[default]
    Flat,
    FlatSquare,
    Plastic,
    Social,
    ForTheBadge,
}

impl Template {
    /// Parse a `style` query parameter, falling back to flat for anything
    /// absent or unrecognized.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("flat") => Template::Flat,
            Some("flat-square") => Template::FlatSquare,
            Some("plastic") => Template::Plastic,
            Some("social") => Template::Social,
            Some("for-the-badge") => Template::ForTheBadge,
            _ => Template::default(),
        }
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Template::Flat => write!(f, "flat"),
            Template::FlatSquare => write!(f, "flat-square"),
            Template::Plastic => write!(f, "plastic"),
            Template::Social => write!(f, "social"),
            Template::ForTheBadge => write!(f, "for-the-badge"),
        }
    }
}

/// Named color applied to the right-hand badge segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    /// Healthy result.
    Blue,
    /// Degraded or failed lookup.
    Red,
    /// No input.
    Gray,
}

impl ColorScheme {
    /// shields.io hex value for this color.
    pub fn hex(self) -> &'static str {
        match self {
            ColorScheme::Blue => "#007ec6",
            ColorScheme::Red => "#e05d44",
            ColorScheme::Gray => "#9f9f9f",
        }
    }
}

/// One inbound badge request, derived from URL query parameters.
#[derive(Debug, Clone, Default)]
pub struct BadgeRequest {
    pub template: Template,
    pub search_query: Option<String>,
    pub label: Option<String>,
    pub suffix: Option<String>,
}

/// Fully determines the rendered SVG; sole input to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeOptions {
    pub left_text: String,
    pub right_text: String,
    pub template: Template,
    pub color: ColorScheme,
}

/// Decide the badge for a request, calling the backend once when a search
/// query is present. Never fails: every backend failure mode maps to a badge
/// that visually communicates it.
pub async fn decide(backend: &dyn SearchBackend, request: &BadgeRequest) -> BadgeOptions {
    let query = request.search_query.as_deref().filter(|q| !q.is_empty());

    let outcome = match query {
        Some(q) => backend.search(q).await,
        None => SearchOutcome::NoQuery,
    };

    // Left text defaults to the raw query when no explicit label was given.
    let label = request
        .label
        .as_deref()
        .filter(|l| !l.is_empty())
        .or(query)
        .unwrap_or("search");

    match outcome {
        SearchOutcome::NoQuery => BadgeOptions {
            left_text: "search".to_string(),
            right_text: "no query".to_string(),
            template: request.template,
            color: ColorScheme::Gray,
        },
        SearchOutcome::TransportError { status_text } => BadgeOptions {
            left_text: label.to_string(),
            right_text: status_text.to_lowercase(),
            template: request.template,
            color: ColorScheme::Red,
        },
        SearchOutcome::GraphqlError { messages } => BadgeOptions {
            left_text: label.to_string(),
            right_text: messages.join(", "),
            template: request.template,
            color: ColorScheme::Red,
        },
        SearchOutcome::Success {
            result_count,
            limit_hit,
            missing,
            cloning,
        } => BadgeOptions {
            // Padding compensates for the renderer's tight text box around
            // short labels.
            left_text: format!(" {label} "),
            right_text: success_text(result_count, limit_hit, request.suffix.as_deref(), missing, cloning),
            template: request.template,
            color: ColorScheme::Blue,
        },
    }
}

fn success_text(
    result_count: i64,
    limit_hit: bool,
    suffix: Option<&str>,
    missing: usize,
    cloning: usize,
) -> String {
    let mut right = result_count.to_string();
    if limit_hit {
        right.insert(0, '>');
    }
    if let Some(suffix) = suffix.filter(|s| !s.is_empty()) {
        right.push(' ');
        right.push_str(suffix);
    }

    let mut notices = Vec::new();
    if missing > 0 {
        notices.push(format!("{missing} repos missing"));
    }
    if cloning > 0 {
        notices.push(format!("{cloning} repos cloning"));
    }
    if !notices.is_empty() {
        right.push_str(&format!(" ({})", notices.join(", ")));
    }

    right
}
