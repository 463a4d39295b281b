//! Boundary to the SVG badge engine.
//!
//! The visual work is delegated to `rsbadges`; this module only maps our
//! badge options onto its style/color model. Render failure is unexpected
//! (decision logic always produces well-formed options) and surfaces as an
//! error for the handler to turn into a 500.

use rsbadges::{Badge, Style};
use thiserror::Error;

use crate::badge::{BadgeOptions, Template};

/// Left segment color, fixed across all schemes (shields.io convention).
const LABEL_COLOR: &str = "#555";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid badge color {color}: {detail}")]
    Color { color: String, detail: String },
    #[error("badge engine failure: {0}")]
    Engine(String),
}

/// Render badge options to SVG markup.
pub fn render_svg(options: &BadgeOptions) -> Result<String, RenderError> {
    let badge = Badge {
        label_text: options.left_text.clone(),
        msg_text: options.right_text.clone(),
        label_color: LABEL_COLOR.parse().map_err(|e| RenderError::Color {
            color: LABEL_COLOR.to_string(),
            detail: format!("{e:?}"),
        })?,
        msg_color: options.color.hex().parse().map_err(|e| RenderError::Color {
            color: options.color.hex().to_string(),
            detail: format!("{e:?}"),
        })?,
        ..Badge::default()
    };

    let style = match options.template {
        Template::Flat => Style::Flat(badge),
        Template::FlatSquare => Style::FlatSquare(badge),
        Template::Plastic => Style::Plastic(badge),
        Template::Social => Style::Social(badge),
        Template::ForTheBadge => Style::ForTheBadge(badge),
    };

    style
        .generate_svg()
        .map_err(|e| RenderError::Engine(format!("{e:?}")))
}
