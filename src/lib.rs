//! search-badge
//!
//! Renders live SVG badges for search queries against a GraphQL search API.
//! One request pipeline: query params -> backend search -> badge decision ->
//! SVG render.

pub mod api;
pub mod badge;
pub mod config;
pub mod render;
pub mod search;
