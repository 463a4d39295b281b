//! Service configuration, read once from the environment at startup.

use std::env;

pub const DEFAULT_API_URL: &str = "https://sourcegraph.com/.api/graphql";
pub const DEFAULT_PORT: u16 = 80;

#[derive(Debug, Clone)]
pub struct Config {
    /// GraphQL endpoint of the search backend.
    pub api_url: String,
    /// Port the badge server listens on.
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let api_url = env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self { api_url, port }
    }
}
