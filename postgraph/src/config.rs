use anyhow::{Context, Result};
use reqwest::Url;
use std::env;
use std::time::Duration;

/// Base URL used when neither `--base-url` nor `POSTGRAPH_BASE_URL` is set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9999/api/";

/// Connection timeout shared by every request of a run.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct PostgraphConfig {
    /// Always ends with a single `/` so resource paths can be appended.
    pub base_url: String,
    pub connect_timeout: Duration,
}

impl PostgraphConfig {
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("POSTGRAPH_BASE_URL")
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: sanitize_base_url(base_url.into())?,
            connect_timeout: CONNECT_TIMEOUT,
        })
    }
}

fn sanitize_base_url(base: String) -> Result<String> {
    let mut base = base.trim().to_string();
    if !base.starts_with("http://") && !base.starts_with("https://") {
        base = format!("http://{base}");
    }
    while base.ends_with('/') {
        base.pop();
    }
    base.push('/');
    Url::parse(&base).with_context(|| format!("invalid base URL {base}"))?;
    Ok(base)
}
