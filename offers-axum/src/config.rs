//! Configuration types for the Axum HTTP server.
//!
//! This module provides configuration options for the REST API server,
//! including network binding, pagination limits and the public base URL
//! used when rendering links.

use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, num::NonZeroU64};

/// Configuration for the Axum HTTP server.
///
/// # Examples
///
/// ```
/// use offers_axum::config::AxumConfig;
///
/// // Use default configuration
/// let config = AxumConfig::default();
///
/// // Custom configuration
/// let config = AxumConfig {
///     bind_address: "127.0.0.1:3000".parse().unwrap(),
///     public_url: Some("https://offers.example.com".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AxumConfig {
    /// The address to bind the server to
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// The page size used when a listing does not ask for one
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    /// Larger requested page sizes are clamped to this
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,

    /// Prefix for every link the API renders, e.g. `https://offers.example.com`.
    /// Without one, links are root-relative.
    #[serde(default)]
    pub public_url: Option<String>,
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_page_size() -> u64 {
    20
}

fn default_max_page_size() -> u64 {
    100
}

impl Default for AxumConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            public_url: None,
        }
    }
}

impl AxumConfig {
    /// Resolve a requested page size: absent or zero means the default, and
    /// anything above the maximum is clamped.
    pub fn page_size(&self, requested: Option<u64>) -> NonZeroU64 {
        let size = match requested {
            None | Some(0) => self.default_page_size,
            Some(size) => size,
        };
        NonZeroU64::new(size.min(self.max_page_size)).unwrap_or(NonZeroU64::MIN)
    }

    /// The link prefix, without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.public_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .unwrap_or_default()
    }
}
