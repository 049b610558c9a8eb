//! # Geo Configuration
//!
//! Endpoints and client settings for the OpenStreetMap services.
//!
//! Both public services ask for an identifying User-Agent and at most about
//! one request per second; the defaults follow that.

use std::time::Duration;
use url::Url;

use crate::error::{GeoError, GeoResult};

/// Public Nominatim instance.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Public Overpass interpreter.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// User-Agent sent to both providers.
pub const DEFAULT_USER_AGENT: &str = concat!("canscout/", env!("CARGO_PKG_VERSION"));

/// Client settings shared by [`Geocoder`](crate::Geocoder) and
/// [`DiscoveryClient`](crate::DiscoveryClient).
///
/// ## Example
/// ```rust
/// use canscout_geo::GeoConfig;
/// use std::time::Duration;
///
/// let config = GeoConfig::default()
///     .nominatim_url("http://localhost:8088")
///     .politeness_delay(Duration::ZERO);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GeoConfig {
    /// Nominatim base URL; `/search` is appended.
    pub nominatim_url: String,

    /// Full Overpass interpreter endpoint.
    pub overpass_url: String,

    pub user_agent: String,

    /// Per-request timeout.
    /// Default: 15 seconds
    pub timeout: Duration,

    /// Sleep between consecutive Overpass requests in a bulk discovery.
    /// Default: 1 second
    pub politeness_delay: Duration,
}

impl Default for GeoConfig {
    fn default() -> Self {
        GeoConfig {
            nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(15),
            politeness_delay: Duration::from_secs(1),
        }
    }
}

impl GeoConfig {
    pub fn nominatim_url(mut self, url: impl Into<String>) -> Self {
        self.nominatim_url = url.into();
        self
    }

    pub fn overpass_url(mut self, url: impl Into<String>) -> Self {
        self.overpass_url = url.into();
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn politeness_delay(mut self, delay: Duration) -> Self {
        self.politeness_delay = delay;
        self
    }

    /// Checks that both URLs parse and the User-Agent is set.
    pub fn validate(&self) -> GeoResult<()> {
        Url::parse(&self.nominatim_url)?;
        Url::parse(&self.overpass_url)?;
        if self.user_agent.trim().is_empty() {
            return Err(GeoError::InvalidRequest("user agent must not be empty".to_string()));
        }
        Ok(())
    }

    /// Builds the reqwest client both adapters use.
    pub(crate) fn http_client(&self) -> GeoResult<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(self.user_agent.clone())
            .timeout(self.timeout)
            .build()
            .map_err(|e| GeoError::Transport(e.to_string()))
    }
}

/// Joins `path` onto `base`, treating `base` as a directory.
///
/// `Url::join` replaces the last segment unless the base ends with `/`.
pub(crate) fn join_url(base: &str, path: &str) -> GeoResult<Url> {
    let mut base = Url::parse(base)?;
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    Ok(base.join(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GeoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.politeness_delay, Duration::from_secs(1));
        assert!(config.user_agent.starts_with("canscout/"));
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let config = GeoConfig::default().overpass_url("not a url");
        assert!(matches!(config.validate(), Err(GeoError::InvalidUrl(_))));
    }

    #[test]
    fn test_join_url_keeps_base_path() {
        assert_eq!(
            join_url("https://nominatim.openstreetmap.org", "search").unwrap().as_str(),
            "https://nominatim.openstreetmap.org/search"
        );
        assert_eq!(
            join_url("http://localhost:8080/nominatim", "search").unwrap().as_str(),
            "http://localhost:8080/nominatim/search"
        );
        assert_eq!(
            join_url("http://localhost:8080/nominatim/", "search").unwrap().as_str(),
            "http://localhost:8080/nominatim/search"
        );
    }
}
