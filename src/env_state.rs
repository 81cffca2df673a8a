//! # galaxyview environment state
//!
//! This module defines [`crate::env_state::GalaxyEnv`], the **shared environment object**
//! handed to the catalog fetcher. It provides:
//!
//! - A persistent **HTTP client** ([`reqwest::Client`]) with a request timeout.
//! - The **TAP endpoint** of the Gaia archive, overridable from the environment.
//!
//! ## Structure
//!
//! ```text
//! GalaxyEnv
//! ├── http_client (reqwest::Client)
//! └── tap_url     (String, no trailing slash)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use galaxyview::env_state::GalaxyEnv;
//!
//! // Default endpoint, or $GALAXYVIEW_TAP_URL when set
//! let env = GalaxyEnv::from_env()?;
//! assert!(env.sync_url().ends_with("/sync"));
//! ```
//!
//! ## Notes
//!
//! - The client is cheap to clone; reuse one `GalaxyEnv` for every fetch of a run.
//! - No state is kept between requests: the environment only carries connection settings.
use std::time::Duration;

use reqwest::Client;

use crate::constants::{GAIA_TAP_URL, TAP_TIMEOUT_SECS, TAP_URL_ENV};
use crate::galaxy_errors::{FetchFailure, GalaxyError};

/// Connection settings shared by every catalog request.
///
/// # Fields
///
/// * `http_client` - A reqwest client used to make HTTP requests
/// * `tap_url` - Base URL of the TAP service (without the `/sync` suffix)
#[derive(Debug, Clone)]
pub struct GalaxyEnv {
    pub http_client: Client,
    tap_url: String,
}

impl GalaxyEnv {
    /// Create a new environment pointing at a TAP service.
    ///
    /// Arguments
    /// ---------
    /// * `tap_url`: base URL of the TAP service, e.g. `https://gea.esac.esa.int/tap-server/tap`
    /// * `timeout`: global timeout applied to each request
    ///
    /// Return
    /// ------
    /// * A new environment, or `FetchFailed(Http)` if the client cannot be built
    pub fn new(tap_url: &str, timeout: Duration) -> Result<Self, GalaxyError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("galaxyview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchFailure::from)?;

        Ok(GalaxyEnv {
            http_client,
            tap_url: tap_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create an environment from the process environment.
    ///
    /// Uses `$GALAXYVIEW_TAP_URL` when set and non-empty, the Gaia archive otherwise.
    pub fn from_env() -> Result<Self, GalaxyError> {
        let tap_url = resolve_tap_url(std::env::var(TAP_URL_ENV).ok());
        GalaxyEnv::new(&tap_url, Duration::from_secs(TAP_TIMEOUT_SECS))
    }

    pub fn tap_url(&self) -> &str {
        &self.tap_url
    }

    /// URL of the synchronous query endpoint (`<tap_url>/sync`).
    pub fn sync_url(&self) -> String {
        format!("{}/sync", self.tap_url)
    }
}

/// Endpoint override when set and non-empty, the Gaia archive otherwise.
fn resolve_tap_url(value: Option<String>) -> String {
    value
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| GAIA_TAP_URL.to_string())
}
