//! HTTP `TravelTimeProvider` backed by OSRM's Table service.
//!
//! # Runtime behaviour
//!
//! The provider owns a current-thread Tokio runtime reused across calls.
//! When called from inside a multi-threaded Tokio runtime it blocks on that
//! runtime through [`tokio::task::block_in_place`] instead, avoiding nested
//! runtime panics.

use std::time::Duration;

use fleetplan_core::{
    DEFAULT_ROUTING_PROFILE, TravelTimeError, TravelTimeMatrix, TravelTimeProvider,
};
use geo::Coord;
use log::{debug, trace};
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use crate::osrm::TableResponse;

/// Errors raised while constructing an [`HttpTravelTimeProvider`].
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// User agent sent with every Table request.
pub const DEFAULT_USER_AGENT: &str = "fleetplan-routing/0.1";

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpTravelTimeProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTravelTimeProviderConfig {
    /// Base URL of the routing service, e.g. `"http://0.0.0.0:5000"`.
    pub base_url: String,
    /// Profile segment of the Table URL.
    pub profile: String,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for HttpTravelTimeProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://0.0.0.0:5000".to_owned(),
            profile: DEFAULT_ROUTING_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpTravelTimeProviderConfig {
    /// Configuration for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Travel-time provider issuing one OSRM Table request per matrix.
pub struct HttpTravelTimeProvider {
    client: Client,
    config: HttpTravelTimeProviderConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpTravelTimeProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTravelTimeProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpTravelTimeProvider {
    /// Create a provider for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpTravelTimeProviderConfig::new(base_url))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpTravelTimeProviderConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// The configuration this provider was built with.
    #[must_use]
    pub const fn config(&self) -> &HttpTravelTimeProviderConfig {
        &self.config
    }

    /// `{base_url}/table/v1/{profile}/{lon,lat;lon,lat;...}`
    fn build_table_url(&self, locations: &[Coord<f64>]) -> String {
        let coords = locations
            .iter()
            .map(|location| format!("{},{}", location.x, location.y))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/table/v1/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }

    async fn fetch_matrix_async(
        &self,
        locations: &[Coord<f64>],
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        let url = self.build_table_url(locations);
        debug!("Requesting {n} x {n} travel times from {url}", n = locations.len());

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let table_response: TableResponse =
            response
                .json()
                .await
                .map_err(|err| TravelTimeError::ParseError {
                    message: err.to_string(),
                })?;

        let matrix = convert_response(table_response)?;
        if matrix.len() != locations.len() || matrix.iter().any(|row| row.len() != locations.len())
        {
            return Err(TravelTimeError::ParseError {
                message: format!(
                    "expected a {n} x {n} durations table",
                    n = locations.len()
                ),
            });
        }
        trace!("Travel times: {matrix:?}");
        Ok(matrix)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> TravelTimeError {
        if error.is_timeout() {
            return TravelTimeError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return TravelTimeError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        TravelTimeError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Convert an OSRM answer into a matrix, mapping unreachable or invalid
/// cells to [`Duration::MAX`].
fn convert_response(response: TableResponse) -> Result<TravelTimeMatrix, TravelTimeError> {
    if !response.is_ok() {
        return Err(TravelTimeError::ServiceError {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let durations = response
        .durations
        .ok_or_else(|| TravelTimeError::ParseError {
            message: "OSRM response missing durations array".to_owned(),
        })?;

    // Negative, NaN, infinite and overflowing cells count as unreachable.
    let matrix = durations
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| {
                    cell.and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
                        .unwrap_or(Duration::MAX)
                })
                .collect()
        })
        .collect();

    Ok(matrix)
}

impl TravelTimeProvider for HttpTravelTimeProvider {
    fn get_travel_time_matrix(
        &self,
        locations: &[Coord<f64>],
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        if locations.is_empty() {
            return Err(TravelTimeError::EmptyInput);
        }

        let future = self.fetch_matrix_async(locations);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
