//! OSRM Table client supplying travel-time matrices to the solving engine.
//!
//! [`HttpTravelTimeProvider`] implements the synchronous
//! [`fleetplan_core::TravelTimeProvider`] trait by blocking on an async
//! `reqwest` call inside a Tokio runtime it owns. [`HttpProviderFactory`]
//! turns the routing options of an invocation into such a provider.
//!
//! # Example
//!
//! ```no_run
//! use fleetplan_core::TravelTimeProvider;
//! use fleetplan_routing::{HttpTravelTimeProvider, HttpTravelTimeProviderConfig};
//! use geo::Coord;
//! use std::time::Duration;
//!
//! let config = HttpTravelTimeProviderConfig::new("http://localhost:5000")
//!     .with_profile("car")
//!     .with_timeout(Duration::from_secs(10));
//! let provider = HttpTravelTimeProvider::with_config(config)?;
//!
//! let matrix = provider.get_travel_time_matrix(&[
//!     Coord { x: 2.35, y: 48.85 },
//!     Coord { x: 2.36, y: 48.86 },
//! ])?;
//! assert_eq!(matrix.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod factory;
mod osrm;
mod provider;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use factory::HttpProviderFactory;
pub use provider::{
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, HttpTravelTimeProvider,
    HttpTravelTimeProviderConfig, ProviderBuildError,
};
