//! Test doubles for routing providers.
//!
//! [`StubTravelTimeProvider`] returns a pre-configured answer without any
//! network traffic; [`StubProviderFactory`] hands it to engines under test.

use std::time::Duration;

use fleetplan_core::{
    RoutingBackend, RoutingOptions, TravelTimeError, TravelTimeMatrix, TravelTimeProvider,
    TravelTimeProviderFactory,
};
use geo::Coord;

/// Stub `TravelTimeProvider` returning a fixed matrix or error.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use fleetplan_core::TravelTimeProvider;
/// use fleetplan_routing::test_support::StubTravelTimeProvider;
/// use geo::Coord;
///
/// let provider = StubTravelTimeProvider::with_matrix(vec![
///     vec![Duration::ZERO, Duration::from_secs(60)],
///     vec![Duration::from_secs(60), Duration::ZERO],
/// ]);
/// let locations = [Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }];
/// assert!(provider.get_travel_time_matrix(&locations).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct StubTravelTimeProvider {
    response: StubResponse,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Matrix(TravelTimeMatrix),
    Error(TravelTimeError),
}

impl StubTravelTimeProvider {
    /// Return `matrix` for any non-empty input.
    #[must_use]
    pub const fn with_matrix(matrix: TravelTimeMatrix) -> Self {
        Self {
            response: StubResponse::Matrix(matrix),
        }
    }

    /// Return `error` for any non-empty input.
    ///
    /// Empty input still yields `TravelTimeError::EmptyInput`.
    #[must_use]
    pub const fn with_error(error: TravelTimeError) -> Self {
        Self {
            response: StubResponse::Error(error),
        }
    }

    /// Return a `size x size` matrix with a zero diagonal and uniform
    /// `seconds` elsewhere.
    #[must_use]
    pub fn with_uniform_matrix(size: usize, seconds: u64) -> Self {
        let matrix = (0..size)
            .map(|i| {
                (0..size)
                    .map(|j| {
                        if i == j {
                            Duration::ZERO
                        } else {
                            Duration::from_secs(seconds)
                        }
                    })
                    .collect()
            })
            .collect();
        Self::with_matrix(matrix)
    }
}

impl TravelTimeProvider for StubTravelTimeProvider {
    fn get_travel_time_matrix(
        &self,
        locations: &[Coord<f64>],
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        if locations.is_empty() {
            return Err(TravelTimeError::EmptyInput);
        }

        match &self.response {
            StubResponse::Matrix(matrix) => Ok(matrix.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}

/// Factory cloning a [`StubTravelTimeProvider`] for networked routing.
#[derive(Debug, Clone)]
pub struct StubProviderFactory {
    provider: StubTravelTimeProvider,
}

impl StubProviderFactory {
    /// Hand out clones of `provider`.
    #[must_use]
    pub const fn new(provider: StubTravelTimeProvider) -> Self {
        Self { provider }
    }
}

impl TravelTimeProviderFactory for StubProviderFactory {
    fn build(
        &self,
        routing: &RoutingOptions,
    ) -> Result<Box<dyn TravelTimeProvider>, TravelTimeError> {
        match routing.backend {
            RoutingBackend::Networked => Ok(Box::new(self.provider.clone())),
            RoutingBackend::Embedded => Err(TravelTimeError::EmbeddedUnavailable),
        }
    }
}
