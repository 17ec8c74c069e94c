//! Deterministic collaborators for unit and behaviour tests.

use std::time::Duration;

use geo::Coord;

use crate::{
    RoutingBackend, RoutingOptions, TravelTimeError, TravelTimeMatrix, TravelTimeProvider,
    TravelTimeProviderFactory,
};

/// Deterministic `TravelTimeProvider` returning one-second edges.
#[derive(Default, Debug, Copy, Clone)]
pub struct UnitTravelTimeProvider;

impl TravelTimeProvider for UnitTravelTimeProvider {
    fn get_travel_time_matrix(
        &self,
        locations: &[Coord<f64>],
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        if locations.is_empty() {
            return Err(TravelTimeError::EmptyInput);
        }
        let n = locations.len();
        let matrix = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        if i == j {
                            Duration::ZERO
                        } else {
                            Duration::from_secs(1)
                        }
                    })
                    .collect()
            })
            .collect();
        Ok(matrix)
    }
}

/// Factory handing out [`UnitTravelTimeProvider`] for networked routing.
///
/// Embedded routing is refused with
/// [`TravelTimeError::EmbeddedUnavailable`], like the production factory.
#[derive(Default, Debug, Copy, Clone)]
pub struct UnitProviderFactory;

impl TravelTimeProviderFactory for UnitProviderFactory {
    fn build(
        &self,
        routing: &RoutingOptions,
    ) -> Result<Box<dyn TravelTimeProvider>, TravelTimeError> {
        match routing.backend {
            RoutingBackend::Networked => Ok(Box::new(UnitTravelTimeProvider)),
            RoutingBackend::Embedded => Err(TravelTimeError::EmbeddedUnavailable),
        }
    }
}
