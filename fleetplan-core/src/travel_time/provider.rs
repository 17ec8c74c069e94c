//! Travel-time provider traits and the adjacency-matrix alias.

use std::time::Duration;

use geo::Coord;

use super::error::TravelTimeError;
use crate::RoutingOptions;

/// Adjacency matrix of travel times.
///
/// [`Duration::MAX`] marks a pair the routing backend could not connect.
pub type TravelTimeMatrix = Vec<Vec<Duration>>;

/// Fetch pairwise travel times for a set of coordinates.
///
/// Implementers must return a square `n×n` matrix where
/// `n == locations.len()`. `matrix[i][j]` is the travel time from
/// `locations[i]` to `locations[j]`. Coordinates are `x = longitude`,
/// `y = latitude`.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use geo::Coord;
/// use fleetplan_core::{TravelTimeError, TravelTimeMatrix, TravelTimeProvider};
///
/// struct UnitProvider;
///
/// impl TravelTimeProvider for UnitProvider {
///     fn get_travel_time_matrix(
///         &self,
///         locations: &[Coord<f64>],
///     ) -> Result<TravelTimeMatrix, TravelTimeError> {
///         if locations.is_empty() {
///             return Err(TravelTimeError::EmptyInput);
///         }
///         let n = locations.len();
///         Ok((0..n)
///             .map(|i| {
///                 (0..n)
///                     .map(|j| if i == j { Duration::ZERO } else { Duration::from_secs(1) })
///                     .collect::<Vec<_>>()
///             })
///             .collect())
///     }
/// }
///
/// let matrix = UnitProvider.get_travel_time_matrix(&[Coord { x: 2.35, y: 48.85 }])?;
/// assert_eq!(matrix.len(), 1);
/// # Ok::<(), TravelTimeError>(())
/// ```
pub trait TravelTimeProvider {
    /// Return a matrix of travel times for `locations`.
    ///
    /// Implementations must return `Err(TravelTimeError::EmptyInput)` when
    /// `locations` is empty.
    fn get_travel_time_matrix(
        &self,
        locations: &[Coord<f64>],
    ) -> Result<TravelTimeMatrix, TravelTimeError>;
}

/// Creates a [`TravelTimeProvider`] for the routing options of one invocation.
pub trait TravelTimeProviderFactory: Send + Sync {
    /// Build a provider talking to the backend described by `routing`.
    fn build(&self, routing: &RoutingOptions)
    -> Result<Box<dyn TravelTimeProvider>, TravelTimeError>;
}
