//! Pairwise travel times between coordinates.
//!
//! Engines fetch a square matrix of [`Duration`](std::time::Duration) values
//! from a [`TravelTimeProvider`] whenever the problem carries coordinates
//! instead of its own matrix. Providers are created per invocation by a
//! [`TravelTimeProviderFactory`] from the resolved routing options.

mod error;
mod provider;

pub use error::TravelTimeError;
pub use provider::{TravelTimeMatrix, TravelTimeProvider, TravelTimeProviderFactory};
