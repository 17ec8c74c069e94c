//! Facade crate for the fleetplan vehicle routing tool.
//!
//! This crate re-exports the engine contracts and exposes the default engine
//! and routing client behind feature flags.

#![forbid(unsafe_code)]

pub use fleetplan_core::{
    DiagnosticLevel, Diagnostics, Engine, EngineError, ErrorEnvelope, ProblemInstance,
    RoutingBackend, RoutingOptions, Solution, SolveParams, TravelTimeError, TravelTimeMatrix,
    TravelTimeProvider, TravelTimeProviderFactory,
};

#[cfg(feature = "solver-vrp")]
pub use fleetplan_solver_vrp::{VrpEngine, VrpEngineConfig};

#[cfg(feature = "routing-http")]
pub use fleetplan_routing::{HttpProviderFactory, HttpTravelTimeProvider};
