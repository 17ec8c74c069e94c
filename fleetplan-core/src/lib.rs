//! Collaborator contracts for the fleetplan command-line tool.
//!
//! The command-line orchestrator never solves anything itself. It hands the
//! raw problem text to an [`Engine`], receives a [`ProblemInstance`] and asks
//! that instance for a [`Solution`]. Everything the two sides exchange lives
//! here: tuning parameters, routing options, the diagnostic level threaded
//! through every call, the solution document and the error envelope.

pub mod diagnostics;
pub mod engine;
pub mod envelope;
pub mod routing;
pub mod solution;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod travel_time;

pub use diagnostics::{DiagnosticLevel, Diagnostics};
pub use engine::{Engine, EngineError, ProblemInstance, SolveParams};
pub use envelope::ErrorEnvelope;
pub use routing::{
    DEFAULT_ROUTING_ADDRESS, DEFAULT_ROUTING_PORT, DEFAULT_ROUTING_PROFILE, RoutingBackend,
    RoutingOptions,
};
pub use solution::{
    ComputingTimes, Coordinates, RouteSummary, Solution, Step, StepKind, Summary, UnassignedJob,
};
pub use travel_time::{
    TravelTimeError, TravelTimeMatrix, TravelTimeProvider, TravelTimeProviderFactory,
};
