//! The two contracts consumed by the orchestrator: parse, then solve.

use thiserror::Error;

use crate::{Diagnostics, RoutingOptions, Solution, TravelTimeError};

/// Tuning parameters passed to [`ProblemInstance::solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveParams {
    /// Search intensity, already clamped to the accepted ceiling.
    pub exploration_level: u32,
    /// Worker threads; `0` lets the engine pick its own default.
    pub threads: u32,
}

/// Errors reported by an [`Engine`] or a [`ProblemInstance`].
///
/// Domain failures describe something wrong with the caller's problem or its
/// surroundings. Backend failures are everything else.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The problem description was rejected.
    #[error("{0}")]
    InvalidInput(String),
    /// Travel times could not be obtained from the routing backend.
    #[error(transparent)]
    Routing(#[from] TravelTimeError),
    /// The optimisation backend failed for a reason unrelated to the input.
    #[error("{0}")]
    Backend(String),
}

impl EngineError {
    /// Whether the failure is attributable to the problem or its routing.
    ///
    /// # Examples
    /// ```
    /// use fleetplan_core::EngineError;
    ///
    /// assert!(EngineError::InvalidInput("Invalid jobs.".into()).is_domain());
    /// assert!(!EngineError::Backend("pool exhausted".into()).is_domain());
    /// ```
    #[must_use]
    pub const fn is_domain(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::Routing(_))
    }
}

/// Builds problem instances from raw input text.
///
/// Engines must be `Send + Sync` so a single engine can serve several
/// invocations.
pub trait Engine: Send + Sync {
    /// Parse `input` into a solvable problem.
    ///
    /// `routing` tells the engine where to fetch travel times when the input
    /// carries coordinates rather than a matrix.
    fn parse(
        &self,
        input: &str,
        routing: &RoutingOptions,
        diagnostics: &Diagnostics,
    ) -> Result<Box<dyn ProblemInstance>, EngineError>;
}

/// A parsed problem ready to be solved.
pub trait ProblemInstance: Send + Sync {
    /// Solve the problem, producing the solution document.
    fn solve(&self, params: SolveParams, diagnostics: &Diagnostics)
    -> Result<Solution, EngineError>;
}
