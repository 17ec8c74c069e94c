//! Default solving engine for fleetplan.
//!
//! [`VrpEngine`] implements [`fleetplan_core::Engine`]: it parses a JSON
//! problem document, resolves travel times either from the embedded matrix
//! or from a [`fleetplan_core::TravelTimeProvider`], and hands the resulting
//! capacitated vehicle routing problem to the `vrp-core` metaheuristics. The
//! search runs inside a dedicated `rayon` pool sized by the requested thread
//! count.
//!
//! # Examples
//! ```
//! use fleetplan_core::test_support::UnitProviderFactory;
//! use fleetplan_core::{Diagnostics, Engine, RoutingOptions, SolveParams};
//! use fleetplan_solver_vrp::VrpEngine;
//!
//! let engine = VrpEngine::new(UnitProviderFactory);
//! let input = r#"{
//!     "vehicles": [{ "id": 1, "start_index": 0, "end_index": 0 }],
//!     "jobs": [{ "id": 7, "location_index": 1 }],
//!     "matrix": [[0, 30], [30, 0]]
//! }"#;
//! let problem = engine.parse(input, &RoutingOptions::default(), &Diagnostics::default())?;
//! let params = SolveParams { exploration_level: 0, threads: 1 };
//! let solution = problem.solve(params, &Diagnostics::default())?;
//! assert_eq!(solution.summary.cost, 60);
//! # Ok::<(), fleetplan_core::EngineError>(())
//! ```

#![forbid(unsafe_code)]

mod engine;
mod input;
mod matrix;
mod solution;
mod vrp;

pub use engine::{VrpEngine, VrpEngineConfig};
