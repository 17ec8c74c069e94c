//! `VrpEngine` implementation backed by `vrp-core`.
//!
//! Parsing validates the problem document and resolves travel times up
//! front, so a [`ProblemInstance`] returned by [`VrpEngine`] only has the
//! search left to do.

use std::time::{Duration, Instant};

use fleetplan_core::{
    ComputingTimes, Diagnostics, Engine, EngineError, ProblemInstance, RoutingOptions,
    Solution, SolveParams, TravelTimeProviderFactory,
};
use log::{Level, debug, info, trace};

use crate::input::{ProblemSpec, parse_problem};
use crate::matrix::{Layout, TravelTable, resolve_travel_table};
use crate::solution::build_solution;
use crate::vrp::search_tours;

/// Configuration for [`VrpEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VrpEngineConfig {
    /// `vrp-core` generations granted per exploration level.
    ///
    /// Level `n` searches for `generations_per_level * (n + 1)` generations.
    pub generations_per_level: usize,
}

impl Default for VrpEngineConfig {
    fn default() -> Self {
        Self {
            generations_per_level: 100,
        }
    }
}

impl VrpEngineConfig {
    /// Generation budget for `exploration_level`.
    ///
    /// # Examples
    /// ```
    /// use fleetplan_solver_vrp::VrpEngineConfig;
    ///
    /// let config = VrpEngineConfig { generations_per_level: 10 };
    /// assert_eq!(config.max_generations(0), 10);
    /// assert_eq!(config.max_generations(5), 60);
    /// ```
    #[must_use]
    pub fn max_generations(self, exploration_level: u32) -> usize {
        let levels = usize::try_from(exploration_level)
            .unwrap_or(usize::MAX)
            .saturating_add(1);
        self.generations_per_level.saturating_mul(levels)
    }
}

/// Default engine: JSON problem documents solved with `vrp-core`.
///
/// The engine is generic over the factory that builds travel-time providers
/// for problems given as coordinates.
#[derive(Debug, Clone)]
pub struct VrpEngine<F> {
    factory: F,
    config: VrpEngineConfig,
}

impl<F> VrpEngine<F>
where
    F: TravelTimeProviderFactory,
{
    /// Construct an engine using default configuration.
    pub fn new(factory: F) -> Self {
        Self::with_config(factory, VrpEngineConfig::default())
    }

    /// Construct an engine with explicit configuration.
    pub const fn with_config(factory: F, config: VrpEngineConfig) -> Self {
        Self { factory, config }
    }
}

impl<F> Engine for VrpEngine<F>
where
    F: TravelTimeProviderFactory,
{
    fn parse(
        &self,
        input: &str,
        routing: &RoutingOptions,
        diagnostics: &Diagnostics,
    ) -> Result<Box<dyn ProblemInstance>, EngineError> {
        let started_at = Instant::now();
        let spec = parse_problem(input)?;
        let layout = Layout::new(&spec);
        debug!(
            "Validated problem with {} vehicles and {} jobs",
            spec.vehicles.len(),
            spec.jobs.len()
        );
        let table = resolve_travel_table(&spec, &layout, routing, &self.factory, diagnostics)?;
        let loading = millis(started_at.elapsed());
        info!("Problem loaded in {loading} ms");

        Ok(Box::new(VrpProblem {
            spec,
            layout,
            table,
            loading,
            config: self.config,
        }))
    }
}

struct VrpProblem {
    spec: ProblemSpec,
    layout: Layout,
    table: TravelTable,
    loading: u64,
    config: VrpEngineConfig,
}

impl ProblemInstance for VrpProblem {
    fn solve(&self, params: SolveParams, diagnostics: &Diagnostics) -> Result<Solution, EngineError> {
        let started_at = Instant::now();
        let max_generations = self.config.max_generations(params.exploration_level);
        // Zero threads leaves the pool size to rayon.
        let threads = usize::try_from(params.threads).unwrap_or(usize::MAX);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|err| EngineError::Backend(format!("failed to start worker pool: {err}")))?;
        debug!(
            "Searching for up to {max_generations} generations on {} threads",
            pool.current_num_threads()
        );

        let tours = pool.install(|| {
            search_tours(&self.spec, &self.layout, &self.table, max_generations)
        })?;
        if diagnostics.enabled(Level::Trace) {
            for tour in &tours {
                trace!("Visited locations: {tour:?}");
            }
        }

        let computing_times = ComputingTimes {
            loading: self.loading,
            solving: millis(started_at.elapsed()),
        };
        let solution = build_solution(
            &self.spec,
            &self.layout,
            &self.table,
            &tours,
            computing_times,
        );
        info!(
            "Solved with {} routes and {} unassigned jobs in {} ms",
            solution.routes.len(),
            solution.summary.unassigned,
            computing_times.solving
        );
        Ok(solution)
    }
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests;
