//! `vrp-core` modelling helpers for `VrpEngine`.
//!
//! Converts a validated problem and its travel table into a `vrp-core`
//! problem, runs the metaheuristic and returns the visited locations of each
//! route, starting with the vehicle's start location.

use std::sync::Arc;

use fleetplan_core::EngineError;
use vrp_core::models::common::{Location, Profile};
use vrp_core::models::problem::{TravelTime, Vehicle};
use vrp_core::models::solution::Route as VrpRoute;
use vrp_core::prelude::*;

use crate::input::ProblemSpec;
use crate::matrix::{Layout, TravelTable};

struct TableTransportCost {
    durations: Vec<Vec<f64>>,
}

impl TableTransportCost {
    fn new(layout: &Layout, table: &TravelTable) -> Self {
        let size = layout.len();
        let durations = (0..size)
            .map(|from| {
                (0..size)
                    .map(|to| f64::from(table.travel(from, to)))
                    .collect()
            })
            .collect();
        Self { durations }
    }

    fn seconds(&self, from: Location, to: Location) -> f64 {
        self.durations
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(0.0)
    }
}

impl TransportCost for TableTransportCost {
    // Travel cost is travel time, independent of route and departure.
    fn distance(
        &self,
        _route: &VrpRoute,
        from: Location,
        to: Location,
        _departure: TravelTime,
    ) -> Cost {
        self.seconds(from, to)
    }

    fn duration(
        &self,
        _route: &VrpRoute,
        from: Location,
        to: Location,
        _departure: TravelTime,
    ) -> f64 {
        self.seconds(from, to)
    }

    fn distance_approx(&self, profile: &Profile, from: usize, to: usize) -> f64 {
        self.duration_approx(profile, from, to)
    }

    fn duration_approx(&self, _profile: &Profile, from: usize, to: usize) -> f64 {
        self.seconds(from, to)
    }
}

fn define_goal(transport: Arc<dyn TransportCost>, capacitated: bool) -> GenericResult<GoalContext> {
    let minimize_unassigned = MinimizeUnassignedBuilder::new("min-unassigned").build()?;
    let transport_feature = TransportFeatureBuilder::new("min-travel-time")
        .set_transport_cost(transport)
        .set_time_constrained(false)
        .build_minimize_distance()?;

    let mut features = vec![minimize_unassigned, transport_feature];
    if capacitated {
        features.push(CapacityFeatureBuilder::<SingleDimLoad>::new("capacity").build()?);
    }

    GoalContextBuilder::with_features(&features)?.build()
}

fn define_jobs(spec: &ProblemSpec) -> GenericResult<Vec<Job>> {
    spec.jobs
        .iter()
        .enumerate()
        .map(|(location, job)| {
            let mut builder = SingleBuilder::default()
                .id(job.id.to_string().as_str())
                .location(location)?;
            if job.service > 0 {
                builder = builder.duration(f64::from(job.service))?;
            }
            if spec.capacitated {
                builder = builder.demand(Demand::delivery(job.amount.unwrap_or_default()));
            }
            builder.build_as_job()
        })
        .collect()
}

fn define_vehicles(spec: &ProblemSpec, layout: &Layout) -> GenericResult<Vec<Vehicle>> {
    spec.vehicles
        .iter()
        .zip(layout.vehicles())
        .map(|(vehicle, slot)| {
            let mut detail = VehicleDetailBuilder::default().set_start_location(slot.start);
            if let Some(end) = slot.end {
                detail = detail.set_end_location(end);
            }
            let mut builder = VehicleBuilder::default()
                .id(vehicle.id.to_string().as_str())
                .add_detail(detail.build()?);
            if spec.capacitated {
                builder = builder.capacity(SingleDimLoad::new(vehicle.capacity.unwrap_or_default()));
            }
            builder.build()
        })
        .collect()
}

fn run_search(
    spec: &ProblemSpec,
    layout: &Layout,
    table: &TravelTable,
    max_generations: usize,
) -> GenericResult<Vec<Vec<Location>>> {
    let transport: Arc<dyn TransportCost> = Arc::new(TableTransportCost::new(layout, table));
    let goal = define_goal(transport.clone(), spec.capacitated)?;
    let jobs = define_jobs(spec)?;
    let vehicles = define_vehicles(spec, layout)?;

    let problem = Arc::new(
        ProblemBuilder::default()
            .add_jobs(jobs.into_iter())
            .add_vehicles(vehicles.into_iter())
            .with_goal(goal)
            .with_transport_cost(transport)
            .build()?,
    );

    let config = VrpConfigBuilder::new(problem.clone())
        .prebuild()?
        .with_max_generations(Some(max_generations))
        .build()?;

    let solution = vrp_core::solver::Solver::new(problem, config).solve()?;

    Ok(solution
        .get_locations()
        .map(|route| route.collect::<Vec<_>>())
        .collect())
}

/// Search for routes and return the visited locations of each.
pub(crate) fn search_tours(
    spec: &ProblemSpec,
    layout: &Layout,
    table: &TravelTable,
    max_generations: usize,
) -> Result<Vec<Vec<Location>>, EngineError> {
    run_search(spec, layout, table, max_generations)
        .map_err(|err| EngineError::Backend(format!("route search failed: {err}")))
}
