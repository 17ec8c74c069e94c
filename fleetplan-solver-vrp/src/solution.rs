//! Translation of `vrp-core` tours into the solution document.

use std::collections::HashSet;

use fleetplan_core::{ComputingTimes, RouteSummary, Solution, Step, StepKind, Summary, UnassignedJob};
use log::warn;
use vrp_core::models::common::Location;

use crate::input::ProblemSpec;
use crate::matrix::{Layout, Stop, TravelTable};

struct RouteBuilder<'a> {
    layout: &'a Layout,
    table: &'a TravelTable,
    steps: Vec<Step>,
    previous: Location,
    travel: u64,
    service: u64,
}

impl<'a> RouteBuilder<'a> {
    fn depart(layout: &'a Layout, table: &'a TravelTable, start: Location) -> Self {
        let mut builder = Self {
            layout,
            table,
            steps: Vec::new(),
            previous: start,
            travel: 0,
            service: 0,
        };
        builder.push(StepKind::Start, start, None, 0);
        builder
    }

    fn visit(&mut self, kind: StepKind, location: Location, job: Option<u64>, service: u32) {
        self.travel = self
            .travel
            .saturating_add(u64::from(self.table.travel(self.previous, location)));
        self.previous = location;
        self.push(kind, location, job, service);
    }

    fn push(&mut self, kind: StepKind, location: Location, job: Option<u64>, service: u32) {
        let place = self.layout.place(location);
        self.steps.push(Step {
            kind,
            job,
            location: place.and_then(|place| place.coordinates),
            location_index: place.and_then(|place| place.index),
            arrival: self.travel.saturating_add(self.service),
            duration: self.travel,
            service: u64::from(service),
        });
        self.service = self.service.saturating_add(u64::from(service));
    }

    fn finish(self, vehicle: u64) -> RouteSummary {
        let geometry = self
            .steps
            .iter()
            .map(|step| step.location)
            .collect::<Option<Vec<_>>>();
        RouteSummary {
            vehicle,
            cost: self.travel,
            service: self.service,
            duration: self.travel,
            steps: self.steps,
            geometry,
        }
    }
}

/// Build the route of one tour, or `None` when no vehicle start is visited.
fn build_route(
    spec: &ProblemSpec,
    layout: &Layout,
    table: &TravelTable,
    tour: &[Location],
    served: &mut HashSet<usize>,
) -> Option<RouteSummary> {
    let vehicle_index = tour.iter().find_map(|&location| match layout.stop(location) {
        Some(Stop::Start(index)) => Some(index),
        _ => None,
    })?;
    let vehicle = spec.vehicles.get(vehicle_index)?;
    let slot = layout.vehicle(vehicle_index)?;

    let mut route = RouteBuilder::depart(layout, table, slot.start);
    for &location in tour {
        if let Some(Stop::Job(index)) = layout.stop(location)
            && let Some(job) = spec.jobs.get(index)
        {
            served.insert(index);
            route.visit(StepKind::Job, location, Some(job.id), job.service);
        }
    }
    if let Some(end) = slot.end {
        route.visit(StepKind::End, end, None, 0);
    }
    Some(route.finish(vehicle.id))
}

/// Assemble the solution document from the visited locations of each route.
pub(crate) fn build_solution(
    spec: &ProblemSpec,
    layout: &Layout,
    table: &TravelTable,
    tours: &[Vec<Location>],
    computing_times: ComputingTimes,
) -> Solution {
    let mut served = HashSet::new();
    let mut routes = Vec::with_capacity(tours.len());
    for tour in tours {
        let Some(route) = build_route(spec, layout, table, tour, &mut served) else {
            warn!("Ignoring a route that never visits a vehicle start");
            continue;
        };
        routes.push(route);
    }
    routes.sort_by_key(|route| route.vehicle);

    let unassigned: Vec<UnassignedJob> = spec
        .jobs
        .iter()
        .enumerate()
        .filter(|(index, _)| !served.contains(index))
        .map(|(_, job)| UnassignedJob {
            id: job.id,
            location: job.location.coordinates,
        })
        .collect();

    let summary = summarise(&routes, unassigned.len(), computing_times);

    Solution {
        code: 0,
        summary,
        unassigned,
        routes,
    }
}

/// Saturating totals across `routes`.
fn summarise(
    routes: &[RouteSummary],
    unassigned: usize,
    computing_times: ComputingTimes,
) -> Summary {
    let total = |field: fn(&RouteSummary) -> u64| {
        routes
            .iter()
            .map(field)
            .fold(0_u64, u64::saturating_add)
    };
    Summary {
        cost: total(|route| route.cost),
        unassigned,
        service: total(|route| route.service),
        duration: total(|route| route.duration),
        computing_times,
    }
}
