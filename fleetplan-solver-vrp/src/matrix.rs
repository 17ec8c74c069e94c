//! Location layout and travel-time resolution.
//!
//! Every job, vehicle start and vehicle end gets its own `vrp-core` location
//! so a visited location identifies exactly one stop. Several locations may
//! share a row of the travel table when they sit at the same place.

use std::collections::HashMap;
use std::time::Duration;

use fleetplan_core::{
    Coordinates, Diagnostics, EngineError, RoutingOptions, TravelTimeError,
    TravelTimeProviderFactory,
};
use geo::Coord;
use log::{Level, debug, trace};
use vrp_core::models::common::Location;

use crate::input::{Place, ProblemSpec};

/// What a `vrp-core` location stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stop {
    Job(usize),
    Start(usize),
    End(usize),
}

/// Locations assigned to one vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VehicleSlot {
    pub(crate) start: Location,
    pub(crate) end: Option<Location>,
}

/// Mapping between problem entities and `vrp-core` locations.
///
/// Jobs occupy locations `0..jobs.len()` in input order; vehicle starts and
/// ends follow.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Layout {
    stops: Vec<Stop>,
    places: Vec<Place>,
    vehicles: Vec<VehicleSlot>,
}

impl Layout {
    pub(crate) fn new(spec: &ProblemSpec) -> Self {
        let mut stops: Vec<Stop> = (0..spec.jobs.len()).map(Stop::Job).collect();
        let mut places: Vec<Place> = spec.jobs.iter().map(|job| job.location).collect();
        let mut vehicles = Vec::with_capacity(spec.vehicles.len());
        for (index, vehicle) in spec.vehicles.iter().enumerate() {
            let start = stops.len();
            stops.push(Stop::Start(index));
            places.push(vehicle.start);
            let end = vehicle.end.map(|place| {
                let end = stops.len();
                stops.push(Stop::End(index));
                places.push(place);
                end
            });
            vehicles.push(VehicleSlot { start, end });
        }
        Self {
            stops,
            places,
            vehicles,
        }
    }

    /// Number of `vrp-core` locations.
    pub(crate) const fn len(&self) -> usize {
        self.stops.len()
    }

    pub(crate) fn stop(&self, location: Location) -> Option<Stop> {
        self.stops.get(location).copied()
    }

    pub(crate) fn place(&self, location: Location) -> Option<&Place> {
        self.places.get(location)
    }

    /// Slots in vehicle input order.
    pub(crate) fn vehicles(&self) -> &[VehicleSlot] {
        &self.vehicles
    }

    pub(crate) fn vehicle(&self, index: usize) -> Option<VehicleSlot> {
        self.vehicles.get(index).copied()
    }
}

/// Whole-second travel times between `vrp-core` locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TravelTable {
    /// Row of `seconds` used by each location.
    rows: Vec<usize>,
    seconds: Vec<Vec<u32>>,
}

impl TravelTable {
    /// Seconds from `from` to `to`; unknown pairs cost nothing.
    pub(crate) fn travel(&self, from: Location, to: Location) -> u32 {
        let (Some(&row), Some(&column)) = (self.rows.get(from), self.rows.get(to)) else {
            return 0;
        };
        self.seconds
            .get(row)
            .and_then(|cells| cells.get(column))
            .copied()
            .unwrap_or(0)
    }

    /// Build the table from the matrix shipped with the problem.
    fn from_problem_matrix(layout: &Layout, matrix: &[Vec<u32>]) -> Self {
        let rows = layout
            .places
            .iter()
            .map(|place| place.index.unwrap_or_default())
            .collect();
        Self {
            rows,
            seconds: matrix.to_vec(),
        }
    }
}

/// Round a routing duration to whole seconds.
///
/// `None` marks pairs the routing backend could not connect.
fn whole_seconds(duration: Duration) -> Option<u32> {
    if duration == Duration::MAX {
        return None;
    }
    let seconds = if duration.subsec_millis() >= 500 {
        duration.as_secs().checked_add(1)?
    } else {
        duration.as_secs()
    };
    u32::try_from(seconds).ok()
}

const fn coordinate_key(coordinates: Coordinates) -> (u64, u64) {
    let [lon, lat] = coordinates;
    (lon.to_bits(), lat.to_bits())
}

/// Resolve the travel table for `layout`.
///
/// A matrix shipped with the problem wins. Otherwise the distinct
/// coordinates are sent to a provider built from `routing`.
pub(crate) fn resolve_travel_table(
    spec: &ProblemSpec,
    layout: &Layout,
    routing: &RoutingOptions,
    factory: &dyn TravelTimeProviderFactory,
    diagnostics: &Diagnostics,
) -> Result<TravelTable, EngineError> {
    if let Some(matrix) = &spec.matrix {
        debug!("Using the {n} x {n} matrix supplied with the problem", n = matrix.len());
        return Ok(TravelTable::from_problem_matrix(layout, matrix));
    }

    let mut distinct: Vec<Coordinates> = Vec::new();
    let mut known: HashMap<(u64, u64), usize> = HashMap::new();
    let mut rows = Vec::with_capacity(layout.len());
    for place in &layout.places {
        let coordinates = place.coordinates.ok_or_else(|| {
            EngineError::Backend("location without coordinates in routed problem".to_owned())
        })?;
        let row = *known.entry(coordinate_key(coordinates)).or_insert_with(|| {
            distinct.push(coordinates);
            distinct.len() - 1
        });
        rows.push(row);
    }

    let provider = factory.build(routing)?;
    let locations: Vec<Coord<f64>> = distinct
        .iter()
        .map(|&[x, y]| Coord { x, y })
        .collect();
    debug!("Fetching travel times for {} distinct locations", locations.len());
    let matrix = provider.get_travel_time_matrix(&locations)?;
    if matrix.len() != distinct.len() || matrix.iter().any(|row| row.len() != distinct.len()) {
        return Err(TravelTimeError::ParseError {
            message: format!(
                "expected a {n} x {n} durations table",
                n = distinct.len()
            ),
        }
        .into());
    }
    if diagnostics.enabled(Level::Trace) {
        trace!("Routing matrix: {matrix:?}");
    }

    let seconds = matrix
        .iter()
        .zip(&distinct)
        .map(|(row, &[lon, lat])| {
            row.iter()
                .map(|&cell| whole_seconds(cell))
                .collect::<Option<Vec<u32>>>()
                .ok_or_else(|| {
                    EngineError::InvalidInput(format!(
                        "Unfound route(s) from location [{lon},{lat}]."
                    ))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TravelTable { rows, seconds })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_problem;
    use fleetplan_core::test_support::UnitProviderFactory;
    use rstest::rstest;

    fn spec(input: &str) -> ProblemSpec {
        parse_problem(input).expect("valid problem")
    }

    #[rstest]
    fn jobs_come_first_then_vehicle_slots() {
        let spec = spec(
            r#"{"vehicles": [{"id": 1, "start_index": 0, "end_index": 0}, {"id": 2, "start_index": 1}],
                "jobs": [{"id": 5, "location_index": 1}, {"id": 6, "location_index": 1}],
                "matrix": [[0, 4], [4, 0]]}"#,
        );

        let layout = Layout::new(&spec);

        assert_eq!(layout.len(), 5);
        assert_eq!(layout.stop(0), Some(Stop::Job(0)));
        assert_eq!(layout.stop(1), Some(Stop::Job(1)));
        assert_eq!(
            layout.vehicle(0),
            Some(VehicleSlot {
                start: 2,
                end: Some(3)
            })
        );
        assert_eq!(layout.vehicle(1), Some(VehicleSlot { start: 4, end: None }));
    }

    #[rstest]
    fn problem_matrix_is_looked_up_by_index() {
        let spec = spec(
            r#"{"vehicles": [{"id": 1, "start_index": 0}],
                "jobs": [{"id": 5, "location_index": 2}, {"id": 6, "location_index": 1}],
                "matrix": [[0, 4, 9], [4, 0, 3], [9, 3, 0]]}"#,
        );
        let layout = Layout::new(&spec);

        let table = resolve_travel_table(
            &spec,
            &layout,
            &RoutingOptions::default(),
            &UnitProviderFactory,
            &Diagnostics::default(),
        )
        .expect("table");

        assert_eq!(table.travel(2, 0), 9);
        assert_eq!(table.travel(0, 1), 3);
        assert_eq!(table.travel(1, 1), 0);
    }

    #[rstest]
    fn shared_coordinates_share_a_row() {
        let spec = spec(
            r#"{"vehicles": [{"id": 1, "start": [2.35, 48.85], "end": [2.35, 48.85]}],
                "jobs": [{"id": 5, "location": [2.36, 48.86]}]}"#,
        );
        let layout = Layout::new(&spec);

        let table = resolve_travel_table(
            &spec,
            &layout,
            &RoutingOptions::default(),
            &UnitProviderFactory,
            &Diagnostics::default(),
        )
        .expect("table");

        assert_eq!(table.seconds.len(), 2);
        assert_eq!(table.travel(1, 2), 0);
        assert_eq!(table.travel(1, 0), 1);
    }

    #[rstest]
    #[case(Duration::from_millis(1_499), Some(1))]
    #[case(Duration::from_millis(1_500), Some(2))]
    #[case(Duration::ZERO, Some(0))]
    #[case(Duration::MAX, None)]
    #[case(Duration::from_secs(u64::from(u32::MAX) + 1), None)]
    fn rounds_to_whole_seconds(#[case] duration: Duration, #[case] expected: Option<u32>) {
        assert_eq!(whole_seconds(duration), expected);
    }
}
