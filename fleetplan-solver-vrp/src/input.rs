//! Problem document parsing and validation.
//!
//! The document is decoded in two passes: a loose `serde_json::Value` pass
//! that checks the top-level shape, then a typed pass. Validation turns the
//! typed document into a [`ProblemSpec`] whose places are known to be usable
//! with the selected matrix source.

use std::collections::HashSet;

use fleetplan_core::{Coordinates, EngineError};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct ProblemDocument {
    vehicles: Vec<VehicleDocument>,
    jobs: Vec<JobDocument>,
    matrix: Option<Vec<Vec<u32>>>,
}

#[derive(Debug, Deserialize)]
struct VehicleDocument {
    id: u64,
    start: Option<Coordinates>,
    start_index: Option<usize>,
    end: Option<Coordinates>,
    end_index: Option<usize>,
    capacity: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct JobDocument {
    id: u64,
    location: Option<Coordinates>,
    location_index: Option<usize>,
    #[serde(default)]
    service: u32,
    amount: Option<u32>,
}

/// A validated location: coordinates, a matrix index, or both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Place {
    pub(crate) coordinates: Option<Coordinates>,
    pub(crate) index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct VehicleSpec {
    pub(crate) id: u64,
    pub(crate) start: Place,
    /// `None` for open routes.
    pub(crate) end: Option<Place>,
    pub(crate) capacity: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct JobSpec {
    pub(crate) id: u64,
    pub(crate) location: Place,
    pub(crate) service: u32,
    pub(crate) amount: Option<i32>,
}

/// A problem that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProblemSpec {
    pub(crate) vehicles: Vec<VehicleSpec>,
    pub(crate) jobs: Vec<JobSpec>,
    /// Square matrix of travel seconds supplied with the problem.
    pub(crate) matrix: Option<Vec<Vec<u32>>>,
    /// Whether loads are tracked at all.
    pub(crate) capacitated: bool,
}

enum PlaceError {
    Missing,
    OutOfRange(usize),
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidInput(message.into())
}

fn is_non_empty_array(document: &Value, key: &str) -> bool {
    document
        .get(key)
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty())
}

/// Resolve a place against the matrix source.
///
/// With a matrix every place needs an in-range index. Without one, the
/// coordinates are mandatory and any index is meaningless.
fn resolve_place(
    coordinates: Option<Coordinates>,
    index: Option<usize>,
    matrix_size: Option<usize>,
) -> Result<Option<Place>, PlaceError> {
    match (matrix_size, index, coordinates) {
        (Some(size), Some(row), _) if row >= size => Err(PlaceError::OutOfRange(row)),
        (Some(_), Some(_), _) => Ok(Some(Place { coordinates, index })),
        (Some(_), None, Some(_)) | (None, Some(_), None) => Err(PlaceError::Missing),
        (None, _, Some(_)) => Ok(Some(Place {
            coordinates,
            index: None,
        })),
        (_, None, None) => Ok(None),
    }
}

fn out_of_range(index: usize) -> EngineError {
    invalid(format!("Location index {index} exceeds matrix size."))
}

fn load(value: Option<u32>, message: impl FnOnce() -> String) -> Result<Option<i32>, EngineError> {
    value
        .map(|raw| i32::try_from(raw).map_err(|_| invalid(message())))
        .transpose()
}

/// Parse and validate a problem document.
pub(crate) fn parse_problem(input: &str) -> Result<ProblemSpec, EngineError> {
    let document: Value = serde_json::from_str(input)
        .map_err(|err| invalid(format!("Invalid JSON input: {err}")))?;
    if !is_non_empty_array(&document, "vehicles") {
        return Err(invalid("Invalid vehicles."));
    }
    if !is_non_empty_array(&document, "jobs") {
        return Err(invalid("Invalid jobs."));
    }
    let document: ProblemDocument = serde_json::from_value(document)
        .map_err(|err| invalid(format!("Invalid JSON input: {err}")))?;
    validate(document)
}

fn validate(document: ProblemDocument) -> Result<ProblemSpec, EngineError> {
    let matrix_size = document
        .matrix
        .as_ref()
        .map(|matrix| {
            let size = matrix.len();
            if size == 0 || matrix.iter().any(|row| row.len() != size) {
                return Err(invalid("Unexpected matrix size."));
            }
            Ok(size)
        })
        .transpose()?;

    let capacitated = document.jobs.iter().any(|job| job.amount.is_some())
        || document
            .vehicles
            .iter()
            .any(|vehicle| vehicle.capacity.is_some());

    let vehicles = validate_vehicles(document.vehicles, matrix_size, capacitated)?;
    let jobs = validate_jobs(document.jobs, matrix_size)?;

    Ok(ProblemSpec {
        vehicles,
        jobs,
        matrix: document.matrix,
        capacitated,
    })
}

fn validate_vehicles(
    documents: Vec<VehicleDocument>,
    matrix_size: Option<usize>,
    capacitated: bool,
) -> Result<Vec<VehicleSpec>, EngineError> {
    let mut seen = HashSet::new();
    documents
        .into_iter()
        .map(|vehicle| {
            let id = vehicle.id;
            if !seen.insert(id) {
                return Err(invalid(format!("Duplicate vehicle id: {id}")));
            }
            let start = match resolve_place(vehicle.start, vehicle.start_index, matrix_size) {
                Ok(Some(place)) => place,
                Ok(None) | Err(PlaceError::Missing) => {
                    return Err(invalid(format!("Invalid start for vehicle {id}.")));
                }
                Err(PlaceError::OutOfRange(index)) => return Err(out_of_range(index)),
            };
            let end = match resolve_place(vehicle.end, vehicle.end_index, matrix_size) {
                Ok(end) => end,
                Err(PlaceError::Missing) => {
                    return Err(invalid(format!("Invalid end for vehicle {id}.")));
                }
                Err(PlaceError::OutOfRange(index)) => return Err(out_of_range(index)),
            };
            if capacitated && vehicle.capacity.is_none() {
                return Err(invalid(format!("Missing capacity for vehicle {id}.")));
            }
            let capacity = load(vehicle.capacity, || {
                format!("Invalid capacity for vehicle {id}.")
            })?;
            Ok(VehicleSpec {
                id,
                start,
                end,
                capacity,
            })
        })
        .collect()
}

fn validate_jobs(
    documents: Vec<JobDocument>,
    matrix_size: Option<usize>,
) -> Result<Vec<JobSpec>, EngineError> {
    let mut seen = HashSet::new();
    documents
        .into_iter()
        .map(|job| {
            let id = job.id;
            if !seen.insert(id) {
                return Err(invalid(format!("Duplicate job id: {id}")));
            }
            let location = match resolve_place(job.location, job.location_index, matrix_size) {
                Ok(Some(place)) => place,
                Ok(None) | Err(PlaceError::Missing) => {
                    return Err(invalid(format!("Invalid location for job {id}.")));
                }
                Err(PlaceError::OutOfRange(index)) => return Err(out_of_range(index)),
            };
            let amount = load(job.amount, || format!("Invalid amount for job {id}."))?;
            Ok(JobSpec {
                id,
                location,
                service: job.service,
                amount,
            })
        })
        .collect()
}
