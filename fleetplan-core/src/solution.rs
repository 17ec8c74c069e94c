//! The solution document returned by a successful solve.
//!
//! Durations and costs are whole seconds of travel. Computing times are
//! milliseconds. Optional members are omitted from the JSON rendering rather
//! than written as `null`.

/// `[longitude, latitude]` pair.
pub type Coordinates = [f64; 2];

/// Complete result of a solve.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Always `0` for a solution.
    pub code: u8,
    /// Aggregates across all routes.
    pub summary: Summary,
    /// Jobs no vehicle could serve.
    pub unassigned: Vec<UnassignedJob>,
    /// One entry per vehicle that left its start.
    pub routes: Vec<RouteSummary>,
}

impl Solution {
    /// Drop route geometry, as done when `-g` is not given.
    ///
    /// # Examples
    /// ```
    /// use fleetplan_core::{RouteSummary, Solution};
    ///
    /// let solution = Solution {
    ///     routes: vec![RouteSummary {
    ///         geometry: Some(vec![[2.35, 48.85]]),
    ///         ..RouteSummary::default()
    ///     }],
    ///     ..Solution::default()
    /// };
    /// let stripped = solution.without_geometry();
    /// assert!(stripped.routes.iter().all(|route| route.geometry.is_none()));
    /// ```
    #[must_use]
    pub fn without_geometry(mut self) -> Self {
        for route in &mut self.routes {
            route.geometry = None;
        }
        self
    }
}

/// Aggregate figures for a [`Solution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// Total travel cost.
    pub cost: u64,
    /// Number of unassigned jobs.
    pub unassigned: usize,
    /// Total service time.
    pub service: u64,
    /// Total travel time.
    pub duration: u64,
    /// Wall-clock time spent per phase.
    pub computing_times: ComputingTimes,
}

/// Milliseconds spent loading and solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComputingTimes {
    /// Parsing, validation and matrix retrieval.
    pub loading: u64,
    /// Search.
    pub solving: u64,
}

/// A job left out of every route.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnassignedJob {
    /// Job identifier from the input.
    pub id: u64,
    /// Job coordinates, when the input supplied them.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub location: Option<Coordinates>,
}

/// The journey of a single vehicle.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSummary {
    /// Vehicle identifier from the input.
    pub vehicle: u64,
    /// Travel cost of this route.
    pub cost: u64,
    /// Service time spent at jobs.
    pub service: u64,
    /// Travel time of this route.
    pub duration: u64,
    /// Ordered stops, starting with [`StepKind::Start`].
    pub steps: Vec<Step>,
    /// Ordered step coordinates.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub geometry: Option<Vec<Coordinates>>,
}

/// Kind of a route [`Step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum StepKind {
    /// Vehicle departure.
    #[default]
    Start,
    /// Job visit.
    Job,
    /// Vehicle arrival at its end location.
    End,
}

/// A single stop along a route.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// Stop kind.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: StepKind,
    /// Job identifier for [`StepKind::Job`] steps.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub job: Option<u64>,
    /// Stop coordinates, when known.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub location: Option<Coordinates>,
    /// Matrix index of the stop, when the input used indices.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub location_index: Option<usize>,
    /// Seconds since departure at which the vehicle reaches the stop.
    pub arrival: u64,
    /// Cumulated travel time up to the stop.
    pub duration: u64,
    /// Service time spent at the stop.
    #[cfg_attr(feature = "serde", serde(default))]
    pub service: u64,
}
