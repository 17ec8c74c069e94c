//! Tests for the `VrpEngine`.

use std::time::Duration;

use super::*;
use fleetplan_core::test_support::UnitProviderFactory;
use fleetplan_core::{RoutingBackend, StepKind, TravelTimeError};
use fleetplan_routing::test_support::{StubProviderFactory, StubTravelTimeProvider};
use rstest::{fixture, rstest};

const MATRIX_PROBLEM: &str = r#"{
    "vehicles": [{"id": 1, "start_index": 0, "end_index": 0}],
    "jobs": [
        {"id": 10, "location_index": 1, "service": 30},
        {"id": 11, "location_index": 2, "service": 30},
        {"id": 12, "location_index": 3}
    ],
    "matrix": [
        [0, 10, 20, 30],
        [10, 0, 10, 20],
        [20, 10, 0, 10],
        [30, 20, 10, 0]
    ]
}"#;

const COORDINATE_PROBLEM: &str = r#"{
    "vehicles": [{"id": 1, "start": [2.35, 48.85], "end": [2.35, 48.85]}],
    "jobs": [
        {"id": 10, "location": [2.5, 48.5]},
        {"id": 11, "location": [2.25, 48.75]}
    ]
}"#;

#[fixture]
fn params() -> SolveParams {
    SolveParams {
        exploration_level: 0,
        threads: 1,
    }
}

fn quick_engine<F: TravelTimeProviderFactory>(factory: F) -> VrpEngine<F> {
    VrpEngine::with_config(
        factory,
        VrpEngineConfig {
            generations_per_level: 20,
        },
    )
}

fn solve(engine: &dyn Engine, input: &str, params: SolveParams) -> Result<Solution, EngineError> {
    let diagnostics = Diagnostics::default();
    let problem = engine.parse(input, &RoutingOptions::default(), &diagnostics)?;
    problem.solve(params, &diagnostics)
}

#[rstest]
#[case(0, 20)]
#[case(1, 40)]
#[case(5, 120)]
fn generation_budget_grows_with_exploration(#[case] level: u32, #[case] expected: usize) {
    let config = VrpEngineConfig {
        generations_per_level: 20,
    };
    assert_eq!(config.max_generations(level), expected);
}

#[rstest]
fn matrix_problem_assigns_every_job(params: SolveParams) {
    let engine = quick_engine(UnitProviderFactory);

    let solution = solve(&engine, MATRIX_PROBLEM, params).expect("solve should succeed");

    assert_eq!(solution.code, 0);
    assert!(solution.unassigned.is_empty());
    assert_eq!(solution.routes.len(), 1);
    let route = solution.routes.first().expect("one route");
    assert_eq!(route.vehicle, 1);
    assert_eq!(route.service, 60);
    assert_eq!(route.steps.first().map(|step| step.kind), Some(StepKind::Start));
    assert_eq!(route.steps.last().map(|step| step.kind), Some(StepKind::End));
    assert!(
        route
            .steps
            .windows(2)
            .all(|pair| pair[0].arrival <= pair[1].arrival)
    );
    assert!(route.geometry.is_none());
}

#[rstest]
fn zero_threads_uses_default_pool() {
    let engine = quick_engine(UnitProviderFactory);
    let params = SolveParams {
        exploration_level: 0,
        threads: 0,
    };

    let solution = solve(&engine, MATRIX_PROBLEM, params).expect("solve should succeed");

    assert_eq!(solution.summary.unassigned, 0);
}

#[rstest]
fn capacity_leaves_excess_jobs_unassigned(params: SolveParams) {
    let engine = quick_engine(UnitProviderFactory);
    let input = r#"{
        "vehicles": [{"id": 1, "start_index": 0, "capacity": 1}],
        "jobs": [
            {"id": 10, "location_index": 1, "amount": 1},
            {"id": 11, "location_index": 1, "amount": 1}
        ],
        "matrix": [[0, 5], [5, 0]]
    }"#;

    let solution = solve(&engine, input, params).expect("solve should succeed");

    assert_eq!(solution.summary.unassigned, 1);
    assert_eq!(solution.unassigned.len(), 1);
}

#[rstest]
fn coordinate_problem_uses_routing_provider(params: SolveParams) {
    let factory = StubProviderFactory::new(StubTravelTimeProvider::with_uniform_matrix(3, 60));
    let engine = quick_engine(factory);

    let solution = solve(&engine, COORDINATE_PROBLEM, params).expect("solve should succeed");

    assert_eq!(solution.summary.cost, 180);
    assert_eq!(solution.summary.duration, 180);
    let route = solution.routes.first().expect("one route");
    let geometry = route.geometry.as_ref().expect("coordinates are known");
    assert_eq!(geometry.len(), 4);
    assert_eq!(geometry.first(), Some(&[2.35, 48.85]));
}

#[rstest]
fn unreachable_location_is_reported() {
    let matrix = vec![
        vec![Duration::ZERO, Duration::MAX, Duration::from_secs(5)],
        vec![Duration::from_secs(5), Duration::ZERO, Duration::from_secs(5)],
        vec![Duration::from_secs(5), Duration::from_secs(5), Duration::ZERO],
    ];
    let engine = quick_engine(StubProviderFactory::new(
        StubTravelTimeProvider::with_matrix(matrix),
    ));

    let Err(err) = engine.parse(
        COORDINATE_PROBLEM,
        &RoutingOptions::default(),
        &Diagnostics::default(),
    ) else {
        panic!("expected an unfound route");
    };

    assert_eq!(
        err,
        EngineError::InvalidInput("Unfound route(s) from location [2.5,48.5].".to_owned())
    );
}

#[rstest]
fn embedded_routing_is_a_domain_error() {
    let engine = quick_engine(UnitProviderFactory);
    let routing = RoutingOptions {
        backend: RoutingBackend::Embedded,
        ..RoutingOptions::default()
    };

    let Err(err) = engine.parse(COORDINATE_PROBLEM, &routing, &Diagnostics::default()) else {
        panic!("expected embedded routing to be refused");
    };

    assert_eq!(err, EngineError::Routing(TravelTimeError::EmbeddedUnavailable));
    assert!(err.is_domain());
}

#[rstest]
fn embedded_routing_is_irrelevant_with_a_matrix(params: SolveParams) {
    let engine = quick_engine(UnitProviderFactory);
    let routing = RoutingOptions {
        backend: RoutingBackend::Embedded,
        ..RoutingOptions::default()
    };
    let diagnostics = Diagnostics::default();

    let problem = engine
        .parse(MATRIX_PROBLEM, &routing, &diagnostics)
        .expect("matrix problems need no routing");
    let solution = problem.solve(params, &diagnostics).expect("solve should succeed");

    assert_eq!(solution.summary.unassigned, 0);
}

#[rstest]
fn invalid_document_is_rejected_before_routing() {
    let engine = quick_engine(UnitProviderFactory);

    let Err(err) = engine.parse(
        r#"{"vehicles": [], "jobs": []}"#,
        &RoutingOptions::default(),
        &Diagnostics::default(),
    ) else {
        panic!("expected validation failure");
    };

    assert_eq!(err, EngineError::InvalidInput("Invalid vehicles.".to_owned()));
}
