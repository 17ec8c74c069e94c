//! Behavioural tests for `TravelTimeProvider` implementations and factories.

use fleetplan_core::test_support::{UnitProviderFactory, UnitTravelTimeProvider};
use fleetplan_core::{
    RoutingBackend, RoutingOptions, TravelTimeError, TravelTimeMatrix, TravelTimeProvider,
    TravelTimeProviderFactory,
};
use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[derive(Default)]
struct ProviderWorld {
    routing: RefCell<RoutingOptions>,
    result: RefCell<Option<Result<TravelTimeMatrix, TravelTimeError>>>,
    build_error: RefCell<Option<TravelTimeError>>,
}

#[fixture]
fn world() -> ProviderWorld {
    ProviderWorld::default()
}

#[given("a provider returning unit distances")]
fn given_provider(#[from(world)] world: &ProviderWorld) {
    world.result.replace(None);
}

#[given("routing options selecting the embedded backend")]
fn embedded_routing(#[from(world)] world: &ProviderWorld) {
    world.routing.borrow_mut().backend = RoutingBackend::Embedded;
}

#[when("I request travel times for two locations")]
fn request_two(#[from(world)] world: &ProviderWorld) {
    let locations = [Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }];
    world
        .result
        .replace(Some(UnitTravelTimeProvider.get_travel_time_matrix(&locations)));
}

#[when("I request travel times for no locations")]
fn request_none(#[from(world)] world: &ProviderWorld) {
    world
        .result
        .replace(Some(UnitTravelTimeProvider.get_travel_time_matrix(&[])));
}

#[when("I build a provider from the factory")]
fn build_provider(#[from(world)] world: &ProviderWorld) {
    let routing = world.routing.borrow().clone();
    world
        .build_error
        .replace(UnitProviderFactory.build(&routing).err());
}

#[then("a 2x2 matrix is returned")]
fn then_matrix(#[from(world)] world: &ProviderWorld) {
    let borrow = world.result.borrow();
    let matrix = borrow
        .as_ref()
        .expect("request recorded")
        .as_ref()
        .expect("expected Ok result");
    assert_eq!(matrix.len(), 2);
    assert!(matrix.iter().all(|row| row.len() == 2));
}

#[then("an empty input error is returned")]
fn then_error(#[from(world)] world: &ProviderWorld) {
    let borrow = world.result.borrow();
    let result = borrow.as_ref().expect("request recorded");
    assert_eq!(result.as_ref().err(), Some(&TravelTimeError::EmptyInput));
}

#[then("the embedded backend is reported as unavailable")]
fn then_embedded_unavailable(#[from(world)] world: &ProviderWorld) {
    let err = world.build_error.borrow().clone().expect("factory should fail");
    assert_eq!(err, TravelTimeError::EmbeddedUnavailable);
    assert_eq!(
        err.to_string(),
        "Embedded routing engine is not available in this build."
    );
}

#[scenario(path = "tests/features/travel_time_provider.feature", index = 0)]
fn matrix_returned(#[from(world)] world: ProviderWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/travel_time_provider.feature", index = 1)]
fn error_on_empty(#[from(world)] world: ProviderWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/travel_time_provider.feature", index = 2)]
fn embedded_refused(#[from(world)] world: ProviderWorld) {
    let _ = world;
}
