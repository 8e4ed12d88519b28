//! Scenario bindings for the gopat BDD feature file.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::scenario;

use super::TestWorld;

/// Fixture providing the shared BDD world.
#[fixture]
fn world() -> RefCell<TestWorld> {
    super::world()
}

#[scenario(
    path = "tests/features/gopat.feature",
    name = "Sequence wildcards match trailing call arguments"
)]
fn sequence_wildcard_arguments(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/gopat.feature",
    name = "Repeated metavariables require equal nodes"
)]
fn repeated_metavariables(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/gopat.feature",
    name = "Statement lists bind the trailing return value"
)]
fn statement_lists_bind_return(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/gopat.feature",
    name = "Rewriting with the pattern itself leaves the tree unchanged"
)]
fn identity_rewrite(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/gopat.feature",
    name = "Attribute filters keep identifiers matching a regex"
)]
fn regex_filter(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/gopat.feature",
    name = "Nested patterns filter matches by their content"
)]
fn contains_filter(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/gopat.feature",
    name = "Matches move up to their enclosing statements"
)]
fn navigate_to_enclosing_statement(world: RefCell<TestWorld>) {
    drop(world);
}
