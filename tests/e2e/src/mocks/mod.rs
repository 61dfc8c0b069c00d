//! Test data

mod fixtures;

pub use fixtures::{test_now, SnapshotFactory};
