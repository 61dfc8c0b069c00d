//! Journey Tests
//!
//! Complete planning workflows, from snapshot to recommendation.

mod level_up_forecast;
