//! A self-contained implementation of the directory API.
//!
//! Serves accounts, groups and relationships from a JSON [`Dataset`] with the
//! same paging, filtering and bearer-token rules as the real service. It can
//! also simulate throttling, which makes it the backbone of the client and
//! engine integration tests.

pub use dataset::Dataset;
pub use error::FixtureError;
pub use server::{Fixture, FixtureBuilder, FixtureControls, run_with_listener, spawn_with_listener};

mod dataset;
mod error;
mod server;
