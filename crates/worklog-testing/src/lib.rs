//! Testing infrastructure for worklog integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestWorld`: Fluent interface for declarative test setup
//! - `fixtures`: Transcript fixture generation

pub mod fixtures;
pub mod world;

pub use fixtures::TranscriptFixture;
pub use world::{CliResult, TestWorld};
