//! Testing infrastructure for rsreport integration tests.
//!
//! - `TestWorld`: isolated directory with fixture databases, projects and definitions
//! - `fixtures`: a small BRAT-style database, project descriptor and report definition

pub mod fixtures;
pub mod world;

pub use world::{CliResult, TestWorld};
