// NOTE: rsreport CLI Rationale
//
// Why a report definition file (not hard-coded report functions)?
// - The same assembly primitives serve every model's database
// - Sections, queries and headings change far more often than the engine
// - A missing definition still yields a useful report: header plus layers
//
// Why fail the whole report on a bad query?
// - A half-written report looks complete; an error with the section name does not

mod args;
mod commands;
pub mod config;
mod handlers;
pub mod logging;
pub mod types;
mod views;

pub use args::{Cli, Commands};
pub use commands::run;
pub use handlers::report::{ReportOutcome, ReportRequest};
