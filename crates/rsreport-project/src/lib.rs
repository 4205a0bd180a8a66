mod error;
mod project;

pub use error::{Error, Result};
pub use project::{LAYER_GROUPS, Project, Realization};
