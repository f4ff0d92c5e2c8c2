//! Shared building blocks for the workspace: request criteria types and
//! logging initialisation.

pub mod types;
pub mod utils;
