//! Persistence models: the audited-entity contract shared by every resource,
//! the per-resource tables, and connection helpers.

pub mod errors;
pub mod db;
pub mod audit;
pub mod user_role;

#[cfg(test)]
mod tests;
