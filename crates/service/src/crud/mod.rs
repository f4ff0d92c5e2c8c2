//! Generic CRUD orchestration.
//!
//! A resource plugs in four collaborators (repository, mapper, query
//! builder, validator) and optionally lifecycle hooks; [`CrudService`]
//! runs the find / create / patch / put / delete / list lifecycle over them.

pub mod contracts;
pub mod repository;
pub mod service;

pub use contracts::{LifecycleHooks, Mapper, NoHooks, QueryBuilder, Validator};
pub use repository::Repository;
pub use service::{CrudService, ResourceService};
