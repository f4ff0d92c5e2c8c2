//! `user_role` resource: DTO, mapper, validator, criteria translation and
//! the SeaORM repository, wired into a [`crate::crud::CrudService`].

pub mod domain;
pub mod validation;
pub mod query;
pub mod repo;
pub mod service;

pub use domain::{UserRoleDto, UserRoleMapper};
pub use query::UserRoleQueryBuilder;
pub use repo::seaorm::SeaOrmUserRoleRepository;
pub use service::{user_role_service, UserRoleService};
pub use validation::UserRoleValidator;
