//! Service layer providing generic CRUD orchestration on top of models.
//! - `crud` holds the collaborator contracts and the generic `CrudService`.
//! - `user_role` binds those contracts to the `user_role` table.
//! - Errors are surfaced through a single `ServiceError` taxonomy.

pub mod errors;
pub mod pagination;
pub mod crud;
pub mod user_role;
#[cfg(test)]
pub mod test_support;
