use std::sync::Arc;

use sea_orm::DatabaseConnection;

use models::user_role::UserRole;

use super::{SeaOrmUserRoleRepository, UserRoleDto, UserRoleMapper, UserRoleQueryBuilder, UserRoleValidator};
use crate::crud::CrudService;

pub type UserRoleService = CrudService<
    UserRole,
    UserRoleDto,
    SeaOrmUserRoleRepository,
    UserRoleMapper,
    UserRoleQueryBuilder,
    UserRoleValidator,
>;

pub fn user_role_service(db: DatabaseConnection) -> UserRoleService {
    CrudService::new(
        Arc::new(SeaOrmUserRoleRepository::new(db)),
        Arc::new(UserRoleMapper),
        Arc::new(UserRoleQueryBuilder),
        Arc::new(UserRoleValidator),
    )
}
