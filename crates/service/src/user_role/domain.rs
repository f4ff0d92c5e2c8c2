use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::user_role::UserRole;

use crate::crud::Mapper;

/// External view of a user role. Absent fields are omitted on output and
/// mean "not supplied" on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<FixedOffset>>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct UserRoleMapper;

impl Mapper<UserRole, UserRoleDto> for UserRoleMapper {
    fn to_entity(&self, dto: UserRoleDto) -> UserRole {
        UserRole {
            id: dto.id,
            name: dto.name,
            description: dto.description,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
            deleted_at: dto.deleted_at,
        }
    }

    fn to_dto(&self, entity: UserRole) -> UserRoleDto {
        UserRoleDto {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            deleted_at: entity.deleted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_camel_case_and_skips_absent_fields() {
        let dto = UserRoleDto { name: Some("admin".into()), ..Default::default() };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "admin" }));

        let parsed: UserRoleDto = serde_json::from_str(r#"{"id":"00000000-0000-0000-0000-000000000000","createdAt":"2024-01-01T00:00:00+00:00"}"#).unwrap();
        assert_eq!(parsed.id, Some(Uuid::nil()));
        assert!(parsed.created_at.is_some());
        assert!(parsed.name.is_none());
    }

    #[test]
    fn mapper_keeps_absent_fields_absent() {
        let dto = UserRoleDto { id: Some(Uuid::new_v4()), description: Some("d".into()), ..Default::default() };
        let entity = UserRoleMapper.to_entity(dto.clone());
        assert!(entity.name.is_none());
        assert_eq!(UserRoleMapper.to_dto(entity), dto);
    }
}
