use crate::audit::{now, AuditedEntity};
use crate::user_role::{self, UserRole, NAME_MAX_LEN};
use sea_orm::ActiveValue;
use uuid::Uuid;

#[test]
fn new_role_has_no_identity_or_timestamps() {
    let role = UserRole { name: Some("viewer".into()), ..Default::default() };
    assert!(!role.has_id());
    assert!(!role.has_deleted_at());
    assert!(role.created_at().is_none());
    assert!(role.updated_at().is_none());
}

#[test]
fn assigned_identity_is_immutable() {
    let mut role = UserRole::default();
    let first = Uuid::new_v4();
    role.assign_id(first);
    role.assign_id(Uuid::new_v4());
    assert_eq!(role.id(), Some(first));
}

#[test]
fn pre_persist_and_pre_update_stamp_their_own_column() {
    let mut role = UserRole::default();
    role.pre_persist();
    assert!(role.created_at.is_some());
    assert!(role.updated_at.is_none());

    let created = role.created_at;
    role.pre_update();
    assert!(role.updated_at.is_some());
    assert_eq!(role.created_at, created);
}

#[test]
fn row_converts_to_fully_populated_record() {
    let row = user_role::Model {
        id: Uuid::new_v4(),
        name: "admin".into(),
        description: None,
        created_at: now(),
        updated_at: None,
        deleted_at: None,
    };
    let role = UserRole::from(row.clone());
    assert_eq!(role.id, Some(row.id));
    assert_eq!(role.name.as_deref(), Some("admin"));
    assert_eq!(role.created_at, Some(row.created_at));
    assert!(role.description.is_none());
}

#[test]
fn active_model_leaves_absent_required_columns_unset() {
    let role = UserRole { id: Some(Uuid::new_v4()), description: Some("d".into()), ..Default::default() };
    let am = role.to_active_model();
    assert!(matches!(am.name, ActiveValue::NotSet));
    assert!(matches!(am.created_at, ActiveValue::NotSet));
    assert!(matches!(am.id, ActiveValue::Set(_)));
    assert_eq!(am.description, ActiveValue::Set(Some("d".to_string())));
    assert_eq!(am.deleted_at, ActiveValue::Set(None));
}

#[test]
fn validate_name_rules() {
    assert!(user_role::validate_name("admin").is_ok());
    assert!(user_role::validate_name("   ").is_err());
    assert!(user_role::validate_name(&"x".repeat(NAME_MAX_LEN)).is_ok());
    assert!(user_role::validate_name(&"x".repeat(NAME_MAX_LEN + 1)).is_err());
}

#[test]
fn row_serializes_with_snake_case_columns() {
    let row = user_role::Model {
        id: Uuid::nil(),
        name: "admin".into(),
        description: Some("all".into()),
        created_at: now(),
        updated_at: None,
        deleted_at: None,
    };
    let json = serde_json::to_value(&row).unwrap();
    assert_eq!(json["name"], "admin");
    assert!(json["updated_at"].is_null());
}
