use common::types::Criteria;
use sea_orm::{ColumnTrait, Condition};
use tracing::debug;
use uuid::Uuid;

use models::user_role;

use crate::crud::QueryBuilder;
use crate::errors::ServiceError;
use crate::pagination::is_pagination_key;

/// Criteria keys:
/// - `id`: exact identity
/// - `name`: exact name
/// - `description`: substring of the description
/// - `deleted`: `true` for soft-deleted rows only, `false` for live rows only
#[derive(Clone, Copy, Debug, Default)]
pub struct UserRoleQueryBuilder;

impl QueryBuilder for UserRoleQueryBuilder {
    type Predicate = Condition;

    fn build(&self, criteria: &Criteria) -> Result<Condition, ServiceError> {
        let mut cond = Condition::all();
        for (key, value) in criteria {
            if is_pagination_key(key) || value.is_empty() {
                continue;
            }
            cond = match key.as_str() {
                "id" => {
                    let id = Uuid::parse_str(value)
                        .map_err(|e| ServiceError::InvalidArgument(format!("criteria [id] is not a valid uuid [{value}]: {e}")))?;
                    cond.add(user_role::Column::Id.eq(id))
                }
                "name" => cond.add(user_role::Column::Name.eq(value.as_str())),
                "description" => cond.add(user_role::Column::Description.contains(value.as_str())),
                "deleted" => match value.as_str() {
                    "true" => cond.add(user_role::Column::DeletedAt.is_not_null()),
                    "false" => cond.add(user_role::Column::DeletedAt.is_null()),
                    other => {
                        return Err(ServiceError::InvalidArgument(format!("criteria [deleted] must be true or false, got [{other}]")));
                    }
                },
                other => {
                    debug!(key = other, "ignoring unknown criteria key");
                    cond
                }
            };
        }
        Ok(cond)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::criteria;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn sql(c: &Criteria) -> String {
        let cond = UserRoleQueryBuilder.build(c).unwrap();
        user_role::Entity::find().filter(cond).build(DbBackend::Postgres).to_string()
    }

    #[test]
    fn pagination_and_unknown_keys_add_no_filter() {
        let s = sql(&criteria([("size", "10"), ("page", "1"), ("sortBy", "name"), ("colour", "blue")]));
        assert!(!s.contains("WHERE"), "{s}");
    }

    #[test]
    fn name_and_description_filters() {
        let s = sql(&criteria([("name", "admin"), ("description", "ops")]));
        assert!(s.contains(r#""user_role"."name" = 'admin'"#), "{s}");
        assert!(s.contains(r#""user_role"."description" LIKE '%ops%'"#), "{s}");
    }

    #[test]
    fn deleted_flag_maps_to_null_checks() {
        assert!(sql(&criteria([("deleted", "true")])).contains("IS NOT NULL"));
        assert!(sql(&criteria([("deleted", "false")])).contains(r#""deleted_at" IS NULL"#));
    }

    #[test]
    fn malformed_values_are_invalid_arguments() {
        for c in [criteria([("deleted", "maybe")]), criteria([("id", "not-a-uuid")])] {
            assert!(matches!(UserRoleQueryBuilder.build(&c), Err(ServiceError::InvalidArgument(_))));
        }
    }

    #[test]
    fn empty_values_are_skipped() {
        let s = sql(&criteria([("name", ""), ("deleted", "")]));
        assert!(!s.contains("WHERE"), "{s}");
    }
}
