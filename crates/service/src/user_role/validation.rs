use models::user_role::{self, UserRole};

use crate::crud::Validator;

pub const DESCRIPTION_MAX_LEN: usize = 1024;

#[derive(Clone, Copy, Debug, Default)]
pub struct UserRoleValidator;

impl Validator<UserRole> for UserRoleValidator {
    fn validate(&self, entity: &UserRole) -> Vec<String> {
        let mut violations = Vec::new();
        match entity.name.as_deref() {
            None => violations.push("name: required".to_string()),
            Some(name) => {
                if let Err(e) = user_role::validate_name(name) {
                    violations.push(format!("name: {e}"));
                }
            }
        }
        if let Some(description) = entity.description.as_deref() {
            if description.chars().count() > DESCRIPTION_MAX_LEN {
                violations.push(format!("description: longer than {DESCRIPTION_MAX_LEN} characters"));
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_role_has_no_violations() {
        let role = UserRole { name: Some("admin".into()), description: Some("all".into()), ..Default::default() };
        assert!(UserRoleValidator.validate(&role).is_empty());
    }

    #[test]
    fn collects_every_violation() {
        let role = UserRole { description: Some("x".repeat(DESCRIPTION_MAX_LEN + 1)), ..Default::default() };
        let violations = UserRoleValidator.validate(&role);
        assert_eq!(violations.len(), 2);
        assert!(violations[0].starts_with("name"));
        assert!(violations[1].starts_with("description"));
    }

    #[test]
    fn blank_name_is_rejected() {
        let role = UserRole { name: Some("  ".into()), ..Default::default() };
        assert_eq!(UserRoleValidator.validate(&role), vec!["name: validation error: name required".to_string()]);
    }
}
