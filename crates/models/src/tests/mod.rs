
/// Audited-entity contract and row conversions for user roles
pub mod user_role_tests;
