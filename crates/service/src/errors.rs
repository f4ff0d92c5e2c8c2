use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("resource creation failed: {0}")]
    ResourceCreationFailed(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::InvalidArgument(_) => 2001,
            ServiceError::NotFound(_) => 2002,
            ServiceError::ResourceCreationFailed(_) => 2003,
            ServiceError::Db(_) => 2100,
            ServiceError::Model(_) => 2101,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn model_errors_convert_and_keep_their_message() {
        let err: ServiceError = ModelError::Validation("name required".into()).into();
        assert_eq!(err.code(), 2101);
        assert_eq!(err.to_string(), "model error: validation error: name required");
    }

    #[test]
    fn not_found_helper_formats_entity() {
        let err = ServiceError::not_found("user_role");
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "user_role not found"));
        assert_eq!(err.code(), 2002);
    }
}
