/// Rejection raised before any month is simulated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProjectionError {
    #[error("Invalid {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },
}

impl ProjectionError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ProjectionError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            ProjectionError::InvalidInput { field, .. } => field,
        }
    }
}
