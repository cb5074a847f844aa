use hydroprint_domain::shared::DomainError;

/// Extension trait for Result types to simplify error handling
pub trait ResultExt<T, E> {
    /// Convert error to DomainError::Serialization
    /// Usage: `serde_json::to_string_pretty(&dto).to_serialization_err()?`
    fn to_serialization_err(self) -> Result<T, DomainError>;
}

impl<T, E: std::fmt::Display> ResultExt<T, E> for Result<T, E> {
    fn to_serialization_err(self) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Serialization(e.to_string()))
    }
}
