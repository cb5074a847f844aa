use hydroprint_domain::shared::{DomainError, ErrorSeverity};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{}", .0.format_with_code())]
    Domain(#[from] DomainError),

    #[error("{0:#}")]
    Setup(#[from] anyhow::Error),
}

impl CliError {
    /// 2 for notices the user can act on (duplicate log, bad input,
    /// unknown user), 1 for failures
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Domain(e) if e.severity() == ErrorSeverity::Info => 2,
            _ => 1,
        }
    }
}
