//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `DashboardError` variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.

use dashlens_core::{DashboardError, StoreError};

/// Structured exit codes for dashlens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - storage fault, bad configuration, or anything unclassified.
    GeneralError = 1,

    /// No dashboard with the given uuid.
    NotFound = 4,

    /// Invalid document or an update rejected by the widget removal policy.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// Dashboard is locked against user edits.
    ///
    /// Unlock it, or act without `--user`.
    Locked = 6,

    /// A dashboard with the same uuid already exists.
    Conflict = 7,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&DashboardError> for ExitCode {
    fn from(err: &DashboardError) -> Self {
        match err {
            DashboardError::NotFound(_) => ExitCode::NotFound,
            DashboardError::InvalidDocument(_) => ExitCode::ValidationError,
            DashboardError::PolicyViolation(_) => ExitCode::ValidationError,
            DashboardError::Locked(_) => ExitCode::Locked,
            DashboardError::Store(StoreError::Conflict(_)) => ExitCode::Conflict,
            DashboardError::Store(StoreError::InvalidKey(_)) => ExitCode::ValidationError,
            DashboardError::Store(_) => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no `DashboardError` is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<DashboardError>())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::NotFound.as_i32(), 4);
        assert_eq!(ExitCode::Locked.as_i32(), 6);
    }

    #[test]
    fn test_from_dashboard_error() {
        let cases = [
            (DashboardError::NotFound("a".into()), ExitCode::NotFound),
            (DashboardError::InvalidDocument("a".into()), ExitCode::ValidationError),
            (DashboardError::PolicyViolation("a".into()), ExitCode::ValidationError),
            (DashboardError::Locked("a".into()), ExitCode::Locked),
            (StoreError::Conflict("a".into()).into(), ExitCode::Conflict),
            (StoreError::InvalidKey("../a".into()).into(), ExitCode::ValidationError),
            (
                StoreError::Corrupt {
                    path: "a.json".into(),
                }
                .into(),
                ExitCode::GeneralError,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ExitCode::from(&err), expected, "{err}");
        }
    }

    #[test]
    fn test_exit_code_found_through_context() {
        let err: anyhow::Error = Err::<(), _>(DashboardError::Locked("d".into()))
            .context("Failed to update dashboard d")
            .unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::Locked);
    }

    #[test]
    fn test_unrelated_error_is_general() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
    }
}
