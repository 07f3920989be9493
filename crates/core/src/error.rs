//! Error types for dashboard storage and inspection.
//!
//! Shape mismatches inside a document are never errors; they resolve to
//! "absent" in [`crate::document`]. The variants here cover the failures that
//! callers must be able to tell apart: bad input data, the update-safety policy,
//! lock state, and opaque storage faults.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Errors that can occur during dashboard operations.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The stored or submitted blob is not a usable dashboard document.
    #[error("Invalid dashboard document: {0}")]
    InvalidDocument(String),

    /// The update would break the update-safety policy.
    #[error("Policy violation: {0}")]
    PolicyViolation(String),

    /// The dashboard is locked against edits by users.
    #[error("Dashboard {0} is locked, please unlock the dashboard to be able to modify it")]
    Locked(String),

    /// No dashboard with the given uuid.
    #[error("No dashboard found with uuid: {0}")]
    NotFound(String),

    /// Failure reported by the persistence layer, passed through unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DashboardError {
    /// Check if this error was caused by the caller's input rather than a system fault.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDocument(_) | Self::PolicyViolation(_) | Self::Locked(_) | Self::NotFound(_)
        )
    }

    /// Check if this error is an update-safety policy rejection.
    pub fn is_policy_violation(&self) -> bool {
        matches!(self, Self::PolicyViolation(_))
    }
}

/// Errors raised by [`crate::store::DashboardStore`] implementations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode dashboard record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Corrupt dashboard record at {path}")]
    Corrupt { path: PathBuf },

    #[error("Dashboard with uuid {0} already exists")]
    Conflict(String),

    #[error("Invalid dashboard uuid for storage: {0:?}")]
    InvalidKey(String),
}
