//! Error types for operation access.

use crate::operation::OperationKind;
use thiserror::Error;

/// Errors raised when an operation is misused.
///
/// Construction and transform never fail; the only failure is asking a
/// `Create` or `Delete` for a field that only updates carry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    #[error("operation is not an update: cannot read {field} of {kind}")]
    InvalidAccess {
        field: &'static str,
        kind: OperationKind,
    },
}

pub type Result<T> = std::result::Result<T, OperationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_access_message() {
        let err = OperationError::InvalidAccess {
            field: "timestamp",
            kind: OperationKind::Delete,
        };
        assert_eq!(
            err.to_string(),
            "operation is not an update: cannot read timestamp of Delete"
        );
    }
}
