//! Error types for drag-reorder operations.

use thiserror::Error;

/// Result type for reorder operations.
pub type Result<T> = std::result::Result<T, ReorderError>;

/// Why an open drag session no longer matches the list it was begun on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StaleReason {
    /// The list length changed while the session was open.
    #[error("list length changed from {expected} to {actual}")]
    LengthChanged {
        /// Length captured when the drag began.
        expected: usize,
        /// Length observed at commit time.
        actual: usize,
    },

    /// The item at the captured source index is no longer the dragged item.
    #[error("item at index {index} is not the item the drag started on")]
    IdentityMismatch {
        /// The source index captured when the drag began.
        index: usize,
    },
}

/// Errors produced while driving a reorder gesture.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    /// An index does not address a valid position in the list.
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange {
        /// The offending index as supplied by the caller.
        index: isize,
        /// The list length the index was checked against.
        len: usize,
    },

    /// The list was mutated between `begin_drag` and `commit`.
    #[error("drag session is stale: {reason}")]
    StaleSession {
        /// What changed under the session.
        reason: StaleReason,
    },

    /// `begin_drag` was called while another session was still open.
    #[error("a drag session is already active")]
    SessionAlreadyActive,

    /// The operation requires an open drag session and none exists.
    #[error("no drag session is active")]
    NoActiveSession,
}

impl ReorderError {
    /// Creates a stale-session error for a list whose length changed.
    pub fn stale_length(expected: usize, actual: usize) -> Self {
        Self::StaleSession {
            reason: StaleReason::LengthChanged { expected, actual },
        }
    }

    /// Creates a stale-session error for a source item that was replaced.
    pub fn stale_identity(index: usize) -> Self {
        Self::StaleSession {
            reason: StaleReason::IdentityMismatch { index },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReorderError::IndexOutOfRange { index: -3, len: 4 };
        assert_eq!(err.to_string(), "index -3 out of range for list of length 4");

        let err = ReorderError::stale_length(4, 5);
        assert_eq!(
            err.to_string(),
            "drag session is stale: list length changed from 4 to 5"
        );

        let err = ReorderError::SessionAlreadyActive;
        assert_eq!(err.to_string(), "a drag session is already active");
    }

    #[test]
    fn test_stale_constructors() {
        assert_eq!(
            ReorderError::stale_identity(2),
            ReorderError::StaleSession {
                reason: StaleReason::IdentityMismatch { index: 2 },
            }
        );
    }
}
