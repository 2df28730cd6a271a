//! Error types for chunkpool.

use thiserror::Error;

use crate::pool::Handle;

/// Errors reported by pool construction and handle management.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// A construction parameter was out of range.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// A handle was released or adopted when the pool does not allow it.
    #[error("invalid operation on handle {handle}: {message}")]
    InvalidOperation {
        /// The handle the caller passed in.
        handle: Handle,
        /// Why the pool rejected it.
        message: &'static str,
    },
}

impl PoolError {
    /// Returns true for construction/configuration errors.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, PoolError::InvalidArgument { .. })
    }

    /// Returns true for rejected handle operations.
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, PoolError::InvalidOperation { .. })
    }
}
