//! Unified error system for radgate
//!
//! A single error type shared by every layer. Handlers and the transport
//! build these through the constructor helpers rather than naming variants.

/// Unified error type for all radgate operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    /// Configuration missing, unreadable or invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration problem
        message: String,
    },

    /// Network or transport error
    #[error("Network error: {message}")]
    Network {
        /// Error message describing the network issue
        message: String,
    },

    /// Malformed or unsupported wire data
    #[error("Protocol error: {message}")]
    Protocol {
        /// Error message describing the protocol violation
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message describing the serialization failure
        message: String,
    },

    /// Audit storage operation failed
    #[error("Storage error: {message}")]
    Storage {
        /// Error message describing the storage failure
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal error
        message: String,
    },
}

impl GateError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error must stop the process at startup
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

/// Standard Result type for radgate operations
pub type Result<T> = std::result::Result<T, GateError>;

impl From<serde_json::Error> for GateError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<std::io::Error> for GateError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = GateError::protocol("short packet");
        assert!(matches!(err, GateError::Protocol { .. }));
        assert_eq!(err.to_string(), "Protocol error: short packet");
    }

    #[test]
    fn test_io_error_is_storage() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = GateError::from(io_err);
        assert!(matches!(err, GateError::Storage { .. }));
        assert!(!err.is_config());
    }
}
