//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the KVC cache layer
#[derive(Error, Debug)]
pub enum Error {
    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Backing store operation failed (store unavailable, protocol error)
    #[error("Store error: {message}")]
    Store {
        /// Description of the store error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Database fallback (loader) failed
    #[error("Loader error: {message}")]
    Loader {
        /// Description of the loader error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A value could not be encoded or decoded by the codec
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the serialization error
        message: String,
    },

    /// Mutex-guarded load gave up waiting for a lock
    #[error("Timed out waiting for lock {key} after {attempts} attempts")]
    LockTimeout {
        /// The lock key that stayed held
        key: String,
        /// Number of acquisition attempts made
        attempts: u32,
    },

    /// Background executor rejected a job
    #[error("Executor error: {message}")]
    Executor {
        /// Description of the executor error
        message: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration could not be loaded, parsed or validated
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Infrastructure failure wrapped with context
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Basic error creation methods
impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a lock timeout error
    pub fn lock_timeout<S: Into<String>>(key: S, attempts: u32) -> Self {
        Self::LockTimeout {
            key: key.into(),
            attempts,
        }
    }

    /// Create an executor error
    pub fn executor<S: Into<String>>(message: S) -> Self {
        Self::Executor {
            message: message.into(),
        }
    }
}

// Store error creation methods
impl Error {
    /// Create a store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Create a store error with source
    pub fn store_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this error means the backing store could not serve the request
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::Store { .. })
    }
}

// Loader error creation methods
impl Error {
    /// Create a loader error
    pub fn loader<S: Into<String>>(message: S) -> Self {
        Self::Loader {
            message: message.into(),
            source: None,
        }
    }

    /// Create a loader error with source
    pub fn loader_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Loader {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
