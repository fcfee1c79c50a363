//! Error types and handling for the `MuseTrip` service

use thiserror::Error;

/// Main error type for the `MuseTrip` service
#[derive(Error, Debug)]
pub enum MuseTripError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// An upstream provider was unreachable or answered with a failure status;
    /// the message is shown to the caller verbatim
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// An upstream provider answered 200 but the payload failed schema validation
    #[error("Upstream schema error: {message}")]
    UpstreamSchema { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// No usable data came back for the caller's request
    #[error("No data found: {message}")]
    NoData { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl MuseTripError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new upstream schema error
    pub fn upstream_schema<S: Into<String>>(message: S) -> Self {
        Self::UpstreamSchema {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new no-data error
    pub fn no_data<S: Into<String>>(message: S) -> Self {
        Self::NoData {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            MuseTripError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            MuseTripError::UpstreamSchema { .. } => {
                "Unable to reach external services. Please try again later.".to_string()
            }
            MuseTripError::Upstream { message }
            | MuseTripError::Validation { message }
            | MuseTripError::NoData { message } => message.clone(),
            MuseTripError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
