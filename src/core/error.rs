//! # Error types
//!
//! This module contains the error types for the [`serviceclient`] crate.
//!
//! [`serviceclient`]: ../index.html

use std::path::PathBuf;

/// Service client error type
///
/// This type is used to represent errors that can occur while a request is
/// prepared, sent or its response interpreted. Every failure surfaces directly
/// to the caller: there is no retry and no partial success.
///
/// # Examples
/// ```
/// use serviceclient::core::ServiceClientError;
///
/// fn foo() -> Result<(), ServiceClientError> {
///   Err(ServiceClientError::Status { status: 404 })
/// }
///
/// foo().map_err(|e| match e {
///   ServiceClientError::Status { status } => println!("Server said {status}"),
///   ServiceClientError::FileAccess { path, .. } => println!("Can't read {}", path.display()),
///   _ => println!("Other error"),
/// });
/// ```
#[derive(thiserror::Error, Debug)]
pub enum ServiceClientError {
    /// this error is returned when the transport layer fails
    #[error("Transport error: {details}")]
    Transport {
        /// Failure reason.
        details: String,
    },

    /// this error is returned when the server responds with anything but
    /// `200 OK`
    #[error("Transport error: Server returned non-OK status: {status}")]
    Status {
        /// HTTP status code received from the server.
        status: u16,
    },

    /// this error is returned when an attached file can't be opened for
    /// streaming
    #[error("File access error: {}: {details}", path.display())]
    FileAccess {
        /// Path of the attachment which failed.
        path: PathBuf,

        /// Failure reason.
        details: String,
    },

    /// this error is returned when a value can't be represented in the
    /// configured charset
    #[error("Encoding error: {details}")]
    Encoding {
        /// Failure reason.
        details: String,
    },

    /// this error is returned when the response body is not valid JSON
    #[error("Response parse error: {details}")]
    ResponseParse {
        /// Failure reason.
        details: String,
    },

    /// this error is returned when the client configuration is invalid
    #[error("Configuration error: {details}")]
    Configuration {
        /// Failure reason.
        details: String,
    },
}

impl ServiceClientError {
    /// Whether the failure happened at or below the HTTP status / connection
    /// layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Status { .. })
    }

    /// HTTP status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn classify_status_as_transport_failure() {
        let error = ServiceClientError::Status { status: 404 };

        assert!(error.is_transport());
        assert_eq!(error.status(), Some(404));
        assert!(error.to_string().contains("404"));
    }

    #[test]
    fn not_classify_file_access_as_transport_failure() {
        let error = ServiceClientError::FileAccess {
            path: "/tmp/missing.bin".into(),
            details: "No such file or directory".into(),
        };

        assert!(!error.is_transport());
        assert_eq!(error.status(), None);
        assert!(error.to_string().contains("/tmp/missing.bin"));
    }
}
