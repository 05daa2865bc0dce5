//! Deserialization module
//!
//! This module contains the [`Deserializer`] trait which is used to turn a
//! response body into a typed value.

use super::ServiceClientError;

/// This trait is used to deserialize a response body.
///
/// It's used by [`ServiceClient::request_with`] and, through the serde
/// provider, by [`ServiceClient::request_json`].
///
/// # Examples
/// ```
/// use serviceclient::core::{Deserializer, ServiceClientError};
///
/// struct Lines;
///
/// impl Deserializer<Vec<String>> for Lines {
///    fn deserialize(&self, bytes: &[u8]) -> Result<Vec<String>, ServiceClientError> {
///        Ok(String::from_utf8_lossy(bytes).lines().map(String::from).collect())
///    }
/// }
/// ```
///
/// [`ServiceClient::request_with`]: crate::ServiceClient::request_with
/// [`ServiceClient::request_json`]: crate::ServiceClient::request_json
pub trait Deserializer<T> {
    /// Deserialize `bytes` into `T`.
    ///
    /// # Errors
    /// Should return [`ServiceClientError::ResponseParse`] when the body
    /// doesn't describe a `T`.
    fn deserialize(&self, bytes: &[u8]) -> Result<T, ServiceClientError>;
}
