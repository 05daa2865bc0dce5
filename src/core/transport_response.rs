//! This module contains the `TransportResponse` struct.
//!
//! This struct is used to represent the response from a request.
//! It is used as the response type for the [`Transport`] trait.
//!
//! [`Transport`]: ../transport/trait.Transport.html

use super::ServiceClientError;
use std::collections::HashMap;

/// The only status code treated as success.
pub const HTTP_OK: u16 = 200;

/// This struct is used to represent a successful response.
/// It is used as the response type for the [`Transport`] trait.
///
/// [`Transport`]: ../transport/trait.Transport.html
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct TransportResponse {
    /// status code of the response
    pub status: u16,

    /// headers of the response, values of a repeated header joined with `, `
    pub headers: HashMap<String, String>,

    /// body of the response, decoded to text
    pub body: String,
}

/// Fail with [`ServiceClientError::Status`] for anything but `200`.
///
/// Other `2xx` codes are failures too.
pub fn ensure_ok(status: u16) -> Result<(), ServiceClientError> {
    if status == HTTP_OK {
        Ok(())
    } else {
        Err(ServiceClientError::Status { status })
    }
}
