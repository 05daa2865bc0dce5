//! # Transport module
//!
//! This module contains the [`Transport`] trait.
//!
//! You can implement this trait for your own types, or use the provided
//! [`TransportReqwest`] when the `reqwest` feature is enabled.
//!
//! [`TransportReqwest`]: ../../transport/struct.TransportReqwest.html

use super::{ServiceClientError, TransportRequest, TransportResponse};

/// This trait is used to send prepared requests.
///
/// The call is blocking end to end: connect, write the body, wait for the
/// status line and read the body. Implementations must release the connection
/// on every exit path.
///
/// # Examples
/// ```
/// use serviceclient::core::{Transport, TransportRequest, TransportResponse, ServiceClientError};
///
/// struct MyTransport;
///
/// impl Transport for MyTransport {
///    fn send(&self, req: TransportRequest) -> Result<TransportResponse, ServiceClientError> {
///         // Send your request here
///
///         Ok(TransportResponse {
///             status: 200,
///             ..Default::default()
///         })
///    }
/// }
/// ```
pub trait Transport {
    /// Send a prepared request and collect the whole response body.
    ///
    /// # Errors
    /// Should return [`ServiceClientError::Status`] without reading the body
    /// when the status is not `200`, and [`ServiceClientError::Transport`] if
    /// the request cannot be sent or the response cannot be read.
    fn send(&self, req: TransportRequest) -> Result<TransportResponse, ServiceClientError>;
}

impl<T> Transport for &T
where
    T: Transport + ?Sized,
{
    fn send(&self, req: TransportRequest) -> Result<TransportResponse, ServiceClientError> {
        (**self).send(req)
    }
}
