//! Service client module
//!
//! This module contains the [`ServiceClient`] struct.
//! It's used to configure a single request, send it and hand back the raw
//! response body.

use crate::{
    body::multipart::Boundary,
    core::{
        transport_response::ensure_ok, Deserializer, ParameterSet, ServiceClientError,
        Transport, TransportMethod, TransportRequest,
    },
    dx::{config::ServiceClientConfig, request_builder::RequestBuilder},
};
use log::debug;
use std::path::Path;

#[cfg(feature = "serde")]
use crate::providers::deserialization_serde::DeserializerSerde;
#[cfg(feature = "reqwest")]
use crate::transport::TransportReqwest;

/// Method requested by the caller.
///
/// Attached files upgrade [`RequestMethod::Get`] to [`RequestMethod::Post`].
pub type RequestMethod = TransportMethod;

/// Service client
///
/// Collects parameters, files and headers for one request and sends it with
/// the configured [`Transport`]. Sending consumes the client, create a new
/// one for the next call.
///
/// # Examples
/// ```no_run
/// use serviceclient::{RequestMethod, ServiceClient};
///
/// # fn main() -> Result<(), serviceclient::core::ServiceClientError> {
/// let mut client = ServiceClient::new("https://example.com/upload", RequestMethod::Post);
/// client
///     .add_param("title", "Holiday")
///     .add_file("photo", "/tmp/beach.jpg")
///     .add_header("Authorization", "Bearer 123");
///
/// let body = client.request()?;
/// # Ok(())
/// # }
/// ```
///
/// Using your own [`Transport`] implementation:
///
/// ```
/// use serviceclient::{RequestMethod, ServiceClient};
/// # use serviceclient::core::{Transport, TransportRequest, TransportResponse, ServiceClientError};
/// # struct MyTransport;
/// # impl Transport for MyTransport {
/// #     fn send(&self, _request: TransportRequest) -> Result<TransportResponse, ServiceClientError> {
/// #         Ok(TransportResponse { status: 200, body: "pong".into(), ..Default::default() })
/// #     }
/// # }
///
/// # fn main() -> Result<(), ServiceClientError> {
/// let client = ServiceClient::with_transport("https://example.com/ping", RequestMethod::Get, MyTransport);
///
/// assert_eq!(client.request()?, "pong");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ServiceClient<T> {
    url: String,
    method: RequestMethod,
    parameters: ParameterSet,
    charset: Option<String>,
    boundary: Boundary,
    config: ServiceClientConfig,
    transport: T,
}

#[cfg(feature = "reqwest")]
impl ServiceClient<TransportReqwest> {
    /// Create client which sends with the default [`TransportReqwest`].
    pub fn new<S>(request_url: S, method: RequestMethod) -> Self
    where
        S: Into<String>,
    {
        Self::with_transport(request_url, method, TransportReqwest::new())
    }
}

impl<T> ServiceClient<T> {
    /// Create client which sends with `transport`.
    ///
    /// The multipart boundary is generated here, once per client.
    pub fn with_transport<S>(request_url: S, method: RequestMethod, transport: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            url: request_url.into(),
            method,
            parameters: ParameterSet::default(),
            charset: None,
            boundary: Boundary::generate(),
            config: ServiceClientConfig::default(),
            transport,
        }
    }

    /// Use `config` instead of the default configuration.
    pub fn with_config(mut self, config: ServiceClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Add simple parameter to the request.
    pub fn add_param<N, V>(&mut self, name: N, value: V) -> &mut Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.parameters.add_param(name, value);
        self
    }

    /// Add file to the request. Switches the request to a multipart `POST`.
    ///
    /// `field_name` is the form field, not the file name. The file is only
    /// opened when the request is sent.
    pub fn add_file<N, P>(&mut self, field_name: N, path: P) -> &mut Self
    where
        N: Into<String>,
        P: AsRef<Path>,
    {
        self.parameters.add_file(field_name, path);
        self
    }

    /// Add HTTP header to the request.
    pub fn add_header<N, V>(&mut self, name: N, value: V) -> &mut Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.parameters.add_header(name, value);
        self
    }

    /// Set charset used for parameter encoding. Default is `UTF-8`.
    pub fn set_charset<S>(&mut self, charset: S) -> &mut Self
    where
        S: Into<String>,
    {
        self.charset = Some(charset.into());
        self
    }

    /// Request URL as given by the caller.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Method requested by the caller.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// Boundary used if the request is sent as multipart.
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// Charset the request will be encoded with.
    pub fn charset(&self) -> &str {
        self.charset.as_deref().unwrap_or(&self.config.charset)
    }

    /// Collected parameters, files and headers.
    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    /// Build the request descriptor without sending it.
    ///
    /// Attached files are opened, so a missing file is reported here.
    pub fn prepare(&self) -> Result<TransportRequest, ServiceClientError> {
        RequestBuilder {
            url: &self.url,
            method: self.method,
            parameters: &self.parameters,
            boundary: &self.boundary,
            charset: self.charset(),
            config: &self.config,
        }
        .build()
    }
}

impl<T> ServiceClient<T>
where
    T: Transport,
{
    /// Send request and return the response body.
    ///
    /// # Errors
    /// * [`ServiceClientError::Status`] for any status other than `200`
    /// * [`ServiceClientError::Transport`] for connection and I/O failures
    /// * [`ServiceClientError::FileAccess`] when an attachment can't be opened
    /// * [`ServiceClientError::Encoding`] when a value doesn't fit the charset
    pub fn request(self) -> Result<String, ServiceClientError> {
        let request = self.prepare()?;
        let response = self.transport.send(request)?;
        ensure_ok(response.status)?;

        debug!("{} responded with {} bytes", self.url, response.body.len());
        Ok(response.body)
    }

    /// Send request and deserialize the response body with `deserializer`.
    pub fn request_with<R, D>(self, deserializer: &D) -> Result<R, ServiceClientError>
    where
        D: Deserializer<R>,
    {
        let body = self.request()?;
        deserializer.deserialize(body.as_bytes())
    }

    /// Send request and parse the response body as JSON.
    ///
    /// # Errors
    /// Everything [`request`] fails with, and
    /// [`ServiceClientError::ResponseParse`] when the body is not valid JSON
    /// for `R`.
    ///
    /// [`request`]: ServiceClient::request
    #[cfg(feature = "serde")]
    pub fn request_json<R>(self) -> Result<R, ServiceClientError>
    where
        R: for<'de> serde::Deserialize<'de>,
    {
        self.request_with(&DeserializerSerde)
    }
}
