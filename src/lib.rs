//! # Service Client
//!
//! Blocking HTTP client for service calls. It collects form parameters, file
//! attachments and headers, sends them as a `GET` query, an urlencoded `POST`
//! or a streamed `multipart/form-data` `POST`, and returns the response body
//! when the server answers with `200 OK`.
//!
//! ## Usage
//!
//! ```no_run
//! use serviceclient::{RequestMethod, ServiceClient};
//!
//! # fn main() -> Result<(), serviceclient::core::ServiceClientError> {
//! let mut client = ServiceClient::new("https://example.com/search", RequestMethod::Get);
//! client.add_param("q", "hi there");
//!
//! // GET https://example.com/search?q=hi+there
//! let body = client.request()?;
//! println!("{body}");
//! # Ok(())
//! # }
//! ```
//!
//! Adding a file switches the request to a multipart `POST`. Files are
//! streamed from disk in chunks and never loaded into memory as a whole.
//!
//! ```no_run
//! use serviceclient::{RequestMethod, ServiceClient, ServiceClientConfigBuilder};
//!
//! # fn main() -> Result<(), serviceclient::core::ServiceClientError> {
//! let config = ServiceClientConfigBuilder::default()
//!     .with_user_agent("uploader/1.0")
//!     .build()?;
//!
//! let mut client = ServiceClient::new("https://example.com/upload", RequestMethod::Get)
//!     .with_config(config);
//! client
//!     .add_param("album", "Holiday")
//!     .add_file("photo", "/tmp/beach.jpg");
//!
//! let body = client.request()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! * `reqwest` (default) - [`TransportReqwest`] built on the blocking
//!   [`reqwest`] client, used by [`ServiceClient::new`]
//! * `serde` (default) - [`DeserializerSerde`] and
//!   [`ServiceClient::request_json`]
//!
//! Without `reqwest` you provide your own [`Transport`] via
//! [`ServiceClient::with_transport`].
//!
//! [`reqwest`]: https://docs.rs/reqwest
//! [`TransportReqwest`]: crate::transport::TransportReqwest
//! [`DeserializerSerde`]: crate::providers::deserialization_serde::DeserializerSerde
//! [`Transport`]: crate::core::Transport

pub use dx::{
    RequestBuilder, RequestMethod, ServiceClient, ServiceClientConfig, ServiceClientConfigBuilder,
};

pub mod body;
pub mod core;
pub mod dx;
pub mod providers;
pub mod transport;
