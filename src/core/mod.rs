//! # Service Client Core
//!
//! Core functionality of the service client.
//!
//! The `core` module contains the data model and the seams of the client:
//! request parameters, the request lifecycle, errors and the [`Transport`]
//! trait together with the request / response types it works with.

pub use deserializer::Deserializer;
pub mod deserializer;

pub use error::ServiceClientError;
pub mod error;

pub use parameters::{FileAttachment, Header, Parameter, ParameterSet};
pub mod parameters;

pub use state::{Lifecycle, RequestState};
pub mod state;

pub use transport::Transport;
pub mod transport;

pub use transport_request::{TransportBody, TransportMethod, TransportRequest};
pub mod transport_request;

pub use transport_response::TransportResponse;
pub mod transport_response;

pub mod utils;
