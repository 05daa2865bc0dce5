//! # Service Client Developer Experience
//!
//! This module provides the structures and methods callers use to configure
//! and send a request.

pub use config::{ServiceClientConfig, ServiceClientConfigBuilder};
pub mod config;

pub use request_builder::RequestBuilder;
pub mod request_builder;

pub use service_client::{RequestMethod, ServiceClient};
pub mod service_client;
