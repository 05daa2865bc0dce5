//! # Transport Providers Module
//!
//! This module contains the Transport Providers that can be used by
//! [`ServiceClient`].
//!
//! [`ServiceClient`]: crate::ServiceClient

#[cfg(feature = "reqwest")]
pub use self::reqwest::TransportReqwest;
#[cfg(feature = "reqwest")]
pub mod reqwest;
