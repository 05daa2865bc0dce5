//! # Providers module
//!
//! This module contains the Providers that can be used by [`ServiceClient`].
//!
//! [`ServiceClient`]: crate::ServiceClient

#[cfg(feature = "serde")]
pub mod deserialization_serde;
