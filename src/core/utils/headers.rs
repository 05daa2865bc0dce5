//! Headers module
//!
//! This module provides a constants for HTTP headers.
//!

pub(crate) const CONTENT_TYPE: &str = "Content-Type";
pub(crate) const USER_AGENT: &str = "User-Agent";
pub(crate) const APPLICATION_FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
pub(crate) const MULTIPART_FORM_DATA: &str = "multipart/form-data";
pub(crate) const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// `User-Agent` sent when neither the caller nor the configuration set one.
pub const DEFAULT_USER_AGENT: &str =
    concat!("serviceclient/", env!("CARGO_PKG_VERSION"), " Rust Client");
