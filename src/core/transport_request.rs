//! # Transport Request
//!
//! This module contains the `TransportRequest` struct and related types.
//!
//! A [`TransportRequest`] is the immutable descriptor produced by the
//! [`RequestBuilder`] and consumed by a [`Transport`]. Nothing is kept between
//! calls.
//!
//! [`RequestBuilder`]: ../../dx/struct.RequestBuilder.html
//! [`Transport`]: ../transport/trait.Transport.html

use crate::{body::multipart::MultipartBody, core::Header};
use std::fmt::Display;

/// The method to use for a request.
///
/// A request with file attachments is always sent as [`Post`], whatever the
/// caller asked for.
///
/// [`Post`]: TransportMethod::Post
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub enum TransportMethod {
    /// Parameters travel in the query string, no body.
    #[default]
    Get,

    /// Parameters travel in the body.
    Post,
}

impl Display for TransportMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TransportMethod::Get => "GET",
                TransportMethod::Post => "POST",
            }
        )
    }
}

/// Body of the request.
#[derive(Debug, Default)]
pub enum TransportBody {
    /// No body (GET requests).
    #[default]
    Empty,

    /// Fully serialized `application/x-www-form-urlencoded` body.
    Form(Vec<u8>),

    /// Streamed `multipart/form-data` body.
    Multipart(MultipartBody),
}

impl TransportBody {
    /// Number of bytes which will be written on the wire.
    pub fn len(&self) -> u64 {
        match self {
            TransportBody::Empty => 0,
            TransportBody::Form(bytes) => bytes.len() as u64,
            TransportBody::Multipart(body) => body.content_length(),
        }
    }

    /// Whether there is nothing to write.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// This struct represents a request ready to be sent.
///
/// All fields are representing certain parts of the request that can be used
/// to prepare one.
#[derive(Debug, Default)]
pub struct TransportRequest {
    /// full target URL, including the query string for GET requests
    pub url: String,

    /// method to use for the request
    pub method: TransportMethod,

    /// headers to be sent with the request, duplicates included
    pub headers: Vec<Header>,

    /// body to be sent with the request
    pub body: TransportBody,

    /// charset used to decode a response which doesn't declare one
    pub charset: String,
}

impl TransportRequest {
    /// Values of all headers called `name` (case-insensitive), in order.
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |header| header.is(name))
            .map(|header| header.value.as_str())
    }
}

#[cfg(test)]
mod should {
    use super::*;
    use crate::body::multipart::Boundary;
    use encoding_rs::UTF_8;

    #[test]
    fn report_body_length() {
        let boundary = Boundary::new("b");
        let multipart = MultipartBody::encoder(&boundary, UTF_8, "UTF-8")
            .finish()
            .unwrap();

        assert!(TransportBody::Empty.is_empty());
        assert_eq!(TransportBody::Form(b"a=1".to_vec()).len(), 3);
        assert_eq!(TransportBody::Multipart(multipart).len(), b"--b--\r\n".len() as u64);
    }
}
