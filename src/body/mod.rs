//! # Body encoding
//!
//! This module decides the shape of a request body and serializes it.
//!
//! * files attached: `multipart/form-data`, always sent with `POST`
//! * `POST` without files: `application/x-www-form-urlencoded`
//! * `GET` without files: no body, parameters go to the query string

use crate::core::{
    utils::{encoding::form_encode, headers::APPLICATION_FORM_URLENCODED},
    Parameter, ServiceClientError, TransportMethod,
};
use encoding_rs::Encoding;
use multipart::Boundary;

pub mod multipart;

/// Shape of the request body.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum BodyShape {
    /// No body, parameters are part of the URL.
    Query,

    /// `application/x-www-form-urlencoded` body.
    UrlEncoded,

    /// `multipart/form-data` body.
    Multipart,
}

impl BodyShape {
    /// Pick the body shape and the method which will actually be used.
    ///
    /// Attached files upgrade `GET` to `POST`.
    pub fn decide(method: TransportMethod, has_files: bool) -> (TransportMethod, BodyShape) {
        match (method, has_files) {
            (_, true) => (TransportMethod::Post, BodyShape::Multipart),
            (TransportMethod::Post, false) => (TransportMethod::Post, BodyShape::UrlEncoded),
            (TransportMethod::Get, false) => (TransportMethod::Get, BodyShape::Query),
        }
    }

    /// `Content-Type` header value for this shape, if a body is sent.
    pub fn content_type(&self, boundary: &Boundary) -> Option<String> {
        match self {
            BodyShape::Query => None,
            BodyShape::UrlEncoded => Some(APPLICATION_FORM_URLENCODED.into()),
            BodyShape::Multipart => Some(boundary.content_type()),
        }
    }
}

/// Serialize `params` as `application/x-www-form-urlencoded` body.
pub fn encode_form_body(
    params: &[Parameter],
    charset: &'static Encoding,
) -> Result<Vec<u8>, ServiceClientError> {
    form_encode(params, charset).map(String::into_bytes)
}

#[cfg(test)]
mod should {
    use super::*;
    use encoding_rs::UTF_8;
    use test_case::test_case;

    #[test_case(TransportMethod::Get, false, TransportMethod::Get, BodyShape::Query ; "plain get")]
    #[test_case(TransportMethod::Post, false, TransportMethod::Post, BodyShape::UrlEncoded ; "plain post")]
    #[test_case(TransportMethod::Get, true, TransportMethod::Post, BodyShape::Multipart ; "get with files")]
    #[test_case(TransportMethod::Post, true, TransportMethod::Post, BodyShape::Multipart ; "post with files")]
    fn decide_shape(
        requested: TransportMethod,
        has_files: bool,
        method: TransportMethod,
        shape: BodyShape,
    ) {
        assert_eq!(BodyShape::decide(requested, has_files), (method, shape));
    }

    #[test]
    fn announce_boundary_in_content_type() {
        let boundary = Boundary::new("===42===");

        assert_eq!(
            BodyShape::Multipart.content_type(&boundary).unwrap(),
            "multipart/form-data; boundary====42==="
        );
        assert_eq!(
            BodyShape::UrlEncoded.content_type(&boundary).unwrap(),
            "application/x-www-form-urlencoded"
        );
        assert!(BodyShape::Query.content_type(&boundary).is_none());
    }

    #[test]
    fn encode_urlencoded_body() {
        let params = vec![
            Parameter {
                name: "user".into(),
                value: "jane doe".into(),
            },
            Parameter {
                name: "lang".into(),
                value: "de".into(),
            },
        ];

        assert_eq!(
            encode_form_body(&params, UTF_8).unwrap(),
            b"user=jane+doe&lang=de".to_vec()
        );
    }
}
