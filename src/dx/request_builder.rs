//! Request builder module
//!
//! This module contains the [`RequestBuilder`] which turns the collected
//! configuration of a [`ServiceClient`] into an immutable
//! [`TransportRequest`].
//!
//! [`ServiceClient`]: crate::ServiceClient

use crate::{
    body::{
        encode_form_body,
        multipart::{Boundary, MultipartBody},
        BodyShape,
    },
    core::{
        utils::{
            encoding::{form_encode, resolve_charset},
            headers::{CONTENT_TYPE, USER_AGENT},
        },
        Header, ParameterSet, ServiceClientError, TransportBody, TransportMethod,
        TransportRequest,
    },
    dx::config::ServiceClientConfig,
};
use encoding_rs::Encoding;
use log::debug;

/// Computes the target URL, the header set and the body of a request.
///
/// Headers supplied by the caller win: a caller `Content-Type` or
/// `User-Agent` (case-insensitive) replaces the generated one.
#[derive(Debug)]
pub struct RequestBuilder<'a> {
    pub(crate) url: &'a str,
    pub(crate) method: TransportMethod,
    pub(crate) parameters: &'a ParameterSet,
    pub(crate) boundary: &'a Boundary,
    pub(crate) charset: &'a str,
    pub(crate) config: &'a ServiceClientConfig,
}

impl RequestBuilder<'_> {
    /// Produce the request descriptor.
    ///
    /// Attached files are opened here, so a missing file fails before any
    /// connection is made.
    ///
    /// # Errors
    /// [`ServiceClientError::Encoding`] for an unusable charset or value, and
    /// [`ServiceClientError::FileAccess`] for an attachment which can't be
    /// opened.
    pub fn build(&self) -> Result<TransportRequest, ServiceClientError> {
        let charset = resolve_charset(self.charset)?;
        let (method, shape) = BodyShape::decide(self.method, self.parameters.has_files());
        if method != self.method {
            debug!("files attached, sending {} as {}", self.method, method);
        }

        let (url, body) = match shape {
            BodyShape::Query => (
                self.target_url(&form_encode(self.parameters.params(), charset)?),
                TransportBody::Empty,
            ),
            BodyShape::UrlEncoded => (
                self.url.to_string(),
                TransportBody::Form(encode_form_body(self.parameters.params(), charset)?),
            ),
            BodyShape::Multipart => (
                self.url.to_string(),
                TransportBody::Multipart(self.multipart_body(charset)?),
            ),
        };

        Ok(TransportRequest {
            url,
            method,
            headers: self.headers(shape),
            body,
            charset: self.charset.trim().to_string(),
        })
    }

    fn target_url(&self, query: &str) -> String {
        if query.is_empty() {
            return self.url.to_string();
        }

        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.url, separator, query)
    }

    fn headers(&self, shape: BodyShape) -> Vec<Header> {
        let mut headers = self.parameters.headers().to_vec();

        if !self.parameters.has_header(USER_AGENT) {
            headers.push(Header {
                name: USER_AGENT.into(),
                value: self.config.user_agent.clone(),
            });
        }

        if let Some(content_type) = shape.content_type(self.boundary) {
            if self.parameters.has_header(CONTENT_TYPE) {
                debug!("keeping caller Content-Type instead of {}", content_type);
            } else {
                headers.push(Header {
                    name: CONTENT_TYPE.into(),
                    value: content_type,
                });
            }
        }

        headers
    }

    fn multipart_body(
        &self,
        charset: &'static Encoding,
    ) -> Result<MultipartBody, ServiceClientError> {
        let encoder = MultipartBody::encoder(self.boundary, charset, self.charset.trim())
            .chunk_size(self.config.chunk_size);

        let encoder = self
            .parameters
            .params()
            .iter()
            .try_fold(encoder, |encoder, param| encoder.text(param))?;

        self.parameters
            .files()
            .iter()
            .try_fold(encoder, |encoder, file| encoder.file(file))?
            .finish()
    }
}
