//! # Reqwest Transport Implementation
//!
//! This module contains the [`TransportReqwest`] struct.
//! It is used to send requests using the blocking client of the [`reqwest`]
//! crate.
//!
//! It requires the [`reqwest` feature] to be enabled.
//!
//! [`TransportReqwest`]: ./struct.TransportReqwest.html
//! [`reqwest`]: https://docs.rs/reqwest
//! [`reqwest` feature]: ../index.html#features

use crate::core::{
    transport_response::ensure_ok, Header, Lifecycle, RequestState, ServiceClientError,
    Transport, TransportBody, TransportMethod, TransportRequest, TransportResponse,
};
use log::{debug, info, warn};
use reqwest::{
    blocking::Body,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use std::{collections::HashMap, time::Duration};

/// This struct is used to send requests using the [`reqwest`] crate.
/// It is the default transport of the [`ServiceClient`].
///
/// Every call is blocking. Connection pooling, timeouts, TLS and proxies are
/// whatever the wrapped [`reqwest::blocking::Client`] is configured with. The
/// default client has no total timeout, so long uploads are not cut off.
///
/// # Examples
/// ```
/// use serviceclient::transport::TransportReqwest;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = reqwest::blocking::Client::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// let transport = TransportReqwest::with_client(client);
/// # Ok(())
/// # }
/// ```
///
/// [`reqwest`]: https://docs.rs/reqwest
/// [`ServiceClient`]: crate::ServiceClient
#[derive(Clone, Debug)]
pub struct TransportReqwest {
    reqwest_client: reqwest::blocking::Client,
}

impl Default for TransportReqwest {
    fn default() -> Self {
        let reqwest_client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .unwrap_or_else(|err| {
                warn!("can't disable request timeout, using reqwest defaults: {err}");
                reqwest::blocking::Client::default()
            });

        Self { reqwest_client }
    }
}

impl Transport for TransportReqwest {
    fn send(&self, request: TransportRequest) -> Result<TransportResponse, ServiceClientError> {
        let mut lifecycle = Lifecycle::default();
        let TransportRequest {
            url,
            method,
            headers,
            body,
            charset,
        } = request;

        info!("{} Request: {} ({} body bytes)", method, url, body.len());
        let headers = prepare_headers(&headers).map_err(|err| lifecycle.fail(err))?;

        lifecycle.advance(RequestState::Sending);
        let builder = match method {
            TransportMethod::Get => {
                if !body.is_empty() {
                    warn!("{} bytes of body are not sent with GET {}", body.len(), url);
                }
                self.prepare_get_method(&url)
            }
            TransportMethod::Post => self.prepare_post_method(&url, body),
        };

        let response = builder
            .headers(headers)
            .send()
            .map_err(|e| {
                lifecycle.fail(ServiceClientError::Transport {
                    details: e.to_string(),
                })
            })?;

        lifecycle.advance(RequestState::AwaitingResponse);
        let status = response.status().as_u16();
        if let Err(err) = ensure_ok(status) {
            warn!("{} {} failed with status {}", method, url, status);
            // body is never read for a failed status
            drop(response);
            return Err(lifecycle.fail(err));
        }

        let response_headers = collect_headers(response.headers());
        let body = response.text_with_charset(&charset).map_err(|e| {
            lifecycle.fail(ServiceClientError::Transport {
                details: e.to_string(),
            })
        })?;

        lifecycle.advance(RequestState::Completed);
        debug!("{} {} received {} bytes", method, url, body.len());

        Ok(TransportResponse {
            status,
            headers: response_headers,
            body,
        })
    }
}

impl TransportReqwest {
    /// Create a new [`TransportReqwest`] instance.
    ///
    /// It provides a [`reqwest`] client with the default settings except the
    /// total request timeout, which is disabled. Use [`with_client`] to set
    /// one.
    ///
    /// [`with_client`]: TransportReqwest::with_client
    ///
    /// # Example
    /// ```
    /// use serviceclient::transport::TransportReqwest;
    ///
    /// let transport = TransportReqwest::new();
    /// ```
    ///
    /// [`TransportReqwest`]: ./struct.TransportReqwest.html
    /// [`reqwest`]: https://docs.rs/reqwest
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`TransportReqwest`] around a preconfigured client.
    pub fn with_client(reqwest_client: reqwest::blocking::Client) -> Self {
        Self { reqwest_client }
    }

    fn prepare_get_method(&self, url: &str) -> reqwest::blocking::RequestBuilder {
        self.reqwest_client.get(url)
    }

    fn prepare_post_method(
        &self,
        url: &str,
        body: TransportBody,
    ) -> reqwest::blocking::RequestBuilder {
        let body = match body {
            TransportBody::Empty => Body::from(Vec::new()),
            TransportBody::Form(bytes) => Body::from(bytes),
            TransportBody::Multipart(multipart) => {
                let length = multipart.content_length();
                Body::sized(multipart, length)
            }
        };

        self.reqwest_client.post(url).body(body)
    }
}

/// Duplicated names are all kept.
fn prepare_headers(request_headers: &[Header]) -> Result<HeaderMap, ServiceClientError> {
    request_headers
        .iter()
        .try_fold(HeaderMap::new(), |mut headers, header| {
            let name = HeaderName::from_bytes(header.name.as_bytes()).map_err(|err| {
                ServiceClientError::Transport {
                    details: format!("invalid header name {:?}: {err}", header.name),
                }
            })?;
            let value = HeaderValue::from_str(&header.value).map_err(|err| {
                ServiceClientError::Transport {
                    details: format!("invalid value of header {}: {err}", header.name),
                }
            })?;

            headers.append(name, value);
            Ok(headers)
        })
}

/// Repeated headers are joined with `, `.
fn collect_headers(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .keys()
        .map(|name| {
            let values: Vec<&str> = headers
                .get_all(name)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .collect();

            (name.to_string(), values.join(", "))
        })
        .collect()
}

#[cfg(test)]
mod should {
    use super::*;
    use crate::body::multipart::{Boundary, MultipartBody};
    use encoding_rs::UTF_8;
    use test_case::test_case;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn header_pair(name: &str, value: &str) -> Header {
        Header {
            name: name.into(),
            value: value.into(),
        }
    }

    #[tokio::test]
    async fn send_via_get_method() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api"))
            .and(query_param("q", "hi there"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
            .mount(&server)
            .await;

        let url = format!("{}/api?q=hi+there", server.uri());
        let response = tokio::task::spawn_blocking(move || {
            TransportReqwest::new().send(TransportRequest {
                url,
                method: TransportMethod::Get,
                charset: "UTF-8".into(),
                ..Default::default()
            })
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "{\"ok\":true}");
    }

    #[tokio::test]
    async fn send_via_post_method() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/form"))
            .and(header("Content-Type", "application/x-www-form-urlencoded"))
            .and(body_string("user=jane+doe&lang=de"))
            .respond_with(ResponseTemplate::new(200).set_body_string("stored"))
            .mount(&server)
            .await;

        let url = format!("{}/form", server.uri());
        let response = tokio::task::spawn_blocking(move || {
            TransportReqwest::new().send(TransportRequest {
                url,
                method: TransportMethod::Post,
                headers: vec![header_pair(
                    "Content-Type",
                    "application/x-www-form-urlencoded",
                )],
                body: TransportBody::Form(b"user=jane+doe&lang=de".to_vec()),
                charset: "UTF-8".into(),
            })
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(response.body, "stored");
    }

    #[tokio::test]
    async fn stream_multipart_body() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("x.bin");
        std::fs::write(&file_path, [0xDE, 0xAD]).unwrap();

        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let url = format!("{}/upload", server.uri());
        let expected_length = tokio::task::spawn_blocking(move || {
            let boundary = Boundary::new("===B===");
            let body = MultipartBody::encoder(&boundary, UTF_8, "UTF-8")
                .file(&crate::core::FileAttachment {
                    field_name: "f".into(),
                    path: file_path,
                })
                .and_then(|encoder| encoder.finish())
                .unwrap();
            let length = body.content_length();

            TransportReqwest::new()
                .send(TransportRequest {
                    url,
                    method: TransportMethod::Post,
                    headers: vec![header_pair("Content-Type", &boundary.content_type())],
                    body: TransportBody::Multipart(body),
                    charset: "UTF-8".into(),
                })
                .unwrap();

            length
        })
        .await
        .unwrap();

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].body.len() as u64, expected_length);
        assert!(received[0].body.ends_with(b"\xDE\xAD\r\n--===B===--\r\n"));
    }

    #[test_case(404 ; "not found")]
    #[test_case(201 ; "created")]
    #[test_case(500 ; "server error")]
    #[tokio::test]
    async fn return_err_on_non_ok_status(status: u16) {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status).set_body_string("secret body"))
            .mount(&server)
            .await;

        let url = server.uri();
        let result = tokio::task::spawn_blocking(move || {
            TransportReqwest::new().send(TransportRequest {
                url,
                charset: "UTF-8".into(),
                ..Default::default()
            })
        })
        .await
        .unwrap();

        match result {
            Err(ServiceClientError::Status { status: received }) => assert_eq!(received, status),
            other => panic!("Unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn preserve_line_breaks() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("first\nsecond\r\nthird"))
            .mount(&server)
            .await;

        let url = server.uri();
        let response = tokio::task::spawn_blocking(move || {
            TransportReqwest::new().send(TransportRequest {
                url,
                charset: "UTF-8".into(),
                ..Default::default()
            })
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(response.body, "first\nsecond\r\nthird");
    }

    #[tokio::test]
    async fn wait_for_slow_server_by_default() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_secs(31)),
            )
            .mount(&server)
            .await;

        let url = server.uri();
        let response = tokio::task::spawn_blocking(move || {
            TransportReqwest::new().send(TransportRequest {
                url,
                charset: "UTF-8".into(),
                ..Default::default()
            })
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(response.body, "late");
    }

    #[tokio::test]
    async fn return_err_when_connection_fails() {
        let result = tokio::task::spawn_blocking(|| {
            TransportReqwest::new().send(TransportRequest {
                url: "http://127.0.0.1:1/unreachable".into(),
                charset: "UTF-8".into(),
                ..Default::default()
            })
        })
        .await
        .unwrap();

        assert!(matches!(result, Err(ServiceClientError::Transport { .. })));
    }

    #[test]
    fn reject_invalid_header_name() {
        let result = prepare_headers(&[header_pair("Bad Header", "value")]);

        assert!(matches!(result, Err(ServiceClientError::Transport { .. })));
    }

    #[test]
    fn keep_duplicated_header_values() {
        let map = prepare_headers(&[header_pair("X-Tag", "one"), header_pair("x-tag", "two")])
            .unwrap();

        let values: Vec<_> = map
            .get_all("x-tag")
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect();
        assert_eq!(values, vec!["one", "two"]);
    }

    #[test]
    fn join_repeated_response_headers() {
        let mut map = HeaderMap::new();
        map.append("set-cookie", HeaderValue::from_static("a=1"));
        map.append("set-cookie", HeaderValue::from_static("b=2"));
        map.append("content-type", HeaderValue::from_static("text/plain"));

        let headers = collect_headers(&map);

        assert_eq!(headers.get("set-cookie").map(String::as_str), Some("a=1, b=2"));
        assert_eq!(headers.get("content-type").map(String::as_str), Some("text/plain"));
    }
}
