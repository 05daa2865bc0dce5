//! Serde implementation for the [`Deserializer`] trait.
//!
//! This module provides a `serde_json` deserializer for response bodies.
//!
//! # Examples
//! ```
//! use serviceclient::{core::Deserializer, providers::deserialization_serde::DeserializerSerde};
//!
//! let value: serde_json::Value = DeserializerSerde.deserialize(b"{\"ok\":true}").unwrap();
//! assert_eq!(value["ok"], true);
//! ```
//!
//! [`Deserializer`]: crate::core::Deserializer

use crate::core::{Deserializer, ServiceClientError};

/// Serde implementation for the [`Deserializer`] trait.
///
/// Parses the body as JSON into any type implementing
/// [`serde::Deserialize`].
///
/// [`Deserializer`]: crate::core::Deserializer
#[derive(Debug, Clone, Copy, Default)]
pub struct DeserializerSerde;

impl<T> Deserializer<T> for DeserializerSerde
where
    T: for<'de> serde::Deserialize<'de>,
{
    fn deserialize(&self, bytes: &[u8]) -> Result<T, ServiceClientError> {
        serde_json::from_slice(bytes).map_err(|e| ServiceClientError::ResponseParse {
            details: e.to_string(),
        })
    }
}

#[cfg(test)]
mod should {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Status {
        ok: bool,
    }

    #[test]
    fn deserialize() {
        let sut = DeserializerSerde;

        let result: Status = sut.deserialize(b"{\"ok\":true}").unwrap();

        assert_eq!(result, Status { ok: true });
    }

    #[test]
    fn deserialize_into_json_object() {
        let result: serde_json::Map<String, serde_json::Value> =
            DeserializerSerde.deserialize(b"{\"ok\":true,\"n\":1}").unwrap();

        assert_eq!(result.get("ok"), Some(&serde_json::Value::Bool(true)));
    }

    #[test]
    fn fail_on_invalid_json() {
        let result: Result<serde_json::Value, _> = DeserializerSerde.deserialize(b"<html>");

        assert!(matches!(
            result,
            Err(ServiceClientError::ResponseParse { .. })
        ));
    }

    #[test]
    fn fail_on_array_when_object_expected() {
        let result: Result<serde_json::Map<String, serde_json::Value>, _> =
            DeserializerSerde.deserialize(b"[1,2]");

        assert!(result.is_err());
    }
}
