use crate::core::{Parameter, ServiceClientError};
use encoding_rs::Encoding;
use percent_encoding::{percent_decode, percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::borrow::Cow;

/// <https://url.spec.whatwg.org/#application-x-www-form-urlencoded-percent-encode-set>
///
/// Only ASCII alphanumerics and `*-._` are left as is. Space is handled
/// separately and becomes `+`.
const FORM_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Resolve charset label (`UTF-8`, `iso-8859-1`, `windows-1252`, ...).
///
/// Labels whose encoder produces a different charset (the UTF-16 family) are
/// rejected, because the bytes on the wire would not match the declared
/// charset.
pub fn resolve_charset(label: &str) -> Result<&'static Encoding, ServiceClientError> {
    let encoding =
        Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| ServiceClientError::Encoding {
            details: format!("unsupported charset: {label}"),
        })?;

    if encoding.output_encoding() != encoding {
        return Err(ServiceClientError::Encoding {
            details: format!("charset {label} can't be used to encode a request"),
        });
    }

    Ok(encoding)
}

/// Encode `text` with `charset`, failing on unmappable characters.
pub fn encode_text<'a>(
    text: &'a str,
    charset: &'static Encoding,
) -> Result<Cow<'a, [u8]>, ServiceClientError> {
    let (bytes, _, had_errors) = charset.encode(text);

    if had_errors {
        return Err(ServiceClientError::Encoding {
            details: format!("{text:?} can't be represented in {}", charset.name()),
        });
    }

    Ok(bytes)
}

/// Percent-encode raw bytes the way HTML forms do.
pub fn url_encode(data: &[u8]) -> String {
    percent_encode(data, FORM_SET)
        .to_string()
        .replace("%20", "+")
}

/// Serialize parameters as `name=value` pairs joined with `&`.
///
/// Names and values are encoded with `charset` first and percent-encoded
/// after that. Order is preserved.
pub fn form_encode(
    params: &[Parameter],
    charset: &'static Encoding,
) -> Result<String, ServiceClientError> {
    params
        .iter()
        .map(|param| {
            Ok(format!(
                "{}={}",
                url_encode(&encode_text(&param.name, charset)?),
                url_encode(&encode_text(&param.value, charset)?)
            ))
        })
        .collect::<Result<Vec<String>, ServiceClientError>>()
        .map(|pairs| pairs.join("&"))
}

/// Reverse of [`url_encode`] for a single component.
pub fn url_decode(data: &str, charset: &'static Encoding) -> Result<String, ServiceClientError> {
    let bytes: Vec<u8> = percent_decode(data.replace('+', " ").as_bytes()).collect();

    charset
        .decode_without_bom_handling_and_without_replacement(&bytes)
        .map(Cow::into_owned)
        .ok_or_else(|| ServiceClientError::Encoding {
            details: format!("{data:?} is not valid {}", charset.name()),
        })
}

/// Parse form-urlencoded `name=value&...` back into parameters.
pub fn form_decode(
    query: &str,
    charset: &'static Encoding,
) -> Result<Vec<Parameter>, ServiceClientError> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));

            Ok(Parameter {
                name: url_decode(name, charset)?,
                value: url_decode(value, charset)?,
            })
        })
        .collect()
}
