//! Service client configuration module
//!
//! This module contains the [`ServiceClientConfig`] struct and its builder.

use crate::{
    body::multipart::DEFAULT_CHUNK_SIZE,
    core::{
        utils::{encoding::resolve_charset, headers::DEFAULT_USER_AGENT},
        ServiceClientError,
    },
};
use derive_builder::Builder;
use log::info;

/// Charset used when none is configured.
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Settings shared by every request a [`ServiceClient`] sends.
///
/// # Examples
/// ```
/// use serviceclient::ServiceClientConfigBuilder;
///
/// # fn main() -> Result<(), serviceclient::core::ServiceClientError> {
/// let config = ServiceClientConfigBuilder::default()
///     .with_user_agent("uploader/1.0")
///     .with_chunk_size(64 * 1024)
///     .build()?;
///
/// assert_eq!(config.charset(), "UTF-8");
/// # Ok(())
/// # }
/// ```
///
/// [`ServiceClient`]: crate::ServiceClient
#[derive(Builder, Clone, Debug, PartialEq, Eq)]
#[builder(
    pattern = "owned",
    name = "ServiceClientConfigBuilder",
    build_fn(private, name = "build_internal"),
    setter(prefix = "with")
)]
pub struct ServiceClientConfig {
    /// `User-Agent` sent unless the request carries its own.
    #[builder(setter(into), default = "DEFAULT_USER_AGENT.to_string()")]
    pub(crate) user_agent: String,

    /// Charset for parameter encoding and text parts.
    #[builder(setter(into), default = "DEFAULT_CHARSET.to_string()")]
    pub(crate) charset: String,

    /// Size of a single read from an attached file.
    #[builder(default = "DEFAULT_CHUNK_SIZE")]
    pub(crate) chunk_size: usize,
}

impl ServiceClientConfig {
    /// Configured `User-Agent`.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Configured charset label.
    pub fn charset(&self) -> &str {
        &self.charset
    }

    /// Configured file chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl Default for ServiceClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            charset: DEFAULT_CHARSET.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ServiceClientConfigBuilder {
    /// Build [`ServiceClientConfig`].
    ///
    /// # Errors
    /// [`ServiceClientError::Configuration`] for a zero chunk size or an
    /// unusable charset.
    pub fn build(self) -> Result<ServiceClientConfig, ServiceClientError> {
        let config = self
            .build_internal()
            .map_err(|err| ServiceClientError::Configuration {
                details: err.to_string(),
            })?;

        if config.chunk_size == 0 {
            return Err(ServiceClientError::Configuration {
                details: "chunk size must be greater than zero".into(),
            });
        }

        resolve_charset(&config.charset).map_err(|err| ServiceClientError::Configuration {
            details: err.to_string(),
        })?;

        info!(
            "Client Configuration: \n user_agent: {}\n charset: {}\n chunk_size: {}",
            config.user_agent, config.charset, config.chunk_size
        );

        Ok(config)
    }
}
