//! Rust client for the Datadog HTTP API.
//!
//! Request and response bodies are forward compatible: a payload the client
//! cannot fully interpret (unknown enum value, missing or mistyped field) is
//! kept verbatim as an unparsed [`model::Model`] instead of failing the call.
#![cfg_attr(docsrs, feature(doc_cfg))]
// Allow large error types - refactoring to Box<Error> would be a breaking change
#![allow(clippy::result_large_err)]

/// Default User-Agent header value.
pub(crate) const DEFAULT_CLIENT_HEADER: &str =
    concat!("datadog-api-client-rust/", env!("CARGO_PKG_VERSION"));

/// Default connection timeout (5 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

/// Default request timeout (60 seconds).
pub const DEFAULT_REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

/// HTTP header name for request ID tracing.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Seconds until the current rate-limit window resets.
pub const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// HTTP header name for API key authentication.
pub(crate) const API_KEY_HEADER: &str = "DD-API-KEY";

/// HTTP header name for application key authentication.
pub(crate) const APPLICATION_KEY_HEADER: &str = "DD-APPLICATION-KEY";

mod errors;
pub mod model;
pub mod models;
mod site;

#[cfg(feature = "client")]
mod aws_logs;
#[cfg(feature = "client")]
mod client;
#[cfg(feature = "client")]
mod core;
#[cfg(feature = "client")]
mod csm_threats;
#[cfg(feature = "client")]
mod http;
#[cfg(feature = "client")]
mod teams;
#[cfg(feature = "client")]
mod telemetry;

pub use errors::{APIError, Error, Result, RetryMetadata, ValidationError};
#[cfg(feature = "client")]
pub use errors::{TransportError, TransportErrorKind};
pub use model::{CodecError, Model, UnparsedObject};
pub use site::Site;

#[cfg(feature = "client")]
pub use aws_logs::AWSLogsIntegrationClient;
#[cfg(feature = "client")]
pub use client::{Client, Config, API_KEY_ENV, APPLICATION_KEY_ENV, SITE_ENV};
#[cfg(feature = "client")]
pub use csm_threats::CloudWorkloadSecurityClient;
#[cfg(feature = "client")]
pub use http::{HeaderEntry, HeaderList, RequestOptions, RetryConfig};
#[cfg(feature = "client")]
pub use teams::TeamsClient;
#[cfg(feature = "client")]
pub use telemetry::{HttpRequestMetrics, MetricsCallbacks, RequestContext};
