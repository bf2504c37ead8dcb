use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use reqwest::{
    Method,
    header::{ACCEPT, CONTENT_TYPE, HeaderName, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::sleep;

use crate::{
    API_KEY_HEADER, APPLICATION_KEY_HEADER, DEFAULT_CLIENT_HEADER, DEFAULT_CONNECT_TIMEOUT,
    DEFAULT_REQUEST_TIMEOUT, REQUEST_ID_HEADER,
    aws_logs::AWSLogsIntegrationClient,
    core::RetryState,
    csm_threats::CloudWorkloadSecurityClient,
    errors::{Error, Result, RetryMetadata, TransportError, TransportErrorKind},
    http::{HeaderList, RequestOptions, RetryConfig, parse_api_error_parts, request_id_from_headers},
    model::{Model, Schema},
    site::Site,
    teams::TeamsClient,
    telemetry::{HttpRequestMetrics, MetricsCallbacks, RequestContext, Telemetry},
};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "DD_API_KEY";
/// Environment variable holding the application key.
pub const APPLICATION_KEY_ENV: &str = "DD_APP_KEY";
/// Environment variable selecting the Datadog site.
pub const SITE_ENV: &str = "DD_SITE";

#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Datadog site (defaults to US1). `base_url` takes precedence when set.
    pub site: Option<Site>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub application_key: Option<String>,
    /// Override the User-Agent sent with every request.
    pub client_header: Option<String>,
    pub http_client: Option<reqwest::Client>,
    /// Override the connect timeout (defaults to 5s).
    pub connect_timeout: Option<Duration>,
    /// Override the request timeout (defaults to 60s).
    pub timeout: Option<Duration>,
    /// Retry/backoff policy (defaults to 3 attempts, exponential backoff + jitter).
    pub retry: Option<RetryConfig>,
    /// Default extra headers applied to all requests.
    pub default_headers: Option<HeaderList>,
    /// Optional metrics callbacks (HTTP latency and outcome).
    pub metrics: Option<MetricsCallbacks>,
}

impl Config {
    /// Reads credentials and site from `DD_API_KEY`, `DD_APP_KEY` and `DD_SITE`.
    ///
    /// Unset or empty variables leave the matching field as `None`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            site: var(SITE_ENV).map(|v| Site::from(v.as_str())),
            api_key: var(API_KEY_ENV),
            application_key: var(APPLICATION_KEY_ENV),
            ..Default::default()
        }
    }
}

#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    base_url: reqwest::Url,
    pub(crate) api_key: Option<String>,
    pub(crate) application_key: Option<String>,
    client_header: String,
    http: reqwest::Client,
    request_timeout: Duration,
    retry: RetryConfig,
    default_headers: Option<HeaderList>,
    telemetry: Telemetry,
}

impl Client {
    pub fn new(cfg: Config) -> Result<Self> {
        let base_source = cfg
            .base_url
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| cfg.site.clone().unwrap_or_default().base_url());
        let base = base_source.trim().trim_end_matches('/').to_string();
        let base_url = reqwest::Url::parse(&base)
            .map_err(|err| Error::Config(format!("invalid base url: {err}")))?;

        let connect_timeout = cfg.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT);
        let request_timeout = cfg.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let retry = cfg.retry.unwrap_or_default();

        let api_key = cfg.api_key.filter(|s| !s.trim().is_empty());
        if api_key.is_none() {
            return Err(Error::Config("api key is required".to_string()));
        }

        let http = match cfg.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .connect_timeout(connect_timeout)
                .build()
                .map_err(|err| TransportError {
                    kind: TransportErrorKind::Connect,
                    message: "failed to build http client".to_string(),
                    source: Some(err),
                    retries: None,
                })?,
        };

        let client_header = cfg
            .client_header
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CLIENT_HEADER.to_string());

        Ok(Self {
            inner: Arc::new(ClientInner {
                base_url,
                api_key,
                application_key: cfg.application_key.filter(|s| !s.trim().is_empty()),
                client_header,
                http,
                request_timeout,
                retry,
                default_headers: cfg.default_headers,
                telemetry: Telemetry::new(cfg.metrics),
            }),
        })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    pub fn aws_logs_integration(&self) -> AWSLogsIntegrationClient {
        AWSLogsIntegrationClient::new(self.inner.clone())
    }

    pub fn cloud_workload_security(&self) -> CloudWorkloadSecurityClient {
        CloudWorkloadSecurityClient::new(self.inner.clone())
    }

    pub fn teams(&self) -> TeamsClient {
        TeamsClient::new(self.inner.clone())
    }
}

fn apply_header_list(
    mut builder: reqwest::RequestBuilder,
    headers: &HeaderList,
) -> Result<reqwest::RequestBuilder> {
    for entry in headers.iter() {
        if !entry.is_valid() {
            continue;
        }
        let name = HeaderName::from_bytes(entry.key.trim().as_bytes())
            .map_err(|err| Error::Config(format!("invalid header name: {err}")))?;
        let val = HeaderValue::from_str(entry.value.trim())
            .map_err(|err| Error::Config(format!("invalid header value: {err}")))?;
        builder = builder.header(name, val);
    }
    Ok(builder)
}

impl ClientInner {
    /// Builds a fully prepared request: auth, per-call headers, timeout and
    /// an optional JSON body already encoded through the codec.
    fn prepare(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        options: &RequestOptions,
    ) -> Result<reqwest::RequestBuilder> {
        let mut builder = self.request(method, path)?;
        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body);
        }
        builder = self.with_headers(
            builder,
            options.request_id.as_deref(),
            &options.headers,
            Some("application/json"),
        )?;
        Ok(self.with_timeout(builder, options.timeout, true))
    }

    /// Sends a request and decodes the object body through the codec.
    pub(crate) async fn call_model<T: Schema>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        options: &RequestOptions,
    ) -> Result<Model<T>> {
        let builder = self.prepare(method.clone(), path, body, options)?;
        let ctx = self.make_context(&method, path, options.request_id.clone());
        self.execute_model(builder, method, options.retry.clone(), ctx)
            .await
    }

    /// Sends a request and deserializes the body with serde. Used for array
    /// and free-form responses.
    pub(crate) async fn call_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        options: &RequestOptions,
    ) -> Result<T> {
        let builder = self.prepare(method.clone(), path, body, options)?;
        let ctx = self.make_context(&method, path, options.request_id.clone());
        self.execute_json(builder, method, options.retry.clone(), ctx)
            .await
    }

    fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder> {
        let url = self
            .base_url
            .join(path)
            .map_err(|err| Error::Config(format!("invalid path: {err}")))?;
        Ok(self.http.request(method, url))
    }

    fn with_headers(
        &self,
        mut builder: reqwest::RequestBuilder,
        request_id: Option<&str>,
        headers: &HeaderList,
        accept: Option<&str>,
    ) -> Result<reqwest::RequestBuilder> {
        if let Some(accept) = accept {
            builder = builder.header(ACCEPT, accept);
        }
        if let Some(req_id) = request_id {
            if !req_id.trim().is_empty() {
                builder = builder.header(REQUEST_ID_HEADER, req_id);
            }
        }
        builder = builder.header(USER_AGENT, self.client_header.as_str());
        builder = self.apply_auth(builder);

        if let Some(defaults) = &self.default_headers {
            builder = apply_header_list(builder, defaults)?;
        }
        builder = apply_header_list(builder, headers)?;

        Ok(builder)
    }

    fn with_timeout(
        &self,
        builder: reqwest::RequestBuilder,
        timeout: Option<Duration>,
        use_default: bool,
    ) -> reqwest::RequestBuilder {
        if let Some(duration) = timeout {
            builder.timeout(duration)
        } else if use_default {
            builder.timeout(self.request_timeout)
        } else {
            builder
        }
    }

    fn apply_auth(&self, mut builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key.trim());
        }
        if let Some(key) = &self.application_key {
            builder = builder.header(APPLICATION_KEY_HEADER, key.trim());
        }
        builder
    }

    fn make_context(
        &self,
        method: &Method,
        path: &str,
        request_id: Option<String>,
    ) -> RequestContext {
        RequestContext::new(method.as_str(), path).with_request_id(request_id)
    }

    /// Sends the request and decodes an object body into a [`Model`].
    async fn execute_model<T: Schema>(
        &self,
        builder: reqwest::RequestBuilder,
        method: Method,
        retry: Option<RetryConfig>,
        ctx: RequestContext,
    ) -> Result<Model<T>> {
        let bytes = self.execute_bytes(builder, method, retry, ctx).await?;
        Ok(Model::<T>::decode(&bytes)?)
    }

    /// Sends the request and deserializes the body with serde. An empty body
    /// is read as JSON `null`.
    async fn execute_json<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
        method: Method,
        retry: Option<RetryConfig>,
        ctx: RequestContext,
    ) -> Result<T> {
        let bytes = self.execute_bytes(builder, method, retry, ctx).await?;
        let parsed = if bytes.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_value::<T>(Value::Null)
        } else {
            serde_json::from_slice::<T>(&bytes)
        };
        parsed.map_err(Error::Serialization)
    }

    async fn execute_bytes(
        &self,
        builder: reqwest::RequestBuilder,
        method: Method,
        retry: Option<RetryConfig>,
        ctx: RequestContext,
    ) -> Result<Vec<u8>> {
        let retry_cfg = retry.unwrap_or_else(|| self.retry.clone());
        let resp = self
            .send_with_retry(builder, method, retry_cfg, ctx)
            .await?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|err| self.to_transport_error(err, None))?;
        Ok(bytes.to_vec())
    }

    async fn send_with_retry(
        &self,
        builder: reqwest::RequestBuilder,
        method: Method,
        retry: RetryConfig,
        ctx: RequestContext,
    ) -> Result<reqwest::Response> {
        let max_attempts = retry.max_attempts.max(1);
        let mut state = RetryState::new();
        let start = Instant::now();

        for attempt in 1..=max_attempts {
            let attempt_builder = builder
                .try_clone()
                .ok_or_else(|| Error::Config("request body is not cloneable for retry".into()))?;
            #[cfg(feature = "tracing")]
            let span = tracing::debug_span!(
                "datadog.http",
                method = %ctx.method,
                path = %ctx.path,
                attempt,
                max_attempts
            );
            #[cfg(feature = "tracing")]
            let _guard = span.enter();
            let result = attempt_builder.send().await;

            match result {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        state.record_attempt(attempt);
                        let mut http_ctx = ctx.clone();
                        if http_ctx.request_id.is_none() {
                            http_ctx.request_id = request_id_from_headers(resp.headers());
                        }
                        if self.telemetry.http_enabled() {
                            self.telemetry.record_http(HttpRequestMetrics {
                                latency: start.elapsed(),
                                status: Some(status.as_u16()),
                                error: None,
                                retries: state.metadata(),
                                context: http_ctx,
                            });
                        }
                        #[cfg(feature = "tracing")]
                        tracing::debug!(
                            status = %status,
                            elapsed_ms = start.elapsed().as_millis() as u64,
                            "request completed"
                        );
                        return Ok(resp);
                    }
                    state.record_attempt(attempt);
                    state.record_status(status);

                    let should_retry = retry.should_retry_status(&method, status);
                    if should_retry && attempt < max_attempts {
                        let delay = retry.delay_for_status(attempt, status, resp.headers());
                        #[cfg(feature = "tracing")]
                        tracing::debug!(
                            status = %status,
                            delay_ms = delay.as_millis() as u64,
                            "retrying request"
                        );
                        sleep(delay).await;
                        continue;
                    }

                    let retries = state.metadata();
                    let headers = resp.headers().clone();
                    let mut http_ctx = ctx.clone();
                    if http_ctx.request_id.is_none() {
                        http_ctx.request_id = request_id_from_headers(&headers);
                    }
                    if self.telemetry.http_enabled() {
                        self.telemetry.record_http(HttpRequestMetrics {
                            latency: start.elapsed(),
                            status: Some(status.as_u16()),
                            error: Some(format!("http {}", status.as_u16())),
                            retries: retries.clone(),
                            context: http_ctx,
                        });
                    }
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        status = %status,
                        attempt,
                        "request failed; returning error"
                    );
                    let body = resp.text().await.unwrap_or_default();
                    return Err(parse_api_error_parts(status, &headers, body, retries));
                }
                Err(err) => {
                    state.record_attempt(attempt);
                    state.record_error(&err);
                    let should_retry = retry.should_retry_error(&method, &err);
                    if should_retry && attempt < max_attempts {
                        sleep(retry.backoff_delay(attempt)).await;
                        continue;
                    }

                    let retries = state.metadata();
                    if self.telemetry.http_enabled() {
                        self.telemetry.record_http(HttpRequestMetrics {
                            latency: start.elapsed(),
                            status: None,
                            error: Some(err.to_string()),
                            retries: retries.clone(),
                            context: ctx.clone(),
                        });
                    }
                    #[cfg(feature = "tracing")]
                    tracing::warn!(attempt, error = %err, "transport error");
                    return Err(self.to_transport_error(err, retries));
                }
            }
        }

        Err(Error::Transport(TransportError {
            kind: TransportErrorKind::Other,
            message: "request failed".to_string(),
            source: None,
            retries: state.metadata(),
        }))
    }

    fn to_transport_error(&self, err: reqwest::Error, retries: Option<RetryMetadata>) -> Error {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_request() {
            TransportErrorKind::Request
        } else {
            TransportErrorKind::Other
        };

        TransportError {
            kind,
            message: err.to_string(),
            source: Some(err),
            retries,
        }
        .into()
    }
}
