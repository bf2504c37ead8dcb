use std::time::Duration;

use reqwest::{header::HeaderMap, Method, StatusCode};

use crate::{
    errors::{APIError, Error, RetryMetadata},
    model::Model,
    models::APIErrorResponse,
    RATE_LIMIT_RESET_HEADER, REQUEST_ID_HEADER,
};

/// Per-call overrides for an API request.
#[derive(Clone, Default)]
pub struct RequestOptions {
    pub request_id: Option<String>,
    pub headers: HeaderList,
    pub timeout: Option<Duration>,
    pub retry: Option<RetryConfig>,
}

impl RequestOptions {
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .push(HeaderEntry::new(key.into(), value.into()));
        self
    }

    /// Override the overall request timeout for this call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the retry policy for this call.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Disable retries for this call.
    pub fn disable_retry(mut self) -> Self {
        self.retry = Some(RetryConfig::disabled());
        self
    }
}

/// Retry/backoff configuration (defaults use 3 attempts + jittered exponential backoff).
#[derive(Clone, Debug)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_backoff: Duration,
    pub max_backoff: Duration,
    pub retry_post: bool,
}

impl RetryConfig {
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Whether the given status code should trigger a retry for this method.
    pub fn should_retry_status(&self, method: &Method, status: StatusCode) -> bool {
        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::REQUEST_TIMEOUT {
            return self.allow_for_method(method);
        }
        if status.is_server_error() {
            return self.allow_for_method(method);
        }
        false
    }

    /// Whether the given transport error should trigger a retry.
    pub fn should_retry_error(&self, method: &Method, err: &reqwest::Error) -> bool {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            return self.allow_for_method(method);
        }
        false
    }

    /// Jittered exponential backoff for the given attempt (1-indexed).
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exp = if attempt == 0 {
            0
        } else {
            (attempt - 1).min(10)
        };
        let base = self.base_backoff.saturating_mul(2u32.saturating_pow(exp));
        let capped = std::cmp::min(base, self.max_backoff);
        let jitter = 0.5 + fastrand::f64(); // 0.5x .. 1.5x
        let seconds = (capped.as_secs_f64() * jitter).min(self.max_backoff.as_secs_f64());
        Duration::from_secs_f64(seconds)
    }

    /// Delay before the next attempt after a retryable status.
    ///
    /// A 429 carrying `x-ratelimit-reset` waits for the advertised reset,
    /// capped at `max_backoff`.
    pub fn delay_for_status(&self, attempt: u32, status: StatusCode, headers: &HeaderMap) -> Duration {
        if status == StatusCode::TOO_MANY_REQUESTS {
            if let Some(reset) = rate_limit_reset_from_headers(headers) {
                return std::cmp::min(reset, self.max_backoff);
            }
        }
        self.backoff_delay(attempt)
    }

    fn allow_for_method(&self, method: &Method) -> bool {
        if method == Method::POST {
            return self.retry_post;
        }
        true
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_millis(300),
            max_backoff: Duration::from_secs(5),
            retry_post: true,
        }
    }
}

/// Structured header list with validation.
#[derive(Clone, Debug, Default)]
pub struct HeaderList(Vec<HeaderEntry>);

impl HeaderList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a header entry.
    ///
    /// # Panics
    /// Panics if the header key or value is empty or contains only whitespace.
    pub fn push(&mut self, entry: HeaderEntry) {
        assert!(
            entry.is_valid(),
            "Invalid header: key and value must be non-empty (got key={:?}, value={:?})",
            entry.key,
            entry.value
        );
        self.0.push(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderEntry> {
        self.0.iter()
    }
}

#[derive(Clone, Debug)]
pub struct HeaderEntry {
    pub key: String,
    pub value: String,
}

impl HeaderEntry {
    pub fn new(key: String, value: String) -> Self {
        Self { key, value }
    }

    pub fn is_valid(&self) -> bool {
        !(self.key.trim().is_empty() || self.value.trim().is_empty())
    }
}

pub(crate) fn request_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

pub(crate) fn rate_limit_reset_from_headers(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RATE_LIMIT_RESET_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

pub(crate) fn parse_api_error_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: String,
    retries: Option<RetryMetadata>,
) -> Error {
    let request_id = request_id_from_headers(headers);
    let status_text = status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string();

    let mut err = APIError {
        status: status.as_u16(),
        message: status_text,
        errors: Vec::new(),
        request_id,
        retries,
        raw_body: None,
    };
    if body.is_empty() {
        return err.into();
    }

    if let Ok(Model::Typed { value, .. }) = Model::<APIErrorResponse>::decode(body.as_bytes()) {
        if !value.errors.is_empty() {
            err.message = value.errors.join("; ");
        }
        err.errors = value.errors;
    } else {
        err.message = body.clone();
    }
    err.raw_body = Some(body);
    err.into()
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    #[test]
    fn backoff_respects_max_and_jitter() {
        let retry = RetryConfig {
            max_attempts: 3,
            base_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(1),
            retry_post: true,
        };

        let delay = retry.backoff_delay(5);
        assert!(delay <= Duration::from_secs(1));
        assert!(delay >= Duration::from_millis(250));
    }

    #[test]
    fn retry_post_toggle_honored() {
        let retry = RetryConfig {
            retry_post: false,
            ..Default::default()
        };
        assert!(!retry.should_retry_status(&Method::POST, StatusCode::INTERNAL_SERVER_ERROR));
        assert!(retry.should_retry_status(&Method::GET, StatusCode::INTERNAL_SERVER_ERROR));
        assert!(retry.should_retry_status(&Method::DELETE, StatusCode::TOO_MANY_REQUESTS));
        assert!(!retry.should_retry_status(&Method::GET, StatusCode::FORBIDDEN));
    }

    #[test]
    fn rate_limit_reset_overrides_backoff() {
        let retry = RetryConfig::default();
        let mut headers = HeaderMap::new();
        headers.insert(RATE_LIMIT_RESET_HEADER, HeaderValue::from_static("2"));
        assert_eq!(
            retry.delay_for_status(1, StatusCode::TOO_MANY_REQUESTS, &headers),
            Duration::from_secs(2)
        );

        headers.insert(RATE_LIMIT_RESET_HEADER, HeaderValue::from_static("60"));
        assert_eq!(
            retry.delay_for_status(1, StatusCode::TOO_MANY_REQUESTS, &headers),
            retry.max_backoff
        );
    }

    #[test]
    fn request_options_disable_retry_sets_single_attempt() {
        let opts = RequestOptions::default().disable_retry();
        assert_eq!(opts.retry.unwrap().max_attempts, 1);
    }

    #[test]
    fn api_error_decodes_errors_array() {
        let err = parse_api_error_parts(
            StatusCode::BAD_REQUEST,
            &HeaderMap::new(),
            r#"{"errors": ["AWS account not found", "Invalid lambda arn"]}"#.to_string(),
            None,
        );
        match err {
            Error::Api(api) => {
                assert_eq!(api.status, 400);
                assert_eq!(api.errors.len(), 2);
                assert_eq!(api.message, "AWS account not found; Invalid lambda arn");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn api_error_falls_back_to_raw_body() {
        let err = parse_api_error_parts(
            StatusCode::BAD_GATEWAY,
            &HeaderMap::new(),
            "upstream unavailable".to_string(),
            None,
        );
        match err {
            Error::Api(api) => {
                assert!(api.errors.is_empty());
                assert_eq!(api.message, "upstream unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn header_list_accepts_valid_entries() {
        let mut list = HeaderList::new();
        list.push(HeaderEntry::new(
            "X-Custom".to_string(),
            "value".to_string(),
        ));
        assert_eq!(list.iter().count(), 1);
    }

    #[test]
    #[should_panic(expected = "Invalid header")]
    fn header_list_panics_on_whitespace_only() {
        let mut list = HeaderList::new();
        list.push(HeaderEntry::new("   ".to_string(), "value".to_string()));
    }
}
