//! Shared request bookkeeping used by the API clients.
//!
//! - **Retry State**: [`RetryState`] for tracking HTTP retry attempts
//! - **Credential Validation**: [`validate_api_key`], [`validate_application_key`]
//! - **Path Parameters**: [`require_path_param`], [`path_segment`]

use reqwest::StatusCode;

use crate::errors::{Error, RetryMetadata, ValidationError};

/// Tracks retry state across attempts.
#[derive(Default)]
pub(crate) struct RetryState {
    pub(crate) attempts: u32,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_error: Option<String>,
}

impl RetryState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_attempt(&mut self, attempt: u32) {
        self.attempts = attempt;
    }

    pub(crate) fn record_status(&mut self, status: StatusCode) {
        self.last_status = Some(status.as_u16());
    }

    pub(crate) fn record_error(&mut self, err: &reqwest::Error) {
        self.last_error = Some(err.to_string());
    }

    pub(crate) fn metadata(&self) -> Option<RetryMetadata> {
        if self.attempts <= 1 {
            None
        } else {
            Some(RetryMetadata {
                attempts: self.attempts,
                last_status: self.last_status,
                last_error: self.last_error.clone(),
            })
        }
    }
}

/// Credential validation result.
pub(crate) type KeyResult = std::result::Result<(), Error>;

/// Validates that an API key is configured.
pub(crate) fn validate_api_key(api_key: &Option<String>) -> KeyResult {
    match api_key {
        Some(key) if !key.trim().is_empty() => Ok(()),
        _ => Err(Error::Validation(
            ValidationError::new("API key is required").with_field("api_key"),
        )),
    }
}

/// Validates that both an API key and an application key are configured.
///
/// Used for endpoints that read or modify organization resources.
pub(crate) fn validate_application_key(
    api_key: &Option<String>,
    application_key: &Option<String>,
) -> KeyResult {
    validate_api_key(api_key)?;
    match application_key {
        Some(key) if !key.trim().is_empty() => Ok(()),
        _ => Err(Error::Validation(
            ValidationError::new("application key is required for this operation")
                .with_field("application_key"),
        )),
    }
}

/// Rejects empty path parameters before they reach the URL.
///
/// `.` and `..` are rejected too: they survive percent-encoding and would be
/// resolved as dot segments when the path is joined onto the base URL.
pub(crate) fn require_path_param(name: &str, value: &str) -> KeyResult {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Validation(
            ValidationError::new(format!("{name} is required")).with_field(name),
        ));
    }
    if value == "." || value == ".." {
        return Err(Error::Validation(
            ValidationError::new(format!("{name} must not be a dot segment")).with_field(name),
        ));
    }
    Ok(())
}

/// Validates a path parameter and percent-encodes it as a single segment.
pub(crate) fn path_segment(name: &str, value: &str) -> Result<String, Error> {
    require_path_param(name, value)?;
    Ok(urlencoding::encode(value.trim()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_metadata_only_after_multiple_attempts() {
        let mut state = RetryState::new();
        state.record_attempt(1);
        assert!(state.metadata().is_none());

        state.record_attempt(2);
        state.record_status(StatusCode::SERVICE_UNAVAILABLE);
        let meta = state.metadata().unwrap();
        assert_eq!(meta.attempts, 2);
        assert_eq!(meta.last_status, Some(503));
    }

    #[test]
    fn application_key_required_after_api_key() {
        let err = validate_application_key(&None, &Some("app".into())).unwrap_err();
        assert!(err.to_string().contains("api_key"));

        let err = validate_application_key(&Some("key".into()), &Some("  ".into())).unwrap_err();
        assert!(err.to_string().contains("application_key"));

        assert!(validate_application_key(&Some("key".into()), &Some("app".into())).is_ok());
    }

    #[test]
    fn blank_path_param_rejected() {
        let err = require_path_param("team_id", " ").unwrap_err();
        assert_eq!(err.to_string(), "team_id: team_id is required");
    }

    #[test]
    fn dot_segments_rejected() {
        for value in [".", "..", " .. "] {
            let err = path_segment("team_id", value).unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "{value:?}");
        }
        assert_eq!(path_segment("team_id", "...").unwrap(), "...");
    }

    #[test]
    fn path_segment_escapes_reserved_characters() {
        assert_eq!(
            path_segment("team_id", " ../../v1/users?x= ").unwrap(),
            "..%2F..%2Fv1%2Fusers%3Fx%3D"
        );
        assert_eq!(path_segment("agent_rule_id", "a#b c").unwrap(), "a%23b%20c");
        assert_eq!(path_segment("agent_rule_id", "ufv-7bk_ba9~").unwrap(), "ufv-7bk_ba9~");
    }
}
