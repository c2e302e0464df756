use std::fmt;

/// Machine-readable failure codes shared by every adapter.
///
/// `Upstream` carries a code supplied by the backend's own error envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    MissingApiKey,
    MissingEndpoint,
    MissingDeployment,
    InvalidResponse,
    InvalidConnectionType,
    UnknownError,
    Upstream(String),
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::MissingApiKey => "MISSING_API_KEY",
            ErrorCode::MissingEndpoint => "MISSING_ENDPOINT",
            ErrorCode::MissingDeployment => "MISSING_DEPLOYMENT",
            ErrorCode::InvalidResponse => "INVALID_RESPONSE",
            ErrorCode::InvalidConnectionType => "INVALID_CONNECTION_TYPE",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
            ErrorCode::Upstream(code) => code,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single typed error shape every provider raises.
///
/// `status` is the wire-protocol status when the failure came from an HTTP
/// response; configuration and contract violations leave it unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub message: String,
    pub code: Option<ErrorCode>,
    pub status: Option<u16>,
}

impl ApiError {
    /// Pre-flight configuration failure, raised before any network call.
    pub fn config(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            code: Some(code),
            status: None,
        }
    }

    /// Non-success wire response. `code` is the backend's own error code
    /// when its envelope carried one.
    pub fn upstream(message: impl Into<String>, code: Option<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            code: code.map(ErrorCode::Upstream),
            status: Some(status),
        }
    }

    /// Success response that does not contain the expected image payload.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(ErrorCode::InvalidResponse),
            status: None,
        }
    }

    /// Wraps a non-typed failure (transport error, decode error) so all
    /// failure paths converge on one shape.
    pub fn unknown(err: impl fmt::Display) -> Self {
        Self {
            message: err.to_string(),
            code: Some(ErrorCode::UnknownError),
            status: None,
        }
    }

    pub fn code_str(&self) -> Option<&str> {
        self.code.as_ref().map(ErrorCode::as_str)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} ({})", self.message, code),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_appends_code_when_present() {
        let err = ApiError::config("API key is not configured", ErrorCode::MissingApiKey);
        assert_eq!(
            err.to_string(),
            "API key is not configured (MISSING_API_KEY)"
        );
    }

    #[test]
    fn display_is_bare_message_without_code() {
        let err = ApiError {
            message: "something went wrong".into(),
            code: None,
            status: None,
        };
        assert_eq!(err.to_string(), "something went wrong");
    }

    #[test]
    fn upstream_carries_backend_code_and_status() {
        let err = ApiError::upstream("content policy violation", Some("moderation".into()), 400);
        assert_eq!(err.code_str(), Some("moderation"));
        assert_eq!(err.status, Some(400));
    }
}
