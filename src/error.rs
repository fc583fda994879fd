use reqwest::StatusCode;
use thiserror::Error;

/// SessionError
///
/// Failures surfaced by the Session Store operations. Shown to the user by the
/// form that triggered them; no transport detail.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// Bad credentials, or the login call never completed.
    #[error("authentication failed")]
    Authentication,
    /// A mutation that needs a current identity was attempted without one.
    #[error("no authenticated identity")]
    NotAuthenticated,
    /// The profile update was rejected, failed in transit, or came back stale.
    #[error("profile update failed")]
    Update,
}

/// ApiError
///
/// Outcome of a single call through the intercepting `ApiClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the credential (401). The interceptor has already
    /// cleared the session if the rejected token was still current.
    #[error("credentials rejected by the API")]
    Unauthorized,
    /// Any other non-success status.
    #[error("API returned status {0}")]
    Status(StatusCode),
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),
    /// Rejected before sending.
    #[error("invalid request: {0}")]
    Invalid(String),
}

impl ApiError {
    /// The HTTP status behind this error, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            ApiError::Status(status) => Some(*status),
            _ => None,
        }
    }
}

/// ConfigurationError
///
/// Raised at construction time: unknown roles in a capability requirement,
/// missing or malformed environment settings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("unknown role `{0}` (expected BUYER, SELLER or ADMIN)")]
    UnknownRole(String),
    #[error("{0} must be set in production")]
    MissingVar(&'static str),
    #[error("{name} has an invalid value `{value}`")]
    InvalidVar { name: &'static str, value: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum MortgageError {
    #[error("loan term must be at least one year")]
    InvalidTerm,
    #[error("amounts and rates must be non-negative numbers")]
    NegativeInput,
    #[error("down payment exceeds the home value")]
    DownPaymentTooLarge,
    /// The inputs are valid but the payment does not fit in an `f64`.
    #[error("monthly payment is too large to represent")]
    OutOfRange,
}
