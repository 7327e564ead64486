use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrintNodeError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("Incorrect credential combination: {0}")]
    CredentialSelection(String),

    #[error("sslcert file \"{}\" not found", .0.display())]
    CertificateNotFound(PathBuf),

    #[error("Invalid certificate bundle \"{}\": {message}", .path.display())]
    Certificate { path: PathBuf, message: String },

    #[error("Invalid header {name}: {message}")]
    InvalidHeader { name: String, message: String },

    #[error(
        "Incorrect Content-Type \"{}\" for url \"{url}\"",
        .content_type.as_deref().unwrap_or("None")
    )]
    ContentType {
        content_type: Option<String>,
        url: String,
    },

    #[error("Unexpected status code: {0}")]
    UnexpectedStatus(u16),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PrintNodeError {
    /// True for failures caused by local setup rather than by the remote service.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PrintNodeError::CredentialSelection(_)
                | PrintNodeError::CertificateNotFound(_)
                | PrintNodeError::Certificate { .. }
                | PrintNodeError::InvalidHeader { .. }
                | PrintNodeError::Config(_)
        )
    }
}

/// Fields the API reports alongside a failing status code
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiErrorDetails {
    pub status_code: u16,
    pub code: String,
    pub message: String,
    pub uid: Option<String>,
}

impl ApiErrorDetails {
    /// Build from a parsed error payload. Unknown fields are ignored and
    /// missing `code`/`message` become empty strings.
    pub fn from_payload(status_code: u16, payload: &Value) -> Self {
        let text = |name: &str| {
            payload
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_default()
        };

        let uid = match payload.get("uid") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };

        Self {
            status_code,
            code: text("code"),
            message: text("message"),
            uid,
        }
    }
}

impl fmt::Display for ApiErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}): {}", self.code, self.status_code, self.message)
    }
}

/// Errors reported by the PrintNode API through the response status code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    Client(ApiErrorDetails),

    #[error("{0}")]
    Unauthorized(ApiErrorDetails),

    #[error("{0}")]
    TooManyRequests(ApiErrorDetails),

    #[error("{0}")]
    Server(ApiErrorDetails),
}

impl ApiError {
    pub fn details(&self) -> &ApiErrorDetails {
        match self {
            ApiError::Client(d)
            | ApiError::Unauthorized(d)
            | ApiError::TooManyRequests(d)
            | ApiError::Server(d) => d,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.details().status_code
    }

    pub fn code(&self) -> &str {
        &self.details().code
    }

    pub fn message(&self) -> &str {
        &self.details().message
    }

    pub fn uid(&self) -> Option<&str> {
        self.details().uid.as_deref()
    }

    /// Unauthorized and TooManyRequests are specialised 4xx errors, so they
    /// count as client errors too.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ApiError::Server(_))
    }
}

/// Transport failures that happen before a response is available
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Too many redirects: {0}")]
    TooManyRedirects(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Request failed: {0}")]
    Request(String),
}

impl NetworkError {
    pub fn detail(&self) -> &str {
        match self {
            NetworkError::Timeout(s)
            | NetworkError::TooManyRedirects(s)
            | NetworkError::Connection(s)
            | NetworkError::Http(s)
            | NetworkError::Request(s) => s,
        }
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        let text = error_chain(&err);

        // A connect timeout is both a timeout and a connect error; timeout wins.
        if err.is_timeout() {
            NetworkError::Timeout(text)
        } else if err.is_redirect() {
            NetworkError::TooManyRedirects(text)
        } else if err.is_connect() {
            NetworkError::Connection(text)
        } else if err.is_status() || err.is_body() || err.is_decode() {
            NetworkError::Http(text)
        } else {
            NetworkError::Request(text)
        }
    }
}

/// reqwest's own Display hides the underlying cause, so walk the sources.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !parts.contains(&text) {
            parts.push(text);
        }
        source = cause.source();
    }
    parts.join(": ")
}

pub type Result<T> = std::result::Result<T, PrintNodeError>;
