//! Authenticated request pipeline for the PrintNode API.
//!
//! Every verb goes through one private `request` routine. Auth headers are
//! merged over caller headers and the request is sent with basic auth.
//! Transport failures become [`NetworkError`]s; a JSON response is either
//! returned or turned into an [`ApiError`].

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Certificate, Client, Method};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::auth::{Credential, CredentialFields};
use crate::error::{ApiError, ApiErrorDetails, NetworkError, PrintNodeError, Result};

/// Production API endpoint
pub const DEFAULT_URL: &str = "https://api.printnode.com";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Settings for building an [`AuthenticatedClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub url: String,
    /// PEM bundle the server certificate must chain to. When set, the
    /// built-in root store is not used.
    pub sslcert: Option<PathBuf>,
    /// No timeout is applied unless one is given here.
    pub timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            sslcert: None,
            timeout: None,
        }
    }
}

/// How a response status code is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Unauthorized,
    TooManyRequests,
    ClientError,
    ServerError,
    Unexpected,
}

/// First match wins: 401 and 429 are checked before the generic 4xx range.
pub fn classify_status(status: u16) -> StatusClass {
    match status {
        401 => StatusClass::Unauthorized,
        429 => StatusClass::TooManyRequests,
        400..=499 => StatusClass::ClientError,
        500..=599 => StatusClass::ServerError,
        200..=299 => StatusClass::Success,
        _ => StatusClass::Unexpected,
    }
}

/// Turn a status code and parsed body into the caller-visible result
pub fn into_result(status: u16, payload: Value) -> Result<Value> {
    let details = || ApiErrorDetails::from_payload(status, &payload);
    match classify_status(status) {
        StatusClass::Success => Ok(payload),
        StatusClass::Unauthorized => Err(ApiError::Unauthorized(details()).into()),
        StatusClass::TooManyRequests => Err(ApiError::TooManyRequests(details()).into()),
        StatusClass::ClientError => Err(ApiError::Client(details()).into()),
        StatusClass::ServerError => Err(ApiError::Server(details()).into()),
        StatusClass::Unexpected => Err(PrintNodeError::UnexpectedStatus(status)),
    }
}

/// HTTP client bound to one base URL and one credential.
///
/// Immutable once built, and cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct AuthenticatedClient {
    http: Client,
    base_url: String,
    sslcert: Option<PathBuf>,
    credential: Credential,
    headers: HeaderMap,
}

impl AuthenticatedClient {
    /// Build a client for `url`, optionally pinned to the PEM bundle at `sslcert`.
    pub fn new(
        url: impl Into<String>,
        sslcert: Option<PathBuf>,
        credential: Credential,
    ) -> Result<Self> {
        Self::with_options(
            ClientOptions {
                url: url.into(),
                sslcert,
                timeout: None,
            },
            credential,
        )
    }

    /// Check the certificate path, then select the credential variant from
    /// raw fields.
    pub fn from_fields(options: ClientOptions, fields: CredentialFields) -> Result<Self> {
        check_certificate_path(options.sslcert.as_deref())?;
        let credential = Credential::from_fields(fields)?;
        Self::build(options, credential)
    }

    pub fn with_options(options: ClientOptions, credential: Credential) -> Result<Self> {
        check_certificate_path(options.sslcert.as_deref())?;
        Self::build(options, credential)
    }

    /// Expects the certificate path to be checked already.
    fn build(options: ClientOptions, credential: Credential) -> Result<Self> {
        let headers = fixed_headers(&credential)?;

        let mut builder = Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(path) = &options.sslcert {
            builder = builder.tls_built_in_root_certs(false);
            for cert in load_certificates(path)? {
                builder = builder.add_root_certificate(cert);
            }
        }
        let http = builder
            .build()
            .map_err(|e| PrintNodeError::Network(NetworkError::from(e)))?;

        Ok(Self {
            http,
            base_url: options.url.trim_end_matches('/').to_string(),
            sslcert: options.sslcert,
            credential,
            headers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn sslcert(&self) -> Option<&Path> {
        self.sslcert.as_deref()
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Headers attached to every request by the credential
    pub fn auth_headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Full URL for an endpoint, inserting the leading `/` if missing
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    pub async fn get(&self, endpoint: &str, headers: Option<&HeaderMap>) -> Result<Value> {
        self.request(Method::GET, endpoint, None, headers).await
    }

    pub async fn post(
        &self,
        endpoint: &str,
        body: Option<&Value>,
        headers: Option<&HeaderMap>,
    ) -> Result<Value> {
        self.request(Method::POST, endpoint, body, headers).await
    }

    /// PATCH always declares a JSON content type.
    pub async fn patch(
        &self,
        endpoint: &str,
        body: Option<&Value>,
        headers: Option<&HeaderMap>,
    ) -> Result<Value> {
        self.request(Method::PATCH, endpoint, body, headers).await
    }

    pub async fn delete(&self, endpoint: &str, headers: Option<&HeaderMap>) -> Result<Value> {
        self.request(Method::DELETE, endpoint, None, headers).await
    }

    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        extra_headers: Option<&HeaderMap>,
    ) -> Result<Value> {
        let url = self.url(endpoint);
        let headers = self.merge_headers(&method, extra_headers);
        let (username, password) = self.credential.basic_auth();

        let mut request = self
            .http
            .request(method.clone(), &url)
            .headers(headers)
            .basic_auth(username, Some(password));
        if let Some(body) = body {
            request = request.body(serde_json::to_string(body)?);
        }

        debug!("{} {} ({})", method, url, self.credential.kind());
        let response = request.send().await.map_err(NetworkError::from)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
        debug!("{} {} -> {} {:?}", method, url, status, content_type);

        if content_type.as_deref() != Some(JSON_CONTENT_TYPE) {
            return Err(PrintNodeError::ContentType { content_type, url });
        }

        let text = response.text().await.map_err(NetworkError::from)?;
        let payload: Value = serde_json::from_str(&text)?;
        into_result(status, payload)
    }

    /// Caller headers first, then the credential's headers on top so they
    /// cannot be overridden, then the PATCH content type. A caller
    /// `Authorization` is dropped; basic auth is added when the request is built.
    fn merge_headers(&self, method: &Method, extra: Option<&HeaderMap>) -> HeaderMap {
        let mut merged = extra.cloned().unwrap_or_default();
        merged.remove(AUTHORIZATION);
        for (name, value) in &self.headers {
            merged.insert(name.clone(), value.clone());
        }
        if *method == Method::PATCH {
            merged.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }
        merged
    }
}

fn check_certificate_path(sslcert: Option<&Path>) -> Result<()> {
    match sslcert {
        Some(path) if !path.is_file() => {
            Err(PrintNodeError::CertificateNotFound(path.to_path_buf()))
        }
        _ => Ok(()),
    }
}

fn load_certificates(path: &Path) -> Result<Vec<Certificate>> {
    let pem = std::fs::read(path)?;
    let certs = Certificate::from_pem_bundle(&pem).map_err(|e| PrintNodeError::Certificate {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    if certs.is_empty() {
        return Err(PrintNodeError::Certificate {
            path: path.to_path_buf(),
            message: "no PEM certificates found".to_string(),
        });
    }
    Ok(certs)
}

fn fixed_headers(credential: &Credential) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some((name, value)) = credential.header() {
        let value = HeaderValue::from_str(&value).map_err(|e| PrintNodeError::InvalidHeader {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            PrintNodeError::InvalidHeader {
                name: name.to_string(),
                message: e.to_string(),
            }
        })?;
        headers.insert(name, value);
    }
    Ok(headers)
}
