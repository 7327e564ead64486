use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PrintNodeError, Result};

pub const HEADER_ACCOUNT_CREDENTIALS: &str = "X-Auth-With-Account-Credentials";
pub const HEADER_CLIENT_KEY: &str = "X-Auth-With-Client-Key";
pub const HEADER_CHILD_BY_EMAIL: &str = "X-Child-Account-By-Email";
pub const HEADER_CHILD_BY_CREATOR_REF: &str = "X-Child-Account-By-CreatorRef";
pub const HEADER_CHILD_BY_ID: &str = "X-Child-Account-By-Id";

/// Raw credential fields as they arrive from config files, flags or callers.
///
/// Exactly one of the six supported combinations must be filled in; see
/// [`Credential::from_fields`].
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CredentialFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apikey: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clientkey: Option<String>,
    #[serde(rename = "child_email", default, skip_serializing_if = "Option::is_none")]
    pub child_email: Option<String>,
    #[serde(rename = "child_ref", default, skip_serializing_if = "Option::is_none")]
    pub child_ref: Option<String>,
    #[serde(rename = "child_id", default, skip_serializing_if = "Option::is_none")]
    pub child_id: Option<u64>,
}

impl CredentialFields {
    pub fn account(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    pub fn apikey(apikey: impl Into<String>) -> Self {
        Self {
            apikey: Some(apikey.into()),
            ..Self::default()
        }
    }

    pub fn clientkey(clientkey: impl Into<String>) -> Self {
        Self {
            clientkey: Some(clientkey.into()),
            ..Self::default()
        }
    }

    pub fn with_child_email(mut self, email: impl Into<String>) -> Self {
        self.child_email = Some(email.into());
        self
    }

    pub fn with_child_ref(mut self, creator_ref: impl Into<String>) -> Self {
        self.child_ref = Some(creator_ref.into());
        self
    }

    pub fn with_child_id(mut self, id: u64) -> Self {
        self.child_id = Some(id);
        self
    }

    /// Field-by-field overlay: every field set in `overrides` replaces ours.
    pub fn merge(self, overrides: CredentialFields) -> Self {
        Self {
            email: overrides.email.or(self.email),
            password: overrides.password.or(self.password),
            apikey: overrides.apikey.or(self.apikey),
            clientkey: overrides.clientkey.or(self.clientkey),
            child_email: overrides.child_email.or(self.child_email),
            child_ref: overrides.child_ref.or(self.child_ref),
            child_id: overrides.child_id.or(self.child_id),
        }
    }

    /// Names of the fields that are set
    pub fn supplied(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.email.is_some() {
            names.push("email");
        }
        if self.password.is_some() {
            names.push("password");
        }
        if self.apikey.is_some() {
            names.push("apikey");
        }
        if self.clientkey.is_some() {
            names.push("clientkey");
        }
        if self.child_email.is_some() {
            names.push("child_email");
        }
        if self.child_ref.is_some() {
            names.push("child_ref");
        }
        if self.child_id.is_some() {
            names.push("child_id");
        }
        names
    }

    pub fn is_empty(&self) -> bool {
        self.supplied().is_empty()
    }
}

impl fmt::Debug for CredentialFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialFields")
            .field("supplied", &self.supplied())
            .finish()
    }
}

/// One of the six ways to authenticate against the API
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Account email and password
    Account { email: String, password: String },
    ApiKey(String),
    /// Integrator client key
    ClientKey(String),
    /// Parent API key acting on a child account chosen by email
    ChildByEmail { apikey: String, email: String },
    /// Parent API key acting on a child account chosen by creator reference
    ChildByRef { apikey: String, creator_ref: String },
    /// Parent API key acting on a child account chosen by id
    ChildById { apikey: String, id: u64 },
}

impl Credential {
    /// Pick the credential variant matching exactly the supplied fields.
    ///
    /// Any field set that is not one of the six known combinations (too few
    /// fields, an extra field, or a mix of two combinations) is rejected.
    pub fn from_fields(fields: CredentialFields) -> Result<Self> {
        let supplied = fields.supplied();
        let CredentialFields {
            email,
            password,
            apikey,
            clientkey,
            child_email,
            child_ref,
            child_id,
        } = fields;

        match (email, password, apikey, clientkey, child_email, child_ref, child_id) {
            (Some(email), Some(password), None, None, None, None, None) => {
                Ok(Credential::Account { email, password })
            }
            (None, None, Some(apikey), None, None, None, None) => Ok(Credential::ApiKey(apikey)),
            (None, None, None, Some(clientkey), None, None, None) => {
                Ok(Credential::ClientKey(clientkey))
            }
            (None, None, Some(apikey), None, Some(email), None, None) => {
                Ok(Credential::ChildByEmail { apikey, email })
            }
            (None, None, Some(apikey), None, None, Some(creator_ref), None) => {
                Ok(Credential::ChildByRef { apikey, creator_ref })
            }
            (None, None, Some(apikey), None, None, None, Some(id)) => {
                Ok(Credential::ChildById { apikey, id })
            }
            _ => Err(PrintNodeError::CredentialSelection(format!(
                "got {{{}}}, expected one of {{email, password}}, {{apikey}}, {{clientkey}}, \
                 {{apikey, child_email}}, {{apikey, child_ref}}, {{apikey, child_id}}",
                supplied.join(", ")
            ))),
        }
    }

    /// Username and password for HTTP basic auth. Keys go in the username
    /// slot with an empty password.
    pub fn basic_auth(&self) -> (&str, &str) {
        match self {
            Credential::Account { email, password } => (email, password),
            Credential::ApiKey(key) | Credential::ClientKey(key) => (key, ""),
            Credential::ChildByEmail { apikey, .. }
            | Credential::ChildByRef { apikey, .. }
            | Credential::ChildById { apikey, .. } => (apikey, ""),
        }
    }

    /// The marker or child-selector header this variant sends, if any
    pub fn header(&self) -> Option<(&'static str, String)> {
        match self {
            Credential::Account { .. } => Some((HEADER_ACCOUNT_CREDENTIALS, "API".to_string())),
            Credential::ApiKey(_) => None,
            Credential::ClientKey(_) => Some((HEADER_CLIENT_KEY, "API".to_string())),
            Credential::ChildByEmail { email, .. } => Some((HEADER_CHILD_BY_EMAIL, email.clone())),
            Credential::ChildByRef { creator_ref, .. } => {
                Some((HEADER_CHILD_BY_CREATOR_REF, creator_ref.clone()))
            }
            Credential::ChildById { id, .. } => Some((HEADER_CHILD_BY_ID, id.to_string())),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Credential::Account { .. } => "account credentials",
            Credential::ApiKey(_) => "api key",
            Credential::ClientKey(_) => "client key",
            Credential::ChildByEmail { .. } => "child account by email",
            Credential::ChildByRef { .. } => "child account by creator ref",
            Credential::ChildById { .. } => "child account by id",
        }
    }
}

// Secrets stay out of Debug output so clients can be logged safely.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({})", self.kind())
    }
}
