use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Account returned by `/whoami` and the account endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Account {
    pub id: u64,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    pub email: String,
    #[serde(rename = "canCreateSubAccounts", default)]
    pub can_create_sub_accounts: bool,
    #[serde(rename = "creatorEmail", default)]
    pub creator_email: Option<String>,
    #[serde(rename = "creatorRef", default)]
    pub creator_ref: Option<String>,
    #[serde(rename = "childAccounts", default)]
    pub child_accounts: Vec<Value>,
    #[serde(default)]
    pub credits: Option<i64>,
    #[serde(rename = "numComputers", default)]
    pub num_computers: u64,
    #[serde(rename = "totalPrints", default)]
    pub total_prints: u64,
    #[serde(default)]
    pub versions: Vec<Value>,
    #[serde(default)]
    pub connected: Vec<Value>,
    /// `{}` when tags exist, but the API sends `[]` for none
    #[serde(rename = "Tags", default)]
    pub tags: Value,
    #[serde(rename = "ApiKeys", default)]
    pub api_keys: Value,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Account {
    pub fn display_name(&self) -> String {
        match (&self.firstname, &self.lastname) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(name), None) | (None, Some(name)) => name.clone(),
            (None, None) => self.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Computer {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub inet: Option<String>,
    #[serde(default)]
    pub inet6: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub jre: Option<String>,
    #[serde(rename = "createTimestamp", default)]
    pub create_timestamp: Option<DateTime<Utc>>,
    pub state: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Printer {
    pub id: u64,
    pub computer: Computer,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub capabilities: Option<Value>,
    #[serde(default)]
    pub default: Option<bool>,
    #[serde(rename = "createTimestamp", default)]
    pub create_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrintJob {
    pub id: u64,
    pub printer: Printer,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "contentType")]
    pub content_type: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(rename = "expireAt", default)]
    pub expire_at: Option<DateTime<Utc>>,
    #[serde(rename = "createTimestamp", default)]
    pub create_timestamp: Option<DateTime<Utc>>,
    pub state: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrintJobState {
    #[serde(rename = "printJobId")]
    pub print_job_id: u64,
    pub state: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(rename = "clientVersion", default)]
    pub client_version: Option<String>,
    #[serde(rename = "createTimestamp", default)]
    pub create_timestamp: Option<DateTime<Utc>>,
    /// Milliseconds since the job was submitted
    #[serde(default)]
    pub age: Option<i64>,
}

/// PrintNode client build available for download
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientDownload {
    pub id: u64,
    pub enabled: bool,
    pub edition: String,
    pub version: String,
    pub os: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub sha1: Option<String>,
    #[serde(rename = "releaseTimestamp", default)]
    pub release_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Latest reading from a scale attached to a computer
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Scale {
    /// `[value, uncertainty]` in micrograms; either may be null
    #[serde(default)]
    pub mass: Vec<Option<i64>>,
    #[serde(rename = "deviceName")]
    pub device_name: String,
    #[serde(rename = "deviceNum")]
    pub device_num: u32,
    #[serde(default)]
    pub port: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
    /// Reading keyed by unit, e.g. `{"g": 1250}`
    #[serde(default)]
    pub measurement: BTreeMap<String, i64>,
    #[serde(rename = "clientReportedCreateTimestamp", default)]
    pub client_reported_create_timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "ntpOffset", default)]
    pub ntp_offset: Option<i64>,
    /// Milliseconds since the client took the reading
    #[serde(rename = "ageOfData", default)]
    pub age_of_data: Option<i64>,
    #[serde(rename = "computerId")]
    pub computer_id: u64,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(rename = "vendorId", default)]
    pub vendor_id: Option<u64>,
    #[serde(rename = "productId", default)]
    pub product_id: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    PdfUri,
    PdfBase64,
    RawUri,
    RawBase64,
}

/// Body for `POST /printjobs`
#[derive(Debug, Clone, Serialize)]
pub struct PrintJobRequest {
    #[serde(rename = "printerId")]
    pub printer_id: u64,
    pub title: String,
    #[serde(rename = "contentType")]
    pub content_type: ContentType,
    pub content: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    #[serde(rename = "expireAfter", skip_serializing_if = "Option::is_none")]
    pub expire_after: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<u32>,
}

impl PrintJobRequest {
    pub const DEFAULT_SOURCE: &'static str = "printnode-client";

    fn new(
        printer_id: u64,
        title: impl Into<String>,
        content_type: ContentType,
        content: String,
    ) -> Self {
        Self {
            printer_id,
            title: title.into(),
            content_type,
            content,
            source: Self::DEFAULT_SOURCE.to_string(),
            options: None,
            expire_after: None,
            qty: None,
        }
    }

    pub fn pdf_uri(printer_id: u64, title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::new(printer_id, title, ContentType::PdfUri, uri.into())
    }

    pub fn pdf_bytes(printer_id: u64, title: impl Into<String>, pdf: &[u8]) -> Self {
        Self::new(printer_id, title, ContentType::PdfBase64, STANDARD.encode(pdf))
    }

    pub fn raw_uri(printer_id: u64, title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::new(printer_id, title, ContentType::RawUri, uri.into())
    }

    pub fn raw_bytes(printer_id: u64, title: impl Into<String>, raw: &[u8]) -> Self {
        Self::new(printer_id, title, ContentType::RawBase64, STANDARD.encode(raw))
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }

    /// Seconds the job may wait for the printer before it expires
    pub fn with_expire_after(mut self, seconds: u64) -> Self {
        self.expire_after = Some(seconds);
        self
    }

    pub fn with_qty(mut self, qty: u32) -> Self {
        self.qty = Some(qty);
        self
    }
}

/// Body for creating a child account with `POST /account`
#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    #[serde(rename = "Account")]
    pub account: NewAccountDetails,
    #[serde(rename = "ApiKeys", skip_serializing_if = "Vec::is_empty")]
    pub api_keys: Vec<String>,
    #[serde(rename = "Tags", skip_serializing_if = "serde_json::Map::is_empty")]
    pub tags: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAccountDetails {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "creatorRef", skip_serializing_if = "Option::is_none")]
    pub creator_ref: Option<String>,
}

impl NewAccount {
    pub fn new(
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            account: NewAccountDetails {
                firstname: firstname.into(),
                lastname: lastname.into(),
                email: email.into(),
                password: password.into(),
                creator_ref: None,
            },
            api_keys: Vec::new(),
            tags: serde_json::Map::new(),
        }
    }

    pub fn with_creator_ref(mut self, creator_ref: impl Into<String>) -> Self {
        self.account.creator_ref = Some(creator_ref.into());
        self
    }

    pub fn with_api_key(mut self, description: impl Into<String>) -> Self {
        self.api_keys.push(description.into());
        self
    }

    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.tags.insert(name.into(), value.into());
        self
    }
}
