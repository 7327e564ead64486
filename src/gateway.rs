use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::auth::CredentialFields;
use crate::client::{AuthenticatedClient, ClientOptions};
use crate::error::{PrintNodeError, Result};
use crate::models::{
    Account, ClientDownload, Computer, NewAccount, PrintJob, PrintJobRequest, PrintJobState,
    Printer, Scale,
};

/// Unreserved characters stay as-is in path segments.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

fn parse<T: DeserializeOwned>(payload: Value) -> Result<T> {
    Ok(serde_json::from_value(payload)?)
}

/// Resource-level access to the PrintNode API
#[derive(Debug, Clone)]
pub struct Gateway {
    client: AuthenticatedClient,
}

impl Gateway {
    pub fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    pub fn from_fields(options: ClientOptions, fields: CredentialFields) -> Result<Self> {
        Ok(Self::new(AuthenticatedClient::from_fields(options, fields)?))
    }

    /// The underlying client, for endpoints without a dedicated accessor
    pub fn client(&self) -> &AuthenticatedClient {
        &self.client
    }

    // Account

    pub async fn account(&self) -> Result<Account> {
        parse(self.client.get("whoami", None).await?)
    }

    /// Create a child account. Needs an account that can create sub-accounts.
    pub async fn create_account(&self, account: &NewAccount) -> Result<Account> {
        let body = serde_json::to_value(account)?;
        let mut payload = self.client.post("account", Some(&body), None).await?;
        // The response wraps the account next to its keys and tags
        match payload.get_mut("Account").map(Value::take) {
            Some(account) => parse(account),
            None => parse(payload),
        }
    }

    pub async fn modify_account(&self, changes: &Value) -> Result<Account> {
        parse(self.client.patch("account", Some(changes), None).await?)
    }

    pub async fn delete_account(&self) -> Result<Value> {
        self.client.delete("account", None).await
    }

    pub async fn tag(&self, name: &str) -> Result<Value> {
        self.client
            .get(&format!("account/tag/{}", segment(name)), None)
            .await
    }

    pub async fn modify_tag(&self, name: &str, value: &str) -> Result<Value> {
        self.client
            .post(
                &format!("account/tag/{}", segment(name)),
                Some(&Value::String(value.to_string())),
                None,
            )
            .await
    }

    pub async fn delete_tag(&self, name: &str) -> Result<Value> {
        self.client
            .delete(&format!("account/tag/{}", segment(name)), None)
            .await
    }

    pub async fn api_key(&self, description: &str) -> Result<String> {
        parse(
            self.client
                .get(&format!("account/apikey/{}", segment(description)), None)
                .await?,
        )
    }

    /// Returns the newly created key
    pub async fn create_api_key(&self, description: &str) -> Result<String> {
        parse(
            self.client
                .post(&format!("account/apikey/{}", segment(description)), None, None)
                .await?,
        )
    }

    pub async fn delete_api_key(&self, description: &str) -> Result<Value> {
        self.client
            .delete(&format!("account/apikey/{}", segment(description)), None)
            .await
    }

    /// Client key for an integrator-distributed client build
    pub async fn clientkey(&self, uuid: &str, edition: &str, version: &str) -> Result<String> {
        let endpoint = format!(
            "client/key/{}?edition={}&version={}",
            segment(uuid),
            segment(edition),
            segment(version)
        );
        parse(self.client.get(&endpoint, None).await?)
    }

    pub async fn clients(&self) -> Result<Vec<ClientDownload>> {
        parse(self.client.get("download/clients", None).await?)
    }

    pub async fn modify_client_downloads(&self, client_id: u64, enabled: bool) -> Result<Value> {
        self.client
            .patch(
                &format!("download/clients/{}", client_id),
                Some(&json!({ "enabled": enabled })),
                None,
            )
            .await
    }

    // Computers and printers

    pub async fn computers(&self) -> Result<Vec<Computer>> {
        parse(self.client.get("computers", None).await?)
    }

    pub async fn printers(&self) -> Result<Vec<Printer>> {
        parse(self.client.get("printers", None).await?)
    }

    pub async fn printers_on(&self, computer_id: u64) -> Result<Vec<Printer>> {
        parse(
            self.client
                .get(&format!("computers/{}/printers", computer_id), None)
                .await?,
        )
    }

    // Scales

    /// Latest readings from every scale on a computer
    pub async fn scales(&self, computer_id: u64) -> Result<Vec<Scale>> {
        parse(
            self.client
                .get(&format!("computer/{}/scales", computer_id), None)
                .await?,
        )
    }

    pub async fn scales_named(&self, computer_id: u64, device_name: &str) -> Result<Vec<Scale>> {
        parse(
            self.client
                .get(
                    &format!("computer/{}/scales/{}", computer_id, segment(device_name)),
                    None,
                )
                .await?,
        )
    }

    /// One device; the API answers 404 when it has no recent reading
    pub async fn scale(
        &self,
        computer_id: u64,
        device_name: &str,
        device_num: u32,
    ) -> Result<Scale> {
        let endpoint = format!(
            "computer/{}/scale/{}/{}",
            computer_id,
            segment(device_name),
            device_num
        );
        parse(self.client.get(&endpoint, None).await?)
    }

    // Print jobs

    pub async fn printjobs(&self) -> Result<Vec<PrintJob>> {
        parse(self.client.get("printjobs", None).await?)
    }

    pub async fn printjobs_for_printer(&self, printer_id: u64) -> Result<Vec<PrintJob>> {
        parse(
            self.client
                .get(&format!("printers/{}/printjobs", printer_id), None)
                .await?,
        )
    }

    pub async fn printjob(&self, id: u64) -> Result<PrintJob> {
        let jobs: Vec<PrintJob> = parse(
            self.client
                .get(&format!("printjobs/{}", id), None)
                .await?,
        )?;
        jobs.into_iter()
            .next()
            .ok_or_else(|| PrintNodeError::NotFound(format!("print job {}", id)))
    }

    /// State history for every print job, one list per job
    pub async fn states(&self) -> Result<Vec<Vec<PrintJobState>>> {
        parse(self.client.get("printjobs/states", None).await?)
    }

    /// Submit a job and return its id
    pub async fn submit_printjob(&self, request: &PrintJobRequest) -> Result<u64> {
        let body = serde_json::to_value(request)?;
        parse(self.client.post("printjobs", Some(&body), None).await?)
    }

    /// Submit a job, then fetch it back
    pub async fn print(&self, request: &PrintJobRequest) -> Result<PrintJob> {
        let id = self.submit_printjob(request).await?;
        self.printjob(id).await
    }

    // Test data

    pub async fn generate_test_data(&self) -> Result<Value> {
        self.client.get("test/data/generate", None).await
    }

    pub async fn delete_test_data(&self) -> Result<Value> {
        self.client.delete("test/data/generate", None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("plain-name_1.0~x"), "plain-name_1.0~x");
        assert_eq!(segment("my tag"), "my%20tag");
        assert_eq!(segment("a/b?c"), "a%2Fb%3Fc");
    }
}
