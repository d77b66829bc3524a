use crate::{
    backend::{BackendConfig, Credentials, LeadBackend},
    domain::{Lead, LeadId, StatusChangeCommand},
    error::{LeadsError, Result},
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

const FETCH_PATH: &str = "LeadsGenerate/FetchAndSaveData";
const UPDATE_STATUS_PATH: &str = "Leads/UpdateLeadStatus";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeadsResponse {
    leads_list: Vec<Value>,
}

/// Decodes each record on its own, dropping the ones that cannot be read
fn decode_leads(records: Vec<Value>) -> Vec<Lead> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(position, record)| match Lead::from_value(record) {
            Ok(lead) => Some(lead),
            Err(e) => {
                warn!(position, error = %e, "skipping unreadable lead record");
                None
            }
        })
        .collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct UpdateStatusRequest<'a> {
    lead_id: &'a LeadId,
    leads_status: i64,
    #[serde(rename = "UserID")]
    user_id: &'a str,
}

/// Leads backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
    user_id: String,
    credentials: Credentials,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig, credentials: Credentials) -> Result<Self> {
        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| LeadsError::ConfigError(format!("invalid base url '{}': {}", base, e)))?;

        let client = reqwest::Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url,
            user_id: config.user_id.clone(),
            credentials,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| LeadsError::ConfigError(format!("invalid endpoint '{}': {}", path, e)))
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(token) = self.credentials.bearer() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| LeadsError::ConfigError(format!("invalid auth header: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

#[async_trait]
impl LeadBackend for HttpBackend {
    async fn fetch_leads(&self) -> Result<Vec<Lead>> {
        let url = self.endpoint(FETCH_PATH)?;
        debug!(%url, "fetching leads");

        let response = self
            .client
            .get(url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| LeadsError::Fetch(e.to_string()))?;

        let body: LeadsResponse = response
            .json()
            .await
            .map_err(|e| LeadsError::Fetch(e.to_string()))?;

        Ok(decode_leads(body.leads_list))
    }

    async fn update_lead_status(&self, command: &StatusChangeCommand) -> Result<()> {
        let url = self.endpoint(UPDATE_STATUS_PATH)?;
        let body = UpdateStatusRequest {
            lead_id: &command.lead_id,
            leads_status: command.new_status.ordinal(),
            user_id: &self.user_id,
        };
        debug!(%url, lead_id = %command.lead_id, status = %command.new_status, "updating lead status");

        self.client
            .put(url)
            .headers(self.auth_headers()?)
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| LeadsError::StatusUpdate(e.to_string()))?;

        Ok(())
    }
}
