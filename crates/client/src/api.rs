use async_trait::async_trait;
use tracing::{info, instrument};

use common::types::{Ack, CreateRecordBody, ErrorBody, RegistrationRecord};

use crate::errors::RequestError;

/// The two record-service operations the form uses.
#[async_trait]
pub trait RecordsApi: Send + Sync {
    async fn create(&self, body: &CreateRecordBody) -> Result<Ack, RequestError>;
    async fn list(&self) -> Result<Vec<RegistrationRecord>, RequestError>;
}

/// reqwest client for `POST /records` and `GET /records`.
pub struct HttpRecordsClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRecordsClient {
    pub fn new(base_url: &str) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.trim_end_matches('/').to_string() }
    }

    fn records_url(&self) -> String {
        format!("{}/records", self.base_url)
    }
}

/// Turn a non-2xx response into `RequestError::Status`, keeping the service's
/// `{ "error": ... }` text when there is one.
async fn error_from(resp: reqwest::Response) -> RequestError {
    let status = resp.status();
    let message = match resp.json::<ErrorBody>().await {
        Ok(b) => b.error,
        Err(_) => status.canonical_reason().unwrap_or("unknown status").to_string(),
    };
    RequestError::Status { status: status.as_u16(), message }
}

#[async_trait]
impl RecordsApi for HttpRecordsClient {
    #[instrument(skip(self, body), fields(cpf = %body.cpf))]
    async fn create(&self, body: &CreateRecordBody) -> Result<Ack, RequestError> {
        let resp = self.http.post(self.records_url()).json(body).send().await?;
        if !resp.status().is_success() {
            return Err(error_from(resp).await);
        }
        let ack = resp.json::<Ack>().await?;
        info!(message = %ack.message, "record created");
        Ok(ack)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<RegistrationRecord>, RequestError> {
        let resp = self.http.get(self.records_url()).send().await?;
        if !resp.status().is_success() {
            return Err(error_from(resp).await);
        }
        Ok(resp.json::<Vec<RegistrationRecord>>().await?)
    }
}
