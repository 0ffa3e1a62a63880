use std::time::Duration;

use eyre::WrapErr;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use types::{
    FinancialSummary, Result,
    keuangan::{CashFlowKind, CashTransaction},
    member::{Member, MemberId, MemberUpsert},
    submission::NewSubmission,
};

use crate::config::Config;

trait ReqwestExt {
    async fn try_send<T: DeserializeOwned>(self) -> Result<T>;
    async fn try_send_empty(self) -> Result<()>;
}

impl ReqwestExt for RequestBuilder {
    async fn try_send<T: DeserializeOwned>(self) -> Result<T> {
        let response = self.send().await.wrap_err("backend request failed")?;
        decode(response).await
    }

    async fn try_send_empty(self) -> Result<()> {
        self.send()
            .await
            .wrap_err("backend request failed")?
            .error_for_status()
            .wrap_err("backend rejected request")?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = response
        .error_for_status()
        .wrap_err("backend rejected request")?;
    let body = response
        .bytes()
        .await
        .wrap_err("failed to read backend response")?;

    match serde_json::from_slice(&body) {
        Ok(r) => Ok(r),
        Err(error) => {
            tracing::debug!(?error, len = body.len(), "failed to parse backend response");
            Err(error.into())
        }
    }
}

/// HTTP client for the koperasi backend, which owns all persistence.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
    token: SecretString,
}

impl BackendClient {
    pub fn new(mut base_url: Url, token: SecretString, timeout: Duration) -> Result<Self> {
        // Relative joins drop the last path segment unless it ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .wrap_err("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.backend_url.clone(),
            config.backend_token.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self
            .base_url
            .join(path)
            .wrap_err_with(|| format!("invalid backend path: {path}"))?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;

        Ok(self
            .client
            .request(method, url)
            .bearer_auth(self.token.expose_secret()))
    }

    fn get(&self, path: impl AsRef<str>) -> Result<RequestBuilder> {
        self.request(Method::GET, path.as_ref())
    }

    fn post(&self, path: impl AsRef<str>) -> Result<RequestBuilder> {
        self.request(Method::POST, path.as_ref())
    }

    fn put(&self, path: impl AsRef<str>) -> Result<RequestBuilder> {
        self.request(Method::PUT, path.as_ref())
    }

    fn delete(&self, path: impl AsRef<str>) -> Result<RequestBuilder> {
        self.request(Method::DELETE, path.as_ref())
    }

    pub async fn list_members(&self) -> Result<Vec<Member>> {
        self.get("anggota")?.try_send().await
    }

    /// Returns `None` when the backend has no member with this id.
    pub async fn get_member(&self, id: &MemberId) -> Result<Option<Member>> {
        let response = self
            .get(format!("anggota/{id}"))?
            .send()
            .await
            .wrap_err("backend request failed")?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::info!(%id, "member not found");
            return Ok(None);
        }

        decode(response).await.map(Some)
    }

    /// Create a member (`id` is `None`) or update an existing one.
    pub async fn save_member(&self, id: Option<&MemberId>, member: &MemberUpsert) -> Result<Member> {
        let request = match id {
            Some(id) => self.put(format!("anggota/{id}"))?,
            None => self.post("anggota")?,
        };

        request.json(member).try_send().await
    }

    pub async fn member_summary(&self, id: &MemberId) -> Result<FinancialSummary> {
        self.get(format!("anggota/{id}/ringkasan"))?
            .try_send()
            .await
    }

    pub async fn create_submission(&self, submission: &NewSubmission) -> Result<()> {
        self.post("pengajuan")?
            .json(submission)
            .try_send_empty()
            .await
    }

    pub async fn list_transactions(&self, kind: CashFlowKind) -> Result<Vec<CashTransaction>> {
        self.get("keuangan/transaksi")?
            .query(&[("jenis", kind.label())])
            .try_send()
            .await
    }

    pub async fn delete_transaction(&self, id: &str) -> Result<()> {
        self.delete(format!("keuangan/transaksi/{id}"))?
            .try_send_empty()
            .await
    }
}
