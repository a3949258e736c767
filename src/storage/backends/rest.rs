//! PostgREST-style hosted backend (Supabase tables over HTTP)

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::BackendSettings;
use crate::model::{Asset, LogEntry, NewAsset, NewLogEntry};
use crate::storage::{
    error::{StorageError, StorageResult},
    traits::LogStore,
};

const ASSETS_TABLE: &str = "assets";
const LOGS_TABLE: &str = "logs";

/// Which failures allow a request to be sent again
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Resend {
    /// Reads and whole-table updates: any transient failure
    Transient,
    /// Inserts: only failures where the backend did not apply the request
    Unapplied,
}

/// Log store backed by the hosted REST API
pub struct RestBackend {
    client: Client,
    base_url: String,
    api_key: String,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl RestBackend {
    /// Create a backend from connection settings
    pub fn new(url: &str, api_key: &str, settings: &BackendSettings) -> StorageResult<Self> {
        if url.trim().is_empty() {
            return Err(StorageError::configuration("backend url is empty"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: url.trim().trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            max_retries: settings.max_retries,
            retry_delay_ms: settings.retry_delay_ms,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Send a request built by `build`, retrying failures allowed by `resend`
    async fn execute(
        &self,
        resend: Resend,
        build: impl Fn() -> RequestBuilder,
    ) -> StorageResult<Vec<u8>> {
        let mut retry_count = 0;
        loop {
            match self.execute_once(build()).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    let may_resend = match resend {
                        Resend::Transient => e.is_retryable(),
                        Resend::Unapplied => e.is_unapplied(),
                    };
                    if retry_count >= self.max_retries || !may_resend {
                        return Err(e);
                    }

                    retry_count += 1;
                    let delay = self.calculate_backoff(retry_count);
                    warn!(
                        "Backend request failed ({}), retry {}/{} in {}ms",
                        e, retry_count, self.max_retries, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                }
            }
        }
    }

    async fn execute_once(&self, request: RequestBuilder) -> StorageResult<Vec<u8>> {
        let response = self.authorized(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        resend: Resend,
        build: impl Fn() -> RequestBuilder,
    ) -> StorageResult<T> {
        let body = self.execute(resend, build).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Exponential backoff delay for the given retry attempt
    fn calculate_backoff(&self, retry_count: u32) -> u64 {
        self.retry_delay_ms * 2u64.pow(retry_count.saturating_sub(1))
    }

    async fn select_active<T: DeserializeOwned>(&self, table: &str) -> StorageResult<Vec<T>> {
        let url = self.table_url(table);
        self.execute_json(Resend::Transient, || {
            self.client
                .get(&url)
                .query(&[("select", "*"), ("deleted", "is.false")])
        })
        .await
    }

    async fn mark_all_deleted(&self, table: &str) -> StorageResult<()> {
        let url = self.table_url(table);
        self.execute(Resend::Transient, || {
            self.client
                .patch(&url)
                .query(&[("id", "not.is.null")])
                .header("Prefer", "return=minimal")
                .json(&json!({ "deleted": true }))
        })
        .await?;
        Ok(())
    }
}

#[async_trait]
impl LogStore for RestBackend {
    async fn insert_asset(&self, asset: NewAsset) -> StorageResult<Asset> {
        let url = self.table_url(ASSETS_TABLE);
        let mut rows: Vec<Asset> = self
            .execute_json(Resend::Unapplied, || {
                self.client
                    .post(&url)
                    .header("Prefer", "return=representation")
                    .json(&asset)
            })
            .await?;

        if rows.is_empty() {
            return Err(StorageError::not_found(format!(
                "backend returned no row for inserted asset '{}'",
                asset.name
            )));
        }
        let stored = rows.swap_remove(0);
        debug!("Inserted asset {} as {}", stored.name, stored.id);
        Ok(stored)
    }

    async fn insert_logs(&self, logs: Vec<NewLogEntry>) -> StorageResult<usize> {
        if logs.is_empty() {
            return Ok(0);
        }

        let url = self.table_url(LOGS_TABLE);
        let rows: Vec<serde_json::Value> = self
            .execute_json(Resend::Unapplied, || {
                self.client
                    .post(&url)
                    .header("Prefer", "return=representation")
                    .json(&logs)
            })
            .await?;
        Ok(rows.len())
    }

    async fn list_assets(&self) -> StorageResult<Vec<Asset>> {
        self.select_active(ASSETS_TABLE).await
    }

    async fn list_logs(&self) -> StorageResult<Vec<LogEntry>> {
        self.select_active(LOGS_TABLE).await
    }

    async fn soft_delete_all(&self) -> StorageResult<()> {
        self.mark_all_deleted(LOGS_TABLE).await?;
        self.mark_all_deleted(ASSETS_TABLE).await
    }

    fn backend_name(&self) -> &'static str {
        "rest"
    }
}
