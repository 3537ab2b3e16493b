use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

use super::models::{ApiConfig, DeviceList};
use crate::domain::PageSnapshot;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Server responded with {0}")]
    Status(StatusCode),

    #[error("Server URL cannot take a path: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    ///
    /// A segment containing `/` stays a single segment (`%2F`).
    pub fn endpoint<I>(&self, segments: I) -> Result<Url>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.config.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response> {
        tracing::debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        Ok(response)
    }

    /// Asks the server to pull the logs of `device_id`. The body is ignored.
    pub async fn trigger_download(&self, device_id: &str) -> Result<()> {
        let url = self.endpoint(["download", device_id])?;
        self.get(url).await?;
        Ok(())
    }

    /// Id of the device the server is attached to, if any.
    pub async fn connected_device(&self) -> Result<Option<String>> {
        let url = self.endpoint(["connected", "device"])?;
        let body = self.get(url).await?.text().await?;
        let id = body.trim();
        Ok((!id.is_empty()).then(|| id.to_string()))
    }

    pub async fn list_devices(&self) -> Result<Vec<String>> {
        let url = self.endpoint(["list", "devices"])?;
        let list: DeviceList = self
            .get(url)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))?;
        Ok(list.devices)
    }

    /// Everything a page load shows, fetched concurrently.
    ///
    /// Only the connected device is required. A failed device list is kept
    /// in `list_error` and the list is left empty.
    pub async fn page_snapshot(&self) -> Result<PageSnapshot> {
        let (connected_device, devices) =
            futures::join!(self.connected_device(), self.list_devices());
        let connected_device = connected_device?;

        let (devices, list_error) = match devices {
            Ok(devices) => (devices, None),
            Err(e) => {
                tracing::warn!(error = %e, "device list unavailable");
                (Vec::new(), Some(e.to_string()))
            }
        };

        Ok(PageSnapshot {
            connected_device,
            devices,
            list_error,
        })
    }
}
