use serde::Deserialize;
use url::Url;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:45067/";

/// Response from the /list/devices endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceList {
    #[serde(default)]
    pub devices: Vec<String>,
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
}

impl ApiConfig {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }
}
