use clap::{Parser, ValueEnum};
use url::Url;

use crate::api::{models::DEFAULT_SERVER_URL, ApiConfig};
use crate::domain::{model::DEFAULT_BUSY_LABEL, BusyStrategy};

pub const FETCH_LABEL: &str = "Fetch data";

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[clap(rename_all = "lowercase")]
pub enum BusyStyle {
    /// Disable the control and show the busy label
    #[default]
    Indicator,
    /// Disable the control and keep its label
    Disable,
}

/// Desktop viewer for an OPUS20 logger web server
#[derive(Parser, Debug, Clone)]
#[command(name = "opus20-viewer", version)]
pub struct Config {
    /// Base URL of the OPUS20 web server
    #[clap(long, env = "OPUS20_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: Url,

    /// Device to fetch data for. Defaults to the device the server is connected to
    #[clap(long, env = "OPUS20_DEVICE_ID")]
    pub device_id: Option<String>,

    /// How the fetch button shows a request in flight
    #[clap(long, env = "OPUS20_BUSY_STYLE", value_enum, default_value = "indicator")]
    pub busy_style: BusyStyle,

    /// Label shown while a request is in flight (indicator style only)
    #[clap(long, env = "OPUS20_BUSY_LABEL", default_value = DEFAULT_BUSY_LABEL)]
    pub busy_label: String,
}

impl Config {
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.server_url.clone())
    }

    /// The configured device id, trimmed. Blank counts as not configured.
    pub fn configured_device(&self) -> Option<String> {
        self.device_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }

    pub fn busy_strategy(&self) -> BusyStrategy {
        match self.busy_style {
            BusyStyle::Indicator => BusyStrategy::Indicator(self.busy_label.clone()),
            BusyStyle::Disable => BusyStrategy::DisableOnly,
        }
    }
}
