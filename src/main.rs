mod api;
mod app;
mod application;
mod config;
mod domain;
mod ui;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> iced::Result {
    dotenvy::dotenv().ok();
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::Config::parse();
    tracing::info!(server_url = %config.server_url, "starting viewer");

    iced::application(
        move || app::ViewerApp::new(&config),
        app::update,
        app::view,
    )
    .title("OPUS20 Viewer")
    .run()
}
