use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Request to fetch data failed: {0}")]
    RequestFailed(String),

    #[error("Could not load page: {0}")]
    PageLoad(String),

    #[error("No device id configured and no device connected")]
    MissingDevice,
}
