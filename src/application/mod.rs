pub mod download_trigger;

pub use download_trigger::{fire, Completion, DownloadTrigger, ALERT_MESSAGE};
