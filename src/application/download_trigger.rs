use crate::{
    api::ApiClient,
    domain::{AppError, BusyStrategy, ControlState, TriggerPhase},
};

/// Text of the blocking notification shown when a fetch fails.
pub const ALERT_MESSAGE: &str = "Request to fetch data failed";

/// One request the trigger wants sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub device_id: String,
}

/// What the page does once the control has been restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Reload,
    Alert(AppError),
}

/// Binds the fetch control to `GET /download/{device_id}`.
///
/// The trigger owns the control state while a request is in flight. The
/// control is disabled on [`activate`](Self::activate) and restored exactly
/// once, on [`resolve`](Self::resolve), whatever the outcome.
#[derive(Debug, Clone)]
pub struct DownloadTrigger {
    device_id: String,
    strategy: BusyStrategy,
    control: ControlState,
    phase: TriggerPhase,
    saved_label: Option<String>,
}

impl DownloadTrigger {
    pub fn new(device_id: impl Into<String>, strategy: BusyStrategy, label: &str) -> Self {
        Self {
            device_id: device_id.into(),
            strategy,
            control: ControlState::new(label),
            phase: TriggerPhase::Idle,
            saved_label: None,
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn control(&self) -> &ControlState {
        &self.control
    }

    pub fn phase(&self) -> TriggerPhase {
        self.phase
    }

    /// Handles a click. Returns `None` when a request is already in flight.
    pub fn activate(&mut self) -> Option<Dispatch> {
        if self.phase == TriggerPhase::Loading || !self.control.enabled {
            tracing::debug!(device_id = %self.device_id, "click ignored, request in flight");
            return None;
        }

        self.saved_label = Some(self.control.label.clone());
        self.strategy.apply(&mut self.control);
        self.phase = TriggerPhase::Loading;

        tracing::info!(device_id = %self.device_id, "requesting data download");
        Some(Dispatch {
            device_id: self.device_id.clone(),
        })
    }

    /// Restores the control, then reports what the page should do next.
    ///
    /// Returns `None` for a completion that arrives while idle.
    pub fn resolve(&mut self, result: Result<(), AppError>) -> Option<Completion> {
        if self.phase != TriggerPhase::Loading {
            tracing::warn!(device_id = %self.device_id, "completion without a request in flight");
            return None;
        }

        self.control.enabled = true;
        if let Some(label) = self.saved_label.take() {
            self.control.label = label;
        }
        self.phase = TriggerPhase::Idle;

        match result {
            Ok(()) => {
                tracing::info!(device_id = %self.device_id, "data download finished, reloading");
                Some(Completion::Reload)
            }
            Err(e) => {
                tracing::error!(device_id = %self.device_id, error = %e, "{}", ALERT_MESSAGE);
                Some(Completion::Alert(e))
            }
        }
    }
}

/// Sends the request for `dispatch`. Any transport error or non-2xx status
/// becomes [`AppError::RequestFailed`].
pub async fn fire(client: ApiClient, dispatch: Dispatch) -> Result<(), AppError> {
    client
        .trigger_download(&dispatch.device_id)
        .await
        .map_err(|e| AppError::RequestFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiConfig;
    use crate::domain::model::DEFAULT_BUSY_LABEL;
    use url::Url;

    const LABEL: &str = "Fetch data";

    fn trigger() -> DownloadTrigger {
        DownloadTrigger::new("0x1234", BusyStrategy::default(), LABEL)
    }

    fn client_for(url: &str) -> ApiClient {
        ApiClient::new(ApiConfig::new(Url::parse(url).unwrap()))
    }

    #[test]
    fn test_activate_disables_before_dispatch() {
        let mut trigger = trigger();
        let dispatch = trigger.activate().unwrap();

        assert_eq!(dispatch.device_id, "0x1234");
        assert_eq!(trigger.phase(), TriggerPhase::Loading);
        assert!(!trigger.control().enabled);
        assert_eq!(trigger.control().label, DEFAULT_BUSY_LABEL);
    }

    #[test]
    fn test_second_click_while_loading_dispatches_nothing() {
        let mut trigger = trigger();
        assert!(trigger.activate().is_some());
        assert!(trigger.activate().is_none());
        assert_eq!(trigger.phase(), TriggerPhase::Loading);
    }

    #[test]
    fn test_success_restores_control_and_reloads() {
        let mut trigger = trigger();
        trigger.activate();

        assert_eq!(trigger.resolve(Ok(())), Some(Completion::Reload));
        assert_eq!(trigger.control(), &ControlState::new(LABEL));
        assert_eq!(trigger.phase(), TriggerPhase::Idle);
    }

    #[test]
    fn test_failure_restores_control_and_alerts() {
        let mut trigger = trigger();
        trigger.activate();

        let err = AppError::RequestFailed("boom".to_string());
        assert_eq!(
            trigger.resolve(Err(err.clone())),
            Some(Completion::Alert(err))
        );
        assert_eq!(trigger.control(), &ControlState::new(LABEL));
    }

    #[test]
    fn test_restores_only_once() {
        let mut trigger = trigger();
        trigger.activate();
        assert!(trigger.resolve(Ok(())).is_some());
        assert!(trigger.resolve(Ok(())).is_none());
        assert!(trigger.control().enabled);
    }

    #[test]
    fn test_disable_only_keeps_label_throughout() {
        let mut trigger = DownloadTrigger::new("0x1234", BusyStrategy::DisableOnly, LABEL);
        trigger.activate();
        assert!(!trigger.control().enabled);
        assert_eq!(trigger.control().label, LABEL);

        trigger.resolve(Err(AppError::RequestFailed("boom".to_string())));
        assert_eq!(trigger.control(), &ControlState::new(LABEL));
    }

    #[test]
    fn test_can_fire_again_after_resolution() {
        let mut trigger = trigger();
        trigger.activate();
        trigger.resolve(Ok(()));
        assert!(trigger.activate().is_some());
    }

    #[tokio::test]
    async fn test_ok_response_reloads_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/download/0x1234")
            .with_status(200)
            .with_body(r#"{"success": true}"#)
            .expect(1)
            .create_async()
            .await;

        let mut trigger = trigger();
        let dispatch = trigger.activate().unwrap();
        let result = fire(client_for(&server.url()), dispatch).await;

        assert_eq!(trigger.resolve(result), Some(Completion::Reload));
        assert_eq!(trigger.control(), &ControlState::new(LABEL));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_alerts_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/download/0x1234")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let mut trigger = trigger();
        let dispatch = trigger.activate().unwrap();
        let result = fire(client_for(&server.url()), dispatch).await;

        assert!(matches!(
            trigger.resolve(result),
            Some(Completion::Alert(AppError::RequestFailed(_)))
        ));
        assert_eq!(trigger.control(), &ControlState::new(LABEL));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_network_failure_alerts_once() {
        let mut trigger = trigger();
        let dispatch = trigger.activate().unwrap();
        let result = fire(client_for("http://127.0.0.1:1/"), dispatch).await;

        assert!(matches!(
            trigger.resolve(result),
            Some(Completion::Alert(AppError::RequestFailed(_)))
        ));
        assert_eq!(trigger.control(), &ControlState::new(LABEL));
    }
}
