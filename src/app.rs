use crate::api::ApiClient;
use crate::application::{self, Completion, DownloadTrigger, ALERT_MESSAGE};
use crate::config::{Config, FETCH_LABEL};
use crate::domain::{AppError, BusyStrategy, ControlState, PageSnapshot, TriggerPhase};
use crate::ui::{PageMessage, PageView};
use iced::Task;

pub struct ViewerApp {
    view: PageView,
    api_client: ApiClient,
    configured_device: Option<String>,
    strategy: BusyStrategy,
    // Bound once a device id is known
    trigger: Option<DownloadTrigger>,
    // The page is blocked while the failure alert is open
    alert_open: bool,
}

impl ViewerApp {
    /// Builds the page and starts its first load.
    pub fn new(config: &Config) -> (Self, Task<Message>) {
        let strategy = config.busy_strategy();
        let configured_device = config.configured_device();
        let trigger = configured_device
            .as_ref()
            .map(|id| DownloadTrigger::new(id.clone(), strategy.clone(), FETCH_LABEL));

        let view = PageView {
            device_id: configured_device.clone(),
            ..PageView::default()
        };

        let app = Self {
            view,
            api_client: ApiClient::new(config.api_config()),
            configured_device,
            strategy,
            trigger,
            alert_open: false,
        };
        let task = app.load_page();
        (app, task)
    }

    fn load_page(&self) -> Task<Message> {
        let api_client = self.api_client.clone();
        Task::perform(
            async move {
                api_client
                    .page_snapshot()
                    .await
                    .map_err(|e| e.to_string())
            },
            Message::PageLoaded,
        )
    }

    /// The fetch control as the page shows it.
    fn control(&self) -> ControlState {
        let mut control = match &self.trigger {
            Some(trigger) => trigger.control().clone(),
            None => ControlState {
                enabled: false,
                label: FETCH_LABEL.to_string(),
            },
        };
        control.enabled &= !self.alert_open;
        control
    }

    /// Binds the trigger to the device this page load names.
    ///
    /// A configured id is fixed for the whole session. Otherwise every load
    /// rebinds to the server's connected device, unless a request is in flight.
    fn bind_trigger(&mut self, snapshot: &PageSnapshot) {
        let device_id = self
            .configured_device
            .clone()
            .or_else(|| snapshot.connected_device.clone());

        if let Some(trigger) = &self.trigger {
            if trigger.phase() == TriggerPhase::Loading
                || Some(trigger.device_id()) == device_id.as_deref()
            {
                return;
            }
        }

        match device_id {
            Some(id) => {
                tracing::info!(device_id = %id, "binding fetch control");
                self.view.device_id = Some(id.clone());
                self.trigger = Some(DownloadTrigger::new(id, self.strategy.clone(), FETCH_LABEL));
            }
            None => {
                tracing::warn!("{}", AppError::MissingDevice);
                self.view.device_id = None;
                self.view.status_message = AppError::MissingDevice.to_string();
                self.trigger = None;
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(PageMessage),
    PageLoaded(Result<PageSnapshot, String>),
    DownloadFinished(Result<(), AppError>),
    AlertDismissed,
}

async fn show_alert() {
    rfd::AsyncMessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("OPUS20 Viewer")
        .set_description(ALERT_MESSAGE)
        .set_buttons(rfd::MessageButtons::Ok)
        .show()
        .await;
}

pub fn update(app: &mut ViewerApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(PageMessage::FetchPressed) => {
            if app.alert_open {
                return Task::none();
            }
            let Some(trigger) = app.trigger.as_mut() else {
                return Task::none();
            };

            if let Some(dispatch) = trigger.activate() {
                app.view.status_message = format!("Fetching data for: {}", dispatch.device_id);
                let api_client = app.api_client.clone();
                return Task::perform(
                    application::fire(api_client, dispatch),
                    Message::DownloadFinished,
                );
            }
        }
        Message::PageLoaded(result) => match result {
            Ok(snapshot) => {
                app.view.status_message = match &snapshot.list_error {
                    Some(e) => format!("Could not list devices: {}", e),
                    None => "Ready".to_string(),
                };
                app.bind_trigger(&snapshot);
                app.view.snapshot = snapshot;
            }
            Err(e) => {
                let err = AppError::PageLoad(e);
                tracing::warn!(error = %err, "page load failed");
                app.view.status_message = err.to_string();
            }
        },
        Message::DownloadFinished(result) => {
            let Some(trigger) = app.trigger.as_mut() else {
                return Task::none();
            };

            // Control state is restored inside resolve, before any reload or alert
            match trigger.resolve(result) {
                Some(Completion::Reload) => {
                    app.view.status_message = "Reloading...".to_string();
                    return app.load_page();
                }
                Some(Completion::Alert(e)) => {
                    app.view.status_message = e.to_string();
                    app.alert_open = true;
                    return Task::perform(show_alert(), |_| Message::AlertDismissed);
                }
                None => {}
            }
        }
        Message::AlertDismissed => {
            app.alert_open = false;
        }
    }
    Task::none()
}

pub fn view(app: &ViewerApp) -> iced::Element<'_, Message> {
    app.view.view(app.control()).map(Message::UiMessage)
}
