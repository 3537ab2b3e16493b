use iced::{
    widget::{button, column, text, Column, Space},
    Element, Length,
};

use crate::domain::{ControlState, PageSnapshot};

/// Main view state
pub struct PageView {
    pub snapshot: PageSnapshot,
    pub device_id: Option<String>,
    pub status_message: String,
}

impl Default for PageView {
    fn default() -> Self {
        Self {
            snapshot: PageSnapshot::default(),
            device_id: None,
            status_message: "Loading page...".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum PageMessage {
    FetchPressed,
}

impl PageView {
    /// `control` is the fetch button's state. A disabled control gets no
    /// press handler, so iced drops clicks on it.
    pub fn view(&self, control: ControlState) -> Element<'_, PageMessage> {
        let heading = match &self.device_id {
            Some(id) => format!("OPUS20 device: {}", id),
            None => "OPUS20 device: none".to_string(),
        };

        let connected = match &self.snapshot.connected_device {
            Some(id) => format!("Connected device: {}", id),
            None => "No device connected".to_string(),
        };

        let devices: Column<'_, PageMessage> = self
            .snapshot
            .devices
            .iter()
            .fold(Column::new().spacing(4), |col, id| {
                col.push(text(format!("• {}", id)).size(14))
            });

        let on_press = control.enabled.then_some(PageMessage::FetchPressed);
        let fetch_data = button(text(control.label))
            .on_press_maybe(on_press)
            .padding([10, 20]);

        column![
            text(heading).size(32),
            Space::new().height(Length::Fixed(20.0)),
            text(connected).size(16),
            text("Stored devices:").size(16),
            devices,
            Space::new().height(Length::Fixed(10.0)),
            text(&self.status_message).size(14),
            Space::new().height(Length::Fixed(20.0)),
            fetch_data,
        ]
        .padding(20)
        .spacing(10)
        .into()
    }
}
