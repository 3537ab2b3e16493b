pub const DEFAULT_BUSY_LABEL: &str = "Loading...";

/// Observable state of the fetch control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub enabled: bool,
    pub label: String,
}

impl ControlState {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            enabled: true,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerPhase {
    Idle,
    Loading,
}

/// How the control shows that a request is in flight.
///
/// Both variants disable the control; they only differ in what happens to the
/// label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusyStrategy {
    /// Swap the label for an in-progress indicator.
    Indicator(String),
    /// Keep the label as it is.
    DisableOnly,
}

impl Default for BusyStrategy {
    fn default() -> Self {
        Self::Indicator(DEFAULT_BUSY_LABEL.to_string())
    }
}

impl BusyStrategy {
    pub fn apply(&self, control: &mut ControlState) {
        control.enabled = false;
        if let Self::Indicator(label) = self {
            control.label = label.clone();
        }
    }
}

/// What one page load shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    pub connected_device: Option<String>,
    pub devices: Vec<String>,
    /// Set when the device list could not be read; `devices` is then empty.
    pub list_error: Option<String>,
}
