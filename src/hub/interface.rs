/// The hub's text device as seen when its value changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub unit: u8,
    pub device_id: u32,
    pub value: String,
}

/// Lifecycle hooks the hub calls, one at a time and never concurrently.
/// Implementations report through the log and must not fail the hub.
pub trait HubPlugin {
    fn on_start(&mut self);
    fn on_text_field_changed(&mut self, field: &TextField);
    fn on_stop(&mut self);
}
