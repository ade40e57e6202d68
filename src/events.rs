use crate::models::{Settings, Task};
use crate::theme::Palette;

/// Snapshot handed to the host after every state change.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StatePayload {
    pub tasks: Vec<Task>,
    pub settings: Settings,
    pub palette: Palette,
}
