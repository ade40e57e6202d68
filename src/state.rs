use crate::events::StatePayload;
use crate::models::{Settings, Task};
use crate::store::TaskStore;
use crate::theme::Palette;

/// Session state owned by the presentation host and passed to every command.
#[derive(Debug, Default)]
pub struct AppState {
    store: TaskStore,
    settings: Settings,
}

impl AppState {
    pub fn new(tasks: Vec<Task>, settings: Settings) -> Self {
        Self {
            store: TaskStore::new(tasks),
            settings,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TaskStore {
        &mut self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn payload(&self) -> StatePayload {
        StatePayload {
            tasks: self.store.tasks().to_vec(),
            settings: self.settings.clone(),
            palette: Palette::resolve(&self.settings),
        }
    }
}
