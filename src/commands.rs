//! Calls the presentation layer makes into the core. Each returns a
//! [`CommandResult`] the host can render directly or forward as JSON.

use serde::Serialize;

use crate::error::{Error, ErrorKind, Result};
use crate::events::StatePayload;
use crate::models::{Settings, Task};
use crate::state::AppState;
use crate::storage::Persistence;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<CommandError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Destructive actions the host may be asked to confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confirmation {
    DeleteTask,
    MassDelete,
}

impl Confirmation {
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirmation::DeleteTask => "Are you sure you want to delete this task?",
            Confirmation::MassDelete => {
                "Are you sure you want to delete ALL tasks?\nThis will permanently remove all tasks from the list."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MassDelete {
    NothingToDelete,
    Cancelled,
    Archived { count: usize },
}

/// What the core needs from the host: a place to persist, a sink for state
/// snapshots and a yes/no answer for destructive actions.
pub trait CommandCtx {
    type Storage: Persistence;

    fn storage(&self) -> &Self::Storage;
    fn emit_state_updated(&self, payload: StatePayload);
    fn confirm(&self, request: Confirmation) -> bool;
}

fn ok<T>(data: T) -> CommandResult<T> {
    CommandResult {
        ok: true,
        data: Some(data),
        error: None,
    }
}

fn err<T>(error: Error) -> CommandResult<T> {
    log::warn!("command failed kind={:?}: {error}", error.kind());
    CommandResult {
        ok: false,
        data: None,
        error: Some(CommandError {
            kind: error.kind(),
            message: error.to_string(),
        }),
    }
}

/// Publishes the new state and, with auto-save on, writes the task file. A failed
/// save is reported but the in-memory change stays.
fn commit(ctx: &impl CommandCtx, state: &AppState) -> Result<()> {
    ctx.emit_state_updated(state.payload());
    if state.settings().auto_save {
        ctx.storage().save_tasks(state.tasks())?;
    }
    Ok(())
}

fn confirmed(ctx: &impl CommandCtx, state: &AppState, request: Confirmation) -> bool {
    !state.settings().show_confirm_dialogs || ctx.confirm(request)
}

fn selected_index(state: &AppState, selection: Option<usize>) -> Result<usize> {
    let index = selection.ok_or(Error::NoSelection)?;
    if index >= state.store().len() {
        return Err(Error::OutOfRange {
            index,
            len: state.store().len(),
        });
    }
    Ok(index)
}

/// Startup: settings first, then tasks. Whatever loads is installed even when the
/// other half fails; the first failure is reported.
pub fn load_state(ctx: &impl CommandCtx, state: &mut AppState) -> CommandResult<StatePayload> {
    let mut failure: Option<Error> = None;

    let settings = match ctx.storage().load_settings() {
        Ok(settings) => settings,
        Err(error) => {
            log::warn!("settings unreadable, using defaults: {error}");
            failure = Some(error.into());
            Settings::default()
        }
    };
    state.update_settings(settings);

    let tasks = match ctx.storage().load_tasks() {
        Ok(tasks) => tasks,
        Err(error) => {
            log::warn!("task file unreadable, starting empty: {error}");
            if failure.is_none() {
                failure = Some(error.into());
            }
            Vec::new()
        }
    };
    state.store_mut().replace_all(tasks);
    log::info!("state loaded tasks={}", state.store().len());

    ctx.emit_state_updated(state.payload());
    match failure {
        Some(error) => err(error),
        None => ok(state.payload()),
    }
}

pub fn add_task(ctx: &impl CommandCtx, state: &mut AppState, text: &str) -> CommandResult<Task> {
    let task = match state.store_mut().add(text) {
        Ok(task) => task,
        Err(error) => return err(error),
    };
    if let Err(error) = commit(ctx, state) {
        return err(error);
    }
    ok(task)
}

pub fn toggle_complete(
    ctx: &impl CommandCtx,
    state: &mut AppState,
    selection: Option<usize>,
) -> CommandResult<Task> {
    let task = match selected_index(state, selection)
        .and_then(|index| state.store_mut().toggle_complete(index))
    {
        Ok(task) => task,
        Err(error) => return err(error),
    };
    if let Err(error) = commit(ctx, state) {
        return err(error);
    }
    ok(task)
}

/// Returns `None` when the host declined the confirmation.
pub fn delete_task(
    ctx: &impl CommandCtx,
    state: &mut AppState,
    selection: Option<usize>,
) -> CommandResult<Option<Task>> {
    let index = match selected_index(state, selection) {
        Ok(index) => index,
        Err(error) => return err(error),
    };
    if !confirmed(ctx, state, Confirmation::DeleteTask) {
        return ok(None);
    }
    let removed = match state.store_mut().delete(index) {
        Ok(task) => task,
        Err(error) => return err(error),
    };
    if let Err(error) = commit(ctx, state) {
        return err(error);
    }
    ok(Some(removed))
}

/// Archives every task, then clears the list. If archiving fails nothing is removed.
pub fn mass_delete(ctx: &impl CommandCtx, state: &mut AppState) -> CommandResult<MassDelete> {
    if state.store().is_empty() {
        return ok(MassDelete::NothingToDelete);
    }
    if !confirmed(ctx, state, Confirmation::MassDelete) {
        return ok(MassDelete::Cancelled);
    }
    if let Err(error) = ctx.storage().archive_tasks(state.tasks()) {
        return err(error.into());
    }
    let removed = state.store_mut().clear_all();
    if let Err(error) = commit(ctx, state) {
        return err(error);
    }
    ok(MassDelete::Archived {
        count: removed.len(),
    })
}

pub fn save_now(ctx: &impl CommandCtx, state: &AppState) -> CommandResult<usize> {
    match ctx.storage().save_tasks(state.tasks()) {
        Ok(()) => ok(state.store().len()),
        Err(error) => err(error.into()),
    }
}

/// Replaces the list with the file contents. With no task file, or on failure, the
/// current list is kept; the untouched list is returned in the first case.
pub fn load_now(ctx: &impl CommandCtx, state: &mut AppState) -> CommandResult<Vec<Task>> {
    if !ctx.storage().tasks_exist() {
        log::info!("no task file to load, keeping {} tasks", state.store().len());
        return ok(state.tasks().to_vec());
    }
    let tasks = match ctx.storage().load_tasks() {
        Ok(tasks) => tasks,
        Err(error) => return err(error.into()),
    };
    state.store_mut().replace_all(tasks.clone());
    ctx.emit_state_updated(state.payload());
    ok(tasks)
}

/// Applies the settings, then writes them. They stay applied even if the write fails.
pub fn save_settings(
    ctx: &impl CommandCtx,
    state: &mut AppState,
    settings: Settings,
) -> CommandResult<Settings> {
    state.update_settings(settings.clone());
    ctx.emit_state_updated(state.payload());
    if let Err(error) = ctx.storage().save_settings(&settings) {
        return err(error.into());
    }
    ok(settings)
}

/// Canonical defaults for the settings form. Neither the session nor the file
/// changes until `save_settings` is called with them.
pub fn reset_settings() -> CommandResult<Settings> {
    ok(Settings::default())
}
