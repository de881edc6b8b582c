//! The task manager session
//!
//! An [`App`] owns the whole state of the task manager (the task list, the active filter, the edit form...).
//! It is driven by [`Command`]s, that are applied one at a time, synchronously.

use crate::config;
use crate::filter::{visible_tasks, FilterMode};
use crate::notification::{Level, Notification, Notifier};
use crate::render::{render_list, RenderedList};
use crate::storage::{clear_tasks, load_tasks, save_tasks};
use crate::store::TaskStore;
use crate::task::{Task, TaskId};
use crate::traits::KeyValueStorage;
use crate::validation::{InvalidFields, TaskForm};


/// Something the user asked for
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Create a task, or update the one the form is about
    Submit(TaskForm),
    /// The user has changed some fields of the form
    UpdateForm(TaskForm),
    /// Empty the form
    ResetForm,
    /// Load a task into the form, so that it can be edited
    Edit(TaskId),
    ToggleDone(TaskId),
    Delete(TaskId),
    SetFilter(FilterMode),
    /// Persist the whole task list
    SaveAll,
    /// Replace the task list with the persisted one
    LoadAll,
    /// Forget the persisted task list, and empty the current one
    ClearStorage,
}


/// The state of a task manager session
#[derive(Debug)]
pub struct App<S: KeyValueStorage> {
    store: TaskStore,
    filter: FilterMode,
    form: TaskForm,
    invalid_fields: InvalidFields,

    storage: S,
    storage_key: String,
    notifier: Notifier,
}

impl<S: KeyValueStorage> App<S> {
    /// Start a session with an empty task list.
    /// Nothing is read from `storage` until [`Command::LoadAll`] is dispatched.
    pub fn new(storage: S) -> Self {
        Self::with_storage_key(storage, config::get(&config::STORAGE_KEY))
    }

    /// Start a session with the task list persisted in `storage`.
    ///
    /// Fails (with the Danger notification of [`Command::LoadAll`]) when the persisted list cannot be read.
    /// In this case, nothing must be saved over it, hence no session.
    pub fn open(storage: S) -> Result<Self, Notification> {
        let mut app = Self::new(storage);
        match app.dispatch(Command::LoadAll) {
            Some(notification) if notification.level == Level::Danger => Err(notification),
            _ => Ok(app),
        }
    }

    pub fn with_storage_key<K: ToString>(storage: S, storage_key: K) -> Self {
        Self {
            store: TaskStore::new(),
            filter: FilterMode::default(),
            form: TaskForm::default(),
            invalid_fields: InvalidFields::empty(),
            storage,
            storage_key: storage_key.to_string(),
            notifier: Notifier::new(),
        }
    }

    pub fn store(&self) -> &TaskStore                  { &self.store }
    pub fn filter(&self) -> FilterMode                 { self.filter }
    pub fn form(&self) -> &TaskForm                    { &self.form }
    pub fn invalid_fields(&self) -> InvalidFields      { self.invalid_fields }
    pub fn storage(&self) -> &S                        { &self.storage }
    pub fn notifier_mut(&mut self) -> &mut Notifier    { &mut self.notifier }

    /// The tasks that the current filter lets through, in display order
    pub fn visible_tasks(&self) -> Vec<&Task> {
        visible_tasks(&self.store, self.filter)
    }

    /// Render the current task list
    pub fn render(&self) -> RenderedList {
        render_list(&self.visible_tasks())
    }

    /// Apply a command.
    ///
    /// Returns the notification it produced, if any. Failures are reported as notifications too, and leave the task list untouched.
    pub fn dispatch(&mut self, command: Command) -> Option<Notification> {
        log::debug!("Dispatching {:?}", command);
        match command {
            Command::Submit(form) => self.submit(form),
            Command::UpdateForm(form) => {
                self.invalid_fields.revalidate(&form);
                self.form = form;
                None
            },
            Command::ResetForm => {
                self.reset_form();
                None
            },
            Command::Edit(id) => {
                if let Some(task) = self.store.get(&id) {
                    self.form = TaskForm::from_task(task);
                    self.invalid_fields = InvalidFields::empty();
                }
                None
            },
            Command::ToggleDone(id) => {
                let done = self.store.toggle_done(&id)?;
                let text = if done { "Tarefa marcada como concluída." } else { "Tarefa marcada como pendente." };
                Some(self.notifier.flash(text, Level::Info))
            },
            Command::Delete(id) => {
                self.store.delete(&id)?;
                Some(self.notifier.flash("Tarefa excluída permanentemente.", Level::Warning))
            },
            Command::SetFilter(mode) => {
                self.filter = mode;
                None
            },
            Command::SaveAll => Some(self.save_all()),
            Command::LoadAll => Some(self.load_all()),
            Command::ClearStorage => Some(self.clear_storage()),
        }
    }

    fn submit(&mut self, form: TaskForm) -> Option<Notification> {
        let invalid = form.validate();
        if invalid.is_empty() == false {
            log::debug!("Invalid form: {:?}", invalid);
            self.invalid_fields = invalid;
            self.form = form;
            return None;
        }

        self.store.create_or_update(form.to_draft());
        self.reset_form();
        Some(self.notifier.flash("Tarefa salva localmente.", Level::Success))
    }

    fn reset_form(&mut self) {
        self.form = TaskForm::default();
        self.invalid_fields = InvalidFields::empty();
    }

    fn save_all(&mut self) -> Notification {
        match save_tasks(&mut self.storage, &self.storage_key, &self.store) {
            Ok(()) => self.notifier.flash("Dados gravados no armazenamento local.", Level::Success),
            Err(err) => {
                log::error!("Unable to save tasks: {}", err);
                self.notifier.flash("Erro ao gravar no armazenamento local.", Level::Danger)
            },
        }
    }

    fn load_all(&mut self) -> Notification {
        match load_tasks(&self.storage, &self.storage_key) {
            Ok(None) => self.notifier.flash("Nenhum dado encontrado no armazenamento local.", Level::Secondary),
            Ok(Some(tasks)) => {
                self.store.replace_all(tasks);
                self.notifier.flash("Dados recuperados do armazenamento local.", Level::Success)
            },
            Err(err) => {
                log::error!("Unable to load tasks: {}", err);
                self.notifier.flash("Erro ao recuperar dados do armazenamento local.", Level::Danger)
            },
        }
    }

    fn clear_storage(&mut self) -> Notification {
        match clear_tasks(&mut self.storage, &self.storage_key) {
            Ok(()) => {
                self.store.clear();
                self.reset_form();
                self.notifier.flash("Armazenamento local limpo e estado do app resetado.", Level::Warning)
            },
            Err(err) => {
                log::error!("Unable to clear the storage: {}", err);
                self.notifier.flash("Erro ao limpar o armazenamento local.", Level::Danger)
            },
        }
    }
}
