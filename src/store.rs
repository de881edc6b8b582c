//! The in-memory task list

use crate::task::{Task, TaskDraft, TaskId};

/// What [`TaskStore::create_or_update`] did
#[derive(Clone, Debug, PartialEq)]
pub enum Upsert {
    /// A new task has been appended
    Created(TaskId),
    /// An existing task has been modified
    Updated(TaskId),
}

impl Upsert {
    pub fn id(&self) -> &TaskId {
        match self {
            Upsert::Created(id) => id,
            Upsert::Updated(id) => id,
        }
    }
}


/// An ordered collection of tasks, held in memory.
///
/// Nothing is persisted until [`crate::storage::save_tasks`] is explicitly called.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id() == id)
    }

    /// Merge `draft` into the task that has the same ID, or append a new task.
    ///
    /// A draft without ID always creates a new task, with a fresh ID that is not used in this store yet.
    pub fn create_or_update(&mut self, mut draft: TaskDraft) -> Upsert {
        if let Some(id) = draft.id.as_ref().filter(|id| id.is_empty() == false) {
            if let Some(index) = self.position(id) {
                let id = id.clone();
                self.tasks[index].apply(draft);
                log::debug!("Updated task {}", id);
                return Upsert::Updated(id);
            }
        } else {
            let mut id = TaskId::random();
            while self.position(&id).is_some() {
                id = TaskId::random();
            }
            draft.id = Some(id);
        }

        let task = Task::new(draft);
        let id = task.id().clone();
        log::debug!("Created task {}", id);
        self.tasks.push(task);
        Upsert::Created(id)
    }

    /// Flip the completion status of a task.
    ///
    /// Returns the new status, or `None` if there is no such task
    pub fn toggle_done(&mut self, id: &TaskId) -> Option<bool> {
        let index = self.position(id)?;
        let task = &mut self.tasks[index];
        task.set_done(task.done() == false);
        Some(task.done())
    }

    /// Remove a task. Returns `None` if there is no such task
    pub fn delete(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.position(id)?;
        Some(self.tasks.remove(index))
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Replace the whole content of this store (e.g. after it has been loaded from the storage)
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }
}



#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: Some(title.to_string()),
            responsible: Some("Ana".to_string()),
            start_date: Some("2025-03-01".to_string()),
            ..TaskDraft::default()
        }
    }

    #[test]
    fn create_then_update() {
        let mut store = TaskStore::new();
        let created = store.create_or_update(draft("Setup venue"));
        let id = match &created {
            Upsert::Created(id) => id.clone(),
            other => panic!("Unexpected {:?}", other),
        };
        let created_at = *store.get(&id).unwrap().created_at();

        let mut update = draft("Setup main venue");
        update.id = Some(id.clone());
        update.priority = Some(Priority::Critical);
        assert_eq!(store.create_or_update(update), Upsert::Updated(id.clone()));

        assert_eq!(store.len(), 1);
        let task = store.get(&id).unwrap();
        assert_eq!(task.title(), "Setup main venue");
        assert_eq!(task.priority(), Priority::Critical);
        assert_eq!(task.created_at(), &created_at);
    }

    #[test]
    fn unknown_id_creates_with_that_id() {
        let mut store = TaskStore::new();
        let mut d = draft("Rent chairs");
        d.id = Some("tchairs".into());
        assert_eq!(store.create_or_update(d), Upsert::Created("tchairs".into()));
        assert!(store.get(&"tchairs".into()).is_some());
    }

    #[test]
    fn toggle_and_delete_missing_ids() {
        let mut store = TaskStore::new();
        store.create_or_update(draft("Rent chairs"));
        let missing = TaskId::from("tnothere");
        assert_eq!(store.toggle_done(&missing), None);
        assert_eq!(store.delete(&missing), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_keeps_order() {
        let mut store = TaskStore::new();
        let a = store.create_or_update(draft("a")).id().clone();
        let b = store.create_or_update(draft("b")).id().clone();
        let c = store.create_or_update(draft("c")).id().clone();

        let removed = store.delete(&b).unwrap();
        assert_eq!(removed.title(), "b");
        let ids: Vec<&TaskId> = store.tasks().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec![&a, &c]);
    }
}
