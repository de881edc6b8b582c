//! This module persists the task list into a key-value storage

use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::path::{Path, PathBuf};

use crate::task::{Task, TaskDraft, TaskId};
use crate::store::TaskStore;
use crate::traits::KeyValueStorage;


/// A key-value storage that keeps one JSON file per key in a folder
#[derive(Debug, PartialEq)]
pub struct FileStorage {
    backing_folder: PathBuf,
}

impl FileStorage {
    /// Use `folder` to store data. It is created when something is first written into it
    pub fn new(folder: &Path) -> Self {
        Self {
            backing_folder: PathBuf::from(folder),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.backing_folder
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let mut path = self.backing_folder.clone();
        path.push(format!("{}.json", sanitize_filename::sanitize(key)));
        path
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!("Unable to read file {:?}: {}", path, err).into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        if let Err(err) = std::fs::create_dir_all(&self.backing_folder) {
            return Err(format!("Unable to create folder {:?}: {}", self.backing_folder, err).into());
        }
        let path = self.path_for(key);
        if let Err(err) = std::fs::write(&path, value) {
            return Err(format!("Unable to save file {:?}: {}", path, err).into());
        }
        log::debug!("Saved {} bytes into {:?}", value.len(), path);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), Box<dyn Error>> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(format!("Unable to remove file {:?}: {}", path, err).into()),
        }
    }
}


/// A key-value storage that lives in memory.
///
/// It can be given a quota (in bytes, over all stored values), so that writes can be rejected like a full browser storage would
#[derive(Debug, Default, PartialEq)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self { items: HashMap::new(), quota: Some(quota) }
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items.iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        if let Some(quota) = self.quota {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(format!("Quota exceeded ({} bytes needed, {} allowed)", needed, quota).into());
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), Box<dyn Error>> {
        self.items.remove(key);
        Ok(())
    }
}



/// Serialize the whole task list, and store it at `key`
pub fn save_tasks<S: KeyValueStorage>(storage: &mut S, key: &str, store: &TaskStore) -> Result<(), Box<dyn Error>> {
    let payload = serde_json::to_string(store.tasks())?;
    storage.set_item(key, &payload)?;
    log::info!("Saved {} tasks", store.len());
    Ok(())
}

/// Read the task list stored at `key`.
///
/// Returns `Ok(None)` if nothing has been stored yet. Every entry goes through the task factory, so that missing fields get their default values. \
/// Two entries with the same ID make the whole load fail. Entries without ID are given one that no other entry uses.
pub fn load_tasks<S: KeyValueStorage>(storage: &S, key: &str) -> Result<Option<Vec<Task>>, Box<dyn Error>> {
    let raw = match storage.get_item(key)? {
        None => return Ok(None),
        Some(raw) => raw,
    };
    if raw.is_empty() {
        return Ok(None);
    }

    let mut drafts: Vec<TaskDraft> = serde_json::from_str(&raw)?;

    let mut used_ids = HashSet::new();
    for id in drafts.iter().filter_map(|d| d.id.as_ref()).filter(|id| id.is_empty() == false) {
        if used_ids.insert(id.clone()) == false {
            return Err(format!("Duplicate task id {}", id).into());
        }
    }
    for draft in drafts.iter_mut().filter(|d| d.id.as_ref().map_or(true, |id| id.is_empty())) {
        let mut id = TaskId::random();
        while used_ids.contains(&id) {
            id = TaskId::random();
        }
        used_ids.insert(id.clone());
        draft.id = Some(id);
    }

    let tasks: Vec<Task> = drafts.into_iter().map(Task::new).collect();
    log::info!("Loaded {} tasks", tasks.len());
    Ok(Some(tasks))
}

/// Forget whatever is stored at `key`
pub fn clear_tasks<S: KeyValueStorage>(storage: &mut S, key: &str) -> Result<(), Box<dyn Error>> {
    storage.remove_item(key)
}
