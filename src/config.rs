//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// The key under which the whole task list is persisted.
/// Feel free to override it when initing this library, e.g. to keep several independent task lists.
pub static STORAGE_KEY: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("evento_tasks_v1".to_string())));

/// Base URL of the Star Wars API
pub static SWAPI_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("https://swapi.dev".to_string())));

/// Base URL of BrasilAPI (used for the holidays widget)
pub static BRASILAPI_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("https://brasilapi.com.br".to_string())));

/// Base URL of the public FIPE mirror (used for the vehicle brands widget)
pub static FIPE_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("https://parallelum.com.br".to_string())));

/// Base URL of the Agify age prediction API
pub static AGIFY_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("https://api.agify.io".to_string())));

/// The year the holidays widget asks for, unless told otherwise
pub static HOLIDAY_YEAR: Lazy<Arc<Mutex<i32>>> = Lazy::new(|| Arc::new(Mutex::new(2025)));


/// Read the current value of a string setting
pub fn get(setting: &Lazy<Arc<Mutex<String>>>) -> String {
    match setting.lock() {
        Ok(value) => value.clone(),
        // A poisoned lock still holds a valid string
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Override a string setting
pub fn set<S: ToString>(setting: &Lazy<Arc<Mutex<String>>>, value: S) {
    match setting.lock() {
        Ok(mut current) => *current = value.to_string(),
        Err(poisoned) => *poisoned.into_inner() = value.to_string(),
    }
}

/// The year the holidays widget uses by default
pub fn holiday_year() -> i32 {
    match HOLIDAY_YEAR.lock() {
        Ok(year) => *year,
        Err(poisoned) => *poisoned.into_inner(),
    }
}
