use std::error::Error;

use async_trait::async_trait;

use crate::client::ApiClient;
use crate::widget::PanelContent;

/// A place where strings can be durably stored by key (such as a browser's local storage)
pub trait KeyValueStorage {
    /// Returns the value stored at `key`, or `None` if there is nothing there
    fn get_item(&self, key: &str) -> Result<Option<String>, Box<dyn Error>>;
    /// Store `value` at `key`, replacing the previous value if any.
    /// This may fail, e.g. when the storage is full
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>>;
    /// Remove whatever is stored at `key`. Removing a missing key is not an error
    fn remove_item(&mut self, key: &str) -> Result<(), Box<dyn Error>>;
}

/// A panel that displays data fetched from a public API
#[async_trait]
pub trait ApiWidget {
    /// A short name, used in logs
    fn name(&self) -> &str;
    /// Displayed while the request is in flight
    fn loading_message(&self) -> String;
    /// Displayed when anything goes wrong
    fn error_message(&self) -> &'static str;

    /// Fetch the data and format it.
    /// This may fail in case the network or the server misbehaves
    async fn fetch_content(&self, client: &ApiClient) -> Result<PanelContent, Box<dyn Error>>;
}
