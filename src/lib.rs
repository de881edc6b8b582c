//! This crate provides a task list manager for event planning.
//!
//! Tasks are kept in an in-memory [`TaskStore`](store::TaskStore), that is only persisted when explicitly asked to, into a
//! [`KeyValueStorage`](traits::KeyValueStorage) (see the [`storage`] module). \
//! An [`App`] bundles the task list with the rest of the session state (filter, edit form, notifications) and is driven by [`Command`]s.
//!
//! This crate also provides a few widgets that display data from public APIs, in the [`widget`] module.

pub mod traits;

mod task;
pub use task::{Priority, Task, TaskDraft, TaskId};
pub mod store;
pub mod validation;
pub mod filter;
pub mod render;
pub mod notification;
pub mod storage;
pub mod app;
pub use app::{App, Command};

pub mod client;
pub mod widget;

pub mod config;
pub mod utils;
