//! Selection and ordering of the tasks that are displayed

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::task::Task;
use crate::store::TaskStore;

/// Which tasks should be displayed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterMode {
    /// Only tasks that are not done yet
    Todo,
    /// Only completed tasks
    Done,
    /// Every task
    All,
}

impl Default for FilterMode {
    fn default() -> Self {
        FilterMode::Todo
    }
}

impl FilterMode {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            FilterMode::Todo => task.done() == false,
            FilterMode::Done => task.done(),
            FilterMode::All => true,
        }
    }
}

impl Display for FilterMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterMode::Todo => write!(f, "todo"),
            FilterMode::Done => write!(f, "done"),
            FilterMode::All => write!(f, "all"),
        }
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(FilterMode::Todo),
            "done" => Ok(FilterMode::Done),
            "all" => Ok(FilterMode::All),
            other => Err(format!("Unknown filter {:?} (expected todo, done or all)", other)),
        }
    }
}


/// The tasks of `store` that match `mode`, most urgent first, then by start date.
///
/// The sort is stable, so that tasks with the same priority and start date keep their store order.
/// The store itself is left untouched.
pub fn visible_tasks(store: &TaskStore, mode: FilterMode) -> Vec<&Task> {
    let mut tasks: Vec<&Task> = store.tasks()
        .iter()
        .filter(|t| mode.matches(t))
        .collect();

    tasks.sort_by(|a, b| {
        a.priority().rank().cmp(&b.priority().rank())
            .then_with(|| a.start_date().cmp(b.start_date()))
    });
    tasks
}
