//! To-do tasks of the event planner

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Characters used by randomly generated task IDs
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
/// Number of random characters in a generated task ID (after the `t` prefix)
const ID_RANDOM_LEN: usize = 7;

/// Maximum length of a task title, in characters
pub const MAX_TITLE_LEN: usize = 80;


/// The identifier of a task. It is unique within a task list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TaskId {
    content: String,
}

impl TaskId {
    /// Generate a random, short alphanumeric TaskId (e.g. `t4fk0z9q`)
    pub fn random() -> Self {
        let mut seed = Uuid::new_v4().as_u128();
        let mut content = String::with_capacity(ID_RANDOM_LEN + 1);
        content.push('t');
        for _ in 0..ID_RANDOM_LEN {
            let index = (seed % ID_ALPHABET.len() as u128) as usize;
            content.push(ID_ALPHABET[index] as char);
            seed /= ID_ALPHABET.len() as u128;
        }
        Self { content }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl From<String> for TaskId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for TaskId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}

/// Used to support serde
impl Serialize for TaskId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<TaskId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let content = String::deserialize(deserializer)?;
        Ok(TaskId{ content })
    }
}



/// How urgent a task is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "Crítica")]
    Critical,
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "Média")]
    Medium,
    #[serde(rename = "Baixa")]
    Low,
}

impl Priority {
    /// All priorities, from the most to the least urgent
    pub const ALL: [Priority; 4] = [Priority::Critical, Priority::High, Priority::Medium, Priority::Low];

    /// The sort rank of this priority (0 is the most urgent)
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    /// The label that is displayed (and persisted) for this priority
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Critical => "Crítica",
            Priority::High => "Alta",
            Priority::Medium => "Média",
            Priority::Low => "Baixa",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL.iter()
            .find(|p| p.label() == s)
            .copied()
            .ok_or_else(|| format!("Unknown priority {:?}", s))
    }
}



/// A partial task record.
///
/// Every field is optional: this is what a form submission or a persisted entry provides.
/// `None` means "not provided" (a default will be used for new tasks, and the current value is kept when updating).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub id: Option<TaskId>,
    pub title: Option<String>,
    pub responsible: Option<String>,
    pub start_date: Option<String>,
    /// An empty string means "no end date"
    pub end_date: Option<String>,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
    pub done: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}


/// A to-do task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TaskDraft")]
pub struct Task {
    id: TaskId,
    title: String,
    responsible: String,
    start_date: String,
    #[serde(serialize_with = "serialize_end_date")]
    end_date: Option<String>,
    priority: Priority,
    notes: String,
    done: bool,
    /// The time this task was created. This never changes afterwards.
    created_at: DateTime<Utc>,
}

impl Task {
    /// Build a complete task out of a partial record.
    ///
    /// Missing fields are defaulted, a random ID is picked if none is given, and the creation date is set to now unless provided.
    /// This does not validate anything (see [`crate::validation`]).
    pub fn new(draft: TaskDraft) -> Self {
        let id = match draft.id {
            Some(id) if id.is_empty() == false => id,
            _ => TaskId::random(),
        };

        Self {
            id,
            title: draft.title.unwrap_or_default(),
            responsible: draft.responsible.unwrap_or_default(),
            start_date: draft.start_date.unwrap_or_default(),
            end_date: draft.end_date.filter(|d| d.is_empty() == false),
            priority: draft.priority.unwrap_or_default(),
            notes: draft.notes.unwrap_or_default(),
            done: draft.done.unwrap_or(false),
            created_at: draft.created_at.unwrap_or_else(Utc::now),
        }
    }

    pub fn id(&self) -> &TaskId             { &self.id          }
    pub fn title(&self) -> &str             { &self.title       }
    pub fn responsible(&self) -> &str       { &self.responsible }
    pub fn start_date(&self) -> &str        { &self.start_date  }
    pub fn end_date(&self) -> Option<&str>  { self.end_date.as_deref() }
    pub fn priority(&self) -> Priority      { self.priority     }
    pub fn notes(&self) -> &str             { &self.notes       }
    pub fn done(&self) -> bool              { self.done         }
    pub fn created_at(&self) -> &DateTime<Utc> { &self.created_at }

    /// Merge the fields that are present in `draft` into this task.
    ///
    /// The ID and the creation date are never changed.
    pub fn apply(&mut self, draft: TaskDraft) {
        if let Some(title) = draft.title {
            self.title = title;
        }
        if let Some(responsible) = draft.responsible {
            self.responsible = responsible;
        }
        if let Some(start_date) = draft.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = draft.end_date {
            self.end_date = if end_date.is_empty() { None } else { Some(end_date) };
        }
        if let Some(priority) = draft.priority {
            self.priority = priority;
        }
        if let Some(notes) = draft.notes {
            self.notes = notes;
        }
        if let Some(done) = draft.done {
            self.done = done;
        }
    }

    /// Set the completion status
    pub fn set_done(&mut self, done: bool) {
        self.done = done;
    }
}

impl From<TaskDraft> for Task {
    fn from(draft: TaskDraft) -> Self {
        Self::new(draft)
    }
}

/// Missing end dates are persisted as empty strings
fn serialize_end_date<S>(end_date: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(end_date.as_deref().unwrap_or(""))
}
