//! Checks performed on the task form, before anything is admitted into the store

use bitflags::bitflags;

use crate::task::{Priority, Task, TaskDraft, TaskId, MAX_TITLE_LEN};

bitflags! {
    /// The form fields that failed validation
    pub struct InvalidFields: u8 {
        /// Title is empty or longer than 80 characters
        const TITLE = 1;
        /// No responsible person
        const RESPONSIBLE = 2;
        /// No start date
        const START_DATE = 4;
        /// No priority, or not a known one
        const PRIORITY = 8;
        /// End date is earlier than the start date
        const END_DATE = 16;
    }
}

impl InvalidFields {
    /// Update the flags while the user is editing the form.
    ///
    /// Fields that have been filled in lose their flag, and the date ordering is checked again.
    /// This never flags a field that was not flagged before, except for the end date.
    pub fn revalidate(&mut self, form: &TaskForm) {
        if form.title.trim().is_empty() == false {
            self.remove(Self::TITLE);
        }
        if form.responsible.trim().is_empty() == false {
            self.remove(Self::RESPONSIBLE);
        }
        if form.priority.trim().is_empty() == false {
            self.remove(Self::PRIORITY);
        }
        self.set(Self::END_DATE, form.dates_are_inverted());
    }
}


/// The raw content of the task form, as typed by the user
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskForm {
    /// Empty when creating a new task, set when editing an existing one
    pub id: String,
    pub title: String,
    pub responsible: String,
    pub start_date: String,
    pub end_date: String,
    pub priority: String,
    pub notes: String,
    pub done: bool,
}

impl TaskForm {
    /// Fill a form with an existing task, so that it can be edited
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            title: task.title().to_string(),
            responsible: task.responsible().to_string(),
            start_date: task.start_date().to_string(),
            end_date: task.end_date().unwrap_or("").to_string(),
            priority: task.priority().to_string(),
            notes: task.notes().to_string(),
            done: task.done(),
        }
    }

    /// Check every rule, and return the set of fields that failed
    pub fn validate(&self) -> InvalidFields {
        let mut invalid = InvalidFields::empty();

        let title = self.title.trim();
        if title.is_empty() || title.chars().count() > MAX_TITLE_LEN {
            invalid.insert(InvalidFields::TITLE);
        }
        if self.responsible.trim().is_empty() {
            invalid.insert(InvalidFields::RESPONSIBLE);
        }
        if self.start_date.is_empty() {
            invalid.insert(InvalidFields::START_DATE);
        }
        if self.priority.parse::<Priority>().is_err() {
            invalid.insert(InvalidFields::PRIORITY);
        }
        if self.dates_are_inverted() {
            invalid.insert(InvalidFields::END_DATE);
        }

        invalid
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Whether both dates are set and the end date comes before the start date.
    /// Dates are ISO strings, so that they compare lexicographically.
    pub fn dates_are_inverted(&self) -> bool {
        self.end_date.is_empty() == false
            && self.start_date.is_empty() == false
            && self.end_date < self.start_date
    }

    /// Turn this form into a complete draft (every field is present).
    ///
    /// Text fields are trimmed. This is expected to be called on a valid form; an unknown priority is left out.
    pub fn to_draft(&self) -> TaskDraft {
        let id = if self.id.is_empty() { None } else { Some(TaskId::from(self.id.as_str())) };
        TaskDraft {
            id,
            title: Some(self.title.trim().to_string()),
            responsible: Some(self.responsible.trim().to_string()),
            start_date: Some(self.start_date.clone()),
            end_date: Some(self.end_date.clone()),
            priority: self.priority.parse().ok(),
            notes: Some(self.notes.trim().to_string()),
            done: Some(self.done),
            created_at: None,
        }
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> TaskForm {
        TaskForm {
            title: "Setup venue".to_string(),
            responsible: "Ana".to_string(),
            start_date: "2025-03-01".to_string(),
            priority: "Alta".to_string(),
            ..TaskForm::default()
        }
    }

    #[test]
    fn accepts_a_valid_form() {
        assert!(valid_form().is_valid());

        let mut form = valid_form();
        form.end_date = "2025-03-01".to_string();
        assert!(form.is_valid());
    }

    #[test]
    fn rejects_each_rule_independently() {
        let mut form = valid_form();
        form.title = "   ".to_string();
        assert_eq!(form.validate(), InvalidFields::TITLE);

        let mut form = valid_form();
        form.title = "x".repeat(81);
        assert_eq!(form.validate(), InvalidFields::TITLE);

        let mut form = valid_form();
        form.title = "é".repeat(80);
        assert!(form.is_valid());

        let mut form = valid_form();
        form.responsible = String::new();
        assert_eq!(form.validate(), InvalidFields::RESPONSIBLE);

        let mut form = valid_form();
        form.start_date = String::new();
        assert_eq!(form.validate(), InvalidFields::START_DATE);

        let mut form = valid_form();
        form.priority = "Urgente".to_string();
        assert_eq!(form.validate(), InvalidFields::PRIORITY);

        let mut form = valid_form();
        form.end_date = "2025-02-28".to_string();
        assert_eq!(form.validate(), InvalidFields::END_DATE);
    }

    #[test]
    fn empty_priority_is_invalid() {
        let mut form = valid_form();
        form.priority = String::new();
        assert_eq!(form.validate(), InvalidFields::PRIORITY);
        assert!(form.is_valid() == false);
    }

    #[test]
    fn end_date_is_not_checked_without_start_date() {
        let mut form = valid_form();
        form.start_date = String::new();
        form.end_date = "2000-01-01".to_string();
        assert_eq!(form.validate(), InvalidFields::START_DATE);
    }

    #[test]
    fn revalidate_only_clears_filled_fields() {
        let mut form = TaskForm::default();
        let mut invalid = form.validate();
        assert!(invalid.contains(InvalidFields::TITLE | InvalidFields::RESPONSIBLE | InvalidFields::START_DATE | InvalidFields::PRIORITY));

        form.title = "Hire DJ".to_string();
        form.start_date = "2025-05-02".to_string();
        form.end_date = "2025-05-01".to_string();
        invalid.revalidate(&form);
        assert!(invalid.contains(InvalidFields::TITLE) == false);
        assert!(invalid.contains(InvalidFields::RESPONSIBLE));
        // start date is only cleared by a full validation
        assert!(invalid.contains(InvalidFields::START_DATE));
        assert!(invalid.contains(InvalidFields::END_DATE));

        form.end_date = "2025-05-03".to_string();
        invalid.revalidate(&form);
        assert!(invalid.contains(InvalidFields::END_DATE) == false);
    }

    #[test]
    fn draft_is_trimmed() {
        let mut form = valid_form();
        form.title = "  Setup venue ".to_string();
        form.notes = " bring keys\n".to_string();
        let draft = form.to_draft();
        assert_eq!(draft.id, None);
        assert_eq!(draft.title.as_deref(), Some("Setup venue"));
        assert_eq!(draft.notes.as_deref(), Some("bring keys"));
        assert_eq!(draft.priority, Some(Priority::High));
        assert_eq!(draft.done, Some(false));
    }
}
