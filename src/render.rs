//! Projection of the task list into displayable cards

use std::fmt::Write;

use csscolorparser::Color;

use crate::task::{Priority, Task, TaskId};
use crate::utils::escape_html;

/// Displayed when no task matches the current filter
pub const EMPTY_LIST_MESSAGE: &str = "Nenhuma tarefa encontrada para esse filtro.";
/// Displayed instead of a missing date
const NO_DATE: &str = "—";


/// What an action button does when clicked
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    /// Load the task into the edit form
    Edit,
    /// Flip the completion status
    ToggleDone,
    /// Remove the task for good
    Delete,
}

/// A button attached to a task card
#[derive(Clone, Debug, PartialEq)]
pub struct Action {
    pub kind: ActionKind,
    pub label: &'static str,
    pub class: &'static str,
    /// Tooltip, if any
    pub title: Option<&'static str>,
}

/// The priority badge of a card
#[derive(Clone, Debug, PartialEq)]
pub struct Badge {
    pub label: &'static str,
    pub class: String,
    pub color: Color,
}

impl Badge {
    pub fn new(priority: Priority) -> Self {
        Self {
            label: priority.label(),
            class: format!("priority-badge p-{}", priority.label().replace(' ', "")),
            color: badge_color(priority),
        }
    }
}

fn badge_color(priority: Priority) -> Color {
    let hex = match priority {
        Priority::Critical => "#dc3545",
        Priority::High => "#fd7e14",
        Priority::Medium => "#ffc107",
        Priority::Low => "#198754",
    };
    csscolorparser::parse(hex).unwrap(/* this cannot panic since these are hardcoded valid colors */)
}


/// Everything that is displayed for a single task
#[derive(Clone, Debug, PartialEq)]
pub struct TaskCard {
    pub id: TaskId,
    /// The title, with a suffix for completed tasks
    pub heading: String,
    pub badge: Badge,
    pub responsible: String,
    pub start_label: String,
    pub end_label: String,
    pub notes: String,
    pub done: bool,
    pub actions: Vec<Action>,
}

impl TaskCard {
    pub fn new(task: &Task) -> Self {
        let heading = if task.done() {
            format!("{} (Concluída)", task.title())
        } else {
            task.title().to_string()
        };

        let toggle = if task.done() {
            Action { kind: ActionKind::ToggleDone, label: "Marcada", class: "btn btn-sm btn-success", title: None }
        } else {
            Action { kind: ActionKind::ToggleDone, label: "Marcar como concluída", class: "btn btn-sm btn-outline-success", title: None }
        };

        Self {
            id: task.id().clone(),
            heading,
            badge: Badge::new(task.priority()),
            responsible: task.responsible().to_string(),
            start_label: date_label(task.start_date()),
            end_label: date_label(task.end_date().unwrap_or("")),
            notes: task.notes().to_string(),
            done: task.done(),
            actions: vec![
                Action { kind: ActionKind::Edit, label: "Editar", class: "btn btn-sm btn-outline-primary", title: None },
                toggle,
                Action { kind: ActionKind::Delete, label: "Excluir", class: "btn btn-sm btn-outline-danger", title: Some("Excluir permanentemente") },
            ],
        }
    }

    pub fn action(&self, kind: ActionKind) -> Option<&Action> {
        self.actions.iter().find(|a| a.kind == kind)
    }

    fn write_html(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, r#"<div class="col-12"><div class="card task-card shadow-sm" data-id="{}">"#, escape_html(self.id.as_str()))?;
        writeln!(out, r#"  <div class="card-body d-flex gap-3 align-items-start">"#)?;
        writeln!(out, r#"    <div style="flex: 1">"#)?;
        writeln!(out, r#"      <div class="d-flex align-items-start justify-content-between">"#)?;
        writeln!(out, r#"        <h3 class="h6 mb-1">{}</h3>"#, escape_html(&self.heading))?;
        writeln!(out, r#"        <span class="{}" style="background-color: {}">{}</span>"#,
            self.badge.class, self.badge.color.to_hex_string(), escape_html(self.badge.label))?;
        writeln!(out, r#"      </div>"#)?;
        writeln!(out, r#"      <div class="small text-muted mb-2"><strong>Responsável:</strong> {} &nbsp; • &nbsp; <strong>Início:</strong> {} &nbsp; • &nbsp; <strong>Fim:</strong> {}</div>"#,
            escape_html(&self.responsible), escape_html(&self.start_label), escape_html(&self.end_label))?;
        writeln!(out, r#"      <div class="small-note">{}</div>"#, escape_html(&self.notes))?;
        writeln!(out, r#"    </div>"#)?;
        writeln!(out, r#"    <div class="d-flex flex-column align-items-end gap-2 ms-2">"#)?;
        for action in &self.actions {
            match action.title {
                Some(title) => writeln!(out, r#"      <button type="button" class="{}" title="{}">{}</button>"#, action.class, escape_html(title), escape_html(action.label))?,
                None => writeln!(out, r#"      <button type="button" class="{}">{}</button>"#, action.class, escape_html(action.label))?,
            }
        }
        writeln!(out, r#"    </div>"#)?;
        writeln!(out, r#"  </div>"#)?;
        writeln!(out, r#"</div></div>"#)
    }
}

fn date_label(date: &str) -> String {
    if date.is_empty() {
        NO_DATE.to_string()
    } else {
        date.to_string()
    }
}


/// The displayable version of a (filtered and sorted) task list
#[derive(Clone, Debug, PartialEq)]
pub enum RenderedList {
    /// Nothing matches the current filter
    Empty { message: &'static str },
    Cards(Vec<TaskCard>),
}

impl RenderedList {
    pub fn is_empty(&self) -> bool {
        match self {
            RenderedList::Empty{..} => true,
            RenderedList::Cards(cards) => cards.is_empty(),
        }
    }

    pub fn cards(&self) -> &[TaskCard] {
        match self {
            RenderedList::Empty{..} => &[],
            RenderedList::Cards(cards) => cards,
        }
    }

    /// Render as HTML markup. Every piece of user-provided text is escaped
    pub fn to_html(&self) -> String {
        match self {
            RenderedList::Empty{ message } => {
                format!(r#"<div class="col-12"><div class="alert alert-light py-3">{}</div></div>"#, escape_html(message))
            },
            RenderedList::Cards(cards) => {
                let mut out = String::new();
                for card in cards {
                    if let Err(err) = card.write_html(&mut out) {
                        log::warn!("Unable to render task {}: {}", card.id, err);
                    }
                }
                out
            },
        }
    }

    /// Render as plain text, one line per task
    pub fn to_text(&self) -> String {
        match self {
            RenderedList::Empty{ message } => message.to_string(),
            RenderedList::Cards(cards) => {
                cards.iter()
                    .map(|card| {
                        let completion = if card.done { "✓" } else { " " };
                        format!("{} [{}] {}\t{} ({} → {})\t{}",
                            completion, card.badge.label, card.heading,
                            card.responsible, card.start_label, card.end_label, card.id)
                    })
                    .collect::<Vec<String>>()
                    .join("\n")
            },
        }
    }
}

/// Build the cards for the given tasks, keeping their order
pub fn render_list(tasks: &[&Task]) -> RenderedList {
    if tasks.is_empty() {
        return RenderedList::Empty { message: EMPTY_LIST_MESSAGE };
    }
    RenderedList::Cards(tasks.iter().map(|t| TaskCard::new(t)).collect())
}
