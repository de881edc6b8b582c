//! Scenarios that drive a whole task manager session through commands

use evento_tasks::filter::{visible_tasks, FilterMode};
use evento_tasks::notification::Level;
use evento_tasks::render::{ActionKind, RenderedList, EMPTY_LIST_MESSAGE};
use evento_tasks::storage::MemoryStorage;
use evento_tasks::store::{TaskStore, Upsert};
use evento_tasks::validation::{InvalidFields, TaskForm};
use evento_tasks::{App, Command, Priority, TaskDraft, TaskId};


fn venue_form() -> TaskForm {
    TaskForm {
        title: "Setup venue".to_string(),
        responsible: "Ana".to_string(),
        start_date: "2025-03-01".to_string(),
        priority: "Alta".to_string(),
        ..TaskForm::default()
    }
}

fn new_app() -> App<MemoryStorage> {
    let _ = env_logger::builder().is_test(true).try_init();
    App::with_storage_key(MemoryStorage::new(), "evento_tasks_v1")
}

fn visible_titles(app: &App<MemoryStorage>) -> Vec<String> {
    app.visible_tasks().iter().map(|t| t.title().to_string()).collect()
}


#[test]
fn setup_venue_scenario() {
    let mut app = new_app();

    app.dispatch(Command::Submit(venue_form()));
    assert_eq!(app.store().len(), 1);
    let task = &app.store().tasks()[0];
    assert_eq!(task.done(), false);
    assert_eq!(task.priority(), Priority::High);
    let id = task.id().clone();

    assert_eq!(visible_titles(&app), vec!["Setup venue"]);
    let cards = app.render();
    assert_eq!(cards.cards()[0].id, id);

    let toggled = app.dispatch(Command::ToggleDone(id.clone())).unwrap();
    assert_eq!(toggled.text, "Tarefa marcada como concluída.");
    assert_eq!(toggled.level, Level::Info);
    assert!(visible_titles(&app).is_empty());
    assert_eq!(app.render(), RenderedList::Empty { message: EMPTY_LIST_MESSAGE });

    app.dispatch(Command::SetFilter(FilterMode::Done));
    let list = app.render();
    assert_eq!(list.cards()[0].heading, "Setup venue (Concluída)");
    assert_eq!(list.cards()[0].action(ActionKind::ToggleDone).unwrap().label, "Marcada");
}

#[test]
fn submitted_values_are_kept() {
    let mut store = TaskStore::new();
    let draft = TaskDraft {
        title: Some("Order flowers".to_string()),
        responsible: Some("Bia".to_string()),
        start_date: Some("2025-04-10".to_string()),
        end_date: Some("2025-04-12".to_string()),
        priority: Some(Priority::Low),
        notes: Some("white roses".to_string()),
        done: Some(false),
        ..TaskDraft::default()
    };
    let id = store.create_or_update(draft).id().clone();

    let task = store.get(&id).unwrap();
    assert_eq!(task.title(), "Order flowers");
    assert_eq!(task.responsible(), "Bia");
    assert_eq!(task.start_date(), "2025-04-10");
    assert_eq!(task.end_date(), Some("2025-04-12"));
    assert_eq!(task.priority(), Priority::Low);
    assert_eq!(task.notes(), "white roses");
    assert_eq!(task.done(), false);

    // updating through the same id keeps a single record
    let update = TaskDraft {
        id: Some(id.clone()),
        notes: Some("red roses".to_string()),
        ..TaskDraft::default()
    };
    assert_eq!(store.create_or_update(update), Upsert::Updated(id.clone()));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&id).unwrap().notes(), "red roses");
    assert_eq!(store.get(&id).unwrap().title(), "Order flowers");
}

#[test]
fn toggle_twice_is_identity() {
    let mut app = new_app();
    app.dispatch(Command::Submit(venue_form()));
    let id = app.store().tasks()[0].id().clone();

    app.dispatch(Command::ToggleDone(id.clone()));
    let back = app.dispatch(Command::ToggleDone(id.clone())).unwrap();
    assert_eq!(back.text, "Tarefa marcada como pendente.");
    assert_eq!(app.store().get(&id).unwrap().done(), false);
}

#[test]
fn delete_then_lookup() {
    let mut app = new_app();
    app.dispatch(Command::Submit(venue_form()));
    let id = app.store().tasks()[0].id().clone();

    let deleted = app.dispatch(Command::Delete(id.clone())).unwrap();
    assert_eq!(deleted.level, Level::Warning);
    assert!(app.store().get(&id).is_none());
    assert_eq!(app.dispatch(Command::Delete(id.clone())), None);
    assert_eq!(app.dispatch(Command::ToggleDone(id)), None);
}

#[test]
fn save_then_load_restores_everything() {
    let mut app = new_app();
    app.dispatch(Command::Submit(venue_form()));
    let mut other = venue_form();
    other.title = "Hire DJ".to_string();
    other.priority = "Crítica".to_string();
    other.end_date = "2025-03-09".to_string();
    other.notes = "  ask for a playlist  ".to_string();
    app.dispatch(Command::Submit(other));
    let id = app.store().tasks()[0].id().clone();
    app.dispatch(Command::ToggleDone(id));

    let before = app.store().clone();
    assert_eq!(app.dispatch(Command::SaveAll).unwrap().level, Level::Success);

    // mess up the in-memory state, then load
    app.dispatch(Command::Submit(venue_form()));
    let loaded = app.dispatch(Command::LoadAll).unwrap();
    assert_eq!(loaded.text, "Dados recuperados do armazenamento local.");
    assert_eq!(app.store(), &before);
    assert_eq!(app.store().tasks()[1].notes(), "ask for a playlist");
}

#[test]
fn corrupted_storage_leaves_the_store_unchanged() {
    use evento_tasks::traits::KeyValueStorage;

    let mut storage = MemoryStorage::new();
    storage.set_item("evento_tasks_v1", "[{\"title\": ").unwrap();
    let mut app = App::with_storage_key(storage, "evento_tasks_v1");
    app.dispatch(Command::Submit(venue_form()));

    let failed = app.dispatch(Command::LoadAll).unwrap();
    assert_eq!(failed.level, Level::Danger);
    assert_eq!(app.store().len(), 1);
}

#[test]
fn filters_cover_the_whole_store() {
    let mut store = TaskStore::new();
    for (i, done) in [false, true, true, false, true].iter().enumerate() {
        store.create_or_update(TaskDraft {
            title: Some(format!("task {}", i)),
            priority: Some(Priority::ALL[i % 4]),
            start_date: Some(format!("2025-01-0{}", 5 - i)),
            done: Some(*done),
            ..TaskDraft::default()
        });
    }

    let mut union: Vec<TaskId> = visible_tasks(&store, FilterMode::Todo).iter()
        .chain(visible_tasks(&store, FilterMode::Done).iter())
        .map(|t| t.id().clone())
        .collect();
    let mut all: Vec<TaskId> = visible_tasks(&store, FilterMode::All).iter().map(|t| t.id().clone()).collect();
    union.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    all.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    assert_eq!(union, all);
    assert_eq!(all.len(), store.len());
}

fn assert_rejected<F: Fn(&mut TaskForm)>(breaker: F, expected: InvalidFields) {
    let mut app = new_app();
    let mut form = venue_form();
    breaker(&mut form);
    assert_eq!(app.dispatch(Command::Submit(form)), None);
    assert_eq!(app.invalid_fields(), expected);
    assert!(app.store().is_empty());
}

#[test]
fn validation_rejects_each_bad_field() {
    assert_rejected(|f| f.title = String::new(), InvalidFields::TITLE);
    assert_rejected(|f| f.title = "a".repeat(81), InvalidFields::TITLE);
    assert_rejected(|f| f.responsible = String::new(), InvalidFields::RESPONSIBLE);
    assert_rejected(|f| f.start_date = String::new(), InvalidFields::START_DATE);
    assert_rejected(|f| f.end_date = "2025-02-01".to_string(), InvalidFields::END_DATE);
}

#[test]
fn clear_storage_resets_the_session() {
    let mut app = new_app();
    app.dispatch(Command::Submit(venue_form()));
    app.dispatch(Command::SaveAll);
    let id = app.store().tasks()[0].id().clone();
    app.dispatch(Command::Edit(id));
    assert!(app.form().id.is_empty() == false);

    app.dispatch(Command::ClearStorage);
    assert!(app.store().is_empty());
    assert_eq!(app.form(), &TaskForm::default());
    assert_eq!(app.dispatch(Command::LoadAll).unwrap().level, Level::Secondary);
}
