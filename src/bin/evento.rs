use std::path::PathBuf;

use structopt::StructOpt;

use evento_tasks::filter::FilterMode;
use evento_tasks::notification::Notification;
use evento_tasks::storage::FileStorage;
use evento_tasks::validation::{InvalidFields, TaskForm};
use evento_tasks::widget::{load_panel, AgeForm, BrandsWidget, HolidaysWidget, Panel, SwapiWidget};
use evento_tasks::client::ApiClient;
use evento_tasks::{App, Command, TaskId};

const DATA_FOLDER: &str = "evento_data";


#[derive(Debug, StructOpt)]
struct TaskFields {
    /// The task title (at most 80 characters)
    #[structopt(long)]
    title: Option<String>,
    /// Who is in charge of this task
    #[structopt(long)]
    responsible: Option<String>,
    /// Start date (YYYY-MM-DD)
    #[structopt(long)]
    start: Option<String>,
    /// End date (YYYY-MM-DD)
    #[structopt(long)]
    end: Option<String>,
    /// Crítica, Alta, Média or Baixa
    #[structopt(long)]
    priority: Option<String>,
    #[structopt(long)]
    notes: Option<String>,
    /// Mark the task as done
    #[structopt(long)]
    done: bool,
    /// Mark the task as pending again
    #[structopt(long, conflicts_with = "done")]
    pending: bool,
}

impl TaskFields {
    /// Override the fields of `form` that have been given on the command line
    fn fill(self, mut form: TaskForm) -> TaskForm {
        if let Some(title) = self.title { form.title = title; }
        if let Some(responsible) = self.responsible { form.responsible = responsible; }
        if let Some(start) = self.start { form.start_date = start; }
        if let Some(end) = self.end { form.end_date = end; }
        if let Some(priority) = self.priority { form.priority = priority; }
        if let Some(notes) = self.notes { form.notes = notes; }
        if self.done { form.done = true; }
        if self.pending { form.done = false; }
        form
    }
}

#[derive(Debug, StructOpt)]
enum Action {
    /// Add a new task
    Add {
        #[structopt(flatten)]
        fields: TaskFields,
    },
    /// Edit an existing task
    Edit {
        id: String,
        #[structopt(flatten)]
        fields: TaskFields,
    },
    /// Mark a task as done, or as pending again
    Toggle { id: String },
    /// Delete a task for good
    Delete { id: String },
    /// List tasks
    List {
        /// todo, done or all
        #[structopt(long, default_value = "todo")]
        filter: FilterMode,
        /// Print HTML markup instead of text
        #[structopt(long)]
        html: bool,
    },
    /// Remove the saved task list
    Clear,
    /// Show the public API widgets
    Widgets {
        /// Year of the holidays to display
        #[structopt(long)]
        year: Option<i32>,
    },
    /// Predict someone's age from their name
    Age { name: String },
}

#[derive(Debug, StructOpt)]
#[structopt(name = "evento", about = "A task list manager for event planning.")]
struct CommandLineArgs {
    #[structopt(subcommand)]
    action: Action,

    /// Use a different data folder
    #[structopt(parse(from_os_str), short, long)]
    data_folder: Option<PathBuf>,
}


#[tokio::main]
async fn main() {
    env_logger::init();

    let CommandLineArgs { action, data_folder } = CommandLineArgs::from_args();
    let data_folder = data_folder.unwrap_or_else(|| PathBuf::from(DATA_FOLDER));

    match action {
        Action::Widgets { year } => show_widgets(year).await,
        Action::Age { name } => predict_age(name).await,
        other => run_session(other, FileStorage::new(&data_folder)),
    }
}

/// Load the saved tasks, apply a single action, and save the tasks again if needed
fn run_session(action: Action, storage: FileStorage) {
    let mut app = match App::open(storage) {
        Ok(app) => app,
        Err(notification) => {
            println!("{}", notification);
            println!("The saved tasks were left untouched.");
            return;
        },
    };
    // "nothing to load" is not worth printing here
    let _ = app.notifier_mut().drain();

    let changed = match action {
        Action::Add { fields } => submit(&mut app, fields.fill(TaskForm::default())),
        Action::Edit { id, fields } => {
            let id = TaskId::from(id);
            if app.store().get(&id).is_none() {
                println!("No task with id {}", id);
                return;
            }
            app.dispatch(Command::Edit(id));
            let form = fields.fill(app.form().clone());
            submit(&mut app, form)
        },
        Action::Toggle { id } => print_outcome(app.dispatch(Command::ToggleDone(TaskId::from(id)))),
        Action::Delete { id } => print_outcome(app.dispatch(Command::Delete(TaskId::from(id)))),
        Action::List { filter, html } => {
            app.dispatch(Command::SetFilter(filter));
            let list = app.render();
            if html {
                println!("{}", list.to_html());
            } else {
                println!("{} tasks ({})", app.visible_tasks().len(), filter);
                evento_tasks::utils::print_task_list(&list);
            }
            false
        },
        Action::Clear => {
            print_outcome(app.dispatch(Command::ClearStorage));
            false
        },
        Action::Widgets { .. } | Action::Age { .. } => false,
    };

    if changed {
        if let Some(notification) = app.dispatch(Command::SaveAll) {
            println!("{}", notification);
        }
    }
}

fn submit(app: &mut App<FileStorage>, form: TaskForm) -> bool {
    let outcome = app.dispatch(Command::Submit(form));
    if outcome.is_none() {
        print_invalid_fields(app.invalid_fields());
    }
    print_outcome(outcome)
}

/// Print a notification. Returns whether there was one (i.e. whether something happened)
fn print_outcome(notification: Option<Notification>) -> bool {
    match notification {
        Some(n) => {
            println!("{}", n);
            true
        },
        None => {
            println!("Nothing to do.");
            false
        },
    }
}

fn print_invalid_fields(invalid: InvalidFields) {
    let checks = [
        (InvalidFields::TITLE, "title must be set, and at most 80 characters long"),
        (InvalidFields::RESPONSIBLE, "responsible must be set"),
        (InvalidFields::START_DATE, "start date must be set"),
        (InvalidFields::PRIORITY, "priority must be one of Crítica, Alta, Média, Baixa"),
        (InvalidFields::END_DATE, "end date cannot be earlier than the start date"),
    ];
    for (flag, message) in checks.iter() {
        if invalid.contains(*flag) {
            println!("  * {}", message);
        }
    }
}

async fn show_widgets(year: Option<i32>) {
    let client = ApiClient::new();
    let holidays = match year {
        Some(year) => HolidaysWidget::with_base_url(evento_tasks::config::get(&evento_tasks::config::BRASILAPI_URL), year),
        None => HolidaysWidget::new(),
    };

    let swapi = SwapiWidget::new();
    let brands = BrandsWidget::new();

    let (swapi, holidays, brands) = tokio::join!(
        load_panel(&swapi, &client),
        load_panel(&holidays, &client),
        load_panel(&brands, &client),
    );

    print_panel("SWAPI", &swapi);
    print_panel("Feriados", &holidays);
    print_panel("Marcas FIPE", &brands);
}

async fn predict_age(name: String) {
    let client = ApiClient::new();
    let mut form = AgeForm::new();
    form.name_input = name;
    form.submit(&client).await;
    print_panel("Agify", &form.panel);
}

fn print_panel(title: &str, panel: &Panel) {
    println!("---- {} ----", title);
    if panel.is_error() {
        println!("{}", panel.error);
    } else {
        println!("{}", panel.content.as_str());
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn parse_fields(args: &[&str]) -> TaskFields {
        match CommandLineArgs::from_iter_safe(args).unwrap().action {
            Action::Edit { fields, .. } => fields,
            other => panic!("Unexpected action {:?}", other),
        }
    }

    #[test]
    fn done_flag_in_both_directions() {
        let done = TaskForm { done: true, title: "Setup venue".to_string(), ..TaskForm::default() };

        let form = parse_fields(&["evento", "edit", "t1", "--pending"]).fill(done.clone());
        assert_eq!(form.done, false);
        assert_eq!(form.title, "Setup venue");

        let form = parse_fields(&["evento", "edit", "t1"]).fill(done.clone());
        assert_eq!(form.done, true);

        let form = parse_fields(&["evento", "edit", "t1", "--done"]).fill(TaskForm::default());
        assert_eq!(form.done, true);

        assert!(CommandLineArgs::from_iter_safe(&["evento", "edit", "t1", "--done", "--pending"]).is_err());
    }
}
