//! Line-based host: reads UI events from stdin and feeds them to the controller.

use std::io::{self, Write};
use std::str::FromStr;

use mapty::map::MapView;
use mapty::storage::DurableStore;
use mapty::ui::list::{ListRenderer, WorkoutEntry};
use mapty::ui::prompt::Prompter;
use mapty::workouts::{SortField, Workout, WorkoutId, WorkoutKind};
use mapty::{Controller, Coordinates, InteractionState};

const HELP: &str = "\
Events:
  click <lat> <lng>              open the form at a map position
  kind running|cycling           switch the form's workout kind
  distance|duration|cadence|elevation <value>
                                 fill one form field
  submit [<distance> <duration> <cadence|elevation>]
                                 submit the form
  cancel                         close the form
  delete <id> | edit <id> | focus <id>
  sort distance|duration         sort the list, largest first
  show-all                       fit the map to every workout
  delete-all                     delete every workout
  list                           print the workouts
  reset                          forget everything and start empty
  help | quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Click(Coordinates),
    Kind(WorkoutKind),
    Field(FormField, String),
    Submit(Option<[String; 3]>),
    Cancel,
    Delete(WorkoutId),
    Edit(WorkoutId),
    Focus(WorkoutId),
    Sort(SortField),
    ShowAll,
    DeleteAll,
    List,
    Reset,
    Help,
    Quit,
}

fn parse_coordinate(raw: Option<&str>, name: &str) -> Result<f64, String> {
    let raw = raw.ok_or_else(|| format!("missing {name}"))?;
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("{name} is not a number: {raw:?}"))
}

fn required_id(raw: Option<&str>) -> Result<WorkoutId, String> {
    raw.map(WorkoutId::from)
        .ok_or_else(|| "missing workout id".to_string())
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or_else(|| "empty command".to_string())?;
        let rest: Vec<&str> = words.collect();
        let first = rest.first().copied();

        let command = match name {
            "click" => {
                let lat = parse_coordinate(first, "latitude")?;
                let lng = parse_coordinate(rest.get(1).copied(), "longitude")?;
                Command::Click(Coordinates::new(lat, lng))
            }
            "kind" => Command::Kind(
                first
                    .unwrap_or_default()
                    .parse()
                    .map_err(|e: mapty::workouts::UnknownKind| e.to_string())?,
            ),
            "distance" | "duration" | "cadence" | "elevation" => {
                let field = match name {
                    "distance" => FormField::Distance,
                    "duration" => FormField::Duration,
                    "cadence" => FormField::Cadence,
                    _ => FormField::Elevation,
                };
                Command::Field(field, rest.join(" "))
            }
            "submit" => match rest.as_slice() {
                [] => Command::Submit(None),
                [distance, duration, extra] => Command::Submit(Some([
                    distance.to_string(),
                    duration.to_string(),
                    extra.to_string(),
                ])),
                _ => return Err("submit takes no values or exactly three".to_string()),
            },
            "cancel" => Command::Cancel,
            "delete" => Command::Delete(required_id(first)?),
            "edit" => Command::Edit(required_id(first)?),
            "focus" => Command::Focus(required_id(first)?),
            "sort" => Command::Sort(
                first
                    .unwrap_or_default()
                    .parse()
                    .map_err(|e: mapty::workouts::UnknownSortField| e.to_string())?,
            ),
            "show-all" => Command::ShowAll,
            "delete-all" => Command::DeleteAll,
            "list" => Command::List,
            "reset" => Command::Reset,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown event {other:?}; try `help`")),
        };

        Ok(command)
    }
}

/// Prints list changes to stdout.
pub struct ConsoleListRenderer;

impl ListRenderer for ConsoleListRenderer {
    fn render_entry(&mut self, workout: &Workout) {
        println!("+ {}", WorkoutEntry::from(workout));
    }

    fn remove_entry(&mut self, id: &WorkoutId) {
        println!("- [{id}]");
    }

    fn clear_all_entries(&mut self) {
        println!("(list cleared)");
    }
}

/// Asks on stdout and reads the answer from stdin.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        print!("{message} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }

    fn warn(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn inform(&mut self, message: &str) {
        println!("{message}");
    }
}

/// Read events until `quit` or end of input.
pub fn run<M, L, P, D>(controller: &mut Controller<M, L, P, D>) -> anyhow::Result<()>
where
    M: MapView,
    L: ListRenderer,
    P: Prompter,
    D: DurableStore,
{
    println!("{HELP}");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => dispatch(controller, command),
            Err(e) => eprintln!("{e}"),
        }
    }

    tracing::info!("Session ended with {} workouts", controller.workouts().len());
    Ok(())
}

fn dispatch<M, L, P, D>(controller: &mut Controller<M, L, P, D>, command: Command)
where
    M: MapView,
    L: ListRenderer,
    P: Prompter,
    D: DurableStore,
{
    let outcome: anyhow::Result<()> = match command {
        Command::Click(coords) => {
            controller.on_map_click(coords);
            println!("Form open at {coords}");
            Ok(())
        }
        Command::Kind(kind) => {
            controller.select_kind(kind);
            Ok(())
        }
        Command::Field(field, value) => {
            let form = controller.form_mut();
            match field {
                FormField::Distance => form.set_distance(&value),
                FormField::Duration => form.set_duration(&value),
                FormField::Cadence => form.set_cadence(&value),
                FormField::Elevation => form.set_elevation(&value),
            }
            Ok(())
        }
        Command::Submit(values) => {
            if let Some([distance, duration, extra]) = values {
                let form = controller.form_mut();
                form.set_distance(&distance);
                form.set_duration(&duration);
                match form.input().kind {
                    WorkoutKind::Running => form.set_cadence(&extra),
                    WorkoutKind::Cycling => form.set_elevation(&extra),
                }
            }
            controller
                .submit()
                .map(|id| println!("Added [{id}]"))
                .map_err(Into::into)
        }
        Command::Cancel => {
            controller.cancel();
            Ok(())
        }
        Command::Delete(id) => controller.delete(&id).map(drop).map_err(Into::into),
        Command::Edit(id) => controller.edit(&id).map(drop).map_err(Into::into),
        Command::Focus(id) => {
            if !controller.focus(&id) {
                println!("Nothing to focus");
            }
            Ok(())
        }
        Command::Sort(field) => controller.sort(field).map_err(Into::into),
        Command::ShowAll => {
            if !controller.show_all() {
                println!("Nothing to show");
            }
            Ok(())
        }
        Command::DeleteAll => controller.delete_all().map(drop).map_err(Into::into),
        Command::List => {
            for workout in controller.workouts() {
                println!("{}", WorkoutEntry::from(workout));
            }
            if let InteractionState::FormOpen { pending } = controller.state() {
                println!("Form open at {pending}: {:?}", controller.form().input());
            }
            Ok(())
        }
        Command::Reset => controller.reset().map_err(Into::into),
        Command::Help => {
            println!("{HELP}");
            Ok(())
        }
        Command::Quit => Ok(()),
    };

    if let Err(e) = outcome {
        eprintln!("{e}");
    }
}
