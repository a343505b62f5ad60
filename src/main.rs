#![deny(missing_docs)]
#![deny(warnings)]

//! Line-oriented driver for the settings engine.
//!
//! Reads one command per line from stdin, forwards it to the controller as a
//! field edit and prints the resulting status. Autosaves fire from the same
//! loop once their quiet interval passes.
use std::io::BufRead;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use settings_editor::config;
use settings_editor::controller::SettingsController;
use settings_editor::logging;
use settings_editor::settings::RawFieldValues;
use settings_editor::storage::{self, KeyValueStore};

const IDLE_WAIT: Duration = Duration::from_secs(3600);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }
    let cfg = config::load_or_default()?;
    let store = storage::open_store(&cfg)?;
    let mut controller = SettingsController::with_config(store, &cfg);
    controller.initialize();
    controller.take_full_render();
    print_record(&controller);
    print_status(&controller);

    let (tx, rx) = mpsc::channel::<String>();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    loop {
        let wait = controller
            .next_autosave_deadline()
            .map(|due_at| due_at.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_WAIT);
        match rx.recv_timeout(wait) {
            Ok(line) => match handle_command(&mut controller, line.trim()) {
                Flow::Continue => {}
                Flow::Quit => break,
            },
            Err(RecvTimeoutError::Timeout) => {
                if controller.tick() {
                    print_status(&controller);
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    if controller.flush() {
        print_status(&controller);
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_command<S: KeyValueStore>(controller: &mut SettingsController<S>, line: &str) -> Flow {
    let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
    let mut raw = RawFieldValues::from_settings(controller.settings());
    match command {
        "" => return Flow::Continue,
        "quit" | "exit" => return Flow::Quit,
        "show" => {
            print_record(controller);
            print_status(controller);
            return Flow::Continue;
        }
        "reset" => {
            controller.reset();
            if controller.take_full_render() {
                print_record(controller);
            }
            print_status(controller);
            return Flow::Continue;
        }
        "name" => raw.display_name = arg.to_string(),
        "email" => raw.email = arg.to_string(),
        "theme" => raw.theme = arg.trim().to_string(),
        "notifications" => raw.email_notifications = parse_toggle(arg),
        other => {
            println!("unknown command: {other}");
            println!("commands: name <text>, email <text>, theme <light|dark>, notifications <on|off>, reset, show, quit");
            return Flow::Continue;
        }
    }
    controller.apply_edit(&raw);
    print_status(controller);
    Flow::Continue
}

/// `on`, `true` and `yes` enable; anything else, including nothing, disables.
fn parse_toggle(arg: &str) -> bool {
    matches!(arg.trim(), "on" | "true" | "yes")
}

fn print_record<S: KeyValueStore>(controller: &SettingsController<S>) {
    let settings = controller.settings();
    println!("display name: {}", settings.profile.display_name);
    println!("email: {}", settings.profile.email);
    println!("theme: {}", settings.preferences.theme);
    println!(
        "email notifications: {}",
        if settings.preferences.email_notifications { "on" } else { "off" }
    );
}

fn print_status<S: KeyValueStore>(controller: &SettingsController<S>) {
    println!("[{}] theme={}", controller.status_text(), controller.applied_theme());
    if let Some(error) = controller.email_error() {
        println!("  email: {error}");
    }
}
