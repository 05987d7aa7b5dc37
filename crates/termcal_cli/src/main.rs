//! `termcal` executable.
//!
//! # Responsibility
//! - Parse arguments, resolve configuration and start logging.
//! - Hand exactly one command to `termcal_core` and map failures to exit codes.

mod cli;

use std::io::{self, IsTerminal};
use std::process;

use log::error;
use termcal_core::{
    init_logging, AppConfig, JsonNoteRepository, NoteService, OutputStyle, Theme,
};

use cli::Action;

const EXIT_USAGE: i32 = 1;
const EXIT_FATAL: i32 = 2;

fn main() {
    process::exit(run(std::env::args().skip(1).collect()));
}

fn run(args: Vec<String>) -> i32 {
    let args = match cli::parse(args) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("Error: {err}");
            eprintln!("Try '{} --help' for more information.", cli::PROGRAM);
            return EXIT_USAGE;
        }
    };

    match args.action {
        Action::Help => {
            println!("{}", cli::usage());
            return 0;
        }
        Action::Version => {
            println!("{} {}", cli::PROGRAM, termcal_core::core_version());
            return 0;
        }
        _ => {}
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            return EXIT_FATAL;
        }
    };
    setup_logging(&config);

    let today = chrono::Local::now().date_naive();
    let command = match args.action.into_command(today) {
        Ok(Some(command)) => command,
        Ok(None) => return 0,
        Err(err) => {
            eprintln!("Error: {err}");
            return EXIT_USAGE;
        }
    };

    let theme = select_theme(args.style, &config);
    let service = NoteService::new(JsonNoteRepository::new(config.notes_path()));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match termcal_core::run(&command, &service, today, &theme, &mut out) {
        Ok(()) => 0,
        Err(err) => {
            error!("event=cli_dispatch module=cli status=error error={err}");
            eprintln!("Error: {err}");
            if err.is_user_error() {
                EXIT_USAGE
            } else {
                EXIT_FATAL
            }
        }
    }
}

fn setup_logging(config: &AppConfig) {
    let log_dir = std::path::absolute(&config.log_dir).unwrap_or_else(|_| config.log_dir.clone());
    if let Err(err) = init_logging(config.log_level, &log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }
}

fn select_theme(style: Option<OutputStyle>, config: &AppConfig) -> Theme {
    let style = style.unwrap_or_else(|| {
        if io::stdout().is_terminal() && !config.no_color {
            OutputStyle::Ansi
        } else {
            OutputStyle::Plain
        }
    });
    style.theme()
}
