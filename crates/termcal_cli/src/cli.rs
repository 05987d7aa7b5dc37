use chrono::NaiveDate;
use getopts::{Matches, Options};
use termcal_core::{resolve_month, CalendarError, Command, MonthStep, OutputStyle};

pub const PROGRAM: &str = "termcal";

/// Parsed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub action: Action,
    pub style: Option<OutputStyle>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Help,
    Version,
    Add {
        date: String,
        text: String,
    },
    Delete {
        date: String,
    },
    List,
    Show {
        year: Option<i32>,
        month: Option<u32>,
        step: MonthStep,
    },
}

impl Action {
    /// Turns a non-informational action into a core command.
    ///
    /// Returns `Ok(None)` for help/version.
    pub fn into_command(self, today: NaiveDate) -> Result<Option<Command>, CalendarError> {
        Ok(Some(match self {
            Self::Help | Self::Version => return Ok(None),
            Self::Add { date, text } => Command::Add { date, text },
            Self::Delete { date } => Command::Delete { date },
            Self::List => Command::List,
            Self::Show { year, month, step } => {
                Command::Show(resolve_month(year, month, step, today)?)
            }
        }))
    }
}

pub fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag("h", "help", "Print this help output");
    opts.optflag("V", "version", "Print version information");
    opts.optopt("y", "year", "Year to show [Default: current year]", "YEAR");
    opts.optopt("m", "month", "Month to show, 1-12 [Default: current month]", "MONTH");
    opts.optflag("n", "next", "Show the month after the selected one");
    opts.optflag("p", "prev", "Show the month before the selected one");
    opts.optopt(
        "a",
        "add",
        "Add or replace the note on a date; the note text follows as free arguments, after `--` when it starts with `-`",
        "YYYY-MM-DD",
    );
    opts.optopt("d", "delete", "Delete the note on a date", "YYYY-MM-DD");
    opts.optflag("l", "list", "List all notes");
    opts.optopt(
        "s",
        "style",
        "Output style: plain, ansi or html [Default: ansi on a terminal]",
        "STYLE",
    );
    opts
}

pub fn usage() -> String {
    let opts = opts();
    let brief = format!(
        "{}\n\n{} [--year N] [--month N] [--next|--prev]\n{} --add YYYY-MM-DD [--] TEXT...\n{} --delete YYYY-MM-DD\n{} --list",
        opts.short_usage(PROGRAM),
        PROGRAM,
        PROGRAM,
        PROGRAM,
        PROGRAM,
    );
    opts.usage(&brief)
}

/// Parses command-line arguments (without the program name).
///
/// Precedence when several actions are given: add, delete, list, show.
pub fn parse(args: Vec<String>) -> Result<Args, String> {
    let matches = opts().parse(args).map_err(|fail| fail.to_string())?;

    let style = match matches.opt_str("style") {
        Some(value) => Some(value.parse::<OutputStyle>().map_err(|err| err.to_string())?),
        None => None,
    };

    let action = if matches.opt_present("help") {
        Action::Help
    } else if matches.opt_present("version") {
        Action::Version
    } else if let Some(date) = matches.opt_str("add") {
        if matches.free.is_empty() {
            return Err("Option 'add' requires note text after the date".to_string());
        }
        Action::Add {
            date,
            text: matches.free.join(" "),
        }
    } else if let Some(date) = matches.opt_str("delete") {
        reject_free(&matches)?;
        Action::Delete { date }
    } else if matches.opt_present("list") {
        reject_free(&matches)?;
        Action::List
    } else {
        reject_free(&matches)?;
        show_action(&matches)?
    };

    Ok(Args { action, style })
}

/// Only `--add` takes free arguments.
fn reject_free(matches: &Matches) -> Result<(), String> {
    match matches.free.first() {
        Some(extra) => Err(format!("Unexpected argument '{extra}'")),
        None => Ok(()),
    }
}

fn show_action(matches: &Matches) -> Result<Action, String> {
    let year = matches
        .opt_get::<i32>("year")
        .map_err(|err| format!("Provided value for option 'year' is invalid: {err}"))?;
    let month = matches
        .opt_get::<u32>("month")
        .map_err(|err| format!("Provided value for option 'month' is invalid: {err}"))?;

    let step = if matches.opt_present("next") {
        MonthStep::Next
    } else if matches.opt_present("prev") {
        MonthStep::Prev
    } else {
        MonthStep::Stay
    };

    Ok(Action::Show { year, month, step })
}

#[cfg(test)]
mod tests {
    use super::{parse, Action};
    use chrono::NaiveDate;
    use termcal_core::{Command, MonthStep, OutputStyle, YearMonth};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn no_arguments_shows_current_month() {
        let parsed = parse(vec![]).unwrap();
        assert_eq!(
            parsed.action,
            Action::Show {
                year: None,
                month: None,
                step: MonthStep::Stay
            }
        );
        assert_eq!(parsed.style, None);
    }

    #[test]
    fn add_collects_free_words_as_text() {
        let parsed = parse(args(&["--add", "2025-03-10", "call", "the", "dentist"])).unwrap();
        assert_eq!(
            parsed.action,
            Action::Add {
                date: "2025-03-10".into(),
                text: "call the dentist".into()
            }
        );
        assert!(parse(args(&["--add", "2025-03-10"])).is_err());
    }

    #[test]
    fn add_text_may_start_with_dash_after_separator() {
        let parsed = parse(args(&["--add", "2025-03-10", "--", "-5 degrees"])).unwrap();
        assert_eq!(
            parsed.action,
            Action::Add {
                date: "2025-03-10".into(),
                text: "-5 degrees".into()
            }
        );
        assert!(super::usage().contains("--add YYYY-MM-DD [--] TEXT..."));
    }

    #[test]
    fn stray_arguments_after_delete_or_list_are_rejected() {
        let err = parse(args(&["--delete", "2025-03-10", "stray"])).unwrap_err();
        assert_eq!(err, "Unexpected argument 'stray'");
        let err = parse(args(&["--list", "x"])).unwrap_err();
        assert_eq!(err, "Unexpected argument 'x'");
    }

    #[test]
    fn action_precedence_is_add_delete_list_show() {
        let parsed = parse(args(&[
            "--list",
            "--delete",
            "2025-01-01",
            "--add",
            "2025-02-02",
            "x",
            "--next",
        ]))
        .unwrap();
        assert!(matches!(parsed.action, Action::Add { .. }));

        let parsed = parse(args(&["--list", "--delete", "2025-01-01"])).unwrap();
        assert_eq!(
            parsed.action,
            Action::Delete {
                date: "2025-01-01".into()
            }
        );

        let parsed = parse(args(&["--year", "2020", "--list"])).unwrap();
        assert_eq!(parsed.action, Action::List);
    }

    #[test]
    fn show_options_parse_and_resolve() {
        let parsed = parse(args(&["-y", "2025", "-m", "12", "--next", "-s", "html"])).unwrap();
        assert_eq!(parsed.style, Some(OutputStyle::Html));

        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let command = parsed.action.into_command(today).unwrap();
        assert_eq!(command, Some(Command::Show(YearMonth::new(2026, 1).unwrap())));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(parse(args(&["--month", "march"])).is_err());
        assert!(parse(args(&["--style", "sepia"])).is_err());
        assert!(parse(args(&["--bogus"])).is_err());
        assert!(parse(args(&["stray"])).is_err());

        let parsed = parse(args(&["--month", "13"])).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(parsed.action.into_command(today).is_err());
    }
}
