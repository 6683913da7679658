//! Interactive menu shell
//!
//! Creates one calendar per session and loops over the menu until the user
//! exits or input runs out. Malformed answers are reported and the same
//! prompt is asked again.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

use super::input::{InputError, LineSource};
use super::output::Output;
use crate::domain::{Calendar, Entry, Event, SharedClock, Tag, Task};

/// Menu options, numbered as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddTask,
    AddEvent,
    AddTag,
    ListEvents,
    ListTags,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::AddTask,
        MenuChoice::AddEvent,
        MenuChoice::AddTag,
        MenuChoice::ListEvents,
        MenuChoice::ListTags,
        MenuChoice::Exit,
    ];

    pub fn number(&self) -> usize {
        match self {
            MenuChoice::AddTask => 1,
            MenuChoice::AddEvent => 2,
            MenuChoice::AddTag => 3,
            MenuChoice::ListEvents => 4,
            MenuChoice::ListTags => 5,
            MenuChoice::Exit => 6,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::AddTask => "Add a task",
            MenuChoice::AddEvent => "Add an event",
            MenuChoice::AddTag => "Add a tag",
            MenuChoice::ListEvents => "View tasks/events",
            MenuChoice::ListTags => "View tags",
            MenuChoice::Exit => "Exit",
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

impl FromStr for MenuChoice {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        s.parse::<usize>()
            .ok()
            .and_then(|n| MenuChoice::ALL.into_iter().find(|c| c.number() == n))
            .ok_or_else(|| InputError::InvalidChoice(s.to_string()))
    }
}

/// Prompts for a calendar name and description, skipping any that are preset
///
/// Returns `None` if input ends before both are known.
pub fn create_calendar<S: LineSource>(
    source: &mut S,
    clock: SharedClock,
    name: Option<String>,
    description: Option<String>,
) -> Result<Option<Calendar>> {
    let name = match name {
        Some(name) => name,
        None => match source.read_line("Enter the name of your calendar")? {
            Some(name) => name,
            None => return Ok(None),
        },
    };
    let description = match description {
        Some(description) => description,
        None => match source.read_line("Enter a description for your calendar")? {
            Some(description) => description,
            None => return Ok(None),
        },
    };

    Ok(Some(Calendar::with_clock(clock, name, description)))
}

/// The menu loop over one calendar
pub struct Shell<'a, S> {
    source: S,
    output: &'a Output,
    calendar: Calendar,
    clock: SharedClock,
    sort_events: bool,
}

impl<'a, S: LineSource> Shell<'a, S> {
    pub fn new(source: S, output: &'a Output, calendar: Calendar, clock: SharedClock) -> Self {
        Self {
            source,
            output,
            calendar,
            clock,
            sort_events: true,
        }
    }

    /// Chooses between start-time order and insertion order for listings
    pub fn with_sorted_events(mut self, sort_events: bool) -> Self {
        self.sort_events = sort_events;
        self
    }

    /// Runs the menu until exit or end of input, returning the calendar
    pub fn run(mut self) -> Result<Calendar> {
        self.output.verbose_ctx(
            "shell",
            &format!("Session started for calendar '{}'", self.calendar.name()),
        );

        loop {
            self.print_menu();

            let prompt = "Enter the number of the option you would like to select";
            let Some(answer) = self.source.read_line(prompt)? else {
                self.output.verbose_ctx("shell", "End of input");
                break;
            };

            let choice = match answer.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(e) => {
                    self.output.error(&e.to_string());
                    continue;
                }
            };
            self.output.verbose_ctx("shell", &format!("Selected: {}", choice.label()));

            let finished = match choice {
                MenuChoice::AddTask => self.add_task()?.is_none(),
                MenuChoice::AddEvent => self.add_event()?.is_none(),
                MenuChoice::AddTag => self.add_tag()?.is_none(),
                MenuChoice::ListEvents => {
                    self.list_events();
                    false
                }
                MenuChoice::ListTags => {
                    self.list_tags();
                    false
                }
                MenuChoice::Exit => true,
            };

            if finished {
                break;
            }
        }

        self.output.verbose_ctx(
            "shell",
            &format!(
                "Session ended with {} event(s) and {} tag(s)",
                self.calendar.events().len(),
                self.calendar.tags().len()
            ),
        );
        Ok(self.calendar)
    }

    fn print_menu(&self) {
        self.output.text("Options:\n");
        for choice in MenuChoice::ALL {
            self.output.text(&format!("{}\n", choice));
        }
    }

    fn add_task(&mut self) -> Result<Option<()>> {
        let Some(title) = self.source.read_line("Enter the name of the task")? else {
            return Ok(None);
        };
        let Some(description) = self.source.read_line("Enter a description for the task")? else {
            return Ok(None);
        };
        let Some(location) = self.source.read_line("Enter the location for this task")? else {
            return Ok(None);
        };
        let Some(due) = self.ask_datetime("due date for this task")? else {
            return Ok(None);
        };

        let task = Entry::from(Task::with_clock(
            self.clock.clone(),
            title,
            description,
            location,
            due,
        ));
        self.output.entry_added(&task);
        self.calendar.add_event(task);
        Ok(Some(()))
    }

    fn add_event(&mut self) -> Result<Option<()>> {
        let Some(title) = self.source.read_line("Enter the name of the event")? else {
            return Ok(None);
        };
        let Some(description) = self.source.read_line("Enter a description for the event")? else {
            return Ok(None);
        };
        let Some(location) = self.source.read_line("Enter the location for this event")? else {
            return Ok(None);
        };

        let event = loop {
            let Some(start) = self.ask_datetime("start time for the event")? else {
                return Ok(None);
            };
            let Some(end) = self.ask_datetime("end time for the event")? else {
                return Ok(None);
            };

            match Event::with_clock(
                self.clock.clone(),
                title.as_str(),
                description.as_str(),
                location.as_str(),
                start,
                end,
            ) {
                Ok(event) => break event,
                Err(e) => self.output.error(&e.to_string()),
            }
        };

        let event = Entry::from(event);
        self.output.entry_added(&event);
        self.calendar.add_event(event);
        Ok(Some(()))
    }

    fn add_tag(&mut self) -> Result<Option<()>> {
        let Some(name) = self.source.read_line("Enter the name of the tag")? else {
            return Ok(None);
        };
        let Some(description) = self.source.read_line("Enter a description for the tag")? else {
            return Ok(None);
        };

        let tag = Tag::with_clock(self.clock.clone(), name, description);
        self.output.tag_added(&tag);
        self.calendar.add_tag(tag);
        Ok(Some(()))
    }

    fn list_events(&self) {
        let entries: Vec<&Entry> = if self.sort_events {
            self.calendar.events_chronological()
        } else {
            self.calendar.events().iter().collect()
        };
        self.output.entries(&entries);
    }

    fn list_tags(&self) {
        self.output.tags(self.calendar.tags());
    }

    /// Asks for year, month, day, hour and minute until they form a valid time
    fn ask_datetime(&mut self, what: &str) -> Result<Option<NaiveDateTime>> {
        loop {
            self.output.text(&format!("Enter the {}\n", what));

            let Some(year) = self.ask_number::<i32>("Enter the year")? else {
                return Ok(None);
            };
            let Some(month) = self.ask_number::<u32>("Enter the month")? else {
                return Ok(None);
            };
            let Some(day) = self.ask_number::<u32>("Enter the day")? else {
                return Ok(None);
            };
            let Some(hour) = self.ask_number::<u32>("Enter the hour")? else {
                return Ok(None);
            };
            let Some(minute) = self.ask_number::<u32>("Enter the minute")? else {
                return Ok(None);
            };

            let datetime = NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|date| date.and_hms_opt(hour, minute, 0));
            match datetime {
                Some(datetime) => return Ok(Some(datetime)),
                None => {
                    let err = InputError::InvalidDate {
                        year,
                        month,
                        day,
                        hour,
                        minute,
                    };
                    self.output.error(&err.to_string());
                }
            }
        }
    }

    /// Asks until the answer parses as a number
    fn ask_number<T: FromStr>(&mut self, prompt: &str) -> Result<Option<T>> {
        loop {
            let Some(answer) = self.source.read_line(prompt)? else {
                return Ok(None);
            };
            match answer.trim().parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => {
                    let err = InputError::InvalidNumber(answer.trim().to_string());
                    self.output.error(&err.to_string());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::input::ScriptedSource;
    use crate::cli::OutputFormat;
    use crate::domain::ManualClock;
    use chrono::Duration;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn quiet() -> Output {
        Output::new(OutputFormat::Json, false)
    }

    fn run_script(answers: &[&str]) -> (Calendar, ScriptedSource) {
        let clock = ManualClock::new(at(1, 7, 0));
        let output = quiet();
        let calendar = Calendar::with_clock(clock.shared(), "Work", "My work cal");
        let mut source = ScriptedSource::new(answers.iter().copied());

        let calendar = Shell::new(&mut source, &output, calendar, clock.shared())
            .run()
            .unwrap();
        (calendar, source)
    }

    #[test]
    fn menu_choice_parsing() {
        assert_eq!("1".parse::<MenuChoice>(), Ok(MenuChoice::AddTask));
        assert_eq!(" 6 ".parse::<MenuChoice>(), Ok(MenuChoice::Exit));
        assert_eq!(
            "7".parse::<MenuChoice>(),
            Err(InputError::InvalidChoice("7".into()))
        );
        assert!("abc".parse::<MenuChoice>().is_err());
        assert_eq!(MenuChoice::ListTags.to_string(), "5. View tags");
    }

    #[test]
    fn create_calendar_prompts_for_missing_fields() {
        let clock = ManualClock::new(at(1, 7, 0));
        let mut source = ScriptedSource::new(["My work cal"]);

        let calendar = create_calendar(&mut source, clock.shared(), Some("Work".into()), None)
            .unwrap()
            .unwrap();

        assert_eq!(calendar.name(), "Work");
        assert_eq!(calendar.description(), "My work cal");
        assert_eq!(source.prompts(), ["Enter a description for your calendar"]);
    }

    #[test]
    fn create_calendar_stops_at_end_of_input() {
        let clock = ManualClock::new(at(1, 7, 0));
        let mut source = ScriptedSource::new(Vec::<String>::new());

        let calendar = create_calendar(&mut source, clock.shared(), None, None).unwrap();
        assert!(calendar.is_none());
    }

    #[test]
    fn add_event_then_exit() {
        let (calendar, _) = run_script(&[
            "2", "Standup", "Daily sync", "Room A", //
            "2024", "1", "1", "9", "0", //
            "2024", "1", "1", "9", "15", //
            "6",
        ]);

        assert_eq!(calendar.events().len(), 1);
        let event = calendar.events()[0].event();
        assert_eq!(event.title(), "Standup");
        assert_eq!(event.start(), at(1, 9, 0));
        assert_eq!(event.duration(), Duration::minutes(15));
    }

    #[test]
    fn inverted_event_range_is_reprompted() {
        let (calendar, source) = run_script(&[
            "2", "Review", "", "", //
            "2024", "1", "1", "10", "0", //
            "2024", "1", "1", "9", "0", //
            "2024", "1", "1", "9", "0", //
            "2024", "1", "1", "10", "0", //
            "6",
        ]);

        assert_eq!(calendar.events().len(), 1);
        assert_eq!(calendar.events()[0].event().start(), at(1, 9, 0));

        let year_prompts = source
            .prompts()
            .iter()
            .filter(|p| p.as_str() == "Enter the year")
            .count();
        assert_eq!(year_prompts, 4);
    }

    #[test]
    fn add_task_and_tag() {
        let (calendar, _) = run_script(&[
            "1", "Pay rent", "Monthly", "Home", //
            "2024", "1", "31", "17", "0", //
            "3", "finance", "Money things", //
        ]);

        assert_eq!(calendar.tasks().count(), 1);
        let task = calendar.tasks().next().unwrap();
        assert_eq!(task.start(), task.end());
        assert!(!task.is_completed());

        assert_eq!(calendar.tags().len(), 1);
        assert_eq!(calendar.tags()[0].name(), "finance");
    }

    #[test]
    fn malformed_numbers_repeat_the_same_prompt() {
        let (calendar, source) = run_script(&[
            "1", "Call", "", "", //
            "twenty", "2024", "1", "x", "5", "12", "0", //
            "6",
        ]);

        assert_eq!(calendar.events().len(), 1);
        assert_eq!(calendar.events()[0].event().start(), at(5, 12, 0));

        let prompts = source.prompts();
        let first_year = prompts.iter().position(|p| p == "Enter the year").unwrap();
        assert_eq!(prompts[first_year + 1], "Enter the year");
    }

    #[test]
    fn impossible_date_restarts_the_datetime() {
        let (calendar, _) = run_script(&[
            "1", "Leap", "", "", //
            "2023", "2", "29", "9", "0", //
            "2024", "2", "29", "9", "0", //
        ]);

        let start = calendar.events()[0].event().start();
        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn invalid_choice_keeps_looping() {
        let (calendar, source) = run_script(&["9", "hello", "4", "5", "6"]);

        assert!(calendar.events().is_empty());
        let menu_prompts = source
            .prompts()
            .iter()
            .filter(|p| p.starts_with("Enter the number"))
            .count();
        assert_eq!(menu_prompts, 5);
    }

    #[test]
    fn end_of_input_mid_prompt_ends_session() {
        let (calendar, _) = run_script(&["2", "Half", "finished"]);
        assert!(calendar.events().is_empty());
    }
}
