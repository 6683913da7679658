//! Event domain model
//!
//! Events are titled time spans. The start never falls after the end: the
//! constructor and both bound setters reject any change that would break
//! this, and a rejected change leaves the event untouched.

use std::cmp::Ordering;
use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use super::audit::{AuditEntry, AuditField, AuditLog};
use super::clock::{SharedClock, SystemClock};
use super::error::{CalendarError, Result};
use super::tag::Tag;
use super::{format_duration, DATETIME_FORMAT};

/// A titled time span with a location, tags and a change history
///
/// Equality compares title, description, location, start, end, created and
/// modified. Tags and the audit log are not part of equality.
#[derive(Clone, Serialize)]
pub struct Event {
    title: String,
    description: String,
    location: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    created: NaiveDateTime,
    modified: NaiveDateTime,
    tags: Vec<Tag>,
    audit_log: AuditLog,
    #[serde(skip)]
    clock: SharedClock,
}

impl Event {
    /// Creates an event stamped with the system clock
    ///
    /// Fails with [`CalendarError::InvalidTimeRange`] when `start` is after `end`.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self> {
        Self::with_clock(SystemClock::shared(), title, description, location, start, end)
    }

    /// Creates an event stamped with the given clock
    pub fn with_clock(
        clock: SharedClock,
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self> {
        CalendarError::check_range(start, end)?;
        Ok(Self::unchecked(clock, title, description, location, start, end))
    }

    /// Builds an event whose range the caller has already checked
    pub(super) fn unchecked(
        clock: SharedClock,
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        debug_assert!(start <= end);
        let now = clock.now();
        Self {
            title: title.into(),
            description: description.into(),
            location: location.into(),
            start,
            end,
            created: now,
            modified: now,
            tags: Vec::new(),
            audit_log: AuditLog::new(),
            clock,
        }
    }

    /// Returns the title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the location
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the start time
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the end time
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns when the event was created
    pub fn created(&self) -> NaiveDateTime {
        self.created
    }

    /// Returns when a field last changed
    pub fn modified(&self) -> NaiveDateTime {
        self.modified
    }

    /// Returns the event's own tags
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Returns the structured change history
    pub fn audit_log(&self) -> &AuditLog {
        &self.audit_log
    }

    /// Returns the audit log rendered as display lines
    pub fn audit_lines(&self) -> Vec<String> {
        self.audit_log.lines()
    }

    /// Time between start and end; never negative
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Time from now until the start; negative once the start has passed
    pub fn reminder(&self) -> Duration {
        self.start - self.clock.now()
    }

    /// Orders two events by start time only
    pub fn chronological(a: &Event, b: &Event) -> Ordering {
        a.start.cmp(&b.start)
    }

    /// Sets the title and records the change
    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        let previous = std::mem::replace(&mut self.title, title.clone());
        self.touch(AuditField::Title, previous, title);
    }

    /// Sets the description and records the change
    pub fn set_description(&mut self, description: impl Into<String>) {
        let description = description.into();
        let previous = std::mem::replace(&mut self.description, description.clone());
        self.touch(AuditField::Description, previous, description);
    }

    /// Sets the location and records the change
    pub fn set_location(&mut self, location: impl Into<String>) {
        let location = location.into();
        let previous = std::mem::replace(&mut self.location, location.clone());
        self.touch(AuditField::Location, previous, location);
    }

    /// Moves the start; fails if it would fall after the current end
    pub fn set_start(&mut self, start: NaiveDateTime) -> Result<()> {
        CalendarError::check_range(start, self.end)?;

        let previous = std::mem::replace(&mut self.start, start);
        self.touch(
            AuditField::Start,
            previous.format(DATETIME_FORMAT).to_string(),
            start.format(DATETIME_FORMAT).to_string(),
        );
        Ok(())
    }

    /// Moves the end; fails if it would fall before the current start
    pub fn set_end(&mut self, end: NaiveDateTime) -> Result<()> {
        CalendarError::check_range(self.start, end)?;

        let previous = std::mem::replace(&mut self.end, end);
        self.touch(
            AuditField::End,
            previous.format(DATETIME_FORMAT).to_string(),
            end.format(DATETIME_FORMAT).to_string(),
        );
        Ok(())
    }

    /// Replaces the whole tag list
    pub fn set_tags(&mut self, tags: Vec<Tag>) {
        let value = tag_list(&tags);
        let previous = tag_list(&std::mem::replace(&mut self.tags, tags));
        self.touch(AuditField::Tags, previous, value);
    }

    /// Refreshes `modified` and records one audit entry
    fn touch(&mut self, field: AuditField, previous: String, value: String) {
        self.modified = self.clock.now();
        self.audit_log
            .record(AuditEntry::new(self.clock.now(), field, previous, value));
    }
}

/// Renders tag names as `[a, b]`
fn tag_list(tags: &[Tag]) -> String {
    let names: Vec<&str> = tags.iter().map(Tag::name).collect();
    format!("[{}]", names.join(", "))
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.description == other.description
            && self.location == other.location
            && self.start == other.start
            && self.end == other.end
            && self.created == other.created
            && self.modified == other.modified
    }
}

impl Eq for Event {}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("location", &self.location)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("created", &self.created)
            .field("modified", &self.modified)
            .field("tags", &self.tags)
            .field("audit_log", &self.audit_log)
            .finish()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Location: {}", self.location)?;
        writeln!(f, "Start: {}", self.start.format(DATETIME_FORMAT))?;
        writeln!(f, "End: {}", self.end.format(DATETIME_FORMAT))?;
        writeln!(f, "Created: {}", self.created.format(DATETIME_FORMAT))?;
        writeln!(f, "Modified: {}", self.modified.format(DATETIME_FORMAT))?;
        writeln!(f, "Duration: {}", format_duration(self.duration()))?;
        writeln!(f, "Reminder: {}", format_duration(self.reminder()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ManualClock;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn clock() -> ManualClock {
        ManualClock::new(at(7, 0))
    }

    fn standup(clock: &ManualClock) -> Event {
        Event::with_clock(clock.shared(), "Standup", "Daily sync", "Room A", at(9, 0), at(9, 15))
            .unwrap()
    }

    #[test]
    fn new_event_starts_clean() {
        let clock = clock();
        let event = standup(&clock);

        assert_eq!(event.created(), at(7, 0));
        assert_eq!(event.modified(), event.created());
        assert!(event.tags().is_empty());
        assert!(event.audit_log().is_empty());
        assert_eq!(event.duration(), Duration::minutes(15));
    }

    #[test]
    fn inverted_range_rejected_at_construction() {
        let err = Event::with_clock(clock().shared(), "Bad", "", "", at(10, 0), at(9, 0))
            .unwrap_err();

        assert_eq!(
            err,
            CalendarError::InvalidTimeRange {
                start: at(10, 0),
                end: at(9, 0)
            }
        );
    }

    #[test]
    fn set_start_after_end_is_rejected_atomically() {
        let clock = clock();
        let mut event = standup(&clock);
        let before = event.clone();

        clock.advance(Duration::minutes(1));
        let result = event.set_start(at(9, 30));

        assert!(matches!(result, Err(CalendarError::InvalidTimeRange { .. })));
        assert_eq!(event, before);
        assert_eq!(event.start(), at(9, 0));
        assert!(event.audit_log().is_empty());
    }

    #[test]
    fn set_end_before_start_is_rejected_atomically() {
        let clock = clock();
        let mut event = standup(&clock);

        clock.advance(Duration::minutes(1));
        let result = event.set_end(at(8, 59));

        assert!(matches!(result, Err(CalendarError::InvalidTimeRange { .. })));
        assert_eq!(event.end(), at(9, 15));
        assert_eq!(event.modified(), at(7, 0));
        assert!(event.audit_log().is_empty());
    }

    #[test]
    fn bounds_may_meet() {
        let mut event = standup(&clock());

        event.set_start(at(9, 15)).unwrap();
        assert_eq!(event.duration(), Duration::zero());

        event.set_end(at(9, 15)).unwrap();
        assert_eq!(event.audit_log().len(), 2);
    }

    #[test]
    fn set_start_records_audit_entry() {
        let clock = clock();
        let mut event = standup(&clock);

        clock.advance(Duration::minutes(3));
        event.set_start(at(8, 45)).unwrap();

        assert_eq!(event.start(), at(8, 45));
        assert_eq!(event.modified(), at(7, 3));
        assert_eq!(
            event.audit_lines(),
            ["[2024-01-01T07:03:00] Start time changed to 2024-01-01T08:45:00"]
        );

        let entry = event.audit_log().last().unwrap();
        assert_eq!(entry.field, AuditField::Start);
        assert_eq!(entry.previous, "2024-01-01T09:00:00");
    }

    #[test]
    fn every_field_setter_appends_one_entry() {
        let clock = clock();
        let mut event = standup(&clock);

        let steps: Vec<Box<dyn Fn(&mut Event)>> = vec![
            Box::new(|e: &mut Event| e.set_title("Retro")),
            Box::new(|e: &mut Event| e.set_description("Weekly")),
            Box::new(|e: &mut Event| e.set_location("Room B")),
            Box::new(|e: &mut Event| e.set_start(at(8, 30)).unwrap()),
            Box::new(|e: &mut Event| e.set_end(at(10, 0)).unwrap()),
            Box::new(|e: &mut Event| e.set_tags(vec![Tag::new("work", "")])),
        ];

        for (i, step) in steps.iter().enumerate() {
            let previous = event.modified();
            clock.advance(Duration::seconds(1));
            step(&mut event);

            assert_eq!(event.audit_log().len(), i + 1);
            assert!(event.modified() > previous);
        }

        let lines = event.audit_lines();
        assert!(lines[0].ends_with("Title changed to Retro"));
        assert!(lines[1].ends_with("Description changed to Weekly"));
        assert!(lines[2].ends_with("Location changed to Room B"));
        assert!(lines[4].ends_with("End time changed to 2024-01-01T10:00:00"));
        assert!(lines[5].ends_with("Tags changed to [work]"));
    }

    #[test]
    fn set_tags_replaces_wholesale() {
        let mut event = standup(&clock());

        event.set_tags(vec![Tag::new("a", ""), Tag::new("b", "")]);
        event.set_tags(vec![Tag::new("c", "")]);

        let names: Vec<_> = event.tags().iter().map(Tag::name).collect();
        assert_eq!(names, ["c"]);

        let last = event.audit_log().last().unwrap();
        assert_eq!(last.previous, "[a, b]");
        assert_eq!(last.value, "[c]");
    }

    #[test]
    fn reminder_is_signed() {
        let clock = clock();
        let event = standup(&clock);

        assert_eq!(event.reminder(), Duration::hours(2));

        clock.set(at(9, 30));
        assert_eq!(event.reminder(), Duration::minutes(-30));
    }

    #[test]
    fn equality_ignores_tags_and_audit_log() {
        let clock = clock();
        let a = standup(&clock);
        let mut b = a.clone();

        // Same modified stamp, different tags and history
        b.set_tags(vec![Tag::new("x", "")]);
        b.modified = a.modified;

        assert_eq!(a, b);
        assert_ne!(a.audit_log().len(), b.audit_log().len());
    }

    #[test]
    fn equality_sees_modified() {
        let clock = clock();
        let a = standup(&clock);
        let mut b = a.clone();

        clock.advance(Duration::seconds(1));
        b.set_title("Standup");

        assert_ne!(a, b);
    }

    #[test]
    fn chronological_orders_by_start_only() {
        let clock = clock();
        let early = standup(&clock);
        let late = Event::with_clock(clock.shared(), "Lunch", "", "", at(12, 0), at(13, 0)).unwrap();
        let same_start =
            Event::with_clock(clock.shared(), "Other", "", "", at(9, 0), at(11, 0)).unwrap();

        assert_eq!(Event::chronological(&early, &late), Ordering::Less);
        assert_eq!(Event::chronological(&late, &early), Ordering::Greater);
        assert_eq!(Event::chronological(&early, &same_start), Ordering::Equal);
        assert_ne!(early, same_start);
    }

    #[test]
    fn display_lists_fields() {
        let text = standup(&clock()).to_string();

        assert!(text.contains("Title: Standup"));
        assert!(text.contains("Location: Room A"));
        assert!(text.contains("Start: 2024-01-01T09:00:00"));
        assert!(text.contains("End: 2024-01-01T09:15:00"));
        assert!(text.contains("Duration: 15m"));
        assert!(text.contains("Reminder: 2h"));
    }

    fn instant() -> impl Strategy<Value = NaiveDateTime> {
        // 2000-01-01 .. ~2060 in seconds
        (946_684_800i64..2_840_000_000i64)
            .prop_map(|secs| chrono::DateTime::from_timestamp(secs, 0).unwrap().naive_utc())
    }

    proptest! {
        #[test]
        fn duration_matches_bounds(a in instant(), b in instant()) {
            let (start, end) = if a <= b { (a, b) } else { (b, a) };
            let event = Event::new("T", "D", "L", start, end).unwrap();

            prop_assert_eq!(event.duration(), end - start);
            prop_assert!(event.duration() >= Duration::zero());
        }

        #[test]
        fn inverting_mutation_always_fails(a in instant(), b in instant()) {
            prop_assume!(a != b);
            let (start, end) = if a < b { (a, b) } else { (b, a) };
            let mut event = Event::new("T", "D", "L", start, end).unwrap();
            let before = event.clone();

            prop_assert!(event.set_start(end + Duration::seconds(1)).is_err());
            prop_assert!(event.set_end(start - Duration::seconds(1)).is_err());
            prop_assert_eq!(&event, &before);
            prop_assert!(event.audit_log().is_empty());
        }
    }
}
