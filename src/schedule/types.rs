use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, Weekday};
use serde::{Serialize, Serializer};

use crate::error::ScheduleError;
use super::show::Show;

/// Day a showtime falls on.
///
/// Catalogs label days with dates, weekday names, or arbitrary text. Equality
/// is exact; ordering is chronological within each kind, then
/// dates < weekdays < labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Day {
    Date(NaiveDate),
    Weekday(Weekday),
    Label(String),
}

impl Day {
    pub fn parse(text: &str) -> Day {
        let text = text.trim();
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return Day::Date(date);
        }
        if let Ok(weekday) = text.parse::<Weekday>() {
            return Day::Weekday(weekday);
        }
        Day::Label(text.to_string())
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Day::Date(_) => 0,
            Day::Weekday(_) => 1,
            Day::Label(_) => 2,
        }
    }
}

impl Ord for Day {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Day::Date(a), Day::Date(b)) => a.cmp(b),
            (Day::Weekday(a), Day::Weekday(b)) => {
                a.num_days_from_monday().cmp(&b.num_days_from_monday())
            }
            (Day::Label(a), Day::Label(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

impl PartialOrd for Day {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Day::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Day::Weekday(weekday) => write!(f, "{}", weekday),
            Day::Label(label) => f.write_str(label),
        }
    }
}

impl Serialize for Day {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A repair: `bumped` gives up its slot so the candidate can attend its own
/// slot at index `candidate_slot`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repair {
    pub bumped: usize,
    pub candidate_slot: usize,
}

/// One line of the final attendance plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanEntry {
    pub title: String,
    pub venue: String,
    pub day: Day,
    pub hour: f64,
}

/// Result of a scheduling run. Holds every show, including the ones left
/// unscheduled when the run failed.
#[derive(Debug, Clone)]
pub struct Plan {
    pub(super) shows: Vec<Show>,
    pub(super) scheduled: Vec<usize>,
    pub(super) unscheduled: Vec<usize>,
    pub(super) repairs: usize,
    pub(super) failure: Option<ScheduleError>,
}

impl Plan {
    #[cfg(test)]
    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    /// Scheduled shows in commit order
    pub fn scheduled(&self) -> impl Iterator<Item = &Show> {
        self.scheduled.iter().map(|&idx| &self.shows[idx])
    }

    pub fn unscheduled(&self) -> impl Iterator<Item = &Show> {
        self.unscheduled.iter().map(|&idx| &self.shows[idx])
    }

    pub fn failure(&self) -> Option<&ScheduleError> {
        self.failure.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.failure.is_none() && self.unscheduled.is_empty()
    }

    pub fn repairs(&self) -> usize {
        self.repairs
    }

    pub fn total(&self) -> usize {
        self.shows.len()
    }

    pub fn scheduled_count(&self) -> usize {
        self.scheduled.len()
    }

    /// Scheduled shows sorted by day, then hour, then title
    pub fn entries(&self) -> Vec<PlanEntry> {
        let mut entries: Vec<PlanEntry> = self
            .scheduled()
            .filter_map(|show| {
                show.attending().map(|slot| PlanEntry {
                    title: show.title().to_string(),
                    venue: show.venue().to_string(),
                    day: slot.day().clone(),
                    hour: slot.hour(),
                })
            })
            .collect();
        entries.sort_by(|a, b| {
            a.day
                .cmp(&b.day)
                .then(a.hour.total_cmp(&b.hour))
                .then_with(|| a.title.cmp(&b.title))
        });
        entries
    }

    /// Pairs of scheduled titles whose attended slots conflict
    #[cfg(test)]
    pub fn conflicts(&self) -> Vec<(String, String)> {
        let attending: Vec<(&Show, _)> = self
            .scheduled()
            .filter_map(|show| show.attending().map(|slot| (show, slot)))
            .collect();
        let mut conflicts = Vec::new();
        for (i, (show_a, slot_a)) in attending.iter().enumerate() {
            for (show_b, slot_b) in &attending[i + 1..] {
                if slot_a.conflicts_with(slot_b.day(), slot_b.hour()) {
                    conflicts.push((show_a.title().to_string(), show_b.title().to_string()));
                }
            }
        }
        conflicts
    }
}
