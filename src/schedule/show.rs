use serde::Serialize;

use super::slot_utils::times_conflict;
use super::types::Day;

/// One showing of a play
/// available - this slot can still be chosen
/// attended - this slot has been chosen to attend the play
#[derive(Debug, Clone, Serialize)]
pub struct Slot {
    day: Day,
    hour: f64,
    available: bool,
    attended: bool,
}

impl Slot {
    pub fn new(day: Day, hour: f64) -> Self {
        Slot {
            day,
            hour,
            available: true,
            attended: false,
        }
    }

    pub fn day(&self) -> &Day {
        &self.day
    }

    pub fn hour(&self) -> f64 {
        self.hour
    }

    #[cfg(test)]
    pub fn is_available(&self) -> bool {
        self.available
    }

    #[cfg(test)]
    pub fn is_attended(&self) -> bool {
        self.attended
    }

    pub fn conflicts_with(&self, day: &Day, hour: f64) -> bool {
        times_conflict(&self.day, self.hour, day, hour)
    }

    pub fn mark_attended(&mut self) {
        self.attended = true;
    }

    pub fn mark_unavailable(&mut self) {
        self.available = false;
    }

    pub fn mark_available(&mut self) {
        self.available = true;
    }

    pub fn mark_unattended(&mut self) {
        self.attended = false;
    }
}

/// A play with all of its showings.
///
/// `num_available` caches how many slots are still available so the
/// flexibility ordering does not rescan every show. All slot mutations go
/// through `Show` so the count stays exact.
#[derive(Debug, Clone, Serialize)]
pub struct Show {
    title: String,
    venue: String,
    times: Vec<Slot>,
    num_available: usize,
    time_attending: Option<usize>,
}

impl Show {
    pub fn new(title: impl Into<String>, venue: impl Into<String>) -> Self {
        Show {
            title: title.into(),
            venue: venue.into(),
            times: Vec::new(),
            num_available: 0,
            time_attending: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn venue(&self) -> &str {
        &self.venue
    }

    pub fn times(&self) -> &[Slot] {
        &self.times
    }

    pub fn num_available(&self) -> usize {
        self.num_available
    }

    #[cfg(test)]
    pub fn is_attended(&self) -> bool {
        self.time_attending.is_some()
    }

    /// Index into `times()` of the slot being attended
    #[cfg(test)]
    pub fn time_attending(&self) -> Option<usize> {
        self.time_attending
    }

    pub fn attending(&self) -> Option<&Slot> {
        self.time_attending.map(|idx| &self.times[idx])
    }

    /// Appends a showing. Duplicate (day, hour) pairs are kept as separate slots.
    pub fn add_slot(&mut self, day: Day, hour: f64) {
        self.times.push(Slot::new(day, hour));
        self.num_available += 1;
    }

    /// First available slot in input order
    pub fn first_available(&self) -> Option<usize> {
        self.times.iter().position(|slot| slot.available)
    }

    /// Exact match on day and hour, not the conflict window
    pub fn has_slot_at(&self, day: &Day, hour: f64) -> bool {
        self.slot_index_at(day, hour).is_some()
    }

    pub fn slot_index_at(&self, day: &Day, hour: f64) -> Option<usize> {
        self.times
            .iter()
            .position(|slot| slot.day == *day && slot.hour == hour)
    }

    /// Marks every available slot within the conflict window of (day, hour)
    /// unavailable. Returns how many slots were newly invalidated.
    pub fn invalidate_overlapping(&mut self, day: &Day, hour: f64) -> usize {
        let mut invalidated = 0;
        for slot in self.times.iter_mut() {
            if slot.available && slot.conflicts_with(day, hour) {
                slot.mark_unavailable();
                invalidated += 1;
            }
        }
        self.num_available -= invalidated;
        invalidated
    }

    /// True if some slot outside the window of (day, hour) is still usable,
    /// counting the slot currently attended.
    pub fn has_alternative_to(&self, day: &Day, hour: f64) -> bool {
        self.times.iter().enumerate().any(|(idx, slot)| {
            (slot.available || self.time_attending == Some(idx)) && !slot.conflicts_with(day, hour)
        })
    }

    /// Commits to attending the slot at `idx`
    pub fn commit(&mut self, idx: usize) {
        let slot = &mut self.times[idx];
        if slot.available {
            slot.mark_unavailable();
            self.num_available -= 1;
        }
        slot.mark_attended();
        self.time_attending = Some(idx);
    }

    /// Gives up the attended slot, making it available again.
    /// Returns the index of the released slot.
    pub fn demote(&mut self) -> Option<usize> {
        let idx = self.time_attending.take()?;
        let slot = &mut self.times[idx];
        slot.mark_unattended();
        if !slot.available {
            slot.mark_available();
            self.num_available += 1;
        }
        Some(idx)
    }

    /// Recounts available slots; used to check the cached counter
    #[cfg(test)]
    pub fn live_available(&self) -> usize {
        self.times.iter().filter(|slot| slot.available).count()
    }
}
