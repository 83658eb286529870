use std::collections::VecDeque;

use log::{debug, info, warn};

use crate::error::ScheduleError;
use super::repair::{apply_repair, find_repair_target};
use super::show::Show;
use super::slot_utils::format_hour;
use super::types::{Plan, Repair};

/// Tuning knobs for a scheduling run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Repairs allowed before the run is abandoned. Bumping can cycle on
    /// adversarial catalogs, so this bounds the run.
    pub max_repairs: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig { max_repairs: 10_000 }
    }
}

/// What a single scheduling step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// `show` took its first available slot
    Committed { show: usize, slot: usize },
    /// `show` took `slot` after `bumped` was sent back to the queue
    Repaired { show: usize, slot: usize, bumped: usize },
    /// Nothing left to schedule
    Finished,
}

/// Greedy most-constrained-first scheduler with single-step repair.
///
/// Shows live in an arena; `unscheduled` and `scheduled` hold indices into it.
/// The flexibility ordering is applied once, when the scheduler is built.
pub struct Scheduler {
    shows: Vec<Show>,
    unscheduled: VecDeque<usize>,
    scheduled: Vec<usize>,
    repairs: usize,
    failure: Option<ScheduleError>,
    config: SchedulerConfig,
}

impl Scheduler {
    #[cfg(test)]
    pub fn new(shows: Vec<Show>) -> Self {
        Self::with_config(shows, SchedulerConfig::default())
    }

    pub fn with_config(shows: Vec<Show>, config: SchedulerConfig) -> Self {
        // Stable sort: input order breaks ties between equally flexible shows
        let mut order: Vec<usize> = (0..shows.len()).collect();
        order.sort_by_key(|&idx| shows[idx].num_available());

        Scheduler {
            shows,
            unscheduled: order.into(),
            scheduled: Vec::new(),
            repairs: 0,
            failure: None,
            config,
        }
    }

    #[cfg(test)]
    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    #[cfg(test)]
    pub fn unscheduled(&self) -> impl Iterator<Item = usize> + '_ {
        self.unscheduled.iter().copied()
    }

    #[cfg(test)]
    pub fn scheduled(&self) -> &[usize] {
        &self.scheduled
    }

    /// Schedules the least flexible remaining show, repairing if it has no
    /// slot left. A failure is sticky: later calls return the same error.
    pub fn step(&mut self) -> Result<StepEvent, ScheduleError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        let Some(&candidate) = self.unscheduled.front() else {
            return Ok(StepEvent::Finished);
        };

        let (event, slot) = match self.shows[candidate].first_available() {
            Some(slot) => (StepEvent::Committed { show: candidate, slot }, slot),
            None => match self.repair(candidate) {
                Ok(repair) => {
                    let event = StepEvent::Repaired {
                        show: candidate,
                        slot: repair.candidate_slot,
                        bumped: repair.bumped,
                    };
                    (event, repair.candidate_slot)
                }
                Err(err) => {
                    self.failure = Some(err.clone());
                    return Err(err);
                }
            },
        };

        self.commit(candidate, slot);
        self.unscheduled.pop_front();
        self.scheduled.push(candidate);
        Ok(event)
    }

    fn repair(&mut self, candidate: usize) -> Result<Repair, ScheduleError> {
        let repair = find_repair_target(&self.shows, &self.scheduled, candidate).ok_or_else(|| {
            ScheduleError::Infeasible {
                title: self.shows[candidate].title().to_string(),
            }
        })?;
        if self.repairs >= self.config.max_repairs {
            return Err(ScheduleError::RepairLimitExceeded {
                limit: self.config.max_repairs,
            });
        }

        let (day, hour) = apply_repair(&mut self.shows, candidate, &repair);
        self.scheduled.retain(|&idx| idx != repair.bumped);
        self.unscheduled.push_back(repair.bumped);
        self.repairs += 1;

        info!(
            "Bumped \"{}\" so \"{}\" can take {} {}",
            self.shows[repair.bumped].title(),
            self.shows[candidate].title(),
            day,
            format_hour(hour)
        );
        Ok(repair)
    }

    fn commit(&mut self, candidate: usize, slot: usize) {
        self.shows[candidate].commit(slot);
        let attended = &self.shows[candidate].times()[slot];
        let (day, hour) = (attended.day().clone(), attended.hour());
        debug!(
            "Attending \"{}\" at {} {}",
            self.shows[candidate].title(),
            day,
            format_hour(hour)
        );

        // Every other show is in one of the two working sets
        for (idx, show) in self.shows.iter_mut().enumerate() {
            if idx != candidate {
                show.invalidate_overlapping(&day, hour);
            }
        }
    }

    /// Steps until every show is scheduled or the run fails
    pub fn run(mut self) -> Plan {
        loop {
            match self.step() {
                Ok(StepEvent::Finished) => break,
                Ok(StepEvent::Committed { show, slot }) => {
                    debug!("Step: show {} committed to slot {}", show, slot);
                }
                Ok(StepEvent::Repaired { show, slot, bumped }) => {
                    debug!("Step: show {} took slot {} after bumping show {}", show, slot, bumped);
                }
                Err(err) => {
                    warn!(
                        "Scheduling stopped with {} of {} shows placed: {}",
                        self.scheduled.len(),
                        self.shows.len(),
                        err
                    );
                    break;
                }
            }
        }
        self.into_plan()
    }

    fn into_plan(self) -> Plan {
        Plan {
            shows: self.shows,
            scheduled: self.scheduled,
            unscheduled: self.unscheduled.into(),
            repairs: self.repairs,
            failure: self.failure,
        }
    }
}

/// Builds a scheduler for `shows` and runs it to completion
pub fn plan_attendance(shows: Vec<Show>, config: SchedulerConfig) -> Plan {
    Scheduler::with_config(shows, config).run()
}
