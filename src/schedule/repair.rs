use log::debug;

use super::show::Show;
use super::types::{Day, Repair};

/// Looks for an already-scheduled show to bump so `candidate` can attend.
///
/// Scheduled shows are tried in commit order, and for each one the
/// candidate's slots in input order; the first viable exact match wins.
/// A match is viable when no other scheduled show attends a conflicting slot
/// and the bumped show keeps a slot of its own to fall back to.
pub fn find_repair_target(shows: &[Show], scheduled: &[usize], candidate: usize) -> Option<Repair> {
    for &bumped in scheduled {
        let blocking = &shows[bumped];
        for (slot_idx, slot) in shows[candidate].times().iter().enumerate() {
            let (day, hour) = (slot.day(), slot.hour());
            if !blocking.has_slot_at(day, hour) {
                continue;
            }
            if !blocking.has_alternative_to(day, hour) {
                debug!("{} has nowhere else to go, not bumping it", blocking.title());
                continue;
            }
            if is_blocked_by_others(shows, scheduled, bumped, day, hour) {
                continue;
            }
            return Some(Repair {
                bumped,
                candidate_slot: slot_idx,
            });
        }
    }
    None
}

fn is_blocked_by_others(shows: &[Show], scheduled: &[usize], bumped: usize, day: &Day, hour: f64) -> bool {
    scheduled
        .iter()
        .filter(|&&idx| idx != bumped)
        .filter_map(|&idx| shows[idx].attending())
        .any(|slot| slot.conflicts_with(day, hour))
}

/// Demotes the bumped show and blocks its slots around the freed time.
/// Returns the (day, hour) the candidate will take.
pub fn apply_repair(shows: &mut [Show], candidate: usize, repair: &Repair) -> (Day, f64) {
    let slot = &shows[candidate].times()[repair.candidate_slot];
    let (day, hour) = (slot.day().clone(), slot.hour());

    let bumped = &mut shows[repair.bumped];
    bumped.demote();
    bumped.invalidate_overlapping(&day, hour);
    (day, hour)
}
