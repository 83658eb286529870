//! Scheduler tests: worked scenarios plus invariant checks over generated catalogs.

use crate::error::ScheduleError;
use crate::generator::{generate_catalog, GeneratorConfig};
use crate::parser::build_catalog;

use super::greedy::{Scheduler, StepEvent};
use super::{plan_attendance, Day, Plan, SchedulerConfig, Show};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn show(title: &str, times: &[(&str, f64)]) -> Show {
    let mut show = Show::new(title, "Arts Court");
    for (day, hour) in times {
        show.add_slot(Day::parse(day), *hour);
    }
    show
}

/// Y is committed first on a slot X also wants, and Z blocks X's other slot.
/// Y can fall back to Saturday.
fn repair_scenario() -> Vec<Show> {
    vec![
        show("Y", &[("Fri", 21.0), ("Sat", 20.0)]),
        show("X", &[("Fri", 19.0), ("Fri", 21.0)]),
        show("Z", &[("Fri", 19.5)]),
    ]
}

fn attending_of<'a>(plan: &'a Plan, title: &str) -> (&'a Day, f64) {
    let show = plan.shows().iter().find(|s| s.title() == title).unwrap();
    let slot = show.attending().unwrap();
    (slot.day(), slot.hour())
}

fn assert_counters_exact(shows: &[Show]) {
    for show in shows {
        assert_eq!(show.num_available(), show.live_available(), "counter drifted on {}", show.title());
    }
}

fn assert_plan_invariants(plan: &Plan) {
    for show in plan.scheduled() {
        let idx = show.time_attending().expect("scheduled show without a slot");
        let slot = &show.times()[idx];
        assert!(slot.is_attended());
        assert!(!slot.is_available());
    }
    for show in plan.unscheduled() {
        assert!(!show.is_attended());
    }
    for show in plan.shows() {
        let attended = show.times().iter().filter(|slot| slot.is_attended()).count();
        assert_eq!(attended, usize::from(show.is_attended()), "{}", show.title());
    }
    assert!(plan.conflicts().is_empty(), "conflicting plan: {:?}", plan.conflicts());
    assert_counters_exact(plan.shows());
    assert_eq!(plan.scheduled_count() + plan.unscheduled().count(), plan.total());
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn disjoint_shows_are_both_scheduled() {
    let plan = plan_attendance(
        vec![
            show("A", &[("Fri", 19.0)]),
            show("B", &[("Sat", 19.0)]),
        ],
        SchedulerConfig::default(),
    );
    assert!(plan.is_complete());
    assert_eq!(plan.scheduled_count(), 2);
    assert_eq!(plan.repairs(), 0);
    assert_plan_invariants(&plan);
}

#[test]
fn shared_only_slot_is_infeasible() {
    let plan = plan_attendance(
        vec![
            show("A", &[("Fri", 19.0)]),
            show("B", &[("Fri", 19.0)]),
        ],
        SchedulerConfig::default(),
    );
    assert!(!plan.is_complete());
    assert_eq!(plan.failure(), Some(&ScheduleError::Infeasible { title: "B".into() }));
    assert_eq!(plan.scheduled_count(), 1);
    assert_eq!(attending_of(&plan, "A"), (&Day::parse("Fri"), 19.0));
    let unscheduled: Vec<&str> = plan.unscheduled().map(|s| s.title()).collect();
    assert_eq!(unscheduled, vec!["B"]);
    assert_plan_invariants(&plan);
}

#[test]
fn repair_bumps_show_with_alternative() {
    let plan = plan_attendance(repair_scenario(), SchedulerConfig::default());
    assert!(plan.is_complete());
    assert_eq!(plan.repairs(), 1);
    assert_eq!(attending_of(&plan, "Z"), (&Day::parse("Fri"), 19.5));
    assert_eq!(attending_of(&plan, "X"), (&Day::parse("Fri"), 21.0));
    assert_eq!(attending_of(&plan, "Y"), (&Day::parse("Sat"), 20.0));
    let commit_order: Vec<&str> = plan.scheduled().map(|s| s.title()).collect();
    assert_eq!(commit_order, vec!["Z", "X", "Y"]);
    assert_plan_invariants(&plan);
}

#[test]
fn repair_steps_in_order() {
    let mut scheduler = Scheduler::new(repair_scenario());
    // Z has one slot, then Y ahead of X by input order
    assert_eq!(scheduler.unscheduled().collect::<Vec<_>>(), vec![2, 0, 1]);

    assert_eq!(scheduler.step(), Ok(StepEvent::Committed { show: 2, slot: 0 }));
    assert_eq!(scheduler.step(), Ok(StepEvent::Committed { show: 0, slot: 0 }));
    assert_eq!(scheduler.shows()[1].num_available(), 0);

    assert_eq!(scheduler.step(), Ok(StepEvent::Repaired { show: 1, slot: 1, bumped: 0 }));
    assert_eq!(scheduler.scheduled(), &[2, 1]);
    assert_eq!(scheduler.unscheduled().collect::<Vec<_>>(), vec![0]);
    assert!(!scheduler.shows()[0].is_attended());
    assert_counters_exact(scheduler.shows());

    assert_eq!(scheduler.step(), Ok(StepEvent::Committed { show: 0, slot: 1 }));
    assert_eq!(scheduler.step(), Ok(StepEvent::Finished));
}

#[test]
fn output_sorted_by_day_then_hour() {
    let plan = plan_attendance(
        vec![
            show("Saturday", &[("Sat", 19.0)]),
            show("Friday late", &[("Fri", 22.0)]),
            show("Friday", &[("Fri", 20.5)]),
        ],
        SchedulerConfig::default(),
    );
    let titles: Vec<String> = plan.entries().into_iter().map(|e| e.title).collect();
    assert_eq!(titles, vec!["Friday", "Friday late", "Saturday"]);
}

// ── Ordering and failure policy ───────────────────────────────────────────────

#[test]
fn least_flexible_first_with_stable_ties() {
    let scheduler = Scheduler::new(vec![
        show("three", &[("Fri", 12.0), ("Sat", 12.0), ("Sun", 12.0)]),
        show("one-a", &[("Fri", 14.0)]),
        show("two", &[("Fri", 16.0), ("Sat", 16.0)]),
        show("one-b", &[("Sat", 14.0)]),
    ]);
    assert_eq!(scheduler.unscheduled().collect::<Vec<_>>(), vec![1, 3, 2, 0]);
}

#[test]
fn first_available_slot_is_taken() {
    let plan = plan_attendance(
        vec![show("A", &[("Sun", 15.0), ("Fri", 12.0)])],
        SchedulerConfig::default(),
    );
    assert_eq!(attending_of(&plan, "A"), (&Day::parse("Sun"), 15.0));
}

#[test]
fn commit_invalidates_window_on_every_other_show() {
    let mut scheduler = Scheduler::new(vec![
        show("A", &[("Fri", 19.0)]),
        show("B", &[("Fri", 18.5), ("Fri", 19.25), ("Fri", 20.0)]),
    ]);
    scheduler.step().unwrap();
    let b = &scheduler.shows()[1];
    assert!(!b.times()[0].is_available());
    assert!(!b.times()[1].is_available());
    assert!(b.times()[2].is_available());
    assert_eq!(b.num_available(), 1);
}

#[test]
fn repair_limit_stops_the_run() {
    let plan = plan_attendance(repair_scenario(), SchedulerConfig { max_repairs: 0 });
    assert_eq!(plan.failure(), Some(&ScheduleError::RepairLimitExceeded { limit: 0 }));
    assert_eq!(plan.scheduled_count(), 2);
    assert_plan_invariants(&plan);
}

#[test]
fn failure_is_sticky() {
    let mut scheduler = Scheduler::new(vec![
        show("A", &[("Fri", 19.0)]),
        show("B", &[("Fri", 19.0)]),
    ]);
    scheduler.step().unwrap();
    let err = scheduler.step().unwrap_err();
    assert_eq!(scheduler.step(), Err(err));
}

#[test]
fn empty_catalog_is_complete() {
    let plan = plan_attendance(Vec::new(), SchedulerConfig::default());
    assert!(plan.is_complete());
    assert_eq!(plan.total(), 0);
    assert!(plan.entries().is_empty());
}

#[test]
fn show_without_slots_is_infeasible() {
    let plan = plan_attendance(vec![Show::new("Cancelled", "Nowhere")], SchedulerConfig::default());
    assert_eq!(plan.failure(), Some(&ScheduleError::Infeasible { title: "Cancelled".into() }));
}

// ── Generated catalogs ────────────────────────────────────────────────────────

#[test]
fn counters_stay_exact_after_every_step() {
    let config = GeneratorConfig { num_shows: 25, ..GeneratorConfig::default() };
    for seed in 0..20 {
        let catalog = build_catalog(generate_catalog(&config, seed));
        let mut scheduler = Scheduler::with_config(catalog.into_shows(), SchedulerConfig { max_repairs: 200 });
        loop {
            let result = scheduler.step();
            assert_counters_exact(scheduler.shows());
            match result {
                Ok(StepEvent::Finished) | Err(_) => break,
                Ok(_) => {}
            }
        }
    }
}

#[test]
fn generated_plans_are_conflict_free() {
    let config = GeneratorConfig {
        num_shows: 30,
        days: vec!["Fri".into(), "Sat".into()],
        ..GeneratorConfig::default()
    };
    for seed in 0..40 {
        let catalog = build_catalog(generate_catalog(&config, seed));
        let plan = plan_attendance(catalog.into_shows(), SchedulerConfig { max_repairs: 200 });
        assert_plan_invariants(&plan);
        if plan.failure().is_none() {
            assert!(plan.is_complete());
        }
    }
}

#[test]
fn roomy_festival_schedules_everything() {
    let config = GeneratorConfig {
        num_shows: 4,
        days: vec!["Thu".into(), "Fri".into(), "Sat".into(), "Sun".into()],
        first_hour: 10,
        last_hour: 23,
        slots_per_show: (6, 6),
    };
    let catalog = build_catalog(generate_catalog(&config, 11));
    let plan = plan_attendance(catalog.into_shows(), SchedulerConfig::default());
    assert!(plan.is_complete(), "{:?}", plan.failure());
    assert_plan_invariants(&plan);
}
