pub mod types;
pub mod slot_utils;
pub mod show;
pub mod repair;
pub mod greedy;

#[cfg(test)]
mod tests;

pub use types::{Day, Plan};
pub use slot_utils::{format_hour, parse_time_to_hours};
pub use show::Show;
pub use greedy::{plan_attendance, SchedulerConfig};
