use super::types::Day;

/// Two showtimes on the same day closer than this (in hours) cannot both be attended
pub const CONFLICT_WINDOW_HOURS: f64 = 0.5;

/// Returns true if two showtimes fall inside the same half-hour conflict window
pub fn times_conflict(day_a: &Day, hour_a: f64, day_b: &Day, hour_b: f64) -> bool {
    day_a == day_b && (hour_a - hour_b).abs() <= CONFLICT_WINDOW_HOURS
}

/// Parses a time string (HH:MM) to decimal hours since midnight
pub fn parse_time_to_hours(time_str: &str) -> Option<f64> {
    let (hours, minutes) = time_str.trim().split_once(':')?;
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    if hours >= 24 || minutes >= 60 {
        return None;
    }
    Some(hours as f64 + minutes as f64 / 60.0)
}

/// Formats decimal hours as a time string (HH:MM)
pub fn format_hour(hour: f64) -> String {
    let total_minutes = (hour * 60.0).round().max(0.0) as u32;
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}
