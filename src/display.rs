use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::schedule::{format_hour, Plan};

/// One scheduled show in the JSON report
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub title: String,
    pub venue: String,
    pub day: String,
    pub time: String,
}

/// Serializable summary of a plan
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub success: bool,
    pub total: usize,
    pub scheduled: usize,
    pub repairs: usize,
    pub failure: Option<String>,
    pub entries: Vec<ReportEntry>,
    pub unscheduled: Vec<String>,
}

impl PlanReport {
    pub fn from_plan(plan: &Plan) -> Self {
        PlanReport {
            success: plan.is_complete(),
            total: plan.total(),
            scheduled: plan.scheduled_count(),
            repairs: plan.repairs(),
            failure: plan.failure().map(|err| err.to_string()),
            entries: plan
                .entries()
                .into_iter()
                .map(|entry| ReportEntry {
                    title: entry.title,
                    venue: entry.venue,
                    day: entry.day.to_string(),
                    time: format_hour(entry.hour),
                })
                .collect(),
            unscheduled: plan.unscheduled().map(|show| show.title().to_string()).collect(),
        }
    }
}

/// Writes the plan sorted by day and time, followed by a count summary
pub fn write_plan<W: Write>(plan: &Plan, out: &mut W) -> io::Result<()> {
    writeln!(out, "** Attendance Plan **")?;
    for entry in plan.entries() {
        writeln!(out, "{} {}  {} ({})", entry.day, format_hour(entry.hour), entry.title, entry.venue)?;
    }

    writeln!(out)?;
    writeln!(out, "Scheduled {} of {} shows", plan.scheduled_count(), plan.total())?;
    if plan.repairs() > 0 {
        writeln!(out, "Repairs made: {}", plan.repairs())?;
    }
    if let Some(err) = plan.failure() {
        writeln!(out, "⚠️  Could not complete the plan: {}", err)?;
    }
    let unscheduled: Vec<&str> = plan.unscheduled().map(|show| show.title()).collect();
    if !unscheduled.is_empty() {
        writeln!(out, "Unscheduled shows ({}):", unscheduled.len())?;
        for title in unscheduled {
            writeln!(out, "  - {}", title)?;
        }
    }
    Ok(())
}

/// Prints the plan to stdout
pub fn print_plan(plan: &Plan) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_plan(plan, &mut out)
}

/// Writes the plan to a text file
pub fn write_plan_to_file<P: AsRef<Path>>(plan: &Plan, path: P) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    write_plan(plan, &mut file)?;
    file.flush()
}
