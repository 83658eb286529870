//! Demo catalog generator.
//!
//! Produces random festival catalogs in the same `title,venue,day,HH:MM`
//! format the parser reads. Output is reproducible for a given seed.

use std::io::Write;

use csv::WriterBuilder;
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::error::CatalogError;
use crate::parser::ShowRecord;
use crate::schedule::{format_hour, Day};

const VENUES: &[&str] = &[
    "Arts Court Theatre",
    "Academic Hall",
    "Studio Léonard-Beaulne",
    "Alumni Auditorium",
    "Arts Court Studio",
    "La Nouvelle Scène",
];

const WORDS: &[&str] = &[
    "Midnight", "Confessions", "Bunny", "Moon", "Hamlet", "Kitchen", "Ghost", "Love", "Robots",
    "Sandwich", "Opera", "Circus", "Lighthouse", "Typewriter", "Lobster", "Tuesday",
];

/// Configuration for generating a festival catalog
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of distinct shows.
    pub num_shows: usize,
    /// Day labels the festival runs on.
    pub days: Vec<String>,
    /// Earliest showtime, in hours.
    pub first_hour: u32,
    /// Latest showtime, in hours.
    pub last_hour: u32,
    /// Showings per show range (min, max).
    pub slots_per_show: (usize, usize),
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_shows: 20,
            days: ["Thu", "Fri", "Sat", "Sun"].iter().map(|d| d.to_string()).collect(),
            first_hour: 12,
            last_hour: 22,
            slots_per_show: (2, 6),
        }
    }
}

/// Generates a catalog; showtimes fall on the quarter hour
pub fn generate_catalog(config: &GeneratorConfig, seed: u64) -> Vec<ShowRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::new();
    if config.days.is_empty() {
        return records;
    }
    let (min_slots, max_slots) = config.slots_per_show;
    let last_hour = config.last_hour.max(config.first_hour);

    for n in 0..config.num_shows {
        let first = WORDS.choose(&mut rng).copied().unwrap_or("Untitled");
        let second = WORDS.choose(&mut rng).copied().unwrap_or("Show");
        // Numbered so titles stay unique
        let title = format!("{} {} #{}", first, second, n + 1);
        let venue = VENUES.choose(&mut rng).copied().unwrap_or("Main Stage");
        let showings = rng.gen_range(min_slots.max(1)..=max_slots.max(min_slots.max(1)));

        for _ in 0..showings {
            let day = config.days.choose(&mut rng).map(String::as_str).unwrap_or("Fri");
            let hour = rng.gen_range(config.first_hour..=last_hour);
            let quarter = rng.gen_range(0..4u32);
            records.push(ShowRecord {
                title: title.clone(),
                venue: venue.to_string(),
                day: Day::parse(day),
                hour: hour as f64 + quarter as f64 * 0.25,
            });
        }
    }
    records
}

/// Writes records as catalog lines
pub fn write_catalog_csv<W: Write>(records: &[ShowRecord], writer: W) -> Result<(), CatalogError> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    for record in records {
        let day = record.day.to_string();
        let time = format_hour(record.hour);
        wtr.write_record([record.title.as_str(), record.venue.as_str(), day.as_str(), time.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}
