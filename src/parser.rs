use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::info;

use crate::error::CatalogError;
use crate::schedule::{parse_time_to_hours, Day, Show};

/// One showing as read from the catalog, with the time already in decimal hours
#[derive(Debug, Clone, PartialEq)]
pub struct ShowRecord {
    pub title: String,
    pub venue: String,
    pub day: Day,
    pub hour: f64,
}

/// Shows grouped by title, in the order titles first appear
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    shows: Vec<Show>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.shows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, title: &str) -> Option<&Show> {
        self.index.get(title).map(|&idx| &self.shows[idx])
    }

    #[cfg(test)]
    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    pub fn into_shows(self) -> Vec<Show> {
        self.shows
    }

    /// Adds a showing, creating the show the first time its title is seen.
    /// The venue of the first record wins.
    pub fn add_record(&mut self, record: ShowRecord) {
        let idx = match self.index.get(&record.title) {
            Some(&idx) => idx,
            None => {
                self.shows.push(Show::new(record.title.clone(), record.venue));
                self.index.insert(record.title, self.shows.len() - 1);
                self.shows.len() - 1
            }
        };
        self.shows[idx].add_slot(record.day, record.hour);
    }
}

/// Groups records into shows keyed by title, appending slots in arrival order
pub fn build_catalog<I>(records: I) -> Catalog
where
    I: IntoIterator<Item = ShowRecord>,
{
    let mut catalog = Catalog::default();
    for record in records {
        catalog.add_record(record);
    }
    catalog
}

fn parse_record(record: &StringRecord, line: u64) -> Result<ShowRecord, CatalogError> {
    if record.len() < 4 {
        return Err(CatalogError::MalformedRecord {
            line,
            reason: format!("expected title,venue,day,HH:MM but found {} field(s)", record.len()),
        });
    }
    let title = record.get(0).unwrap_or("");
    if title.is_empty() {
        return Err(CatalogError::MalformedRecord {
            line,
            reason: "empty title".to_string(),
        });
    }
    let time = record.get(3).unwrap_or("");
    let hour = parse_time_to_hours(time).ok_or_else(|| CatalogError::InvalidTime {
        line,
        value: time.to_string(),
    })?;

    Ok(ShowRecord {
        title: title.to_string(),
        venue: record.get(1).unwrap_or("").to_string(),
        day: Day::parse(record.get(2).unwrap_or("")),
        hour,
    })
}

/// Reads `title,venue,day,HH:MM` lines (no header) from any reader
pub fn read_records<R: Read>(reader: R) -> Result<Vec<ShowRecord>, CatalogError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);
        // A trailing comma-only line carries no data
        if record.iter().all(str::is_empty) {
            continue;
        }
        records.push(parse_record(&record, line)?);
    }
    Ok(records)
}

/// Loads a catalog from any reader
pub fn load_catalog_reader<R: Read>(reader: R) -> Result<Catalog, CatalogError> {
    let records = read_records(reader)?;
    let showings = records.len();
    let catalog = build_catalog(records);
    info!("Loaded {} showings of {} shows", showings, catalog.len());
    Ok(catalog)
}

/// Loads a catalog from a file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
    let file = File::open(path)?;
    load_catalog_reader(file)
}
