use thiserror::Error;

/// Errors raised while reading a show catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("line {line}: invalid showtime {value:?} (expected HH:MM)")]
    InvalidTime { line: u64, value: String },
}

/// Reasons a scheduling run stopped before every show had a slot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("no slot or repair available for \"{title}\"")]
    Infeasible { title: String },

    #[error("gave up after {limit} repairs")]
    RepairLimitExceeded { limit: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
}
