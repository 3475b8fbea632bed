pub mod db;
pub mod day_index;
pub mod errors;
pub mod grouping;
pub mod models;
pub mod reminder;
pub mod state;

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

pub use db::Database;
pub use day_index::DayIndex;
pub use errors::{AppError, AppResult};
pub use grouping::{group_entries, EntryBucket};
pub use models::{DiaryEntry, Mood, ReminderSettings, CARD_COLORS};
pub use state::{CalendarState, EntryEditor, HomeState};

static LOG_GUARD: std::sync::OnceLock<WorkerGuard> = std::sync::OnceLock::new();

/// Installs a daily-rolling JSON log under `<data_dir>/logs`. Call once at
/// startup; the writer guard parks in a process-wide static.
pub fn init_tracing(data_dir: &Path) -> AppResult<()> {
    let log_dir = data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).map_err(|error| AppError::Io(error.to_string()))?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "diary.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .with_writer(non_blocking)
        .try_init()
        .map_err(|error| AppError::Internal(error.to_string()))
}
