//! Personal mood journal engine.
//!
//! Short text entries are classified into one of six moods by an external
//! model, persisted as a per-user timestamped CSV log, and rendered as
//! daily, weekly and monthly aggregates, including a fixed 6×7 month
//! calendar with sentiment-intensity coloring.

pub mod aggregate;
pub mod calendar;
pub mod classifier;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;

pub use aggregate::{DailySummary, HistoryFilter, MoodShare};
pub use calendar::{CalendarCell, ColorBucket, DayData, MonthGrid, WEEKDAYS};
pub use classifier::{HttpClassifier, MoodClassifier};
pub use config::Config;
pub use error::{MoodError, MoodResult, StoreOp};
pub use models::entry::{MoodEntry, TIMESTAMP_FORMAT};
pub use models::mood::{Mood, UNKNOWN_EMOJI};
pub use models::user::UserId;
pub use service::MoodTracker;
pub use store::CsvStore;
