use std::collections::BTreeMap;

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::aggregate::{self, HistoryFilter, MoodShare};
use crate::calendar::{self, MonthGrid};
use crate::classifier::MoodClassifier;
use crate::error::{MoodError, MoodResult};
use crate::models::entry::MoodEntry;
use crate::models::mood::Mood;
use crate::models::user::UserId;
use crate::store::CsvStore;

/// Orchestrates one user interaction at a time: validate, classify, stamp
/// and persist on the write side; load and aggregate on the read side.
/// Derived views own no state and are recomputed on every call.
pub struct MoodTracker<C> {
    store: CsvStore,
    classifier: C,
}

impl<C: MoodClassifier> MoodTracker<C> {
    pub fn new(store: CsvStore, classifier: C) -> Self {
        Self { store, classifier }
    }

    /// Classifies `text` and appends the entry stamped with the current
    /// local time.
    pub fn log(&self, user: &UserId, text: &str) -> MoodResult<MoodEntry> {
        self.log_at(user, text, Local::now().naive_local())
    }

    /// Blank input is rejected before the classifier is consulted, and a
    /// classifier failure appends nothing.
    pub fn log_at(
        &self,
        user: &UserId,
        text: &str,
        timestamp: NaiveDateTime,
    ) -> MoodResult<MoodEntry> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MoodError::Validation("Please enter some text first".into()));
        }

        let mood = self.classifier.predict(text)?;
        let entry = MoodEntry::new(timestamp, text, mood);
        self.store.append(user, &entry)?;
        tracing::info!(user = %user, mood = %mood, "Mood entry recorded");
        Ok(entry)
    }

    /// Past entries in time order, optionally windowed and searched.
    pub fn history(&self, user: &UserId, filter: &HistoryFilter) -> MoodResult<Vec<MoodEntry>> {
        let entries = self.store.load_all(user)?;
        Ok(aggregate::filter_history(&entries, filter)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Every entry recorded on one date, in time order.
    pub fn day_detail(&self, user: &UserId, date: NaiveDate) -> MoodResult<Vec<MoodEntry>> {
        let entries = self.store.load_all(user)?;
        Ok(aggregate::entries_on(&entries, date)
            .into_iter()
            .cloned()
            .collect())
    }

    /// The fixed 6×7 grid for one month of the log.
    pub fn calendar(&self, user: &UserId, year: i32, month: u32) -> MoodResult<MonthGrid> {
        let entries = self.store.load_all(user)?;
        let (from, to) = month_bounds(year, month)?;
        let days = aggregate::by_day(&entries, from, to);
        calendar::build_month_grid(year, month, &days)
    }

    /// Weekly per-label entry counts for trend rendering.
    pub fn weekly_trend(
        &self,
        user: &UserId,
    ) -> MoodResult<BTreeMap<NaiveDate, BTreeMap<Mood, u64>>> {
        let entries = self.store.load_all(user)?;
        Ok(aggregate::by_week(&entries))
    }

    /// Whole-log label counts and percentages.
    pub fn totals(&self, user: &UserId) -> MoodResult<Vec<MoodShare>> {
        let entries = self.store.load_all(user)?;
        Ok(aggregate::totals(&entries))
    }

    /// The stored log, byte-for-byte.
    pub fn export(&self, user: &UserId) -> MoodResult<String> {
        self.store.export_raw(user)
    }

    /// Irrecoverably discards the user's whole log.
    pub fn reset(&self, user: &UserId) -> MoodResult<()> {
        self.store.reset(user)
    }
}

fn month_bounds(year: i32, month: u32) -> MoodResult<(NaiveDate, NaiveDate)> {
    let invalid =
        || MoodError::Validation(format!("Invalid calendar month: {}-{:02}", year, month));
    let total_days = calendar::days_in_month(year, month).ok_or_else(invalid)?;
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let last = NaiveDate::from_ymd_opt(year, month, total_days).ok_or_else(invalid)?;
    Ok((first, last))
}
