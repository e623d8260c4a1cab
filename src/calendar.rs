use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::aggregate::DailySummary;
use crate::error::{MoodError, MoodResult};

pub const GRID_ROWS: usize = 6;
pub const GRID_COLS: usize = 7;

/// Column headers of the month grid, Monday-first.
pub const WEEKDAYS: [&str; GRID_COLS] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Discrete sentiment-intensity tier used for calendar coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorBucket {
    StrongPositive,
    MildPositive,
    Neutral,
    MildNegative,
    StrongNegative,
}

impl ColorBucket {
    /// Bands are checked top-down with inclusive lower edges. The ladder is
    /// total over all reals, so an out-of-range score lands in the nearest
    /// band instead of failing.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.7 {
            Self::StrongPositive
        } else if score >= 0.4 {
            Self::MildPositive
        } else if score >= -0.1 {
            Self::Neutral
        } else if score >= -0.5 {
            Self::MildNegative
        } else {
            Self::StrongNegative
        }
    }

    /// Fill color handed to renderers.
    pub const fn hex(self) -> &'static str {
        match self {
            Self::StrongPositive => "#16a34a",
            Self::MildPositive => "#60a5fa",
            Self::Neutral => "#facc15",
            Self::MildNegative => "#f87171",
            Self::StrongNegative => "#991b1b",
        }
    }
}

/// Data attached to a day that has at least one entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayData {
    pub score: f64,
    pub bucket: ColorBucket,
    pub emoji: String,
    pub tooltip: String,
}

/// One slot in the 6×7 grid. `Empty` padding before day 1 and after the
/// last day is distinct from a real day that simply has no entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarCell {
    Empty,
    Day {
        day: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        summary: Option<DayData>,
    },
}

/// A month rendered as a fixed 6×7 Monday-first grid. Rows beyond the last
/// populated week stay entirely empty; the cell count is always 42.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: [[CalendarCell; GRID_COLS]; GRID_ROWS],
}

impl MonthGrid {
    /// Number of cells carrying a real day; always equals the month length.
    pub fn populated_cells(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !matches!(cell, CalendarCell::Empty))
            .count()
    }
}

/// Month length, leap years included. `None` for an invalid (year, month).
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// Lays one month of daily summaries out on the fixed grid.
pub fn build_month_grid(
    year: i32,
    month: u32,
    days: &BTreeMap<NaiveDate, DailySummary>,
) -> MoodResult<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        MoodError::Validation(format!("Invalid calendar month: {}-{:02}", year, month))
    })?;
    let total_days = days_in_month(year, month).ok_or_else(|| {
        MoodError::Validation(format!("Invalid calendar month: {}-{:02}", year, month))
    })?;

    let mut cells: [[CalendarCell; GRID_COLS]; GRID_ROWS] =
        std::array::from_fn(|_| std::array::from_fn(|_| CalendarCell::Empty));

    // Day 1 starts in the column of its weekday; 6 rows always fit the
    // worst case (a 31-day month starting on Sunday ends at row 5).
    let mut row = 0;
    let mut col = first.weekday().num_days_from_monday() as usize;
    for day in 1..=total_days {
        let date = first + Duration::days(i64::from(day - 1));
        let summary = days.get(&date).map(|s| DayData {
            score: s.average_score,
            bucket: ColorBucket::from_score(s.average_score),
            emoji: s.modal_emoji.clone(),
            tooltip: format!(
                "{} | Score: {:.2} | Emoji: {}",
                date.format("%d %B %Y"),
                s.average_score,
                s.modal_emoji
            ),
        });
        cells[row][col] = CalendarCell::Day { day, summary };

        col += 1;
        if col >= GRID_COLS {
            col = 0;
            row += 1;
        }
    }

    Ok(MonthGrid { year, month, cells })
}
