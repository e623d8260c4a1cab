use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::models::entry::MoodEntry;
use crate::models::mood::Mood;

/// Average score and modal emoji for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub average_score: f64,
    pub modal_emoji: String,
}

/// Share of one label across the whole log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodShare {
    pub mood: Mood,
    pub count: u64,
    pub percent: f64,
}

/// Optional filters for the history view.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub search: Option<String>,
}

/// Physical log order is insertion order, not time order; every consumer
/// that cares sorts by timestamp first.
fn sorted_by_time(entries: &[MoodEntry]) -> Vec<&MoodEntry> {
    let mut sorted: Vec<&MoodEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.timestamp);
    sorted
}

/// Groups entries into per-day summaries over the inclusive `[from, to]`
/// window. Days without entries are absent from the result, never present
/// with a placeholder.
pub fn by_day(
    entries: &[MoodEntry],
    from: NaiveDate,
    to: NaiveDate,
) -> BTreeMap<NaiveDate, DailySummary> {
    let mut days: BTreeMap<NaiveDate, Vec<&MoodEntry>> = BTreeMap::new();
    for entry in sorted_by_time(entries) {
        let date = entry.date();
        if date < from || date > to {
            continue;
        }
        days.entry(date).or_default().push(entry);
    }

    days.into_iter()
        .map(|(date, day_entries)| {
            let total: f64 = day_entries.iter().map(|e| e.score).sum();
            let summary = DailySummary {
                date,
                average_score: total / day_entries.len() as f64,
                modal_emoji: modal_emoji(&day_entries),
            };
            (date, summary)
        })
        .collect()
}

/// Most frequent emoji of the day; ties go to the one seen first in time
/// order.
fn modal_emoji(day_entries: &[&MoodEntry]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for entry in day_entries {
        match counts
            .iter_mut()
            .find(|(emoji, _)| *emoji == entry.emoji.as_str())
        {
            Some((_, n)) => *n += 1,
            None => counts.push((entry.emoji.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (emoji, n) in counts {
        if best.map_or(true, |(_, best_n)| n > best_n) {
            best = Some((emoji, n));
        }
    }
    best.map(|(emoji, _)| emoji.to_string()).unwrap_or_default()
}

/// Earliest and latest entry dates, for whole-log views.
pub fn full_range(entries: &[MoodEntry]) -> Option<(NaiveDate, NaiveDate)> {
    let min = entries.iter().map(MoodEntry::date).min()?;
    let max = entries.iter().map(MoodEntry::date).max()?;
    Some((min, max))
}

/// Monday of the week `date` falls in.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Per-label entry counts grouped by week (Monday start), for trend lines.
/// Absent (week, label) pairs carry no zero placeholder.
pub fn by_week(entries: &[MoodEntry]) -> BTreeMap<NaiveDate, BTreeMap<Mood, u64>> {
    let mut weeks: BTreeMap<NaiveDate, BTreeMap<Mood, u64>> = BTreeMap::new();
    for entry in entries {
        *weeks
            .entry(week_start(entry.date()))
            .or_default()
            .entry(entry.mood)
            .or_insert(0) += 1;
    }
    weeks
}

/// One row per label present in the log, descending by count. Percentages
/// are taken over the observed total, so they sum to 100 across present
/// labels even when some labels never occur.
pub fn totals(entries: &[MoodEntry]) -> Vec<MoodShare> {
    let mut counts: BTreeMap<Mood, u64> = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.mood).or_insert(0) += 1;
    }
    let observed_total: u64 = counts.values().sum();

    let mut shares: Vec<MoodShare> = counts
        .into_iter()
        .map(|(mood, count)| MoodShare {
            mood,
            count,
            percent: 100.0 * count as f64 / observed_total as f64,
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.mood.cmp(&b.mood)));
    shares
}

/// Every entry recorded on `date`, in time order.
pub fn entries_on<'a>(entries: &'a [MoodEntry], date: NaiveDate) -> Vec<&'a MoodEntry> {
    let mut day: Vec<&MoodEntry> = entries.iter().filter(|e| e.date() == date).collect();
    day.sort_by_key(|e| e.timestamp);
    day
}

/// History view: inclusive date window plus case-insensitive substring
/// search over the entry text, in time order.
pub fn filter_history<'a>(entries: &'a [MoodEntry], filter: &HistoryFilter) -> Vec<&'a MoodEntry> {
    let needle = filter.search.as_ref().map(|s| s.to_lowercase());
    let mut matched: Vec<&MoodEntry> = entries
        .iter()
        .filter(|e| filter.from.map_or(true, |from| e.date() >= from))
        .filter(|e| filter.to.map_or(true, |to| e.date() <= to))
        .filter(|e| {
            needle
                .as_ref()
                .map_or(true, |n| e.text.to_lowercase().contains(n))
        })
        .collect();
    matched.sort_by_key(|e| e.timestamp);
    matched
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::models::entry::TIMESTAMP_FORMAT;

    fn entry(raw_ts: &str, text: &str, mood: Mood) -> MoodEntry {
        let ts = NaiveDateTime::parse_from_str(raw_ts, TIMESTAMP_FORMAT).unwrap();
        MoodEntry::new(ts, text, mood)
    }

    fn date(raw: &str) -> NaiveDate {
        raw.parse().unwrap()
    }

    #[test]
    fn test_by_day_averages_scores() {
        // 0.9 and -0.6 on the same date
        let entries = vec![
            entry("2024-03-05 08:00:00", "great start", Mood::Joy),
            entry("2024-03-05 20:00:00", "rough evening", Mood::Sadness),
        ];
        let days = by_day(&entries, date("2024-03-01"), date("2024-03-31"));
        let summary = &days[&date("2024-03-05")];
        assert!((summary.average_score - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_by_day_range_is_inclusive() {
        let entries = vec![
            entry("2024-03-01 08:00:00", "first", Mood::Joy),
            entry("2024-03-31 08:00:00", "last", Mood::Joy),
            entry("2024-04-01 08:00:00", "outside", Mood::Joy),
        ];
        let days = by_day(&entries, date("2024-03-01"), date("2024-03-31"));
        assert_eq!(days.len(), 2);
        assert!(days.contains_key(&date("2024-03-01")));
        assert!(days.contains_key(&date("2024-03-31")));
    }

    #[test]
    fn test_by_day_skips_empty_days() {
        let entries = vec![entry("2024-03-05 08:00:00", "only day", Mood::Joy)];
        let days = by_day(&entries, date("2024-03-01"), date("2024-03-31"));
        assert_eq!(days.len(), 1);
    }

    #[test]
    fn test_modal_emoji_tie_goes_to_first_in_time_order() {
        // Two sadness vs two joy; sadness appears first by timestamp even
        // though the entries are stored out of order.
        let entries = vec![
            entry("2024-03-05 12:00:00", "b", Mood::Joy),
            entry("2024-03-05 08:00:00", "a", Mood::Sadness),
            entry("2024-03-05 18:00:00", "c", Mood::Joy),
            entry("2024-03-05 09:00:00", "d", Mood::Sadness),
        ];
        let days = by_day(&entries, date("2024-03-01"), date("2024-03-31"));
        assert_eq!(days[&date("2024-03-05")].modal_emoji, Mood::Sadness.emoji());
    }

    #[test]
    fn test_modal_emoji_majority_wins() {
        let entries = vec![
            entry("2024-03-05 08:00:00", "a", Mood::Sadness),
            entry("2024-03-05 09:00:00", "b", Mood::Joy),
            entry("2024-03-05 10:00:00", "c", Mood::Joy),
        ];
        let days = by_day(&entries, date("2024-03-01"), date("2024-03-31"));
        assert_eq!(days[&date("2024-03-05")].modal_emoji, Mood::Joy.emoji());
    }

    #[test]
    fn test_week_start_is_monday() {
        // 2024-03-07 is a Thursday; its week starts Monday 2024-03-04.
        assert_eq!(week_start(date("2024-03-07")), date("2024-03-04"));
        assert_eq!(week_start(date("2024-03-04")), date("2024-03-04"));
        assert_eq!(week_start(date("2024-03-10")), date("2024-03-04"));
    }

    #[test]
    fn test_by_week_counts_labels() {
        let entries = vec![
            entry("2024-03-04 08:00:00", "a", Mood::Joy),
            entry("2024-03-07 08:00:00", "b", Mood::Joy),
            entry("2024-03-10 08:00:00", "c", Mood::Fear),
            entry("2024-03-11 08:00:00", "next week", Mood::Joy),
        ];
        let weeks = by_week(&entries);
        assert_eq!(weeks.len(), 2);
        let first = &weeks[&date("2024-03-04")];
        assert_eq!(first[&Mood::Joy], 2);
        assert_eq!(first[&Mood::Fear], 1);
        assert!(!first.contains_key(&Mood::Anger));
        assert_eq!(weeks[&date("2024-03-11")][&Mood::Joy], 1);
    }

    #[test]
    fn test_totals_percentages_sum_to_100() {
        let entries = vec![
            entry("2024-03-04 08:00:00", "a", Mood::Joy),
            entry("2024-03-05 08:00:00", "b", Mood::Joy),
            entry("2024-03-06 08:00:00", "c", Mood::Fear),
        ];
        let shares = totals(&entries);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].mood, Mood::Joy);
        assert_eq!(shares[0].count, 2);
        let sum: f64 = shares.iter().map(|s| s.percent).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_totals_empty_log() {
        assert!(totals(&[]).is_empty());
    }

    #[test]
    fn test_filter_history_search_is_case_insensitive() {
        let entries = vec![
            entry("2024-03-04 08:00:00", "Coffee with Ana", Mood::Joy),
            entry("2024-03-05 08:00:00", "quiet day", Mood::Neutral),
        ];
        let filter = HistoryFilter {
            search: Some("COFFEE".into()),
            ..HistoryFilter::default()
        };
        let matched = filter_history(&entries, &filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].text, "Coffee with Ana");
    }

    #[test]
    fn test_filter_history_sorts_by_timestamp() {
        let entries = vec![
            entry("2024-03-05 08:00:00", "later insert, earlier time", Mood::Joy),
            entry("2024-03-04 08:00:00", "first", Mood::Joy),
        ];
        let matched = filter_history(&entries, &HistoryFilter::default());
        assert_eq!(matched[0].text, "first");
    }

    #[test]
    fn test_entries_on_returns_single_day_in_time_order() {
        let entries = vec![
            entry("2024-03-05 20:00:00", "evening", Mood::Neutral),
            entry("2024-03-05 08:00:00", "morning", Mood::Joy),
            entry("2024-03-06 08:00:00", "other day", Mood::Joy),
        ];
        let day = entries_on(&entries, date("2024-03-05"));
        assert_eq!(day.len(), 2);
        assert_eq!(day[0].text, "morning");
    }

    #[test]
    fn test_full_range_spans_min_to_max() {
        let entries = vec![
            entry("2024-03-05 08:00:00", "mid", Mood::Joy),
            entry("2024-01-01 08:00:00", "first", Mood::Joy),
            entry("2024-06-30 08:00:00", "last", Mood::Joy),
        ];
        assert_eq!(
            full_range(&entries),
            Some((date("2024-01-01"), date("2024-06-30")))
        );
        assert_eq!(full_range(&[]), None);
    }
}
