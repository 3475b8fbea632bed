use crate::models::DiaryEntry;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Per-calendar-day winner over a snapshot of entries, for calendar
/// rendering. When several entries share a day the one touched most recently
/// wins; an exact `updated_at` tie keeps whichever was seen first, so the
/// result is deterministic for a given snapshot order.
#[derive(Debug, Default)]
pub struct DayIndex {
    by_day: HashMap<NaiveDate, DiaryEntry>,
}

impl DayIndex {
    pub fn build(entries: &[DiaryEntry]) -> Self {
        let mut by_day: HashMap<NaiveDate, DiaryEntry> = HashMap::new();
        for entry in entries {
            let day = entry.date.date_naive();
            let replace = match by_day.get(&day) {
                Some(existing) => entry.updated_at > existing.updated_at,
                None => true,
            };
            if replace {
                by_day.insert(day, entry.clone());
            }
        }
        Self { by_day }
    }

    pub fn lookup(&self, day: NaiveDate) -> Option<&DiaryEntry> {
        self.by_day.get(&day)
    }

    pub fn has_entry(&self, day: NaiveDate) -> bool {
        self.by_day.contains_key(&day)
    }

    /// Number of days that have at least one entry.
    pub fn len(&self) -> usize {
        self.by_day.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_day.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::DayIndex;
    use crate::models::{DiaryEntry, Mood};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn entry(id: &str, date: (i32, u32, u32, u32), updated: (u32, u32)) -> DiaryEntry {
        let date = Utc
            .with_ymd_and_hms(date.0, date.1, date.2, date.3, 0, 0)
            .unwrap();
        let updated_at = Utc
            .with_ymd_and_hms(2025, 1, 5, updated.0, updated.1, 0)
            .unwrap();
        DiaryEntry {
            id: id.to_string(),
            content: id.to_string(),
            mood: Mood::Neutral,
            color_hex: "#E0E0E0".to_string(),
            date,
            created_at: updated_at,
            updated_at,
        }
    }

    #[test]
    fn later_update_wins_a_shared_day() {
        let a = entry("A", (2025, 1, 5, 8), (10, 0));
        let b = entry("B", (2025, 1, 5, 9), (11, 0));
        let index = DayIndex::build(&[a, b]);

        let day = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(index.lookup(day).map(|e| e.id.as_str()), Some("B"));
    }

    #[test]
    fn exact_tie_keeps_the_first_seen_entry() {
        let a = entry("A", (2025, 1, 5, 8), (10, 0));
        let b = entry("B", (2025, 1, 5, 9), (10, 0));
        let index = DayIndex::build(&[a, b]);

        let day = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(index.lookup(day).map(|e| e.id.as_str()), Some("A"));
    }

    #[test]
    fn time_of_day_is_stripped_from_the_key() {
        let late = entry("late", (2025, 2, 1, 23), (10, 0));
        let index = DayIndex::build(&[late]);

        let day = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert!(index.has_entry(day));
        assert!(!index.has_entry(NaiveDate::from_ymd_opt(2025, 2, 2).unwrap()));
    }

    #[test]
    fn distinct_days_each_keep_their_own_winner() {
        let a = entry("A", (2025, 1, 5, 8), (10, 0));
        let b = entry("B", (2025, 1, 6, 8), (9, 0));
        let index = DayIndex::build(&[a, b]);

        assert_eq!(index.len(), 2);
        let jan5 = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let jan6 = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert_eq!(index.lookup(jan5).map(|e| e.id.as_str()), Some("A"));
        assert_eq!(index.lookup(jan6).map(|e| e.id.as_str()), Some("B"));
    }

    #[test]
    fn empty_snapshot_builds_an_empty_index() {
        let index = DayIndex::build(&[]);
        assert!(index.is_empty());
        assert!(index.lookup(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()).is_none());
    }
}
