use crate::models::DiaryEntry;
use chrono::NaiveDate;

pub const TODAY_LABEL: &str = "Today";
pub const YESTERDAY_LABEL: &str = "Yesterday";

/// One labeled group of entries for the home list. `day` is the calendar day
/// the bucket stands for; ordering always goes through it, never through the
/// label text, which would misorder across month and year boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryBucket {
    pub label: String,
    pub day: NaiveDate,
    pub entries: Vec<DiaryEntry>,
}

/// Partitions a date-descending snapshot into buckets labeled "Today",
/// "Yesterday", or the formatted day, newest bucket first. Entries keep
/// their snapshot order inside each bucket.
pub fn group_entries(entries: &[DiaryEntry], today: NaiveDate) -> Vec<EntryBucket> {
    let mut buckets: Vec<EntryBucket> = Vec::new();
    for entry in entries {
        let day = entry.date.date_naive();
        match buckets.iter_mut().find(|bucket| bucket.day == day) {
            Some(bucket) => bucket.entries.push(entry.clone()),
            None => buckets.push(EntryBucket {
                label: bucket_label(day, today),
                day,
                entries: vec![entry.clone()],
            }),
        }
    }
    buckets.sort_by(|a, b| b.day.cmp(&a.day));
    buckets
}

fn bucket_label(day: NaiveDate, today: NaiveDate) -> String {
    if day == today {
        TODAY_LABEL.to_string()
    } else if Some(day) == today.pred_opt() {
        YESTERDAY_LABEL.to_string()
    } else {
        day.format("%Y/%m/%d").to_string()
    }
}
