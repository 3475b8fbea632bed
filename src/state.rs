use crate::db::Database;
use crate::day_index::DayIndex;
use crate::errors::{AppError, AppResult};
use crate::grouping::{group_entries, EntryBucket};
use crate::models::{DiaryEntry, Mood};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;

type ChangeListener = Box<dyn Fn() + Send + Sync>;

/// Working set behind the home list: all entries, or the results of the
/// active text search. Reads are explicit pulls; registered listeners get a
/// plain "data changed" ping after every successful refresh or mutation.
pub struct HomeState {
    db: Arc<Database>,
    entries: Vec<DiaryEntry>,
    filter: String,
    on_change: Option<ChangeListener>,
}

impl HomeState {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            entries: Vec::new(),
            filter: String::new(),
            on_change: None,
        }
    }

    pub fn set_on_change(&mut self, listener: ChangeListener) {
        self.on_change = Some(listener);
    }

    pub fn entries(&self) -> &[DiaryEntry] {
        &self.entries
    }

    /// Re-pulls the working set under the active filter.
    pub fn refresh(&mut self) -> AppResult<()> {
        self.entries = if self.filter.is_empty() {
            self.db.fetch_all()?
        } else {
            self.db.search_by_text(&self.filter)?
        };
        self.notify();
        Ok(())
    }

    /// Swaps the working set. Blank text means show-all, as an explicit
    /// policy rather than a side effect of matching the empty substring.
    /// Idempotent for a given text absent external writes.
    pub fn apply_filter(&mut self, text: &str) -> AppResult<()> {
        self.filter = text.trim().to_string();
        self.refresh()
    }

    pub fn active_filter(&self) -> &str {
        &self.filter
    }

    /// Labeled buckets over the current working set for list rendering.
    pub fn grouped(&self, today: NaiveDate) -> Vec<EntryBucket> {
        group_entries(&self.entries, today)
    }

    pub fn delete(&mut self, entry_id: &str) -> AppResult<()> {
        self.db.delete_entry(entry_id)?;
        self.refresh()
    }

    pub fn delete_many(&mut self, entry_ids: &[String]) -> AppResult<usize> {
        let removed = self.db.delete_entries(entry_ids)?;
        if removed < entry_ids.len() {
            tracing::warn!(
                requested = entry_ids.len(),
                removed,
                "some entries were already gone during bulk delete"
            );
        }
        self.refresh()?;
        Ok(removed)
    }

    fn notify(&self) {
        if let Some(listener) = &self.on_change {
            listener();
        }
    }
}

/// Calendar-facing state: a day index rebuilt from the full entry set on
/// every refresh, plus the currently selected day.
pub struct CalendarState {
    db: Arc<Database>,
    index: DayIndex,
    selected: Option<NaiveDate>,
    on_change: Option<ChangeListener>,
}

impl CalendarState {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            index: DayIndex::default(),
            selected: None,
            on_change: None,
        }
    }

    pub fn set_on_change(&mut self, listener: ChangeListener) {
        self.on_change = Some(listener);
    }

    pub fn refresh(&mut self) -> AppResult<()> {
        let entries = self.db.fetch_all()?;
        self.index = DayIndex::build(&entries);
        if let Some(listener) = &self.on_change {
            listener();
        }
        Ok(())
    }

    pub fn entry_for(&self, day: NaiveDate) -> Option<&DiaryEntry> {
        self.index.lookup(day)
    }

    pub fn has_entry(&self, day: NaiveDate) -> bool {
        self.index.has_entry(day)
    }

    pub fn select(&mut self, day: NaiveDate) {
        self.selected = Some(day);
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }
}

/// Draft for one entry, new or under edit. Owns the trim-and-reject-empty
/// validation so the store never sees a blank entry.
pub struct EntryEditor {
    db: Arc<Database>,
    editing: Option<DiaryEntry>,
    pub content: String,
    pub mood: Mood,
    pub color_hex: String,
    pub date: DateTime<Utc>,
}

impl EntryEditor {
    /// Draft for a brand-new entry on the given diary date.
    pub fn new(db: Arc<Database>, date: DateTime<Utc>, default_color: &str) -> Self {
        Self {
            db,
            editing: None,
            content: String::new(),
            mood: Mood::Neutral,
            color_hex: default_color.to_string(),
            date,
        }
    }

    /// Draft prefilled from an existing entry. The diary date is shown but
    /// not editable after creation.
    pub fn for_entry(db: Arc<Database>, entry: DiaryEntry) -> Self {
        Self {
            db,
            content: entry.content.clone(),
            mood: entry.mood,
            color_hex: entry.color_hex.clone(),
            date: entry.date,
            editing: Some(entry),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Commits the draft: update when editing, create otherwise. A draft
    /// that trims to nothing is rejected before the store is touched.
    pub fn save(&mut self) -> AppResult<DiaryEntry> {
        let content = self.content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("entry content is empty".to_string()));
        }

        let saved = match &self.editing {
            Some(entry) => self
                .db
                .update_entry(&entry.id, content, self.mood, &self.color_hex)?,
            None => self
                .db
                .create_entry(content, self.mood, &self.color_hex, self.date)?,
        };
        self.editing = Some(saved.clone());
        Ok(saved)
    }

    /// Deletes the entry under edit. A draft that was never saved has
    /// nothing to delete.
    pub fn delete(&mut self) -> AppResult<()> {
        let entry = self
            .editing
            .take()
            .ok_or_else(|| AppError::NotFound("no entry under edit".to_string()))?;
        self.db.delete_entry(&entry.id)
    }

    pub fn reset(&mut self, default_color: &str) {
        self.content.clear();
        self.mood = Mood::Neutral;
        self.color_hex = default_color.to_string();
        self.editing = None;
    }
}
