use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Extra fields some activities attach to a completed day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AnnotatedDay {
    pub day: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mp3_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_name: Option<String>,
}

/// One `completed_days` entry.
///
/// Older weeks store bare date strings; newer entries for expressions
/// and podcast shadowing are objects carrying metadata. Both forms mean
/// "completed", so membership checks must go through
/// [`CompletionEntry::day`] instead of matching on the shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompletionEntry {
    Simple(NaiveDate),
    Annotated(AnnotatedDay),
}

impl CompletionEntry {
    /// The calendar date this entry marks, regardless of stored form.
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        match self {
            CompletionEntry::Simple(day) => *day,
            CompletionEntry::Annotated(annotated) => annotated.day,
        }
    }

    #[must_use]
    pub fn annotation(&self) -> Option<&AnnotatedDay> {
        match self {
            CompletionEntry::Simple(_) => None,
            CompletionEntry::Annotated(annotated) => Some(annotated),
        }
    }
}

/// The set of completed days for one activity in one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct CompletedDays(Vec<CompletionEntry>);

impl CompletedDays {
    #[must_use]
    pub fn new(entries: Vec<CompletionEntry>) -> Self {
        Self(entries)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `day` appears as a bare date or as the `day` field of
    /// an object entry.
    #[must_use]
    pub fn contains_day(&self, day: NaiveDate) -> bool {
        self.0.iter().any(|entry| entry.day() == day)
    }

    #[must_use]
    pub fn entry_for(&self, day: NaiveDate) -> Option<&CompletionEntry> {
        self.0.iter().find(|entry| entry.day() == day)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompletionEntry> {
        self.0.iter()
    }

    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0.iter().map(CompletionEntry::day)
    }

    /// Record a completed day, replacing any previous entry for the
    /// same date. Used by tests and by optimistic reconciliation; the
    /// server copy stays authoritative.
    pub fn mark(&mut self, entry: CompletionEntry) {
        self.unmark(entry.day());
        self.0.push(entry);
    }

    /// Remove the entry for `day` regardless of its stored form.
    pub fn unmark(&mut self, day: NaiveDate) {
        self.0.retain(|entry| entry.day() != day);
    }
}

impl<'a> IntoIterator for &'a CompletedDays {
    type Item = &'a CompletionEntry;
    type IntoIter = std::slice::Iter<'a, CompletionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
