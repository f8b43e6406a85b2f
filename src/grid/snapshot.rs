use std::collections::BTreeSet;

use chrono::NaiveDate;

/// Calendar date format used by the habit store.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Immutable render input: display text plus the set of completed days.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HabitSnapshot {
    pub title: String,
    pub subtitle: String,
    pub completed_dates: BTreeSet<NaiveDate>,
    /// Number of input strings that were not valid dates and were dropped.
    pub skipped: usize,
}

impl HabitSnapshot {
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        completed_dates: BTreeSet<NaiveDate>,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            completed_dates,
            skipped: 0,
        }
    }

    /// Build a snapshot from `YYYY-MM-DD` strings, skipping any that do not parse.
    pub fn from_date_strings<I, S>(title: impl Into<String>, subtitle: impl Into<String>, dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (completed_dates, skipped) = parse_dates(dates);
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            completed_dates,
            skipped,
        }
    }
}

/// Leniently parse date strings; returns the parsed set and how many were skipped.
pub fn parse_dates<I, S>(dates: I) -> (BTreeSet<NaiveDate>, usize)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = BTreeSet::new();
    let mut skipped = 0usize;
    for raw in dates {
        let raw = raw.as_ref();
        match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
            Ok(date) => {
                set.insert(date);
            }
            Err(err) => {
                tracing::warn!(value = raw, %err, "skipping malformed completion date");
                skipped += 1;
            }
        }
    }
    (set, skipped)
}
