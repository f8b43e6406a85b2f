use std::path::Path;

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::{
    foundation::error::{HabitError, HabitResult},
    grid::snapshot::{DATE_FORMAT, HabitSnapshot},
};

pub const DEFAULT_SUBTITLE: &str = "Last 365 Days";

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HabitEntry {
    pub title: String,
    pub subtitle: String,
    /// `YYYY-MM-DD` strings as stored; entries this tool writes are kept sorted and unique.
    #[serde(default)]
    pub dates: Vec<String>,
}

/// The `habitos.json` document: every habit by slug plus the one shown on the wallpaper.
///
/// Habits keep the order they were added in, both in listings and in the saved file.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HabitBook {
    #[serde(default)]
    pub active_habit: Option<String>,
    #[serde(default)]
    pub habits: IndexMap<String, HabitEntry>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tracked {
    Added,
    AlreadyTracked,
}

/// Row of the `list` command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HabitSummary {
    pub slug: String,
    pub title: String,
    pub count: usize,
    pub last_tracked: Option<String>,
    pub active: bool,
}

/// Lowercase `name` and replace spaces with dashes.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

impl HabitBook {
    /// Read the book at `path`; a missing file is an empty book.
    pub fn load(path: &Path) -> HabitResult<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(HabitError::validation(format!(
                    "read habits '{}': {e}",
                    path.display()
                )));
            }
        };
        serde_json::from_str(&text)
            .map_err(|e| HabitError::serde(format!("parse habits '{}': {e}", path.display())))
    }

    pub fn save(&self, path: &Path) -> HabitResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| HabitError::serde(format!("serialize habits: {e}")))?;
        std::fs::write(path, json)
            .map_err(|e| HabitError::output(format!("write habits '{}': {e}", path.display())))
    }

    /// Register a new habit and return its slug. The first habit becomes active.
    pub fn add(&mut self, name: &str, title: &str, subtitle: &str) -> HabitResult<String> {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(HabitError::validation("habit name must not be empty"));
        }
        if self.habits.contains_key(&slug) {
            return Err(HabitError::validation(format!(
                "habit '{slug}' already exists"
            )));
        }

        self.habits.insert(
            slug.clone(),
            HabitEntry {
                title: title.to_owned(),
                subtitle: subtitle.to_owned(),
                dates: Vec::new(),
            },
        );
        if self.active_habit.is_none() {
            self.active_habit = Some(slug.clone());
        }
        Ok(slug)
    }

    /// Make `name` the active habit and return its slug.
    pub fn switch(&mut self, name: &str) -> HabitResult<String> {
        let slug = self.existing_slug(name)?;
        self.active_habit = Some(slug.clone());
        Ok(slug)
    }

    /// Slug for `name`, or the active habit when `name` is `None`.
    pub fn resolve(&self, name: Option<&str>) -> HabitResult<String> {
        match name {
            Some(name) => self.existing_slug(name),
            None => {
                let slug = self.active_habit.clone().ok_or_else(|| {
                    HabitError::validation(
                        "no active habit selected; use 'switch' or provide a habit name",
                    )
                })?;
                self.existing_slug(&slug)
            }
        }
    }

    /// Mark `today` as done for `name` (or the active habit).
    pub fn track(&mut self, name: Option<&str>, today: NaiveDate) -> HabitResult<(String, Tracked)> {
        let slug = self.resolve(name)?;
        let today = today.format(DATE_FORMAT).to_string();
        let entry = self
            .habits
            .get_mut(&slug)
            .ok_or_else(|| HabitError::validation(format!("habit '{slug}' not found")))?;

        if entry.dates.contains(&today) {
            return Ok((slug, Tracked::AlreadyTracked));
        }
        entry.dates.push(today);
        entry.dates.sort();
        Ok((slug, Tracked::Added))
    }

    /// Render input for `slug`; malformed stored dates are skipped.
    pub fn snapshot(&self, slug: &str) -> HabitResult<HabitSnapshot> {
        let entry = self
            .habits
            .get(slug)
            .ok_or_else(|| HabitError::validation(format!("habit '{slug}' not found")))?;
        Ok(HabitSnapshot::from_date_strings(
            entry.title.clone(),
            entry.subtitle.clone(),
            &entry.dates,
        ))
    }

    pub fn summaries(&self) -> Vec<HabitSummary> {
        self.habits
            .iter()
            .map(|(slug, entry)| HabitSummary {
                slug: slug.clone(),
                title: entry.title.clone(),
                count: entry.dates.len(),
                last_tracked: entry.dates.last().cloned(),
                active: self.active_habit.as_deref() == Some(slug.as_str()),
            })
            .collect()
    }

    fn existing_slug(&self, name: &str) -> HabitResult<String> {
        let slug = slugify(name);
        if !self.habits.contains_key(&slug) {
            return Err(HabitError::validation(format!("habit '{slug}' not found")));
        }
        Ok(slug)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/habits/book.rs"]
mod tests;
