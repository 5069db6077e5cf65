//! An ordered list of unique colors with display names.

use std::collections::HashMap;

use crate::{code::ColorCode, error::Rejection, normalize::normalize};

/// Identifies an entry in a [`ColorList`]. Ids are assigned on insertion and
/// are never reused, so they stay valid when other entries are removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorId(u64);

/// An entry in a [`ColorList`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// The id of the entry.
    pub id: ColorId,
    /// The color.
    pub code: ColorCode,
}

/// Check whether `raw` can be added to `list`, without changing the list.
///
/// The input is normalized and validated. On success the canonical
/// [`ColorCode`] is returned for the caller to insert.
pub fn try_add(raw: &str, list: &ColorList) -> Result<ColorCode, Rejection> {
    let input = normalize(raw);

    let code = ColorCode::new(&input).map_err(|reason| Rejection::InvalidSyntax {
        input: input.clone(),
        reason,
    })?;

    if list.contains(&code) {
        return Err(Rejection::Duplicate {
            color: code.to_string(),
        });
    }

    Ok(code)
}

/// Colors in insertion order, each appearing at most once.
#[derive(Clone, Debug, Default)]
pub struct ColorList {
    entries: Vec<Entry>,
    names: HashMap<ColorId, String>,
    next_id: u64,
}

impl ColorList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Same as [`try_add`].
    pub fn check(&self, raw: &str) -> Result<ColorCode, Rejection> {
        try_add(raw, self)
    }

    /// Normalize, validate and append `raw`.
    pub fn add(&mut self, raw: &str) -> Result<ColorId, Rejection> {
        match try_add(raw, self) {
            Ok(code) => self.push(code),
            Err(err) => {
                tracing::debug!(raw, %err, "color rejected");
                Err(err)
            }
        }
    }

    /// Append an already validated color, unless it is in the list already.
    pub fn push(&mut self, code: ColorCode) -> Result<ColorId, Rejection> {
        if self.contains(&code) {
            return Err(Rejection::Duplicate {
                color: code.to_string(),
            });
        }

        let id = ColorId(self.next_id);
        self.next_id += 1;
        tracing::debug!(color = %code, ?id, "color added");
        self.entries.push(Entry { id, code });
        Ok(id)
    }

    /// Append each generated color that is not in the list yet. Returns the
    /// number of colors added.
    pub fn merge(&mut self, colors: impl IntoIterator<Item = ColorCode>) -> usize {
        colors
            .into_iter()
            .filter_map(|code| self.push(code).ok())
            .count()
    }

    /// Remove the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Entry> {
        if index >= self.entries.len() {
            return None;
        }
        let entry = self.entries.remove(index);
        self.names.remove(&entry.id);
        Some(entry)
    }

    /// Remove the entry with the given id.
    pub fn remove_by_id(&mut self, id: ColorId) -> Option<Entry> {
        let index = self.index_of(id)?;
        self.remove(index)
    }

    /// Remove all entries and names.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.names.clear();
    }

    /// Set the display name of an entry. An empty name resets it to the
    /// default. Returns false if there is no such entry.
    pub fn set_name(&mut self, id: ColorId, name: &str) -> bool {
        if self.index_of(id).is_none() {
            return false;
        }
        let name = name.trim();
        if name.is_empty() {
            self.names.remove(&id);
        } else {
            self.names.insert(id, name.to_string());
        }
        true
    }

    /// The name given to an entry with [`ColorList::set_name`], if any.
    pub fn name_of(&self, id: ColorId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// The name to display for an entry: its own name or `color <n>` with
    /// `n` its current position, counting from 1.
    pub fn display_name(&self, id: ColorId) -> Option<String> {
        let index = self.index_of(id)?;
        Some(
            self.name_of(id)
                .map(str::to_string)
                .unwrap_or_else(|| format!("color {}", index + 1)),
        )
    }

    /// The position of the entry with the given id.
    pub fn index_of(&self, id: ColorId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// The entry with the given id.
    pub fn get(&self, id: ColorId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// True if the exact canonical string is in the list.
    pub fn contains(&self, code: &ColorCode) -> bool {
        self.entries.iter().any(|entry| &entry.code == code)
    }

    /// Iterate over the entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// The colors in order, ready to export.
    pub fn codes(&self) -> Vec<ColorCode> {
        self.entries.iter().map(|entry| entry.code.clone()).collect()
    }

    /// The number of colors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no colors.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
