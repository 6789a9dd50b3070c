//! List state for the console tables: one controller per entity type, owning
//! the last-fetched collection and the single row selection.
//!
//! The controller never mutates records — every view is a byproduct of the
//! most recent successful fetch, and `load` always replaces the collection
//! wholesale and drops the selection. Dependent-action enablement is derived
//! from the selection on every read, never toggled separately.

use thiserror::Error;

/// Display contract an entity provides to its list controller.
pub trait Row {
    const HEADERS: &'static [&'static str];
    /// Lowercase noun for user-facing messages ("patient", "appointment").
    const NOUN: &'static str;
    /// Placeholder shown instead of a table when the collection is empty.
    const EMPTY_TEXT: &'static str;

    fn id(&self) -> i64;
    fn cells(&self) -> Vec<String>;
}

/// Deterministic rendering of the controller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// Empty collection or failed load; the text distinguishes the two.
    Placeholder(String),
    Table {
        headers: &'static [&'static str],
        rows: Vec<RowView>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: i64,
    pub cells: Vec<String>,
    /// Marked on at most one row per view.
    pub selected: bool,
}

/// Selection of an id that is not currently rendered.
#[derive(Debug, Error)]
#[error("no {noun} with id {id} in the list")]
pub struct UnknownRow {
    pub noun: &'static str,
    pub id: i64,
}

pub struct ListController<T: Row> {
    items: Vec<T>,
    selection: Option<i64>,
    load_failed: bool,
}

impl<T: Row> Default for ListController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Row> ListController<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selection: None,
            load_failed: false,
        }
    }

    /// Replaces the collection with the fetch result. Selection is cleared in
    /// every case; on failure the collection empties and the error placeholder
    /// renders until the next successful load. The error is returned for the
    /// flow boundary to surface — no retry here.
    pub fn load<F, E>(&mut self, fetch: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<Vec<T>, E>,
    {
        self.selection = None;
        match fetch() {
            Ok(items) => {
                self.items = items;
                self.load_failed = false;
                Ok(())
            }
            Err(e) => {
                self.items.clear();
                self.load_failed = true;
                Err(e)
            }
        }
    }

    /// Marks `id` as the selected row. Idempotent on reselect; replaces any
    /// previous mark. Only a currently rendered row may be selected.
    pub fn select(&mut self, id: i64) -> Result<(), UnknownRow> {
        if !self.items.iter().any(|item| item.id() == id) {
            return Err(UnknownRow { noun: T::NOUN, id });
        }
        self.selection = Some(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selected(&self) -> Option<i64> {
        self.selection
    }

    /// Whether selection-gated actions (edit/delete) are available. Always a
    /// pure function of the current selection.
    pub fn selection_actions_enabled(&self) -> bool {
        self.selection.is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn view(&self) -> ListView {
        if self.load_failed {
            return ListView::Placeholder(format!("Could not load the {} list", T::NOUN));
        }
        if self.items.is_empty() {
            return ListView::Placeholder(T::EMPTY_TEXT.to_string());
        }
        ListView::Table {
            headers: T::HEADERS,
            rows: self
                .items
                .iter()
                .map(|item| RowView {
                    id: item.id(),
                    cells: item.cells(),
                    selected: self.selection == Some(item.id()),
                })
                .collect(),
        }
    }
}
