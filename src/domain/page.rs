//! Pages of archived tasks.

use super::task::ArchivedTask;
use serde::{Deserialize, Serialize};

/// Opaque continuation token handed out by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page of results.
///
/// `next_cursor == None` means the backend has no further pages for the query.
/// An empty-string cursor is treated the same as a missing one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub items: Vec<ArchivedTask>,
    #[serde(default)]
    pub next_cursor: Option<Cursor>,
}

impl Page {
    #[must_use]
    pub fn new(items: Vec<ArchivedTask>, next_cursor: Option<Cursor>) -> Self {
        let next_cursor = next_cursor.filter(|cursor| !cursor.as_str().is_empty());
        Self { items, next_cursor }
    }

    /// Continuation token for the page after this one, if any.
    #[must_use]
    pub fn continuation(&self) -> Option<&Cursor> {
        self.next_cursor
            .as_ref()
            .filter(|cursor| !cursor.as_str().is_empty())
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.continuation().is_some()
    }
}
