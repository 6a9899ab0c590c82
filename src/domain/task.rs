//! Archived task model.
//!
//! An [`ArchivedTask`] is one row of the history list: a task (or a task group
//! when the grouped view is active) that was completed on a given calendar day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One archived task as returned by the history endpoint.
///
/// The backend speaks camelCase JSON; `groupName` is only present for grouped
/// results and `completedBy` only when the backend knows who closed the task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedTask {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub completed_by: Option<String>,
}

impl ArchivedTask {
    /// Creates a task with only the required fields set.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date,
            group_name: None,
            completed_by: None,
        }
    }

    /// Label shown in the secondary column of the list.
    ///
    /// Prefers the group name, then the person who completed the task, and
    /// falls back to an empty string.
    #[must_use]
    pub fn subtitle(&self) -> &str {
        self.group_name
            .as_deref()
            .or(self.completed_by.as_deref())
            .unwrap_or("")
    }
}
