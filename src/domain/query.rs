//! Query identity for the history list.
//!
//! A [`QueryKey`] is the fetch identity derived from the filter inputs that
//! have settled: the debounced search text, the grouping mode and the selected
//! calendar date. Two keys compare equal exactly when they would request the
//! same result set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How archived results are grouped.
///
/// Serialized with the backend's wire names `TASK` and `GROUP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GroupingMode {
    /// One row per archived task.
    #[default]
    #[serde(rename = "TASK")]
    Single,

    /// One row per archived task group.
    #[serde(rename = "GROUP")]
    Grouped,
}

impl GroupingMode {
    /// Returns the other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Single => Self::Grouped,
            Self::Grouped => Self::Single,
        }
    }

    /// Value of the `grouped` query parameter.
    #[must_use]
    pub const fn is_grouped(self) -> bool {
        matches!(self, Self::Grouped)
    }

    /// Wire name (`TASK` / `GROUP`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "TASK",
            Self::Grouped => "GROUP",
        }
    }
}

impl fmt::Display for GroupingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fetch identity derived from settled filter inputs.
///
/// Constructed only from the *effective* (already debounced) search text, so
/// keystrokes still inside the quiescence window never change the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    search_query: String,
    grouping: GroupingMode,
    date: NaiveDate,
}

impl QueryKey {
    #[must_use]
    pub fn new(search_query: impl Into<String>, grouping: GroupingMode, date: NaiveDate) -> Self {
        Self {
            search_query: search_query.into(),
            grouping,
            date,
        }
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    #[must_use]
    pub const fn grouping(&self) -> GroupingMode {
        self.grouping
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Wire parameters sent to the history endpoint for this key.
    #[must_use]
    pub fn params(&self) -> QueryParams {
        QueryParams {
            grouped: self.grouping.is_grouped(),
            search_query: self.search_query.clone(),
            date: self.date.format("%Y-%m-%d").to_string(),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{:?}", self.date, self.grouping, self.search_query)
    }
}

/// Query parameters of a history request.
///
/// `date` is an ISO-8601 calendar date (`yyyy-mm-dd`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    pub grouped: bool,
    pub search_query: String,
    pub date: String,
}
