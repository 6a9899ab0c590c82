//! Navigation destinations reachable from the history screen.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Destination handed to the navigation host.
///
/// Serialized with an internal `screen` tag so a receiving plugin can route on
/// it without knowing every variant, e.g.
/// `{"screen":"TaskInfo","taskId":"t1","date":"2026-10-16"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen")]
pub enum Route {
    /// Read-only details of an archived task on the day it was archived.
    #[serde(rename_all = "camelCase")]
    TaskInfo { task_id: String, date: NaiveDate },

    /// Task editor, optionally opened on the details section.
    #[serde(rename_all = "camelCase")]
    CreateOrUpdateTask { task_id: String, open_details: bool },

    /// Main task board.
    Main,
}

impl Route {
    /// Name of the destination screen.
    #[must_use]
    pub const fn screen(&self) -> &'static str {
        match self {
            Self::TaskInfo { .. } => "TaskInfo",
            Self::CreateOrUpdateTask { .. } => "CreateOrUpdateTask",
            Self::Main => "Main",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_screen_tag() {
        let route = Route::CreateOrUpdateTask {
            task_id: "t9".into(),
            open_details: true,
        };
        let json = serde_json::to_value(&route).expect("json");

        assert_eq!(json["screen"], "CreateOrUpdateTask");
        assert_eq!(json["taskId"], "t9");
        assert_eq!(json["openDetails"], true);
    }

    #[test]
    fn task_info_carries_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).expect("date");
        let json = serde_json::to_string(&Route::TaskInfo { task_id: "t1".into(), date }).expect("json");
        assert_eq!(json, r#"{"screen":"TaskInfo","taskId":"t1","date":"2026-10-16"}"#);
    }
}
