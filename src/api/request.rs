//! Endpoint URLs and request metadata.

use crate::domain::{HistoryError, Result};
use crate::history::{FetchTicket, PageRequest};
use crate::Config;
use std::collections::BTreeMap;
use url::Url;

/// Resolved backend endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    history: Url,
    auth: Url,
    tasks: Url,
    page_size: u32,
}

impl Endpoints {
    /// Resolves the endpoint paths against `api_base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Url`] if the base URL or a path does not parse,
    /// and [`HistoryError::Config`] if the base cannot carry path segments
    /// (e.g. `mailto:`).
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut base = Url::parse(&config.api_base_url)?;
        if base.cannot_be_a_base() {
            return Err(HistoryError::Config(format!(
                "api_base_url {} cannot be a base URL",
                config.api_base_url
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            history: base.join(&config.history_path)?,
            auth: base.join(&config.auth_path)?,
            tasks: base.join("tasks/")?,
            page_size: config.page_size,
        })
    }

    /// URL for one page of the history list.
    ///
    /// Carries `grouped`, `searchQuery`, `date`, `limit` and, past the first
    /// page, `cursor`.
    #[must_use]
    pub fn page_url(&self, request: &PageRequest) -> Url {
        let params = request.key.params();
        let mut url = self.history.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("grouped", if params.grouped { "true" } else { "false" })
                .append_pair("searchQuery", &params.search_query)
                .append_pair("date", &params.date)
                .append_pair("limit", &self.page_size.to_string());
            if let Some(cursor) = &request.cursor {
                query.append_pair("cursor", cursor.as_str());
            }
        }
        url
    }

    #[must_use]
    pub fn auth_url(&self) -> Url {
        self.auth.clone()
    }

    /// URL of the re-use command for `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Config`] if the tasks URL cannot take path segments.
    pub fn reuse_url(&self, task_id: &str) -> Result<Url> {
        let mut url = self.tasks.clone();
        url.path_segments_mut()
            .map_err(|()| HistoryError::Config("tasks URL cannot take path segments".to_string()))?
            .pop_if_empty()
            .push(task_id)
            .push("reuse");
        Ok(url)
    }
}

/// Headers sent with every backend request.
#[must_use]
pub fn headers(token: Option<&str>) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("Accept".to_string(), "application/json".to_string());
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        headers.insert("Authorization".to_string(), format!("Bearer {token}"));
    }
    headers
}

/// What a web request was issued for, round-tripped through Zellij's
/// request context map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestContext {
    Auth,
    Page(FetchTicket),
    Reuse { task_id: String },
}

impl RequestContext {
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        match self {
            Self::Auth => {
                context.insert("kind".to_string(), "auth".to_string());
            }
            Self::Page(ticket) => {
                context.insert("kind".to_string(), "page".to_string());
                context.insert("session".to_string(), ticket.session.to_string());
                context.insert("request".to_string(), ticket.request.to_string());
            }
            Self::Reuse { task_id } => {
                context.insert("kind".to_string(), "reuse".to_string());
                context.insert("task_id".to_string(), task_id.clone());
            }
        }
        context
    }

    /// Reads back a context written by [`Self::to_context`]; `None` for
    /// anything else.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        match context.get("kind")?.as_str() {
            "auth" => Some(Self::Auth),
            "page" => {
                let session = context.get("session")?.parse().ok()?;
                let request = context.get("request")?.parse().ok()?;
                Some(Self::Page(FetchTicket { session, request }))
            }
            "reuse" => Some(Self::Reuse {
                task_id: context.get("task_id")?.clone(),
            }),
            _ => None,
        }
    }
}
