//! Paginated fetch lifecycle for one query key at a time.
//!
//! [`PaginatedFetchController`] owns at most one [`FetchSession`]. A session
//! belongs to exactly one [`QueryKey`]; when the key changes the session is
//! replaced, never mutated, so pages fetched for an old filter cannot leak into
//! a new result set.
//!
//! # State Machine
//!
//! ```text
//! IDLE ──first page──▶ LOADING ──ok──▶ SUCCESS ──next page──▶ LOADING_MORE
//!                         │                ▲                       │
//!                         │                └──────────ok───────────┤
//!                         └──err──▶ ERROR ◀──────────err───────────┘
//! ```
//!
//! ERROR is terminal for the session. Recovery happens only through a new
//! session, i.e. a new key.
//!
//! A refresh ([`PaginatedFetchController::refetch`]) re-requests the first
//! page of a SUCCESS session without leaving SUCCESS. The loaded pages stay
//! visible until the fresh first page replaces them; a failed refresh keeps
//! them and only records the error.
//!
//! # Stale-Response Guard
//!
//! Every issued [`PageRequest`] carries a [`FetchTicket`] naming its session
//! and request. A [`PageResponse`] is applied only if its ticket matches the
//! current session's in-flight request; anything else is reported as
//! [`ApplyOutcome::Stale`] and dropped. Since at most one request is in flight
//! per session, pages are appended in the order they were requested.

use crate::domain::{ArchivedTask, Cursor, FetchError, Page, QueryKey};
use std::fmt;

/// Identifies one issued page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub session: u64,
    pub request: u64,
}

impl fmt::Display for FetchTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}/r{}", self.session, self.request)
    }
}

/// A page fetch to be performed by the data collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub ticket: FetchTicket,
    pub key: QueryKey,
    /// `None` for the first page.
    pub cursor: Option<Cursor>,
}

/// Result of a page fetch, echoed back with the ticket it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
    pub ticket: FetchTicket,
    pub result: Result<Page, FetchError>,
}

/// Lifecycle status of a fetch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    LoadingMore,
    Success,
    Error,
}

/// Accumulated state of one paginated fetch for one key.
#[derive(Debug, Clone)]
pub struct FetchSession {
    id: u64,
    key: QueryKey,
    pages: Vec<Page>,
    status: FetchStatus,
    has_next_page: bool,
    in_flight: Option<u64>,
    refreshing: bool,
    error: Option<FetchError>,
}

impl FetchSession {
    fn new(id: u64, key: QueryKey) -> Self {
        Self {
            id,
            key,
            pages: Vec::new(),
            status: FetchStatus::Idle,
            has_next_page: false,
            in_flight: None,
            refreshing: false,
            error: None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub const fn key(&self) -> &QueryKey {
        &self.key
    }

    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    #[must_use]
    pub const fn status(&self) -> FetchStatus {
        self.status
    }

    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether a background refresh of the first page is in flight.
    #[must_use]
    pub const fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// All items of all pages, in page order.
    pub fn items(&self) -> impl Iterator<Item = &ArchivedTask> {
        self.pages.iter().flat_map(|page| page.items.iter())
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.pages.iter().map(|page| page.items.len()).sum()
    }
}

/// Whether a response was applied to the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Stale,
}

/// Owner of the current fetch session.
#[derive(Debug, Default)]
pub struct PaginatedFetchController {
    session: Option<FetchSession>,
    next_session: u64,
    next_request: u64,
}

impl PaginatedFetchController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn session(&self) -> Option<&FetchSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn status(&self) -> FetchStatus {
        self.session
            .as_ref()
            .map_or(FetchStatus::Idle, FetchSession::status)
    }

    /// Makes sure a session exists for `key`.
    ///
    /// When the current session already belongs to `key` nothing happens and
    /// `None` is returned. Otherwise the current session is discarded, a new
    /// one enters LOADING and the first-page request is returned.
    pub fn ensure_session(&mut self, key: &QueryKey) -> Option<PageRequest> {
        if self.session.as_ref().is_some_and(|session| &session.key == key) {
            return None;
        }
        Some(self.start_session(key.clone()))
    }

    /// Re-requests the first page of a successful session in the background.
    ///
    /// Used when the screen regains focus. The session stays in SUCCESS with
    /// its pages until the response arrives. Has no effect unless the current
    /// session is in SUCCESS with nothing in flight, so it never doubles as an
    /// error retry and never competes with another request.
    pub fn refetch(&mut self) -> Option<PageRequest> {
        let session = self.session.as_mut()?;
        if session.status != FetchStatus::Success || session.in_flight.is_some() {
            tracing::debug!(status = ?session.status, in_flight = session.in_flight.is_some(), "refetch skipped");
            return None;
        }

        let request_id = self.next_request;
        self.next_request += 1;
        session.in_flight = Some(request_id);
        session.refreshing = true;

        let request = PageRequest {
            ticket: FetchTicket {
                session: session.id,
                request: request_id,
            },
            key: session.key.clone(),
            cursor: None,
        };
        tracing::debug!(ticket = %request.ticket, "refreshing first page");
        Some(request)
    }

    /// Requests the page after the last accumulated one.
    ///
    /// Legal only in SUCCESS with a next page available. In every other case
    /// this is a no-op that returns `None`, so repeated calls while a page is
    /// loading never queue or duplicate requests.
    pub fn fetch_next_page(&mut self) -> Option<PageRequest> {
        let ticket_session;
        let request_id;
        let key;
        let cursor;
        {
            let session = self.session.as_mut()?;
            if session.status != FetchStatus::Success
                || !session.has_next_page
                || session.in_flight.is_some()
            {
                tracing::trace!(status = ?session.status, has_next = session.has_next_page, "next page not available");
                return None;
            }
            let Some(next) = session.pages.last().and_then(Page::continuation).cloned() else {
                session.has_next_page = false;
                return None;
            };

            request_id = self.next_request;
            self.next_request += 1;
            session.in_flight = Some(request_id);
            session.status = FetchStatus::LoadingMore;
            ticket_session = session.id;
            key = session.key.clone();
            cursor = Some(next);
        }

        let request = PageRequest {
            ticket: FetchTicket {
                session: ticket_session,
                request: request_id,
            },
            key,
            cursor,
        };
        tracing::debug!(ticket = %request.ticket, "requesting next page");
        Some(request)
    }

    /// Applies a page response if it belongs to the in-flight request of the
    /// current session.
    pub fn apply(&mut self, response: PageResponse) -> ApplyOutcome {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!(ticket = %response.ticket, "response after session was dropped");
            return ApplyOutcome::Stale;
        };
        if response.ticket.session != session.id
            || session.in_flight != Some(response.ticket.request)
        {
            tracing::debug!(
                ticket = %response.ticket,
                current_session = session.id,
                "discarding stale page response"
            );
            return ApplyOutcome::Stale;
        }

        session.in_flight = None;
        if std::mem::take(&mut session.refreshing) {
            match response.result {
                Ok(page) => {
                    session.has_next_page = page.has_next();
                    session.pages = vec![page];
                    session.error = None;
                }
                Err(error) => {
                    tracing::warn!(ticket = %response.ticket, error = %error, "refresh failed, keeping loaded pages");
                    session.error = Some(error);
                }
            }
            tracing::debug!(ticket = %response.ticket, items = session.item_count(), "refresh applied");
            return ApplyOutcome::Applied;
        }

        match (session.status, response.result) {
            (FetchStatus::Loading, Ok(page)) => {
                session.has_next_page = page.has_next();
                session.pages = vec![page];
                session.error = None;
                session.status = FetchStatus::Success;
            }
            (FetchStatus::LoadingMore, Ok(page)) => {
                session.has_next_page = page.has_next();
                session.pages.push(page);
                session.error = None;
                session.status = FetchStatus::Success;
            }
            (FetchStatus::Loading | FetchStatus::LoadingMore, Err(error)) => {
                tracing::warn!(ticket = %response.ticket, error = %error, "page fetch failed");
                session.error = Some(error);
                session.status = FetchStatus::Error;
            }
            (status, _) => {
                tracing::warn!(?status, "response arrived for a session that was not loading");
                return ApplyOutcome::Stale;
            }
        }

        tracing::debug!(
            ticket = %response.ticket,
            pages = session.pages.len(),
            items = session.item_count(),
            has_next = session.has_next_page,
            status = ?session.status,
            "page response applied"
        );
        ApplyOutcome::Applied
    }

    /// Drops the current session; any response still in flight becomes stale.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!(session = session.id, "fetch session dropped");
        }
    }

    fn start_session(&mut self, key: QueryKey) -> PageRequest {
        let id = self.next_session;
        self.next_session += 1;
        let request_id = self.next_request;
        self.next_request += 1;

        if let Some(previous) = &self.session {
            tracing::debug!(
                previous = previous.id,
                previous_in_flight = previous.is_in_flight(),
                "superseding fetch session"
            );
        }

        let mut session = FetchSession::new(id, key.clone());
        session.status = FetchStatus::Loading;
        session.in_flight = Some(request_id);
        self.session = Some(session);

        let request = PageRequest {
            ticket: FetchTicket {
                session: id,
                request: request_id,
            },
            key,
            cursor: None,
        };
        tracing::debug!(ticket = %request.ticket, key = %request.key, "requesting first page");
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GroupingMode;
    use chrono::NaiveDate;

    fn key(query: &str) -> QueryKey {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).expect("date");
        QueryKey::new(query, GroupingMode::Single, date)
    }

    fn page(ids: &[&str], next: Option<&str>) -> Page {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).expect("date");
        Page::new(
            ids.iter().map(|id| ArchivedTask::new(*id, format!("task {id}"), date)).collect(),
            next.map(Cursor::new),
        )
    }

    fn ok(request: &PageRequest, page: Page) -> PageResponse {
        PageResponse {
            ticket: request.ticket,
            result: Ok(page),
        }
    }

    #[test]
    fn first_page_success_moves_to_success() {
        let mut controller = PaginatedFetchController::new();
        let request = controller.ensure_session(&key("")).expect("first request");
        assert_eq!(request.cursor, None);
        assert_eq!(controller.status(), FetchStatus::Loading);

        assert_eq!(controller.apply(ok(&request, page(&["a", "b"], Some("c1")))), ApplyOutcome::Applied);

        let session = controller.session().expect("session");
        assert_eq!(session.status(), FetchStatus::Success);
        assert!(session.has_next_page());
        assert_eq!(session.item_count(), 2);
    }

    #[test]
    fn same_key_does_not_restart() {
        let mut controller = PaginatedFetchController::new();
        assert!(controller.ensure_session(&key("milk")).is_some());
        assert!(controller.ensure_session(&key("milk")).is_none());
    }

    #[test]
    fn first_page_failure_is_terminal() {
        let mut controller = PaginatedFetchController::new();
        let request = controller.ensure_session(&key("")).expect("request");
        let outcome = controller.apply(PageResponse {
            ticket: request.ticket,
            result: Err(FetchError::Http { status: 500 }),
        });

        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(controller.status(), FetchStatus::Error);
        assert!(controller.fetch_next_page().is_none());
        assert!(controller.refetch().is_none());
        assert!(controller.ensure_session(&key("")).is_none());
        assert_eq!(
            controller.session().and_then(FetchSession::error),
            Some(&FetchError::Http { status: 500 })
        );
    }

    #[test]
    fn next_page_appends_in_order() {
        let mut controller = PaginatedFetchController::new();
        let first = controller.ensure_session(&key("")).expect("first");
        controller.apply(ok(&first, page(&["a"], Some("c1"))));

        let second = controller.fetch_next_page().expect("second");
        assert_eq!(second.cursor, Some(Cursor::new("c1")));
        assert_eq!(controller.status(), FetchStatus::LoadingMore);

        controller.apply(ok(&second, page(&["b"], None)));
        let session = controller.session().expect("session");
        let ids: Vec<&str> = session.items().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(!session.has_next_page());
        assert!(controller.fetch_next_page().is_none());
    }

    #[test]
    fn double_next_page_issues_one_request() {
        let mut controller = PaginatedFetchController::new();
        let first = controller.ensure_session(&key("")).expect("first");
        controller.apply(ok(&first, page(&["a"], Some("c1"))));

        let second = controller.fetch_next_page().expect("second");
        assert!(controller.fetch_next_page().is_none());

        controller.apply(ok(&second, page(&["b"], Some("c2"))));
        assert_eq!(controller.session().expect("session").pages().len(), 2);
    }

    #[test]
    fn response_for_superseded_key_is_discarded() {
        let mut controller = PaginatedFetchController::new();
        let old = controller.ensure_session(&key("milk")).expect("old");
        let new = controller.ensure_session(&key("milk eggs")).expect("new");

        assert_eq!(controller.apply(ok(&old, page(&["stale"], None))), ApplyOutcome::Stale);
        assert_eq!(controller.status(), FetchStatus::Loading);

        assert_eq!(controller.apply(ok(&new, page(&["fresh"], None))), ApplyOutcome::Applied);
        let session = controller.session().expect("session");
        assert_eq!(session.key(), &key("milk eggs"));
        assert_eq!(session.items().next().map(|t| t.id.as_str()), Some("fresh"));
    }

    #[test]
    fn duplicate_delivery_is_stale() {
        let mut controller = PaginatedFetchController::new();
        let request = controller.ensure_session(&key("")).expect("request");
        controller.apply(ok(&request, page(&["a"], None)));

        assert_eq!(controller.apply(ok(&request, page(&["a"], None))), ApplyOutcome::Stale);
        assert_eq!(controller.session().expect("session").item_count(), 1);
    }

    #[test]
    fn next_page_failure_keeps_loaded_pages() {
        let mut controller = PaginatedFetchController::new();
        let first = controller.ensure_session(&key("")).expect("first");
        controller.apply(ok(&first, page(&["a"], Some("c1"))));
        let second = controller.fetch_next_page().expect("second");

        controller.apply(PageResponse {
            ticket: second.ticket,
            result: Err(FetchError::Transport("reset".into())),
        });

        let session = controller.session().expect("session");
        assert_eq!(session.status(), FetchStatus::Error);
        assert_eq!(session.item_count(), 1);
    }

    #[test]
    fn refetch_only_from_success() {
        let mut controller = PaginatedFetchController::new();
        assert!(controller.refetch().is_none());

        let first = controller.ensure_session(&key("")).expect("first");
        assert!(controller.refetch().is_none());
        controller.apply(ok(&first, page(&["a"], Some("c1"))));

        let again = controller.refetch().expect("refetch");
        assert_eq!(again.ticket.session, first.ticket.session);
        assert_eq!(again.cursor, None);
        assert_eq!(controller.status(), FetchStatus::Success);
        assert!(controller.refetch().is_none());
        assert!(controller.fetch_next_page().is_none());
    }

    #[test]
    fn refresh_keeps_pages_until_first_page_arrives() {
        let mut controller = PaginatedFetchController::new();
        let first = controller.ensure_session(&key("")).expect("first");
        controller.apply(ok(&first, page(&["a"], Some("c1"))));
        let second = controller.fetch_next_page().expect("second");
        controller.apply(ok(&second, page(&["b"], None)));

        let refresh = controller.refetch().expect("refresh");
        let session = controller.session().expect("session");
        assert!(session.is_refreshing());
        assert_eq!(session.item_count(), 2);

        assert_eq!(controller.apply(ok(&refresh, page(&["a", "new"], Some("c9")))), ApplyOutcome::Applied);
        let session = controller.session().expect("session");
        assert!(!session.is_refreshing());
        assert_eq!(session.status(), FetchStatus::Success);
        let ids: Vec<&str> = session.items().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "new"]);
        assert!(session.has_next_page());
    }

    #[test]
    fn failed_refresh_keeps_loaded_pages() {
        let mut controller = PaginatedFetchController::new();
        let first = controller.ensure_session(&key("")).expect("first");
        controller.apply(ok(&first, page(&["a"], None)));

        let refresh = controller.refetch().expect("refresh");
        controller.apply(PageResponse {
            ticket: refresh.ticket,
            result: Err(FetchError::Transport("offline".into())),
        });

        let session = controller.session().expect("session");
        assert_eq!(session.status(), FetchStatus::Success);
        assert_eq!(session.item_count(), 1);
        assert_eq!(session.error(), Some(&FetchError::Transport("offline".into())));
        assert!(controller.refetch().is_some());
    }

    #[test]
    fn key_change_during_refresh_makes_it_stale() {
        let mut controller = PaginatedFetchController::new();
        let first = controller.ensure_session(&key("")).expect("first");
        controller.apply(ok(&first, page(&["a"], None)));
        let refresh = controller.refetch().expect("refresh");

        let fresh = controller.ensure_session(&key("milk")).expect("new key");
        assert_eq!(controller.apply(ok(&refresh, page(&["old"], None))), ApplyOutcome::Stale);
        assert_eq!(controller.apply(ok(&fresh, page(&["milk"], None))), ApplyOutcome::Applied);
    }

    #[test]
    fn cancel_turns_in_flight_response_stale() {
        let mut controller = PaginatedFetchController::new();
        let request = controller.ensure_session(&key("")).expect("request");
        controller.cancel();

        assert_eq!(controller.apply(ok(&request, page(&["a"], None))), ApplyOutcome::Stale);
        assert!(controller.session().is_none());
    }
}
