//! End-to-end flows through `handle_event` and `ports::execute` against a
//! recording host.

use chrono::NaiveDate;
use std::time::{Duration, Instant};
use taskhistory::domain::{ArchivedTask, Cursor, Page};
use taskhistory::history::{
    FetchStatus, HeaderConfig, ModalKind, ModalRequest, NavigationId, PageRequest, PageResponse,
};
use taskhistory::modals::{CalendarKey, CalendarOutcome, ModalStack};
use taskhistory::ports::{self, AuthCollaborator, DataFetcher, ModalHost, Navigator, Scheduler, TaskCommands};
use taskhistory::ui::BodyView;
use taskhistory::{handle_event, AppState, AuthState, Event, Route, Theme};

const DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Default)]
struct RecordingHost {
    auth_requests: usize,
    fetches: Vec<PageRequest>,
    timers: Vec<Duration>,
    headers: Vec<HeaderConfig>,
    routes: Vec<Route>,
    reused: Vec<String>,
    closed: bool,
    modals: ModalStack,
}

impl AuthCollaborator for RecordingHost {
    fn resolve_auth(&mut self) {
        self.auth_requests += 1;
    }
}

impl DataFetcher for RecordingHost {
    fn fetch_page(&mut self, request: &PageRequest) {
        self.fetches.push(request.clone());
    }
}

impl Navigator for RecordingHost {
    fn set_options(&mut self, header: &HeaderConfig) {
        self.headers.push(header.clone());
    }

    fn navigate(&mut self, route: &Route) {
        self.routes.push(route.clone());
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

impl ModalHost for RecordingHost {
    fn present(&mut self, request: ModalRequest) {
        self.modals.present(request);
    }

    fn dismiss(&mut self, kind: ModalKind) {
        self.modals.dismiss(kind);
    }
}

impl Scheduler for RecordingHost {
    fn arm(&mut self, after: Duration) {
        self.timers.push(after);
    }
}

impl TaskCommands for RecordingHost {
    fn reuse(&mut self, task_id: &str) {
        self.reused.push(task_id.to_string());
    }
}

struct Harness {
    state: AppState,
    host: RecordingHost,
}

impl Harness {
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).expect("date")
    }

    /// Mounted, signed in, first page answered with `titles`.
    fn signed_in(titles: &[&str]) -> Self {
        let mut harness = Self {
            state: AppState::new(Self::today(), DEBOUNCE, Theme::default()),
            host: RecordingHost::default(),
        };
        harness.send(Event::Mount {
            navigation: NavigationId(1),
        });
        harness.send(Event::AuthResolved(AuthState::Success {
            role: "member".to_string(),
        }));
        let first = harness.last_fetch();
        harness.answer(&first, titles, None);
        harness
    }

    fn send(&mut self, event: Event) -> bool {
        let (render, actions) = handle_event(&mut self.state, &event).expect("handle event");
        ports::execute_all(&actions, &mut self.host);
        render
    }

    fn last_fetch(&self) -> PageRequest {
        self.host.fetches.last().cloned().expect("a fetch was issued")
    }

    fn answer(&mut self, request: &PageRequest, titles: &[&str], next: Option<&str>) -> bool {
        let items = titles
            .iter()
            .map(|title| ArchivedTask::new(*title, *title, request.key.date()))
            .collect();
        self.send(Event::PageLoaded(PageResponse {
            ticket: request.ticket,
            result: Ok(Page::new(items, next.map(Cursor::new))),
        }))
    }

    fn type_text(&mut self, text: &str, start: Instant, gap: Duration) -> Instant {
        let mut now = start;
        for c in text.chars() {
            self.send(Event::SearchChar { c, now });
            now += gap;
        }
        now - gap
    }

    fn list_titles(&self) -> Vec<String> {
        match self.state.compute_viewmodel(40, 100).map(|vm| vm.body) {
            Some(BodyView::List(list)) => list.items.into_iter().map(|item| item.title).collect(),
            _ => vec![],
        }
    }
}

#[test]
fn typing_burst_issues_one_fetch_for_final_text() {
    let mut h = Harness::signed_in(&["Buy bread"]);
    let fetches_before = h.host.fetches.len();
    let t0 = Instant::now();

    h.send(Event::SearchMode);
    let after_milk = h.type_text("milk", t0, Duration::from_millis(20));
    let last = h.type_text(" eggs", after_milk + Duration::from_millis(100), Duration::from_millis(20));
    assert!(last - t0 < Duration::from_millis(300));

    // the first timer fires while later edits are still settling
    h.send(Event::Tick {
        now: t0 + DEBOUNCE,
    });
    assert_eq!(h.host.fetches.len(), fetches_before);

    h.send(Event::Tick { now: last + DEBOUNCE });
    assert_eq!(h.host.fetches.len(), fetches_before + 1);
    assert_eq!(h.last_fetch().key.params().search_query, "milk eggs");

    h.send(Event::Tick {
        now: last + DEBOUNCE * 2,
    });
    assert_eq!(h.host.fetches.len(), fetches_before + 1);
}

#[test]
fn date_change_during_load_discards_old_result() {
    let t0 = Instant::now();
    let mut h = Harness::signed_in(&["Water plants"]);
    let today = Harness::today();

    // edit search so a fetch for today is in flight
    h.send(Event::SearchMode);
    h.type_text("w", t0, Duration::ZERO);
    h.send(Event::Tick { now: t0 + DEBOUNCE });
    let old = h.last_fetch();
    assert_eq!(h.state.fetch().status(), FetchStatus::Loading);

    h.send(Event::OpenCalendar { today });
    assert!(h.host.modals.is_open());
    h.host.modals.handle_calendar_key(CalendarKey::PrevDay);
    let outcome = h.host.modals.handle_calendar_key(CalendarKey::Commit);
    let Some(CalendarOutcome::Committed(picked)) = outcome else {
        panic!("calendar did not commit: {outcome:?}");
    };
    h.send(Event::CalendarCommitted(picked));

    let new = h.last_fetch();
    assert_ne!(new.ticket, old.ticket);
    assert_eq!(new.key.date(), today.pred_opt().expect("yesterday"));
    assert_eq!(h.host.headers.last().map(|header| header.selected_date), Some(picked));
    assert!(!h.host.modals.is_open());

    assert!(!h.answer(&old, &["stale row"], None));
    assert_eq!(h.state.fetch().status(), FetchStatus::Loading);

    assert!(h.answer(&new, &["Walk dog"], None));
    assert_eq!(h.list_titles(), vec!["Walk dog".to_string()]);
}

#[test]
fn header_follows_date_not_search() {
    let t0 = Instant::now();
    let mut h = Harness::signed_in(&["a"]);
    assert_eq!(h.host.headers.len(), 1);

    h.send(Event::SearchMode);
    let last = h.type_text("abc", t0, Duration::from_millis(10));
    h.send(Event::Tick { now: last + DEBOUNCE });
    h.send(Event::ToggleGrouping);
    assert_eq!(h.host.headers.len(), 1);

    h.send(Event::OpenCalendar {
        today: Harness::today(),
    });
    h.send(Event::CalendarCommitted(Harness::today()));
    assert_eq!(h.host.headers.len(), 1, "same date does not resync");
}

#[test]
fn infinite_scroll_appends_next_page() {
    let mut h = Harness::signed_in(&[]);
    h.send(Event::ToggleGrouping);
    let first = h.last_fetch();
    h.answer(&first, &["g1", "g2"], Some("c2"));

    h.send(Event::KeyDown);
    h.send(Event::KeyDown);
    h.send(Event::KeyDown);
    let next = h.last_fetch();
    assert_eq!(next.cursor, Some(Cursor::new("c2")));
    assert_eq!(next.ticket.session, first.ticket.session);
    let issued = h.host.fetches.len();

    h.send(Event::KeyDown);
    assert_eq!(h.host.fetches.len(), issued, "one page request at a time");

    h.answer(&next, &["g3"], None);
    assert_eq!(h.list_titles(), vec!["g1", "g2", "g3"]);
}

#[test]
fn reuse_navigates_home_after_success() {
    let mut h = Harness::signed_in(&["Buy bread"]);

    h.send(Event::ReuseTask);
    assert_eq!(h.host.reused, vec!["Buy bread".to_string()]);
    h.send(Event::TaskReused);
    assert_eq!(h.host.routes, vec![Route::Main]);

    h.send(Event::CloseFocus);
    assert!(h.host.closed);
}

#[test]
fn auth_failure_keeps_screen_blank() {
    let mut state = AppState::new(Harness::today(), DEBOUNCE, Theme::default());
    let mut host = RecordingHost::default();
    for event in [
        Event::Mount {
            navigation: NavigationId(9),
        },
        Event::AuthResolved(AuthState::Error {
            message: "expired".to_string(),
        }),
    ] {
        let (_, actions) = handle_event(&mut state, &event).expect("handle");
        ports::execute_all(&actions, &mut host);
    }

    assert_eq!(host.auth_requests, 1);
    assert!(host.fetches.is_empty());
    assert!(state.compute_viewmodel(24, 80).is_none());
}

#[test]
fn focus_refresh_keeps_rows_on_screen() {
    let mut h = Harness::signed_in(&["Buy bread", "Water plants"]);
    h.send(Event::KeyDown);
    let issued = h.host.fetches.len();

    h.send(Event::FocusGained);
    assert_eq!(h.host.fetches.len(), issued + 1);
    let refresh = h.last_fetch();
    assert_eq!(refresh.cursor, None);
    assert_eq!(h.list_titles(), vec!["Buy bread", "Water plants"]);
    assert_eq!(h.state.selected_index, 1);

    h.answer(&refresh, &["Buy bread", "Water plants", "Walk dog"], None);
    assert_eq!(h.list_titles(), vec!["Buy bread", "Water plants", "Walk dog"]);
    assert_eq!(h.state.selected_index, 1);
}

#[test]
fn remount_loads_default_filters_again() {
    let mut h = Harness::signed_in(&["Buy bread"]);
    h.send(Event::ToggleGrouping);
    h.send(Event::OpenCalendar {
        today: Harness::today(),
    });
    h.send(Event::Unmount);
    assert!(!h.host.modals.is_open());

    let issued = h.host.fetches.len();
    h.send(Event::ToggleGrouping);
    h.send(Event::Unmount);
    assert_eq!(h.host.fetches.len(), issued);

    h.send(Event::Mount {
        navigation: NavigationId(1),
    });
    h.send(Event::AuthResolved(AuthState::Success {
        role: "member".to_string(),
    }));
    assert_eq!(h.host.fetches.len(), issued + 1);
    let first = h.last_fetch();
    assert!(!first.key.params().grouped);
    assert_eq!(first.key.date(), Harness::today());

    h.answer(&first, &["Buy bread"], None);
    assert_eq!(h.list_titles(), vec!["Buy bread"]);
}
