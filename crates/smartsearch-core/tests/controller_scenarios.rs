//! End-to-end behaviour of a mounted search controller
//!
//! Every test runs on a paused tokio clock, so the 300ms quiet period and
//! simulated lookup latency cost no wall time.

use async_trait::async_trait;
use parking_lot::Mutex;
use smartsearch_core::{
    Category, EscapeBehavior, EventBus, Lookup, LookupError, NavKey, NoopSelection, PointerTarget,
    QueryState, SearchConfig, SearchController, SearchError, SearchHandle, SearchResult, UiEvent,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Substring lookup over a fixed catalog with per-query latency and failures.
struct ScriptedLookup {
    catalog: Vec<SearchResult>,
    latency: Duration,
    latency_for: HashMap<String, Duration>,
    fail_for: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedLookup {
    fn new(catalog: Vec<SearchResult>) -> Self {
        Self {
            catalog,
            latency: Duration::from_millis(50),
            latency_for: HashMap::new(),
            fail_for: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_latency_for(mut self, query: &str, latency: Duration) -> Self {
        self.latency_for.insert(query.to_string(), latency);
        self
    }

    fn failing_for(mut self, query: &str) -> Self {
        self.fail_for = Some(query.to_string());
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Lookup for ScriptedLookup {
    async fn lookup(&self, query: &str) -> Result<Vec<SearchResult>, LookupError> {
        self.calls.lock().push(query.to_string());
        let latency = self.latency_for.get(query).copied().unwrap_or(self.latency);
        tokio::time::sleep(latency).await;

        if self.fail_for.as_deref() == Some(query) {
            return Err(LookupError::failed("backend unavailable"));
        }
        let needle = query.to_lowercase();
        Ok(self
            .catalog
            .iter()
            .filter(|r| r.label.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

fn banking_catalog() -> Vec<SearchResult> {
    vec![
        SearchResult::new("1", "HDFC Savings Account - 1234")
            .with_description("$85,000 balance • Active")
            .with_category(Category::Account),
        SearchResult::new("2", "ICICI Current Account - 5678")
            .with_description("$2,45,000 balance • Business")
            .with_category(Category::Account),
        SearchResult::new("6", "Priya Sharma")
            .with_description("Customer ID: CU001 • Gold Member")
            .with_category(Category::Customer),
        SearchResult::new("17", "Car Insurance Policy")
            .with_description("Policy #IN789 • Expires 2025-03-15")
            .with_category(Category::Insurance),
        SearchResult::new("90", "slow item"),
        SearchResult::new("91", "fast item"),
    ]
}

struct Fixture {
    controller: SearchController,
    handle: SearchHandle,
    bus: EventBus,
    lookup: Arc<ScriptedLookup>,
    selected: Arc<Mutex<Vec<SearchResult>>>,
}

fn mount_with(config: SearchConfig, lookup: ScriptedLookup) -> Fixture {
    mount_on(EventBus::default(), config, lookup)
}

fn mount_on(bus: EventBus, config: SearchConfig, lookup: ScriptedLookup) -> Fixture {
    let lookup = Arc::new(lookup);
    let selected = Arc::new(Mutex::new(Vec::new()));

    let sink = {
        let selected = selected.clone();
        move |result: &SearchResult| selected.lock().push(result.clone())
    };
    let controller =
        SearchController::mount(config, lookup.clone(), Arc::new(sink), &bus).unwrap();
    let handle = controller.handle();

    Fixture {
        controller,
        handle,
        bus,
        lookup,
        selected,
    }
}

fn mount() -> Fixture {
    mount_with(SearchConfig::default(), ScriptedLookup::new(banking_catalog()))
}

async fn wait_for(handle: &SearchHandle, predicate: impl FnMut(&QueryState) -> bool) -> QueryState {
    let mut rx = handle.subscribe();
    let state = tokio::time::timeout(Duration::from_secs(30), rx.wait_for(predicate))
        .await
        .expect("state never matched")
        .expect("controller stopped")
        .clone();
    state
}

/// Let the controller drain everything already sent to it.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

async fn open_with(fx: &Fixture, text: &str) -> QueryState {
    fx.handle.on_text_change(text);
    wait_for(&fx.handle, |s| s.is_open && !s.is_loading).await
}

#[tokio::test(start_paused = true)]
async fn only_the_latest_query_is_looked_up() {
    let fx = mount();

    fx.handle.on_text_change("a");
    tokio::time::advance(Duration::from_millis(100)).await;
    fx.handle.on_text_change("ac");
    tokio::time::advance(Duration::from_millis(100)).await;
    fx.handle.on_text_change("acc");

    let state = wait_for(&fx.handle, |s| s.is_open && !s.is_loading).await;

    assert_eq!(fx.lookup.calls(), vec!["acc".to_string()]);
    assert_eq!(state.text, "acc");
    assert_eq!(state.results.len(), 2);
    assert!(state
        .results
        .iter()
        .all(|r| r.label.to_lowercase().contains("acc")));
}

#[tokio::test(start_paused = true)]
async fn blanking_before_the_quiet_period_never_dispatches() {
    let fx = mount();

    fx.handle.on_text_change("acc");
    tokio::time::advance(Duration::from_millis(100)).await;
    fx.handle.on_text_change("   ");
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert!(fx.lookup.calls().is_empty());
    let state = fx.handle.state();
    assert_eq!(state.text, "   ");
    assert!(state.results.is_empty());
    assert!(!state.is_open);
    assert!(!state.is_loading);
}

#[tokio::test(start_paused = true)]
async fn loading_is_reported_while_the_lookup_runs() {
    let fx = mount();

    fx.handle.on_text_change("acc");
    let loading = wait_for(&fx.handle, |s| s.is_loading).await;
    assert!(!loading.shows_clear_button());

    let done = wait_for(&fx.handle, |s| !s.is_loading).await;
    assert!(done.is_open);
    assert!(done.shows_clear_button());
}

#[tokio::test(start_paused = true)]
async fn arrow_down_then_enter_selects_the_first_match() {
    let fx = mount();
    let opened = open_with(&fx, "acc").await;
    let hdfc = opened.results[0].clone();
    assert_eq!(hdfc.label, "HDFC Savings Account - 1234");

    fx.bus.publish(UiEvent::KeyDown(NavKey::ArrowDown));
    wait_for(&fx.handle, |s| s.highlighted == Some(0)).await;

    fx.bus.publish(UiEvent::KeyDown(NavKey::Enter));
    let state = wait_for(&fx.handle, |s| !s.is_open).await;

    assert_eq!(state.text, "HDFC Savings Account - 1234");
    assert_eq!(state.highlighted, None);
    assert_eq!(*fx.selected.lock(), vec![hdfc]);

    // Selecting does not start another lookup for the label
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(fx.lookup.calls(), vec!["acc".to_string()]);
    assert!(!fx.handle.state().is_open);
    assert_eq!(fx.selected.lock().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn arrow_up_wraps_to_the_last_match() {
    let fx = mount();
    let opened = open_with(&fx, "a").await;
    let last = opened.results.len() - 1;

    fx.bus.publish(UiEvent::KeyDown(NavKey::ArrowUp));
    wait_for(&fx.handle, |s| s.highlighted == Some(last)).await;

    fx.bus.publish(UiEvent::KeyDown(NavKey::ArrowDown));
    wait_for(&fx.handle, |s| s.highlighted == Some(0)).await;
}

#[tokio::test(start_paused = true)]
async fn zero_results_still_open_the_dropdown() {
    let fx = mount();
    let state = open_with(&fx, "zzz").await;

    assert!(state.results.is_empty());
    assert!(state.shows_empty_state());
}

#[tokio::test(start_paused = true)]
async fn navigation_on_an_empty_list_does_nothing() {
    let fx = mount();
    open_with(&fx, "zzz").await;

    for key in [NavKey::ArrowDown, NavKey::ArrowUp, NavKey::Enter] {
        fx.bus.publish(UiEvent::KeyDown(key));
    }
    settle().await;

    let state = fx.handle.state();
    assert_eq!(state.highlighted, None);
    assert!(state.is_open);
    assert!(fx.selected.lock().is_empty());
}

#[tokio::test(start_paused = true)]
async fn outside_pointer_down_closes_without_touching_query() {
    let fx = mount();
    let opened = open_with(&fx, "acc").await;

    // A click inside the widget keeps it open; ordering proves it was handled
    fx.bus.publish(UiEvent::PointerDown(PointerTarget::Widget));
    fx.bus.publish(UiEvent::KeyDown(NavKey::ArrowDown));
    let highlighted = wait_for(&fx.handle, |s| s.highlighted == Some(0)).await;
    assert!(highlighted.is_open);

    fx.bus.publish(UiEvent::PointerDown(PointerTarget::Outside));
    let closed = wait_for(&fx.handle, |s| !s.is_open).await;

    assert_eq!(closed.text, opened.text);
    assert_eq!(closed.results, opened.results);
    assert!(fx.selected.lock().is_empty());
}

#[tokio::test(start_paused = true)]
async fn keys_are_ignored_while_closed() {
    let fx = mount();
    open_with(&fx, "acc").await;
    fx.bus.publish(UiEvent::PointerDown(PointerTarget::Outside));
    wait_for(&fx.handle, |s| !s.is_open).await;

    fx.bus.publish(UiEvent::KeyDown(NavKey::ArrowDown));
    fx.bus.publish(UiEvent::KeyDown(NavKey::Enter));
    settle().await;

    assert_eq!(fx.handle.state().highlighted, None);
    assert!(fx.selected.lock().is_empty());
}

#[tokio::test(start_paused = true)]
async fn escape_closes_by_default() {
    let fx = mount();
    open_with(&fx, "acc").await;

    fx.bus.publish(UiEvent::KeyDown(NavKey::ArrowDown));
    wait_for(&fx.handle, |s| s.highlighted == Some(0)).await;
    fx.bus.publish(UiEvent::KeyDown(NavKey::Escape));

    let state = wait_for(&fx.handle, |s| !s.is_open).await;
    assert_eq!(state.highlighted, None);
    assert_eq!(state.text, "acc");
    assert!(fx.selected.lock().is_empty());
}

#[tokio::test(start_paused = true)]
async fn escape_only_unhighlights_when_configured() {
    let fx = mount_with(
        SearchConfig::default().with_escape(EscapeBehavior::Unhighlight),
        ScriptedLookup::new(banking_catalog()),
    );
    open_with(&fx, "acc").await;

    fx.bus.publish(UiEvent::KeyDown(NavKey::ArrowDown));
    wait_for(&fx.handle, |s| s.highlighted == Some(0)).await;
    fx.bus.publish(UiEvent::KeyDown(NavKey::Escape));

    let state = wait_for(&fx.handle, |s| s.highlighted.is_none()).await;
    assert!(state.is_open);
    assert_eq!(state.text, "acc");
}

#[tokio::test(start_paused = true)]
async fn hover_and_click_share_the_cursor() {
    let fx = mount();
    let opened = open_with(&fx, "acc").await;

    fx.handle.on_hover(1);
    wait_for(&fx.handle, |s| s.highlighted == Some(1)).await;

    // Keyboard continues from the hovered row
    fx.bus.publish(UiEvent::KeyDown(NavKey::ArrowDown));
    wait_for(&fx.handle, |s| s.highlighted == Some(0)).await;

    fx.handle.on_click(1);
    let state = wait_for(&fx.handle, |s| !s.is_open).await;
    assert_eq!(state.text, opened.results[1].label);
    assert_eq!(*fx.selected.lock(), vec![opened.results[1].clone()]);
}

#[tokio::test(start_paused = true)]
async fn out_of_range_pointer_input_is_ignored() {
    let fx = mount();
    open_with(&fx, "acc").await;

    fx.handle.on_hover(9);
    fx.handle.on_click(9);
    settle().await;

    let state = fx.handle.state();
    assert!(state.is_open);
    assert_eq!(state.highlighted, None);
    assert!(fx.selected.lock().is_empty());
}

#[tokio::test(start_paused = true)]
async fn clearing_twice_equals_clearing_once() {
    let fx = mount();
    open_with(&fx, "acc").await;

    fx.handle.on_clear();
    let once = wait_for(&fx.handle, |s| s.text.is_empty() && !s.is_open).await;
    fx.handle.on_clear();
    settle().await;
    let twice = fx.handle.state();

    assert_eq!(once, twice);
    assert_eq!(twice, QueryState::default());
    assert!(fx.selected.lock().is_empty());
}

#[tokio::test(start_paused = true)]
async fn clearing_cancels_a_pending_lookup() {
    let fx = mount();

    fx.handle.on_text_change("acc");
    tokio::time::advance(Duration::from_millis(100)).await;
    fx.handle.on_clear();
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert!(fx.lookup.calls().is_empty());
    assert_eq!(fx.handle.state(), QueryState::default());
}

#[tokio::test(start_paused = true)]
async fn failed_lookup_degrades_to_no_results() {
    let fx = mount_with(
        SearchConfig::default(),
        ScriptedLookup::new(banking_catalog()).failing_for("boom"),
    );
    open_with(&fx, "acc").await;

    fx.handle.on_text_change("boom");
    let state = wait_for(&fx.handle, |s| {
        s.text == "boom" && !s.is_open && !s.is_loading
    })
    .await;

    assert!(state.results.is_empty());
    assert_eq!(fx.lookup.calls(), vec!["acc".to_string(), "boom".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn slow_superseded_lookup_never_overwrites_newer_results() {
    let fx = mount_with(
        SearchConfig::default(),
        ScriptedLookup::new(banking_catalog())
            .with_latency_for("slow", Duration::from_secs(1))
            .with_latency_for("fast", Duration::from_millis(10)),
    );

    fx.handle.on_text_change("slow");
    wait_for(&fx.handle, |s| s.is_loading).await;
    fx.handle.on_text_change("fast");

    let state = wait_for(&fx.handle, |s| s.is_open && !s.is_loading).await;
    assert_eq!(state.results.len(), 1);
    assert_eq!(state.results[0].label, "fast item");

    tokio::time::sleep(Duration::from_secs(3)).await;
    let later = fx.handle.state();
    assert_eq!(later.results, state.results);
    assert!(!later.is_loading);
    assert_eq!(fx.lookup.calls().last().map(String::as_str), Some("fast"));
}

#[tokio::test(start_paused = true)]
async fn typing_over_an_in_flight_lookup_stops_loading() {
    let fx = mount_with(
        SearchConfig::default(),
        ScriptedLookup::new(banking_catalog()).with_latency_for("slow", Duration::from_secs(5)),
    );

    fx.handle.on_text_change("slow");
    wait_for(&fx.handle, |s| s.is_loading).await;
    fx.handle.on_text_change("fast");

    // Still inside the quiet period for "fast"; nothing is being looked up
    tokio::time::sleep(Duration::from_millis(100)).await;
    let quiet = fx.handle.state();
    assert_eq!(quiet.text, "fast");
    assert!(!quiet.is_loading);

    let state = wait_for(&fx.handle, |s| s.is_open && !s.is_loading).await;
    assert_eq!(state.results.len(), 1);
    assert_eq!(state.results[0].label, "fast item");
}

#[tokio::test(start_paused = true)]
async fn lagged_bus_keeps_delivering_newer_events() {
    let fx = mount_on(
        EventBus::new(1),
        SearchConfig::default(),
        ScriptedLookup::new(banking_catalog()),
    );
    open_with(&fx, "acc").await;

    // A burst larger than the bus overflows the controller's subscription
    for _ in 0..3 {
        fx.bus.publish(UiEvent::KeyDown(NavKey::ArrowDown));
    }
    wait_for(&fx.handle, |s| s.highlighted == Some(0)).await;

    fx.bus.publish(UiEvent::KeyDown(NavKey::ArrowDown));
    wait_for(&fx.handle, |s| s.highlighted == Some(1)).await;
    fx.bus.publish(UiEvent::KeyDown(NavKey::Enter));

    let state = wait_for(&fx.handle, |s| !s.is_open).await;
    assert_eq!(state.text, "ICICI Current Account - 5678");
    assert_eq!(fx.selected.lock().len(), 1);
    assert!(fx.handle.is_mounted());
}

#[tokio::test(start_paused = true)]
async fn closed_bus_leaves_the_controller_running() {
    let fx = mount();
    let Fixture {
        controller,
        handle,
        bus,
        selected,
        ..
    } = fx;
    drop(bus);
    settle().await;
    assert!(handle.is_mounted());

    handle.on_text_change("acc");
    let opened = wait_for(&handle, |s| s.is_open && !s.is_loading).await;
    assert_eq!(opened.results.len(), 2);

    handle.on_click(0);
    let state = wait_for(&handle, |s| !s.is_open).await;
    assert_eq!(state.text, "HDFC Savings Account - 1234");
    assert_eq!(selected.lock().len(), 1);
    assert!(handle.is_mounted());

    controller.unmount().await;
    assert!(!handle.is_mounted());
}

#[tokio::test(start_paused = true)]
async fn selecting_a_blank_label_closes_and_typing_reopens() {
    let fx = mount();
    open_with(&fx, "acc").await;

    fx.handle.on_select(SearchResult::new("x", "   "));
    let closed = wait_for(&fx.handle, |s| !s.is_open).await;
    assert_eq!(closed.text, "   ");
    assert!(!closed.is_loading);

    // Keys stay ignored while closed
    fx.bus.publish(UiEvent::KeyDown(NavKey::ArrowDown));
    settle().await;
    assert_eq!(fx.handle.state().highlighted, None);

    let reopened = open_with(&fx, "acc").await;
    assert_eq!(reopened.results.len(), 2);
    assert!(fx.handle.is_mounted());
}

#[tokio::test]
async fn mount_rejects_an_invalid_config() {
    let bus = EventBus::default();
    let result = SearchController::mount(
        SearchConfig::default().with_debounce_ms(0),
        Arc::new(ScriptedLookup::new(banking_catalog())),
        Arc::new(NoopSelection),
        &bus,
    );

    assert!(matches!(result, Err(SearchError::Config(_))));
    assert_eq!(bus.subscriber_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn unmount_cancels_the_pending_timer() {
    let fx = mount();

    fx.handle.on_text_change("acc");
    let handle = fx.handle.clone();
    fx.controller.unmount().await;
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert!(fx.lookup.calls().is_empty());
    assert!(!handle.is_mounted());

    // Late calls are dropped instead of mutating a disposed controller
    handle.on_text_change("again");
    handle.on_clear();
    assert!(!handle.state().is_open);
    assert_eq!(fx.bus.subscriber_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn unmount_discards_an_in_flight_lookup() {
    let fx = mount_with(
        SearchConfig::default(),
        ScriptedLookup::new(banking_catalog()).with_latency_for("acc", Duration::from_millis(500)),
    );

    fx.handle.on_text_change("acc");
    wait_for(&fx.handle, |s| s.is_loading).await;
    let handle = fx.handle.clone();
    fx.controller.unmount().await;
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert!(fx.lookup.calls().len() <= 1);
    assert!(handle.state().results.is_empty());
    assert!(!handle.state().is_open);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_controller_unmounts_it() {
    let fx = mount();
    let handle = fx.handle.clone();
    drop(fx.controller);

    for _ in 0..10 {
        if !handle.is_mounted() {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert!(!handle.is_mounted());
}
