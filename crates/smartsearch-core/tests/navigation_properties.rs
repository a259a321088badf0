//! Property tests for result-list navigation and state invariants

use proptest::prelude::*;
use smartsearch_core::{
    ListAction, NavKey, QueryState, ResultListController, SearchResult, StatePatch,
};

fn items(n: usize) -> Vec<SearchResult> {
    (0..n)
        .map(|i| SearchResult::new(i.to_string(), format!("result {i}")))
        .collect()
}

fn nav_key() -> impl Strategy<Value = NavKey> {
    prop_oneof![
        Just(NavKey::ArrowDown),
        Just(NavKey::ArrowUp),
        Just(NavKey::Enter),
        Just(NavKey::Escape),
    ]
}

/// Result count plus a cursor that is either unset or in range.
fn list_and_cursor() -> impl Strategy<Value = (usize, Option<usize>)> {
    (1usize..25).prop_flat_map(|len| (Just(len), proptest::option::of(0..len)))
}

proptest! {
    #[test]
    fn highlight_stays_in_range(len in 0usize..25, keys in prop::collection::vec(nav_key(), 0..40)) {
        let results = items(len);
        let mut highlighted = None;

        for key in keys {
            let action = ResultListController::new(&results, highlighted).on_key(key);
            match action {
                ListAction::Highlight(next) => highlighted = next,
                ListAction::Select(item) => prop_assert!(results.contains(&item)),
                ListAction::Ignored => {}
            }
            prop_assert!(highlighted.map_or(true, |i| i < len));
        }
    }

    #[test]
    fn down_then_up_returns_to_start((len, start) in list_and_cursor()) {
        prop_assume!(start.is_some());
        let results = items(len);

        let ListAction::Highlight(down) =
            ResultListController::new(&results, start).on_key(NavKey::ArrowDown)
        else {
            panic!("arrow down on a non-empty list must move the highlight");
        };
        let up = ResultListController::new(&results, down).on_key(NavKey::ArrowUp);

        prop_assert_eq!(up, ListAction::Highlight(start));
    }

    #[test]
    fn full_cycle_of_arrow_down_is_identity((len, start) in list_and_cursor()) {
        prop_assume!(start.is_some());
        let results = items(len);
        let mut highlighted = start;

        for _ in 0..len {
            if let ListAction::Highlight(next) =
                ResultListController::new(&results, highlighted).on_key(NavKey::ArrowDown)
            {
                highlighted = next;
            }
        }

        prop_assert_eq!(highlighted, start);
    }

    #[test]
    fn patched_state_keeps_highlight_valid(
        len in 0usize..10,
        cursor in proptest::option::of(0usize..20),
        replace in any::<bool>(),
        new_len in 0usize..10,
    ) {
        let mut state = QueryState::default();
        state.apply(StatePatch::default().text("query").results(items(len)).open(true));
        state.apply(StatePatch::default().highlight(cursor));
        if replace {
            state.apply(StatePatch::default().results(items(new_len)));
        }

        prop_assert!(state.highlighted.map_or(true, |i| i < state.results.len()));
        prop_assert_eq!(
            state.highlighted_index() == -1,
            state.highlighted_result().is_none()
        );
    }

    #[test]
    fn blank_text_is_never_open(text in "[ \t\n]{0,8}") {
        let mut state = QueryState::default();
        state.apply(StatePatch::settled(items(3)).text("acc").open(true));
        state.apply(StatePatch::default().text(text));

        prop_assert!(!state.is_open);
    }
}
