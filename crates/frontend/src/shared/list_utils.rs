//! List helpers: filter threshold, sort indicators, search box
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::shared::components::table::engine::{SortDirection, SortState};

/// Shorter queries do not filter anything
pub const FILTER_MIN_CHARS: usize = 3;

const SEARCH_DEBOUNCE_MS: u32 = 300;

pub fn is_filter_active(filter: &str) -> bool {
    filter.trim().chars().count() >= FILTER_MIN_CHARS
}

/// Sort indicator for a header
pub fn get_sort_indicator(sort: &SortState, field: &str) -> &'static str {
    if sort.is_sorted_by(field) {
        match sort.direction {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        }
    } else {
        " ⇅"
    }
}

pub fn get_sort_class(sort: &SortState, field: &str) -> &'static str {
    if sort.is_sorted_by(field) {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

/// Search box with debounce and a clear button
#[component]
pub fn SearchInput(
    /// Receives the debounced filter value
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        format!("Search (min. {} chars)...", FILTER_MIN_CHARS)
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(String::new());
    let pending = StoredValue::new_local(None::<Timeout>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        // dropping the previous Timeout cancels it
        let timeout = Timeout::new(SEARCH_DEBOUNCE_MS, move || on_change.run(new_value));
        pending.set_value(Some(timeout));
    };

    let clear_filter = move |_| {
        pending.set_value(None);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                class="search-input__field"
                class:search-input__field--active=move || is_filter_active(&input_value.get())
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Clear">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_activation_threshold() {
        assert!(!is_filter_active(""));
        assert!(!is_filter_active("  ab  "));
        assert!(is_filter_active("abc"));
        // counted in characters, not bytes
        assert!(!is_filter_active("مك"));
        assert!(is_filter_active("مكة"));
    }

    #[test]
    fn test_sort_indicator() {
        let mut sort = SortState::default();
        assert_eq!(get_sort_indicator(&sort, "id"), " ⇅");
        sort.toggle("id");
        assert_eq!(get_sort_indicator(&sort, "id"), " ▲");
        sort.toggle("id");
        assert_eq!(get_sort_indicator(&sort, "id"), " ▼");
        assert_eq!(get_sort_indicator(&sort, "name"), " ⇅");
    }
}
