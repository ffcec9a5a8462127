//! Column header cells with sort indicators
//!
//! ```ignore
//! <SortableHeaderCell
//!     label="Amount"
//!     sort_field="total_amount"
//!     sort=Signal::derive(move || table.with(|t| t.sort_state().clone()))
//!     on_sort=Callback::new(move |field: String| table.update(|t| t.set_sort(&field)))
//! />
//! ```

use crate::shared::components::table::column::Align;
use crate::shared::components::table::engine::SortState;
use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use leptos::prelude::*;

#[component]
pub fn SortableHeaderCell(
    #[prop(into)] label: String,

    /// Column key to sort by
    #[prop(into)]
    sort_field: String,

    /// Current sort state of the table
    #[prop(into)]
    sort: Signal<SortState>,

    on_sort: Callback<String>,

    #[prop(optional)] align: Align,
) -> impl IntoView {
    let field_for_click = sort_field.clone();
    let field_for_class = sort_field.clone();
    let class = match align {
        Align::Left => "table__header-cell table__header-cell--sortable",
        Align::Right => "table__header-cell table__header-cell--sortable table__header-cell--right",
    };

    view! {
        <th class=class on:click=move |_| on_sort.run(field_for_click.clone())>
            {label}
            <span class=move || sort.with(|s| get_sort_class(s, &field_for_class))>
                {move || sort.with(|s| get_sort_indicator(s, &sort_field))}
            </span>
        </th>
    }
}

/// Header cell of a column that cannot be sorted
#[component]
pub fn PlainHeaderCell(#[prop(into)] label: String, #[prop(optional)] align: Align) -> impl IntoView {
    let class = match align {
        Align::Left => "table__header-cell",
        Align::Right => "table__header-cell table__header-cell--right",
    };
    view! { <th class=class>{label}</th> }
}
