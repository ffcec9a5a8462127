//! Generic list table on top of [`TableView`].
//!
//! ```ignore
//! <DataTable
//!     rows=Signal::derive(move || items.get())
//!     columns=vec![
//!         ColumnDescriptor::new("name", "Name"),
//!         ColumnDescriptor::new("is_active", "Active").not_sortable(),
//!     ]
//!     searchable=true
//! />
//! ```

use leptos::prelude::*;
use thaw::*;

use super::column::{Align, ColumnDescriptor, ColumnSet, TableRow};
use super::engine::TableView;
use super::sortable_header_cell::{PlainHeaderCell, SortableHeaderCell};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::AppConfig;
use crate::shared::list_utils::SearchInput;

#[component]
pub fn DataTable<R>(
    /// Rows to show; the table keeps its own sorted/paged copy
    #[prop(into)]
    rows: Signal<Vec<R>>,

    columns: Vec<ColumnDescriptor<R>>,

    /// Rows per page, the configured default when omitted
    #[prop(optional)]
    page_size: Option<usize>,

    #[prop(optional, into)] empty_text: Option<String>,

    /// Show the search box above the table
    #[prop(optional)]
    searchable: bool,

    #[prop(optional, into)] loading: Signal<bool>,
) -> impl IntoView
where
    R: TableRow + Clone + Send + Sync + 'static,
{
    let column_set = match ColumnSet::new(columns) {
        Ok(set) => set,
        Err(e) => {
            log::error!("DataTable misconfigured: {}", e);
            return view! {
                <div class="table table--error">
                    <MessageBar intent=MessageBarIntent::Error>
                        <span>{format!("Unable to display table: {}", e)}</span>
                    </MessageBar>
                </div>
            }
            .into_any();
        }
    };

    let page_size = page_size.unwrap_or_else(|| {
        use_context::<AppConfig>()
            .map(|c| c.table.default_page_size)
            .unwrap_or(super::engine::DEFAULT_PAGE_SIZE)
    });
    let empty_text = empty_text.unwrap_or_else(|| "No records found".to_string());

    let table = RwSignal::new(TableView::new(rows.get_untracked(), column_set, page_size));
    Effect::new(move |_| {
        let data = rows.get();
        table.update(|t| t.set_rows(data));
    });

    let headers: Vec<(String, String, bool, Align)> = table.with_untracked(|t| {
        t.columns()
            .iter()
            .map(|c| (c.key.clone(), c.title.clone(), c.sortable, c.align))
            .collect()
    });
    let column_count = headers.len();

    let sort = Signal::derive(move || table.with(|t| t.sort_state().clone()));
    let on_sort = Callback::new(move |field: String| table.update(|t| t.set_sort(&field)));
    let on_filter = Callback::new(move |q: String| table.update(|t| t.set_filter(q)));
    let on_page_change = Callback::new(move |page: usize| table.update(|t| t.set_page(page)));
    let on_page_size_change =
        Callback::new(move |size: usize| table.update(|t| t.set_page_size(size)));

    let body = move || {
        let cells: Vec<Vec<(String, Align)>> = table.with(|t| {
            t.visible_rows()
                .into_iter()
                .map(|row| t.columns().iter().map(|c| (c.display(row), c.align)).collect())
                .collect()
        });

        if cells.is_empty() {
            let text = if loading.get() {
                "Loading...".to_string()
            } else {
                empty_text.clone()
            };
            return view! {
                <tr class="table__row">
                    <td class="table__cell table__cell--empty" colspan=column_count.to_string()>
                        {text}
                    </td>
                </tr>
            }
            .into_any();
        }

        cells
            .into_iter()
            .map(|row| {
                view! {
                    <tr class="table__row">
                        {row
                            .into_iter()
                            .map(|(text, align)| view! { <td class=align.css_class()>{text}</td> })
                            .collect_view()}
                    </tr>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="table">
            {searchable.then(|| view! {
                <div class="table__toolbar">
                    <SearchInput on_change=on_filter />
                </div>
            })}
            <table class="table__data table--striped">
                <thead class="table__head">
                    <tr>
                        {headers
                            .into_iter()
                            .map(|(key, title, sortable, align)| {
                                if sortable {
                                    view! {
                                        <SortableHeaderCell
                                            label=title
                                            sort_field=key
                                            sort=sort
                                            on_sort=on_sort
                                            align=align
                                        />
                                    }
                                    .into_any()
                                } else {
                                    view! { <PlainHeaderCell label=title align=align /> }.into_any()
                                }
                            })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody>{body}</tbody>
            </table>
            <PaginationControls
                current_page=Signal::derive(move || table.with(|t| t.current_page()))
                total_pages=Signal::derive(move || table.with(|t| t.total_pages()))
                total_count=Signal::derive(move || table.with(|t| t.row_count()))
                page_size=Signal::derive(move || table.with(|t| t.page_size()))
                on_page_change=on_page_change
                on_page_size_change=on_page_size_change
            />
        </div>
    }
    .into_any()
}
