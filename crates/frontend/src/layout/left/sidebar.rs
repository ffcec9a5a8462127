//! Sidebar with the screens available to the current role

use leptos::prelude::*;

use crate::layout::global_context::use_global_context;
use crate::layout::pages::Page;
use crate::shared::icons::icon;
use crate::system::auth::use_role;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_global_context();
    let role = use_role();

    let items = move || Page::visible_for(role.get());

    view! {
        <nav class="sidebar" class:hidden=move || !ctx.left_open.get()>
            <ul class="sidebar__list">
                <For
                    each=items
                    key=|page| page.key()
                    children=move |page: Page| {
                        let is_active = move || ctx.active.get() == page;
                        view! {
                            <li>
                                <button
                                    class=move || {
                                        if is_active() { "sidebar__item sidebar__item--active" } else { "sidebar__item" }
                                    }
                                    on:click=move |_| ctx.open_page(page)
                                >
                                    <span class="sidebar__icon">{icon(page.icon())}</span>
                                    <span class="sidebar__label">{page.label()}</span>
                                </button>
                            </li>
                        }
                    }
                />
            </ul>
        </nav>
    }
}
