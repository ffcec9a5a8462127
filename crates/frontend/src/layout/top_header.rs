//! Top bar: sidebar toggle, application title and the signed-in staff member.

use leptos::prelude::*;

use crate::layout::global_context::use_global_context;
use crate::shared::icons::icon;
use crate::system::auth::use_session;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_global_context();
    let session = use_session();

    let is_sidebar_visible = move || ctx.left_open.get();

    let user_label = move || {
        session.with(|s| {
            let name = s.display_name.clone().unwrap_or_else(|| "Guest".to_string());
            match s.role {
                Some(role) => format!("{} ({})", name, role.display_name()),
                None => name,
            }
        })
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"Pilgrimage CRM"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("guides")}
                    <span>{user_label}</span>
                </div>
            </div>
        </div>
    }
}
