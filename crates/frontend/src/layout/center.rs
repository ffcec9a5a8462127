use leptos::prelude::*;

use crate::layout::global_context::use_global_context;
use crate::shared::icons::icon;
use crate::system::auth::use_role;

/// Content area: the active page, or a notice when the role may not see it
#[component]
pub fn Center() -> impl IntoView {
    let ctx = use_global_context();
    let role = use_role();

    view! {
        <main data-zone="center" class="app-main">
            {move || {
                let page = ctx.active.get();
                if page.allowed_for(role.get()) {
                    page.render()
                } else {
                    log::warn!("page {} is not available for the current role", page.key());
                    view! {
                        <div class="page page--denied">
                            {icon("lock")}
                            <p>{format!("{} is not available for your role.", page.label())}</p>
                        </div>
                    }
                    .into_any()
                }
            }}
        </main>
    }
}
