use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use crate::shared::config::init_config;
use crate::shared::notifications::{NotificationService, ToastHost};
use crate::system::auth::SessionProvider;

#[component]
pub fn App() -> impl IntoView {
    let config = init_config().clone();

    provide_context(NotificationService::new(config.notifications.timeout_ms));
    provide_context(AppGlobalContext::new());
    provide_context(config);

    view! {
        <SessionProvider>
            <Shell />
            <ToastHost />
        </SessionProvider>
    }
}
