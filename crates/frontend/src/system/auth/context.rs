use contracts::system::auth::{SessionInfo, StaffRole};
use leptos::prelude::*;

use super::storage;

/// Provides the browser session to the component tree.
///
/// The session is written by the login application; this shell only reads it.
#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let session = storage::load_session();
    match session.role {
        Some(role) => log::info!("session role: {}", role.code()),
        None => log::warn!("no staff role in session, showing common screens only"),
    }

    let (session, _) = signal(session);
    provide_context(session);

    children()
}

/// Hook to access the session
pub fn use_session() -> ReadSignal<SessionInfo> {
    use_context::<ReadSignal<SessionInfo>>().expect("SessionProvider not found in component tree")
}

pub fn use_role() -> Signal<Option<StaffRole>> {
    let session = use_session();
    Signal::derive(move || session.with(|s| s.role))
}
