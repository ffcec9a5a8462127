//! Toast notifications.
//!
//! `NotificationService` is provided as a context by `App`; `ToastHost`
//! renders the queue in the corner of the screen.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use thaw::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NotificationLevel {
    fn intent(&self) -> MessageBarIntent {
        match self {
            NotificationLevel::Success => MessageBarIntent::Success,
            NotificationLevel::Info => MessageBarIntent::Info,
            NotificationLevel::Warning => MessageBarIntent::Warning,
            NotificationLevel::Error => MessageBarIntent::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct NotificationService {
    items: RwSignal<Vec<Notification>>,
    next_id: StoredValue<u64>,
    timeout_ms: u32,
}

impl NotificationService {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
            timeout_ms,
        }
    }

    pub fn items(&self) -> ReadSignal<Vec<Notification>> {
        self.items.read_only()
    }

    pub fn notify(&self, level: NotificationLevel, message: impl Into<String>) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.items.update(|items| {
            items.push(Notification {
                id,
                level,
                message: message.into(),
            })
        });

        if self.timeout_ms > 0 {
            let this = *self;
            Timeout::new(self.timeout_ms, move || this.dismiss(id)).forget();
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(NotificationLevel::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.notify(NotificationLevel::Warning, message);
    }

    pub fn dismiss(&self, id: u64) {
        // the component may already be gone when a timer fires
        let _ = self.items.try_update(|items| items.retain(|n| n.id != id));
    }
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>().expect("NotificationService not found in context")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let service = use_notifications();

    view! {
        <div class="toast-host">
            <For
                each=move || service.items().get()
                key=|n| n.id
                children=move |n: Notification| {
                    let id = n.id;
                    view! {
                        <div class="toast">
                            <MessageBar intent=n.level.intent()>
                                <span class="toast__message">{n.message}</span>
                                <button class="toast__close" on:click=move |_| service.dismiss(id) title="Close">
                                    {crate::shared::icons::icon("x")}
                                </button>
                            </MessageBar>
                        </div>
                    }
                }
            />
        </div>
    }
}
