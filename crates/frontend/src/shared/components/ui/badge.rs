use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeVariant {
    Primary,
    Success,
    Warning,
    Error,
    #[default]
    Neutral,
}

impl BadgeVariant {
    fn css_class(&self) -> &'static str {
        match self {
            BadgeVariant::Primary => "badge--primary",
            BadgeVariant::Success => "badge--success",
            BadgeVariant::Warning => "badge--warning",
            BadgeVariant::Error => "badge--error",
            BadgeVariant::Neutral => "badge--neutral",
        }
    }
}

/// Small coloured label (statuses, assignment states)
#[component]
pub fn Badge(
    #[prop(optional, into)] variant: Signal<BadgeVariant>,
    children: Children,
) -> impl IntoView {
    view! {
        <span class=move || format!("badge {}", variant.get().css_class())>
            {children()}
        </span>
    }
}
