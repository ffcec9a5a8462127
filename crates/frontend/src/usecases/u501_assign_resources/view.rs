use contracts::domain::a001_booking::aggregate::{Booking, BookingStatus};
use leptos::prelude::*;
use thaw::*;

use super::api::{load_assignment_data, HttpAssignmentApi};
use super::model::{slot_state, AssignmentDraft, AssignmentState, ResourceType, SlotState};
use super::store::{AssignmentAction, AssignmentStore, ConfirmRejected};
use super::workflow::{
    cancel_booking_drafts, confirm_booking, remove_draft, stage_assignment, StoreHandle,
};
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::ui::{Badge as StateBadge, BadgeVariant};
use crate::shared::date_utils::format_optional_date;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;

fn state_variant(state: AssignmentState) -> BadgeVariant {
    match state {
        AssignmentState::Unassigned => BadgeVariant::Neutral,
        AssignmentState::Draft => BadgeVariant::Warning,
        AssignmentState::PartiallyAssigned => BadgeVariant::Primary,
        AssignmentState::FullyAssigned => BadgeVariant::Success,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum SlotView {
    /// Resource saved on the booking, shown by name
    Fixed(String),
    /// Selector over the active resources as `(id, name)`; `selected` holds
    /// the staged resource id
    Open {
        selected: Option<String>,
        options: Vec<(String, String)>,
    },
}

#[derive(Clone, Debug, PartialEq)]
struct BookingCard {
    id: String,
    customer: String,
    package: String,
    travel_date: String,
    pilgrims: String,
    state: AssignmentState,
    completed: bool,
    in_flight: bool,
    has_drafts: bool,
    guide: SlotView,
    transport: SlotView,
}

fn slot_view(store: &AssignmentStore, booking: &Booking, resource_type: ResourceType) -> SlotView {
    let selected = match slot_state(booking, store.drafts(), resource_type) {
        SlotState::Persisted(id) => {
            let name = store
                .persisted_name(booking, resource_type)
                .unwrap_or_else(|| id.to_string());
            return SlotView::Fixed(name);
        }
        SlotState::Draft(draft) => Some(draft.resource_id.clone()),
        SlotState::Empty => None,
    };
    SlotView::Open {
        selected,
        options: store.active_resources(resource_type),
    }
}

fn booking_cards(store: &AssignmentStore) -> Vec<BookingCard> {
    store
        .assignable_bookings()
        .into_iter()
        .map(|b| BookingCard {
            id: b.id.clone(),
            customer: b.customer_label(),
            package: b.package_label(),
            travel_date: format_optional_date(b.travel_date.as_deref()),
            pilgrims: b.pilgrims.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
            state: store
                .assignment_state(&b.id)
                .unwrap_or(AssignmentState::Unassigned),
            completed: b.status == BookingStatus::Completed,
            in_flight: store.is_in_flight(&b.id),
            has_drafts: !store.drafts_for(&b.id).is_empty(),
            guide: slot_view(store, b, ResourceType::Guide),
            transport: slot_view(store, b, ResourceType::Transport),
        })
        .collect()
}

/// One guide/transport cell of a booking row
#[component]
fn SlotCell(
    store: RwSignal<AssignmentStore>,
    booking_id: String,
    resource_type: ResourceType,
    slot: SlotView,
    disabled: bool,
) -> impl IntoView {
    match slot {
        SlotView::Fixed(name) => view! {
            <span class="assign__resource assign__resource--fixed">{name}</span>
        }
        .into_any(),
        SlotView::Open { selected, options } => {
            let placeholder = format!("Select {}...", resource_type.label());
            view! {
                <select
                    class="form__select"
                    disabled=disabled
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        if !value.is_empty() {
                            stage_assignment(&store, &booking_id, resource_type, &value);
                        }
                    }
                >
                    <option value="" selected=selected.is_none()>{placeholder}</option>
                    {options
                        .into_iter()
                        .map(|(id, name)| {
                            let is_selected = selected.as_deref() == Some(id.as_str());
                            view! { <option value=id selected=is_selected>{name}</option> }
                        })
                        .collect_view()}
                </select>
            }
            .into_any()
        }
    }
}

/// Staging and confirmation of guides and vehicles for confirmed bookings
#[component]
#[allow(non_snake_case)]
pub fn AssignResourcesPage() -> impl IntoView {
    let notifications = use_notifications();
    let store = RwSignal::new(AssignmentStore::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let load = move || {
        set_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match load_assignment_data().await {
                Ok(data) => {
                    store.dispatch(AssignmentAction::BookingsLoaded(data.bookings));
                    store.dispatch(AssignmentAction::ResourcesLoaded {
                        guides: data.guides,
                        transports: data.transports,
                    });
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("failed to load assignment data: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    let confirm = move |booking_id: String| {
        wasm_bindgen_futures::spawn_local(async move {
            match confirm_booking(&store, &HttpAssignmentApi, &booking_id).await {
                Ok(report) => {
                    for (level, message) in report.notifications() {
                        notifications.notify(level, message);
                    }
                }
                Err(ConfirmRejected::Detached) => {
                    log::debug!("assignment page closed during confirmation of {}", booking_id)
                }
                Err(reason) => notifications.warning(reason.to_string()),
            }
        });
    };

    let cancel = move |booking_id: String| {
        if cancel_booking_drafts(&store, &booking_id) {
            notifications.info("Pending assignments discarded");
        }
    };

    load();

    let cards = Memo::new(move |_| store.with(booking_cards));
    let pending = Signal::derive(move || store.with(|s| s.drafts().to_vec()));

    view! {
        <div class="page">
            <PageHeader
                title="Resource assignment"
                subtitle="Attach a guide and a vehicle to confirmed bookings"
                icon_name="assignments"
            >
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| load()
                    disabled=Signal::derive(move || loading.get())
                >
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </PageHeader>

            {move || error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>
                    <span>{format!("Failed to load data: {}", e)}</span>
                </MessageBar>
            })}

            <Show when=move || loading.get()>
                <div class="page__loading"><Spinner /></div>
            </Show>

            <table class="table__data assign__table">
                <thead class="table__head">
                    <tr>
                        <th>"Customer"</th>
                        <th>"Package"</th>
                        <th>"Travel date"</th>
                        <th class="table__cell--right">"Pilgrims"</th>
                        <th>"State"</th>
                        <th>"Guide"</th>
                        <th>"Transport"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || cards.get()
                        key=|card| {
                            (
                                card.id.clone(),
                                card.state,
                                card.completed,
                                card.in_flight,
                                card.guide.clone(),
                                card.transport.clone(),
                            )
                        }
                        children=move |card: BookingCard| {
                            let locked = card.completed || card.in_flight;
                            let confirm_id = card.id.clone();
                            let cancel_id = card.id.clone();
                            let can_confirm = card.has_drafts && !card.in_flight;
                            let can_cancel = card.has_drafts && !card.in_flight;
                            view! {
                                <tr class="table__row">
                                    <td>{card.customer}</td>
                                    <td>{card.package}</td>
                                    <td>{card.travel_date}</td>
                                    <td class="table__cell--right">{card.pilgrims}</td>
                                    <td>
                                        <StateBadge variant=state_variant(card.state)>
                                            {card.state.display_name()}
                                        </StateBadge>
                                    </td>
                                    <td>
                                        <SlotCell
                                            store=store
                                            booking_id=card.id.clone()
                                            resource_type=ResourceType::Guide
                                            slot=card.guide
                                            disabled=locked
                                        />
                                    </td>
                                    <td>
                                        <SlotCell
                                            store=store
                                            booking_id=card.id.clone()
                                            resource_type=ResourceType::Transport
                                            slot=card.transport
                                            disabled=locked
                                        />
                                    </td>
                                    <td class="assign__actions">
                                        {(!card.state.is_terminal()).then(|| view! {
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Primary
                                                on_click=move |_| confirm(confirm_id.clone())
                                                disabled=!can_confirm
                                            >
                                                {icon("check")}
                                                " Confirm"
                                            </Button>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| cancel(cancel_id.clone())
                                                disabled=!can_cancel
                                            >
                                                {icon("x")}
                                                " Cancel"
                                            </Button>
                                        })}
                                        {card.in_flight.then(|| view! { <Spinner /> })}
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <div class="assign__drafts">
                <h2 class="assign__drafts-title">
                    {move || format!("Pending assignments ({})", pending.get().len())}
                </h2>
                <Show
                    when=move || !pending.get().is_empty()
                    fallback=|| view! { <div class="assign__drafts-empty">"Nothing staged"</div> }
                >
                    <ul class="assign__drafts-list">
                        <For
                            each=move || pending.get()
                            key=|d| (d.id.clone(), d.resource_id.clone())
                            children=move |draft: AssignmentDraft| {
                                let draft_id = draft.id.clone();
                                let booking_id = draft.booking_id.clone();
                                let frozen = Signal::derive(move || {
                                    store.with(|s| s.is_in_flight(&booking_id))
                                });
                                let detail = draft
                                    .resource_snapshot
                                    .detail
                                    .clone()
                                    .map(|d| format!(" ({})", d))
                                    .unwrap_or_default();
                                view! {
                                    <li class="assign__draft">
                                        <span class="assign__draft-booking">
                                            {draft.booking_snapshot.customer.clone()}
                                            " / "
                                            {draft.booking_snapshot.package.clone()}
                                        </span>
                                        <span class="assign__draft-resource">
                                            {format!(
                                                "{}: {}{}",
                                                draft.resource_type.label(),
                                                draft.resource_snapshot.name,
                                                detail
                                            )}
                                        </span>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| {
                                                remove_draft(&store, &draft_id);
                                            }
                                            disabled=frozen
                                        >
                                            {icon("trash")}
                                        </Button>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </div>
        </div>
    }
}
