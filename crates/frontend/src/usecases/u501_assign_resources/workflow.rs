//! Staging and confirmation of guide/transport assignments.
//!
//! Confirmation fans out one remote call per draft, waits for all of them,
//! applies what succeeded and then runs the completion cascade
//! (booking -> `completed`, invoice -> `sent`) one step at a time.

use std::cell::RefCell;

use contracts::domain::a001_booking::aggregate::BookingStatus;
use contracts::domain::a004_invoice::aggregate::InvoiceStatus;
use futures::future::join_all;
use leptos::prelude::*;

use super::api::AssignmentApi;
use super::model::{AssignmentDraft, ResourceType};
use super::store::{ActionOutcome, AssignmentAction, AssignmentStore, ConfirmRejected};
use crate::shared::api_utils::ApiError;
use crate::shared::notifications::NotificationLevel;

/// Access to the store that survives across awaits.
///
/// Both methods return `None` when the store has been disposed (the page
/// was left while a request was running).
pub trait StoreHandle {
    fn dispatch(&self, action: AssignmentAction) -> Option<ActionOutcome>;

    fn inspect<T>(&self, f: impl FnOnce(&AssignmentStore) -> T) -> Option<T>;
}

impl StoreHandle for RefCell<AssignmentStore> {
    fn dispatch(&self, action: AssignmentAction) -> Option<ActionOutcome> {
        Some(self.borrow_mut().dispatch(action))
    }

    fn inspect<T>(&self, f: impl FnOnce(&AssignmentStore) -> T) -> Option<T> {
        Some(f(&self.borrow()))
    }
}

impl StoreHandle for RwSignal<AssignmentStore> {
    fn dispatch(&self, action: AssignmentAction) -> Option<ActionOutcome> {
        self.try_update(|store| store.dispatch(action))
    }

    fn inspect<T>(&self, f: impl FnOnce(&AssignmentStore) -> T) -> Option<T> {
        self.try_with_untracked(f)
    }
}

// ----------------------------------------------------------------------------
// Local operations
// ----------------------------------------------------------------------------

/// Returns `true` when a draft was created or replaced
pub fn stage_assignment(
    store: &impl StoreHandle,
    booking_id: &str,
    resource_type: ResourceType,
    resource_id: &str,
) -> bool {
    let outcome = store.dispatch(AssignmentAction::Stage {
        booking_id: booking_id.to_string(),
        resource_type,
        resource_id: resource_id.to_string(),
    });
    matches!(outcome, Some(ActionOutcome::Applied))
}

pub fn remove_draft(store: &impl StoreHandle, draft_id: &str) -> bool {
    let outcome = store.dispatch(AssignmentAction::RemoveDraft {
        draft_id: draft_id.to_string(),
    });
    matches!(outcome, Some(ActionOutcome::Applied))
}

pub fn cancel_booking_drafts(store: &impl StoreHandle, booking_id: &str) -> bool {
    let outcome = store.dispatch(AssignmentAction::CancelBooking {
        booking_id: booking_id.to_string(),
    });
    matches!(outcome, Some(ActionOutcome::Applied))
}

// ----------------------------------------------------------------------------
// Reports
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum InvoiceStep {
    MarkedSent { invoice_id: String },
    AlreadySent { invoice_id: String },
    NotFound,
    LookupFailed(ApiError),
    UpdateFailed { invoice_id: String, error: ApiError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CascadeReport {
    pub status: Result<(), ApiError>,
    pub invoice: InvoiceStep,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmReport {
    pub booking_id: String,
    pub succeeded: Vec<AssignmentDraft>,
    pub failed: Vec<(AssignmentDraft, ApiError)>,
    /// Present when the booking became fully assigned
    pub cascade: Option<CascadeReport>,
}

impl ConfirmReport {
    /// Messages for the operator, in the order the steps happened
    pub fn notifications(&self) -> Vec<(NotificationLevel, String)> {
        let mut out = Vec::new();

        if !self.succeeded.is_empty() {
            let names: Vec<String> = self
                .succeeded
                .iter()
                .map(|d| format!("{} {}", d.resource_type.label(), d.resource_snapshot.name))
                .collect();
            out.push((
                NotificationLevel::Success,
                format!(
                    "{} assignment(s) confirmed: {}",
                    self.succeeded.len(),
                    names.join(", ")
                ),
            ));
        }

        if !self.failed.is_empty() {
            let reasons: Vec<String> = self
                .failed
                .iter()
                .map(|(d, e)| format!("{}: {}", d.resource_type.label(), e))
                .collect();
            out.push((
                NotificationLevel::Error,
                format!(
                    "{} assignment(s) failed ({})",
                    self.failed.len(),
                    reasons.join("; ")
                ),
            ));
        }

        if let Some(cascade) = &self.cascade {
            match &cascade.status {
                Ok(()) => out.push((
                    NotificationLevel::Success,
                    "Booking marked as completed".to_string(),
                )),
                Err(e) => out.push((
                    NotificationLevel::Error,
                    format!("Failed to mark booking as completed: {}", e),
                )),
            }

            match &cascade.invoice {
                InvoiceStep::MarkedSent { .. } => out.push((
                    NotificationLevel::Success,
                    "Invoice marked as sent".to_string(),
                )),
                InvoiceStep::AlreadySent { .. } => out.push((
                    NotificationLevel::Info,
                    "Invoice was already sent".to_string(),
                )),
                InvoiceStep::NotFound => out.push((
                    NotificationLevel::Warning,
                    "No invoice found for this booking".to_string(),
                )),
                InvoiceStep::LookupFailed(e) => out.push((
                    NotificationLevel::Error,
                    format!("Failed to look up invoice: {}", e),
                )),
                InvoiceStep::UpdateFailed { error, .. } => out.push((
                    NotificationLevel::Error,
                    format!("Failed to mark invoice as sent: {}", error),
                )),
            }
        }

        out
    }
}

// ----------------------------------------------------------------------------
// Confirmation
// ----------------------------------------------------------------------------

async fn submit<A: AssignmentApi>(api: &A, draft: &AssignmentDraft) -> Result<(), ApiError> {
    match draft.resource_type {
        ResourceType::Guide => api.assign_guide(&draft.booking_id, &draft.resource_id).await,
        ResourceType::Transport => {
            api.assign_transport(&draft.booking_id, &draft.resource_id)
                .await
        }
    }
}

/// Persist all drafts of one booking.
///
/// Rejections (`NoDrafts`, `AlreadyInFlight`, ...) happen before any
/// network call. Remote failures never fail the whole call: they are
/// collected in the report next to the successes.
pub async fn confirm_booking<S, A>(
    store: &S,
    api: &A,
    booking_id: &str,
) -> Result<ConfirmReport, ConfirmRejected>
where
    S: StoreHandle,
    A: AssignmentApi,
{
    let batch = match store.dispatch(AssignmentAction::ConfirmStart {
        booking_id: booking_id.to_string(),
    }) {
        Some(ActionOutcome::ConfirmStarted(batch)) => batch,
        Some(ActionOutcome::Rejected(reason)) => return Err(reason),
        Some(_) => return Err(ConfirmRejected::NoDrafts),
        None => return Err(ConfirmRejected::Detached),
    };

    log::info!(
        "confirming {} assignment(s) for booking {}",
        batch.len(),
        booking_id
    );

    let results = join_all(batch.iter().map(|draft| submit(api, draft))).await;

    let mut report = ConfirmReport {
        booking_id: booking_id.to_string(),
        succeeded: Vec::new(),
        failed: Vec::new(),
        cascade: None,
    };

    for (draft, result) in batch.into_iter().zip(results) {
        match result {
            Ok(()) => {
                store.dispatch(AssignmentAction::ConfirmSuccess {
                    draft_id: draft.id.clone(),
                });
                report.succeeded.push(draft);
            }
            Err(e) => {
                log::warn!(
                    "{} assignment for booking {} failed: {}",
                    draft.resource_type.label(),
                    booking_id,
                    e
                );
                store.dispatch(AssignmentAction::ConfirmFailure {
                    draft_id: draft.id.clone(),
                });
                report.failed.push((draft, e));
            }
        }
    }

    let needs_cascade = store
        .inspect(|s| {
            s.booking(booking_id)
                .is_some_and(|b| b.is_fully_assigned() && b.status != BookingStatus::Completed)
        })
        .unwrap_or(false);

    if needs_cascade {
        report.cascade = Some(run_cascade(store, api, booking_id).await);
    }

    store.dispatch(AssignmentAction::ConfirmFinished {
        booking_id: booking_id.to_string(),
    });

    Ok(report)
}

/// Booking status first, then the invoice. The invoice step runs even when
/// the status update failed.
async fn run_cascade<S, A>(store: &S, api: &A, booking_id: &str) -> CascadeReport
where
    S: StoreHandle,
    A: AssignmentApi,
{
    log::info!("booking {} fully assigned, completing", booking_id);

    let status = api
        .update_booking_status(booking_id, BookingStatus::Completed)
        .await;
    match &status {
        Ok(()) => {
            store.dispatch(AssignmentAction::BookingCompleted {
                booking_id: booking_id.to_string(),
            });
        }
        Err(e) => log::error!("failed to complete booking {}: {}", booking_id, e),
    }

    let invoice = match api.find_invoices(booking_id).await {
        Err(e) => {
            log::error!("invoice lookup for booking {} failed: {}", booking_id, e);
            InvoiceStep::LookupFailed(e)
        }
        Ok(invoices) => match invoices
            .into_iter()
            .find(|i| i.booking_id.id() == booking_id)
        {
            None => {
                log::info!("no invoice for booking {}", booking_id);
                InvoiceStep::NotFound
            }
            Some(invoice) if invoice.status == InvoiceStatus::Sent => InvoiceStep::AlreadySent {
                invoice_id: invoice.id,
            },
            Some(invoice) => match api
                .update_invoice_status(&invoice.id, InvoiceStatus::Sent)
                .await
            {
                Ok(()) => InvoiceStep::MarkedSent {
                    invoice_id: invoice.id,
                },
                Err(error) => {
                    log::error!("failed to send invoice {}: {}", invoice.id, error);
                    InvoiceStep::UpdateFailed {
                        invoice_id: invoice.id,
                        error,
                    }
                }
            },
        },
    };

    CascadeReport { status, invoice }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use contracts::domain::a001_booking::aggregate::Booking;
    use contracts::domain::a004_invoice::aggregate::Invoice;
    use contracts::domain::common::EntityRef;
    use futures::executor::block_on;

    use super::super::model::fixtures::{booking, guide, transport};
    use super::super::model::AssignmentState;
    use super::*;

    /// Records every call; calls named in `failing` answer with a 500
    #[derive(Default)]
    struct FakeApi {
        calls: RefCell<Vec<String>>,
        failing: HashSet<&'static str>,
        invoices: Vec<Invoice>,
    }

    impl FakeApi {
        fn failing(names: &[&'static str]) -> Self {
            Self {
                failing: names.iter().copied().collect(),
                ..Self::default()
            }
        }

        fn with_invoice(mut self, booking_id: &str, status: InvoiceStatus) -> Self {
            self.invoices.push(Invoice {
                id: format!("inv-{}", booking_id),
                booking_id: EntityRef::Id(booking_id.to_string()),
                invoice_number: None,
                amount: Some(100.0),
                status,
                due_date: None,
            });
            self
        }

        fn record(&self, name: &'static str, call: String) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(call);
            if self.failing.contains(name) {
                Err(ApiError::Status {
                    status: 500,
                    message: format!("{} failed", name),
                })
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl AssignmentApi for FakeApi {
        async fn assign_guide(&self, booking_id: &str, guide_id: &str) -> Result<(), ApiError> {
            self.record("assign_guide", format!("guide {} {}", booking_id, guide_id))
        }

        async fn assign_transport(
            &self,
            booking_id: &str,
            transport_id: &str,
        ) -> Result<(), ApiError> {
            self.record(
                "assign_transport",
                format!("transport {} {}", booking_id, transport_id),
            )
        }

        async fn update_booking_status(
            &self,
            booking_id: &str,
            status: BookingStatus,
        ) -> Result<(), ApiError> {
            self.record(
                "update_booking_status",
                format!("booking {} {}", booking_id, status.code()),
            )
        }

        async fn find_invoices(&self, booking_id: &str) -> Result<Vec<Invoice>, ApiError> {
            self.record("find_invoices", format!("find invoice {}", booking_id))?;
            Ok(self
                .invoices
                .iter()
                .filter(|i| i.booking_id.id() == booking_id)
                .cloned()
                .collect())
        }

        async fn update_invoice_status(
            &self,
            invoice_id: &str,
            status: InvoiceStatus,
        ) -> Result<(), ApiError> {
            let status = match status {
                InvoiceStatus::Sent => "sent",
                _ => "other",
            };
            self.record(
                "update_invoice_status",
                format!("invoice {} {}", invoice_id, status),
            )
        }
    }

    fn store_with(bookings: Vec<Booking>) -> RefCell<AssignmentStore> {
        let mut store = AssignmentStore::new();
        store.dispatch(AssignmentAction::BookingsLoaded(bookings));
        store.dispatch(AssignmentAction::ResourcesLoaded {
            guides: vec![guide("G1"), guide("G2")],
            transports: vec![transport("T1")],
        });
        RefCell::new(store)
    }

    fn booking_of(store: &RefCell<AssignmentStore>, id: &str) -> Booking {
        store.borrow().booking(id).cloned().unwrap()
    }

    #[test]
    fn test_confirm_both_drafts_runs_cascade_in_order() {
        let store = store_with(vec![booking("B1")]);
        let api = FakeApi::default().with_invoice("B1", InvoiceStatus::Draft);
        assert!(stage_assignment(&store, "B1", ResourceType::Guide, "G1"));
        assert!(stage_assignment(&store, "B1", ResourceType::Transport, "T1"));

        let report = block_on(confirm_booking(&store, &api, "B1")).unwrap();

        assert_eq!(report.succeeded.len(), 2);
        assert!(report.failed.is_empty());
        assert_eq!(
            api.calls(),
            vec![
                "guide B1 G1",
                "transport B1 T1",
                "booking B1 completed",
                "find invoice B1",
                "invoice inv-B1 sent",
            ]
        );
        let cascade = report.cascade.clone().unwrap();
        assert_eq!(cascade.status, Ok(()));
        assert_eq!(
            cascade.invoice,
            InvoiceStep::MarkedSent {
                invoice_id: "inv-B1".to_string()
            }
        );

        let b = booking_of(&store, "B1");
        assert_eq!(b.status, BookingStatus::Completed);
        assert_eq!(b.guide(), Some("G1"));
        assert_eq!(b.transport(), Some("T1"));
        assert!(store.borrow().drafts().is_empty());
        assert!(!store.borrow().is_in_flight("B1"));
        assert_eq!(
            store.borrow().assignment_state("B1"),
            Some(AssignmentState::FullyAssigned)
        );
    }

    #[test]
    fn test_partial_failure_keeps_successful_assignment() {
        let store = store_with(vec![booking("B1")]);
        let api = FakeApi::failing(&["assign_transport"]);
        stage_assignment(&store, "B1", ResourceType::Guide, "G1");
        stage_assignment(&store, "B1", ResourceType::Transport, "T1");

        let report = block_on(confirm_booking(&store, &api, "B1")).unwrap();

        assert_eq!(report.succeeded.len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0.resource_type, ResourceType::Transport);
        assert!(report.cascade.is_none());

        let b = booking_of(&store, "B1");
        assert_eq!(b.guide(), Some("G1"));
        assert_eq!(b.transport(), None);
        assert_eq!(b.status, BookingStatus::Confirmed);
        // the failed draft is discarded, not retried
        assert!(store.borrow().drafts().is_empty());
        assert_eq!(api.calls().len(), 2);

        let levels: Vec<NotificationLevel> =
            report.notifications().into_iter().map(|(l, _)| l).collect();
        assert_eq!(
            levels,
            vec![NotificationLevel::Success, NotificationLevel::Error]
        );
    }

    #[test]
    fn test_single_draft_on_half_assigned_booking_completes_it() {
        let mut b1 = booking("B1");
        b1.guide_id = Some(EntityRef::Id("G2".to_string()));
        let store = store_with(vec![b1]);
        let api = FakeApi::default().with_invoice("B1", InvoiceStatus::Draft);
        stage_assignment(&store, "B1", ResourceType::Transport, "T1");

        let report = block_on(confirm_booking(&store, &api, "B1")).unwrap();

        assert!(report.cascade.is_some());
        assert_eq!(booking_of(&store, "B1").status, BookingStatus::Completed);
        assert_eq!(api.calls()[0], "transport B1 T1");
    }

    #[test]
    fn test_missing_invoice_is_reported_not_fatal() {
        let store = store_with(vec![booking("B1")]);
        let api = FakeApi::default();
        stage_assignment(&store, "B1", ResourceType::Guide, "G1");
        stage_assignment(&store, "B1", ResourceType::Transport, "T1");

        let report = block_on(confirm_booking(&store, &api, "B1")).unwrap();

        let cascade = report.cascade.clone().unwrap();
        assert_eq!(cascade.status, Ok(()));
        assert_eq!(cascade.invoice, InvoiceStep::NotFound);
        assert_eq!(booking_of(&store, "B1").status, BookingStatus::Completed);
        assert!(report
            .notifications()
            .contains(&(NotificationLevel::Warning, "No invoice found for this booking".to_string())));
    }

    #[test]
    fn test_already_sent_invoice_is_left_alone() {
        let store = store_with(vec![booking("B1")]);
        let api = FakeApi::default().with_invoice("B1", InvoiceStatus::Sent);
        stage_assignment(&store, "B1", ResourceType::Guide, "G1");
        stage_assignment(&store, "B1", ResourceType::Transport, "T1");

        let report = block_on(confirm_booking(&store, &api, "B1")).unwrap();

        assert_eq!(
            report.cascade.unwrap().invoice,
            InvoiceStep::AlreadySent {
                invoice_id: "inv-B1".to_string()
            }
        );
        assert!(!api.calls().iter().any(|c| c.starts_with("invoice ")));
    }

    #[test]
    fn test_status_failure_still_processes_invoice() {
        let store = store_with(vec![booking("B1")]);
        let api = FakeApi::failing(&["update_booking_status"]).with_invoice("B1", InvoiceStatus::Draft);
        stage_assignment(&store, "B1", ResourceType::Guide, "G1");
        stage_assignment(&store, "B1", ResourceType::Transport, "T1");

        let report = block_on(confirm_booking(&store, &api, "B1")).unwrap();

        let cascade = report.cascade.unwrap();
        assert!(cascade.status.is_err());
        assert!(matches!(cascade.invoice, InvoiceStep::MarkedSent { .. }));

        // assignments stay, status is only updated locally on success
        let b = booking_of(&store, "B1");
        assert!(b.is_fully_assigned());
        assert_eq!(b.status, BookingStatus::Confirmed);
    }

    #[test]
    fn test_invoice_update_failure_is_reported() {
        let store = store_with(vec![booking("B1")]);
        let api = FakeApi::failing(&["update_invoice_status"]).with_invoice("B1", InvoiceStatus::Draft);
        stage_assignment(&store, "B1", ResourceType::Guide, "G1");
        stage_assignment(&store, "B1", ResourceType::Transport, "T1");

        let report = block_on(confirm_booking(&store, &api, "B1")).unwrap();

        assert!(matches!(
            report.cascade.unwrap().invoice,
            InvoiceStep::UpdateFailed { ref invoice_id, .. } if invoice_id == "inv-B1"
        ));
        assert_eq!(booking_of(&store, "B1").status, BookingStatus::Completed);
    }

    #[test]
    fn test_confirm_without_drafts_is_rejected_without_network() {
        let store = store_with(vec![booking("B1")]);
        let api = FakeApi::default();

        let result = block_on(confirm_booking(&store, &api, "B1"));

        assert_eq!(result, Err(ConfirmRejected::NoDrafts));
        assert!(api.calls().is_empty());

        // repeating is just as harmless
        let again = block_on(confirm_booking(&store, &api, "B1"));
        assert_eq!(again, Err(ConfirmRejected::NoDrafts));
        assert_eq!(booking_of(&store, "B1"), booking("B1"));
    }

    #[test]
    fn test_confirm_while_in_flight_is_rejected() {
        let store = store_with(vec![booking("B1")]);
        let api = FakeApi::default();
        stage_assignment(&store, "B1", ResourceType::Guide, "G1");

        // first confirmation has started but not finished
        let started = store.dispatch(AssignmentAction::ConfirmStart {
            booking_id: "B1".to_string(),
        });
        assert!(matches!(started, Some(ActionOutcome::ConfirmStarted(_))));

        let result = block_on(confirm_booking(&store, &api, "B1"));

        assert_eq!(result, Err(ConfirmRejected::AlreadyInFlight));
        assert!(api.calls().is_empty());
        assert!(!stage_assignment(&store, "B1", ResourceType::Guide, "G2"));
    }

    #[test]
    fn test_confirming_one_booking_leaves_others_alone() {
        let store = store_with(vec![booking("B1"), booking("B2")]);
        let api = FakeApi::default();
        stage_assignment(&store, "B1", ResourceType::Guide, "G1");
        stage_assignment(&store, "B2", ResourceType::Guide, "G2");

        block_on(confirm_booking(&store, &api, "B1")).unwrap();

        assert_eq!(api.calls(), vec!["guide B1 G1"]);
        assert_eq!(store.borrow().drafts_for("B2").len(), 1);
        assert_eq!(
            store.borrow().assignment_state("B2"),
            Some(AssignmentState::Draft)
        );
    }

    #[test]
    fn test_cancel_and_remove_helpers() {
        let store = store_with(vec![booking("B1")]);
        stage_assignment(&store, "B1", ResourceType::Guide, "G1");
        stage_assignment(&store, "B1", ResourceType::Transport, "T1");

        let guide_draft = store
            .borrow()
            .draft_for("B1", ResourceType::Guide)
            .map(|d| d.id.clone())
            .unwrap();
        assert!(remove_draft(&store, &guide_draft));
        assert!(!remove_draft(&store, &guide_draft));

        assert!(cancel_booking_drafts(&store, "B1"));
        assert!(!cancel_booking_drafts(&store, "B1"));
        assert!(store.borrow().drafts().is_empty());
    }

    #[test]
    fn test_success_notification_names_resources() {
        let store = store_with(vec![booking("B1")]);
        let api = FakeApi::default();
        stage_assignment(&store, "B1", ResourceType::Guide, "G1");

        let report = block_on(confirm_booking(&store, &api, "B1")).unwrap();
        let messages = report.notifications();

        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0],
            (
                NotificationLevel::Success,
                "1 assignment(s) confirmed: guide Guide G1".to_string()
            )
        );
    }
}
