//! Local state of the assignment screen.
//!
//! All mutations go through [`AssignmentStore::dispatch`], so the staging and
//! partial-failure rules can be exercised without rendering anything.

use std::collections::HashSet;

use contracts::domain::a001_booking::aggregate::{Booking, BookingStatus};
use contracts::domain::a002_guide::aggregate::Guide;
use contracts::domain::a003_transport::aggregate::Transport;
use contracts::domain::common::EntityRef;
use thiserror::Error;

use super::model::{
    assignment_state, AssignmentDraft, AssignmentState, BookingSnapshot, ResourceSnapshot,
    ResourceType,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfirmRejected {
    #[error("Booking {0} is not loaded")]
    UnknownBooking(String),

    #[error("No pending assignments to confirm")]
    NoDrafts,

    #[error("Confirmation is already in progress for this booking")]
    AlreadyInFlight,

    #[error("Assignment screen is no longer active")]
    Detached,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentAction {
    BookingsLoaded(Vec<Booking>),
    ResourcesLoaded {
        guides: Vec<Guide>,
        transports: Vec<Transport>,
    },
    Stage {
        booking_id: String,
        resource_type: ResourceType,
        resource_id: String,
    },
    RemoveDraft {
        draft_id: String,
    },
    CancelBooking {
        booking_id: String,
    },
    ConfirmStart {
        booking_id: String,
    },
    ConfirmSuccess {
        draft_id: String,
    },
    ConfirmFailure {
        draft_id: String,
    },
    ConfirmFinished {
        booking_id: String,
    },
    BookingCompleted {
        booking_id: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Applied,
    /// Nothing changed (unknown ids, ineligible booking, ...)
    Ignored,
    /// Drafts to submit; the booking is now in flight
    ConfirmStarted(Vec<AssignmentDraft>),
    Rejected(ConfirmRejected),
}

#[derive(Debug, Clone, Default)]
pub struct AssignmentStore {
    bookings: Vec<Booking>,
    guides: Vec<Guide>,
    transports: Vec<Transport>,
    drafts: Vec<AssignmentDraft>,
    in_flight: HashSet<String>,
}

impl AssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Bookings shown on the assignment screen: confirmed ones, plus completed
    /// ones as read-only rows
    pub fn assignable_bookings(&self) -> Vec<&Booking> {
        self.bookings
            .iter()
            .filter(|b| matches!(b.status, BookingStatus::Confirmed | BookingStatus::Completed))
            .collect()
    }

    pub fn booking(&self, booking_id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == booking_id)
    }

    /// Selectable resources of one type as `(id, name)`
    pub fn active_resources(&self, resource_type: ResourceType) -> Vec<(String, String)> {
        match resource_type {
            ResourceType::Guide => self
                .guides
                .iter()
                .filter(|g| g.is_active)
                .map(|g| (g.id.clone(), g.name.clone()))
                .collect(),
            ResourceType::Transport => self
                .transports
                .iter()
                .filter(|t| t.is_active)
                .map(|t| (t.id.clone(), t.name.clone()))
                .collect(),
        }
    }

    /// Name of the resource saved on a booking slot. Falls back to the name
    /// the API populated on the booking when the resource is not loaded.
    pub fn persisted_name(&self, booking: &Booking, resource_type: ResourceType) -> Option<String> {
        let id = resource_type.persisted_id(booking)?;
        self.loaded_name(resource_type, id)
            .or_else(|| resource_type.persisted_ref(booking).map(|r| r.label().to_string()))
    }

    fn loaded_name(&self, resource_type: ResourceType, resource_id: &str) -> Option<String> {
        match resource_type {
            ResourceType::Guide => self
                .guides
                .iter()
                .find(|g| g.id == resource_id)
                .map(|g| g.name.clone()),
            ResourceType::Transport => self
                .transports
                .iter()
                .find(|t| t.id == resource_id)
                .map(|t| t.name.clone()),
        }
    }

    fn is_active_resource(&self, resource_type: ResourceType, resource_id: &str) -> bool {
        match resource_type {
            ResourceType::Guide => self.guides.iter().any(|g| g.id == resource_id && g.is_active),
            ResourceType::Transport => self
                .transports
                .iter()
                .any(|t| t.id == resource_id && t.is_active),
        }
    }

    pub fn drafts(&self) -> &[AssignmentDraft] {
        &self.drafts
    }

    pub fn drafts_for(&self, booking_id: &str) -> Vec<&AssignmentDraft> {
        self.drafts
            .iter()
            .filter(|d| d.booking_id == booking_id)
            .collect()
    }

    pub fn draft_for(
        &self,
        booking_id: &str,
        resource_type: ResourceType,
    ) -> Option<&AssignmentDraft> {
        self.drafts
            .iter()
            .find(|d| d.booking_id == booking_id && d.resource_type == resource_type)
    }

    pub fn is_in_flight(&self, booking_id: &str) -> bool {
        self.in_flight.contains(booking_id)
    }

    pub fn assignment_state(&self, booking_id: &str) -> Option<AssignmentState> {
        self.booking(booking_id)
            .map(|b| assignment_state(b, &self.drafts))
    }

    // ------------------------------------------------------------------
    // Reducer
    // ------------------------------------------------------------------

    pub fn dispatch(&mut self, action: AssignmentAction) -> ActionOutcome {
        match action {
            AssignmentAction::BookingsLoaded(bookings) => {
                self.bookings = bookings;
                self.prune_drafts();
                ActionOutcome::Applied
            }
            AssignmentAction::ResourcesLoaded { guides, transports } => {
                self.guides = guides;
                self.transports = transports;
                self.prune_drafts();
                ActionOutcome::Applied
            }
            AssignmentAction::Stage {
                booking_id,
                resource_type,
                resource_id,
            } => self.stage(&booking_id, resource_type, &resource_id),
            AssignmentAction::RemoveDraft { draft_id } => self.remove_draft(&draft_id),
            AssignmentAction::CancelBooking { booking_id } => self.cancel_booking(&booking_id),
            AssignmentAction::ConfirmStart { booking_id } => self.confirm_start(&booking_id),
            AssignmentAction::ConfirmSuccess { draft_id } => self.confirm_success(&draft_id),
            AssignmentAction::ConfirmFailure { draft_id } => {
                if self.take_draft(&draft_id).is_some() {
                    ActionOutcome::Applied
                } else {
                    ActionOutcome::Ignored
                }
            }
            AssignmentAction::ConfirmFinished { booking_id } => {
                if self.in_flight.remove(&booking_id) {
                    ActionOutcome::Applied
                } else {
                    ActionOutcome::Ignored
                }
            }
            AssignmentAction::BookingCompleted { booking_id } => {
                match self.bookings.iter_mut().find(|b| b.id == booking_id) {
                    Some(b) if b.is_fully_assigned() => {
                        b.status = BookingStatus::Completed;
                        ActionOutcome::Applied
                    }
                    _ => ActionOutcome::Ignored,
                }
            }
        }
    }

    fn stage(
        &mut self,
        booking_id: &str,
        resource_type: ResourceType,
        resource_id: &str,
    ) -> ActionOutcome {
        if self.in_flight.contains(booking_id) {
            return ActionOutcome::Ignored;
        }
        let Some(booking) = self.booking(booking_id) else {
            return ActionOutcome::Ignored;
        };
        if booking.status != BookingStatus::Confirmed
            || resource_type.persisted_id(booking).is_some()
        {
            return ActionOutcome::Ignored;
        }
        let booking_snapshot = BookingSnapshot::from(booking);

        let resource_snapshot = match resource_type {
            ResourceType::Guide => self
                .guides
                .iter()
                .find(|g| g.id == resource_id && g.is_active)
                .map(ResourceSnapshot::from),
            ResourceType::Transport => self
                .transports
                .iter()
                .find(|t| t.id == resource_id && t.is_active)
                .map(ResourceSnapshot::from),
        };
        let Some(resource_snapshot) = resource_snapshot else {
            return ActionOutcome::Ignored;
        };

        // at most one draft per (booking, type): replace in place
        if let Some(existing) = self
            .drafts
            .iter_mut()
            .find(|d| d.booking_id == booking_id && d.resource_type == resource_type)
        {
            existing.resource_id = resource_id.to_string();
            existing.resource_snapshot = resource_snapshot;
            existing.booking_snapshot = booking_snapshot;
            return ActionOutcome::Applied;
        }

        self.drafts.push(AssignmentDraft {
            id: uuid::Uuid::new_v4().to_string(),
            booking_id: booking_id.to_string(),
            booking_snapshot,
            resource_type,
            resource_id: resource_id.to_string(),
            resource_snapshot,
        });
        ActionOutcome::Applied
    }

    fn remove_draft(&mut self, draft_id: &str) -> ActionOutcome {
        let in_flight = self
            .drafts
            .iter()
            .find(|d| d.id == draft_id)
            .is_some_and(|d| self.in_flight.contains(&d.booking_id));
        if in_flight {
            return ActionOutcome::Ignored;
        }
        match self.take_draft(draft_id) {
            Some(_) => ActionOutcome::Applied,
            None => ActionOutcome::Ignored,
        }
    }

    fn cancel_booking(&mut self, booking_id: &str) -> ActionOutcome {
        if self.in_flight.contains(booking_id) {
            return ActionOutcome::Ignored;
        }
        let before = self.drafts.len();
        self.drafts.retain(|d| d.booking_id != booking_id);
        if self.drafts.len() < before {
            ActionOutcome::Applied
        } else {
            ActionOutcome::Ignored
        }
    }

    fn confirm_start(&mut self, booking_id: &str) -> ActionOutcome {
        if self.booking(booking_id).is_none() {
            return ActionOutcome::Rejected(ConfirmRejected::UnknownBooking(
                booking_id.to_string(),
            ));
        }
        if self.in_flight.contains(booking_id) {
            return ActionOutcome::Rejected(ConfirmRejected::AlreadyInFlight);
        }
        let batch: Vec<AssignmentDraft> = self
            .drafts
            .iter()
            .filter(|d| d.booking_id == booking_id)
            .cloned()
            .collect();
        if batch.is_empty() {
            return ActionOutcome::Rejected(ConfirmRejected::NoDrafts);
        }
        self.in_flight.insert(booking_id.to_string());
        ActionOutcome::ConfirmStarted(batch)
    }

    fn confirm_success(&mut self, draft_id: &str) -> ActionOutcome {
        let Some(draft) = self.take_draft(draft_id) else {
            return ActionOutcome::Ignored;
        };
        let Some(booking) = self.bookings.iter_mut().find(|b| b.id == draft.booking_id) else {
            return ActionOutcome::Ignored;
        };
        match draft.resource_type {
            ResourceType::Guide => booking.guide_id = Some(EntityRef::Id(draft.resource_id)),
            ResourceType::Transport => {
                booking.transport_id = Some(EntityRef::Id(draft.resource_id))
            }
        }
        ActionOutcome::Applied
    }

    fn take_draft(&mut self, draft_id: &str) -> Option<AssignmentDraft> {
        let pos = self.drafts.iter().position(|d| d.id == draft_id)?;
        Some(self.drafts.remove(pos))
    }

    /// Drops drafts the reloaded data no longer allows: booking gone or not
    /// confirmed, slot already saved, resource retired. Resources are only
    /// checked once loaded.
    fn prune_drafts(&mut self) {
        let drafts = std::mem::take(&mut self.drafts);
        self.drafts = drafts.into_iter().filter(|d| self.is_draft_valid(d)).collect();
    }

    fn is_draft_valid(&self, draft: &AssignmentDraft) -> bool {
        if self.in_flight.contains(&draft.booking_id) {
            return true;
        }
        let booking_ok = self.booking(&draft.booking_id).is_some_and(|b| {
            b.status == BookingStatus::Confirmed && draft.resource_type.persisted_id(b).is_none()
        });
        let resources_loaded = !self.guides.is_empty() || !self.transports.is_empty();
        booking_ok
            && (!resources_loaded || self.is_active_resource(draft.resource_type, &draft.resource_id))
    }
}

#[cfg(test)]
mod tests {
    use super::super::model::fixtures::{booking, guide, transport};
    use super::*;

    fn store() -> AssignmentStore {
        let mut store = AssignmentStore::new();
        store.dispatch(AssignmentAction::BookingsLoaded(vec![booking("B1"), booking("B2")]));
        let mut retired = guide("G9");
        retired.is_active = false;
        store.dispatch(AssignmentAction::ResourcesLoaded {
            guides: vec![guide("G1"), guide("G2"), retired],
            transports: vec![transport("T1")],
        });
        store
    }

    fn stage(store: &mut AssignmentStore, booking_id: &str, t: ResourceType, id: &str) -> ActionOutcome {
        store.dispatch(AssignmentAction::Stage {
            booking_id: booking_id.to_string(),
            resource_type: t,
            resource_id: id.to_string(),
        })
    }

    #[test]
    fn test_restaging_same_type_replaces_draft() {
        let mut s = store();
        assert_eq!(stage(&mut s, "B1", ResourceType::Guide, "G1"), ActionOutcome::Applied);
        let first_id = s.drafts()[0].id.clone();
        assert_eq!(stage(&mut s, "B1", ResourceType::Guide, "G2"), ActionOutcome::Applied);

        let drafts = s.drafts_for("B1");
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].resource_id, "G2");
        assert_eq!(drafts[0].resource_snapshot.name, "Guide G2");
        assert_eq!(drafts[0].id, first_id);
    }

    #[test]
    fn test_guide_and_transport_drafts_coexist() {
        let mut s = store();
        stage(&mut s, "B1", ResourceType::Guide, "G1");
        stage(&mut s, "B1", ResourceType::Transport, "T1");
        stage(&mut s, "B2", ResourceType::Guide, "G1");
        assert_eq!(s.drafts_for("B1").len(), 2);
        assert_eq!(s.drafts().len(), 3);
        assert_eq!(s.assignment_state("B1"), Some(AssignmentState::Draft));
    }

    #[test]
    fn test_staging_unknown_ids_is_a_no_op() {
        let mut s = store();
        assert_eq!(stage(&mut s, "B404", ResourceType::Guide, "G1"), ActionOutcome::Ignored);
        assert_eq!(stage(&mut s, "B1", ResourceType::Guide, "G404"), ActionOutcome::Ignored);
        assert_eq!(stage(&mut s, "B1", ResourceType::Transport, "G1"), ActionOutcome::Ignored);
        assert!(s.drafts().is_empty());
    }

    #[test]
    fn test_staging_ineligible_targets_is_a_no_op() {
        let mut s = store();
        // inactive guide
        assert_eq!(stage(&mut s, "B1", ResourceType::Guide, "G9"), ActionOutcome::Ignored);

        let mut assigned = booking("B3");
        assigned.guide_id = Some(EntityRef::Id("G1".to_string()));
        let mut cancelled = booking("B4");
        cancelled.status = BookingStatus::Cancelled;
        s.dispatch(AssignmentAction::BookingsLoaded(vec![assigned, cancelled]));

        assert_eq!(stage(&mut s, "B3", ResourceType::Guide, "G2"), ActionOutcome::Ignored);
        assert_eq!(stage(&mut s, "B4", ResourceType::Guide, "G2"), ActionOutcome::Ignored);
        assert_eq!(stage(&mut s, "B3", ResourceType::Transport, "T1"), ActionOutcome::Applied);
    }

    #[test]
    fn test_remove_and_cancel() {
        let mut s = store();
        stage(&mut s, "B1", ResourceType::Guide, "G1");
        stage(&mut s, "B1", ResourceType::Transport, "T1");
        let guide_draft = s.draft_for("B1", ResourceType::Guide).unwrap().id.clone();

        assert_eq!(
            s.dispatch(AssignmentAction::RemoveDraft { draft_id: guide_draft.clone() }),
            ActionOutcome::Applied
        );
        assert!(s.draft_for("B1", ResourceType::Guide).is_none());
        assert_eq!(
            s.dispatch(AssignmentAction::RemoveDraft { draft_id: guide_draft }),
            ActionOutcome::Ignored
        );

        s.dispatch(AssignmentAction::CancelBooking { booking_id: "B1".to_string() });
        assert!(s.drafts().is_empty());
        assert_eq!(s.assignment_state("B1"), Some(AssignmentState::Unassigned));
    }

    #[test]
    fn test_confirm_start_rules() {
        let mut s = store();
        assert_eq!(
            s.dispatch(AssignmentAction::ConfirmStart { booking_id: "B1".to_string() }),
            ActionOutcome::Rejected(ConfirmRejected::NoDrafts)
        );
        assert_eq!(
            s.dispatch(AssignmentAction::ConfirmStart { booking_id: "nope".to_string() }),
            ActionOutcome::Rejected(ConfirmRejected::UnknownBooking("nope".to_string()))
        );

        stage(&mut s, "B1", ResourceType::Guide, "G1");
        let started = s.dispatch(AssignmentAction::ConfirmStart { booking_id: "B1".to_string() });
        assert!(matches!(started, ActionOutcome::ConfirmStarted(ref batch) if batch.len() == 1));
        assert!(s.is_in_flight("B1"));

        assert_eq!(
            s.dispatch(AssignmentAction::ConfirmStart { booking_id: "B1".to_string() }),
            ActionOutcome::Rejected(ConfirmRejected::AlreadyInFlight)
        );
        // drafts are frozen while in flight
        assert_eq!(stage(&mut s, "B1", ResourceType::Guide, "G2"), ActionOutcome::Ignored);
        assert_eq!(
            s.dispatch(AssignmentAction::CancelBooking { booking_id: "B1".to_string() }),
            ActionOutcome::Ignored
        );

        s.dispatch(AssignmentAction::ConfirmFinished { booking_id: "B1".to_string() });
        assert!(!s.is_in_flight("B1"));
    }

    #[test]
    fn test_success_applies_failure_only_discards() {
        let mut s = store();
        stage(&mut s, "B1", ResourceType::Guide, "G1");
        stage(&mut s, "B1", ResourceType::Transport, "T1");
        let guide_draft = s.draft_for("B1", ResourceType::Guide).unwrap().id.clone();
        let transport_draft = s.draft_for("B1", ResourceType::Transport).unwrap().id.clone();
        s.dispatch(AssignmentAction::ConfirmStart { booking_id: "B1".to_string() });

        s.dispatch(AssignmentAction::ConfirmSuccess { draft_id: guide_draft });
        s.dispatch(AssignmentAction::ConfirmFailure { draft_id: transport_draft });

        let b = s.booking("B1").unwrap();
        assert_eq!(b.guide_id.as_ref().map(EntityRef::id), Some("G1"));
        assert_eq!(b.transport_id, None);
        assert!(s.drafts_for("B1").is_empty());
        assert_eq!(s.assignment_state("B1"), Some(AssignmentState::PartiallyAssigned));
    }

    #[test]
    fn test_completed_requires_both_resources() {
        let mut s = store();
        assert_eq!(
            s.dispatch(AssignmentAction::BookingCompleted { booking_id: "B1".to_string() }),
            ActionOutcome::Ignored
        );
        assert_eq!(s.booking("B1").unwrap().status, BookingStatus::Confirmed);
    }

    #[test]
    fn test_reload_prunes_stale_drafts() {
        let mut s = store();
        stage(&mut s, "B1", ResourceType::Guide, "G1");
        stage(&mut s, "B2", ResourceType::Guide, "G1");

        let mut b1 = booking("B1");
        b1.guide_id = Some(EntityRef::Id("G7".to_string()));
        s.dispatch(AssignmentAction::BookingsLoaded(vec![b1]));

        // B1's guide was set elsewhere, B2 is gone
        assert!(s.drafts().is_empty());
    }

    #[test]
    fn test_active_resources_skip_inactive() {
        let s = store();
        let guides = s.active_resources(ResourceType::Guide);
        assert_eq!(guides.len(), 2);
        assert!(guides.iter().all(|(id, _)| id != "G9"));
    }

    #[test]
    fn test_resource_reload_drops_drafts_for_retired_resources() {
        let mut s = store();
        stage(&mut s, "B1", ResourceType::Guide, "G1");
        stage(&mut s, "B1", ResourceType::Transport, "T1");

        let mut retired = guide("G1");
        retired.is_active = false;
        s.dispatch(AssignmentAction::ResourcesLoaded {
            guides: vec![retired, guide("G2")],
            transports: vec![transport("T1")],
        });

        assert!(s.draft_for("B1", ResourceType::Guide).is_none());
        assert!(s.draft_for("B1", ResourceType::Transport).is_some());
        let guides = s.active_resources(ResourceType::Guide);
        assert_eq!(guides, vec![("G2".to_string(), "Guide G2".to_string())]);
    }

    #[test]
    fn test_persisted_name_prefers_loaded_resource() {
        let mut s = store();
        let mut b = booking("B5");
        b.guide_id = Some(EntityRef::Populated {
            id: "G404".to_string(),
            name: Some("Ibrahim".to_string()),
        });
        b.transport_id = Some(EntityRef::Populated {
            id: "T1".to_string(),
            name: Some("stale name".to_string()),
        });
        s.dispatch(AssignmentAction::BookingsLoaded(vec![b.clone()]));

        assert_eq!(s.persisted_name(&b, ResourceType::Guide).as_deref(), Some("Ibrahim"));
        assert_eq!(s.persisted_name(&b, ResourceType::Transport).as_deref(), Some("Coach T1"));
        assert_eq!(s.persisted_name(&booking("B6"), ResourceType::Guide), None);
    }
}
