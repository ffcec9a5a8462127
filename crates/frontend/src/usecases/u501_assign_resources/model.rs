use contracts::domain::a001_booking::aggregate::Booking;
use contracts::domain::a002_guide::aggregate::Guide;
use contracts::domain::a003_transport::aggregate::Transport;
use contracts::domain::common::EntityRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Guide,
    Transport,
}

impl ResourceType {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceType::Guide => "guide",
            ResourceType::Transport => "transport",
        }
    }

    /// Id persisted on the booking for this slot
    pub fn persisted_id<'a>(&self, booking: &'a Booking) -> Option<&'a str> {
        match self {
            ResourceType::Guide => booking.guide(),
            ResourceType::Transport => booking.transport(),
        }
    }

    /// Raw reference as the API sent it, possibly populated with a name
    pub fn persisted_ref<'a>(&self, booking: &'a Booking) -> Option<&'a EntityRef> {
        let r = match self {
            ResourceType::Guide => booking.guide_id.as_ref(),
            ResourceType::Transport => booking.transport_id.as_ref(),
        };
        r.filter(|r| !r.id().is_empty())
    }
}

/// What the operator saw when the draft was staged
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSnapshot {
    pub booking_id: String,
    pub customer: String,
    pub package: String,
    pub travel_date: Option<String>,
}

impl From<&Booking> for BookingSnapshot {
    fn from(b: &Booking) -> Self {
        Self {
            booking_id: b.id.clone(),
            customer: b.customer_label(),
            package: b.package_label(),
            travel_date: b.travel_date.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSnapshot {
    pub resource_id: String,
    pub name: String,
    pub detail: Option<String>,
}

impl From<&Guide> for ResourceSnapshot {
    fn from(g: &Guide) -> Self {
        Self {
            resource_id: g.id.clone(),
            name: g.name.clone(),
            detail: (!g.languages.is_empty()).then(|| g.languages.join(", ")),
        }
    }
}

impl From<&Transport> for ResourceSnapshot {
    fn from(t: &Transport) -> Self {
        let detail = match (&t.vehicle_type, t.capacity) {
            (Some(kind), Some(seats)) => Some(format!("{}, {} seats", kind, seats)),
            (Some(kind), None) => Some(kind.clone()),
            (None, Some(seats)) => Some(format!("{} seats", seats)),
            (None, None) => t.registration_number.clone(),
        };
        Self {
            resource_id: t.id.clone(),
            name: t.name.clone(),
            detail,
        }
    }
}

/// Locally staged, not yet confirmed attachment of one resource to one booking
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentDraft {
    pub id: String,
    pub booking_id: String,
    pub booking_snapshot: BookingSnapshot,
    pub resource_type: ResourceType,
    pub resource_id: String,
    pub resource_snapshot: ResourceSnapshot,
}

/// Assignment progress of one booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentState {
    Unassigned,
    Draft,
    PartiallyAssigned,
    FullyAssigned,
}

impl AssignmentState {
    pub fn display_name(&self) -> &'static str {
        match self {
            AssignmentState::Unassigned => "Unassigned",
            AssignmentState::Draft => "Draft",
            AssignmentState::PartiallyAssigned => "Partially assigned",
            AssignmentState::FullyAssigned => "Fully assigned",
        }
    }

    /// Fully assigned bookings offer no further actions
    pub fn is_terminal(&self) -> bool {
        matches!(self, AssignmentState::FullyAssigned)
    }
}

/// Single source of truth for the booking badges and action buttons.
///
/// Persisted resources win over drafts: one persisted slot is
/// `PartiallyAssigned` even if the other slot has a draft.
pub fn assignment_state(booking: &Booking, drafts: &[AssignmentDraft]) -> AssignmentState {
    let persisted = [ResourceType::Guide, ResourceType::Transport]
        .iter()
        .filter(|t| t.persisted_id(booking).is_some())
        .count();

    match persisted {
        2 => AssignmentState::FullyAssigned,
        1 => AssignmentState::PartiallyAssigned,
        _ if drafts.iter().any(|d| d.booking_id == booking.id) => AssignmentState::Draft,
        _ => AssignmentState::Unassigned,
    }
}

/// State of one slot (guide or transport) of a booking
#[derive(Debug, Clone, PartialEq)]
pub enum SlotState<'a> {
    Empty,
    Draft(&'a AssignmentDraft),
    Persisted(&'a str),
}

pub fn slot_state<'a>(
    booking: &'a Booking,
    drafts: &'a [AssignmentDraft],
    resource_type: ResourceType,
) -> SlotState<'a> {
    if let Some(id) = resource_type.persisted_id(booking) {
        return SlotState::Persisted(id);
    }
    drafts
        .iter()
        .find(|d| d.booking_id == booking.id && d.resource_type == resource_type)
        .map(SlotState::Draft)
        .unwrap_or(SlotState::Empty)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use contracts::domain::a001_booking::aggregate::BookingStatus;

    pub fn booking(id: &str) -> Booking {
        Booking {
            id: id.to_string(),
            status: BookingStatus::Confirmed,
            guide_id: None,
            transport_id: None,
            customer_id: Some(EntityRef::Populated {
                id: format!("c-{}", id),
                name: Some(format!("Customer {}", id)),
            }),
            package_id: Some(EntityRef::Id("pkg-1".to_string())),
            travel_date: Some("2026-11-02".to_string()),
            pilgrims: Some(2),
            total_amount: Some(54000.0),
            created_at: None,
        }
    }

    pub fn guide(id: &str) -> Guide {
        Guide {
            id: id.to_string(),
            name: format!("Guide {}", id),
            is_active: true,
            phone: None,
            languages: vec!["Urdu".to_string(), "Arabic".to_string()],
        }
    }

    pub fn transport(id: &str) -> Transport {
        Transport {
            id: id.to_string(),
            name: format!("Coach {}", id),
            is_active: true,
            vehicle_type: Some("Bus".to_string()),
            registration_number: None,
            capacity: Some(45),
        }
    }

    pub fn draft(booking: &Booking, resource_type: ResourceType, resource_id: &str) -> AssignmentDraft {
        AssignmentDraft {
            id: format!("d-{}-{}", booking.id, resource_id),
            booking_id: booking.id.clone(),
            booking_snapshot: BookingSnapshot::from(booking),
            resource_type,
            resource_id: resource_id.to_string(),
            resource_snapshot: ResourceSnapshot {
                resource_id: resource_id.to_string(),
                name: resource_id.to_string(),
                detail: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_state_unassigned_and_draft() {
        let b = booking("b1");
        assert_eq!(assignment_state(&b, &[]), AssignmentState::Unassigned);

        let drafts = vec![draft(&b, ResourceType::Guide, "g1")];
        assert_eq!(assignment_state(&b, &drafts), AssignmentState::Draft);

        // drafts of other bookings do not count
        let other = booking("b2");
        assert_eq!(assignment_state(&other, &drafts), AssignmentState::Unassigned);
    }

    #[test]
    fn test_state_partial_and_full() {
        let mut b = booking("b1");
        b.guide_id = Some(EntityRef::Id("g1".to_string()));
        let drafts = vec![draft(&b, ResourceType::Transport, "t1")];
        assert_eq!(assignment_state(&b, &drafts), AssignmentState::PartiallyAssigned);

        b.transport_id = Some(EntityRef::Id("t1".to_string()));
        assert_eq!(assignment_state(&b, &[]), AssignmentState::FullyAssigned);
        assert!(AssignmentState::FullyAssigned.is_terminal());
    }

    #[test]
    fn test_slot_state() {
        let mut b = booking("b1");
        b.transport_id = Some(EntityRef::Id("t9".to_string()));
        let drafts = vec![draft(&b, ResourceType::Guide, "g1")];

        assert!(matches!(
            slot_state(&b, &drafts, ResourceType::Guide),
            SlotState::Draft(d) if d.resource_id == "g1"
        ));
        assert_eq!(
            slot_state(&b, &drafts, ResourceType::Transport),
            SlotState::Persisted("t9")
        );
        assert_eq!(slot_state(&b, &[], ResourceType::Guide), SlotState::Empty);
    }

    #[test]
    fn test_transport_snapshot_detail() {
        let snap = ResourceSnapshot::from(&transport("t1"));
        assert_eq!(snap.detail.as_deref(), Some("Bus, 45 seats"));
        assert_eq!(snap.name, "Coach t1");
    }
}
