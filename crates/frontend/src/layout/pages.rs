//! Page registry: the one place mapping a page key to its label, icon,
//! allowed roles and view.

use contracts::system::auth::StaffRole;
use leptos::prelude::*;

use crate::domain::a001_booking::ui::list::BookingList;
use crate::domain::a002_guide::ui::list::GuideList;
use crate::domain::a003_transport::ui::list::TransportList;
use crate::domain::a004_invoice::ui::list::InvoiceList;
use crate::usecases::u501_assign_resources::AssignResourcesPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Bookings,
    Assignments,
    Invoices,
    Guides,
    Transports,
}

impl Page {
    /// Sidebar order
    pub const ALL: [Page; 5] = [
        Page::Bookings,
        Page::Assignments,
        Page::Invoices,
        Page::Guides,
        Page::Transports,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Page::Bookings => "a001_booking",
            Page::Assignments => "u501_assign_resources",
            Page::Invoices => "a004_invoice",
            Page::Guides => "a002_guide",
            Page::Transports => "a003_transport",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Bookings => "Bookings",
            Page::Assignments => "Assignments",
            Page::Invoices => "Invoices",
            Page::Guides => "Guides",
            Page::Transports => "Transport",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Bookings => "bookings",
            Page::Assignments => "assignments",
            Page::Invoices => "invoices",
            Page::Guides => "guides",
            Page::Transports => "transports",
        }
    }

    /// Without a known role only the common screens are shown
    pub fn allowed_for(&self, role: Option<StaffRole>) -> bool {
        match self {
            Page::Bookings | Page::Guides | Page::Transports => true,
            Page::Assignments => matches!(role, Some(StaffRole::Admin | StaffRole::Operations)),
            Page::Invoices => matches!(role, Some(StaffRole::Admin | StaffRole::Accounts)),
        }
    }

    pub fn visible_for(role: Option<StaffRole>) -> Vec<Page> {
        Self::ALL.into_iter().filter(|p| p.allowed_for(role)).collect()
    }

    pub fn render(&self) -> AnyView {
        match self {
            Page::Bookings => view! { <BookingList /> }.into_any(),
            Page::Assignments => view! { <AssignResourcesPage /> }.into_any(),
            Page::Invoices => view! { <InvoiceList /> }.into_any(),
            Page::Guides => view! { <GuideList /> }.into_any(),
            Page::Transports => view! { <TransportList /> }.into_any(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_key(page.key()), Some(page));
        }
        assert_eq!(Page::from_key("p900_sales_register"), None);
    }

    #[test]
    fn test_role_visibility() {
        assert_eq!(Page::visible_for(Some(StaffRole::Admin)).len(), 5);
        assert_eq!(
            Page::visible_for(Some(StaffRole::Operations)),
            vec![Page::Bookings, Page::Assignments, Page::Guides, Page::Transports]
        );
        assert_eq!(
            Page::visible_for(Some(StaffRole::Accounts)),
            vec![Page::Bookings, Page::Invoices, Page::Guides, Page::Transports]
        );
        assert_eq!(
            Page::visible_for(Some(StaffRole::Sales)),
            vec![Page::Bookings, Page::Guides, Page::Transports]
        );
        assert_eq!(Page::visible_for(None), Page::visible_for(Some(StaffRole::Sales)));
    }
}
