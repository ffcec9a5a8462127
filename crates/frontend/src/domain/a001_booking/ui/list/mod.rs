use contracts::domain::a001_booking::aggregate::{Booking, BookingStatus};
use contracts::domain::common::EntityRef;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a001_booking::api::fetch_bookings;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::table::{
    format_optional_money, CellValue, ColumnDescriptor, DataTable, TableRow,
};
use crate::shared::config::AppConfig;
use crate::shared::date_utils::{format_datetime, format_optional_date};
use crate::shared::icons::icon;

#[derive(Clone, Debug, PartialEq)]
pub struct BookingRow {
    pub id: String,
    pub customer: String,
    pub package: String,
    pub travel_date: Option<String>,
    pub pilgrims: Option<u32>,
    pub total_amount: Option<f64>,
    pub status: BookingStatus,
    /// Populated name or id of the attached guide
    pub guide: Option<String>,
    pub transport: Option<String>,
    pub created_at: Option<String>,
}

fn resource_label(r: Option<&EntityRef>) -> Option<String> {
    r.map(EntityRef::label)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
}

impl From<Booking> for BookingRow {
    fn from(b: Booking) -> Self {
        Self {
            customer: b.customer_label(),
            package: b.package_label(),
            guide: resource_label(b.guide_id.as_ref()),
            transport: resource_label(b.transport_id.as_ref()),
            id: b.id,
            travel_date: b.travel_date,
            pilgrims: b.pilgrims,
            total_amount: b.total_amount,
            status: b.status,
            created_at: b.created_at,
        }
    }
}

impl BookingRow {
    fn resources_label(&self) -> String {
        let parts: Vec<&str> = [self.guide.as_deref(), self.transport.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            "-".to_string()
        } else {
            parts.join(", ")
        }
    }
}

impl TableRow for BookingRow {
    fn cell(&self, key: &str) -> CellValue {
        match key {
            "id" => self.id.as_str().into(),
            "customer" => self.customer.as_str().into(),
            "package" => self.package.as_str().into(),
            "travel_date" => self.travel_date.clone().into(),
            "pilgrims" => self.pilgrims.into(),
            "total_amount" => self.total_amount.into(),
            "status" => self.status.display_name().into(),
            "resources" => self.resources_label().into(),
            "created_at" => self.created_at.clone().into(),
            _ => CellValue::Null,
        }
    }
}

fn booking_columns(currency: String) -> Vec<ColumnDescriptor<BookingRow>> {
    vec![
        ColumnDescriptor::new("customer", "Customer"),
        ColumnDescriptor::new("package", "Package"),
        ColumnDescriptor::new("travel_date", "Travel date")
            .render(|r: &BookingRow| format_optional_date(r.travel_date.as_deref())),
        ColumnDescriptor::new("pilgrims", "Pilgrims").align_right(),
        ColumnDescriptor::new("total_amount", "Amount")
            .align_right()
            .render(move |r: &BookingRow| format_optional_money(r.total_amount, &currency)),
        ColumnDescriptor::new("status", "Status"),
        ColumnDescriptor::new("resources", "Assigned").not_sortable(),
        ColumnDescriptor::new("created_at", "Created").render(|r: &BookingRow| {
            r.created_at
                .as_deref()
                .map(format_datetime)
                .unwrap_or_else(|| "-".to_string())
        }),
    ]
}

#[component]
#[allow(non_snake_case)]
pub fn BookingList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<BookingRow>>(Vec::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let currency = use_context::<AppConfig>()
        .unwrap_or_default()
        .table
        .currency;

    let fetch = move || {
        set_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_bookings().await {
                Ok(v) => {
                    log::debug!("loaded {} bookings", v.len());
                    set_items.set(v.into_iter().map(Into::into).collect());
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("failed to load bookings: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    fetch();

    view! {
        <div class="page">
            <PageHeader title="Bookings" icon_name="bookings">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </PageHeader>

            {move || error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>
                    <span>{e}</span>
                </MessageBar>
            })}

            <DataTable
                rows=items
                columns=booking_columns(currency)
                searchable=true
                loading=loading
                empty_text="No bookings yet"
            />
        </div>
    }
}
