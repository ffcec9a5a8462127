use contracts::domain::a004_invoice::aggregate::{Invoice, InvoiceStatus};
use leptos::prelude::*;
use thaw::*;

use crate::domain::a004_invoice::api::fetch_invoices;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::table::{
    format_optional_money, CellValue, ColumnDescriptor, DataTable, TableRow,
};
use crate::shared::config::AppConfig;
use crate::shared::date_utils::format_optional_date;
use crate::shared::icons::icon;

#[derive(Clone, Debug, PartialEq)]
pub struct InvoiceRow {
    pub id: String,
    pub number: String,
    pub booking: String,
    pub amount: Option<f64>,
    pub status: InvoiceStatus,
    pub due_date: Option<String>,
}

impl From<Invoice> for InvoiceRow {
    fn from(i: Invoice) -> Self {
        Self {
            number: i.invoice_number.unwrap_or_else(|| i.id.clone()),
            booking: i.booking_id.label().to_string(),
            id: i.id,
            amount: i.amount,
            status: i.status,
            due_date: i.due_date,
        }
    }
}

impl TableRow for InvoiceRow {
    fn cell(&self, key: &str) -> CellValue {
        match key {
            "number" => self.number.as_str().into(),
            "booking" => self.booking.as_str().into(),
            "amount" => self.amount.into(),
            "status" => self.status.display_name().into(),
            "due_date" => self.due_date.clone().into(),
            _ => CellValue::Null,
        }
    }
}

fn invoice_columns(currency: String) -> Vec<ColumnDescriptor<InvoiceRow>> {
    vec![
        ColumnDescriptor::new("number", "Invoice"),
        ColumnDescriptor::new("booking", "Booking"),
        ColumnDescriptor::new("amount", "Amount")
            .align_right()
            .render(move |r: &InvoiceRow| format_optional_money(r.amount, &currency)),
        ColumnDescriptor::new("status", "Status"),
        ColumnDescriptor::new("due_date", "Due")
            .render(|r: &InvoiceRow| format_optional_date(r.due_date.as_deref())),
    ]
}

#[component]
#[allow(non_snake_case)]
pub fn InvoiceList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<InvoiceRow>>(Vec::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let currency = use_context::<AppConfig>()
        .unwrap_or_default()
        .table
        .currency;

    let fetch = move || {
        set_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_invoices().await {
                Ok(v) => {
                    set_items.set(v.into_iter().map(Into::into).collect());
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("failed to load invoices: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    fetch();

    view! {
        <div class="page">
            <PageHeader title="Invoices" icon_name="invoices">
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
                columns=invoice_columns(currency)
                searchable=true
                loading=loading
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::EntityRef;

    #[test]
    fn test_row_falls_back_to_id_without_number() {
        let row = InvoiceRow::from(Invoice {
            id: "inv-7".to_string(),
            booking_id: EntityRef::Populated {
                id: "b1".to_string(),
                name: Some("BK-0001".to_string()),
            },
            invoice_number: None,
            amount: Some(-42.0),
            status: InvoiceStatus::Sent,
            due_date: None,
        });
        assert_eq!(row.number, "inv-7");
        assert_eq!(row.booking, "BK-0001");
        assert_eq!(row.cell("status"), CellValue::Text("Sent".to_string()));

        let columns = invoice_columns("$".to_string());
        assert_eq!(columns[2].display(&row), "-$42.00");
        assert_eq!(columns[4].display(&row), "-");
    }
}
