use contracts::domain::a003_transport::aggregate::Transport;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a003_transport::api::fetch_transports;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::table::{CellValue, ColumnDescriptor, DataTable, TableRow};
use crate::shared::icons::icon;

#[derive(Clone, Debug, PartialEq)]
pub struct TransportRow {
    pub id: String,
    pub name: String,
    pub vehicle_type: Option<String>,
    pub registration_number: Option<String>,
    pub capacity: Option<u32>,
    pub is_active: bool,
}

impl From<Transport> for TransportRow {
    fn from(t: Transport) -> Self {
        Self {
            id: t.id,
            name: t.name,
            vehicle_type: t.vehicle_type,
            registration_number: t.registration_number,
            capacity: t.capacity,
            is_active: t.is_active,
        }
    }
}

impl TableRow for TransportRow {
    fn cell(&self, key: &str) -> CellValue {
        match key {
            "name" => self.name.as_str().into(),
            "vehicle_type" => self.vehicle_type.clone().into(),
            "registration_number" => self.registration_number.clone().into(),
            "capacity" => self.capacity.into(),
            "is_active" => self.is_active.into(),
            _ => CellValue::Null,
        }
    }
}

fn transport_columns() -> Vec<ColumnDescriptor<TransportRow>> {
    vec![
        ColumnDescriptor::new("name", "Name"),
        ColumnDescriptor::new("vehicle_type", "Type"),
        ColumnDescriptor::new("registration_number", "Registration"),
        ColumnDescriptor::new("capacity", "Seats").align_right(),
        ColumnDescriptor::new("is_active", "Status")
            .render(|r: &TransportRow| (if r.is_active { "Active" } else { "Inactive" }).to_string()),
    ]
}

#[component]
#[allow(non_snake_case)]
pub fn TransportList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<TransportRow>>(Vec::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let fetch = move || {
        set_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_transports().await {
                Ok(v) => {
                    set_items.set(v.into_iter().map(Into::into).collect());
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("failed to load transports: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    fetch();

    view! {
        <div class="page">
            <PageHeader title="Transport" icon_name="transports">
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

            <DataTable rows=items columns=transport_columns() searchable=true loading=loading />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::components::table::{ColumnSet, TableView};

    fn row(id: &str, capacity: Option<u32>) -> TransportRow {
        TransportRow {
            id: id.to_string(),
            name: format!("Coach {}", id),
            vehicle_type: Some("Bus".to_string()),
            registration_number: None,
            capacity,
            is_active: true,
        }
    }

    #[test]
    fn test_capacity_sorts_numerically() {
        let columns = ColumnSet::new(transport_columns()).unwrap();
        let rows = vec![row("a", Some(9)), row("b", None), row("c", Some(45))];
        let mut view = TableView::new(rows, columns, 10);

        view.set_sort("capacity");
        view.set_sort("capacity");

        let ids: Vec<&str> = view.visible_rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}
