use contracts::domain::a002_guide::aggregate::Guide;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a002_guide::api::fetch_guides;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::table::{CellValue, ColumnDescriptor, DataTable, TableRow};
use crate::shared::icons::icon;

#[derive(Clone, Debug, PartialEq)]
pub struct GuideRow {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub languages: String,
    pub is_active: bool,
}

impl From<Guide> for GuideRow {
    fn from(g: Guide) -> Self {
        Self {
            languages: g.languages.join(", "),
            id: g.id,
            name: g.name,
            phone: g.phone,
            is_active: g.is_active,
        }
    }
}

impl TableRow for GuideRow {
    fn cell(&self, key: &str) -> CellValue {
        match key {
            "name" => self.name.as_str().into(),
            "phone" => self.phone.clone().into(),
            "languages" => self.languages.as_str().into(),
            "is_active" => self.is_active.into(),
            _ => CellValue::Null,
        }
    }
}

fn guide_columns() -> Vec<ColumnDescriptor<GuideRow>> {
    vec![
        ColumnDescriptor::new("name", "Name"),
        ColumnDescriptor::new("phone", "Phone").not_sortable(),
        ColumnDescriptor::new("languages", "Languages"),
        ColumnDescriptor::new("is_active", "Status")
            .render(|r: &GuideRow| (if r.is_active { "Active" } else { "Inactive" }).to_string()),
    ]
}

#[component]
#[allow(non_snake_case)]
pub fn GuideList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<GuideRow>>(Vec::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let fetch = move || {
        set_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_guides().await {
                Ok(v) => {
                    set_items.set(v.into_iter().map(Into::into).collect());
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("failed to load guides: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    fetch();

    view! {
        <div class="page">
            <PageHeader title="Guides" icon_name="guides">
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

            <DataTable rows=items columns=guide_columns() searchable=true loading=loading />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guide_row_cells() {
        let row = GuideRow::from(Guide {
            id: "g1".to_string(),
            name: "Yusuf".to_string(),
            is_active: false,
            phone: None,
            languages: vec!["Arabic".to_string(), "English".to_string()],
        });
        assert_eq!(row.cell("languages"), CellValue::Text("Arabic, English".to_string()));
        assert!(row.cell("phone").is_null());
        assert_eq!(guide_columns()[3].display(&row), "Inactive");
    }
}
