use crate::domain::{Column, Fields, FileSlot, ResourceSpec, SortOrder};
use crate::error::AppResult;
use crate::features::crud::ResourceForm;
use crate::features::form::{FormFields, put_text};
use serde::Deserialize;
use validator::Validate;

pub static PAGES: ResourceSpec = ResourceSpec {
    label: "Page",
    table: "pages",
    columns: &[
        Column::text("title"),
        Column::text("slug"),
        Column::text("type"),
        Column::text("description"),
        Column::text("banner"),
    ],
    file: Some(FileSlot {
        column: "banner",
        required: true,
    }),
    slug_from: Some("title"),
    joins: &[],
    order_by: SortOrder::IdAsc,
    update_conflict: None,
};

#[derive(Debug, Deserialize, Validate)]
pub struct PageForm {
    #[validate(length(min = 1, code = "required"))]
    pub title: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, code = "required"))]
    pub page_type: Option<String>,
    #[validate(length(min = 1, code = "required"))]
    pub description: Option<String>,
}

impl FormFields for PageForm {
    const REQUIRED: &'static [&'static str] = &["title", "type", "description"];
}

impl ResourceForm for PageForm {
    const SPEC: &'static ResourceSpec = &PAGES;

    fn into_fields(self) -> AppResult<Fields> {
        let mut fields = Fields::new();
        put_text(&mut fields, "title", self.title);
        put_text(&mut fields, "type", self.page_type);
        put_text(&mut fields, "description", self.description);
        Ok(fields)
    }
}
