use crate::domain::{Column, Fields, FileSlot, ResourceSpec, SortOrder};
use crate::error::AppResult;
use crate::features::crud::ResourceForm;
use crate::features::form::{FormFields, put_text};
use serde::Deserialize;
use validator::Validate;

pub static SERVICES: ResourceSpec = ResourceSpec {
    label: "Service",
    table: "services",
    columns: &[
        Column::text("title"),
        Column::text("slug"),
        Column::text("description"),
        Column::text("icon"),
    ],
    file: Some(FileSlot {
        column: "icon",
        required: true,
    }),
    slug_from: Some("title"),
    joins: &[],
    order_by: SortOrder::IdAsc,
    update_conflict: None,
};

#[derive(Debug, Deserialize, Validate)]
pub struct ServiceForm {
    #[validate(length(min = 1, code = "required"))]
    pub title: Option<String>,
    #[validate(length(min = 1, code = "required"))]
    pub description: Option<String>,
}

impl FormFields for ServiceForm {
    const REQUIRED: &'static [&'static str] = &["title", "description"];
}

impl ResourceForm for ServiceForm {
    const SPEC: &'static ResourceSpec = &SERVICES;

    fn into_fields(self) -> AppResult<Fields> {
        let mut fields = Fields::new();
        put_text(&mut fields, "title", self.title);
        put_text(&mut fields, "description", self.description);
        Ok(fields)
    }
}
