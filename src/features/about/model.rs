use crate::domain::{Column, Fields, FileSlot, ResourceSpec, SortOrder};
use crate::error::AppResult;
use crate::features::crud::ResourceForm;
use crate::features::form::{FormFields, put_text};
use serde::Deserialize;
use validator::Validate;

// a single row; the UNIQUE `singleton` column rejects a second insert
pub static ABOUT: ResourceSpec = ResourceSpec {
    label: "About",
    table: "abouts",
    columns: &[
        Column::text("title"),
        Column::text("description"),
        Column::text("image"),
    ],
    file: Some(FileSlot {
        column: "image",
        required: true,
    }),
    slug_from: None,
    joins: &[],
    order_by: SortOrder::IdAsc,
    update_conflict: None,
};

#[derive(Debug, Deserialize, Validate)]
pub struct AboutForm {
    #[validate(length(min = 1, code = "required"))]
    pub title: Option<String>,
    #[validate(length(min = 1, code = "required"))]
    pub description: Option<String>,
}

impl FormFields for AboutForm {
    const REQUIRED: &'static [&'static str] = &["title", "description"];
}

impl ResourceForm for AboutForm {
    const SPEC: &'static ResourceSpec = &ABOUT;

    fn into_fields(self) -> AppResult<Fields> {
        let mut fields = Fields::new();
        put_text(&mut fields, "title", self.title);
        put_text(&mut fields, "description", self.description);
        Ok(fields)
    }
}
