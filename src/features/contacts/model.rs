use crate::domain::{Column, Fields, ResourceSpec, SortOrder};
use crate::error::AppResult;
use crate::features::crud::ResourceForm;
use crate::features::form::{FormFields, put_text};
use serde::Deserialize;
use validator::Validate;

pub static CONTACTS: ResourceSpec = ResourceSpec {
    label: "Contact",
    table: "contacts",
    columns: &[
        Column::text("phone"),
        Column::text("email"),
        Column::text("address"),
        Column::text("office_operation"),
    ],
    file: None,
    slug_from: None,
    joins: &[],
    order_by: SortOrder::IdAsc,
    update_conflict: None,
};

#[derive(Debug, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, code = "required"))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, code = "required"))]
    pub address: Option<String>,
    #[validate(length(min = 1, code = "required"))]
    pub office_operation: Option<String>,
}

impl FormFields for ContactForm {
    const REQUIRED: &'static [&'static str] = &["phone", "email", "address", "office_operation"];
}

impl ResourceForm for ContactForm {
    const SPEC: &'static ResourceSpec = &CONTACTS;

    fn into_fields(self) -> AppResult<Fields> {
        let mut fields = Fields::new();
        put_text(&mut fields, "phone", self.phone);
        put_text(&mut fields, "email", self.email);
        put_text(&mut fields, "address", self.address);
        put_text(&mut fields, "office_operation", self.office_operation);
        Ok(fields)
    }
}
