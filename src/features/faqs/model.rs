use crate::domain::{Column, Fields, Join, ResourceSpec, SortOrder};
use crate::error::AppResult;
use crate::features::crud::ResourceForm;
use crate::features::form::{FormFields, numeric, put_integer, put_text};
use serde::Deserialize;
use validator::Validate;

pub static FAQS: ResourceSpec = ResourceSpec {
    label: "Faq",
    table: "faqs",
    columns: &[
        Column::text("question"),
        Column::text("answer"),
        Column::integer("category_id"),
    ],
    file: None,
    slug_from: None,
    joins: &[Join {
        column: "category_id",
        table: "category_faqs",
        display: "category",
        alias: "category",
    }],
    order_by: SortOrder::NewestFirst,
    update_conflict: None,
};

#[derive(Debug, Deserialize, Validate)]
pub struct FaqForm {
    #[validate(length(min = 1, code = "required"))]
    pub question: Option<String>,
    #[validate(length(min = 1, code = "required"))]
    pub answer: Option<String>,
    #[validate(custom(function = "numeric"))]
    pub category_id: Option<String>,
}

impl FormFields for FaqForm {
    const REQUIRED: &'static [&'static str] = &["question", "answer", "category_id"];
}

impl ResourceForm for FaqForm {
    const SPEC: &'static ResourceSpec = &FAQS;

    fn into_fields(self) -> AppResult<Fields> {
        let mut fields = Fields::new();
        put_text(&mut fields, "question", self.question);
        put_text(&mut fields, "answer", self.answer);
        put_integer(&mut fields, "category_id", self.category_id)?;
        Ok(fields)
    }
}
