use crate::domain::{Column, Fields, FileSlot, ResourceSpec, SortOrder};
use crate::error::AppResult;
use crate::features::crud::ResourceForm;
use crate::features::form::{FormFields, put_text};
use serde::Deserialize;
use validator::Validate;

pub static PORTFOLIOS: ResourceSpec = ResourceSpec {
    label: "Portfolio",
    table: "portfolios",
    columns: &[
        Column::text("title"),
        Column::text("url"),
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
pub struct PortfolioForm {
    #[validate(length(min = 1, code = "required"))]
    pub title: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
}

impl FormFields for PortfolioForm {
    const REQUIRED: &'static [&'static str] = &["title", "url"];
}

impl ResourceForm for PortfolioForm {
    const SPEC: &'static ResourceSpec = &PORTFOLIOS;

    fn into_fields(self) -> AppResult<Fields> {
        let mut fields = Fields::new();
        put_text(&mut fields, "title", self.title);
        put_text(&mut fields, "url", self.url);
        Ok(fields)
    }
}
