use crate::domain::{Access, Column, Fields, FileSlot, Join, ResourceSpec, SortOrder};
use crate::error::AppResult;
use crate::features::crud::ResourceForm;
use crate::features::form::{FormFields, numeric, put_integer, put_text};
use serde::Deserialize;
use validator::Validate;

pub static ARTICLES: ResourceSpec = ResourceSpec {
    label: "Article",
    table: "articles",
    columns: &[
        Column::text("title"),
        Column::text("slug"),
        Column::integer("user_id"),
        Column::integer("category_id"),
        Column::text("description"),
        Column::text("thumbnail"),
        Column::integer("views").access(Access::ReadOnly),
    ],
    file: Some(FileSlot {
        column: "thumbnail",
        required: true,
    }),
    slug_from: Some("title"),
    joins: &[
        Join {
            column: "user_id",
            table: "users",
            display: "name",
            alias: "user",
        },
        Join {
            column: "category_id",
            table: "category_articles",
            display: "category",
            alias: "category",
        },
    ],
    order_by: SortOrder::NewestFirst,
    update_conflict: None,
};

#[derive(Debug, Deserialize, Validate)]
pub struct ArticleForm {
    #[validate(length(min = 1, code = "required"))]
    pub title: Option<String>,
    #[validate(custom(function = "numeric"))]
    pub user_id: Option<String>,
    #[validate(custom(function = "numeric"))]
    pub category_id: Option<String>,
    #[validate(length(min = 1, code = "required"))]
    pub description: Option<String>,
}

impl FormFields for ArticleForm {
    const REQUIRED: &'static [&'static str] = &["title", "user_id", "category_id", "description"];
}

impl ResourceForm for ArticleForm {
    const SPEC: &'static ResourceSpec = &ARTICLES;

    // slug is derived from the title by the manager
    fn into_fields(self) -> AppResult<Fields> {
        let mut fields = Fields::new();
        put_text(&mut fields, "title", self.title);
        put_integer(&mut fields, "user_id", self.user_id)?;
        put_integer(&mut fields, "category_id", self.category_id)?;
        put_text(&mut fields, "description", self.description);
        Ok(fields)
    }
}
