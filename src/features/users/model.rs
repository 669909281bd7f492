use crate::domain::{Access, Column, Fields, FileSlot, ResourceSpec, SortOrder};
use crate::error::AppResult;
use crate::features::crud::ResourceForm;
use crate::features::form::{FormFields, put_text};
use crate::services::auth::hash_password;
use serde::Deserialize;
use validator::Validate;

pub static USERS: ResourceSpec = ResourceSpec {
    label: "User",
    table: "users",
    columns: &[
        Column::text("name"),
        Column::text("email"),
        Column::text("password").access(Access::WriteOnly),
        Column::text("role"),
        Column::text("profile"),
    ],
    file: Some(FileSlot {
        column: "profile",
        required: true,
    }),
    slug_from: None,
    joins: &[],
    order_by: SortOrder::IdAsc,
    update_conflict: Some("Email already exists"),
};

/// Roles left out of the non-admin listing.
pub const ADMIN_ROLES: &[&str] = &["admin", "superadmin"];

#[derive(Debug, Deserialize, Validate)]
pub struct UserForm {
    #[validate(length(min = 1, code = "required"))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 6))]
    pub password: Option<String>,
    #[validate(length(min = 1, code = "required"))]
    pub role: Option<String>,
}

impl FormFields for UserForm {
    const REQUIRED: &'static [&'static str] = &["name", "email", "password", "role"];
}

impl ResourceForm for UserForm {
    const SPEC: &'static ResourceSpec = &USERS;

    // the plain password never leaves this function
    fn into_fields(self) -> AppResult<Fields> {
        let mut fields = Fields::new();
        put_text(&mut fields, "name", self.name);
        put_text(&mut fields, "email", self.email);
        put_text(&mut fields, "role", self.role);

        if let Some(password) = self.password {
            fields.insert("password".to_string(), hash_password(&password)?.into());
        }

        Ok(fields)
    }
}
