use crate::domain::{FieldValue, Fields};
use crate::error::{AppError, AppResult, field_messages};
use crate::services::Upload;
use axum::{
    Form,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use validator::{Validate, ValidationError};

/// Whether missing fields are an error (create) or mean "leave unchanged" (update).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update,
}

/// A form body that can be validated into a typed struct.
pub trait FormFields: DeserializeOwned + Validate {
    /// Fields that must be submitted on create.
    const REQUIRED: &'static [&'static str];
}

/// Text fields and file parts of a `multipart/form-data` or urlencoded body.
#[derive(Debug, Default)]
pub struct FormData {
    pub fields: HashMap<String, String>,
    pub files: HashMap<String, Upload>,
}

impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            return Ok(FormData {
                fields,
                files: HashMap::new(),
            });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        let mut form = FormData::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read {name}: {e}")))?;
                    // an untouched file input still sends an empty part
                    if !file_name.is_empty() && !bytes.is_empty() {
                        form.files.insert(name, Upload { file_name, bytes });
                    }
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read {name}: {e}")))?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }
}

impl FormData {
    /// Deserializes and validates the text fields, reporting every failing field at once.
    pub fn parse<T: FormFields>(&self, mode: Mode) -> AppResult<T> {
        let value = serde_json::to_value(&self.fields)
            .map_err(|e| AppError::Validation(format!("Invalid form data: {e}")))?;
        let form: T = serde_json::from_value(value)
            .map_err(|e| AppError::Validation(format!("Invalid form data: {e}")))?;

        let mut errors = match form.validate() {
            Ok(()) => Vec::new(),
            Err(e) => field_messages(&e),
        };

        if mode == Mode::Create {
            errors.extend(
                T::REQUIRED
                    .iter()
                    .filter(|field| !self.fields.contains_key(**field))
                    .map(|field| format!("{field} is required")),
            );
        }

        if !errors.is_empty() {
            errors.sort();
            errors.dedup();
            return Err(AppError::InvalidFields(errors));
        }

        Ok(form)
    }

    pub fn take_file(&mut self, name: Option<&str>) -> Option<Upload> {
        name.and_then(|name| self.files.remove(name))
    }
}

pub fn numeric(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<i64>() {
        Ok(_) => Ok(()),
        Err(_) => Err(ValidationError::new("numeric")),
    }
}

pub fn put_text(fields: &mut Fields, column: &str, value: Option<String>) {
    if let Some(value) = value {
        fields.insert(column.to_string(), FieldValue::Text(value));
    }
}

pub fn put_integer(fields: &mut Fields, column: &str, value: Option<String>) -> AppResult<()> {
    if let Some(value) = value {
        let parsed = value
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::InvalidFields(vec![format!("{column} is numeric")]))?;
        fields.insert(column.to_string(), FieldValue::Integer(parsed));
    }
    Ok(())
}
