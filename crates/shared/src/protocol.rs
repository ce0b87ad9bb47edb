use serde::Deserialize;

use crate::{domain::NewIntern, error::ValidationError};

/// Body of `POST /registration`. Every field is optional at the wire level so
/// absence surfaces as a [`ValidationError`] instead of a rejected extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub dept: Option<String>,
}

impl RegistrationForm {
    pub fn validate(self) -> Result<NewIntern, ValidationError> {
        Ok(NewIntern {
            name: required("name", self.name)?,
            email: required("email", self.email)?,
            department: required("dept", self.dept)?,
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}
