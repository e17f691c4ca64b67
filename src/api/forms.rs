//! Form-encoded action bodies, decoded and validated before they reach the
//! store.
//!
//! Bodies are `application/x-www-form-urlencoded`. Repeated keys are kept in
//! order, which is how the update action carries its parallel `id[]`,
//! `name[]` and `email[]` lists.

use crate::domain::{NewRecord, RecordId, RecordUpdate};
use thiserror::Error;

/// Validation failure for an action body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("missing field: {0}")]
    Missing(String),
    #[error("field must not be empty: {0}")]
    Empty(String),
    #[error("invalid id: {0:?}")]
    InvalidId(String),
    #[error("mismatched update fields: {ids} ids, {names} names, {emails} emails")]
    LengthMismatch {
        ids: usize,
        names: usize,
        emails: usize,
    },
}

/// Decoded key/value pairs of a form body.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn parse(body: &[u8]) -> Self {
        let pairs = url::form_urlencoded::parse(body)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in body order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    fn required(&self, key: &str) -> Result<&str, FormError> {
        let value = self
            .get(key)
            .ok_or_else(|| FormError::Missing(key.to_string()))?;
        non_empty(key, value)
    }
}

fn non_empty<'a>(key: &str, value: &'a str) -> Result<&'a str, FormError> {
    if value.trim().is_empty() {
        return Err(FormError::Empty(key.to_string()));
    }
    Ok(value)
}

fn parse_id(value: &str) -> Result<RecordId, FormError> {
    value
        .parse::<RecordId>()
        .map_err(|_| FormError::InvalidId(value.to_string()))
}

/// Body of the create action: `name`, `email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateForm {
    pub name: String,
    pub email: String,
}

impl CreateForm {
    pub fn from_fields(fields: &FormFields) -> Result<Self, FormError> {
        Ok(Self {
            name: fields.required("name")?.to_string(),
            email: fields.required("email")?.to_string(),
        })
    }

    pub fn into_record(self) -> NewRecord {
        NewRecord::new(self.name, self.email)
    }
}

/// Body of the delete action: `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteForm {
    pub id: RecordId,
}

impl DeleteForm {
    pub fn from_fields(fields: &FormFields) -> Result<Self, FormError> {
        Ok(Self {
            id: parse_id(fields.required("id")?)?,
        })
    }
}

/// Body of the update action: parallel `id[]`, `name[]`, `email[]` lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateForm {
    pub rows: Vec<RecordUpdate>,
}

impl UpdateForm {
    pub fn from_fields(fields: &FormFields) -> Result<Self, FormError> {
        let ids = fields.get_all("id[]");
        let names = fields.get_all("name[]");
        let emails = fields.get_all("email[]");

        if ids.len() != names.len() || ids.len() != emails.len() {
            return Err(FormError::LengthMismatch {
                ids: ids.len(),
                names: names.len(),
                emails: emails.len(),
            });
        }

        let rows = ids
            .into_iter()
            .zip(names)
            .zip(emails)
            .map(|((id, name), email)| {
                Ok(RecordUpdate {
                    id: parse_id(id)?,
                    name: non_empty("name[]", name)?.to_string(),
                    email: non_empty("email[]", email)?.to_string(),
                })
            })
            .collect::<Result<Vec<_>, FormError>>()?;

        Ok(Self { rows })
    }
}
