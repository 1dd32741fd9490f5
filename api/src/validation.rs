//! Request shape validation.
//!
//! Each operation declares its shape as a raw deserialization target plus a
//! `validate` step that either yields a normalized, typed request or a list
//! of field errors. Paths point into the request (`body.*`, `query.*`,
//! `params.*`). Validation is pure and runs before any persistence access.

use serde::{Deserialize, Serialize};
use shared::{SortBy, SortOrder};
use uuid::Uuid;

/// One offending field: where it is and what is wrong with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

/// Accumulates field errors across a shape check.
#[derive(Debug, Default)]
pub struct Check {
    errors: Vec<FieldError>,
}

impl Check {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, path: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            path: path.to_string(),
            message: message.into(),
        });
    }

    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Path `:id` parameter. Malformed ids are a validation failure, not a 404.
pub fn parse_id(raw: &str) -> Result<Uuid, Vec<FieldError>> {
    Uuid::parse_str(raw).map_err(|_| {
        vec![FieldError {
            path: "params.id".to_string(),
            message: "id must be a valid UUID".to_string(),
        }]
    })
}

// ─── Contact bodies ──────────────────────────────────────────────────────────

/// Declared shape for POST /api/contacts. `name` is required; everything
/// else is optional. Fields are `Option` here so a missing `name` surfaces
/// as a field error rather than a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Normalized create request. `tags` defaults to the empty sequence.
#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}

impl CreateContactBody {
    pub fn validate(self) -> Result<NewContact, Vec<FieldError>> {
        let mut check = Check::new();
        let name = match self.name {
            Some(ref n) if !n.trim().is_empty() => n.clone(),
            Some(_) => {
                check.fail("body.name", "name must be a non-empty string");
                String::new()
            }
            None => {
                check.fail("body.name", "name is required");
                String::new()
            }
        };
        check.finish()?;
        Ok(NewContact {
            name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            company: self.company,
            notes: self.notes,
            tags: self.tags.unwrap_or_default(),
        })
    }
}

/// Declared shape for PUT /api/contacts/:id — same fields, all optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Normalized partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl UpdateContactBody {
    pub fn validate(self) -> Result<ContactPatch, Vec<FieldError>> {
        let mut check = Check::new();
        if let Some(ref n) = self.name {
            if n.trim().is_empty() {
                check.fail("body.name", "name must be a non-empty string");
            }
        }
        check.finish()?;
        Ok(ContactPatch {
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            company: self.company,
            notes: self.notes,
            tags: self.tags,
        })
    }
}

// ─── List query ──────────────────────────────────────────────────────────────

/// Declared shape for GET /api/contacts. Everything arrives string-encoded
/// on the wire; numbers and enums are parsed here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListContactsQuery {
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub tags: Option<String>,
    pub is_favorite: Option<String>,
}

/// Validated list parameters. Pagination defaults are applied downstream by
/// the resolver; `None` here means "not supplied". `is_favorite` keeps the
/// raw value because the presence of the key itself is significant.
#[derive(Debug, Clone, Default)]
pub struct ListContactsParams {
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<SortBy>,
    pub order: Option<SortOrder>,
    pub tags: Option<String>,
    pub is_favorite: Option<String>,
}

fn parse_positive(
    check: &mut Check,
    path: &str,
    raw: Option<&str>,
) -> Option<i64> {
    let raw = raw?;
    match raw.parse::<i64>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            check.fail(path, "must be a positive integer");
            None
        }
    }
}

impl ListContactsQuery {
    pub fn validate(self) -> Result<ListContactsParams, Vec<FieldError>> {
        let mut check = Check::new();

        let page = parse_positive(&mut check, "query.page", self.page.as_deref());
        let limit = parse_positive(&mut check, "query.limit", self.limit.as_deref());

        let sort_by = match self.sort_by.as_deref() {
            None => None,
            Some("name") => Some(SortBy::Name),
            Some("createdAt") => Some(SortBy::CreatedAt),
            Some("updatedAt") => Some(SortBy::UpdatedAt),
            Some(_) => {
                check.fail("query.sortBy", "must be one of: name, createdAt, updatedAt");
                None
            }
        };

        let order = match self.order.as_deref() {
            None => None,
            Some("asc") => Some(SortOrder::Asc),
            Some("desc") => Some(SortOrder::Desc),
            Some(_) => {
                check.fail("query.order", "must be one of: asc, desc");
                None
            }
        };

        check.finish()?;
        Ok(ListContactsParams {
            search: self.search,
            page,
            limit,
            sort_by,
            order,
            tags: self.tags,
            is_favorite: self.is_favorite,
        })
    }
}

// ─── Auth bodies ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterBody {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl RegisterBody {
    pub fn validate(self) -> Result<Registration, Vec<FieldError>> {
        let mut check = Check::new();
        let email = require(&mut check, "body.email", self.email);
        let password = require(&mut check, "body.password", self.password);
        let name = require(&mut check, "body.name", self.name);
        check.finish()?;
        Ok(Registration { email, password, name })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginBody {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl LoginBody {
    pub fn validate(self) -> Result<Credentials, Vec<FieldError>> {
        let mut check = Check::new();
        let email = require(&mut check, "body.email", self.email);
        let password = require(&mut check, "body.password", self.password);
        check.finish()?;
        Ok(Credentials { email, password })
    }
}

fn require(check: &mut Check, path: &str, value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            check.fail(path, "is required and must be a non-empty string");
            String::new()
        }
    }
}
