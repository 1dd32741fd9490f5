use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A contact record as stored and served.
///
/// `tags` preserves insertion order and permits duplicates; the filtering
/// engine treats it as a bag, not a set. Timestamps are owned by the
/// database: `created_at` is set once, `updated_at` refreshed on every
/// mutation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account row. Not serializable on purpose — the password hash must never
/// leave the database layer; responses go through [`UserProfile`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// The public projection of a [`User`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Sortable contact columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Name,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortBy {
    /// Tolerant parse for callers outside the validated request path:
    /// anything outside the enumerated set falls back to `createdAt`.
    pub fn from_param(value: &str) -> Self {
        match value {
            "name" => Self::Name,
            "updatedAt" => Self::UpdatedAt,
            _ => Self::CreatedAt,
        }
    }

    /// The column this sort key maps to. Static strings only — sort input
    /// never reaches SQL text directly.
    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn from_param(value: &str) -> Self {
        match value {
            "asc" => Self::Asc,
            _ => Self::Desc,
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Pagination block returned alongside every contact page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl PageMeta {
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        let total_pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self {
            total,
            page,
            limit,
            total_pages,
        }
    }
}

/// One page of contacts plus its pagination block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactPage {
    pub contacts: Vec<Contact>,
    pub pagination: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(PageMeta::new(21, 1, 10).total_pages, 3);
        assert_eq!(PageMeta::new(20, 1, 10).total_pages, 2);
        assert_eq!(PageMeta::new(1, 1, 10).total_pages, 1);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        assert_eq!(PageMeta::new(0, 1, 10).total_pages, 0);
    }

    #[test]
    fn unknown_sort_param_falls_back_to_created_at() {
        assert_eq!(SortBy::from_param("popularity"), SortBy::CreatedAt);
        assert_eq!(SortBy::from_param(""), SortBy::CreatedAt);
        assert_eq!(SortBy::from_param("name"), SortBy::Name);
        assert_eq!(SortBy::from_param("updatedAt"), SortBy::UpdatedAt);
    }

    #[test]
    fn sort_order_defaults_to_desc() {
        assert_eq!(SortOrder::from_param("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::from_param("descending"), SortOrder::Desc);
    }
}
