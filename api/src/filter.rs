//! Contact filter builder.
//!
//! Turns the list-query filter axes (free-text search, tag containment,
//! favorite flag) into a normalized predicate description. Axes combine
//! with AND; an absent axis imposes no constraint. The same predicate is
//! pushed into both the page query and the count query, so the two can
//! never disagree.

use shared::Contact;
use sqlx::{Postgres, QueryBuilder};

/// Text fields covered by the search axis, in contact-column order.
const SEARCH_COLUMNS: &[&str] = &["name", "email", "phone", "address", "company", "notes"];

/// Normalized filter predicate over contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    /// Case-insensitive substring matched against any searchable field.
    /// `None` when the parameter was absent or empty.
    pub search: Option<String>,
    /// Every listed tag must be present on the contact (extra tags on the
    /// contact are fine). Empty means no tag constraint.
    pub tags: Vec<String>,
    /// `Some` whenever the `isFavorite` key was present at all; `"true"`
    /// parses to true, anything else to false.
    pub favorite: Option<bool>,
}

impl ContactFilter {
    /// Builds the filter from raw query values. Tolerates messy input:
    /// trailing commas and stray whitespace in `tags` are dropped, and an
    /// empty search string means "no filter", not "match nothing".
    pub fn from_params(
        search: Option<&str>,
        tags: Option<&str>,
        is_favorite: Option<&str>,
    ) -> Self {
        let search = search.filter(|s| !s.is_empty()).map(str::to_owned);
        let tags = tags
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();
        let favorite = is_favorite.map(|raw| raw == "true");
        Self {
            search,
            tags,
            favorite,
        }
    }

    /// Appends this predicate as `AND ...` clauses. The builder's base must
    /// already contain a WHERE clause (`WHERE 1=1` by convention). Used by
    /// both the page query and the count query.
    pub fn push_predicate(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if let Some(ref term) = self.search {
            let pattern = format!("%{}%", escape_like(term));
            qb.push(" AND (");
            for (i, column) in SEARCH_COLUMNS.iter().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                qb.push(*column);
                qb.push(" ILIKE ");
                qb.push_bind(pattern.clone());
            }
            qb.push(")");
        }

        if !self.tags.is_empty() {
            qb.push(" AND tags @> ");
            qb.push_bind(self.tags.clone());
        }

        if let Some(favorite) = self.favorite {
            qb.push(" AND is_favorite = ");
            qb.push_bind(favorite);
        }
    }

    /// Reference semantics of the predicate, used to state the filtering
    /// contract in tests without a database.
    pub fn matches(&self, contact: &Contact) -> bool {
        let search_ok = match &self.search {
            None => true,
            Some(term) => {
                let needle = term.to_lowercase();
                [
                    Some(contact.name.as_str()),
                    contact.email.as_deref(),
                    contact.phone.as_deref(),
                    contact.address.as_deref(),
                    contact.company.as_deref(),
                    contact.notes.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
            }
        };

        let tags_ok = self
            .tags
            .iter()
            .all(|wanted| contact.tags.iter().any(|have| have == wanted));

        let favorite_ok = self
            .favorite
            .map_or(true, |wanted| contact.is_favorite == wanted);

        search_ok && tags_ok && favorite_ok
    }
}

/// Escapes LIKE metacharacters so search terms match literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_search_is_no_filter() {
        let filter = ContactFilter::from_params(Some(""), None, None);
        assert_eq!(filter.search, None);
    }

    #[test]
    fn tags_split_and_trim_cleanly() {
        let filter = ContactFilter::from_params(None, Some(" work , friends,, "), None);
        assert_eq!(filter.tags, vec!["work".to_string(), "friends".to_string()]);
    }

    #[test]
    fn empty_tags_param_imposes_no_constraint() {
        let filter = ContactFilter::from_params(None, Some(""), None);
        assert!(filter.tags.is_empty());
    }

    #[test]
    fn favorite_key_presence_is_significant() {
        assert_eq!(ContactFilter::from_params(None, None, None).favorite, None);
        assert_eq!(
            ContactFilter::from_params(None, None, Some("true")).favorite,
            Some(true)
        );
        // Anything other than the literal "true" parses to false.
        assert_eq!(
            ContactFilter::from_params(None, None, Some("yes")).favorite,
            Some(false)
        );
        assert_eq!(
            ContactFilter::from_params(None, None, Some("")).favorite,
            Some(false)
        );
    }

    #[test]
    fn predicate_covers_all_search_columns() {
        let filter = ContactFilter::from_params(Some("ann"), None, None);
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM contacts WHERE 1=1");
        filter.push_predicate(&mut qb);
        let sql = qb.sql();
        for column in SEARCH_COLUMNS {
            assert!(sql.contains(&format!("{column} ILIKE ")), "missing {column}");
        }
    }

    #[test]
    fn page_and_count_predicates_are_identical() {
        let filter =
            ContactFilter::from_params(Some("ann"), Some("work,friends"), Some("true"));

        let mut page = QueryBuilder::<Postgres>::new("SELECT * FROM contacts WHERE 1=1");
        filter.push_predicate(&mut page);
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM contacts WHERE 1=1");
        filter.push_predicate(&mut count);

        let page_where = page.sql().trim_start_matches("SELECT * FROM contacts").to_string();
        let count_where = count
            .sql()
            .trim_start_matches("SELECT COUNT(*) FROM contacts")
            .to_string();
        assert_eq!(page_where, count_where);
    }

    #[test]
    fn absent_axes_add_no_clauses() {
        let filter = ContactFilter::default();
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM contacts WHERE 1=1");
        filter.push_predicate(&mut qb);
        assert_eq!(qb.sql(), "SELECT * FROM contacts WHERE 1=1");
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("50%_done\\"), "50\\%\\_done\\\\");
    }
}
