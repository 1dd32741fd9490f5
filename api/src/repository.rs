//! Persistence adapters for contacts and users.
//!
//! Thin layer over the pool: each method is one record-scoped statement.
//! Not-found is reported as `Option::None` for reads; mutations that race a
//! concurrent delete surface sqlx's `RowNotFound`, which the error
//! normalizer maps to the same 404 as a failed existence check.

use shared::{Contact, User};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::filter::ContactFilter;
use crate::pagination::{PageRequest, SortSpec};
use crate::validation::{ContactPatch, NewContact};

#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns one page of matching contacts plus the total match count.
    /// Page and count queries share the exact same predicate.
    pub async fn list(
        &self,
        filter: &ContactFilter,
        page: PageRequest,
        sort: SortSpec,
    ) -> sqlx::Result<(Vec<Contact>, i64)> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM contacts WHERE 1=1");
        filter.push_predicate(&mut qb);
        // Tie-break on id so pages are stable when the sort key collides.
        qb.push(format!(" ORDER BY {}, id DESC", sort.order_by_sql()));
        qb.push(" LIMIT ");
        qb.push_bind(page.limit);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset());
        let contacts = qb.build_query_as::<Contact>().fetch_all(&self.pool).await?;

        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM contacts WHERE 1=1");
        filter.push_predicate(&mut count_qb);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((contacts, total))
    }

    pub async fn find(&self, id: Uuid) -> sqlx::Result<Option<Contact>> {
        sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create(&self, contact: NewContact) -> sqlx::Result<Contact> {
        sqlx::query_as::<_, Contact>(
            "INSERT INTO contacts (name, email, phone, address, company, notes, tags) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(contact.name)
        .bind(contact.email)
        .bind(contact.phone)
        .bind(contact.address)
        .bind(contact.company)
        .bind(contact.notes)
        .bind(contact.tags)
        .fetch_one(&self.pool)
        .await
    }

    /// Partial update: absent fields keep their stored value.
    pub async fn update(&self, id: Uuid, patch: ContactPatch) -> sqlx::Result<Contact> {
        sqlx::query_as::<_, Contact>(
            "UPDATE contacts SET \
                name = COALESCE($2, name), \
                email = COALESCE($3, email), \
                phone = COALESCE($4, phone), \
                address = COALESCE($5, address), \
                company = COALESCE($6, company), \
                notes = COALESCE($7, notes), \
                tags = COALESCE($8, tags), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.email)
        .bind(patch.phone)
        .bind(patch.address)
        .bind(patch.company)
        .bind(patch.notes)
        .bind(patch.tags)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn delete(&self, id: Uuid) -> sqlx::Result<()> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(())
    }

    pub async fn toggle_favorite(&self, id: Uuid) -> sqlx::Result<Contact> {
        sqlx::query_as::<_, Contact>(
            "UPDATE contacts SET is_favorite = NOT is_favorite, updated_at = now() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
    }
}

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, name) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .fetch_one(&self.pool)
        .await
    }
}
