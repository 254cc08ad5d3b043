use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::SqlitePool;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::DisplayName;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::ports::IdentityRepository;

pub struct SqliteIdentityRepository {
    pool: SqlitePool,
}

impl SqliteIdentityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct IdentityRow {
    id: i64,
    name: String,
    email: String,
    secret_hash: String,
    is_admin: bool,
}

impl TryFrom<IdentityRow> for Identity {
    type Error = IdentityError;

    fn try_from(row: IdentityRow) -> Result<Self, Self::Error> {
        Ok(Identity {
            id: IdentityId(row.id),
            name: DisplayName::new(row.name)?,
            email: EmailAddress::new(row.email)?,
            secret_hash: row.secret_hash,
            is_admin: row.is_admin,
        })
    }
}

/// The only unique constraint on `identities` is the email one.
fn map_write_error(error: sqlx::Error, email: &EmailAddress) -> IdentityError {
    if let Some(db_err) = error.as_database_error() {
        if db_err.is_unique_violation() {
            return IdentityError::EmailAlreadyExists(email.as_str().to_string());
        }
    }
    IdentityError::DatabaseError(error.to_string())
}

#[async_trait]
impl IdentityRepository for SqliteIdentityRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, name, email, secret_hash, is_admin
            FROM identities
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        row.map(Identity::try_from).transpose()
    }

    async fn find_by_id(&self, id: IdentityId) -> Result<Option<Identity>, IdentityError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, name, email, secret_hash, is_admin
            FROM identities
            WHERE id = ?1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        row.map(Identity::try_from).transpose()
    }

    async fn insert(&self, identity: NewIdentity) -> Result<IdentityId, IdentityError> {
        let result = sqlx::query(
            r#"
            INSERT INTO identities (name, email, secret_hash, is_admin)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(identity.name.as_str())
        .bind(identity.email.as_str())
        .bind(&identity.secret_hash)
        .bind(identity.is_admin)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &identity.email))?;

        Ok(IdentityId(result.last_insert_rowid()))
    }

    async fn replace(&self, identity: &Identity) -> Result<(), IdentityError> {
        let result = sqlx::query(
            r#"
            UPDATE identities
            SET name = ?2, email = ?3, is_admin = ?4
            WHERE id = ?1
            "#,
        )
        .bind(identity.id.0)
        .bind(identity.name.as_str())
        .bind(identity.email.as_str())
        .bind(identity.is_admin)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &identity.email))?;

        if result.rows_affected() == 0 {
            return Err(IdentityError::NotFound(identity.id.to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: IdentityId) -> Result<(), IdentityError> {
        sqlx::query(
            r#"
            DELETE FROM identities
            WHERE id = ?1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Identity>, IdentityError> {
        let rows = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, name, email, secret_hash, is_admin
            FROM identities
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Identity::try_from).collect()
    }
}
