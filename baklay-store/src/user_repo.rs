use async_trait::async_trait;
use baklay_core::repository::UserRepository;
use baklay_core::{CoreResult, DomainError, NewUser, User, UserCredentials};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::{is_unique_violation, storage};
use crate::rows::{CredentialsRow, UserRow};
use crate::sql;

pub struct StoreUserRepository {
    pool: SqlitePool,
}

impl StoreUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for StoreUserRepository {
    async fn find_credentials(&self, email: &str) -> CoreResult<Option<UserCredentials>> {
        let row: Option<CredentialsRow> = sqlx::query_as(sql::USER_CREDENTIALS_BY_EMAIL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;

        row.map(|row| {
            Ok(UserCredentials {
                user: row.user.into_user()?,
                password_hash: row.password_hash,
            })
        })
        .transpose()
    }

    async fn email_exists(&self, email: &str) -> CoreResult<bool> {
        sqlx::query_scalar(sql::USER_EMAIL_EXISTS)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(storage)
    }

    async fn create_user(&self, user: &NewUser) -> CoreResult<i64> {
        let result = sqlx::query(sql::INSERT_USER)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.contact)
            .bind(user.user_type.as_str())
            .bind(&user.password_hash)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::Conflict("Email already exists.".to_string())
                } else {
                    storage(e)
                }
            })?;

        let id = result.last_insert_rowid();
        info!("Registered {} account {} ({})", user.user_type, id, user.email);
        Ok(id)
    }

    async fn list_users(&self) -> CoreResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(sql::LIST_USERS)
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;
        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn approve_user(&self, id: i64) -> CoreResult<()> {
        let result = sqlx::query(sql::APPROVE_USER)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("User ID {}", id)));
        }
        info!("Approved user {}", id);
        Ok(())
    }

    async fn list_approved_guides(&self) -> CoreResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(sql::LIST_APPROVED_GUIDES)
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;
        rows.into_iter().map(UserRow::into_user).collect()
    }
}
