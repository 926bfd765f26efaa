use async_trait::async_trait;
use baklay_core::repository::TrekRepository;
use baklay_core::{CoreResult, DomainError, NewTrek, Trek};
use sqlx::SqlitePool;
use tracing::info;

use crate::error::{is_foreign_key_violation, storage};
use crate::rows::TrekRow;
use crate::sql;

pub struct StoreTrekRepository {
    pool: SqlitePool,
}

impl StoreTrekRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrekRepository for StoreTrekRepository {
    async fn create_trek(&self, trek: &NewTrek) -> CoreResult<i64> {
        if trek.price_centavos <= 0 {
            return Err(DomainError::Validation(
                "Price must be greater than zero.".to_string(),
            ));
        }

        let result = sqlx::query(sql::INSERT_TREK)
            .bind(&trek.code)
            .bind(&trek.description)
            .bind(&trek.difficulty)
            .bind(trek.price_centavos)
            .execute(&self.pool)
            .await
            .map_err(storage)?;

        let id = result.last_insert_rowid();
        info!("Added trek {} ({})", id, trek.code);
        Ok(id)
    }

    async fn list_treks(&self) -> CoreResult<Vec<Trek>> {
        let rows: Vec<TrekRow> = sqlx::query_as(sql::LIST_TREKS)
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;
        Ok(rows.into_iter().map(Trek::from).collect())
    }

    async fn get_trek(&self, id: i64) -> CoreResult<Option<Trek>> {
        let row: Option<TrekRow> = sqlx::query_as(sql::TREK_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        Ok(row.map(Trek::from))
    }

    async fn update_description(&self, id: i64, description: &str) -> CoreResult<()> {
        let result = sqlx::query(sql::UPDATE_TREK_DESCRIPTION)
            .bind(description)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("Trek ID {}", id)));
        }
        info!("Updated description of trek {}", id);
        Ok(())
    }

    async fn delete_trek(&self, id: i64) -> CoreResult<()> {
        let result = sqlx::query(sql::DELETE_TREK)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    DomainError::Conflict(format!(
                        "Trek ID {} still has schedules and cannot be deleted.",
                        id
                    ))
                } else {
                    storage(e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("Trek ID {}", id)));
        }
        info!("Deleted trek {}", id);
        Ok(())
    }
}
