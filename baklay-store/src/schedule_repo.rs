use async_trait::async_trait;
use baklay_core::repository::ScheduleRepository;
use baklay_core::{validation, CoreResult, DomainError, NewSchedule, ScheduleView};
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::{is_foreign_key_violation, storage};
use crate::rows::ScheduleRow;
use crate::sql;

pub struct StoreScheduleRepository {
    pool: SqlitePool,
}

impl StoreScheduleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleRepository for StoreScheduleRepository {
    async fn create_schedule(&self, schedule: &NewSchedule) -> CoreResult<i64> {
        validation::capacity(schedule.capacity)?;

        let mut tx = self.pool.begin().await.map_err(storage)?;

        if let Some(guide_id) = schedule.guide_id {
            let eligible: bool = sqlx::query_scalar(sql::APPROVED_GUIDE_EXISTS)
                .bind(guide_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(storage)?;
            if !eligible {
                return Err(DomainError::NotFound(format!("Approved guide ID {}", guide_id)));
            }
        }

        let result = sqlx::query(sql::INSERT_SCHEDULE)
            .bind(schedule.trek_id)
            .bind(schedule.date)
            .bind(schedule.capacity)
            .bind(schedule.guide_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    DomainError::NotFound(format!("Trek ID {}", schedule.trek_id))
                } else {
                    storage(e)
                }
            })?;

        tx.commit().await.map_err(storage)?;

        let id = result.last_insert_rowid();
        info!(
            "Scheduled trek {} on {} with capacity {} (schedule {})",
            schedule.trek_id, schedule.date, schedule.capacity, id
        );
        Ok(id)
    }

    async fn list_schedules(&self) -> CoreResult<Vec<ScheduleView>> {
        let rows: Vec<ScheduleRow> = sqlx::query_as(sql::LIST_SCHEDULES)
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;
        Ok(rows.into_iter().map(ScheduleView::from).collect())
    }

    async fn list_available(&self, from: NaiveDate) -> CoreResult<Vec<ScheduleView>> {
        let rows: Vec<ScheduleRow> = sqlx::query_as(sql::LIST_AVAILABLE_SCHEDULES)
            .bind(from)
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;
        Ok(rows.into_iter().map(ScheduleView::from).collect())
    }

    async fn get_schedule(&self, id: i64) -> CoreResult<Option<ScheduleView>> {
        let row: Option<ScheduleRow> = sqlx::query_as(sql::SCHEDULE_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        Ok(row.map(ScheduleView::from))
    }
}
