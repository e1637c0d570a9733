use crate::database::{is_unique_violation, model::hall::HallRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    hall::{
        event::{CreateHall, UpdateHall},
        Hall,
    },
    id::HallId,
};
use kernel::repository::hall::HallRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct HallRepositoryImpl {
    db: ConnectionPool,
}

const HALL_COLUMNS: &str = r#"
    hall_id, hall_name, capacity, base_price, weekend_rate, peak_rate,
    features, created_at, updated_at
"#;

#[async_trait]
impl HallRepository for HallRepositoryImpl {
    async fn create(&self, event: CreateHall) -> AppResult<Hall> {
        let sql = format!(
            r#"
                INSERT INTO halls
                (hall_id, hall_name, capacity, base_price, weekend_rate, peak_rate, features)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING {HALL_COLUMNS}
            "#
        );
        sqlx::query_as::<_, HallRow>(&sql)
            .bind(&event.hall_id)
            .bind(&event.hall_name)
            .bind(event.capacity)
            .bind(event.rates.base_price)
            .bind(event.rates.weekend_rate)
            .bind(event.rates.peak_rate)
            .bind(&event.features)
            .fetch_one(self.db.inner_ref())
            .await
            .map(Hall::from)
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict(format!("Hall {} already exists", event.hall_id))
                } else {
                    AppError::SpecificOperationError(e)
                }
            })
    }

    async fn update(&self, hall_id: HallId, event: UpdateHall) -> AppResult<Hall> {
        // 指定されなかった項目は現在の値を維持する
        let sql = format!(
            r#"
                UPDATE halls SET
                    hall_name = COALESCE($2, hall_name),
                    capacity = COALESCE($3, capacity),
                    base_price = COALESCE($4, base_price),
                    weekend_rate = COALESCE($5, weekend_rate),
                    peak_rate = COALESCE($6, peak_rate),
                    features = COALESCE($7, features)
                WHERE hall_id = $1
                RETURNING {HALL_COLUMNS}
            "#
        );
        sqlx::query_as::<_, HallRow>(&sql)
            .bind(&hall_id)
            .bind(event.hall_name)
            .bind(event.capacity)
            .bind(event.base_price)
            .bind(event.weekend_rate)
            .bind(event.peak_rate)
            .bind(event.features)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(Hall::from)
            .ok_or_else(|| AppError::EntityNotFound(format!("Hall {hall_id} not found")))
    }

    async fn find_all(&self) -> AppResult<Vec<Hall>> {
        let sql = format!("SELECT {HALL_COLUMNS} FROM halls ORDER BY hall_id ASC");
        sqlx::query_as::<_, HallRow>(&sql)
            .fetch_all(self.db.inner_ref())
            .await
            .map(|rows| rows.into_iter().map(Hall::from).collect())
            .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_id(&self, hall_id: &HallId) -> AppResult<Option<Hall>> {
        let sql = format!("SELECT {HALL_COLUMNS} FROM halls WHERE hall_id = $1");
        sqlx::query_as::<_, HallRow>(&sql)
            .bind(hall_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map(|row| row.map(Hall::from))
            .map_err(AppError::SpecificOperationError)
    }
}
