use crate::database::ConnectionPool;
use shared::error::{AppError, AppResult};

struct DefaultHall {
    hall_id: &'static str,
    hall_name: &'static str,
    capacity: i32,
    base_price: i64,
    weekend_rate: i64,
    peak_rate: i64,
    features: &'static str,
}

const DEFAULT_HALLS: [DefaultHall; 2] = [
    DefaultHall {
        hall_id: "hall1",
        hall_name: "Hall 1 (Small)",
        capacity: 10,
        base_price: 1000,
        weekend_rate: 200,
        peak_rate: 300,
        features: "Cozy atmosphere, Modern audio system, Comfortable seating, Basic decorations included",
    },
    DefaultHall {
        hall_id: "hall2",
        hall_name: "Hall 2 (Large)",
        capacity: 30,
        base_price: 2000,
        weekend_rate: 400,
        peak_rate: 600,
        features: "Spacious layout, Premium sound system, Projector setup, Custom decoration options",
    },
];

/// Inserts the default halls when the table is empty. Returns the number of rows added.
pub async fn seed_default_halls(db: &ConnectionPool) -> AppResult<u64> {
    let mut tx = db.begin().await?;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM halls")
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
    if count > 0 {
        return Ok(0);
    }

    let mut inserted = 0;
    for hall in DEFAULT_HALLS.iter() {
        let res = sqlx::query(
            r#"
                INSERT INTO halls
                (hall_id, hall_name, capacity, base_price, weekend_rate, peak_rate, features)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (hall_id) DO NOTHING
            "#,
        )
        .bind(hall.hall_id)
        .bind(hall.hall_name)
        .bind(hall.capacity)
        .bind(hall.base_price)
        .bind(hall.weekend_rate)
        .bind(hall.peak_rate)
        .bind(hall.features)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        inserted += res.rows_affected();
    }

    tx.commit().await.map_err(AppError::TransactionError)?;
    tracing::info!(inserted, "seeded default halls");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "../migrations")]
    async fn seeds_only_an_empty_table(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        assert_eq!(seed_default_halls(&db).await?, 2);
        assert_eq!(seed_default_halls(&db).await?, 0);

        let base: i64 = sqlx::query_scalar("SELECT base_price FROM halls WHERE hall_id = 'hall2'")
            .fetch_one(db.inner_ref())
            .await?;
        assert_eq!(base, 2000);
        Ok(())
    }
}
