use crate::database::{
    is_serialization_failure, is_unique_violation,
    model::{
        booking::{BookingRow, ReservedSlotRow},
        hall::HallRow,
    },
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    booking::{
        event::{CreateBooking, UpdateBookingStatus},
        slot::{find_conflict, ReservedSlot},
        Booking, BookingHall, BookingListOptions, BookingStatus, BookingStatusChange,
    },
    hall::Hall,
    id::{BookingId, HallId},
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};
use sqlx::types::chrono::{DateTime, NaiveDate, Utc};

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

const BOOKING_SELECT: &str = r#"
    SELECT
        b.booking_id, b.hall_id, h.hall_name,
        b.customer_name, b.customer_email, b.customer_phone,
        b.guest_count, b.event_date, b.start_time, b.end_time,
        b.special_requests, b.status, b.total_price,
        b.created_at, b.updated_at
    FROM bookings AS b
    INNER JOIN halls AS h USING (hall_id)
"#;

const RESERVED_SLOTS_SELECT: &str = r#"
    SELECT booking_id, event_date, start_time
    FROM bookings
    WHERE hall_id = $1
      AND event_date = $2
      AND status <> 'cancelled'
"#;

#[derive(sqlx::FromRow)]
struct CreatedAtRow {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn create(&self, event: CreateBooking) -> AppResult<Booking> {
        let mut attempt = 1;
        loop {
            match self.try_create(&event).await {
                Err(e) if is_retryable(&e) && attempt < MAX_CREATE_ATTEMPTS => {
                    tracing::debug!(attempt, hall_id = %event.hall_id, "serialization failure, retrying booking");
                    attempt += 1;
                }
                res => return res,
            }
        }
    }

    async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<BookingStatusChange> {
        let mut tx = self.db.begin().await?;

        // 同時に状態を変更されないよう行ロックを取る
        let sql = format!("{BOOKING_SELECT} WHERE b.booking_id = $1 FOR UPDATE OF b");
        let current: Booking = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(event.booking_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("Booking {} not found", event.booking_id))
            })?
            .try_into()?;

        let previous = current.status;
        let next = previous.transition_to(event.status)?;
        if next == previous {
            return Ok(BookingStatusChange {
                previous,
                booking: current,
            });
        }

        let updated_at: DateTime<Utc> = sqlx::query_scalar(
            r#"
                UPDATE bookings SET status = $2
                WHERE booking_id = $1
                RETURNING updated_at
            "#,
        )
        .bind(event.booking_id)
        .bind(next.to_string())
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(BookingStatusChange {
            previous,
            booking: Booking {
                status: next,
                updated_at,
                ..current
            },
        })
    }

    async fn find_all(&self, options: BookingListOptions) -> AppResult<Vec<Booking>> {
        let BookingListOptions { status, hall_id } = options;
        let sql = format!(
            r#"
                {BOOKING_SELECT}
                WHERE ($1::text IS NULL OR b.status = $1)
                  AND ($2::text IS NULL OR b.hall_id = $2)
                ORDER BY b.created_at DESC
            "#
        );
        sqlx::query_as::<_, BookingRow>(&sql)
            .bind(status.map(|s| s.to_string()))
            .bind(hall_id)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(Booking::try_from)
            .collect()
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let sql = format!("{BOOKING_SELECT} WHERE b.booking_id = $1");
        sqlx::query_as::<_, BookingRow>(&sql)
            .bind(booking_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(Booking::try_from)
            .transpose()
    }

    async fn find_reserved_slots(
        &self,
        hall_id: &HallId,
        event_date: NaiveDate,
    ) -> AppResult<Vec<ReservedSlot>> {
        sqlx::query_as::<_, ReservedSlotRow>(RESERVED_SLOTS_SELECT)
            .bind(hall_id)
            .bind(event_date)
            .fetch_all(self.db.inner_ref())
            .await
            .map(|rows| rows.into_iter().map(ReservedSlot::from).collect())
            .map_err(AppError::SpecificOperationError)
    }
}

impl BookingRepositoryImpl {
    // 空き確認から登録までを 1 回のトランザクションで行う
    async fn try_create(&self, event: &CreateBooking) -> AppResult<Booking> {
        let mut tx = self.db.begin().await?;

        // トランザクション分離レベルを SERIALIZABLE に設定する
        self.set_transaction_serializable(&mut tx).await?;

        // ① ホールの存在確認。料金の計算にもこの行を使う
        let hall = sqlx::query_as::<_, HallRow>(
            r#"
                SELECT hall_id, hall_name, capacity, base_price, weekend_rate, peak_rate,
                       features, created_at, updated_at
                FROM halls
                WHERE hall_id = $1
            "#,
        )
        .bind(&event.hall_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(Hall::from)
        .ok_or_else(|| AppError::EntityNotFound(format!("Hall {} not found", event.hall_id)))?;

        // ② 同じ日の有効な予約と時間帯が重ならないか確認
        let slot = event.slot();
        let reserved: Vec<ReservedSlot> = sqlx::query_as::<_, ReservedSlotRow>(RESERVED_SLOTS_SELECT)
            .bind(&event.hall_id)
            .bind(event.event_date)
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(ReservedSlot::from)
            .collect();
        if let Some(existing) = find_conflict(&slot, &reserved) {
            tracing::debug!(hall_id = %event.hall_id, %existing, "slot already reserved");
            return Err(slot_taken());
        }

        // ③ 料金を計算して登録する
        let booking_id = BookingId::new();
        let total_price = hall.rates.quote(event.event_date, event.start_time)?;
        let status = BookingStatus::Pending;
        let stamps = sqlx::query_as::<_, CreatedAtRow>(
            r#"
                INSERT INTO bookings
                (booking_id, hall_id, customer_name, customer_email, customer_phone,
                 guest_count, event_date, start_time, end_time, special_requests,
                 status, total_price)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                RETURNING created_at, updated_at
            "#,
        )
        .bind(booking_id)
        .bind(&event.hall_id)
        .bind(&event.customer_name)
        .bind(&event.customer_email)
        .bind(&event.customer_phone)
        .bind(event.guest_count)
        .bind(event.event_date)
        .bind(event.start_time)
        .bind(slot.end_time())
        .bind(&event.special_requests)
        .bind(status.to_string())
        .bind(total_price)
        .fetch_one(&mut *tx)
        .await
        .map_err(slot_write_error)?;

        tx.commit().await.map_err(|e| {
            if is_unique_violation(&e) {
                slot_taken()
            } else {
                AppError::TransactionError(e)
            }
        })?;

        Ok(Booking {
            booking_id,
            customer_name: event.customer_name.clone(),
            customer_email: event.customer_email.clone(),
            customer_phone: event.customer_phone.clone(),
            guest_count: event.guest_count,
            event_date: event.event_date,
            start_time: event.start_time,
            end_time: slot.end_time(),
            special_requests: event.special_requests.clone(),
            status,
            total_price,
            created_at: stamps.created_at,
            updated_at: stamps.updated_at,
            hall: BookingHall {
                hall_id: event.hall_id.clone(),
                hall_name: hall.hall_name,
            },
        })
    }

    // create メソッドのトランザクションを SERIALIZABLE にするための内部メソッド
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}

const MAX_CREATE_ATTEMPTS: u32 = 5;

fn slot_taken() -> AppError {
    AppError::Conflict("This time slot is already booked".into())
}

// 同じ枠への同時登録は一意制約で弾かれる。先に確定した側が勝ち、残りは Conflict
fn slot_write_error(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        slot_taken()
    } else {
        AppError::SpecificOperationError(e)
    }
}

fn is_retryable(e: &AppError) -> bool {
    match e {
        AppError::SpecificOperationError(e) | AppError::TransactionError(e) => {
            is_serialization_failure(e)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::seed::seed_default_halls;
    use sqlx::types::chrono::{NaiveDateTime, NaiveTime};

    fn request(hall_id: &str, date: &str, start: &str) -> CreateBooking {
        CreateBooking::new(
            hall_id.into(),
            "Aiko Tanaka".into(),
            "aiko@example.com".into(),
            "+81 90 0000 0000".into(),
            8,
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            Some("Vegetarian menu".into()),
            NaiveDateTime::parse_from_str("2026-10-16 12:00", "%Y-%m-%d %H:%M").unwrap(),
        )
    }

    async fn setup(pool: sqlx::PgPool) -> anyhow::Result<BookingRepositoryImpl> {
        let db = ConnectionPool::new(pool);
        seed_default_halls(&db).await?;
        Ok(BookingRepositoryImpl::new(db))
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_booking_lifecycle(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = setup(pool).await?;

        // 土曜 19:00 開始は基本料金 + 週末 + ピーク
        let booking = repo.create(request("hall1", "2026-10-17", "19:00")).await?;
        assert_eq!(booking.total_price, 1500);
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.end_time, NaiveTime::from_hms_opt(21, 0, 0).unwrap());
        assert_eq!(booking.hall.hall_name, "Hall 1 (Small)");

        let err = repo
            .create(request("hall1", "2026-10-17", "20:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // 別のホールなら同じ時間帯でも予約できる
        repo.create(request("hall2", "2026-10-17", "19:00")).await?;

        let change = repo
            .update_status(UpdateBookingStatus::new(
                booking.booking_id,
                BookingStatus::Cancelled,
            ))
            .await?;
        assert_eq!(change.previous, BookingStatus::Pending);
        assert_eq!(change.booking.status, BookingStatus::Cancelled);

        // キャンセル後は同じ枠を再予約できる
        let rebooked = repo.create(request("hall1", "2026-10-17", "19:00")).await?;
        assert_ne!(rebooked.booking_id, booking.booking_id);

        let slots = repo
            .find_reserved_slots(&"hall1".into(), rebooked.event_date)
            .await?;
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].booking_id, rebooked.booking_id);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_back_to_back_bookings(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = setup(pool).await?;
        repo.create(request("hall1", "2026-10-19", "10:00")).await?;
        let next = repo.create(request("hall1", "2026-10-19", "12:00")).await?;
        // 月曜の昼は基本料金のみ
        assert_eq!(next.total_price, 1000);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_late_booking_leaves_next_date_open(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = setup(pool).await?;

        let late = repo.create(request("hall1", "2026-10-17", "23:00")).await?;
        assert_eq!(late.end_time, NaiveTime::from_hms_opt(1, 0, 0).unwrap());

        let midnight = repo.create(request("hall1", "2026-10-18", "00:00")).await?;
        assert_eq!(midnight.total_price, 1200);

        let sunday = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let slots = repo.find_reserved_slots(&"hall1".into(), sunday).await?;
        assert_eq!(slots.len(), 1);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_concurrent_disjoint_bookings_both_succeed(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = setup(pool).await?;

        // 同じホール・同じ日の重ならない予約を同時に登録する
        let (morning, evening) = tokio::join!(
            repo.create(request("hall1", "2026-10-22", "10:00")),
            repo.create(request("hall1", "2026-10-22", "19:00")),
        );
        morning?;
        evening?;

        let slots = repo
            .find_reserved_slots(&"hall1".into(), NaiveDate::from_ymd_opt(2026, 10, 22).unwrap())
            .await?;
        assert_eq!(slots.len(), 2);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_concurrent_same_slot_has_one_winner(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = setup(pool).await?;

        let (a, b) = tokio::join!(
            repo.create(request("hall2", "2026-10-22", "19:00")),
            repo.create(request("hall2", "2026-10-22", "20:00")),
        );
        let results = [a, b];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(AppError::Conflict(_)))));
        Ok(())
    }

    #[test]
    fn only_serialization_failures_are_retried() {
        assert!(!is_retryable(&slot_taken()));
        assert!(!is_retryable(&AppError::SpecificOperationError(
            sqlx::Error::PoolTimedOut
        )));
        assert!(!is_retryable(&AppError::EntityNotFound("hall9".into())));
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_unknown_hall(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = setup(pool).await?;
        let err = repo
            .create(request("hall9", "2026-10-17", "19:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound(_)));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_status_transitions(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = setup(pool).await?;
        let booking = repo.create(request("hall2", "2026-10-20", "14:00")).await?;

        let confirmed = repo
            .update_status(UpdateBookingStatus::new(
                booking.booking_id,
                BookingStatus::Confirmed,
            ))
            .await?;
        assert!(!confirmed.is_noop());

        let again = repo
            .update_status(UpdateBookingStatus::new(
                booking.booking_id,
                BookingStatus::Confirmed,
            ))
            .await?;
        assert!(again.is_noop());

        let err = repo
            .update_status(UpdateBookingStatus::new(
                booking.booking_id,
                BookingStatus::Pending,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidStatusTransition(_)));

        let err = repo
            .update_status(UpdateBookingStatus::new(
                BookingId::new(),
                BookingStatus::Confirmed,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound(_)));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_find_all_filters(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = setup(pool).await?;
        let first = repo.create(request("hall1", "2026-10-21", "10:00")).await?;
        repo.create(request("hall2", "2026-10-21", "10:00")).await?;
        repo.update_status(UpdateBookingStatus::new(
            first.booking_id,
            BookingStatus::Confirmed,
        ))
        .await?;

        let all = repo.find_all(BookingListOptions::default()).await?;
        assert_eq!(all.len(), 2);

        let confirmed = repo
            .find_all(BookingListOptions {
                status: Some(BookingStatus::Confirmed),
                hall_id: None,
            })
            .await?;
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].booking_id, first.booking_id);

        let hall2 = repo
            .find_all(BookingListOptions {
                status: None,
                hall_id: Some("hall2".into()),
            })
            .await?;
        assert_eq!(hall2.len(), 1);
        assert_eq!(hall2[0].hall.hall_id, HallId::from("hall2"));

        let found = repo.find_by_id(first.booking_id).await?;
        assert_eq!(found.map(|b| b.status), Some(BookingStatus::Confirmed));
        assert!(repo.find_by_id(BookingId::new()).await?.is_none());
        Ok(())
    }
}
