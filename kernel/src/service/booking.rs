use crate::{
    model::{
        booking::{
            event::{CreateBooking, UpdateBookingStatus},
            slot::{find_conflict, TimeSlot},
            Booking, BookingListOptions, BookingStatus,
        },
        id::{BookingId, HallId},
    },
    notification::{Notification, NotificationDispatcher},
    repository::{booking::BookingRepository, hall::HallRepository},
};
use chrono::{NaiveDate, NaiveTime};
use derive_new::new;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

/// Booking lifecycle: creation with availability and pricing, reads, and
/// status transitions.
#[derive(Clone, new)]
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    halls: Arc<dyn HallRepository>,
    notifier: Arc<dyn NotificationDispatcher>,
}

impl BookingService {
    pub async fn create(&self, event: CreateBooking) -> AppResult<Booking> {
        event.validate()?;

        let booking = self.bookings.create(event).await?;
        tracing::info!(
            booking_id = %booking.booking_id,
            hall_id = %booking.hall.hall_id,
            event_date = %booking.event_date,
            total_price = booking.total_price,
            "booking created"
        );

        // 通知の成否は予約結果に影響させない
        self.notifier
            .dispatch(Notification::BookingReceived(booking.clone()));
        self.notifier
            .dispatch(Notification::BookingAlert(booking.clone()));

        Ok(booking)
    }

    pub async fn find_all(&self, options: BookingListOptions) -> AppResult<Vec<Booking>> {
        self.bookings.find_all(options).await
    }

    pub async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Booking> {
        self.bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("Booking {booking_id} not found")))
    }

    /// Whether a two hour slot starting at `start_time` is still free.
    pub async fn check_availability(
        &self,
        hall_id: &HallId,
        event_date: NaiveDate,
        start_time: NaiveTime,
    ) -> AppResult<bool> {
        if self.halls.find_by_id(hall_id).await?.is_none() {
            return Err(AppError::EntityNotFound(format!("Hall {hall_id} not found")));
        }
        let reserved = self.bookings.find_reserved_slots(hall_id, event_date).await?;
        let candidate = TimeSlot::starting_at(event_date, start_time);
        Ok(find_conflict(&candidate, &reserved).is_none())
    }

    pub async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<Booking> {
        let change = self.bookings.update_status(event).await?;

        if !change.is_noop() {
            tracing::info!(
                booking_id = %change.booking.booking_id,
                from = %change.previous,
                to = %change.booking.status,
                "booking status changed"
            );
            if matches!(
                change.booking.status,
                BookingStatus::Confirmed | BookingStatus::Cancelled
            ) {
                self.notifier.dispatch(Notification::BookingStatusChanged {
                    booking: change.booking.clone(),
                    previous: change.previous,
                });
            }
        }

        Ok(change.booking)
    }
}
