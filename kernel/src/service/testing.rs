//! In-memory implementations of the kernel ports for service tests.

use crate::{
    model::{
        booking::{
            event::{CreateBooking, UpdateBookingStatus},
            slot::{find_conflict, ReservedSlot},
            Booking, BookingHall, BookingListOptions, BookingStatus, BookingStatusChange,
        },
        contact::{
            event::{CreateContact, UpdateContactStatus},
            Contact, ContactStatus,
        },
        hall::{
            event::{CreateHall, UpdateHall},
            Hall, HallRates,
        },
        id::{BookingId, ContactId, HallId},
    },
    notification::{Notification, NotificationDispatcher},
    repository::{booking::BookingRepository, contact::ContactRepository, hall::HallRepository},
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use shared::error::{AppError, AppResult};
use std::sync::{Arc, Mutex};

pub fn hall1() -> Hall {
    Hall {
        hall_id: "hall1".into(),
        hall_name: "Hall 1 (Small)".into(),
        capacity: 10,
        rates: HallRates {
            base_price: 1000,
            weekend_rate: 200,
            peak_rate: 300,
        },
        features: "Cozy atmosphere".into(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Saturday 2026-10-17 19:00 in hall1, requested the day before.
pub fn saturday_evening() -> CreateBooking {
    CreateBooking::new(
        "hall1".into(),
        "Aiko Tanaka".into(),
        "aiko@example.com".into(),
        "090-0000-0000".into(),
        8,
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
        NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        Some("Birthday cake on arrival".into()),
        NaiveDateTime::parse_from_str("2026-10-16 12:00", "%Y-%m-%d %H:%M").unwrap(),
    )
}

#[derive(Default)]
pub struct InMemoryHallRepository {
    halls: Mutex<Vec<Hall>>,
}

impl InMemoryHallRepository {
    pub fn with(halls: Vec<Hall>) -> Self {
        Self {
            halls: Mutex::new(halls),
        }
    }
}

#[async_trait]
impl HallRepository for InMemoryHallRepository {
    async fn create(&self, event: CreateHall) -> AppResult<Hall> {
        let mut halls = self.halls.lock().unwrap();
        if halls.iter().any(|h| h.hall_id == event.hall_id) {
            return Err(AppError::Conflict(format!("Hall {} already exists", event.hall_id)));
        }
        let hall = Hall {
            hall_id: event.hall_id,
            hall_name: event.hall_name,
            capacity: event.capacity,
            rates: event.rates,
            features: event.features,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        halls.push(hall.clone());
        Ok(hall)
    }

    async fn update(&self, hall_id: HallId, event: UpdateHall) -> AppResult<Hall> {
        let mut halls = self.halls.lock().unwrap();
        let hall = halls
            .iter_mut()
            .find(|h| h.hall_id == hall_id)
            .ok_or_else(|| AppError::EntityNotFound(format!("Hall {hall_id} not found")))?;
        if let Some(name) = event.hall_name {
            hall.hall_name = name;
        }
        if let Some(base) = event.base_price {
            hall.rates.base_price = base;
        }
        Ok(hall.clone())
    }

    async fn find_all(&self) -> AppResult<Vec<Hall>> {
        Ok(self.halls.lock().unwrap().clone())
    }

    async fn find_by_id(&self, hall_id: &HallId) -> AppResult<Option<Hall>> {
        Ok(self
            .halls
            .lock()
            .unwrap()
            .iter()
            .find(|h| &h.hall_id == hall_id)
            .cloned())
    }
}

pub struct InMemoryBookingRepository {
    halls: Arc<InMemoryHallRepository>,
    bookings: Mutex<Vec<Booking>>,
}

impl InMemoryBookingRepository {
    pub fn new(halls: Arc<InMemoryHallRepository>) -> Self {
        Self {
            halls,
            bookings: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.bookings.lock().unwrap().len()
    }

    fn reserved(&self, hall_id: &HallId, event_date: NaiveDate) -> Vec<ReservedSlot> {
        self.bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| &b.hall.hall_id == hall_id && b.event_date == event_date)
            .filter(|b| b.status.holds_slot())
            .map(|b| ReservedSlot {
                booking_id: b.booking_id,
                slot: b.slot(),
            })
            .collect()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, event: CreateBooking) -> AppResult<Booking> {
        let slot = event.slot();
        let reserved = self.reserved(&event.hall_id, event.event_date);
        if find_conflict(&slot, &reserved).is_some() {
            return Err(AppError::Conflict("This time slot is already booked".into()));
        }
        let hall = self
            .halls
            .find_by_id(&event.hall_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound("Hall not found".into()))?;

        let booking = Booking {
            booking_id: BookingId::new(),
            customer_name: event.customer_name,
            customer_email: event.customer_email,
            customer_phone: event.customer_phone,
            guest_count: event.guest_count,
            event_date: event.event_date,
            start_time: event.start_time,
            end_time: slot.end_time(),
            special_requests: event.special_requests,
            status: BookingStatus::Pending,
            total_price: hall.rates.quote(event.event_date, event.start_time)?,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            hall: BookingHall {
                hall_id: hall.hall_id,
                hall_name: hall.hall_name,
            },
        };
        self.bookings.lock().unwrap().push(booking.clone());
        Ok(booking)
    }

    async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<BookingStatusChange> {
        let mut bookings = self.bookings.lock().unwrap();
        let booking = bookings
            .iter_mut()
            .find(|b| b.booking_id == event.booking_id)
            .ok_or_else(|| AppError::EntityNotFound("Booking not found".into()))?;
        let previous = booking.status;
        booking.status = previous.transition_to(event.status)?;
        booking.updated_at = Utc::now();
        Ok(BookingStatusChange {
            previous,
            booking: booking.clone(),
        })
    }

    async fn find_all(&self, options: BookingListOptions) -> AppResult<Vec<Booking>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| options.status.map_or(true, |s| b.status == s))
            .filter(|b| options.hall_id.as_ref().map_or(true, |h| &b.hall.hall_id == h))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.booking_id == booking_id)
            .cloned())
    }

    async fn find_reserved_slots(
        &self,
        hall_id: &HallId,
        event_date: NaiveDate,
    ) -> AppResult<Vec<ReservedSlot>> {
        Ok(self.reserved(hall_id, event_date))
    }
}

#[derive(Default)]
pub struct InMemoryContactRepository {
    contacts: Mutex<Vec<Contact>>,
}

impl InMemoryContactRepository {
    pub fn len(&self) -> usize {
        self.contacts.lock().unwrap().len()
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn create(&self, event: CreateContact) -> AppResult<Contact> {
        let contact = Contact {
            contact_id: ContactId::new(),
            name: event.name,
            email: event.email,
            phone: event.phone,
            subject: event.subject,
            message: event.message,
            status: ContactStatus::Unread,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.contacts.lock().unwrap().push(contact.clone());
        Ok(contact)
    }

    async fn update_status(&self, event: UpdateContactStatus) -> AppResult<Contact> {
        let mut contacts = self.contacts.lock().unwrap();
        let contact = contacts
            .iter_mut()
            .find(|c| c.contact_id == event.contact_id)
            .ok_or_else(|| AppError::EntityNotFound("Contact not found".into()))?;
        contact.status = event.status;
        Ok(contact.clone())
    }

    async fn find_all(&self) -> AppResult<Vec<Contact>> {
        Ok(self.contacts.lock().unwrap().clone())
    }

    async fn find_by_id(&self, contact_id: ContactId) -> AppResult<Option<Contact>> {
        Ok(self
            .contacts
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.contact_id == contact_id)
            .cloned())
    }
}

#[derive(Default)]
pub struct RecordingDispatcher {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingDispatcher {
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationDispatcher for RecordingDispatcher {
    fn dispatch(&self, notification: Notification) {
        self.sent.lock().unwrap().push(notification);
    }
}
