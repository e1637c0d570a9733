//! Outbound notification port.
//!
//! The kernel only describes *what* should be sent. Delivery happens outside the
//! request path: a [`NotificationDispatcher`] accepts messages without waiting, and
//! a [`NotificationSender`] performs the actual transport call later. Delivery
//! failures never reach the caller that triggered them.

use crate::model::{
    booking::{Booking, BookingStatus},
    contact::Contact,
};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone)]
pub enum Notification {
    /// Sent to the customer right after a booking is stored.
    BookingReceived(Booking),
    /// Sent to the venue administrator for every new booking.
    BookingAlert(Booking),
    /// Sent to the customer when staff confirm or cancel a booking.
    BookingStatusChanged {
        booking: Booking,
        previous: BookingStatus,
    },
    ContactAcknowledgement(Contact),
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::BookingReceived(_) => "booking_received",
            Notification::BookingAlert(_) => "booking_alert",
            Notification::BookingStatusChanged { .. } => "booking_status_changed",
            Notification::ContactAcknowledgement(_) => "contact_acknowledgement",
        }
    }
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("notification is not configured: {0}")]
    NotConfigured(String),
    #[error("failed to build message: {0}")]
    InvalidMessage(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("provider rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError>;
}

pub trait NotificationDispatcher: Send + Sync {
    /// Queues a notification and returns immediately.
    fn dispatch(&self, notification: Notification);
}
