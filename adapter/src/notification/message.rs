use kernel::model::{
    booking::{slot::format_clock, Booking},
    contact::Contact,
};
use kernel::notification::{Notification, NotificationError};
use serde_json::json;

/// Which Brevo template family a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Customer,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub email: String,
    pub name: String,
}

/// A notification rendered into a concrete mail, independent of the transport.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub audience: Audience,
    pub to: Recipient,
    pub subject: String,
    pub html: String,
    // テンプレート送信に使う差し込みパラメータ。テンプレートを使わない通知は None
    pub template_params: Option<serde_json::Value>,
}

pub fn compose(
    notification: &Notification,
    admin_email: Option<&str>,
) -> Result<OutboundEmail, NotificationError> {
    let email = match notification {
        Notification::BookingReceived(booking) => OutboundEmail {
            audience: Audience::Customer,
            to: customer_of(booking),
            subject: format!("Booking received for {}", display_date(booking)),
            html: booking_received_html(booking),
            template_params: Some(customer_params(booking)),
        },
        Notification::BookingAlert(booking) => {
            let admin = admin_email.filter(|e| !e.trim().is_empty()).ok_or_else(|| {
                NotificationError::NotConfigured("admin email not configured".into())
            })?;
            OutboundEmail {
                audience: Audience::Admin,
                to: Recipient {
                    email: admin.to_string(),
                    name: "Admin".into(),
                },
                subject: format!(
                    "New booking: {} on {}",
                    booking.hall.hall_name,
                    display_date(booking)
                ),
                html: booking_alert_html(booking),
                template_params: Some(admin_params(booking)),
            }
        }
        Notification::BookingStatusChanged { booking, previous } => OutboundEmail {
            audience: Audience::Customer,
            to: customer_of(booking),
            subject: format!("Your booking is now {}", booking.status),
            html: format!(
                "<p>Dear {},</p><p>The status of your booking at {} on {} from {} has changed from {} to <strong>{}</strong>.</p>",
                escape_html(&booking.customer_name),
                escape_html(&booking.hall.hall_name),
                display_date(booking),
                format_clock(booking.start_time),
                previous,
                booking.status,
            ),
            template_params: None,
        },
        Notification::ContactAcknowledgement(contact) => OutboundEmail {
            audience: Audience::Customer,
            to: Recipient {
                email: contact.email.clone(),
                name: contact.name.clone(),
            },
            subject: format!("We received your message: {}", contact.subject),
            html: contact_ack_html(contact),
            template_params: None,
        },
    };
    Ok(email)
}

fn customer_of(booking: &Booking) -> Recipient {
    Recipient {
        email: booking.customer_email.clone(),
        name: booking.customer_name.clone(),
    }
}

fn display_date(booking: &Booking) -> String {
    booking.event_date.format("%B %-d, %Y").to_string()
}

fn customer_params(booking: &Booking) -> serde_json::Value {
    json!({
        "customerName": booking.customer_name,
        "eventDate": display_date(booking),
        "startTime": format_clock(booking.start_time),
        "hallId": booking.hall.hall_id,
        "guestCount": booking.guest_count,
        "totalPrice": booking.total_price,
    })
}

fn admin_params(booking: &Booking) -> serde_json::Value {
    json!({
        "customerName": booking.customer_name,
        "customerEmail": booking.customer_email,
        "customerPhone": booking.customer_phone,
        "eventDate": display_date(booking),
        "startTime": format_clock(booking.start_time),
        "hallId": booking.hall.hall_id,
        "guestCount": booking.guest_count,
        "totalPrice": booking.total_price,
        "specialRequests": booking.special_requests.clone().unwrap_or_default(),
    })
}

fn booking_received_html(booking: &Booking) -> String {
    format!(
        r#"<p>Dear {name},</p>
<p>Thank you for your booking request. We will contact you once it has been reviewed.</p>
<ul>
  <li>Hall: {hall}</li>
  <li>Date: {date}</li>
  <li>Time: {start} - {end}</li>
  <li>Guests: {guests}</li>
  <li>Total price: {price}</li>
</ul>"#,
        name = escape_html(&booking.customer_name),
        hall = escape_html(&booking.hall.hall_name),
        date = display_date(booking),
        start = format_clock(booking.start_time),
        end = format_clock(booking.end_time),
        guests = booking.guest_count,
        price = booking.total_price,
    )
}

fn booking_alert_html(booking: &Booking) -> String {
    format!(
        r#"<p>A new booking was submitted.</p>
<ul>
  <li>Booking: {id}</li>
  <li>Customer: {name} ({email}, {phone})</li>
  <li>Hall: {hall}</li>
  <li>Date: {date} {start}</li>
  <li>Guests: {guests}</li>
  <li>Total price: {price}</li>
  <li>Special requests: {requests}</li>
</ul>"#,
        id = booking.booking_id,
        name = escape_html(&booking.customer_name),
        email = escape_html(&booking.customer_email),
        phone = escape_html(&booking.customer_phone),
        hall = escape_html(&booking.hall.hall_name),
        date = display_date(booking),
        start = format_clock(booking.start_time),
        guests = booking.guest_count,
        price = booking.total_price,
        requests = escape_html(booking.special_requests.as_deref().unwrap_or("-")),
    )
}

fn contact_ack_html(contact: &Contact) -> String {
    format!(
        "<p>Dear {},</p><p>Thank you for contacting us. We have received your message and will reply soon.</p><blockquote>{}</blockquote>",
        escape_html(&contact.name),
        escape_html(&contact.message),
    )
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
    use kernel::model::{
        booking::{Booking, BookingHall, BookingStatus},
        contact::{Contact, ContactStatus},
        id::{BookingId, ContactId},
    };

    pub fn booking() -> Booking {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 3, 0, 0).unwrap();
        Booking {
            booking_id: BookingId::new(),
            customer_name: "Aiko <Tanaka>".into(),
            customer_email: "aiko@example.com".into(),
            customer_phone: "+81 90 0000 0000".into(),
            guest_count: 8,
            event_date: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
            start_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
            special_requests: None,
            status: BookingStatus::Pending,
            total_price: 1500,
            created_at: now,
            updated_at: now,
            hall: BookingHall {
                hall_id: "hall1".into(),
                hall_name: "Hall 1 (Small)".into(),
            },
        }
    }

    pub fn contact() -> Contact {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 3, 0, 0).unwrap();
        Contact {
            contact_id: ContactId::new(),
            name: "Ken".into(),
            email: "ken@example.com".into(),
            phone: None,
            subject: "Parking".into(),
            message: "Is there parking nearby?".into(),
            status: ContactStatus::Unread,
            created_at: now,
            updated_at: now,
        }
    }
}
