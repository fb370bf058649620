//! Booking projection models
//!
//! Bookings are owned by the backend; the client holds a read-only snapshot
//! fetched per user and replaces it wholesale after each mutation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a booking, mutated server-side only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Human-readable label for templates
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Completed => "Completed",
        }
    }
}

/// Instrument line item attached to a booking
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInstrument {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
}

/// Booking as returned by `GET /bookings/me`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub studio: String,
    pub room: String,
    pub room_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub is_paid: bool,
    #[serde(default)]
    pub instruments: Vec<BookingInstrument>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// A booking can be paid once confirmed and until payment lands
    pub fn is_payable(&self) -> bool {
        self.status == BookingStatus::Confirmed && !self.is_paid
    }

    /// Ids of the rented instruments, in wire order
    pub fn instrument_ids(&self) -> Vec<Uuid> {
        self.instruments.iter().map(|i| i.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn booking(status: BookingStatus, is_paid: bool) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            studio: "Echo Chamber".to_string(),
            room: "Room A".to_string(),
            room_id: Uuid::new_v4(),
            start_time: Utc::now(),
            end_time: Utc::now(),
            total_price: dec!(10000),
            status,
            is_paid,
            instruments: vec![],
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_payable_only_when_confirmed_and_unpaid() {
        assert!(booking(BookingStatus::Confirmed, false).is_payable());
        assert!(!booking(BookingStatus::Confirmed, true).is_payable());
        assert!(!booking(BookingStatus::Pending, false).is_payable());
        assert!(!booking(BookingStatus::Cancelled, false).is_payable());
    }

    #[test]
    fn test_status_wire_format() {
        let status: BookingStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, BookingStatus::Cancelled);
        assert_eq!(serde_json::to_string(&BookingStatus::Pending).unwrap(), "\"PENDING\"");
    }

    #[test]
    fn test_booking_deserializes_backend_payload() {
        let json = r#"{
            "id": "4f5c8a0e-1111-2222-3333-444455556666",
            "studio": "Echo Chamber",
            "room": "Room A",
            "roomId": "4f5c8a0e-aaaa-bbbb-cccc-dddd11112222",
            "startTime": "2026-08-10T18:00:00Z",
            "endTime": "2026-08-10T20:00:00Z",
            "totalPrice": "10000",
            "status": "CONFIRMED",
            "isPaid": false,
            "instruments": [
                {"id": "4f5c8a0e-9999-8888-7777-666655554444", "name": "DW drum kit", "price": "1500"}
            ],
            "updatedAt": "2026-08-01T09:30:00Z"
        }"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.total_price, dec!(10000));
        assert_eq!(booking.instruments.len(), 1);
        assert!(booking.is_payable());
    }
}
