//! Booking form parsing and validation.
//!
//! The booking form posts separate date and time fields plus a dynamic
//! `qty_<instrument-id>` input per rentable instrument. Everything is
//! validated here, before any request reaches the backend; a failure
//! re-renders the form inline and no network call is made.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use uuid::Uuid;

use crate::models::{Room, Studio};

use super::calculators::{calculate_quote, BookingQuote};
use super::selection::{RoomSelection, SelectionError};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const QTY_PREFIX: &str = "qty_";

/// Why the submitted form was rejected locally
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please fill in the {0} field")]
    MissingField(&'static str),

    #[error("'{0}' is not a valid date")]
    InvalidDate(String),

    #[error("'{0}' is not a valid time")]
    InvalidTime(String),

    #[error("'{0}' is not a valid instrument quantity")]
    InvalidQuantity(String),

    #[error("The booking date has already passed")]
    DateInPast,

    #[error("The end time must be after the start time")]
    EmptyTimeRange,

    #[error("The selected room does not belong to this studio")]
    UnknownRoom,

    #[error("{0}")]
    Selection(#[from] SelectionError),

    #[error("The selected time does not exist on that date")]
    UnrepresentableTime,
}

/// Raw booking form after field-level parsing
#[derive(Debug, Clone)]
pub struct BookingForm {
    pub room_id: Option<Uuid>,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub quantities: HashMap<Uuid, u32>,
}

/// Parse the urlencoded field list of the booking form.
///
/// Empty values count as missing so that an untouched `<input>` reads the
/// same as an absent one.
pub fn parse_booking_form(fields: &[(String, String)]) -> Result<BookingForm, FormError> {
    let value = |name: &'static str| -> Option<&str> {
        fields
            .iter()
            .find(|(key, val)| key == name && !val.is_empty())
            .map(|(_, val)| val.as_str())
    };

    let room_id = match value("room_id") {
        Some(raw) => Some(Uuid::parse_str(raw).map_err(|_| FormError::UnknownRoom)?),
        None => None,
    };

    let raw_date = value("date").ok_or(FormError::MissingField("date"))?;
    let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT)
        .map_err(|_| FormError::InvalidDate(raw_date.to_string()))?;

    let raw_start = value("start_time").ok_or(FormError::MissingField("start time"))?;
    let start = NaiveTime::parse_from_str(raw_start, TIME_FORMAT)
        .map_err(|_| FormError::InvalidTime(raw_start.to_string()))?;

    let raw_end = value("end_time").ok_or(FormError::MissingField("end time"))?;
    let end = NaiveTime::parse_from_str(raw_end, TIME_FORMAT)
        .map_err(|_| FormError::InvalidTime(raw_end.to_string()))?;

    let mut quantities = HashMap::new();
    for (key, val) in fields {
        let Some(raw_id) = key.strip_prefix(QTY_PREFIX) else {
            continue;
        };
        if val.is_empty() {
            continue;
        }
        let id = Uuid::parse_str(raw_id).map_err(|_| FormError::InvalidQuantity(val.clone()))?;
        let quantity: u32 = val
            .parse()
            .map_err(|_| FormError::InvalidQuantity(val.clone()))?;
        if quantity > 0 {
            quantities.insert(id, quantity);
        }
    }

    Ok(BookingForm {
        room_id,
        date,
        start,
        end,
        quantities,
    })
}

/// A booking request that passed every local check
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBooking {
    pub studio_id: Uuid,
    pub room: Room,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub selection: RoomSelection,
}

/// Validate a parsed form against the studio being booked.
///
/// `today` is injected by the caller so date checks are deterministic
/// under test.
pub fn validate(
    form: &BookingForm,
    studio: &Studio,
    today: NaiveDate,
) -> Result<ValidatedBooking, FormError> {
    let room_id = match form.room_id {
        Some(id) => id,
        // Instruments picked with no room chosen get the "choose a room
        // first" message rather than a generic missing-field one.
        None if form.quantities.values().any(|q| *q > 0) => {
            return Err(SelectionError::NoRoomSelected.into());
        }
        None => return Err(FormError::MissingField("room")),
    };
    let room = studio.room(room_id).ok_or(FormError::UnknownRoom)?;

    if form.date < today {
        return Err(FormError::DateInPast);
    }
    if form.end <= form.start {
        return Err(FormError::EmptyTimeRange);
    }

    let mut selection = RoomSelection::new();
    selection.select_room(room);
    for (id, quantity) in &form.quantities {
        selection.set_quantity(*id, *quantity)?;
    }

    Ok(ValidatedBooking {
        studio_id: studio.id,
        room: room.clone(),
        date: form.date,
        start: form.start,
        end: form.end,
        selection,
    })
}

impl ValidatedBooking {
    /// Price the validated request
    pub fn quote(&self) -> BookingQuote {
        calculate_quote(
            self.room.price_per_hour,
            self.room.min_hours,
            self.start,
            self.end,
            &self.selection.price_inputs(),
            self.selection.quantities(),
        )
    }

    /// Recombine the date and time fields into ISO instants.
    ///
    /// The timezone is supplied by the caller; wall-clock values that do
    /// not exist in it (DST gaps) are rejected rather than guessed.
    pub fn instants<Tz: TimeZone>(
        &self,
        tz: &Tz,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), FormError> {
        let localize = |time: NaiveTime| -> Result<DateTime<Utc>, FormError> {
            tz.from_local_datetime(&self.date.and_time(time))
                .single()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or(FormError::UnrepresentableTime)
        };
        Ok((localize(self.start)?, localize(self.end)?))
    }
}
