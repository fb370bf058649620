//! Cancellation eligibility rules.
//!
//! Two independent constraints gate every cancellation: a minimum lead time
//! before the booking starts, and a per-day quota on how many bookings a
//! user may cancel. Both are checked client-side before any request is sent;
//! the backend remains the authority and may still reject for its own
//! reasons.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::models::{Booking, BookingStatus};

/// Minimum lead time before a booking's start, inclusive
pub const CANCELLATION_LEAD_HOURS: i64 = 48;

/// Maximum cancellations per user per calendar day
pub const DAILY_CANCELLATION_LIMIT: usize = 2;

/// Why a cancellation request was refused locally
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancellationDenied {
    InsufficientLeadTime { hours_remaining: i64 },
    DailyLimitReached { cancelled_today: usize },
}

impl std::fmt::Display for CancellationDenied {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CancellationDenied::InsufficientLeadTime { .. } => write!(
                f,
                "Bookings can only be cancelled at least {} hours before they start",
                CANCELLATION_LEAD_HOURS
            ),
            CancellationDenied::DailyLimitReached { .. } => write!(
                f,
                "You have reached the limit of {} cancellations per day",
                DAILY_CANCELLATION_LIMIT
            ),
        }
    }
}

impl std::error::Error for CancellationDenied {}

/// Check whether a booking may be cancelled right now.
///
/// `now` is injected rather than read from the system clock so callers and
/// tests can evaluate boundary instants deterministically.
///
/// Exactly [`CANCELLATION_LEAD_HOURS`] of lead time passes the check; one
/// second less fails it.
pub fn check_cancellation(
    start_time: DateTime<Utc>,
    now: DateTime<Utc>,
    cancelled_today: usize,
) -> Result<(), CancellationDenied> {
    let lead = start_time - now;
    if lead < Duration::hours(CANCELLATION_LEAD_HOURS) {
        return Err(CancellationDenied::InsufficientLeadTime {
            hours_remaining: lead.num_hours(),
        });
    }

    if cancelled_today >= DAILY_CANCELLATION_LIMIT {
        return Err(CancellationDenied::DailyLimitReached { cancelled_today });
    }

    Ok(())
}

/// True iff both the lead-time rule and the daily-quota rule hold
pub fn can_cancel(start_time: DateTime<Utc>, now: DateTime<Utc>, cancelled_today: usize) -> bool {
    check_cancellation(start_time, now, cancelled_today).is_ok()
}

/// Count the user's cancellations falling on the given calendar date.
///
/// Matches on the calendar date of `updated_at` in the supplied timezone,
/// not a rolling 24-hour window: a cancellation at 23:59 and one at 00:01
/// land on different days even though only minutes apart.
pub fn cancellations_on<Tz: TimeZone>(bookings: &[Booking], tz: &Tz, date: NaiveDate) -> usize {
    bookings
        .iter()
        .filter(|b| {
            b.status == BookingStatus::Cancelled
                && b.updated_at.with_timezone(tz).date_naive() == date
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap()
    }

    fn booking_updated_at(status: BookingStatus, updated_at: DateTime<Utc>) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            studio: "Echo Chamber".to_string(),
            room: "Room A".to_string(),
            room_id: Uuid::new_v4(),
            start_time: updated_at,
            end_time: updated_at,
            total_price: dec!(7000),
            status,
            is_paid: false,
            instruments: vec![],
            updated_at,
        }
    }

    // ==================== lead-time rule tests ====================

    #[test]
    fn test_exactly_48_hours_is_allowed() {
        let start = now() + Duration::hours(48);
        assert!(can_cancel(start, now(), 0));
    }

    #[test]
    fn test_one_second_under_48_hours_is_denied() {
        let start = now() + Duration::hours(48) - Duration::seconds(1);
        assert_eq!(
            check_cancellation(start, now(), 0),
            Err(CancellationDenied::InsufficientLeadTime { hours_remaining: 47 })
        );
    }

    #[test]
    fn test_short_lead_denied_despite_available_quota() {
        let start = now() + Duration::hours(10);
        assert!(!can_cancel(start, now(), 0));
    }

    #[test]
    fn test_booking_already_started_is_denied() {
        let start = now() - Duration::hours(1);
        assert!(!can_cancel(start, now(), 0));
    }

    // ==================== daily-quota rule tests ====================

    #[test]
    fn test_quota_exhausted_denied_despite_ample_lead() {
        let start = now() + Duration::hours(72);
        assert_eq!(
            check_cancellation(start, now(), 2),
            Err(CancellationDenied::DailyLimitReached { cancelled_today: 2 })
        );
    }

    #[test]
    fn test_quota_allows_up_to_limit() {
        let start = now() + Duration::hours(72);
        assert!(can_cancel(start, now(), 0));
        assert!(can_cancel(start, now(), 1));
        assert!(!can_cancel(start, now(), 2));
        assert!(!can_cancel(start, now(), 3));
    }

    #[test]
    fn test_both_rules_failing_reports_lead_time() {
        let start = now() + Duration::hours(10);
        assert!(matches!(
            check_cancellation(start, now(), 2),
            Err(CancellationDenied::InsufficientLeadTime { .. })
        ));
    }

    // ==================== daily counter tests ====================

    #[test]
    fn test_counter_matches_calendar_date() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let bookings = vec![
            booking_updated_at(
                BookingStatus::Cancelled,
                Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap(),
            ),
            booking_updated_at(
                BookingStatus::Cancelled,
                Utc.with_ymd_and_hms(2026, 7, 31, 23, 59, 0).unwrap(),
            ),
        ];

        assert_eq!(cancellations_on(&bookings, &Utc, today), 1);
    }

    #[test]
    fn test_counter_is_calendar_day_not_rolling_window() {
        // 23:59 and 00:01 are two minutes apart but count as different days
        let bookings = vec![
            booking_updated_at(
                BookingStatus::Cancelled,
                Utc.with_ymd_and_hms(2026, 7, 31, 23, 59, 0).unwrap(),
            ),
            booking_updated_at(
                BookingStatus::Cancelled,
                Utc.with_ymd_and_hms(2026, 8, 1, 0, 1, 0).unwrap(),
            ),
        ];

        let july_31 = NaiveDate::from_ymd_opt(2026, 7, 31).unwrap();
        let aug_1 = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        assert_eq!(cancellations_on(&bookings, &Utc, july_31), 1);
        assert_eq!(cancellations_on(&bookings, &Utc, aug_1), 1);
    }

    #[test]
    fn test_counter_ignores_non_cancelled_bookings() {
        let updated = Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap();
        let bookings = vec![
            booking_updated_at(BookingStatus::Confirmed, updated),
            booking_updated_at(BookingStatus::Completed, updated),
            booking_updated_at(BookingStatus::Pending, updated),
        ];

        let today = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        assert_eq!(cancellations_on(&bookings, &Utc, today), 0);
    }
}
