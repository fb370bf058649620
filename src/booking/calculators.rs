//! Core booking price calculation functions.
//!
//! Pure functions for quote math - no network access.
//! The backend owns the authoritative price; these mirror its rules so the
//! booking form can show an accurate quote before submission.

use std::collections::HashMap;

use chrono::NaiveTime;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

const SECONDS_PER_HOUR: i64 = 3600;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use studiobook_web::booking::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Selected time range expressed in hours.
///
/// Both times are same-day wall-clock values from the booking form.
/// An inverted or empty range yields zero, never a negative duration;
/// the form rejects such ranges before a booking is submitted.
pub fn raw_duration_hours(start: NaiveTime, end: NaiveTime) -> Decimal {
    if end <= start {
        return Decimal::ZERO;
    }
    let seconds = (end - start).num_seconds();
    Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR)
}

/// Billable hours after applying the room's minimum-duration floor.
///
/// Rooms bill at least `min_hours` regardless of how short the selected
/// interval is; above the floor the selected duration is billed as-is.
pub fn effective_hours(raw_hours: Decimal, min_hours: i32) -> Decimal {
    raw_hours.max(Decimal::from(min_hours))
}

/// Unit price of a rentable instrument, scoped to the selected room
#[derive(Debug, Clone)]
pub struct InstrumentPriceInput {
    pub id: Uuid,
    pub unit_price: Decimal,
}

/// Sum of instrument line items: unit price times selected quantity.
///
/// Quantities are looked up per catalog entry; an absent entry counts as
/// zero. Selection ids that do not belong to the catalog contribute
/// nothing - the form boundary rejects them before they get here.
pub fn instruments_total(
    catalog: &[InstrumentPriceInput],
    selections: &HashMap<Uuid, u32>,
) -> Decimal {
    catalog
        .iter()
        .map(|item| {
            let quantity = selections.get(&item.id).copied().unwrap_or(0);
            item.unit_price * Decimal::from(quantity)
        })
        .sum()
}

/// Full quote for a booking prior to submission
#[derive(Debug, Clone)]
pub struct BookingQuote {
    pub raw_hours: Decimal,
    pub effective_hours: Decimal,
    pub room_charge: Decimal,
    pub instruments_total: Decimal,
    pub total: Decimal,
}

/// Calculate the total charge for a booking.
///
/// # Arguments
/// * `price_per_hour` - The room's hourly rate
/// * `min_hours` - The room's minimum billable duration
/// * `start`, `end` - Selected same-day wall-clock times
/// * `catalog` - Rentable instruments of the selected room
/// * `selections` - Chosen quantity per instrument id
pub fn calculate_quote(
    price_per_hour: Decimal,
    min_hours: i32,
    start: NaiveTime,
    end: NaiveTime,
    catalog: &[InstrumentPriceInput],
    selections: &HashMap<Uuid, u32>,
) -> BookingQuote {
    let raw_hours = raw_duration_hours(start, end);
    let hours = effective_hours(raw_hours, min_hours);
    let room_charge = round_money(price_per_hour * hours, 2);
    let instruments = round_money(instruments_total(catalog, selections), 2);

    BookingQuote {
        raw_hours,
        effective_hours: hours,
        room_charge,
        instruments_total: instruments,
        total: room_charge + instruments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn catalog_entry(price: Decimal) -> InstrumentPriceInput {
        InstrumentPriceInput {
            id: Uuid::new_v4(),
            unit_price: price,
        }
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2)); // rounds down to even
        assert_eq!(round_money(dec!(3.5), 0), dec!(4)); // rounds up to even
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
    }

    // ==================== duration tests ====================

    #[test]
    fn test_raw_duration_whole_hours() {
        assert_eq!(raw_duration_hours(time(18, 0), time(20, 0)), dec!(2));
    }

    #[test]
    fn test_raw_duration_partial_hours() {
        assert_eq!(raw_duration_hours(time(18, 0), time(19, 30)), dec!(1.5));
    }

    #[test]
    fn test_raw_duration_empty_range_is_zero() {
        assert_eq!(raw_duration_hours(time(18, 0), time(18, 0)), Decimal::ZERO);
    }

    #[test]
    fn test_raw_duration_inverted_range_is_zero_not_negative() {
        assert_eq!(raw_duration_hours(time(20, 0), time(18, 0)), Decimal::ZERO);
    }

    // ==================== effective_hours tests ====================

    #[test]
    fn test_effective_hours_floor_applied_below_minimum() {
        // duration < min_hours => floor is billed regardless of how short
        assert_eq!(effective_hours(dec!(1), 2), dec!(2));
        assert_eq!(effective_hours(dec!(0.5), 2), dec!(2));
        assert_eq!(effective_hours(Decimal::ZERO, 3), dec!(3));
    }

    #[test]
    fn test_effective_hours_no_floor_above_minimum() {
        // duration >= min_hours => billed as selected
        assert_eq!(effective_hours(dec!(2), 2), dec!(2));
        assert_eq!(effective_hours(dec!(3.5), 2), dec!(3.5));
    }

    // ==================== instruments_total tests ====================

    #[test]
    fn test_instruments_total_linear_in_quantity() {
        let item = catalog_entry(dec!(1500));
        let catalog = vec![item.clone()];

        let mut selections = HashMap::new();
        selections.insert(item.id, 1);
        let single = instruments_total(&catalog, &selections);

        selections.insert(item.id, 2);
        let double = instruments_total(&catalog, &selections);

        // doubling the quantity doubles the contribution
        assert_eq!(double, single * dec!(2));
        assert_eq!(double - single, dec!(1500));
    }

    #[test]
    fn test_instruments_total_absent_selection_counts_zero() {
        let catalog = vec![catalog_entry(dec!(1500)), catalog_entry(dec!(800))];
        let mut selections = HashMap::new();
        selections.insert(catalog[1].id, 1);

        assert_eq!(instruments_total(&catalog, &selections), dec!(800));
    }

    #[test]
    fn test_instruments_total_ignores_unknown_ids() {
        let catalog = vec![catalog_entry(dec!(1500))];
        let mut selections = HashMap::new();
        selections.insert(Uuid::new_v4(), 5); // not in this room's catalog

        assert_eq!(instruments_total(&catalog, &selections), Decimal::ZERO);
    }

    #[test]
    fn test_instruments_total_empty_catalog() {
        assert_eq!(instruments_total(&[], &HashMap::new()), Decimal::ZERO);
    }

    // ==================== calculate_quote tests ====================

    #[test]
    fn test_quote_short_booking_billed_at_floor() {
        // 3500/h, 2h minimum, 1h selected, 2x 1500 instrument
        let item = catalog_entry(dec!(1500));
        let catalog = vec![item.clone()];
        let mut selections = HashMap::new();
        selections.insert(item.id, 2);

        let quote = calculate_quote(
            dec!(3500),
            2,
            time(18, 0),
            time(19, 0),
            &catalog,
            &selections,
        );

        assert_eq!(quote.raw_hours, dec!(1));
        assert_eq!(quote.effective_hours, dec!(2));
        assert_eq!(quote.instruments_total, dec!(3000));
        assert_eq!(quote.total, dec!(10000));
    }

    #[test]
    fn test_quote_above_minimum_bills_selected_duration() {
        let quote = calculate_quote(
            dec!(3500),
            2,
            time(10, 0),
            time(13, 30),
            &[],
            &HashMap::new(),
        );

        assert_eq!(quote.effective_hours, dec!(3.5));
        assert_eq!(quote.instruments_total, Decimal::ZERO);
        assert_eq!(quote.total, dec!(12250));
    }

    #[test]
    fn test_quote_inverted_range_still_bills_the_floor() {
        // The form rejects inverted ranges; the calculator itself clamps to
        // zero hours and the minimum floor takes over.
        let quote = calculate_quote(
            dec!(3500),
            2,
            time(20, 0),
            time(18, 0),
            &[],
            &HashMap::new(),
        );

        assert_eq!(quote.raw_hours, Decimal::ZERO);
        assert_eq!(quote.effective_hours, dec!(2));
        assert_eq!(quote.total, dec!(7000));
    }
}
