//! My-bookings route handlers
//!
//! The bookings list is re-fetched wholesale after every mutation; nothing
//! is patched locally. Cancellation runs the local eligibility guard first
//! and sends nothing to the backend when it fails.

use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{Local, Utc};
use uuid::Uuid;

use crate::api::requests::PayBookingRequest;
use crate::booking::{self, DAILY_CANCELLATION_LIMIT};
use crate::error::{AppError, Result};
use crate::models::{Booking, BookingStatus};
use crate::session::Session;
use crate::AppState;

struct BookingRow {
    id: String,
    studio: String,
    room: String,
    date: String,
    time_range: String,
    total: String,
    status: String,
    is_paid: bool,
    payable: bool,
    can_cancel: bool,
    deny_reason: String,
    has_deny_reason: bool,
}

/// Bookings list template
#[derive(Template)]
#[template(path = "bookings/list.html")]
struct BookingListTemplate {
    rows: Vec<BookingRow>,
    has_rows: bool,
    notice: String,
    has_notice: bool,
    cancelled_today: usize,
    cancel_limit: usize,
}

/// Payment page template; the widget mounts on the client secret
#[derive(Template)]
#[template(path = "bookings/payment.html")]
struct PaymentTemplate {
    booking_id: String,
    studio: String,
    room: String,
    total: String,
    client_secret: String,
}

/// "My bookings" page
pub async fn list(State(state): State<AppState>, jar: CookieJar) -> Result<Html<String>> {
    let session = state.sessions.require(&jar).await?;
    render_list(&state, &session, None).await
}

/// Cancel a booking after the local eligibility guard passes
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    jar: CookieJar,
) -> Result<Response> {
    let session = state.sessions.require(&jar).await?;
    let bookings = state.api.my_bookings(&session.access_token).await?;
    let booking = bookings
        .iter()
        .find(|b| b.id == id)
        .ok_or(AppError::NotFound)?;

    let now = Utc::now();
    let today = Local::now().date_naive();
    let cancelled_today = booking::cancellations_on(&bookings, &Local, today);

    if let Err(denied) = booking::check_cancellation(booking.start_time, now, cancelled_today) {
        // Local guard: the request never reaches the backend
        tracing::info!("Cancellation of {} blocked locally: {}", id, denied);
        return Ok(render_list(&state, &session, Some(denied.to_string()))
            .await?
            .into_response());
    }

    let updated = state.api.cancel_booking(&session.access_token, id).await?;
    tracing::info!("Booking {} cancelled, status now {:?}", id, updated.status);

    Ok(Redirect::to("/bookings").into_response())
}

/// Start payment: fetch the client secret and hand it to the widget page
pub async fn pay(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    jar: CookieJar,
) -> Result<Response> {
    let session = state.sessions.require(&jar).await?;
    let bookings = state.api.my_bookings(&session.access_token).await?;
    let booking = bookings
        .iter()
        .find(|b| b.id == id)
        .ok_or(AppError::NotFound)?;

    if !booking.is_payable() {
        let notice = "This booking is not awaiting payment".to_string();
        return Ok(render_list(&state, &session, Some(notice))
            .await?
            .into_response());
    }

    let request = PayBookingRequest {
        instrument_ids: booking.instrument_ids(),
    };
    let intent = state
        .api
        .pay_booking(&session.access_token, id, &request)
        .await?;

    let template = PaymentTemplate {
        booking_id: booking.id.to_string(),
        studio: booking.studio.clone(),
        room: booking.room.clone(),
        total: booking.total_price.to_string(),
        client_secret: intent.client_secret,
    };
    Ok(Html(template.render()?).into_response())
}

/// Internal function to fetch the list and render it with eligibility
async fn render_list(
    state: &AppState,
    session: &Session,
    notice: Option<String>,
) -> Result<Html<String>> {
    let bookings = state.api.my_bookings(&session.access_token).await?;

    let now = Utc::now();
    let today = Local::now().date_naive();
    let cancelled_today = booking::cancellations_on(&bookings, &Local, today);

    let rows: Vec<BookingRow> = bookings.iter().map(|b| row(b, now, cancelled_today)).collect();

    let template = BookingListTemplate {
        has_rows: !rows.is_empty(),
        rows,
        has_notice: notice.is_some(),
        notice: notice.unwrap_or_default(),
        cancelled_today,
        cancel_limit: DAILY_CANCELLATION_LIMIT,
    };

    Ok(Html(template.render()?))
}

fn row(b: &Booking, now: chrono::DateTime<Utc>, cancelled_today: usize) -> BookingRow {
    let start = b.start_time.with_timezone(&Local);
    let end = b.end_time.with_timezone(&Local);

    // Eligibility only matters for bookings that are still live
    let active = matches!(b.status, BookingStatus::Pending | BookingStatus::Confirmed);
    let eligibility = booking::check_cancellation(b.start_time, now, cancelled_today);
    let deny_reason = if active {
        eligibility
            .as_ref()
            .err()
            .map(|denied| denied.to_string())
            .unwrap_or_default()
    } else {
        String::new()
    };

    BookingRow {
        id: b.id.to_string(),
        studio: b.studio.clone(),
        room: b.room.clone(),
        date: start.format("%Y-%m-%d").to_string(),
        time_range: format!("{} - {}", start.format("%H:%M"), end.format("%H:%M")),
        total: b.total_price.to_string(),
        status: b.status.label().to_string(),
        is_paid: b.is_paid,
        payable: b.is_payable(),
        can_cancel: active && eligibility.is_ok(),
        has_deny_reason: !deny_reason.is_empty(),
        deny_reason,
    }
}
