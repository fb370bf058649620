//! Studio catalog and booking-form route handlers

use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Local;
use uuid::Uuid;

use crate::api::requests::CreateBookingRequest;
use crate::booking::{self, BookingQuote};
use crate::cache::STUDIO_LIST_KEY;
use crate::error::Result;
use crate::models::{Studio, StudioSummary};
use crate::AppState;

/// Studio card for the listing page
struct StudioCard {
    id: String,
    name: String,
    description: String,
    room_count: i64,
}

/// Studio listing template
#[derive(Template)]
#[template(path = "studios/list.html")]
struct StudioListTemplate {
    studios: Vec<StudioCard>,
    has_studios: bool,
}

struct InstrumentView {
    id: String,
    name: String,
    price: String,
}

struct RoomView {
    id: String,
    name: String,
    price_per_hour: String,
    min_hours: i32,
    instruments: Vec<InstrumentView>,
    has_instruments: bool,
}

/// Studio detail template with the booking form
#[derive(Template)]
#[template(path = "studios/detail.html")]
struct StudioDetailTemplate {
    id: String,
    name: String,
    description: String,
    rooms: Vec<RoomView>,
    has_rooms: bool,
    error: String,
    has_error: bool,
    has_quote: bool,
    quote_effective_hours: String,
    quote_room_charge: String,
    quote_instruments_total: String,
    quote_total: String,
}

/// Root redirects to the studio listing
pub async fn home() -> Redirect {
    Redirect::to("/studios")
}

/// Studio listing page
pub async fn list(State(state): State<AppState>) -> Result<Html<String>> {
    let studios = load_studio_list(&state).await?;

    let template = StudioListTemplate {
        has_studios: !studios.is_empty(),
        studios: studios
            .iter()
            .map(|s: &StudioSummary| StudioCard {
                id: s.id.to_string(),
                name: s.name.clone(),
                description: s.description.clone(),
                room_count: s.room_count,
            })
            .collect(),
    };

    Ok(Html(template.render()?))
}

/// Studio detail page
pub async fn detail(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Html<String>> {
    let studio = load_studio(&state, id).await?;
    render_detail(&studio, None, None)
}

/// Booking form submission.
///
/// Everything is validated locally first; a failure re-renders the form
/// inline and never reaches the backend. The `quote` action stops after
/// pricing so the user can review the charge before booking.
pub async fn book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    jar: CookieJar,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let session = state.sessions.require(&jar).await?;
    let studio = load_studio(&state, id).await?;

    let action = fields
        .iter()
        .find(|(key, _)| key == "action")
        .map(|(_, val)| val.as_str())
        .unwrap_or("book");

    let validated = match booking::parse_booking_form(&fields)
        .and_then(|form| booking::validate(&form, &studio, Local::now().date_naive()))
    {
        Ok(validated) => validated,
        Err(e) => {
            return Ok(render_detail(&studio, Some(e.to_string()), None)?.into_response());
        }
    };

    let quote = validated.quote();
    if action == "quote" {
        return Ok(render_detail(&studio, None, Some(quote))?.into_response());
    }

    let (start_time, end_time) = match validated.instants(&Local) {
        Ok(instants) => instants,
        Err(e) => {
            return Ok(render_detail(&studio, Some(e.to_string()), None)?.into_response());
        }
    };

    let request = CreateBookingRequest {
        studio_id: studio.id,
        room_id: validated.room.id,
        start_time,
        end_time,
        instrument_ids: validated.selection.instrument_ids(),
    };
    let created = state
        .api
        .create_booking(&session.access_token, &request)
        .await?;
    tracing::info!(
        "Booking {} created for room {}, quoted total {}",
        created.id,
        validated.room.name,
        quote.total
    );

    Ok(Redirect::to("/bookings").into_response())
}

async fn load_studio_list(state: &AppState) -> Result<Arc<Vec<StudioSummary>>> {
    if let Some(cached) = state.cache.studio_list.get(STUDIO_LIST_KEY).await {
        tracing::debug!("Cache HIT for studio listing");
        return Ok(cached);
    }
    tracing::debug!("Cache MISS for studio listing");
    let studios = Arc::new(state.api.studios().await?);
    state
        .cache
        .studio_list
        .insert(STUDIO_LIST_KEY.to_string(), studios.clone())
        .await;
    Ok(studios)
}

async fn load_studio(state: &AppState, id: Uuid) -> Result<Arc<Studio>> {
    if let Some(cached) = state.cache.studios.get(&id).await {
        tracing::debug!("Cache HIT for studio: {}", id);
        return Ok(cached);
    }
    tracing::debug!("Cache MISS for studio: {}", id);
    let studio = Arc::new(state.api.studio(id).await?);
    state.cache.studios.insert(id, studio.clone()).await;
    Ok(studio)
}

/// Internal function to render the detail page
fn render_detail(
    studio: &Studio,
    error: Option<String>,
    quote: Option<BookingQuote>,
) -> Result<Html<String>> {
    let rooms: Vec<RoomView> = studio
        .rooms
        .iter()
        .map(|room| RoomView {
            id: room.id.to_string(),
            name: room.name.clone(),
            price_per_hour: room.price_per_hour.to_string(),
            min_hours: room.min_hours,
            has_instruments: room.instruments.iter().any(|i| i.available),
            instruments: room
                .instruments
                .iter()
                .filter(|i| i.available)
                .map(|i| InstrumentView {
                    id: i.id.to_string(),
                    name: i.name.clone(),
                    price: i.price.to_string(),
                })
                .collect(),
        })
        .collect();

    let template = StudioDetailTemplate {
        id: studio.id.to_string(),
        name: studio.name.clone(),
        description: studio.description.clone(),
        has_rooms: !rooms.is_empty(),
        rooms,
        has_error: error.is_some(),
        error: error.unwrap_or_default(),
        has_quote: quote.is_some(),
        quote_effective_hours: quote
            .as_ref()
            .map(|q| q.effective_hours.to_string())
            .unwrap_or_default(),
        quote_room_charge: quote
            .as_ref()
            .map(|q| q.room_charge.to_string())
            .unwrap_or_default(),
        quote_instruments_total: quote
            .as_ref()
            .map(|q| q.instruments_total.to_string())
            .unwrap_or_default(),
        quote_total: quote.as_ref().map(|q| q.total.to_string()).unwrap_or_default(),
    };

    Ok(Html(template.render()?))
}
