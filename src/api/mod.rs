//! Typed client for the external booking backend.
//!
//! Every mutation the frontend offers goes through here; responses are
//! re-fetched wholesale afterwards rather than patched locally.

pub mod client;
pub mod requests;
pub mod responses;

pub use client::{ApiError, BookingApi};
