//! Domain projections fetched from the booking backend

pub mod booking;
pub mod studio;
pub mod user;

pub use booking::{Booking, BookingInstrument, BookingStatus};
pub use studio::{Instrument, Room, Studio, StudioSummary};
pub use user::UserProfile;
