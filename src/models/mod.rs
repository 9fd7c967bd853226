//! Data models
//!
//! Booking API bodies used by the request layer, and the response bodies of
//! the inspection HTTP API.

pub mod booking;
pub mod responses;

// Re-export commonly used types
pub use booking::{
    Booking, BookingStatus, Event, EventQuery, EventUpdate, NewBooking, NewEvent, NewSocialHub,
    Profile, ProfileUpdate, SocialHub,
};
pub use responses::{
    ClearResponse, CountResponse, DeleteResponse, HealthResponse, KeysResponse,
};
