//! Mutation to tag dependency graph.
//!
//! Every cached read records its response under one or more tags; every
//! mutation lists the tags whose reads it can make stale. The mapping is
//! maintained by hand. Leaving a tag out of a mutation does not fail at
//! runtime: the affected reads just stay stale until their TTL runs out, so
//! each mapping is pinned by the tests below.

/// Tags attached by cached reads.
pub mod read_tag {
    /// Any event listing
    pub const EVENTS: &str = "events";
    /// The current user's bookings
    pub const BOOKINGS: &str = "bookings";
    /// Social hub listings
    pub const SOCIAL_HUBS: &str = "social_hubs";
    /// The current user's profile
    pub const PROFILE: &str = "profile";

    /// Detail view of one event.
    pub fn event(event_id: u64) -> String {
        format!("event_{}", event_id)
    }

    /// Detail view of one social hub.
    pub fn social_hub(hub_id: u64) -> String {
        format!("social_hub_{}", hub_id)
    }
}

// == Mutation ==
/// Every state-changing call the booking client makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    CreateEvent,
    UpdateEvent { event_id: u64 },
    DeleteEvent { event_id: u64 },
    CreateBooking { event_id: u64 },
    CancelBooking { event_id: u64 },
    CreateSocialHub,
    JoinSocialHub { hub_id: u64 },
    LeaveSocialHub { hub_id: u64 },
    UpdateProfile,
}

impl Mutation {
    /// Tags to invalidate once this mutation has succeeded.
    pub fn tags(&self) -> Vec<String> {
        use read_tag::*;

        match *self {
            Mutation::CreateEvent => vec![EVENTS.to_string()],
            Mutation::UpdateEvent { event_id } => vec![EVENTS.to_string(), event(event_id)],
            Mutation::DeleteEvent { event_id } => {
                vec![EVENTS.to_string(), event(event_id), BOOKINGS.to_string()]
            }
            // Seat counts show up on event listings and event detail
            Mutation::CreateBooking { event_id } | Mutation::CancelBooking { event_id } => {
                vec![BOOKINGS.to_string(), EVENTS.to_string(), event(event_id)]
            }
            Mutation::CreateSocialHub => vec![SOCIAL_HUBS.to_string()],
            Mutation::JoinSocialHub { hub_id } | Mutation::LeaveSocialHub { hub_id } => {
                vec![SOCIAL_HUBS.to_string(), social_hub(hub_id)]
            }
            Mutation::UpdateProfile => vec![PROFILE.to_string()],
        }
    }
}
