//! Booking API endpoints.
//!
//! Thin typed wrappers over [`ApiClient`]: each read adds its tags to the
//! caller's options, each write names the [`Mutation`] it performs.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RequestError;
use crate::models::{
    Booking, Event, EventQuery, EventUpdate, NewBooking, NewEvent, NewSocialHub, Profile,
    ProfileUpdate, SocialHub,
};
use crate::request::client::ApiClient;
use crate::request::invalidation::{read_tag, Mutation};
use crate::request::options::RequestOptions;
use crate::request::transport::{Method, Transport};

// == Booking Api ==
#[derive(Debug)]
pub struct BookingApi<T> {
    client: ApiClient<T>,
}

impl<T: Transport> BookingApi<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    async fn read<R, P>(
        &self,
        endpoint: &str,
        params: &P,
        options: RequestOptions,
        tags: Vec<String>,
    ) -> Result<R, RequestError>
    where
        R: Serialize + DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let options = options.with_tags(tags);
        self.client.get(endpoint, params, &options).await
    }

    // == Events ==
    pub async fn list_events(
        &self,
        query: &EventQuery,
        options: RequestOptions,
    ) -> Result<Vec<Event>, RequestError> {
        self.read("events", query, options, vec![read_tag::EVENTS.to_string()])
            .await
    }

    pub async fn get_event(&self, event_id: u64, options: RequestOptions) -> Result<Event, RequestError> {
        self.read(
            &format!("events/{}", event_id),
            &(),
            options,
            vec![read_tag::event(event_id)],
        )
        .await
    }

    pub async fn create_event(&self, event: &NewEvent) -> Result<Event, RequestError> {
        self.client
            .mutate(Method::Post, "events", Some(event), Mutation::CreateEvent)
            .await
    }

    pub async fn update_event(&self, event_id: u64, update: &EventUpdate) -> Result<Event, RequestError> {
        self.client
            .mutate(
                Method::Patch,
                &format!("events/{}", event_id),
                Some(update),
                Mutation::UpdateEvent { event_id },
            )
            .await
    }

    pub async fn delete_event(&self, event_id: u64) -> Result<(), RequestError> {
        self.client
            .mutate_empty(
                Method::Delete,
                &format!("events/{}", event_id),
                Mutation::DeleteEvent { event_id },
            )
            .await
    }

    // == Bookings ==
    pub async fn list_bookings(&self, options: RequestOptions) -> Result<Vec<Booking>, RequestError> {
        self.read("bookings", &(), options, vec![read_tag::BOOKINGS.to_string()])
            .await
    }

    pub async fn create_booking(&self, booking: &NewBooking) -> Result<Booking, RequestError> {
        self.client
            .mutate(
                Method::Post,
                "bookings",
                Some(booking),
                Mutation::CreateBooking {
                    event_id: booking.event_id,
                },
            )
            .await
    }

    /// Cancels a booking. The event id is needed to refresh seat counts.
    pub async fn cancel_booking(&self, booking_id: u64, event_id: u64) -> Result<(), RequestError> {
        self.client
            .mutate_empty(
                Method::Delete,
                &format!("bookings/{}", booking_id),
                Mutation::CancelBooking { event_id },
            )
            .await
    }

    // == Social Hubs ==
    pub async fn list_social_hubs(&self, options: RequestOptions) -> Result<Vec<SocialHub>, RequestError> {
        self.read(
            "social-hubs",
            &(),
            options,
            vec![read_tag::SOCIAL_HUBS.to_string()],
        )
        .await
    }

    pub async fn get_social_hub(&self, hub_id: u64, options: RequestOptions) -> Result<SocialHub, RequestError> {
        self.read(
            &format!("social-hubs/{}", hub_id),
            &(),
            options,
            vec![read_tag::social_hub(hub_id)],
        )
        .await
    }

    pub async fn create_social_hub(&self, hub: &NewSocialHub) -> Result<SocialHub, RequestError> {
        self.client
            .mutate(Method::Post, "social-hubs", Some(hub), Mutation::CreateSocialHub)
            .await
    }

    /// Joins a hub. Backends answering 204 yield `None`.
    pub async fn join_social_hub(&self, hub_id: u64) -> Result<Option<SocialHub>, RequestError> {
        self.client
            .mutate::<_, ()>(
                Method::Post,
                &format!("social-hubs/{}/members", hub_id),
                None,
                Mutation::JoinSocialHub { hub_id },
            )
            .await
    }

    pub async fn leave_social_hub(&self, hub_id: u64) -> Result<(), RequestError> {
        self.client
            .mutate_empty(
                Method::Delete,
                &format!("social-hubs/{}/members", hub_id),
                Mutation::LeaveSocialHub { hub_id },
            )
            .await
    }

    // == Profile ==
    pub async fn get_profile(&self, options: RequestOptions) -> Result<Profile, RequestError> {
        self.read("me", &(), options, vec![read_tag::PROFILE.to_string()])
            .await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, RequestError> {
        self.client
            .mutate(Method::Patch, "me", Some(update), Mutation::UpdateProfile)
            .await
    }
}
