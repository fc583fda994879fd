use reqwest::Method;

use crate::{
    client::{ApiClient, Credentials},
    error::ApiError,
    models::{
        AppointmentRequest, Identity, Inquiry, NewInquiry, NewProperty, NewReview, Property,
        PropertyFilter, PropertyUpdate, Review, Role, SignupRequest, UserProfile,
    },
};

/// ListingClient
///
/// Typed calls for every view that is not part of the session core. All of them
/// go through the intercepting `ApiClient`, so an expired token on any of these
/// requests ends the session exactly as it would for a profile update.
///
/// Authorization is the server's job; these calls do not re-check roles.
#[derive(Clone)]
pub struct ListingClient {
    client: ApiClient,
}

impl ListingClient {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    // --- Properties ---

    /// search
    ///
    /// `GET /properties` with only the filters that are set.
    pub async fn search(&self, filter: &PropertyFilter) -> Result<Vec<Property>, ApiError> {
        self.client.get_json_with_query(&["properties"], filter).await
    }

    pub async fn property(&self, id: &str) -> Result<Property, ApiError> {
        self.client.get_json(&["properties", id]).await
    }

    /// create_property
    ///
    /// [Seller] Submits a listing. The server stores it as unapproved until an
    /// administrator approves it.
    pub async fn create_property(&self, property: &NewProperty) -> Result<Property, ApiError> {
        self.client
            .send_json(Method::POST, &["properties"], Some(property), Credentials::Attach)
            .await
    }

    /// [Seller] Partial update; only the set fields are sent.
    pub async fn update_property(
        &self,
        id: &str,
        update: &PropertyUpdate,
    ) -> Result<Property, ApiError> {
        self.client
            .send_json(
                Method::PUT,
                &["properties", id],
                Some(update),
                Credentials::Attach,
            )
            .await
    }

    /// [Seller] Listings owned by the current seller, approved or not.
    pub async fn seller_properties(&self) -> Result<Vec<Property>, ApiError> {
        self.client.get_json(&["seller", "properties"]).await
    }

    // --- Inquiries ---

    pub async fn send_inquiry(&self, property_id: &str, message: &str) -> Result<(), ApiError> {
        let body = NewInquiry {
            message: message.to_string(),
        };
        self.client
            .execute(
                Method::POST,
                &["properties", property_id, "inquiries"],
                Some(&body),
                Credentials::Attach,
            )
            .await
    }

    pub async fn buyer_inquiries(&self) -> Result<Vec<Inquiry>, ApiError> {
        self.client.get_json(&["buyer", "inquiries"]).await
    }

    pub async fn seller_inquiries(&self) -> Result<Vec<Inquiry>, ApiError> {
        self.client.get_json(&["seller", "inquiries"]).await
    }

    // --- Reviews ---

    pub async fn reviews(&self, property_id: &str) -> Result<Vec<Review>, ApiError> {
        self.client
            .get_json(&["properties", property_id, "reviews"])
            .await
    }

    /// submit_review
    ///
    /// Ratings outside `1..=5` are rejected before anything is sent.
    pub async fn submit_review(&self, property_id: &str, review: &NewReview) -> Result<(), ApiError> {
        if !NewReview::RATING_RANGE.contains(&review.rating) {
            return Err(ApiError::Invalid(format!(
                "rating must be between 1 and 5, got {}",
                review.rating
            )));
        }
        self.client
            .execute(
                Method::POST,
                &["properties", property_id, "reviews"],
                Some(review),
                Credentials::Attach,
            )
            .await
    }

    // --- Favourites ---

    pub async fn favorites(&self) -> Result<Vec<Property>, ApiError> {
        self.client.get_json(&["user", "favorites"]).await
    }

    pub async fn remove_favorite(&self, property_id: &str) -> Result<(), ApiError> {
        self.client
            .execute(
                Method::DELETE,
                &["user", "favorites", property_id],
                None::<&()>,
                Credentials::Attach,
            )
            .await
    }

    /// [Buyer] The trimmed favourite list shown on the buyer dashboard.
    pub async fn buyer_favorite_properties(&self) -> Result<Vec<Property>, ApiError> {
        self.client.get_json(&["buyer", "favorite-properties"]).await
    }

    // --- Appointments ---

    pub async fn schedule_appointment(&self, request: &AppointmentRequest) -> Result<(), ApiError> {
        self.client
            .execute(Method::POST, &["appointments"], Some(request), Credentials::Attach)
            .await
    }

    // --- Accounts ---

    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.client.get_json(&["user", "profile"]).await
    }

    /// signup
    ///
    /// `POST /{buyer|seller|admin}/signup`. Sent without credentials; signing up
    /// does not log in.
    pub async fn signup(&self, role: Role, request: &SignupRequest) -> Result<(), ApiError> {
        self.client
            .execute(
                Method::POST,
                &[role.signup_segment(), "signup"],
                Some(request),
                Credentials::Omit,
            )
            .await
    }

    // --- Administration ---

    pub async fn admin_users(&self) -> Result<Vec<Identity>, ApiError> {
        self.client.get_json(&["admin", "users"]).await
    }

    /// [Admin] Every listing, including those awaiting approval.
    pub async fn admin_properties(&self) -> Result<Vec<Property>, ApiError> {
        self.client.get_json(&["admin", "properties"]).await
    }

    pub async fn approve_property(&self, property_id: &str) -> Result<(), ApiError> {
        self.client
            .execute(
                Method::POST,
                &["admin", "properties", property_id, "approve"],
                None::<&()>,
                Credentials::Attach,
            )
            .await
    }

    pub async fn remove_property(&self, property_id: &str) -> Result<(), ApiError> {
        self.client
            .execute(
                Method::DELETE,
                &["admin", "properties", property_id],
                None::<&()>,
                Credentials::Attach,
            )
            .await
    }

    pub async fn remove_user(&self, user_id: &str) -> Result<(), ApiError> {
        self.client
            .execute(
                Method::DELETE,
                &["admin", "users", user_id],
                None::<&()>,
                Credentials::Attach,
            )
            .await
    }
}
