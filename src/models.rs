use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ConfigurationError;

// --- Identity & Session Schemas ---

/// Role
///
/// The closed set of principals the application knows about. The wire form is
/// the upper-case name (`"BUYER"`, `"SELLER"`, `"ADMIN"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Role {
    Buyer,
    Seller,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Buyer, Role::Seller, Role::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Buyer => "BUYER",
            Role::Seller => "SELLER",
            Role::Admin => "ADMIN",
        }
    }

    /// Where the role's login form sends the user after a successful login.
    pub fn landing_path(self) -> &'static str {
        match self {
            Role::Buyer => "/buyer-dashboard",
            Role::Seller => "/seller-dashboard",
            Role::Admin => "/admin-dashboard",
        }
    }

    /// Path segment used by the role-specific signup endpoints.
    pub(crate) fn signup_segment(self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ConfigurationError;

    /// Exact, case-sensitive match on the wire names. Anything else is a
    /// configuration mistake, never "nobody qualifies".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ConfigurationError::UnknownRole(s.to_string()))
    }
}

/// Identity
///
/// The authenticated principal as returned by the API. Only the profile-update
/// path may replace it, and that path never changes `id` or `role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

/// LoginRequest
///
/// Body of `POST /login`. The password is passed straight through and never
/// logged.
#[derive(Clone, Serialize, TS)]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// LoginResponse
///
/// `{ "user": Identity, "token": "<opaque>" }`
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    pub user: Identity,
    pub token: String,
}

/// IdentityUpdate
///
/// Partial profile update for `PUT /user`. Only provided fields are sent. There
/// is no `id` or `role` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct IdentityUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl IdentityUpdate {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.full_name.is_none()
    }
}

/// SignupRequest
///
/// Body of the role-specific signup endpoints (`POST /{buyer|seller|admin}/signup`).
#[derive(Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// UserProfile
///
/// Richer profile view served by `GET /user/profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserProfile {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// UserSummary
///
/// The nested author/buyer record embedded in reviews and inquiries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserSummary {
    pub full_name: String,
}

// --- Listing Schemas ---

/// Property
///
/// A listing. Dashboards receive trimmed-down versions, so everything beyond
/// the headline fields falls back to a default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Property {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub area: f64,
    #[serde(default)]
    pub description: String,
    // "FOR_SALE" | "FOR_RENT"
    #[serde(rename = "type", default)]
    pub listing_type: String,
    // Image URLs, display only.
    #[serde(default)]
    pub images: Vec<String>,
    // Set by an administrator; unapproved listings are hidden from search.
    #[serde(default)]
    pub approved: bool,
}

/// PropertyFilter
///
/// Query parameters for `GET /properties`. Unset filters are omitted from the
/// query string entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PropertyFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_area: Option<f64>,
}

/// NewProperty
///
/// Seller submission for `POST /properties`. New listings start unapproved.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub area: f64,
    #[serde(rename = "type")]
    pub listing_type: String,
}

/// PropertyUpdate
///
/// Partial update for `PUT /properties/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PropertyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<String>,
}

// --- Interaction Schemas ---

/// Inquiry
///
/// A buyer's message about a listing. Buyers see the property, sellers also
/// see who asked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Inquiry {
    pub id: String,
    pub message: String,
    #[serde(default)]
    pub property: Option<Property>,
    #[serde(default)]
    pub buyer: Option<UserSummary>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct NewInquiry {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Review {
    pub rating: u8,
    pub comment: String,
    pub user: UserSummary,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// NewReview
///
/// `rating` must be within `1..=5`; the client checks this before sending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct NewReview {
    pub rating: u8,
    pub comment: String,
}

impl NewReview {
    pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;
}

/// AppointmentRequest
///
/// Viewing request for `POST /appointments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AppointmentRequest {
    pub property_id: String,
    #[ts(type = "string")]
    pub date: NaiveDate,
    #[ts(type = "string")]
    pub time: NaiveTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
