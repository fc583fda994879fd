use super::RouteTable;
use crate::{gate::CapabilityRequirement, models::Role};

/// Authenticated Routes
///
/// Views that need a logged-in identity. Buyers get their saved listings and
/// sent inquiries. Sellers get their own listings, the inquiries they received
/// and the listing forms. Every role shares the profile page.
///
/// Access Control:
/// Every entry names the roles allowed to see it. Evaluation happens on each
/// navigation against the session as it is at that moment, so a logout or an
/// expired token takes effect on the very next navigation. A wrong role is sent
/// to `/unauthorized`; no identity at all is sent to `/login`. Ownership checks
/// (a seller editing someone else's listing) are the backend's job.
pub fn authenticated_routes() -> RouteTable {
    RouteTable::new()
        // --- Buyer ---
        // /buyer-dashboard
        // Buyer home and landing target of the buyer login form. Shows
        // favourites (`GET /buyer/favorite-properties`) and sent inquiries
        // (`GET /buyer/inquiries`).
        .protected("/buyer-dashboard", CapabilityRequirement::of(&[Role::Buyer]))
        // /favorites
        // Full favourite list (`GET /user/favorites`) with removal
        // (`DELETE /user/favorites/{id}`).
        .protected("/favorites", CapabilityRequirement::of(&[Role::Buyer]))
        // --- Seller ---
        // /seller-dashboard
        // Seller home and landing target of the seller login form. Shows own
        // listings (`GET /seller/properties`) and received inquiries
        // (`GET /seller/inquiries`).
        .protected("/seller-dashboard", CapabilityRequirement::of(&[Role::Seller]))
        // /create-property
        // New listing form (`POST /properties`). New listings are unapproved
        // until an administrator approves them.
        .protected("/create-property", CapabilityRequirement::of(&[Role::Seller]))
        // /edit-property/{id}
        // Edit form for one of the seller's listings (`PUT /properties/{id}`).
        .protected("/edit-property/{id}", CapabilityRequirement::of(&[Role::Seller]))
        // --- Shared ---
        // /profile
        // Profile view (`GET /user/profile`) and edit (`PUT /user`). The edit
        // goes through the session store so the current identity stays in sync.
        .protected("/profile", CapabilityRequirement::of(&Role::ALL))
}
