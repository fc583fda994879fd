use super::RouteTable;
use crate::{gate::CapabilityRequirement, models::Role};

/// Admin Routes
///
/// Views reserved for identities with the `ADMIN` role. They cover moderation
/// and oversight: every registered user, every listing including the ones still
/// waiting for approval, and the approve/remove actions on both.
///
/// Access Control:
/// Each entry carries a `[ADMIN]` requirement, so the gate sends an anonymous
/// visitor to `/login` and any other role to `/unauthorized` before the view is
/// rendered. The gate only decides what is shown. The backend re-checks the
/// role on every `/admin/*` call and answers `403` to anyone else. That `403` is
/// an ordinary error and does not end the session.
pub fn admin_routes() -> RouteTable {
    RouteTable::new()
        // /admin-dashboard
        // Moderation console and landing target of the admin login form.
        // Lists users (`GET /admin/users`) and all listings (`GET /admin/properties`).
        // Its actions are `POST /admin/properties/{id}/approve`,
        // `DELETE /admin/properties/{id}` and `DELETE /admin/users/{id}`.
        .protected("/admin-dashboard", CapabilityRequirement::of(&[Role::Admin]))
}
