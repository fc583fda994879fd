use super::RouteTable;
use crate::navigation::Redirect;

/// Public Routes
///
/// Views anyone may open, logged in or not: the landing page, the role-specific
/// login and signup forms, listing search and detail, and the mortgage
/// calculator.
///
/// Access Control:
/// These entries never consult the session. The two redirect targets are part of
/// this set and must stay here. A protected `/login` would make every login
/// redirect loop back to itself.
pub fn public_routes() -> RouteTable {
    RouteTable::new()
        // /
        // Landing page with the buyer/seller/admin chooser.
        .public("/")
        // /{role}-login, /{role}-signup
        // Role-specific forms. Login posts to `POST /login` and then navigates
        // to `Role::landing_path()`. Signup posts to `POST /{role}/signup`
        // without credentials and does not log in.
        .public("/buyer-login")
        .public("/buyer-signup")
        .public("/seller-login")
        .public("/seller-signup")
        .public("/admin-login")
        .public("/admin-signup")
        // /properties
        // Search (`GET /properties` with only the filters that are set). The API
        // hides unapproved listings.
        .public("/properties")
        // /property/{id}
        // Detail view (`GET /properties/{id}`) with reviews, inquiry and
        // appointment forms. Those forms call authenticated endpoints, and the
        // backend rejects them for anonymous visitors.
        .public("/property/{id}")
        // /mortgage-calculator
        // Purely local, no API calls.
        .public("/mortgage-calculator")
        // Redirect targets.
        .public(Redirect::Login.path())
        .public(Redirect::Unauthorized.path())
}
