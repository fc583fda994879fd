use std::sync::Arc;

// --- Module Structure ---

// Access-control core: session state, the navigation gate and the transport
// interceptor that keeps the two honest.
pub mod auth;
pub mod client;
pub mod gate;
pub mod navigation;
pub mod session;

// Everything the views need beyond the core.
pub mod config;
pub mod error;
pub mod listings;
pub mod models;
pub mod mortgage;

// Static permission table (public, authenticated, admin).
pub mod routes;

// --- Public Re-exports ---

pub use auth::{AuthApi, AuthApiState, HttpAuthApi, MockAuthApi};
pub use client::{ApiClient, Credentials};
pub use config::AppConfig;
pub use error::{ApiError, ConfigurationError, SessionError};
pub use gate::{AccessGate, CapabilityRequirement, Decision};
pub use listings::ListingClient;
pub use navigation::{ChannelNavigator, Navigator, NavigatorState, RecordingNavigator, Redirect};
pub use session::{SessionCell, SessionState, SessionStore};

use routes::{Access, RouteMatch, RouteTable};

/// AppState
///
/// Everything the UI layer needs, wired once at startup and passed explicitly.
/// The store, the gate and the interceptor share one `SessionCell`; nothing is
/// looked up globally, so a component that needs the session must be handed it
/// here.
#[derive(Clone)]
pub struct AppState {
    /// Session Store: login, logout, profile update, current identity.
    pub session: SessionState,
    /// Access Gate over the same session.
    pub gate: AccessGate,
    /// Listing, inquiry, review and admin calls through the interceptor.
    pub listings: ListingClient,
    pub routes: Arc<RouteTable>,
    pub navigator: NavigatorState,
    pub config: AppConfig,
}

/// Navigation
///
/// Result of asking to show a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation<'a> {
    Render(RouteMatch<'a>),
    Redirected(Redirect),
    NotFound,
}

impl AppState {
    /// new
    ///
    /// Production wiring: the store talks to the REST backend through the same
    /// intercepting client as the listing calls.
    pub fn new(config: AppConfig, navigator: NavigatorState) -> Result<Self, ConfigurationError> {
        let cell = SessionCell::shared();
        let client = ApiClient::new(&config, cell.clone(), navigator.clone())?;
        let auth = Arc::new(HttpAuthApi::new(client.clone())) as AuthApiState;
        Ok(Self::assemble(config, navigator, cell, client, auth))
    }

    /// with_auth_api
    ///
    /// Same wiring with a substitute auth collaborator (e.g. `MockAuthApi`).
    pub fn with_auth_api(
        config: AppConfig,
        navigator: NavigatorState,
        auth: AuthApiState,
    ) -> Result<Self, ConfigurationError> {
        let cell = SessionCell::shared();
        let client = ApiClient::new(&config, cell.clone(), navigator.clone())?;
        Ok(Self::assemble(config, navigator, cell, client, auth))
    }

    fn assemble(
        config: AppConfig,
        navigator: NavigatorState,
        cell: Arc<SessionCell>,
        client: ApiClient,
        auth: AuthApiState,
    ) -> Self {
        let session = Arc::new(SessionStore::new(cell, auth)) as SessionState;
        Self {
            gate: AccessGate::new(session.clone()),
            session,
            listings: ListingClient::new(client),
            routes: Arc::new(RouteTable::standard()),
            navigator,
            config,
        }
    }

    /// navigate
    ///
    /// Resolves `path` against the route table and runs the gate for protected
    /// entries. A denial is reported to the navigator and returned as
    /// `Redirected`; it is re-evaluated on every call, never cached.
    pub fn navigate(&self, path: &str) -> Navigation<'_> {
        let Some(target) = self.routes.resolve(path) else {
            return Navigation::NotFound;
        };

        let requirement = match &target.entry.access {
            Access::Public => return Navigation::Render(target),
            Access::Protected(requirement) => requirement,
        };

        match self.gate.evaluate(requirement).redirect() {
            None => Navigation::Render(target),
            Some(redirect) => {
                tracing::info!(path, to = redirect.path(), "navigation redirected");
                self.navigator.redirect(redirect);
                Navigation::Redirected(redirect)
            }
        }
    }
}
