use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Method;

use crate::{
    client::{ApiClient, Credentials},
    error::ApiError,
    models::{Identity, IdentityUpdate, LoginRequest, LoginResponse},
};

// 1. AuthApi Contract
/// AuthApi
///
/// The three calls the Session Store makes to the external API. Keeping this a
/// trait lets the store run against the real HTTP transport in production and
/// against `MockAuthApi` in tests, without the store knowing which.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /login {email, password} -> {user, token}`
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    /// `POST /logout -> 2xx`
    async fn logout(&self) -> Result<(), ApiError>;

    /// `PUT /user {partial} -> Identity`
    async fn update_user(&self, partial: &IdentityUpdate) -> Result<Identity, ApiError>;
}

/// AuthApiState
///
/// The concrete type used to share the auth collaborator with the store.
pub type AuthApiState = Arc<dyn AuthApi>;

// 2. The Real Implementation
/// HttpAuthApi
///
/// Talks to the REST backend through the intercepting `ApiClient`, so logout and
/// update carry the bearer token and any 401 they receive triggers expiry handling.
#[derive(Clone)]
pub struct HttpAuthApi {
    client: ApiClient,
}

impl HttpAuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    /// Sent without credentials: a rejected password is a login failure, not an
    /// expired session.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let builder = self.client.request(Method::POST, &["login"])?.json(request);
        let response = self.client.send(builder, Credentials::Omit).await?;
        response.json::<LoginResponse>().await.map_err(ApiError::Decode)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let builder = self.client.request(Method::POST, &["logout"])?;
        self.client.send(builder, Credentials::Attach).await?;
        Ok(())
    }

    async fn update_user(&self, partial: &IdentityUpdate) -> Result<Identity, ApiError> {
        self.client
            .send_json(Method::PUT, &["user"], Some(partial), Credentials::Attach)
            .await
    }
}

// 3. The Mock Implementation (For Unit Tests)
/// MockAuthApi
///
/// In-memory stand-in for the auth endpoints. Login succeeds only with
/// `accepted_password`; updates are applied to the stored identity the way a
/// server would and the result is returned. Every call is counted.
pub struct MockAuthApi {
    identity: Mutex<Identity>,
    accepted_password: String,
    token: String,
    /// When true, every call fails with a 500 before touching anything.
    pub should_fail: bool,
    logins: AtomicUsize,
    logouts: AtomicUsize,
    updates: AtomicUsize,
}

impl MockAuthApi {
    pub fn new(identity: Identity, accepted_password: &str) -> Self {
        Self {
            token: format!("mock-token-{}", identity.id),
            identity: Mutex::new(identity),
            accepted_password: accepted_password.to_string(),
            should_fail: false,
            logins: AtomicUsize::new(0),
            logouts: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
        }
    }

    pub fn new_failing(identity: Identity, accepted_password: &str) -> Self {
        Self {
            should_fail: true,
            ..Self::new(identity, accepted_password)
        }
    }

    /// (logins, logouts, updates) issued so far.
    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.logins.load(Ordering::SeqCst),
            self.logouts.load(Ordering::SeqCst),
            self.updates.load(Ordering::SeqCst),
        )
    }

    fn simulated_failure(&self) -> Result<(), ApiError> {
        if self.should_fail {
            return Err(ApiError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        self.simulated_failure()?;

        let identity = self.identity.lock().clone();
        if request.email != identity.email || request.password != self.accepted_password {
            return Err(ApiError::Unauthorized);
        }
        Ok(LoginResponse {
            user: identity,
            token: self.token.clone(),
        })
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        self.simulated_failure()
    }

    async fn update_user(&self, partial: &IdentityUpdate) -> Result<Identity, ApiError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.simulated_failure()?;

        let mut identity = self.identity.lock();
        // Servers normalise what they store; mimic that for email.
        if let Some(email) = &partial.email {
            identity.email = email.trim().to_lowercase();
        }
        if let Some(full_name) = &partial.full_name {
            identity.full_name = full_name.clone();
        }
        Ok(identity.clone())
    }
}
