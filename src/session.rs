use std::{fmt, sync::Arc};

use parking_lot::RwLock;

use crate::{
    auth::AuthApiState,
    error::SessionError,
    models::{Identity, IdentityUpdate, LoginRequest},
};

/// CredentialToken
///
/// The opaque bearer value issued at login. It is stored, attached and cleared,
/// never parsed. `Debug` is redacted so the token cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialToken(String);

impl CredentialToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CredentialToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialToken(***)")
    }
}

/// Epoch
///
/// Identifies one established session. It advances whenever a session is
/// established or cleared, so a response or a 401 that belongs to an earlier
/// session can be recognised and discarded.
pub type Epoch = u64;

#[derive(Debug, Default)]
struct Slot {
    current: Option<(Identity, CredentialToken)>,
    epoch: Epoch,
}

/// SessionCell
///
/// The single slot behind the Session Store and the only place session state is
/// written. Every write replaces identity and token together under one lock, so
/// readers observe either the previous value or the new one.
///
/// The lock is never held across an `.await`.
#[derive(Debug, Default)]
pub struct SessionCell {
    slot: RwLock<Slot>,
}

impl SessionCell {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn identity(&self) -> Option<Identity> {
        self.slot.read().current.as_ref().map(|(identity, _)| identity.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.slot.read().current.is_some()
    }

    pub fn epoch(&self) -> Epoch {
        self.slot.read().epoch
    }

    /// Identity and the epoch it belongs to, read atomically.
    pub fn snapshot(&self) -> Option<(Identity, Epoch)> {
        let slot = self.slot.read();
        slot.current
            .as_ref()
            .map(|(identity, _)| (identity.clone(), slot.epoch))
    }

    /// Token and the epoch it belongs to, read atomically. Used by the
    /// interceptor before each request.
    pub fn credentials(&self) -> Option<(CredentialToken, Epoch)> {
        let slot = self.slot.read();
        slot.current
            .as_ref()
            .map(|(_, token)| (token.clone(), slot.epoch))
    }

    /// ANONYMOUS | AUTHENTICATED -> AUTHENTICATED (new session).
    pub(crate) fn establish(&self, identity: Identity, token: CredentialToken) -> Epoch {
        let mut slot = self.slot.write();
        slot.epoch += 1;
        slot.current = Some((identity, token));
        slot.epoch
    }

    /// AUTHENTICATED -> AUTHENTICATED with a replaced identity, provided the
    /// session that issued the update is still the current one.
    pub(crate) fn replace_identity(
        &self,
        issued_at: Epoch,
        identity: Identity,
    ) -> Result<(), SessionError> {
        let mut slot = self.slot.write();
        if slot.epoch != issued_at {
            return Err(if slot.current.is_none() {
                SessionError::NotAuthenticated
            } else {
                SessionError::Update
            });
        }
        match slot.current.as_mut() {
            Some((current, _)) => {
                *current = identity;
                Ok(())
            }
            None => Err(SessionError::NotAuthenticated),
        }
    }

    /// Unconditional local clear. Returns whether a session was present.
    pub(crate) fn clear(&self) -> bool {
        let mut slot = self.slot.write();
        match slot.current.take() {
            Some(_) => {
                slot.epoch += 1;
                true
            }
            None => false,
        }
    }

    /// Clear on server-signalled expiry, but only if the rejected credential
    /// still belongs to the current session. Returns whether it cleared, which
    /// is what makes the login redirect fire exactly once per session.
    pub(crate) fn expire(&self, rejected: Epoch) -> bool {
        let mut slot = self.slot.write();
        if slot.epoch != rejected || slot.current.is_none() {
            return false;
        }
        slot.current = None;
        slot.epoch += 1;
        true
    }
}

/// SessionStore
///
/// Single source of truth for "who is logged in". Each mutation issues exactly
/// one call through the `AuthApi` collaborator and never retries; retry and
/// timeout policy belong to the transport.
pub struct SessionStore {
    cell: Arc<SessionCell>,
    api: AuthApiState,
}

/// SessionState
///
/// Shared handle to the store, handed explicitly to the gate and the UI layer.
pub type SessionState = Arc<SessionStore>;

impl SessionStore {
    pub fn new(cell: Arc<SessionCell>, api: AuthApiState) -> Self {
        Self { cell, api }
    }

    /// The slot this store writes to. The interceptor is built on the same cell
    /// so that expiry goes through the store's own clear primitive.
    pub fn cell(&self) -> Arc<SessionCell> {
        self.cell.clone()
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.cell.identity()
    }

    /// login
    ///
    /// Installs identity and token together on success. On any failure the
    /// prior state is untouched and the caller learns only that it failed.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, SessionError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self.api.login(&request).await.map_err(|e| {
            tracing::warn!(error = %e, "login rejected");
            SessionError::Authentication
        })?;

        let identity = response.user;
        let epoch = self
            .cell
            .establish(identity.clone(), CredentialToken::new(response.token));
        tracing::info!(user_id = %identity.id, role = %identity.role, epoch, "session established");
        Ok(identity)
    }

    /// logout
    ///
    /// Server-side invalidation is attempted once; local state is cleared
    /// whatever the outcome.
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            tracing::warn!(error = %e, "server-side logout failed, clearing local session anyway");
        }
        if self.cell.clear() {
            tracing::info!("session cleared");
        }
    }

    /// update_identity
    ///
    /// The server's response replaces the identity as-is; nothing is merged
    /// locally. A response that alters `id` or `role` is treated as a failure.
    pub async fn update_identity(&self, partial: IdentityUpdate) -> Result<Identity, SessionError> {
        let (before, issued_at) = self
            .cell
            .snapshot()
            .ok_or(SessionError::NotAuthenticated)?;

        let updated = self.api.update_user(&partial).await.map_err(|e| {
            tracing::warn!(error = %e, user_id = %before.id, "profile update rejected");
            SessionError::Update
        })?;

        if updated.id != before.id || updated.role != before.role {
            tracing::warn!(user_id = %before.id, "profile update response changed id or role, discarding");
            return Err(SessionError::Update);
        }

        self.cell.replace_identity(issued_at, updated.clone())?;
        tracing::debug!(user_id = %updated.id, "identity replaced");
        Ok(updated)
    }
}
