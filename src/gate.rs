use std::collections::BTreeSet;

use crate::{
    error::ConfigurationError,
    models::{Identity, Role},
    navigation::Redirect,
    session::SessionState,
};

/// CapabilityRequirement
///
/// The roles allowed to view a protected target. Order is irrelevant and an
/// empty set means "any authenticated identity".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityRequirement {
    roles: BTreeSet<Role>,
}

impl CapabilityRequirement {
    /// Any authenticated identity.
    pub fn authenticated() -> Self {
        Self::default()
    }

    pub fn of(roles: &[Role]) -> Self {
        Self {
            roles: roles.iter().copied().collect(),
        }
    }

    /// Builds a requirement from wire-form role names, failing on the first name
    /// outside the closed role set.
    pub fn parse<I, S>(roles: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let roles = roles
            .into_iter()
            .map(|name| name.as_ref().parse::<Role>())
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { roles })
    }

    pub fn is_open(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn permits(&self, role: Role) -> bool {
        self.is_open() || self.roles.contains(&role)
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().copied()
    }
}

/// Decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Allow,
    RedirectLogin,
    RedirectUnauthorized,
}

impl Decision {
    pub fn redirect(self) -> Option<Redirect> {
        match self {
            Decision::Allow => None,
            Decision::RedirectLogin => Some(Redirect::Login),
            Decision::RedirectUnauthorized => Some(Redirect::Unauthorized),
        }
    }

    pub fn is_allowed(self) -> bool {
        self == Decision::Allow
    }
}

/// decide
///
/// Pure and total over (identity, requirement).
pub fn decide(identity: Option<&Identity>, requirement: &CapabilityRequirement) -> Decision {
    match identity {
        None => Decision::RedirectLogin,
        Some(identity) if !requirement.permits(identity.role) => Decision::RedirectUnauthorized,
        Some(_) => Decision::Allow,
    }
}

/// AccessGate
///
/// Evaluated synchronously on every navigation against whatever the Session
/// Store holds at that instant. It has no state of its own, never touches the
/// network and never errors: denial is a decision.
#[derive(Clone)]
pub struct AccessGate {
    session: SessionState,
}

impl AccessGate {
    pub fn new(session: SessionState) -> Self {
        Self { session }
    }

    pub fn evaluate(&self, requirement: &CapabilityRequirement) -> Decision {
        let identity = self.session.current_identity();
        let decision = decide(identity.as_ref(), requirement);
        if !decision.is_allowed() {
            tracing::debug!(
                ?decision,
                role = identity.as_ref().map(|i| i.role.as_str()),
                "navigation denied"
            );
        }
        decision
    }
}
