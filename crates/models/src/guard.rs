use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub const SIGN_IN_PATH: &str = "/auth/sign-in";
pub const FORBIDDEN_PATH: &str = "/errors/403";
pub const NOT_FOUND_PATH: &str = "/errors/404";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Stud,
    Staff,
    Admin,
}

/// What is known about the current session when a route is entered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionContext {
    /// The session is still being resolved
    pub loading: bool,
    pub authenticated: bool,
    pub role: Option<Role>,
}

impl SessionContext {
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(role: Option<Role>) -> Self {
        Self {
            loading: false,
            authenticated: true,
            role,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Allowed,
    /// Render nothing until the session is known
    Loading,
    RedirectSignIn,
    RedirectForbidden,
}

impl GuardOutcome {
    pub fn redirect(self) -> Option<&'static str> {
        match self {
            Self::RedirectSignIn => Some(SIGN_IN_PATH),
            Self::RedirectForbidden => Some(FORBIDDEN_PATH),
            Self::Allowed | Self::Loading => None,
        }
    }
}

/// Admits sessions whose role belongs to a fixed set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteGuard {
    roles: &'static [Role],
}

impl RouteGuard {
    pub const STUDENT: Self = Self::new(&[Role::Stud]);
    pub const STAFF: Self = Self::new(&[Role::Staff]);
    pub const ADMIN: Self = Self::new(&[Role::Admin]);

    pub const fn new(roles: &'static [Role]) -> Self {
        Self { roles }
    }

    pub fn roles(&self) -> &'static [Role] {
        self.roles
    }

    pub fn check(&self, session: &SessionContext) -> GuardOutcome {
        if session.loading {
            return GuardOutcome::Loading;
        }
        if !session.authenticated {
            return GuardOutcome::RedirectSignIn;
        }

        match session.role {
            Some(role) if self.roles.contains(&role) => GuardOutcome::Allowed,
            _ => GuardOutcome::RedirectForbidden,
        }
    }
}
