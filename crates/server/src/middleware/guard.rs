use crate::error::ApiError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use log::debug;
use models::guard::{GuardOutcome, Role, RouteGuard, SessionContext};
use serde::Deserialize;
use uuid::Uuid;

/// JWT claims placed in the request extensions by the resource server layer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionClaims {
    pub sub: Option<String>,
    #[serde(default)]
    pub user_role: Option<String>,
}

impl SessionClaims {
    /// Unknown role names are treated as no role
    pub fn role(&self) -> Option<Role> {
        self.user_role.as_deref()?.parse().ok()
    }

    /// The profile id the subject refers to
    pub fn user_id(&self) -> Result<Uuid, ApiError> {
        self.sub
            .as_deref()
            .and_then(|sub| Uuid::parse_str(sub).ok())
            .ok_or(ApiError::Unauthenticated)
    }

    pub fn session(claims: Option<&Self>) -> SessionContext {
        match claims {
            Some(claims) => SessionContext::signed_in(claims.role()),
            None => SessionContext::anonymous(),
        }
    }
}

/// Rejects requests whose session does not satisfy `guard`
pub async fn require_role(
    State(guard): State<RouteGuard>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = SessionClaims::session(request.extensions().get::<SessionClaims>());

    match guard.check(&session) {
        GuardOutcome::Allowed => Ok(next.run(request).await),
        GuardOutcome::Loading => Err(ApiError::SessionLoading),
        GuardOutcome::RedirectSignIn => Err(ApiError::Unauthenticated),
        GuardOutcome::RedirectForbidden => {
            debug!(
                "Role {:?} denied for {} (requires {:?})",
                session.role,
                request.uri().path(),
                guard.roles()
            );
            Err(ApiError::Forbidden)
        }
    }
}
