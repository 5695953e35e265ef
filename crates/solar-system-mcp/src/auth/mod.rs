//! Bearer-token authorization for tool calls.
//!
//! Authorization is an explicit pipeline stage: the dispatcher asks the
//! [`AuthGate`] for an [`Authorization`] before running the tool handler.
//! Rejections carry an [`AuthError`] that is logged but never shown to the
//! caller.

pub mod jwks;
pub mod verifier;

use std::collections::BTreeSet;
use std::sync::Arc;

use jsonwebtoken::Algorithm;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

pub use jwks::{HttpJwksSource, JwksError, JwksSource, KeyCache, KeyLookupError};
pub use verifier::{granted_scopes, TokenVerifier, VerifierConfig};

/// Identity derived from an accepted bearer token. Lives for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorizationContext {
    pub subject: Option<String>,
    pub client_id: Option<String>,
    pub scopes: BTreeSet<String>,
    pub claims: Map<String, Value>,
}

/// Why a bearer token was rejected.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no bearer token supplied")]
    MissingToken,

    #[error("token could not be decoded: {0}")]
    MalformedToken(#[source] jsonwebtoken::errors::Error),

    #[error("token header has no key id")]
    MissingKeyId,

    #[error("token algorithm {0:?} is not allowed")]
    DisallowedAlgorithm(Algorithm),

    #[error(transparent)]
    KeyLookup(#[from] KeyLookupError),

    #[error("token validation failed: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("token is missing the {0} claim")]
    MissingClaim(&'static str),

    #[error("token was issued in the future")]
    IssuedInFuture,

    #[error("token lacks required scope {required}")]
    MissingScope { required: String },
}

/// Outcome of the authorization stage.
#[derive(Debug)]
pub enum Authorization {
    Authorized(AuthorizationContext),
    Rejected(AuthError),
}

impl Authorization {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized(_))
    }
}

/// Gate in front of tool invocation; disabled for local development.
#[derive(Clone)]
pub enum AuthGate {
    Disabled,
    Enabled(Arc<TokenVerifier>),
}

impl AuthGate {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }

    /// Authorize a caller presenting `bearer`.
    ///
    /// Never fails: every verification problem becomes
    /// [`Authorization::Rejected`] plus a warning in the log.
    pub async fn authorize(&self, bearer: Option<&str>) -> Authorization {
        let verifier = match self {
            Self::Disabled => return Authorization::Authorized(AuthorizationContext::default()),
            Self::Enabled(verifier) => verifier,
        };

        let result = match bearer {
            Some(token) => verifier.verify(token).await,
            None => Err(AuthError::MissingToken),
        };

        match result {
            Ok(context) => Authorization::Authorized(context),
            Err(reason) => {
                warn!(reason = %reason, "rejected tool call authorization");
                Authorization::Rejected(reason)
            }
        }
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => f.write_str("AuthGate::Disabled"),
            Self::Enabled(verifier) => f
                .debug_struct("AuthGate::Enabled")
                .field("issuer", &verifier.config().issuer)
                .field("audience", &verifier.config().audience)
                .finish(),
        }
    }
}
