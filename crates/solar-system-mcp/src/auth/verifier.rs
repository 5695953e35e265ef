//! Bearer token validation.
//!
//! A token is accepted only when all of the following hold:
//! - its header names an allowed algorithm and a key id present in the JWKS
//! - the signature verifies against that key
//! - `exp`, `iat`, `aud` and `iss` are present and valid
//! - the granted scopes include the configured required scope

use std::collections::BTreeSet;
use std::sync::Arc;

use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde_json::{Map, Value};
use tracing::debug;

use super::jwks::KeyCache;
use super::{AuthError, AuthorizationContext};

/// Expected claim values and validation knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierConfig {
    pub issuer: String,
    pub audience: String,
    pub required_scope: String,
    pub algorithms: Vec<Algorithm>,
    /// Clock skew tolerated for `exp` and `iat`, in seconds.
    pub leeway_secs: u64,
}

/// Validates bearer tokens against a remote key set.
pub struct TokenVerifier {
    keys: Arc<KeyCache>,
    config: VerifierConfig,
}

impl TokenVerifier {
    pub fn new(keys: Arc<KeyCache>, config: VerifierConfig) -> Self {
        Self { keys, config }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Verify `token` and build the caller's authorization context.
    pub async fn verify(&self, token: &str) -> Result<AuthorizationContext, AuthError> {
        let header = decode_header(token).map_err(AuthError::MalformedToken)?;
        if !self.config.algorithms.contains(&header.alg) {
            return Err(AuthError::DisallowedAlgorithm(header.alg));
        }
        let kid = header.kid.ok_or(AuthError::MissingKeyId)?;
        let key = self.keys.key(&kid).await?;

        // Only the header's algorithm: the allow-list may mix key families.
        let mut validation = Validation::new(header.alg);
        validation.leeway = self.config.leeway_secs;
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["exp", "aud", "iss"]);

        let data = decode::<Map<String, Value>>(token, &key, &validation)
            .map_err(AuthError::InvalidToken)?;
        let claims = data.claims;

        self.check_issued_at(&claims)?;

        let scopes = granted_scopes(&claims);
        if !scopes.contains(&self.config.required_scope) {
            return Err(AuthError::MissingScope {
                required: self.config.required_scope.clone(),
            });
        }

        let context = AuthorizationContext {
            subject: string_claim(&claims, "sub"),
            client_id: string_claim(&claims, "azp").or_else(|| string_claim(&claims, "client_id")),
            scopes,
            claims,
        };
        debug!(
            subject = context.subject.as_deref().unwrap_or("-"),
            client_id = context.client_id.as_deref().unwrap_or("-"),
            "bearer token accepted"
        );
        Ok(context)
    }

    fn check_issued_at(&self, claims: &Map<String, Value>) -> Result<(), AuthError> {
        let issued_at = claims
            .get("iat")
            .and_then(Value::as_f64)
            .ok_or(AuthError::MissingClaim("iat"))?;
        let now = chrono::Utc::now().timestamp() as f64;
        if issued_at > now + self.config.leeway_secs as f64 {
            return Err(AuthError::IssuedInFuture);
        }
        Ok(())
    }
}

/// Scopes granted by a claim set.
///
/// The space-delimited `scope` string wins when present; otherwise the
/// list-valued `permissions` claim is used. Conflicting claims are not merged.
pub fn granted_scopes(claims: &Map<String, Value>) -> BTreeSet<String> {
    if let Some(scope) = claims.get("scope").and_then(Value::as_str) {
        return scope.split_whitespace().map(str::to_string).collect();
    }

    claims
        .get("permissions")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn string_claim(claims: &Map<String, Value>, name: &str) -> Option<String> {
    claims.get(name).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test claims are objects"),
        }
    }

    #[test]
    fn test_scope_string_is_split_on_whitespace() {
        let scopes = granted_scopes(&claims(json!({"scope": "planets:read  widgets:render"})));
        assert_eq!(scopes.len(), 2);
        assert!(scopes.contains("planets:read"));
        assert!(scopes.contains("widgets:render"));
    }

    #[test]
    fn test_permissions_list_is_fallback() {
        let scopes = granted_scopes(&claims(json!({"permissions": ["planets:read", 7]})));
        assert_eq!(scopes.into_iter().collect::<Vec<_>>(), vec!["planets:read"]);
    }

    #[test]
    fn test_scope_string_wins_over_permissions() {
        let scopes = granted_scopes(&claims(json!({
            "scope": "a",
            "permissions": ["b"]
        })));
        assert!(scopes.contains("a"));
        assert!(!scopes.contains("b"));
    }

    #[test]
    fn test_non_string_scope_falls_through() {
        let scopes = granted_scopes(&claims(json!({
            "scope": ["a"],
            "permissions": ["b"]
        })));
        assert!(scopes.contains("b"));
    }

    #[test]
    fn test_no_scope_claims() {
        assert!(granted_scopes(&Map::new()).is_empty());
    }
}
