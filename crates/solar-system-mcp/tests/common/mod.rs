//! Shared fixtures: an in-process JWKS endpoint and token signing helpers.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};

use solar_system_lib::{PlanetCatalog, WidgetDescriptor};
use solar_system_mcp::auth::{AuthGate, HttpJwksSource, KeyCache, TokenVerifier, VerifierConfig};
use solar_system_mcp::Dispatcher;

pub const SIGNING_KEY: &[u8] = include_bytes!("../fixtures/signing_key.pem");
pub const ROGUE_KEY: &[u8] = include_bytes!("../fixtures/rogue_key.pem");
pub const JWKS: &str = include_str!("../fixtures/jwks.json");

pub const KEY_ID: &str = "test-key-1";
pub const ISSUER: &str = "https://auth.example.test/";
pub const AUDIENCE: &str = "solar-system";
pub const REQUIRED_SCOPE: &str = "planets:focus";

pub const WIDGET_HTML: &str = "<div id=\"solar-system-root\"></div>";

/// JWKS endpoint served from a local socket, counting its hits.
pub struct JwksServer {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl JwksServer {
    pub async fn spawn() -> Self {
        Self::spawn_with_delay(Duration::ZERO).await
    }

    pub async fn spawn_with_delay(delay: Duration) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let app = Router::new().route(
            "/.well-known/jwks.json",
            get(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(delay).await;
                    (
                        [(axum::http::header::CONTENT_TYPE, "application/json")],
                        JWKS,
                    )
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}/.well-known/jwks.json"),
            hits,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub fn verifier_config() -> VerifierConfig {
    VerifierConfig {
        issuer: ISSUER.to_string(),
        audience: AUDIENCE.to_string(),
        required_scope: REQUIRED_SCOPE.to_string(),
        algorithms: vec![Algorithm::RS256],
        leeway_secs: 30,
    }
}

pub fn verifier(jwks_url: &str, timeout: Duration) -> TokenVerifier {
    let source = HttpJwksSource::new(jwks_url, timeout).unwrap();
    let keys = KeyCache::new(Arc::new(source), timeout);
    TokenVerifier::new(Arc::new(keys), verifier_config())
}

pub fn gate(jwks_url: &str) -> AuthGate {
    AuthGate::Enabled(Arc::new(verifier(jwks_url, Duration::from_secs(5))))
}

pub fn dispatcher(gate: AuthGate) -> Dispatcher {
    Dispatcher::new(
        Arc::new(PlanetCatalog::solar_system()),
        Arc::new(WidgetDescriptor::solar_system(WIDGET_HTML)),
        gate,
    )
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Claims accepted by [`verifier_config`].
pub fn valid_claims() -> Value {
    json!({
        "sub": "user-42",
        "azp": "chatgpt-connector",
        "iss": ISSUER,
        "aud": AUDIENCE,
        "iat": now() - 10,
        "exp": now() + 600,
        "scope": "openid planets:focus",
    })
}

/// Same claims with `key` replaced (or removed when `value` is null).
pub fn claims_with(key: &str, value: Value) -> Value {
    let mut claims = valid_claims();
    let map = claims.as_object_mut().unwrap();
    if value.is_null() {
        map.remove(key);
    } else {
        map.insert(key.to_string(), value);
    }
    claims
}

pub fn sign_with(claims: &Value, pem: &[u8], kid: Option<&str>) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(str::to_string);
    let key = EncodingKey::from_rsa_pem(pem).unwrap();
    encode(&header, claims, &key).unwrap()
}

pub fn sign(claims: &Value) -> String {
    sign_with(claims, SIGNING_KEY, Some(KEY_ID))
}
