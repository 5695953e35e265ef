//! Command-line and environment configuration.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Parser};
use jsonwebtoken::Algorithm;
use thiserror::Error;

use crate::auth::{AuthGate, HttpJwksSource, JwksError, KeyCache, TokenVerifier, VerifierConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{flag} must be set when authorization is enabled")]
    MissingAuthSetting { flag: &'static str },

    #[error("unsupported JWT algorithm {0:?}")]
    UnknownAlgorithm(String),

    #[error("invalid listen address {0}")]
    InvalidAddress(String),

    #[error(transparent)]
    Jwks(#[from] JwksError),
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Solar system widget MCP server")]
pub struct ServerConfig {
    /// Interface to bind.
    #[arg(long, env = "SOLAR_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "SOLAR_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Directory holding the built widget markup.
    #[arg(long, env = "SOLAR_ASSETS_DIR", default_value = "assets")]
    pub assets_dir: PathBuf,

    #[command(flatten)]
    pub auth: AuthArgs,
}

impl ServerConfig {
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Bearer-token gate settings.
#[derive(Args, Debug, Clone)]
pub struct AuthArgs {
    /// Require a valid bearer token for tool calls.
    #[arg(
        long,
        env = "AUTH_ENABLED",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub auth_enabled: bool,

    #[arg(long, env = "AUTH_JWKS_URL")]
    pub jwks_url: Option<String>,

    #[arg(long, env = "AUTH_ISSUER")]
    pub issuer: Option<String>,

    #[arg(long, env = "AUTH_AUDIENCE")]
    pub audience: Option<String>,

    #[arg(long, env = "AUTH_REQUIRED_SCOPE")]
    pub required_scope: Option<String>,

    /// Upper bound on a single JWKS fetch.
    #[arg(long, env = "AUTH_JWKS_TIMEOUT_SECS", default_value_t = 5)]
    pub jwks_timeout_secs: u64,

    /// Accepted signing algorithms, comma separated.
    #[arg(
        long,
        env = "AUTH_JWT_ALGORITHMS",
        value_delimiter = ',',
        default_value = "RS256"
    )]
    pub jwt_algorithms: Vec<String>,

    /// Clock skew tolerated on `exp` and `iat`.
    #[arg(long, env = "AUTH_JWT_LEEWAY_SECS", default_value_t = 60)]
    pub jwt_leeway_secs: u64,
}

impl AuthArgs {
    pub fn jwks_timeout(&self) -> Duration {
        Duration::from_secs(self.jwks_timeout_secs)
    }

    /// Validated verifier settings, or `None` when the gate is disabled.
    pub fn verifier_config(&self) -> Result<Option<VerifierConfig>, ConfigError> {
        if !self.auth_enabled {
            return Ok(None);
        }

        let algorithms = self
            .jwt_algorithms
            .iter()
            .map(|name| {
                Algorithm::from_str(name.trim())
                    .map_err(|_| ConfigError::UnknownAlgorithm(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if algorithms.is_empty() {
            return Err(ConfigError::MissingAuthSetting {
                flag: "--jwt-algorithms",
            });
        }

        Ok(Some(VerifierConfig {
            issuer: required(&self.issuer, "--issuer")?,
            audience: required(&self.audience, "--audience")?,
            required_scope: required(&self.required_scope, "--required-scope")?,
            algorithms,
            leeway_secs: self.jwt_leeway_secs,
        }))
    }

    /// Build the authorization gate described by these settings.
    pub fn build_gate(&self) -> Result<AuthGate, ConfigError> {
        let Some(verifier_config) = self.verifier_config()? else {
            return Ok(AuthGate::Disabled);
        };
        let jwks_url = required(&self.jwks_url, "--jwks-url")?;

        let source = HttpJwksSource::new(jwks_url, self.jwks_timeout())?;
        let keys = KeyCache::new(Arc::new(source), self.jwks_timeout());
        let verifier = TokenVerifier::new(Arc::new(keys), verifier_config);
        Ok(AuthGate::Enabled(Arc::new(verifier)))
    }
}

fn required(value: &Option<String>, flag: &'static str) -> Result<String, ConfigError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ConfigError::MissingAuthSetting { flag })
}
