//! Authentication and secret-encryption configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Development signing secret, rejected in production by `AppConfig::validate`
pub const DEFAULT_JWT_SECRET: &str = "dev-secret-key-change-in-production";

/// What the verifier does when the revocation store cannot be reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevocationFailurePolicy {
    /// Reject the request with a distinct store-unavailable error
    #[default]
    FailClosed,
    /// Log a warning and continue with signature and expiry checks
    FailOpen,
}

impl std::str::FromStr for RevocationFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "fail-closed" | "closed" => Ok(Self::FailClosed),
            "fail-open" | "open" => Ok(Self::FailOpen),
            _ => Err(format!("Invalid revocation failure policy: {}", s)),
        }
    }
}

/// How a token string is turned into a revocation-store key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevocationKeyMode {
    /// `token:blacklist:<token>`
    #[default]
    Raw,
    /// `token:blacklist:sha256:<hex digest of token>`
    Sha256,
}

impl std::str::FromStr for RevocationKeyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "sha256" | "hash" => Ok(Self::Sha256),
            _ => Err(format!("Invalid revocation key mode: {}", s)),
        }
    }
}

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret used to sign and verify tokens
    pub secret: String,

    /// Signing algorithm name (HS256, HS384 or HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Default access token lifetime in seconds
    pub access_token_expiry: u64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: u64,

    /// Behavior when the revocation store is unreachable
    #[serde(default)]
    pub revocation_failure_policy: RevocationFailurePolicy,

    /// Upper bound on a single revocation-store call, in milliseconds
    #[serde(default = "default_store_timeout_ms")]
    pub revocation_store_timeout_ms: u64,

    /// Revocation key derivation
    #[serde(default)]
    pub revocation_key_mode: RevocationKeyMode,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            algorithm: default_algorithm(),
            access_token_expiry: 86400,    // 24 hours
            refresh_token_expiry: 2592000, // 30 days
            revocation_failure_policy: RevocationFailurePolicy::default(),
            revocation_store_timeout_ms: default_store_timeout_ms(),
            revocation_key_mode: RevocationKeyMode::default(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    ///
    /// `JWT_SECRET_KEY` falls back to `SECRET_KEY` before the development default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let secret = std::env::var("JWT_SECRET_KEY")
            .or_else(|_| std::env::var("SECRET_KEY"))
            .unwrap_or(defaults.secret);

        Self {
            secret,
            algorithm: std::env::var("JWT_ALGORITHM").unwrap_or(defaults.algorithm),
            access_token_expiry: env_or("JWT_ACCESS_TOKEN_EXPIRES", defaults.access_token_expiry),
            refresh_token_expiry: env_or("JWT_REFRESH_TOKEN_EXPIRES", defaults.refresh_token_expiry),
            revocation_failure_policy: env_or(
                "REVOCATION_FAILURE_POLICY",
                defaults.revocation_failure_policy,
            ),
            revocation_store_timeout_ms: env_or(
                "REVOCATION_STORE_TIMEOUT_MS",
                defaults.revocation_store_timeout_ms,
            ),
            revocation_key_mode: env_or("REVOCATION_KEY_MODE", defaults.revocation_key_mode),
        }
    }

    /// Set access token expiry in seconds
    pub fn with_access_expiry_seconds(mut self, seconds: u64) -> Self {
        self.access_token_expiry = seconds;
        self
    }

    /// Set the revocation-store failure policy
    pub fn with_failure_policy(mut self, policy: RevocationFailurePolicy) -> Self {
        self.revocation_failure_policy = policy;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// Symmetric encryption configuration for stored secrets
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EncryptionConfig {
    /// Base64-encoded 32-byte key; `None` means one is generated at startup
    #[serde(default)]
    pub key: Option<String>,
}

impl EncryptionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            key: std::env::var("ENCRYPTION_KEY").ok().filter(|k| !k.is_empty()),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Secret-encryption configuration
    #[serde(default)]
    pub encryption: EncryptionConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            encryption: EncryptionConfig::from_env(),
        }
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_store_timeout_ms() -> u64 {
    2000
}
