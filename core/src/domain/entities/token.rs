//! Claim types carried inside bearer tokens.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::TokenError;

/// Issued-at claim name, injected by the issuer
pub const CLAIM_ISSUED_AT: &str = "iat";

/// Expiry claim name, injected by the issuer
pub const CLAIM_EXPIRES_AT: &str = "exp";

/// Claim names callers may not set
pub const RESERVED_CLAIMS: [&str; 2] = [CLAIM_ISSUED_AT, CLAIM_EXPIRES_AT];

/// Caller-supplied claims, before `iat`/`exp` are injected
///
/// Keys are kept sorted so the signed payload is byte-identical for identical
/// input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(Map<String, Value>);

impl ClaimSet {
    /// Creates an empty claim set
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts or replaces a claim
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Looks up a claim
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts any serializable value whose JSON form is an object
    ///
    /// # Errors
    ///
    /// * `TokenError::InvalidClaims` - serialization failed or did not produce an object
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self, TokenError> {
        match serde_json::to_value(value) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(TokenError::InvalidClaims {
                message: format!("claims must serialize to a JSON object, got {}", json_kind(&other)),
            }),
            Err(e) => Err(TokenError::InvalidClaims {
                message: e.to_string(),
            }),
        }
    }

    /// Returns the claims with reserved keys removed
    pub fn without_reserved(&self) -> Map<String, Value> {
        let mut map = self.0.clone();
        for key in RESERVED_CLAIMS {
            map.remove(key);
        }
        map
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ClaimSet {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Claims recovered from a verified token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Issued at, Unix seconds
    pub iat: i64,

    /// Expiry, Unix seconds
    pub exp: i64,

    /// Every other claim
    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

impl Claims {
    /// Builds claims from caller input plus issuer timestamps
    ///
    /// Caller-supplied `iat`/`exp` are dropped, never merged.
    pub fn new(claims: &ClaimSet, iat: i64, exp: i64) -> Self {
        Self {
            iat,
            exp,
            custom: claims.without_reserved(),
        }
    }

    /// Looks up a caller claim
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.custom.get(key)
    }

    /// Looks up a caller claim as a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.custom.get(key).and_then(Value::as_str)
    }

    /// The principal identifier (`subject`, or the registered `sub`)
    pub fn subject(&self) -> Option<&str> {
        self.get_str("subject").or_else(|| self.get_str("sub"))
    }

    /// Vehicle identification number, when the token was issued to a vehicle
    pub fn vin(&self) -> Option<&str> {
        self.get_str("vin")
    }

    pub fn device_fingerprint(&self) -> Option<&str> {
        self.get_str("device_fingerprint")
    }

    /// Whether the token is expired at `now` (expiry instant itself is expired)
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    /// Seconds left until `exp`, never negative
    pub fn remaining_lifetime(&self, now: i64) -> u64 {
        u64::try_from(self.exp.saturating_sub(now)).unwrap_or(0)
    }

    /// All claims, including `iat` and `exp`, as one JSON object
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.custom.clone();
        map.insert(CLAIM_ISSUED_AT.to_string(), Value::from(self.iat));
        map.insert(CLAIM_EXPIRES_AT.to_string(), Value::from(self.exp));
        map
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
