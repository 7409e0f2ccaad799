//! Bearer token signing and verification.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use roster_config::AuthConfig;
use serde::{Deserialize, Serialize};

use crate::types::TokenError;

/// Identity data placed into a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub identifier: i64,
    pub display_name: String,
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // Member identifier
    pub name: String, // Display name
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl Claims {
    /// The member identifier carried in `sub`, if it is numeric.
    pub fn identifier(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// A signed token and the instant it stops being accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// HS256 signer and verifier with a fixed expiry window.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl_seconds: i64,
}

impl TokenIssuer {
    /// Fails with [`TokenError::EmptySecret`] for a blank secret, which would make every
    /// token forgeable.
    pub fn new(
        secret: &str,
        issuer: impl Into<String>,
        ttl_seconds: u64,
    ) -> Result<Self, TokenError> {
        if secret.trim().is_empty() {
            return Err(TokenError::EmptySecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            ttl_seconds: i64::try_from(ttl_seconds).unwrap_or(i64::MAX),
        })
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, TokenError> {
        Self::new(
            &config.token_secret,
            config.token_issuer.clone(),
            config.token_ttl_seconds,
        )
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Sign a token for `subject`, valid for the configured window from now.
    pub fn issue(&self, subject: &TokenSubject) -> Result<IssuedToken, TokenError> {
        let now = Utc::now().timestamp();
        let exp = now.saturating_add(self.ttl_seconds);
        let expires_at = DateTime::<Utc>::from_timestamp(exp, 0).ok_or_else(|| {
            TokenError::Encoding("expiry is outside the representable range".to_string())
        })?;

        let claims = Claims {
            sub: subject.identifier.to_string(),
            name: subject.display_name.clone(),
            iss: self.issuer.clone(),
            iat: now,
            exp,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| TokenError::Encoding(err.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Check signature, issuer and expiry and return the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed(err.to_string()),
            })
    }
}
