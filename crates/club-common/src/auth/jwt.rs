//! Bearer token verification
//!
//! Sessions are issued by the external identity provider. This service only
//! verifies the HS256 signature, expiry and audience, then trusts `sub` as the
//! profile id.

use chrono::{Duration, Utc};
use club_core::ProfileId;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::AppError;

/// Claims carried by identity provider access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (auth user id, equal to the profile id)
    pub sub: String,
    /// Audience
    pub aud: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Provider role, e.g. "authenticated"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Claims {
    /// Get the profile id from the subject
    ///
    /// # Errors
    /// Returns an error if the subject is not a UUID
    pub fn profile_id(&self) -> Result<ProfileId, AppError> {
        self.sub.parse().map_err(|_| AppError::InvalidToken)
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Verifies bearer tokens against the shared secret
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    validation: Validation,
    audience: String,
}

impl JwtVerifier {
    #[must_use]
    pub fn new(secret: &str, audience: &str, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);
        validation.leeway = leeway_secs;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            validation,
            audience: audience.to_string(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, &config.audience, config.leeway_secs)
    }

    /// Decode and validate a token
    ///
    /// # Errors
    /// Returns `TokenExpired` for expired tokens, `InvalidToken` for anything else
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(data.claims)
    }

    /// Verify a token and return the profile it belongs to
    ///
    /// # Errors
    /// Returns an error if the token is invalid or its subject is not a UUID
    pub fn authenticate(&self, token: &str) -> Result<ProfileId, AppError> {
        self.verify(token)?.profile_id()
    }

    /// Sign a token the way the identity provider does
    ///
    /// Used by local tooling and tests; production tokens come from the provider.
    ///
    /// # Errors
    /// Returns an error if encoding fails
    pub fn issue(&self, profile_id: ProfileId, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: profile_id.to_string(),
            aud: self.audience.clone(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            email: None,
            role: Some("authenticated".to_string()),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode JWT: {e}")))
    }
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier")
            .field("audience", &self.audience)
            .field("leeway", &self.validation.leeway)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> JwtVerifier {
        JwtVerifier::new("test-secret-key-that-is-long-enough", "authenticated", 0)
    }

    #[test]
    fn test_issue_and_authenticate() {
        let verifier = verifier();
        let profile_id = ProfileId::new_v4();

        let token = verifier.issue(profile_id, Duration::minutes(5)).unwrap();
        assert_eq!(verifier.authenticate(&token).unwrap(), profile_id);

        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.aud, "authenticated");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_expired_token() {
        let verifier = verifier();
        let token = verifier
            .issue(ProfileId::new_v4(), Duration::minutes(-5))
            .unwrap();

        assert!(matches!(verifier.verify(&token), Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret_or_audience() {
        let token = verifier()
            .issue(ProfileId::new_v4(), Duration::minutes(5))
            .unwrap();

        let other_secret = JwtVerifier::new("another-secret-key-also-long", "authenticated", 0);
        assert!(matches!(other_secret.verify(&token), Err(AppError::InvalidToken)));

        let other_aud = JwtVerifier::new("test-secret-key-that-is-long-enough", "service_role", 0);
        assert!(matches!(other_aud.verify(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_invalid_token() {
        let result = verifier().verify("invalid.token.here");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_non_uuid_subject() {
        let claims = Claims {
            sub: "12345".to_string(),
            aud: "authenticated".to_string(),
            exp: i64::MAX,
            iat: 0,
            email: None,
            role: None,
        };
        assert!(matches!(claims.profile_id(), Err(AppError::InvalidToken)));
    }
}
