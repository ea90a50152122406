//! JWT token generation and validation
//!
//! Access and refresh tokens are signed with two separate HMAC secrets, so a
//! leaked access key cannot mint refresh tokens. Keys are derived once at
//! startup and shared through `Arc`.

use crate::config::JwtConfig;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject email
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Token failure kinds
///
/// Verification failures are kept apart for logging. The HTTP layer renders
/// all of them as the same "Invalid token" response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed: {0}")]
    Malformed(String),

    #[error("token signature does not match")]
    BadSignature,

    #[error("token expired")]
    Expired,

    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error("{0} signing secret is empty")]
    MissingSecret(&'static str),
}

/// Which secret a token is signed with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    fn as_str(self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

/// Freshly issued access token
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    /// Lifetime in words, e.g. "1 day"
    pub ttl_description: String,
    pub expires_at: DateTime<Utc>,
}

/// Pre-computed JWT keys for one secret
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Derive keys from a secret. Call once at startup.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret)),
            decoding: Arc::new(DecodingKey::from_secret(secret)),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// JWT service for token operations
///
/// Holds read-only keys behind `Arc`; clones are cheap and safe to share
/// across request handlers without locking.
#[derive(Clone)]
pub struct JwtService {
    access: JwtKeys,
    refresh: JwtKeys,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtService {
    /// Build the service from validated configuration
    pub fn new(config: &JwtConfig) -> Result<Self, TokenError> {
        Self::from_secrets(
            config.access_secret.expose_secret().as_bytes(),
            config.refresh_secret.expose_secret().as_bytes(),
            config.access_token_expiry_secs,
            config.refresh_token_expiry_secs,
        )
    }

    pub fn from_secrets(
        access_secret: &[u8],
        refresh_secret: &[u8],
        access_token_expiry_secs: i64,
        refresh_token_expiry_secs: i64,
    ) -> Result<Self, TokenError> {
        if access_secret.is_empty() {
            return Err(TokenError::MissingSecret("access"));
        }
        if refresh_secret.is_empty() {
            return Err(TokenError::MissingSecret("refresh"));
        }
        Ok(Self {
            access: JwtKeys::new(access_secret),
            refresh: JwtKeys::new(refresh_secret),
            access_ttl: Duration::seconds(access_token_expiry_secs),
            refresh_ttl: Duration::seconds(refresh_token_expiry_secs),
        })
    }

    /// Issue an access token for `email`, valid from now
    pub fn issue_access_token(&self, email: &str) -> Result<AccessToken, TokenError> {
        self.issue_access_token_at(email, Utc::now())
    }

    pub fn issue_access_token_at(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<AccessToken, TokenError> {
        let expires_at = now + self.access_ttl;
        let token = self.sign(TokenKind::Access, email, now, expires_at)?;
        Ok(AccessToken {
            token,
            ttl_description: humanize_ttl(self.access_ttl.num_seconds()),
            expires_at,
        })
    }

    /// Issue a refresh token for `email`, valid from now
    pub fn issue_refresh_token(&self, email: &str) -> Result<String, TokenError> {
        self.issue_refresh_token_at(email, Utc::now())
    }

    pub fn issue_refresh_token_at(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        self.sign(TokenKind::Refresh, email, now, now + self.refresh_ttl)
    }

    fn sign(
        &self,
        kind: TokenKind,
        email: &str,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            email: email.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, self.keys(kind).encoding())
            .map_err(|e| TokenError::Signing(format!("{} token: {}", kind.as_str(), e)))
    }

    /// Validate an access token and return its claims
    #[inline]
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(TokenKind::Access, token, Utc::now())
    }

    #[inline]
    pub fn verify_access_token_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Claims, TokenError> {
        self.verify_at(TokenKind::Access, token, now)
    }

    /// Validate a refresh token and return its claims
    #[inline]
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(TokenKind::Refresh, token, Utc::now())
    }

    fn verify_at(
        &self,
        kind: TokenKind,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Claims, TokenError> {
        // Expiry is checked below against `now` with no leeway: a token is dead at `exp`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<Claims>(token, self.keys(kind).decoding(), &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })?
            .claims;

        if claims.exp <= now.timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    fn keys(&self, kind: TokenKind) -> &JwtKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    /// Access token lifetime in seconds
    #[inline]
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_ttl.num_seconds()
    }

    /// Refresh token lifetime in seconds
    #[inline]
    pub fn refresh_token_expiry_secs(&self) -> i64 {
        self.refresh_ttl.num_seconds()
    }
}

/// Describe a lifetime in the largest whole unit, e.g. "1 day", "7 days", "90 minutes"
pub fn humanize_ttl(secs: i64) -> String {
    let (value, unit) = if secs != 0 && secs % 86_400 == 0 {
        (secs / 86_400, "day")
    } else if secs != 0 && secs % 3_600 == 0 {
        (secs / 3_600, "hour")
    } else if secs != 0 && secs % 60 == 0 {
        (secs / 60, "minute")
    } else {
        (secs, "second")
    };

    if value == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", value, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DAY: i64 = 86_400;

    fn create_test_service() -> JwtService {
        JwtService::from_secrets(b"access-secret", b"refresh-secret", DAY, 7 * DAY).unwrap()
    }

    #[test]
    fn test_issue_and_verify_access_token() {
        let service = create_test_service();

        let issued = service.issue_access_token("alice@example.com").unwrap();
        let claims = service.verify_access_token(&issued.token).unwrap();

        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.exp - claims.iat, DAY);
        assert_eq!(issued.ttl_description, "1 day");
    }

    #[test]
    fn test_access_token_valid_until_expiry() {
        let service = create_test_service();
        let t = Utc::now();
        let issued = service.issue_access_token_at("alice@example.com", t).unwrap();

        assert!(service.verify_access_token_at(&issued.token, t).is_ok());
        assert!(service
            .verify_access_token_at(&issued.token, t + Duration::seconds(DAY - 1))
            .is_ok());
        assert_eq!(
            service.verify_access_token_at(&issued.token, t + Duration::seconds(DAY)),
            Err(TokenError::Expired)
        );
        assert_eq!(
            service.verify_access_token_at(&issued.token, t + Duration::days(2)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_refresh_token_lasts_seven_days() {
        let service = create_test_service();
        let token = service.issue_refresh_token("alice@example.com").unwrap();
        let claims = service.verify_refresh_token(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 7 * DAY);
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let service = create_test_service();
        let token = service.issue_refresh_token("alice@example.com").unwrap();

        assert_eq!(service.verify_access_token(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        let service = create_test_service();
        let issued = service.issue_access_token("alice@example.com").unwrap();

        assert_eq!(
            service.verify_refresh_token(&issued.token),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_expired_but_correctly_signed_token() {
        let service = create_test_service();
        let claims = Claims {
            email: "alice@example.com".to_string(),
            exp: (Utc::now() - Duration::hours(1)).timestamp(),
            iat: (Utc::now() - Duration::hours(25)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"access-secret"),
        )
        .unwrap();

        assert_eq!(service.verify_access_token(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = create_test_service();
        let issued = service.issue_access_token("alice@example.com").unwrap();

        // Swap the payload for one claiming a different email
        let parts: Vec<&str> = issued.token.split('.').collect();
        let other = service.issue_access_token("mallory@example.com").unwrap();
        let other_payload = other.token.split('.').nth(1).unwrap();
        let forged = format!("{}.{}.{}", parts[0], other_payload, parts[2]);

        assert_eq!(service.verify_access_token(&forged), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let service = create_test_service();
        let result = service.verify_access_token("invalid.token.here");

        assert!(matches!(result, Err(TokenError::Malformed(_))));
        assert!(matches!(
            service.verify_access_token("not-a-jwt"),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        assert_eq!(
            JwtService::from_secrets(b"", b"refresh", DAY, DAY).err(),
            Some(TokenError::MissingSecret("access"))
        );
        assert_eq!(
            JwtService::from_secrets(b"access", b"", DAY, DAY).err(),
            Some(TokenError::MissingSecret("refresh"))
        );
    }

    #[test]
    fn test_service_is_clone_cheap() {
        let service = create_test_service();
        let cloned = service.clone();
        let issued = service.issue_access_token("alice@example.com").unwrap();
        assert!(cloned.verify_access_token(&issued.token).is_ok());
    }

    #[rstest]
    #[case(86_400, "1 day")]
    #[case(604_800, "7 days")]
    #[case(3_600, "1 hour")]
    #[case(7_200, "2 hours")]
    #[case(5_400, "90 minutes")]
    #[case(45, "45 seconds")]
    fn test_humanize_ttl(#[case] secs: i64, #[case] expected: &str) {
        assert_eq!(humanize_ttl(secs), expected);
    }
}
