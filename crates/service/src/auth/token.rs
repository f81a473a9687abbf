use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::roles::Role;
use models::user;

use super::errors::AuthError;
use super::service::AuthConfig;

/// Decoded bearer token payload. Not persisted; rebuilt on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub roles: Vec<Role>,
    pub token_version: i32,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

/// Signs and validates bearer tokens with a symmetric secret fixed at
/// construction. Verification never consults storage; the guard layer owns
/// the user lookup and revocation check.
pub struct TokenIssuer {
    header: Header,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
    issuer: String,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("header", &self.header)
            .field("validation", &self.validation)
            .field("ttl", &self.ttl)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(cfg: &AuthConfig) -> Result<Self, AuthError> {
        if cfg.jwt_secret.trim().is_empty() {
            return Err(AuthError::Validation("signing secret must not be empty".into()));
        }
        let algorithm: Algorithm = cfg
            .algorithm
            .parse()
            .map_err(|_| AuthError::Validation(format!("unsupported algorithm: {}", cfg.algorithm)))?;
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(AuthError::Validation(format!(
                "unsupported algorithm: {}; symmetric HMAC only",
                cfg.algorithm
            )));
        }
        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.set_issuer(&[cfg.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        Ok(Self {
            header: Header::new(algorithm),
            encoding: EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
            validation,
            ttl: Duration::seconds(cfg.access_token_ttl_secs as i64),
            issuer: cfg.issuer.clone(),
        })
    }

    /// Configured access-token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Token for a live user record, snapshotting roles and token_version.
    pub fn issue_for(&self, user: &user::Model) -> Result<String, AuthError> {
        self.issue(user.id, user.roles.to_vec(), user.token_version, self.ttl)
    }

    pub fn issue(
        &self,
        user_id: Uuid,
        roles: Vec<Role>,
        token_version: i32,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            roles,
            token_version,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: self.issuer.clone(),
        };
        encode(&self.header, &claims, &self.encoding).map_err(|e| AuthError::TokenFailure(e.to_string()))
    }

    /// `ExpiredCredential` once now >= exp; `MalformedCredential` for a bad
    /// signature, wrong issuer, or missing required claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredCredential,
                _ => AuthError::MalformedCredential,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer(secret: &str, ttl_secs: u64) -> TokenIssuer {
        TokenIssuer::new(&AuthConfig {
            jwt_secret: secret.into(),
            access_token_ttl_secs: ttl_secs,
            algorithm: "HS256".into(),
            issuer: "booking-api".into(),
        })
        .unwrap()
    }

    #[test]
    fn round_trip_preserves_claims_and_ttl() {
        let tokens = issuer("test-secret", 600);
        let user_id = Uuid::new_v4();
        let token = tokens
            .issue(user_id, vec![Role::Client, Role::Pro], 3, Duration::seconds(600))
            .unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.roles, vec![Role::Client, Role::Pro]);
        assert_eq!(claims.token_version, 3);
        assert_eq!(claims.iss, "booking-api");
        assert_eq!(claims.exp - claims.iat, 600);
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let tokens = issuer("test-secret", 600);
        let token = tokens
            .issue(Uuid::new_v4(), vec![Role::Client], 0, Duration::seconds(-5))
            .unwrap();
        assert_eq!(tokens.verify(&token), Err(AuthError::ExpiredCredential));
    }

    #[test]
    fn tampered_token_is_malformed() {
        let tokens = issuer("test-secret", 600);
        let mut token = tokens
            .issue(Uuid::new_v4(), vec![Role::Client], 0, Duration::seconds(60))
            .unwrap();
        token.push('x');
        assert_eq!(tokens.verify(&token), Err(AuthError::MalformedCredential));
        assert_eq!(tokens.verify("definitely.not.a.token"), Err(AuthError::MalformedCredential));
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let ours = issuer("secret-a", 600);
        let theirs = issuer("secret-b", 600);
        let token = theirs
            .issue(Uuid::new_v4(), vec![Role::Admin], 0, Duration::seconds(60))
            .unwrap();
        assert_eq!(ours.verify(&token), Err(AuthError::MalformedCredential));
    }

    #[test]
    fn wrong_issuer_is_rejected() {
        let ours = issuer("shared-secret", 600);
        let other = TokenIssuer::new(&AuthConfig {
            jwt_secret: "shared-secret".into(),
            access_token_ttl_secs: 600,
            algorithm: "HS256".into(),
            issuer: "someone-else".into(),
        })
        .unwrap();
        let token = other
            .issue(Uuid::new_v4(), vec![Role::Client], 0, Duration::seconds(60))
            .unwrap();
        assert_eq!(ours.verify(&token), Err(AuthError::MalformedCredential));
    }

    #[test]
    fn empty_secret_is_rejected_at_construction() {
        let err = TokenIssuer::new(&AuthConfig {
            jwt_secret: "  ".into(),
            access_token_ttl_secs: 600,
            algorithm: "HS256".into(),
            issuer: "booking-api".into(),
        })
        .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[test]
    fn asymmetric_algorithms_are_rejected() {
        let err = TokenIssuer::new(&AuthConfig {
            jwt_secret: "secret".into(),
            access_token_ttl_secs: 600,
            algorithm: "RS256".into(),
            issuer: "booking-api".into(),
        })
        .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }
}
