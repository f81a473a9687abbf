use std::sync::Arc;

use tracing::{debug, info, instrument};

use models::roles::{Role, RoleSet};
use models::{client_profile, pro_profile, user};

use super::domain::{AuthSession, LoginInput, NewUser, Principal, SignupInput};
use super::errors::AuthError;
use super::password;
use super::repository::UserStore;
use super::token::TokenIssuer;

/// Immutable auth configuration. Built once at startup from the validated
/// app config and injected here; nothing reads it lazily afterwards.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_token_ttl_secs: u64,
    pub algorithm: String,
    pub issuer: String,
}

/// Auth business service independent of web framework.
pub struct AuthService<S: UserStore> {
    store: Arc<S>,
    tokens: TokenIssuer,
}

impl<S: UserStore> AuthService<S> {
    pub fn new(store: Arc<S>, cfg: AuthConfig) -> Result<Self, AuthError> {
        Ok(Self { tokens: TokenIssuer::new(&cfg)?, store })
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Register a new account with a hashed password and the profile rows
    /// its initial role set calls for.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthConfig, AuthService};
    /// use service::auth::domain::SignupInput;
    /// use service::auth::repository::mock::MockUserStore;
    /// use models::roles::Role;
    /// let store = Arc::new(MockUserStore::default());
    /// let cfg = AuthConfig { jwt_secret: "secret".into(), access_token_ttl_secs: 3600, algorithm: "HS256".into(), issuer: "booking-api".into() };
    /// let svc = AuthService::new(store, cfg).unwrap();
    /// let input = SignupInput {
    ///     email: "user@example.com".into(), full_name: "Test".into(), password: "Secret123".into(),
    ///     phone: None, roles: vec![Role::Client], business_name: None, website: None, address: None,
    /// };
    /// let session = tokio_test::block_on(svc.signup(input)).unwrap();
    /// assert_eq!(session.user.email, "user@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn signup(&self, input: SignupInput) -> Result<AuthSession, AuthError> {
        user::validate_email(&input.email)?;
        user::validate_name(&input.full_name)?;
        if input.password.len() < 8 {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        let roles: RoleSet = input.roles.iter().copied().collect();
        if roles.is_empty() {
            return Err(AuthError::Validation("at least one role required".into()));
        }
        if roles.contains(Role::Pro)
            && input.business_name.as_deref().map_or(true, |name| name.trim().is_empty())
        {
            return Err(AuthError::IncompleteProfileData("business name required for pro signup".into()));
        }
        if let Some(existing) = self.store.find_by_email(&input.email).await? {
            debug!("email already registered: {}", existing.email);
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = password::hash(&input.password)?;
        let profile = input.profile_data();
        let user = self
            .store
            .create_user(NewUser {
                email: input.email,
                password_hash,
                password_algorithm: password::ALGORITHM.into(),
                full_name: input.full_name,
                phone: input.phone,
                roles,
                profile,
            })
            .await?;
        let token = self.tokens.issue_for(&user)?;
        info!(user_id = %user.id, email = %user.email, "user_signed_up");
        Ok(AuthSession { user, token })
    }

    /// Authenticate by email and password, issuing a fresh token.
    ///
    /// Unknown email, wrong password and inactive account all collapse into
    /// `InvalidCredentials` so the response leaks nothing about which check
    /// failed.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self
            .store
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        if !user.is_active {
            return Err(AuthError::InvalidCredentials);
        }
        if !password::verify(&input.password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }
        let token = self.tokens.issue_for(&user)?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(AuthSession { user, token })
    }

    /// Access guard, stage one: token to live principal.
    ///
    /// Propagates `ExpiredCredential`/`MalformedCredential` from the token
    /// layer, `UnknownOrInactiveUser` when the subject is gone or disabled,
    /// and `RevokedCredential` when the claim's token_version lags the
    /// user's counter.
    pub async fn resolve(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = self.tokens.verify(token)?;
        let user = self
            .store
            .find_by_id(claims.sub)
            .await?
            .ok_or(AuthError::UnknownOrInactiveUser)?;
        if !user.is_active {
            return Err(AuthError::UnknownOrInactiveUser);
        }
        if user.token_version != claims.token_version {
            return Err(AuthError::RevokedCredential);
        }
        Ok(user)
    }

    /// Access guard, stage two: authenticate, then require that the
    /// principal's role set intersects `allowed`.
    pub async fn require_roles(&self, token: &str, allowed: &[Role]) -> Result<Principal, AuthError> {
        let user = self.resolve(token).await?;
        if !user.roles.intersects(allowed) {
            return Err(AuthError::Forbidden);
        }
        Ok(user)
    }

    /// Invalidate every outstanding token for the caller by bumping the
    /// revocation counter ("logout everywhere").
    #[instrument(skip(self, token))]
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let user = self.resolve(token).await?;
        let version = self.store.bump_token_version(user.id).await?;
        info!(user_id = %user.id, token_version = version, "user_logged_out");
        Ok(())
    }

    /// Exchange a still-valid token for a fresh one; the revocation counter
    /// is untouched, so other sessions stay live.
    pub async fn refresh(&self, token: &str) -> Result<AuthSession, AuthError> {
        let user = self.resolve(token).await?;
        let token = self.tokens.issue_for(&user)?;
        Ok(AuthSession { user, token })
    }

    /// Profile rows attached to a principal, for the profile views.
    pub async fn principal_profiles(
        &self,
        user: &Principal,
    ) -> Result<(Option<client_profile::Model>, Option<pro_profile::Model>), AuthError> {
        let client = self.store.client_profile(user.id).await?;
        let pro = self.store.pro_profile(user.id).await?;
        Ok((client, pro))
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;

    use super::*;
    use crate::auth::repository::mock::MockUserStore;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "unit-test-secret".into(),
            access_token_ttl_secs: 3600,
            algorithm: "HS256".into(),
            issuer: "booking-api".into(),
        }
    }

    fn service() -> (Arc<MockUserStore>, AuthService<MockUserStore>) {
        let store = Arc::new(MockUserStore::default());
        let svc = AuthService::new(store.clone(), test_config()).unwrap();
        (store, svc)
    }

    fn client_signup(email: &str) -> SignupInput {
        SignupInput {
            email: email.into(),
            full_name: "Test User".into(),
            password: "Secret123".into(),
            phone: Some("0102030405".into()),
            roles: vec![Role::Client],
            business_name: None,
            website: None,
            address: None,
        }
    }

    #[tokio::test]
    async fn signup_issues_token_for_the_new_user() {
        let (_, svc) = service();
        let session = svc.signup(client_signup("a@b.com")).await.unwrap();
        let claims = svc.tokens().verify(&session.token).unwrap();
        assert_eq!(claims.sub, session.user.id);
        assert_eq!(claims.roles, vec![Role::Client]);
        assert_eq!(claims.token_version, 0);
    }

    #[tokio::test]
    async fn signup_creates_role_conditioned_profiles() {
        let (_, svc) = service();
        let mut input = client_signup("pro@b.com");
        input.roles = vec![Role::Client, Role::Pro];
        input.business_name = Some("Shiny Cuts".into());
        let session = svc.signup(input).await.unwrap();
        let (client, pro) = svc.principal_profiles(&session.user).await.unwrap();
        assert!(client.is_some());
        assert_eq!(pro.unwrap().business_name, "Shiny Cuts");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let (_, svc) = service();
        svc.signup(client_signup("a@b.com")).await.unwrap();
        let err = svc.signup(client_signup("a@b.com")).await.unwrap_err();
        assert_eq!(err, AuthError::DuplicateEmail);
    }

    #[tokio::test]
    async fn pro_signup_without_business_name_is_incomplete() {
        let (store, svc) = service();
        let mut input = client_signup("pro@b.com");
        input.roles = vec![Role::Pro];
        let err = svc.signup(input).await.unwrap_err();
        assert!(matches!(err, AuthError::IncompleteProfileData(_)));
        assert!(store.find_by_email("pro@b.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let (_, svc) = service();
        let mut input = client_signup("a@b.com");
        input.password = "short".into();
        assert!(matches!(svc.signup(input).await.unwrap_err(), AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn login_with_wrong_password_fails_uniformly() {
        let (_, svc) = service();
        svc.signup(client_signup("a@b.com")).await.unwrap();
        let err = svc
            .login(LoginInput { email: "a@b.com".into(), password: "WrongPass1".into() })
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        let err = svc
            .login(LoginInput { email: "nobody@b.com".into(), password: "Secret123".into() })
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn login_returns_token_with_the_user_as_subject() {
        let (_, svc) = service();
        let signed_up = svc.signup(client_signup("a@b.com")).await.unwrap();
        let session = svc
            .login(LoginInput { email: "a@b.com".into(), password: "Secret123".into() })
            .await
            .unwrap();
        let claims = svc.tokens().verify(&session.token).unwrap();
        assert_eq!(claims.sub, signed_up.user.id);
    }

    #[tokio::test]
    async fn logout_revokes_every_outstanding_token() {
        let (_, svc) = service();
        let session = svc.signup(client_signup("a@b.com")).await.unwrap();
        let second = svc
            .login(LoginInput { email: "a@b.com".into(), password: "Secret123".into() })
            .await
            .unwrap();

        svc.logout(&session.token).await.unwrap();

        assert_eq!(svc.resolve(&session.token).await.unwrap_err(), AuthError::RevokedCredential);
        assert_eq!(svc.resolve(&second.token).await.unwrap_err(), AuthError::RevokedCredential);

        // a fresh login picks up the new counter and works again
        let fresh = svc
            .login(LoginInput { email: "a@b.com".into(), password: "Secret123".into() })
            .await
            .unwrap();
        assert_eq!(svc.resolve(&fresh.token).await.unwrap().id, session.user.id);
    }

    #[tokio::test]
    async fn refresh_keeps_the_revocation_counter() {
        let (_, svc) = service();
        let session = svc.signup(client_signup("a@b.com")).await.unwrap();
        let refreshed = svc.refresh(&session.token).await.unwrap();
        assert_eq!(svc.resolve(&refreshed.token).await.unwrap().id, session.user.id);
        // the original token is still valid: refresh is not revocation
        assert!(svc.resolve(&session.token).await.is_ok());
    }

    #[tokio::test]
    async fn inactive_user_cannot_resolve() {
        let (store, svc) = service();
        let session = svc.signup(client_signup("a@b.com")).await.unwrap();
        store.set_active(session.user.id, false);
        assert_eq!(svc.resolve(&session.token).await.unwrap_err(), AuthError::UnknownOrInactiveUser);
    }

    #[tokio::test]
    async fn expired_and_malformed_tokens_are_distinguished() {
        let (_, svc) = service();
        let session = svc.signup(client_signup("a@b.com")).await.unwrap();
        let expired = svc
            .tokens()
            .issue(session.user.id, vec![Role::Client], 0, Duration::seconds(-5))
            .unwrap();
        assert_eq!(svc.resolve(&expired).await.unwrap_err(), AuthError::ExpiredCredential);
        assert_eq!(svc.resolve("garbage").await.unwrap_err(), AuthError::MalformedCredential);
    }

    #[tokio::test]
    async fn require_roles_checks_intersection() {
        let (_, svc) = service();
        let session = svc.signup(client_signup("a@b.com")).await.unwrap();
        assert_eq!(
            svc.require_roles(&session.token, &[Role::Admin]).await.unwrap_err(),
            AuthError::Forbidden
        );
        let user = svc.require_roles(&session.token, &[Role::Client, Role::Admin]).await.unwrap();
        assert_eq!(user.id, session.user.id);
    }
}
