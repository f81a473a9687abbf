use tracing::{info, instrument};
use uuid::Uuid;

use models::roles::Role;

use super::domain::{Principal, ProfileData, RoleRemoval};
use super::errors::AuthError;
use super::repository::UserStore;
use super::service::AuthService;

impl<S: UserStore> AuthService<S> {
    /// Grant `role` to the user and create its profile row, all-or-nothing.
    ///
    /// A pro grant without a business name fails with
    /// `IncompleteProfileData` and leaves the role set untouched.
    #[instrument(skip(self, data), fields(user_id = %user_id, role = %role))]
    pub async fn add_role(&self, user_id: Uuid, role: Role, data: ProfileData) -> Result<Principal, AuthError> {
        let user = self
            .store()
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UnknownOrInactiveUser)?;
        if user.roles.contains(role) {
            return Err(AuthError::RoleAlreadyPresent);
        }
        if role == Role::Pro && data.business_name.as_deref().map_or(true, |name| name.trim().is_empty()) {
            return Err(AuthError::IncompleteProfileData("business name required for pro role".into()));
        }
        let updated = self.store().grant_role(user_id, role, data).await?;
        info!(user_id = %updated.id, role = %role, "role_added");
        Ok(updated)
    }

    /// Drop `role` from the user and delete its profile row, all-or-nothing.
    ///
    /// Only the user itself or an admin may do this. Removing the last role
    /// deletes the account entirely: a user cannot exist roleless.
    #[instrument(skip(self, requester), fields(requester_id = %requester.id, user_id = %user_id, role = %role))]
    pub async fn remove_role(
        &self,
        requester: &Principal,
        user_id: Uuid,
        role: Role,
    ) -> Result<RoleRemoval, AuthError> {
        if requester.id != user_id && !requester.roles.contains(Role::Admin) {
            return Err(AuthError::Forbidden);
        }
        let user = self
            .store()
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UnknownOrInactiveUser)?;
        if !user.roles.contains(role) {
            return Err(AuthError::RoleNotPresent);
        }
        let removal = self.store().revoke_role(user_id, role).await?;
        info!(user_id = %user_id, role = %role, deleted_user = removal.deleted_user, "role_removed");
        Ok(removal)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::domain::SignupInput;
    use crate::auth::repository::mock::MockUserStore;
    use crate::auth::service::AuthConfig;

    fn service() -> (Arc<MockUserStore>, AuthService<MockUserStore>) {
        let store = Arc::new(MockUserStore::default());
        let cfg = AuthConfig {
            jwt_secret: "unit-test-secret".into(),
            access_token_ttl_secs: 3600,
            algorithm: "HS256".into(),
            issuer: "booking-api".into(),
        };
        let svc = AuthService::new(store.clone(), cfg).unwrap();
        (store, svc)
    }

    async fn signup(svc: &AuthService<MockUserStore>, email: &str, roles: Vec<Role>) -> Principal {
        let business_name = roles.contains(&Role::Pro).then(|| "Initial Biz".to_string());
        svc.signup(SignupInput {
            email: email.into(),
            full_name: "Someone".into(),
            password: "Secret123".into(),
            phone: None,
            roles,
            business_name,
            website: None,
            address: None,
        })
        .await
        .unwrap()
        .user
    }

    fn pro_data() -> ProfileData {
        ProfileData { business_name: Some("Shiny Cuts".into()), ..Default::default() }
    }

    #[tokio::test]
    async fn add_then_remove_restores_the_prior_role_set() {
        let (store, svc) = service();
        let user = signup(&svc, "a@b.com", vec![Role::Client]).await;
        let before = user.roles.clone();

        let updated = svc.add_role(user.id, Role::Pro, pro_data()).await.unwrap();
        assert!(updated.roles.contains(Role::Pro));
        assert!(store.pro_profile(user.id).await.unwrap().is_some());

        let removal = svc.remove_role(&updated, user.id, Role::Pro).await.unwrap();
        assert!(!removal.deleted_user);
        assert_eq!(removal.user.unwrap().roles, before);
        assert!(store.pro_profile(user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn removing_the_only_role_deletes_the_account() {
        let (store, svc) = service();
        let user = signup(&svc, "solo@b.com", vec![Role::Client]).await;

        let removal = svc.remove_role(&user, user.id, Role::Client).await.unwrap();
        assert!(removal.deleted_user);
        assert!(removal.user.is_none());
        assert!(store.find_by_id(user.id).await.unwrap().is_none());
        assert!(store.client_profile(user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn pro_grant_without_business_name_mutates_nothing() {
        let (store, svc) = service();
        let user = signup(&svc, "a@b.com", vec![Role::Client]).await;

        let err = svc.add_role(user.id, Role::Pro, ProfileData::default()).await.unwrap_err();
        assert!(matches!(err, AuthError::IncompleteProfileData(_)));

        let unchanged = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(unchanged.roles, user.roles);
        assert!(store.pro_profile(user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_grant_is_a_conflict() {
        let (_, svc) = service();
        let user = signup(&svc, "a@b.com", vec![Role::Client]).await;
        let err = svc.add_role(user.id, Role::Client, ProfileData::default()).await.unwrap_err();
        assert_eq!(err, AuthError::RoleAlreadyPresent);
    }

    #[tokio::test]
    async fn removal_needs_self_or_admin() {
        let (_, svc) = service();
        let target = signup(&svc, "target@b.com", vec![Role::Client, Role::Pro]).await;
        let bystander = signup(&svc, "bystander@b.com", vec![Role::Client]).await;
        let admin = signup(&svc, "admin@b.com", vec![Role::Admin]).await;

        let err = svc.remove_role(&bystander, target.id, Role::Pro).await.unwrap_err();
        assert_eq!(err, AuthError::Forbidden);

        let removal = svc.remove_role(&admin, target.id, Role::Pro).await.unwrap();
        assert!(!removal.deleted_user);
    }

    #[tokio::test]
    async fn removing_an_absent_role_is_reported() {
        let (_, svc) = service();
        let user = signup(&svc, "a@b.com", vec![Role::Client]).await;
        let err = svc.remove_role(&user, user.id, Role::Pro).await.unwrap_err();
        assert_eq!(err, AuthError::RoleNotPresent);
    }

    #[tokio::test]
    async fn admin_role_carries_no_profile_row() {
        let (store, svc) = service();
        let user = signup(&svc, "a@b.com", vec![Role::Client]).await;
        let updated = svc.add_role(user.id, Role::Admin, ProfileData::default()).await.unwrap();
        assert!(updated.roles.contains(Role::Admin));
        assert!(store.pro_profile(user.id).await.unwrap().is_none());
        let removal = svc.remove_role(&updated, user.id, Role::Admin).await.unwrap();
        assert!(!removal.deleted_user);
    }
}
