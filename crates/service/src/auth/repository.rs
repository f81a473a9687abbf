use async_trait::async_trait;
use uuid::Uuid;

use models::roles::Role;
use models::{client_profile, pro_profile, user};

use super::domain::{NewUser, ProfileData, RoleRemoval};
use super::errors::AuthError;

/// Transactional persistence boundary for accounts and their profiles.
///
/// Every method is a single atomic unit of work: a failure inside a
/// multi-step operation (role list updated but profile missing, or the
/// reverse) must never be observable afterwards.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, AuthError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, AuthError>;

    /// Insert the user plus the profile rows its initial role set calls for.
    async fn create_user(&self, new: NewUser) -> Result<user::Model, AuthError>;

    /// Atomically increment the revocation counter; returns the new value.
    async fn bump_token_version(&self, id: Uuid) -> Result<i32, AuthError>;

    /// Append `role` and create its profile row in one unit of work.
    async fn grant_role(&self, user_id: Uuid, role: Role, data: ProfileData) -> Result<user::Model, AuthError>;

    /// Drop `role` and its profile row; deletes the user entirely when the
    /// role set would become empty.
    async fn revoke_role(&self, user_id: Uuid, role: Role) -> Result<RoleRemoval, AuthError>;

    async fn client_profile(&self, user_id: Uuid) -> Result<Option<client_profile::Model>, AuthError>;
    async fn pro_profile(&self, user_id: Uuid) -> Result<Option<pro_profile::Model>, AuthError>;
}

/// In-memory store for unit tests and doc examples; mirrors the relational
/// implementation's semantics, including the cascade on last-role removal.
pub mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;

    #[derive(Default)]
    pub struct MockUserStore {
        users: Mutex<HashMap<Uuid, user::Model>>,
        client_profiles: Mutex<HashMap<Uuid, client_profile::Model>>,
        pro_profiles: Mutex<HashMap<Uuid, pro_profile::Model>>,
    }

    impl MockUserStore {
        /// Test hook: flip the active flag the way an admin would.
        pub fn set_active(&self, user_id: Uuid, active: bool) {
            if let Some(user) = self.users.lock().unwrap().get_mut(&user_id) {
                user.is_active = active;
            }
        }
    }

    fn new_client_profile(user_id: Uuid, data: &ProfileData) -> client_profile::Model {
        let now = Utc::now().into();
        client_profile::Model {
            id: Uuid::new_v4(),
            user_id,
            phone: data.phone.clone(),
            address: data.address.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn new_pro_profile(user_id: Uuid, data: &ProfileData) -> Result<pro_profile::Model, AuthError> {
        let business_name = data
            .business_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AuthError::IncompleteProfileData("business name required".into()))?;
        let now = Utc::now().into();
        Ok(pro_profile::Model {
            id: Uuid::new_v4(),
            user_id,
            business_name,
            website: data.website.clone(),
            address: data.address.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    #[async_trait]
    impl UserStore for MockUserStore {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, AuthError> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|u| u.email == email).cloned())
        }

        async fn create_user(&self, new: NewUser) -> Result<user::Model, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.values().any(|u| u.email == new.email) {
                return Err(AuthError::DuplicateEmail);
            }
            let now = Utc::now().into();
            let user = user::Model {
                id: Uuid::new_v4(),
                email: new.email,
                password_hash: new.password_hash,
                password_algorithm: new.password_algorithm,
                full_name: new.full_name,
                phone: new.phone,
                roles: new.roles,
                token_version: 0,
                is_active: true,
                created_at: now,
                updated_at: now,
            };
            if user.roles.contains(Role::Pro) {
                let profile = new_pro_profile(user.id, &new.profile)?;
                self.pro_profiles.lock().unwrap().insert(user.id, profile);
            }
            if user.roles.contains(Role::Client) {
                let profile = new_client_profile(user.id, &new.profile);
                self.client_profiles.lock().unwrap().insert(user.id, profile);
            }
            users.insert(user.id, user.clone());
            Ok(user)
        }

        async fn bump_token_version(&self, id: Uuid) -> Result<i32, AuthError> {
            let mut users = self.users.lock().unwrap();
            let user = users.get_mut(&id).ok_or(AuthError::UnknownOrInactiveUser)?;
            user.token_version += 1;
            Ok(user.token_version)
        }

        async fn grant_role(&self, user_id: Uuid, role: Role, data: ProfileData) -> Result<user::Model, AuthError> {
            let mut users = self.users.lock().unwrap();
            let user = users.get_mut(&user_id).ok_or(AuthError::UnknownOrInactiveUser)?;
            if user.roles.contains(role) {
                return Err(AuthError::RoleAlreadyPresent);
            }
            // build the profile first so a rejected payload mutates nothing
            match role {
                Role::Pro => {
                    let profile = new_pro_profile(user_id, &data)?;
                    self.pro_profiles.lock().unwrap().insert(user_id, profile);
                }
                Role::Client => {
                    let profile = new_client_profile(user_id, &data);
                    self.client_profiles.lock().unwrap().insert(user_id, profile);
                }
                Role::Admin => {}
            }
            user.roles.insert(role);
            Ok(user.clone())
        }

        async fn revoke_role(&self, user_id: Uuid, role: Role) -> Result<RoleRemoval, AuthError> {
            let mut users = self.users.lock().unwrap();
            let user = users.get_mut(&user_id).ok_or(AuthError::UnknownOrInactiveUser)?;
            if !user.roles.remove(role) {
                return Err(AuthError::RoleNotPresent);
            }
            match role {
                Role::Pro => {
                    self.pro_profiles.lock().unwrap().remove(&user_id);
                }
                Role::Client => {
                    self.client_profiles.lock().unwrap().remove(&user_id);
                }
                Role::Admin => {}
            }
            if user.roles.is_empty() {
                users.remove(&user_id);
                self.client_profiles.lock().unwrap().remove(&user_id);
                self.pro_profiles.lock().unwrap().remove(&user_id);
                return Ok(RoleRemoval { user: None, deleted_user: true });
            }
            Ok(RoleRemoval { user: Some(user.clone()), deleted_user: false })
        }

        async fn client_profile(&self, user_id: Uuid) -> Result<Option<client_profile::Model>, AuthError> {
            Ok(self.client_profiles.lock().unwrap().get(&user_id).cloned())
        }

        async fn pro_profile(&self, user_id: Uuid) -> Result<Option<pro_profile::Model>, AuthError> {
            Ok(self.pro_profiles.lock().unwrap().get(&user_id).cloned())
        }
    }
}
