use async_trait::async_trait;
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use models::roles::Role;
use models::{client_profile, pro_profile, user};

use crate::auth::domain::{NewUser, ProfileData, RoleRemoval};
use crate::auth::errors::AuthError;
use crate::auth::repository::UserStore;

/// Relational store. Multi-step operations run inside one transaction;
/// dropping an uncommitted transaction on the error path rolls it back, so
/// role list and profile table can never diverge.
pub struct SeaOrmUserStore {
    pub db: DatabaseConnection,
}

impl SeaOrmUserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn storage(e: sea_orm::DbErr) -> AuthError {
    AuthError::StorageFailure(e.to_string())
}

fn required_business_name(data: &ProfileData) -> Result<String, AuthError> {
    data.business_name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| AuthError::IncompleteProfileData("business name required".into()))
}

#[async_trait]
impl UserStore for SeaOrmUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, AuthError> {
        use sea_orm::EntityTrait;
        user::Entity::find_by_id(id).one(&self.db).await.map_err(storage)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, AuthError> {
        Ok(user::find_by_email(&self.db, email).await?)
    }

    async fn create_user(&self, new: NewUser) -> Result<user::Model, AuthError> {
        let txn = self.db.begin().await.map_err(storage)?;

        if user::find_by_email(&txn, &new.email).await?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }
        let created = user::create(
            &txn,
            user::NewUser {
                email: new.email,
                password_hash: new.password_hash,
                password_algorithm: new.password_algorithm,
                full_name: new.full_name,
                phone: new.phone,
                roles: new.roles,
            },
        )
        .await?;

        if created.roles.contains(Role::Pro) {
            let business_name = required_business_name(&new.profile)?;
            pro_profile::create(
                &txn,
                created.id,
                business_name,
                new.profile.website.clone(),
                new.profile.address.clone(),
            )
            .await?;
        }
        if created.roles.contains(Role::Client) {
            client_profile::create(&txn, created.id, new.profile.phone.clone(), new.profile.address.clone())
                .await?;
        }

        txn.commit().await.map_err(storage)?;
        Ok(created)
    }

    async fn bump_token_version(&self, id: Uuid) -> Result<i32, AuthError> {
        Ok(user::bump_token_version(&self.db, id).await?)
    }

    async fn grant_role(&self, user_id: Uuid, role: Role, data: ProfileData) -> Result<user::Model, AuthError> {
        use sea_orm::{ActiveModelTrait, EntityTrait, Set};

        let txn = self.db.begin().await.map_err(storage)?;

        let found = user::Entity::find_by_id(user_id)
            .one(&txn)
            .await
            .map_err(storage)?
            .ok_or(AuthError::UnknownOrInactiveUser)?;
        if found.roles.contains(role) {
            return Err(AuthError::RoleAlreadyPresent);
        }

        match role {
            Role::Pro => {
                let business_name = required_business_name(&data)?;
                pro_profile::create(&txn, user_id, business_name, data.website.clone(), data.address.clone())
                    .await?;
            }
            Role::Client => {
                client_profile::create(&txn, user_id, data.phone.clone(), data.address.clone()).await?;
            }
            Role::Admin => {}
        }

        let mut roles = found.roles.clone();
        roles.insert(role);
        let mut am: user::ActiveModel = found.into();
        am.roles = Set(roles);
        am.updated_at = Set(chrono::Utc::now().into());
        let updated = am.update(&txn).await.map_err(storage)?;

        txn.commit().await.map_err(storage)?;
        Ok(updated)
    }

    async fn revoke_role(&self, user_id: Uuid, role: Role) -> Result<RoleRemoval, AuthError> {
        use sea_orm::{ActiveModelTrait, EntityTrait, Set};

        let txn = self.db.begin().await.map_err(storage)?;

        let found = user::Entity::find_by_id(user_id)
            .one(&txn)
            .await
            .map_err(storage)?
            .ok_or(AuthError::UnknownOrInactiveUser)?;
        let mut roles = found.roles.clone();
        if !roles.remove(role) {
            return Err(AuthError::RoleNotPresent);
        }

        match role {
            Role::Pro => pro_profile::delete_by_user(&txn, user_id).await?,
            Role::Client => client_profile::delete_by_user(&txn, user_id).await?,
            Role::Admin => {}
        }

        // an account cannot exist roleless: removing the last role removes
        // the account, remaining profiles cascade via FK
        if roles.is_empty() {
            user::hard_delete(&txn, user_id).await?;
            txn.commit().await.map_err(storage)?;
            return Ok(RoleRemoval { user: None, deleted_user: true });
        }

        let mut am: user::ActiveModel = found.into();
        am.roles = Set(roles);
        am.updated_at = Set(chrono::Utc::now().into());
        let updated = am.update(&txn).await.map_err(storage)?;

        txn.commit().await.map_err(storage)?;
        Ok(RoleRemoval { user: Some(updated), deleted_user: false })
    }

    async fn client_profile(&self, user_id: Uuid) -> Result<Option<client_profile::Model>, AuthError> {
        Ok(client_profile::find_by_user(&self.db, user_id).await?)
    }

    async fn pro_profile(&self, user_id: Uuid) -> Result<Option<pro_profile::Model>, AuthError> {
        Ok(pro_profile::find_by_user(&self.db, user_id).await?)
    }
}
