use serde::{Deserialize, Serialize};

use models::address::Address;
use models::roles::{Role, RoleSet};
use models::user;

/// The authenticated user resolved from a valid token.
pub type Principal = user::Model;

/// Signup input; mirrors the public signup request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupInput {
    pub email: String,
    pub full_name: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub roles: Vec<Role>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

impl SignupInput {
    /// Role-specific payload for the profiles created at signup. The client
    /// profile starts with the account phone.
    pub fn profile_data(&self) -> ProfileData {
        ProfileData {
            business_name: self.business_name.clone(),
            website: self.website.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Role-specific extension payload consumed when a role is granted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileData {
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// New user record handed to the store; all fields already validated.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub password_algorithm: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub roles: RoleSet,
    pub profile: ProfileData,
}

/// Login/signup result: the principal plus its bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: Principal,
    pub token: String,
}

/// Outcome of a role removal. `user` is `None` exactly when removing the
/// last role cascaded into deleting the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRemoval {
    pub user: Option<Principal>,
    pub deleted_user: bool,
}
