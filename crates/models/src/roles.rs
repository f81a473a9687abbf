use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Marketplace role. Every account holds at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Pro,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Pro => "pro",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Role::Client),
            "pro" => Ok(Role::Pro),
            "admin" => Ok(Role::Admin),
            other => Err(ModelError::Validation(format!("unknown role: {other}"))),
        }
    }
}

/// Set-valued role field, stored as a JSONB array on the `users` row.
///
/// Membership changes go through `insert`/`remove` so the "non-empty roles or
/// no account" invariant can be enforced at the one place that deletes users,
/// instead of ad-hoc list checks at every call site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn single(role: Role) -> Self {
        let mut set = BTreeSet::new();
        set.insert(role);
        Self(set)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Returns false when the role was already present.
    pub fn insert(&mut self, role: Role) -> bool {
        self.0.insert(role)
    }

    /// Returns false when the role was not present.
    pub fn remove(&mut self, role: Role) -> bool {
        self.0.remove(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn intersects(&self, allowed: &[Role]) -> bool {
        allowed.iter().any(|role| self.0.contains(role))
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<Role> {
        self.0.iter().copied().collect()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_remove_report_membership_changes() {
        let mut roles = RoleSet::single(Role::Client);
        assert!(roles.insert(Role::Pro));
        assert!(!roles.insert(Role::Pro));
        assert!(roles.remove(Role::Client));
        assert!(!roles.remove(Role::Client));
        assert_eq!(roles.to_vec(), vec![Role::Pro]);
    }

    #[test]
    fn removing_last_role_leaves_empty_set() {
        let mut roles = RoleSet::single(Role::Pro);
        assert!(roles.remove(Role::Pro));
        assert!(roles.is_empty());
    }

    #[test]
    fn intersects_checks_any_shared_role() {
        let roles: RoleSet = [Role::Client, Role::Pro].into_iter().collect();
        assert!(roles.intersects(&[Role::Pro, Role::Admin]));
        assert!(!roles.intersects(&[Role::Admin]));
        assert!(!roles.intersects(&[]));
    }

    #[test]
    fn serializes_as_plain_json_array() {
        let roles: RoleSet = [Role::Pro, Role::Client].into_iter().collect();
        let json = serde_json::to_string(&roles).unwrap();
        assert_eq!(json, r#"["client","pro"]"#);
        let back: RoleSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, roles);
    }

    #[test]
    fn unknown_role_fails_to_parse() {
        assert!("superuser".parse::<Role>().is_err());
        assert_eq!("pro".parse::<Role>().unwrap(), Role::Pro);
    }
}
