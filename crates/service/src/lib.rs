//! Business layer for the booking marketplace.
//! - `auth` carries the credential, token, guard and provisioning core.
//! - `account` and `catalog` are CRUD services over the `models` entities.
//! - Clear error types per concern; the HTTP crate maps them to statuses.

pub mod account;
pub mod auth;
pub mod catalog;
pub mod errors;
pub mod pagination;
