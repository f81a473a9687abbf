//! Authentication and authorization core.
//!
//! Four pieces: credential hashing (`password`), token issue/verify
//! (`token`), the access guard composing both with a user lookup
//! (`service`), and role/profile provisioning (`provision`). Persistence
//! sits behind the `UserStore` trait so the whole module runs against the
//! in-memory mock in tests.

pub mod domain;
pub mod errors;
pub mod password;
pub mod provision;
pub mod repo;
pub mod repository;
pub mod service;
pub mod token;

pub use errors::AuthError;
pub use service::{AuthConfig, AuthService};
