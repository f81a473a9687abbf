//! Persistence entities for the booking marketplace.
//! Each module pairs a SeaORM entity with the small data-access helpers the
//! service layer builds on.

pub mod address;
pub mod category;
pub mod client_profile;
pub mod db;
pub mod errors;
pub mod offering;
pub mod pro_profile;
pub mod roles;
pub mod service_group;
pub mod user;
