//! SeaORM entities - the persisted record shapes.

pub mod address;
pub mod user;
