//! User Service Library
//!
//! User aggregate management behind a small service contract: creation with
//! email uniqueness, lookups, partial updates, deletion, and role/KYC status
//! transitions, persisted through a repository abstraction. The request
//! transport and process wiring live outside this crate; consumers construct
//! a [`Database`], wrap it in a [`UserStore`], and hand that to a
//! [`UserManager`].

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

pub use config::UserServiceConfig;
pub use infra::{Database, Migrator};
pub use repository::{InMemoryUserRepository, UserRepository, UserStore};
pub use service::{UserManager, UserService};
