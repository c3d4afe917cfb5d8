//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the User aggregate, its owned Address, the role and KYC status value
//! objects with their normalization rules, and the wire-facing DTOs.

pub mod address;
pub mod constants;
pub mod error;
pub mod kyc;
pub mod password;
pub mod role;
pub mod user;

pub use address::{Address, AddressResponse};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use kyc::KycStatus;
pub use password::Password;
pub use role::UserRole;
pub use user::{CreateUser, UpdateUser, User, UserResponse};
