//! KYC verification status value object.

use serde::{Deserialize, Serialize};

use crate::constants::{KYC_NOT_VERIFIED, KYC_PENDING, KYC_VERIFIED};

/// KYC verification lifecycle of a user.
///
/// Same normalization policy as [`crate::UserRole`]: unknown or absent input
/// coerces to [`KycStatus::NotVerified`] on read, writes are identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KycStatus {
    #[default]
    NotVerified,
    Pending,
    Verified,
}

impl From<&str> for KycStatus {
    fn from(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            KYC_PENDING => KycStatus::Pending,
            KYC_VERIFIED => KycStatus::Verified,
            _ => KycStatus::NotVerified,
        }
    }
}

impl From<String> for KycStatus {
    fn from(s: String) -> Self {
        KycStatus::from(s.as_str())
    }
}

impl From<KycStatus> for String {
    fn from(status: KycStatus) -> Self {
        status.to_string()
    }
}

impl std::fmt::Display for KycStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KycStatus::NotVerified => write!(f, "{}", KYC_NOT_VERIFIED),
            KycStatus::Pending => write!(f, "{}", KYC_PENDING),
            KycStatus::Verified => write!(f, "{}", KYC_VERIFIED),
        }
    }
}
