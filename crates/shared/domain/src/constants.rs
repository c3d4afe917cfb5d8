//! Domain-level constants.
//!
//! Canonical string forms for the role and KYC status value objects.
//! These are the persisted and wire-visible representations.

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_USER: &str = "USER";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "ADMIN";

/// Super administrator role
pub const ROLE_SUPER_ADMIN: &str = "SUPER_ADMIN";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_USER, ROLE_ADMIN, ROLE_SUPER_ADMIN];

/// Check if a role value is valid
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

// =============================================================================
// KYC Statuses
// =============================================================================

/// Default status for users that have not started verification
pub const KYC_NOT_VERIFIED: &str = "NOT_VERIFIED";

/// Verification submitted and awaiting review
pub const KYC_PENDING: &str = "PENDING";

/// Verification completed
pub const KYC_VERIFIED: &str = "VERIFIED";

/// All valid KYC status values
pub const VALID_KYC_STATUSES: &[&str] = &[KYC_NOT_VERIFIED, KYC_PENDING, KYC_VERIFIED];

/// Check if a KYC status value is valid
pub fn is_valid_kyc_status(status: &str) -> bool {
    VALID_KYC_STATUSES.contains(&status)
}
