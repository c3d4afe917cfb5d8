//! User aggregate root and related wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::address::{Address, AddressResponse};
use crate::kyc::KycStatus;
use crate::role::UserRole;

/// User aggregate root.
///
/// Fields are private; state changes go through the named operations below,
/// each of which advances `updated_at`. The aggregate never performs I/O and
/// never holds a plaintext credential: `password_hash` is set from an already
/// hashed value and only ever read back as that hash.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: Uuid,
    email: String,
    password_hash: String,
    firstname: String,
    lastname: String,
    phone: String,
    address: Option<Address>,
    role: UserRole,
    kyc_status: KycStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with default role and KYC status.
    ///
    /// The identifier is assigned by the orchestrating layer, not the store.
    /// Creation always supplies the owned address, and both timestamps start
    /// at the same instant.
    pub fn new(
        id: Uuid,
        email: String,
        password_hash: String,
        firstname: String,
        lastname: String,
        phone: String,
        address: Address,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            password_hash,
            firstname,
            lastname,
            phone,
            address: Some(address),
            role: UserRole::default(),
            kyc_status: KycStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rehydrate a user from stored state. Field order mirrors the persisted
    /// record; no defaulting or stamping happens here.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: Uuid,
        email: String,
        password_hash: String,
        firstname: String,
        lastname: String,
        phone: String,
        address: Option<Address>,
        role: UserRole,
        kyc_status: KycStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            firstname,
            lastname,
            phone,
            address,
            role,
            kyc_status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn firstname(&self) -> &str {
        &self.firstname
    }

    pub fn lastname(&self) -> &str {
        &self.lastname
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn kyc_status(&self) -> KycStatus {
        self.kyc_status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// First and last name, each capitalized, joined with a single space.
    /// Computed on read, never stored.
    pub fn fullname(&self) -> String {
        format!(
            "{} {}",
            capitalize(&self.firstname),
            capitalize(&self.lastname)
        )
    }

    /// Overwrite the profile fields unconditionally.
    pub fn update_profile(&mut self, firstname: String, lastname: String, phone: String) {
        self.firstname = firstname;
        self.lastname = lastname;
        self.phone = phone;
        self.updated_at = Utc::now();
    }

    /// Overwrite the role. Gating who may do this is the caller's concern.
    pub fn update_role(&mut self, role: UserRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    /// Overwrite the KYC status. Same authorization note as `update_role`.
    pub fn update_kyc_status(&mut self, status: KycStatus) {
        self.kyc_status = status;
        self.updated_at = Utc::now();
    }

    /// Overlay a partial update: fields absent from the payload are left
    /// untouched, supplied fields overwrite (including to empty string).
    /// Always stamps `updated_at`.
    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(firstname) = update.firstname {
            self.firstname = firstname;
        }
        if let Some(lastname) = update.lastname {
            self.lastname = lastname;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        self.updated_at = Utc::now();
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// User creation data transfer object.
///
/// The address fields arrive flattened alongside the profile fields; the
/// mapping layer folds them into the owned [`Address`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    /// User email address
    pub email: String,
    /// Plaintext password, hashed before it reaches the aggregate
    pub password: String,
    pub firstname: String,
    pub lastname: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// Partial user update payload.
///
/// `None` means "leave unchanged"; `Some("")` is a real value. Email changes
/// are checked for conflicts by the service but never written by the store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub phone: Option<String>,
}

/// User response (safe to return to client).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique user identifier
    pub id: Uuid,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub phone: String,
    /// Canonical role string
    pub role: String,
    /// Canonical KYC status string
    pub kyc_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            phone: user.phone.clone(),
            role: user.role.to_string(),
            kyc_status: user.kyc_status.to_string(),
            address: user.address.as_ref().map(AddressResponse::from),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse::from(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let id = Uuid::new_v4();
        let address = Address::new(
            id,
            "1 Rd".to_string(),
            "C".to_string(),
            "S".to_string(),
            "00000".to_string(),
            "US".to_string(),
        );
        User::new(
            id,
            "a@x.com".to_string(),
            "hashed".to_string(),
            "ana".to_string(),
            "lee".to_string(),
            "555".to_string(),
            address,
        )
    }

    #[test]
    fn test_new_user_gets_defaults_and_equal_timestamps() {
        let user = sample_user();
        assert_eq!(user.role(), UserRole::User);
        assert_eq!(user.kyc_status(), KycStatus::NotVerified);
        assert_eq!(user.created_at(), user.updated_at());
        assert!(user.address().is_some());
    }

    #[test]
    fn test_fullname_capitalizes_both_names() {
        let user = sample_user();
        assert_eq!(user.fullname(), "Ana Lee");
    }

    #[test]
    fn test_fullname_lowers_everything_after_the_first_letter() {
        let mut user = sample_user();
        user.update_profile("aNA".to_string(), "LEE".to_string(), "555".to_string());
        assert_eq!(user.fullname(), "Ana Lee");
    }

    #[test]
    fn test_fullname_of_empty_names_is_a_single_space() {
        let mut user = sample_user();
        user.update_profile(String::new(), String::new(), "555".to_string());
        assert_eq!(user.fullname(), " ");
    }

    #[test]
    fn test_update_profile_overwrites_and_advances_updated_at() {
        let mut user = sample_user();
        let before = user.updated_at();
        user.update_profile("bo".to_string(), "kim".to_string(), "556".to_string());
        assert_eq!(user.firstname(), "bo");
        assert_eq!(user.lastname(), "kim");
        assert_eq!(user.phone(), "556");
        assert!(user.updated_at() >= before);
        assert!(user.updated_at() >= user.created_at());
    }

    #[test]
    fn test_update_role_and_kyc_status_overwrite() {
        let mut user = sample_user();
        user.update_role(UserRole::Admin);
        user.update_kyc_status(KycStatus::Verified);
        assert_eq!(user.role(), UserRole::Admin);
        assert_eq!(user.kyc_status(), KycStatus::Verified);
    }

    #[test]
    fn test_empty_partial_update_changes_only_updated_at() {
        let mut user = sample_user();
        let before = user.clone();
        user.apply_update(UpdateUser::default());
        assert_eq!(user.email(), before.email());
        assert_eq!(user.firstname(), before.firstname());
        assert_eq!(user.lastname(), before.lastname());
        assert_eq!(user.phone(), before.phone());
        assert_eq!(user.role(), before.role());
        assert_eq!(user.kyc_status(), before.kyc_status());
        assert_eq!(user.address(), before.address());
        assert_eq!(user.created_at(), before.created_at());
        assert!(user.updated_at() >= before.updated_at());
    }

    #[test]
    fn test_partial_update_overlays_only_supplied_fields() {
        let mut user = sample_user();
        user.apply_update(UpdateUser {
            phone: Some("777".to_string()),
            ..Default::default()
        });
        assert_eq!(user.phone(), "777");
        assert_eq!(user.firstname(), "ana");
        assert_eq!(user.email(), "a@x.com");
    }

    #[test]
    fn test_supplied_empty_string_is_a_real_value() {
        let mut user = sample_user();
        user.apply_update(UpdateUser {
            phone: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(user.phone(), "");
    }

    #[test]
    fn test_response_never_contains_the_credential() {
        let user = sample_user();
        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "USER");
        assert_eq!(json["kycStatus"], "NOT_VERIFIED");
        assert!(json.get("createdAt").is_some());
        assert!(json["address"].get("userId").is_none());
    }

    #[test]
    fn test_from_parts_rehydrates_every_field() {
        let original = sample_user();
        let copy = User::from_parts(
            original.id(),
            original.email().to_string(),
            original.password_hash().to_string(),
            original.firstname().to_string(),
            original.lastname().to_string(),
            original.phone().to_string(),
            original.address().cloned(),
            original.role(),
            original.kyc_status(),
            original.created_at(),
            original.updated_at(),
        );
        assert_eq!(copy, original);
    }
}
