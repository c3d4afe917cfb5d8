//! Postal address value object.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Postal address owned by exactly one user.
///
/// Immutable value object: replaced as a whole, never edited in place.
/// Equality is by value across every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    user_id: Uuid,
    street: String,
    city: String,
    state: String,
    zip_code: String,
    country: String,
}

impl Address {
    pub fn new(
        user_id: Uuid,
        street: String,
        city: String,
        state: String,
        zip_code: String,
        country: String,
    ) -> Self {
        Self {
            user_id,
            street,
            city,
            state,
            zip_code,
            country,
        }
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Single-line rendering: street, city, state and country joined by
    /// commas. The zip code is not part of the formatted line.
    pub fn full_address(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            self.street, self.city, self.state, self.country
        )
    }
}

/// Address response (safe to return to client).
///
/// The owning-user identifier is implicit from the parent and stripped out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl From<&Address> for AddressResponse {
    fn from(address: &Address) -> Self {
        Self {
            street: address.street.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            zip_code: address.zip_code.clone(),
            country: address.country.clone(),
        }
    }
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            street: address.street,
            city: address.city,
            state: address.state,
            zip_code: address.zip_code,
            country: address.country,
        }
    }
}
