//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;

use domain::{Address, KycStatus, User, UserRole};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub firstname: String,
    pub lastname: String,
    pub phone: String,
    pub role: String,
    pub kyc_status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::address::Entity")]
    Address,
}

impl Related<super::address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert the database model plus its optional address row to the
    /// domain aggregate. A missing address row means "no address", never an
    /// error. Role and KYC status are normalized on the way in.
    pub fn into_domain(self, address: Option<super::address::Model>) -> User {
        User::from_parts(
            self.id,
            self.email,
            self.password_hash,
            self.firstname,
            self.lastname,
            self.phone,
            address.map(Address::from),
            UserRole::from(self.role.as_str()),
            KycStatus::from(self.kyc_status.as_str()),
            self.created_at,
            self.updated_at,
        )
    }
}

/// Full write shape for inserts. Role and KYC status are written by identity
/// as their canonical strings.
impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        Self {
            id: Set(user.id()),
            email: Set(user.email().to_string()),
            password_hash: Set(user.password_hash().to_string()),
            firstname: Set(user.firstname().to_string()),
            lastname: Set(user.lastname().to_string()),
            phone: Set(user.phone().to_string()),
            role: Set(user.role().to_string()),
            kyc_status: Set(user.kyc_status().to_string()),
            created_at: Set(user.created_at()),
            updated_at: Set(user.updated_at()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_model(role: &str, kyc_status: &str) -> Model {
        let now = Utc::now();
        Model {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            password_hash: "hashed".to_string(),
            firstname: "ana".to_string(),
            lastname: "lee".to_string(),
            phone: "555".to_string(),
            role: role.to_string(),
            kyc_status: kyc_status.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_model_round_trips_through_the_domain() {
        let model = sample_model("ADMIN", "PENDING");
        let address = super::super::address::Model {
            user_id: model.id,
            street: "1 Rd".to_string(),
            city: "C".to_string(),
            state: "S".to_string(),
            zip_code: "00000".to_string(),
            country: "US".to_string(),
        };

        let user = model.clone().into_domain(Some(address.clone()));
        let active = ActiveModel::from(&user);

        assert_eq!(active.id.unwrap(), model.id);
        assert_eq!(active.email.unwrap(), model.email);
        assert_eq!(active.password_hash.unwrap(), model.password_hash);
        assert_eq!(active.firstname.unwrap(), model.firstname);
        assert_eq!(active.lastname.unwrap(), model.lastname);
        assert_eq!(active.phone.unwrap(), model.phone);
        assert_eq!(active.role.unwrap(), model.role);
        assert_eq!(active.kyc_status.unwrap(), model.kyc_status);
        assert_eq!(active.created_at.unwrap(), model.created_at);
        assert_eq!(active.updated_at.unwrap(), model.updated_at);

        let address_active = super::super::address::ActiveModel::from(
            user.address().expect("address row was supplied"),
        );
        assert_eq!(address_active.user_id.unwrap(), address.user_id);
        assert_eq!(address_active.street.unwrap(), address.street);
        assert_eq!(address_active.zip_code.unwrap(), address.zip_code);
    }

    #[test]
    fn test_malformed_stored_enums_normalize_on_read() {
        let user = sample_model("bogus", "").into_domain(None);

        assert_eq!(user.role(), UserRole::User);
        assert_eq!(user.kyc_status(), KycStatus::NotVerified);
    }

    #[test]
    fn test_missing_address_row_means_no_address() {
        let user = sample_model("USER", "NOT_VERIFIED").into_domain(None);

        assert!(user.address().is_none());
    }
}
