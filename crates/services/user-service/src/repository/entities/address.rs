//! Address database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;

use domain::Address;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain value object
impl From<Model> for Address {
    fn from(model: Model) -> Self {
        Address::new(
            model.user_id,
            model.street,
            model.city,
            model.state,
            model.zip_code,
            model.country,
        )
    }
}

/// Full write shape for inserts and replacements
impl From<&Address> for ActiveModel {
    fn from(address: &Address) -> Self {
        Self {
            user_id: Set(address.user_id()),
            street: Set(address.street().to_string()),
            city: Set(address.city().to_string()),
            state: Set(address.state().to_string()),
            zip_code: Set(address.zip_code().to_string()),
            country: Set(address.country().to_string()),
        }
    }
}
