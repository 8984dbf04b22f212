use sea_orm::{entity::prelude::*, ActiveValue::Set, ConnectionTrait, EntityTrait, PaginatorTrait, SqlErr};
use serde::{Deserialize, Serialize};

use common::types::RegistrationRecord;

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "registration")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub cpf: String,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub age: String,
    #[sea_orm(column_type = "Text")]
    pub postal_code: String,
    #[sea_orm(column_type = "Text")]
    pub address: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for RegistrationRecord {
    fn from(m: Model) -> Self {
        RegistrationRecord {
            cpf: m.cpf,
            name: m.name,
            age: m.age,
            postal_code: m.postal_code,
            address: m.address,
        }
    }
}

/// Reject absent or blank values. The stored value is never trimmed.
pub fn validate_required(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn map_db_err(e: DbErr) -> ModelError {
    if let Some(SqlErr::UniqueConstraintViolation(msg)) = e.sql_err() {
        return ModelError::Conflict(msg);
    }
    let msg = e.to_string();
    // drivers without a mapped error code still say so in the message
    if msg.contains("UNIQUE constraint failed") || msg.contains("duplicate key") || msg.contains("Duplicate entry") {
        return ModelError::Conflict(msg);
    }
    ModelError::Db(msg)
}

/// Insert one row with a single statement. `address` may be empty.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    cpf: &str,
    name: &str,
    age: &str,
    postal_code: &str,
    address: &str,
) -> Result<Model, ModelError> {
    validate_required("cpf", cpf)?;
    validate_required("name", name)?;
    validate_required("age", age)?;
    validate_required("postalCode", postal_code)?;

    let model = Model {
        cpf: cpf.to_string(),
        name: name.to_string(),
        age: age.to_string(),
        postal_code: postal_code.to_string(),
        address: address.to_string(),
    };
    let am = ActiveModel {
        cpf: Set(model.cpf.clone()),
        name: Set(model.name.clone()),
        age: Set(model.age.clone()),
        postal_code: Set(model.postal_code.clone()),
        address: Set(model.address.clone()),
    };
    Entity::insert(am)
        .exec_without_returning(db)
        .await
        .map_err(map_db_err)?;
    Ok(model)
}

/// Every row in storage order.
pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Entity::find().all(db).await.map_err(map_db_err)
}

pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, ModelError> {
    Entity::find().count(db).await.map_err(map_db_err)
}
