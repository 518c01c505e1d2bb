use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One role per custodial stage plus the admin who creates work orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
pub enum Role {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "factory")]
    Factory,
    #[sea_orm(string_value = "jsr")]
    Jsr,
    #[sea_orm(string_value = "whouse")]
    Warehouse,
    #[sea_orm(string_value = "cp")]
    Cp,
    #[sea_orm(string_value = "contractor")]
    Contractor,
    #[sea_orm(string_value = "farmer")]
    Farmer,
    #[sea_orm(string_value = "inspection")]
    Inspection,
}

impl Role {
    /// The persisted string value, used in authorization error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Factory => "factory",
            Role::Jsr => "jsr",
            Role::Warehouse => "whouse",
            Role::Cp => "cp",
            Role::Contractor => "contractor",
            Role::Farmer => "farmer",
            Role::Inspection => "inspection",
        }
    }
}

/// Acting principal. Role and location are always re-fetched from this table
/// by id at operation time, never trusted from transport-layer claims.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub role: Role,
    pub state: Option<String>,
    pub district: Option<String>,
    pub taluka: Option<String>,
    pub village: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
