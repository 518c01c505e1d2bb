use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::stage_status::EntryStatus;

/// Factory ledger. The origin of physical inventory: manufactured quantities
/// are validated against the work order's admin-set totals rather than an
/// upstream entry, and dispatch to JSR is capped by manufactured-to-date.
/// The dispatch destination location declared on the first dispatch drives
/// the JSR receive-side location gate.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "factory_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub work_order_id: Uuid,
    pub manufactured_total: i32,
    pub manufactured_hp_3: i32,
    pub manufactured_hp_5: i32,
    pub manufactured_hp_7_5: i32,
    pub forwarded_total: i32,
    pub forwarded_hp_3: i32,
    pub forwarded_hp_5: i32,
    pub forwarded_hp_7_5: i32,
    pub status: EntryStatus,
    pub dispatch_state: Option<String>,
    pub dispatch_district: Option<String>,
    pub dispatch_taluka: Option<String>,
    pub dispatch_village: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::work_order::Entity",
        from = "Column::WorkOrderId",
        to = "super::work_order::Column::Id"
    )]
    WorkOrder,
}

impl Related<super::work_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
