use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::stage_status::EntryStatus;

/// Contractor ledger. Its dispatch fans out to the farmer and inspection
/// branches: one physical hand-off recorded against both downstream ledgers.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contractor_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub work_order_id: Uuid,
    pub cp_entry_id: Uuid,
    pub received_total: i32,
    pub received_hp_3: i32,
    pub received_hp_5: i32,
    pub received_hp_7_5: i32,
    pub forwarded_total: i32,
    pub forwarded_hp_3: i32,
    pub forwarded_hp_5: i32,
    pub forwarded_hp_7_5: i32,
    pub status: EntryStatus,
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
