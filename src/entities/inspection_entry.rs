use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::stage_status::EntryStatus;

/// Inspection ledger, the second branch of the contractor fan-out. A leaf
/// custodian like the farmer entry. The farmer_name/location/photo columns
/// are the approval artifacts persisted when the inspector approves.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inspection_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub work_order_id: Uuid,
    pub contractor_entry_id: Uuid,
    pub received_total: i32,
    pub received_hp_3: i32,
    pub received_hp_5: i32,
    pub received_hp_7_5: i32,
    pub status: EntryStatus,
    pub farmer_name: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub taluka: Option<String>,
    pub village: Option<String>,
    pub photo_1: Option<String>,
    pub photo_2: Option<String>,
    pub photo_3: Option<String>,
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
