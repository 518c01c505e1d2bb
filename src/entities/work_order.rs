use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Custody pointer: which custodian is presently authorized to act.
/// `whouse` is the persisted value for the warehouse stage, kept for
/// compatibility with the wire format used by downstream consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "current_stage")]
pub enum CurrentStage {
    #[sea_orm(string_value = "admin_created")]
    AdminCreated,
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
    #[sea_orm(string_value = "farmer_inspection")]
    FarmerInspection,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "defect_reported")]
    DefectReported,
    #[sea_orm(string_value = "rejected_by_jsr")]
    RejectedByJsr,
    #[sea_orm(string_value = "rejected_by_inspection")]
    RejectedByInspection,
}

impl CurrentStage {
    /// The persisted string value, used in error messages and events.
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrentStage::AdminCreated => "admin_created",
            CurrentStage::Factory => "factory",
            CurrentStage::Jsr => "jsr",
            CurrentStage::Warehouse => "whouse",
            CurrentStage::Cp => "cp",
            CurrentStage::Contractor => "contractor",
            CurrentStage::FarmerInspection => "farmer_inspection",
            CurrentStage::Completed => "completed",
            CurrentStage::DefectReported => "defect_reported",
            CurrentStage::RejectedByJsr => "rejected_by_jsr",
            CurrentStage::RejectedByInspection => "rejected_by_inspection",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "work_order_status")]
pub enum WorkOrderStatus {
    #[sea_orm(string_value = "created")]
    Created,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Decision state for the two explicit quality gates (JSR and inspection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "approval_status")]
pub enum ApprovalStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "work_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub work_order_number: String,
    pub title: String,
    pub region: String,
    pub total_quantity: i32,
    pub hp_3_quantity: i32,
    pub hp_5_quantity: i32,
    pub hp_7_5_quantity: i32,
    pub current_stage: CurrentStage,
    pub status: WorkOrderStatus,
    pub jsr_approval_status: ApprovalStatus,
    pub inspection_approval_status: ApprovalStatus,
    /// Mandatory farmer-list attachment, stored as the path returned by the
    /// file store collaborator.
    pub farmer_list_path: String,
    pub factory_timeline_days: i32,
    pub jsr_timeline_days: i32,
    pub whouse_timeline_days: i32,
    pub cp_timeline_days: i32,
    pub contractor_timeline_days: i32,
    pub farmer_timeline_days: i32,
    pub inspection_timeline_days: i32,
    pub start_date: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
