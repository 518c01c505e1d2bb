use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ledger entry status shared by all seven stage tables. The dispatched_*
/// values name the downstream custodian a partial dispatch went to;
/// `all_units_dispatched` marks the stage complete.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_status")]
pub enum EntryStatus {
    #[sea_orm(string_value = "units_received")]
    UnitsReceived,
    #[sea_orm(string_value = "dispatched_to_jsr")]
    DispatchedToJsr,
    #[sea_orm(string_value = "dispatched_to_whouse")]
    DispatchedToWhouse,
    #[sea_orm(string_value = "dispatched_to_cp")]
    DispatchedToCp,
    #[sea_orm(string_value = "dispatched_to_contractor")]
    DispatchedToContractor,
    #[sea_orm(string_value = "dispatched_to_farmer")]
    DispatchedToFarmer,
    #[sea_orm(string_value = "all_units_dispatched")]
    AllUnitsDispatched,
}

impl EntryStatus {
    /// The persisted string value, used in flow-state error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::UnitsReceived => "units_received",
            EntryStatus::DispatchedToJsr => "dispatched_to_jsr",
            EntryStatus::DispatchedToWhouse => "dispatched_to_whouse",
            EntryStatus::DispatchedToCp => "dispatched_to_cp",
            EntryStatus::DispatchedToContractor => "dispatched_to_contractor",
            EntryStatus::DispatchedToFarmer => "dispatched_to_farmer",
            EntryStatus::AllUnitsDispatched => "all_units_dispatched",
        }
    }
}

/// Farmer-side resolution tracker, independent of the ledger status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "farmer_status")]
pub enum FarmerStatus {
    #[sea_orm(string_value = "units_received")]
    UnitsReceived,
    #[sea_orm(string_value = "defect_reported")]
    DefectReported,
    #[sea_orm(string_value = "completed")]
    Completed,
}
