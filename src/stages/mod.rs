//! The stage-transition and inventory-conservation engine.
//!
//! The eight custodial stages are data, not code: `StageSpec` describes each
//! stage's gate, role, upstream feed, and completion effects, and one
//! parameterized routine in `transition` executes every receive and dispatch
//! against that table.

pub mod deadlines;
pub mod ledger;
pub mod machine;
pub mod progress;
pub mod quantities;
pub mod records;
pub mod transition;
pub mod validate;

use crate::entities::stage_status::EntryStatus;
use crate::entities::user::Role;
use crate::entities::work_order::CurrentStage;
use crate::stages::quantities::QuantitySet;

/// The admin-set totals on the work order, as a quantity set. Factory
/// manufacturing and the all-dispatched condition are both measured against
/// this.
pub fn admin_totals(work_order: &crate::entities::work_order::Model) -> QuantitySet {
    QuantitySet::new(
        work_order.total_quantity,
        work_order.hp_3_quantity,
        work_order.hp_5_quantity,
        work_order.hp_7_5_quantity,
    )
}

/// The eight stages tracked by stage records; all but `AdminCreated` own a
/// quantity ledger.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    AdminCreated,
    Factory,
    Jsr,
    Warehouse,
    Cp,
    Contractor,
    Farmer,
    Inspection,
}

/// Static description of one stage: who may act, when, against which
/// upstream pool, and what completing it does to the work order.
#[derive(Debug)]
pub struct StageSpec {
    pub id: StageId,
    /// `stage_records.stage_name` value.
    pub record_name: &'static str,
    /// Human-readable name for error messages.
    pub display_name: &'static str,
    /// Fixed position in the audit sequence, 1-based.
    pub order: i32,
    /// Role whose users operate this stage.
    pub role: Role,
    /// `current_stage` values under which this stage may receive units
    /// (and take decisions / report defects).
    pub receive_gates: &'static [CurrentStage],
    /// `current_stage` values under which this stage may dispatch.
    pub dispatch_gates: &'static [CurrentStage],
    /// Stage whose ledger feeds this one. Factory has none: it manufactures
    /// against the work order's admin totals.
    pub upstream: Option<StageId>,
    /// Upstream entry statuses that permit receiving here.
    pub accepted_upstream: &'static [EntryStatus],
    /// Ledger status recorded on a partial dispatch from this stage.
    /// Leaf stages (farmer, inspection) never dispatch.
    pub dispatch_status: Option<EntryStatus>,
    /// Stages whose records flip to in_progress when this stage completes.
    pub downstream: &'static [StageId],
    /// `current_stage` after this stage completes.
    pub advance_to: Option<CurrentStage>,
}

const ADMIN_CREATED: StageSpec = StageSpec {
    id: StageId::AdminCreated,
    record_name: "admin_created",
    display_name: "admin creation",
    order: 1,
    role: Role::Admin,
    receive_gates: &[],
    dispatch_gates: &[],
    upstream: None,
    accepted_upstream: &[],
    dispatch_status: None,
    downstream: &[StageId::Factory],
    advance_to: None,
};

const FACTORY: StageSpec = StageSpec {
    id: StageId::Factory,
    record_name: "factory",
    display_name: "factory",
    order: 2,
    role: Role::Factory,
    // Manufacturing is what moves a fresh work order out of admin_created.
    receive_gates: &[CurrentStage::AdminCreated, CurrentStage::Factory],
    dispatch_gates: &[CurrentStage::Factory],
    upstream: None,
    accepted_upstream: &[],
    dispatch_status: Some(EntryStatus::DispatchedToJsr),
    downstream: &[StageId::Jsr],
    advance_to: Some(CurrentStage::Jsr),
};

const JSR: StageSpec = StageSpec {
    id: StageId::Jsr,
    record_name: "jsr",
    display_name: "JSR",
    order: 3,
    role: Role::Jsr,
    receive_gates: &[CurrentStage::Jsr],
    dispatch_gates: &[CurrentStage::Jsr],
    upstream: Some(StageId::Factory),
    accepted_upstream: &[EntryStatus::DispatchedToJsr, EntryStatus::AllUnitsDispatched],
    dispatch_status: Some(EntryStatus::DispatchedToWhouse),
    downstream: &[StageId::Warehouse],
    advance_to: Some(CurrentStage::Warehouse),
};

const WAREHOUSE: StageSpec = StageSpec {
    id: StageId::Warehouse,
    record_name: "whouse",
    display_name: "warehouse",
    order: 4,
    role: Role::Warehouse,
    receive_gates: &[CurrentStage::Warehouse],
    dispatch_gates: &[CurrentStage::Warehouse],
    upstream: Some(StageId::Jsr),
    accepted_upstream: &[
        EntryStatus::DispatchedToWhouse,
        EntryStatus::AllUnitsDispatched,
    ],
    dispatch_status: Some(EntryStatus::DispatchedToCp),
    downstream: &[StageId::Cp],
    advance_to: Some(CurrentStage::Cp),
};

const CP: StageSpec = StageSpec {
    id: StageId::Cp,
    record_name: "cp",
    display_name: "CP",
    order: 5,
    role: Role::Cp,
    receive_gates: &[CurrentStage::Cp],
    dispatch_gates: &[CurrentStage::Cp],
    upstream: Some(StageId::Warehouse),
    accepted_upstream: &[EntryStatus::DispatchedToCp, EntryStatus::AllUnitsDispatched],
    dispatch_status: Some(EntryStatus::DispatchedToContractor),
    downstream: &[StageId::Contractor],
    advance_to: Some(CurrentStage::Contractor),
};

const CONTRACTOR: StageSpec = StageSpec {
    id: StageId::Contractor,
    record_name: "contractor",
    display_name: "contractor",
    order: 6,
    role: Role::Contractor,
    receive_gates: &[CurrentStage::Contractor],
    dispatch_gates: &[CurrentStage::Contractor],
    upstream: Some(StageId::Cp),
    accepted_upstream: &[
        EntryStatus::DispatchedToContractor,
        EntryStatus::AllUnitsDispatched,
    ],
    dispatch_status: Some(EntryStatus::DispatchedToFarmer),
    // The one fan-out: completing the contractor activates both branches.
    downstream: &[StageId::Farmer, StageId::Inspection],
    advance_to: Some(CurrentStage::FarmerInspection),
};

const FARMER: StageSpec = StageSpec {
    id: StageId::Farmer,
    record_name: "farmer",
    display_name: "farmer",
    order: 7,
    role: Role::Farmer,
    receive_gates: &[CurrentStage::FarmerInspection, CurrentStage::DefectReported],
    dispatch_gates: &[],
    upstream: Some(StageId::Contractor),
    accepted_upstream: &[
        EntryStatus::DispatchedToFarmer,
        EntryStatus::AllUnitsDispatched,
    ],
    dispatch_status: None,
    downstream: &[],
    advance_to: None,
};

const INSPECTION: StageSpec = StageSpec {
    id: StageId::Inspection,
    record_name: "inspection",
    display_name: "inspection",
    order: 8,
    role: Role::Inspection,
    receive_gates: &[CurrentStage::FarmerInspection, CurrentStage::DefectReported],
    dispatch_gates: &[],
    upstream: Some(StageId::Contractor),
    accepted_upstream: &[
        EntryStatus::DispatchedToFarmer,
        EntryStatus::AllUnitsDispatched,
    ],
    dispatch_status: None,
    downstream: &[],
    advance_to: None,
};

/// All stages in audit order.
pub const STAGES: [&StageSpec; 8] = [
    &ADMIN_CREATED,
    &FACTORY,
    &JSR,
    &WAREHOUSE,
    &CP,
    &CONTRACTOR,
    &FARMER,
    &INSPECTION,
];

/// The seven stages that own a quantity ledger, in flow order.
pub const LEDGER_STAGES: [StageId; 7] = [
    StageId::Factory,
    StageId::Jsr,
    StageId::Warehouse,
    StageId::Cp,
    StageId::Contractor,
    StageId::Farmer,
    StageId::Inspection,
];

impl StageId {
    pub fn spec(self) -> &'static StageSpec {
        match self {
            StageId::AdminCreated => &ADMIN_CREATED,
            StageId::Factory => &FACTORY,
            StageId::Jsr => &JSR,
            StageId::Warehouse => &WAREHOUSE,
            StageId::Cp => &CP,
            StageId::Contractor => &CONTRACTOR,
            StageId::Farmer => &FARMER,
            StageId::Inspection => &INSPECTION,
        }
    }

    pub fn record_name(self) -> &'static str {
        self.spec().record_name
    }

    pub fn display_name(self) -> &'static str {
        self.spec().display_name
    }

    /// Timeline day-count set at creation for this stage's deadline window.
    pub fn timeline_days(self, work_order: &crate::entities::work_order::Model) -> i32 {
        match self {
            StageId::AdminCreated => 0,
            StageId::Factory => work_order.factory_timeline_days,
            StageId::Jsr => work_order.jsr_timeline_days,
            StageId::Warehouse => work_order.whouse_timeline_days,
            StageId::Cp => work_order.cp_timeline_days,
            StageId::Contractor => work_order.contractor_timeline_days,
            StageId::Farmer => work_order.farmer_timeline_days,
            StageId::Inspection => work_order.inspection_timeline_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn stage_orders_are_sequential_and_unique() {
        let orders: Vec<i32> = STAGES.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5, 6, 7, 8]);

        let names: HashSet<&str> = STAGES.iter().map(|s| s.record_name).collect();
        assert_eq!(names.len(), STAGES.len());
    }

    #[test]
    fn upstream_downstream_links_are_symmetric() {
        for spec in STAGES {
            if let Some(upstream) = spec.upstream {
                assert!(
                    upstream.spec().downstream.contains(&spec.id),
                    "{} lists {} as upstream, but is not its downstream",
                    spec.record_name,
                    upstream.record_name()
                );
            }
        }
    }

    #[test]
    fn dispatching_stages_have_partial_status_and_advance_target() {
        for spec in STAGES {
            assert_eq!(
                spec.dispatch_status.is_some(),
                spec.advance_to.is_some(),
                "{}",
                spec.record_name
            );
            assert_eq!(
                spec.dispatch_status.is_some(),
                !spec.dispatch_gates.is_empty(),
                "{}",
                spec.record_name
            );
        }
    }

    #[test]
    fn leaf_stages_accept_defect_reported() {
        for id in [StageId::Farmer, StageId::Inspection] {
            assert!(id
                .spec()
                .receive_gates
                .contains(&crate::entities::work_order::CurrentStage::DefectReported));
        }
    }

    #[test]
    fn ledger_stages_excludes_admin_creation() {
        assert!(!LEDGER_STAGES.contains(&StageId::AdminCreated));
        assert_eq!(LEDGER_STAGES.len(), STAGES.len() - 1);
    }
}
