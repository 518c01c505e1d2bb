//! Work order stage machine: the custody pointer, the farmer/inspection
//! fan-out, terminal states, and overall completion.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, Set};

use crate::entities::stage_status::FarmerStatus;
use crate::entities::work_order::{ApprovalStatus, CurrentStage};
use crate::entities::{farmer_entry, inspection_entry, work_order};
use crate::errors::ServiceError;
use crate::stages::quantities::QuantitySet;
use crate::stages::{admin_totals, records, StageId};

/// Hard-terminal custody states: nothing is accepted afterwards.
/// `defect_reported` is deliberately not in this set — farmer and inspection
/// receives stay open under it, it just never resolves forward.
pub fn is_terminal(stage: CurrentStage) -> bool {
    matches!(
        stage,
        CurrentStage::Completed | CurrentStage::RejectedByJsr | CurrentStage::RejectedByInspection
    )
}

/// The set of stage tokens currently authorized to act. Linear stages map
/// one-to-one; the contractor fan-out keeps both leaf branches active until
/// each resolves on its own.
pub fn active_stages(
    current: CurrentStage,
    farmer_resolved: bool,
    inspection_resolved: bool,
) -> Vec<StageId> {
    match current {
        CurrentStage::AdminCreated => vec![StageId::Factory],
        CurrentStage::Factory => vec![StageId::Factory],
        CurrentStage::Jsr => vec![StageId::Jsr],
        CurrentStage::Warehouse => vec![StageId::Warehouse],
        CurrentStage::Cp => vec![StageId::Cp],
        CurrentStage::Contractor => vec![StageId::Contractor],
        CurrentStage::FarmerInspection | CurrentStage::DefectReported => {
            let mut active = Vec::new();
            if !farmer_resolved {
                active.push(StageId::Farmer);
            }
            if !inspection_resolved {
                active.push(StageId::Inspection);
            }
            active
        }
        CurrentStage::Completed
        | CurrentStage::RejectedByJsr
        | CurrentStage::RejectedByInspection => Vec::new(),
    }
}

/// Farmer branch resolution: every unit the admin ordered has arrived and no
/// defect is open.
pub fn farmer_branch_resolved(entry: &farmer_entry::Model, totals: &QuantitySet) -> bool {
    let received = QuantitySet::new(
        entry.received_total,
        entry.received_hp_3,
        entry.received_hp_5,
        entry.received_hp_7_5,
    );
    received.covers(totals) && entry.farmer_status != FarmerStatus::DefectReported
}

/// Inspection branch resolution: full receipt plus an explicit approval.
pub fn inspection_branch_resolved(
    entry: &inspection_entry::Model,
    approval: ApprovalStatus,
    totals: &QuantitySet,
) -> bool {
    let received = QuantitySet::new(
        entry.received_total,
        entry.received_hp_3,
        entry.received_hp_5,
        entry.received_hp_7_5,
    );
    received.covers(totals) && approval == ApprovalStatus::Approved
}

/// Moves the custody pointer. Callers have already established the
/// transition's legality via the stage metadata gates.
pub async fn set_current_stage(
    txn: &DatabaseTransaction,
    work_order: work_order::Model,
    to: CurrentStage,
) -> Result<work_order::Model, ServiceError> {
    let mut active: work_order::ActiveModel = work_order.into();
    active.current_stage = Set(to);
    active.updated_at = Set(Utc::now());
    Ok(active.update(txn).await?)
}

/// Evaluates overall completion after any farmer/inspection change. When a
/// branch resolves, its stage record completes (and the farmer entry's
/// resolution tracker flips to completed); when both have resolved, the
/// custody pointer moves to `completed` and the work order is done.
///
/// Only fires from `farmer_inspection`: a reported defect pins the work
/// order in `defect_reported`, which never resolves forward.
pub async fn try_complete(
    txn: &DatabaseTransaction,
    work_order: work_order::Model,
) -> Result<(work_order::Model, bool), ServiceError> {
    if work_order.current_stage != CurrentStage::FarmerInspection {
        return Ok((work_order, false));
    }
    let totals = admin_totals(&work_order);

    let farmer = farmer_entry::Entity::find()
        .filter(farmer_entry::Column::WorkOrderId.eq(work_order.id))
        .one(txn)
        .await?;
    let inspection = inspection_entry::Entity::find()
        .filter(inspection_entry::Column::WorkOrderId.eq(work_order.id))
        .one(txn)
        .await?;

    let mut farmer_done = false;
    if let Some(entry) = farmer {
        if farmer_branch_resolved(&entry, &totals) {
            farmer_done = true;
            if entry.farmer_status != FarmerStatus::Completed {
                let mut active: farmer_entry::ActiveModel = entry.into();
                active.farmer_status = Set(FarmerStatus::Completed);
                active.updated_at = Set(Utc::now());
                active.update(txn).await?;
            }
            records::mark_completed(txn, work_order.id, StageId::Farmer).await?;
        }
    }

    let mut inspection_done = false;
    if let Some(entry) = inspection {
        if inspection_branch_resolved(&entry, work_order.inspection_approval_status, &totals) {
            inspection_done = true;
            records::mark_completed(txn, work_order.id, StageId::Inspection).await?;
        }
    }

    if farmer_done && inspection_done {
        let updated = set_current_stage(txn, work_order, CurrentStage::Completed).await?;
        return Ok((updated, true));
    }
    Ok((work_order, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::stage_status::EntryStatus;
    use uuid::Uuid;

    fn farmer_entry_with(received: QuantitySet, status: FarmerStatus) -> farmer_entry::Model {
        let now = Utc::now();
        farmer_entry::Model {
            id: Uuid::new_v4(),
            work_order_id: Uuid::new_v4(),
            contractor_entry_id: Uuid::new_v4(),
            received_total: received.total,
            received_hp_3: received.hp_3,
            received_hp_5: received.hp_5,
            received_hp_7_5: received.hp_7_5,
            status: EntryStatus::UnitsReceived,
            farmer_status: status,
            issue_title: None,
            issue_description: None,
            photo_1: None,
            photo_2: None,
            photo_3: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn inspection_entry_with(received: QuantitySet) -> inspection_entry::Model {
        let now = Utc::now();
        inspection_entry::Model {
            id: Uuid::new_v4(),
            work_order_id: Uuid::new_v4(),
            contractor_entry_id: Uuid::new_v4(),
            received_total: received.total,
            received_hp_3: received.hp_3,
            received_hp_5: received.hp_5,
            received_hp_7_5: received.hp_7_5,
            status: EntryStatus::UnitsReceived,
            farmer_name: None,
            state: None,
            district: None,
            taluka: None,
            village: None,
            photo_1: None,
            photo_2: None,
            photo_3: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn terminal_states() {
        assert!(is_terminal(CurrentStage::Completed));
        assert!(is_terminal(CurrentStage::RejectedByJsr));
        assert!(is_terminal(CurrentStage::RejectedByInspection));
        assert!(!is_terminal(CurrentStage::DefectReported));
        assert!(!is_terminal(CurrentStage::FarmerInspection));
        assert!(!is_terminal(CurrentStage::Factory));
    }

    #[test]
    fn linear_stages_have_one_active_token() {
        assert_eq!(
            active_stages(CurrentStage::Cp, false, false),
            vec![StageId::Cp]
        );
        assert_eq!(
            active_stages(CurrentStage::AdminCreated, false, false),
            vec![StageId::Factory]
        );
    }

    #[test]
    fn fan_out_keeps_both_branches_until_resolved() {
        assert_eq!(
            active_stages(CurrentStage::FarmerInspection, false, false),
            vec![StageId::Farmer, StageId::Inspection]
        );
        assert_eq!(
            active_stages(CurrentStage::FarmerInspection, true, false),
            vec![StageId::Inspection]
        );
        assert_eq!(
            active_stages(CurrentStage::FarmerInspection, true, true),
            Vec::<StageId>::new()
        );
    }

    #[test]
    fn terminal_states_have_no_active_tokens() {
        assert!(active_stages(CurrentStage::Completed, true, true).is_empty());
        assert!(active_stages(CurrentStage::RejectedByJsr, false, false).is_empty());
    }

    #[test]
    fn farmer_branch_needs_full_receipt_and_no_open_defect() {
        let totals = QuantitySet::new(18, 6, 6, 6);

        let full = farmer_entry_with(totals, FarmerStatus::UnitsReceived);
        assert!(farmer_branch_resolved(&full, &totals));

        let partial = farmer_entry_with(QuantitySet::new(10, 4, 3, 3), FarmerStatus::UnitsReceived);
        assert!(!farmer_branch_resolved(&partial, &totals));

        let defective = farmer_entry_with(totals, FarmerStatus::DefectReported);
        assert!(!farmer_branch_resolved(&defective, &totals));
    }

    #[test]
    fn inspection_branch_needs_full_receipt_and_approval() {
        let totals = QuantitySet::new(18, 6, 6, 6);
        let full = inspection_entry_with(totals);

        assert!(inspection_branch_resolved(
            &full,
            ApprovalStatus::Approved,
            &totals
        ));
        assert!(!inspection_branch_resolved(
            &full,
            ApprovalStatus::Pending,
            &totals
        ));

        let partial = inspection_entry_with(QuantitySet::new(17, 6, 6, 5));
        assert!(!inspection_branch_resolved(
            &partial,
            ApprovalStatus::Approved,
            &totals
        ));
    }
}
