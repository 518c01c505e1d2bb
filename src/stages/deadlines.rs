//! Deadline projection: a pure read-only view over the work order's
//! timeline day-counts. Offsets accumulate along the chain; farmer and
//! inspection share the fan-out start. Nothing here touches the state
//! machine.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::entities::work_order;
use crate::stages::{StageId, LEDGER_STAGES};

#[derive(Debug, Clone, Serialize)]
pub struct StageDeadline {
    pub stage: &'static str,
    pub stage_start_date: DateTime<Utc>,
    pub deadline_date: DateTime<Utc>,
    pub days_remaining: i64,
    pub is_overdue: bool,
}

/// Day-count offset from the work order start to the stage's window start:
/// the sum of all preceding stages' timelines. Inspection runs in parallel
/// with farmer, so both start when the contractor stage ends.
fn offset_days(work_order: &work_order::Model, stage: StageId) -> i64 {
    let preceding: &[StageId] = match stage {
        StageId::AdminCreated | StageId::Factory => &[],
        StageId::Jsr => &[StageId::Factory],
        StageId::Warehouse => &[StageId::Factory, StageId::Jsr],
        StageId::Cp => &[StageId::Factory, StageId::Jsr, StageId::Warehouse],
        StageId::Contractor => &[
            StageId::Factory,
            StageId::Jsr,
            StageId::Warehouse,
            StageId::Cp,
        ],
        StageId::Farmer | StageId::Inspection => &[
            StageId::Factory,
            StageId::Jsr,
            StageId::Warehouse,
            StageId::Cp,
            StageId::Contractor,
        ],
    };
    preceding
        .iter()
        .map(|s| s.timeline_days(work_order) as i64)
        .sum()
}

/// The deadline window for one stage, relative to a caller-supplied `today`.
pub fn stage_deadline(
    work_order: &work_order::Model,
    stage: StageId,
    today: DateTime<Utc>,
) -> StageDeadline {
    let start = work_order.start_date.unwrap_or(work_order.created_at);
    let stage_start = start + Duration::days(offset_days(work_order, stage));
    let deadline = stage_start + Duration::days(stage.timeline_days(work_order) as i64);
    let days_remaining = (deadline - today).num_days();

    StageDeadline {
        stage: stage.record_name(),
        stage_start_date: stage_start,
        deadline_date: deadline,
        days_remaining,
        is_overdue: today > deadline,
    }
}

/// Deadline windows for every ledger stage.
pub fn all_deadlines(work_order: &work_order::Model, today: DateTime<Utc>) -> Vec<StageDeadline> {
    LEDGER_STAGES
        .iter()
        .map(|stage| stage_deadline(work_order, *stage, today))
        .collect()
}

/// The deadline relevant to the custody pointer right now, if the work
/// order is still in flight.
pub fn current_stage_deadlines(
    work_order: &work_order::Model,
    today: DateTime<Utc>,
) -> Vec<StageDeadline> {
    use crate::entities::work_order::CurrentStage;

    let stages: &[StageId] = match work_order.current_stage {
        CurrentStage::AdminCreated | CurrentStage::Factory => &[StageId::Factory],
        CurrentStage::Jsr => &[StageId::Jsr],
        CurrentStage::Warehouse => &[StageId::Warehouse],
        CurrentStage::Cp => &[StageId::Cp],
        CurrentStage::Contractor => &[StageId::Contractor],
        CurrentStage::FarmerInspection | CurrentStage::DefectReported => {
            &[StageId::Farmer, StageId::Inspection]
        }
        CurrentStage::Completed
        | CurrentStage::RejectedByJsr
        | CurrentStage::RejectedByInspection => &[],
    };
    stages
        .iter()
        .map(|stage| stage_deadline(work_order, *stage, today))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::work_order::{ApprovalStatus, CurrentStage, WorkOrderStatus};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn work_order_starting(start: DateTime<Utc>) -> work_order::Model {
        work_order::Model {
            id: Uuid::new_v4(),
            work_order_number: "WO01".into(),
            title: "Pumps".into(),
            region: "West".into(),
            total_quantity: 18,
            hp_3_quantity: 6,
            hp_5_quantity: 6,
            hp_7_5_quantity: 6,
            current_stage: CurrentStage::Factory,
            status: WorkOrderStatus::Created,
            jsr_approval_status: ApprovalStatus::Pending,
            inspection_approval_status: ApprovalStatus::Pending,
            farmer_list_path: "uploads/farmers.xlsx".into(),
            factory_timeline_days: 5,
            jsr_timeline_days: 5,
            whouse_timeline_days: 5,
            cp_timeline_days: 5,
            contractor_timeline_days: 5,
            farmer_timeline_days: 5,
            inspection_timeline_days: 5,
            start_date: Some(start),
            created_by: Uuid::new_v4(),
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn offsets_accumulate_along_the_chain() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let wo = work_order_starting(start);

        let factory = stage_deadline(&wo, StageId::Factory, start);
        assert_eq!(factory.stage_start_date, start);
        assert_eq!(factory.deadline_date, start + Duration::days(5));

        let cp = stage_deadline(&wo, StageId::Cp, start);
        assert_eq!(cp.stage_start_date, start + Duration::days(15));
        assert_eq!(cp.deadline_date, start + Duration::days(20));
    }

    #[test]
    fn farmer_and_inspection_share_the_fan_out_start() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let wo = work_order_starting(start);

        let farmer = stage_deadline(&wo, StageId::Farmer, start);
        let inspection = stage_deadline(&wo, StageId::Inspection, start);
        assert_eq!(farmer.stage_start_date, inspection.stage_start_date);
        assert_eq!(farmer.stage_start_date, start + Duration::days(25));
    }

    #[test]
    fn days_remaining_and_overdue() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let wo = work_order_starting(start);

        let on_time = stage_deadline(&wo, StageId::Factory, start + Duration::days(3));
        assert_eq!(on_time.days_remaining, 2);
        assert!(!on_time.is_overdue);

        let late = stage_deadline(&wo, StageId::Factory, start + Duration::days(7));
        assert_eq!(late.days_remaining, -2);
        assert!(late.is_overdue);
    }

    #[test]
    fn falls_back_to_created_at_without_start_date() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut wo = work_order_starting(start);
        wo.start_date = None;

        let factory = stage_deadline(&wo, StageId::Factory, start);
        assert_eq!(factory.stage_start_date, wo.created_at);
    }

    #[test]
    fn current_stage_deadlines_follow_the_pointer() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut wo = work_order_starting(start);

        wo.current_stage = CurrentStage::FarmerInspection;
        let both = current_stage_deadlines(&wo, start);
        assert_eq!(both.len(), 2);

        wo.current_stage = CurrentStage::Completed;
        assert!(current_stage_deadlines(&wo, start).is_empty());
    }
}
