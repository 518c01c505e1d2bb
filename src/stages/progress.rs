//! Authoritative per-stage status projection, computed from ledger
//! quantities. Stage records are the audit trail; this is what progress
//! displays should trust.

use sea_orm::DatabaseTransaction;
use serde::Serialize;

use crate::entities::work_order;
use crate::errors::ServiceError;
use crate::stages::ledger::{store_for, LedgerRow};
use crate::stages::quantities::QuantitySet;
use crate::stages::{admin_totals, StageId, LEDGER_STAGES};

/// Status derived purely from quantities, never from a stored flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DerivedStageStatus {
    /// No ledger entry yet; no units have reached this stage.
    NotStarted,
    /// Units are flowing through; the stage still holds or awaits units.
    InProgress,
    /// Cumulative forwarded (or received, for leaf stages) covers the work
    /// order's admin totals.
    Complete,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageProgress {
    pub stage: &'static str,
    pub stage_order: i32,
    pub received: QuantitySet,
    pub forwarded: QuantitySet,
    pub remaining: QuantitySet,
    pub status: DerivedStageStatus,
}

/// Projects one stage's status from its ledger row. Leaf stages complete on
/// full receipt; forwarding stages complete on full dispatch.
pub fn derive_status(
    stage: StageId,
    row: Option<&LedgerRow>,
    totals: &QuantitySet,
) -> DerivedStageStatus {
    let Some(row) = row else {
        return DerivedStageStatus::NotStarted;
    };
    let is_leaf = stage.spec().dispatch_status.is_none();
    let done = if is_leaf {
        row.received.covers(totals)
    } else {
        row.forwarded.covers(totals)
    };
    if done {
        DerivedStageStatus::Complete
    } else {
        DerivedStageStatus::InProgress
    }
}

/// The full seven-stage projection for one work order.
pub async fn work_order_progress(
    txn: &DatabaseTransaction,
    work_order: &work_order::Model,
) -> Result<Vec<StageProgress>, ServiceError> {
    let totals = admin_totals(work_order);
    let mut progress = Vec::with_capacity(LEDGER_STAGES.len());

    for stage in LEDGER_STAGES {
        let store = store_for(stage).ok_or_else(|| {
            ServiceError::InternalError(format!(
                "{} stage has no quantity ledger",
                stage.record_name()
            ))
        })?;
        let row = store.find(txn, work_order.id).await?;
        let status = derive_status(stage, row.as_ref(), &totals);
        let (received, forwarded) = row
            .map(|r| (r.received, r.forwarded))
            .unwrap_or((QuantitySet::ZERO, QuantitySet::ZERO));
        progress.push(StageProgress {
            stage: stage.record_name(),
            stage_order: stage.spec().order,
            received,
            forwarded,
            remaining: received - forwarded,
            status,
        });
    }

    Ok(progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::stage_status::EntryStatus;
    use uuid::Uuid;

    fn row(received: QuantitySet, forwarded: QuantitySet) -> LedgerRow {
        LedgerRow {
            id: Uuid::new_v4(),
            work_order_id: Uuid::new_v4(),
            received,
            forwarded,
            status: EntryStatus::UnitsReceived,
        }
    }

    #[test]
    fn missing_row_is_not_started() {
        let totals = QuantitySet::new(18, 6, 6, 6);
        assert_eq!(
            derive_status(StageId::Cp, None, &totals),
            DerivedStageStatus::NotStarted
        );
    }

    #[test]
    fn forwarding_stage_completes_on_full_dispatch_only() {
        let totals = QuantitySet::new(18, 6, 6, 6);

        let partial = row(totals, QuantitySet::new(10, 4, 3, 3));
        assert_eq!(
            derive_status(StageId::Warehouse, Some(&partial), &totals),
            DerivedStageStatus::InProgress
        );

        let full = row(totals, totals);
        assert_eq!(
            derive_status(StageId::Warehouse, Some(&full), &totals),
            DerivedStageStatus::Complete
        );
    }

    #[test]
    fn leaf_stage_completes_on_full_receipt() {
        let totals = QuantitySet::new(18, 6, 6, 6);

        let full = row(totals, QuantitySet::ZERO);
        assert_eq!(
            derive_status(StageId::Farmer, Some(&full), &totals),
            DerivedStageStatus::Complete
        );

        let partial = row(QuantitySet::new(12, 4, 4, 4), QuantitySet::ZERO);
        assert_eq!(
            derive_status(StageId::Inspection, Some(&partial), &totals),
            DerivedStageStatus::InProgress
        );
    }

    #[test]
    fn factory_completion_needs_full_manufacture_and_dispatch() {
        let totals = QuantitySet::new(18, 6, 6, 6);
        // Everything manufactured so far was sent, but 8 units were never
        // manufactured: the stage is still in progress.
        let partial = row(QuantitySet::new(10, 4, 3, 3), QuantitySet::new(10, 4, 3, 3));
        assert_eq!(
            derive_status(StageId::Factory, Some(&partial), &totals),
            DerivedStageStatus::InProgress
        );
    }
}
