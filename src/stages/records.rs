use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entities::stage_record::{self, StageRecordStatus};
use crate::errors::ServiceError;
use crate::stages::{StageId, STAGES};

/// Creates the eight audit rows for a fresh work order: admin_created starts
/// completed, the other seven pending. Runs inside the creation transaction.
pub async fn create_all(
    txn: &DatabaseTransaction,
    work_order_id: Uuid,
    created_by: Uuid,
) -> Result<(), ServiceError> {
    let now = Utc::now();
    for spec in STAGES {
        let completed = spec.id == StageId::AdminCreated;
        stage_record::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_order_id: Set(work_order_id),
            stage_name: Set(spec.record_name.to_string()),
            stage_order: Set(spec.order),
            status: Set(if completed {
                StageRecordStatus::Completed
            } else {
                StageRecordStatus::Pending
            }),
            started_at: Set(completed.then_some(now)),
            completed_at: Set(completed.then_some(now)),
            assigned_to: Set(completed.then_some(created_by)),
            notes: Set(None),
            error_message: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(txn)
        .await?;
    }
    Ok(())
}

pub async fn find(
    txn: &DatabaseTransaction,
    work_order_id: Uuid,
    stage: StageId,
) -> Result<stage_record::Model, ServiceError> {
    stage_record::Entity::find()
        .filter(stage_record::Column::WorkOrderId.eq(work_order_id))
        .filter(stage_record::Column::StageName.eq(stage.record_name()))
        .one(txn)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!(
                "No {} stage record for work order {}",
                stage.record_name(),
                work_order_id
            ))
        })
}

/// Flips a pending record to in_progress, stamping started_at on the first
/// flip only. Already started or completed records are left alone.
pub async fn mark_in_progress(
    txn: &DatabaseTransaction,
    work_order_id: Uuid,
    stage: StageId,
    assigned_to: Option<Uuid>,
) -> Result<(), ServiceError> {
    let record = find(txn, work_order_id, stage).await?;
    if record.status != StageRecordStatus::Pending {
        return Ok(());
    }
    let mut active: stage_record::ActiveModel = record.into();
    active.status = Set(StageRecordStatus::InProgress);
    active.started_at = Set(Some(Utc::now()));
    if assigned_to.is_some() {
        active.assigned_to = Set(assigned_to);
    }
    active.updated_at = Set(Utc::now());
    active.update(txn).await?;
    Ok(())
}

pub async fn mark_completed(
    txn: &DatabaseTransaction,
    work_order_id: Uuid,
    stage: StageId,
) -> Result<(), ServiceError> {
    let record = find(txn, work_order_id, stage).await?;
    if record.status == StageRecordStatus::Completed {
        return Ok(());
    }
    let now = Utc::now();
    let mut active: stage_record::ActiveModel = record.into();
    active.status = Set(StageRecordStatus::Completed);
    active.completed_at = Set(Some(now));
    active.updated_at = Set(now);
    active.update(txn).await?;
    Ok(())
}

/// Marks a stage failed with the reason that stopped it (rejection or
/// defect). The reason lands in error_message for the progress display.
pub async fn mark_failed(
    txn: &DatabaseTransaction,
    work_order_id: Uuid,
    stage: StageId,
    reason: &str,
) -> Result<(), ServiceError> {
    let record = find(txn, work_order_id, stage).await?;
    let mut active: stage_record::ActiveModel = record.into();
    active.status = Set(StageRecordStatus::Failed);
    active.error_message = Set(Some(reason.to_string()));
    active.updated_at = Set(Utc::now());
    active.update(txn).await?;
    Ok(())
}

/// Replaces the record's free-form notes (remaining-count observability on
/// partial dispatches).
pub async fn set_notes(
    txn: &DatabaseTransaction,
    work_order_id: Uuid,
    stage: StageId,
    notes: String,
) -> Result<(), ServiceError> {
    let record = find(txn, work_order_id, stage).await?;
    let mut active: stage_record::ActiveModel = record.into();
    active.notes = Set(Some(notes));
    active.updated_at = Set(Utc::now());
    active.update(txn).await?;
    Ok(())
}
