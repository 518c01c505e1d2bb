use chrono::Utc;
use metrics::counter;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    commands::Command,
    db::DbPool,
    entities::stage_status::FarmerStatus,
    entities::work_order::CurrentStage,
    entities::{farmer_entry, user, work_order},
    errors::ServiceError,
    events::{Event, EventSender},
    stages::{machine, records, validate, StageId},
};

/// Farmer defect report: pins the work order in `defect_reported`. There is
/// no forward transition out of this state; quantities may keep arriving at
/// the two leaf stages but the order never completes.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReportDefectCommand {
    pub work_order_id: Uuid,
    pub acting_user_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub issue_title: String,
    #[validate(length(min = 1, max = 2000))]
    pub issue_description: String,
    /// Up to three photo references, already validated by the file store.
    #[validate(length(max = 3))]
    pub photos: Vec<String>,
}

#[derive(Debug)]
pub struct ReportDefectOutcome {
    pub work_order: work_order::Model,
    pub acting_user: user::Model,
    pub entry: farmer_entry::Model,
}

#[async_trait::async_trait]
impl Command for ReportDefectCommand {
    type Result = ReportDefectOutcome;

    #[instrument(skip(self, db_pool, event_sender), fields(work_order_id = %self.work_order_id))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        self.validate().map_err(|e| {
            let msg = format!("Invalid defect report: {}", e);
            error!("{}", msg);
            ServiceError::ValidationError(msg)
        })?;

        let spec = StageId::Farmer.spec();
        let txn = db_pool.begin().await?;

        let work_order = validate::load_work_order(&txn, self.work_order_id).await?;
        validate::ensure_stage_gate(&work_order, spec.receive_gates, "defect reporting")?;
        let acting_user = validate::load_acting_user(&txn, self.acting_user_id).await?;
        validate::ensure_role(&acting_user, spec)?;

        let entry = farmer_entry::Entity::find()
            .filter(farmer_entry::Column::WorkOrderId.eq(work_order.id))
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::InvalidOperation(format!(
                    "No units have been received by the farmer for work order {}; a defect cannot be reported",
                    work_order.work_order_number
                ))
            })?;

        let mut photos = self.photos.iter();
        let mut active: farmer_entry::ActiveModel = entry.into();
        active.farmer_status = Set(FarmerStatus::DefectReported);
        active.issue_title = Set(Some(self.issue_title.clone()));
        active.issue_description = Set(Some(self.issue_description.clone()));
        active.photo_1 = Set(photos.next().cloned());
        active.photo_2 = Set(photos.next().cloned());
        active.photo_3 = Set(photos.next().cloned());
        active.updated_at = Set(Utc::now());
        let entry = active.update(&txn).await?;

        records::mark_failed(&txn, work_order.id, StageId::Farmer, &self.issue_title).await?;

        let work_order = if work_order.current_stage != CurrentStage::DefectReported {
            machine::set_current_stage(&txn, work_order, CurrentStage::DefectReported).await?
        } else {
            work_order
        };

        txn.commit().await?;

        counter!("pumptrack_defects_reported", 1);
        warn!(
            work_order = %work_order.work_order_number,
            issue = %self.issue_title,
            "Defect reported by farmer"
        );
        event_sender
            .send_or_log(Event::DefectReported {
                work_order_id: work_order.id,
                issue_title: self.issue_title.clone(),
            })
            .await;
        info!(work_order = %work_order.work_order_number, "Work order pinned in defect_reported");

        Ok(ReportDefectOutcome {
            work_order,
            acting_user,
            entry,
        })
    }
}
