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
    entities::work_order::{self, ApprovalStatus, CurrentStage},
    entities::{inspection_entry, jsr_entry, user},
    errors::ServiceError,
    events::{Event, EventSender},
    stages::{machine, records, validate, StageId},
};

/// The artifacts an approval must supply: the installed-at farmer's
/// identity, the full installation location, and exactly three photos.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApprovalArtifacts {
    #[validate(length(min = 1, max = 200))]
    pub farmer_name: String,
    #[validate(length(min = 1, max = 100))]
    pub state: String,
    #[validate(length(min = 1, max = 100))]
    pub district: String,
    #[validate(length(min = 1, max = 100))]
    pub taluka: String,
    #[validate(length(min = 1, max = 100))]
    pub village: String,
    #[validate(length(min = 3, max = 3))]
    pub photos: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageDecision {
    Approve(ApprovalArtifacts),
    Reject { reason: String },
}

/// Explicit accept/reject at one of the two quality gates (JSR or
/// inspection), independent of quantity flow. Rejection is terminal for the
/// work order; an inspection approval may complete it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageDecisionCommand {
    pub work_order_id: Uuid,
    /// Must be `Jsr` or `Inspection`.
    pub stage: StageId,
    pub acting_user_id: Uuid,
    pub decision: StageDecision,
}

#[derive(Debug)]
pub struct DecisionOutcome {
    pub work_order: work_order::Model,
    pub acting_user: user::Model,
    pub approved: bool,
    pub work_order_completed: bool,
}

#[async_trait::async_trait]
impl Command for StageDecisionCommand {
    type Result = DecisionOutcome;

    #[instrument(
        skip(self, db_pool, event_sender),
        fields(work_order_id = %self.work_order_id, stage = self.stage.record_name())
    )]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        if !matches!(self.stage, StageId::Jsr | StageId::Inspection) {
            return Err(ServiceError::InvalidOperation(format!(
                "The {} stage takes no approve/reject decision",
                self.stage.display_name()
            )));
        }
        match &self.decision {
            StageDecision::Approve(artifacts) => artifacts.validate().map_err(|e| {
                let msg = format!("Invalid approval artifacts: {}", e);
                error!("{}", msg);
                ServiceError::ValidationError(msg)
            })?,
            StageDecision::Reject { reason } => {
                if reason.trim().is_empty() {
                    return Err(ServiceError::ValidationError(
                        "a rejection must state its reason".to_string(),
                    ));
                }
            }
        }

        let spec = self.stage.spec();
        let txn = db_pool.begin().await?;

        let work_order = validate::load_work_order(&txn, self.work_order_id).await?;
        validate::ensure_stage_gate(
            &work_order,
            spec.receive_gates,
            &format!("the {} decision", spec.display_name),
        )?;
        let acting_user = validate::load_acting_user(&txn, self.acting_user_id).await?;
        validate::ensure_role(&acting_user, spec)?;

        let approved = matches!(self.decision, StageDecision::Approve(_));
        self.persist_artifacts(&txn, &work_order).await?;

        let new_approval = if approved {
            ApprovalStatus::Approved
        } else {
            ApprovalStatus::Rejected
        };
        let mut active: work_order::ActiveModel = work_order.into();
        match self.stage {
            StageId::Jsr => active.jsr_approval_status = Set(new_approval),
            _ => active.inspection_approval_status = Set(new_approval),
        }
        active.updated_at = Set(Utc::now());
        let mut work_order = active.update(&txn).await?;

        let mut work_order_completed = false;
        match &self.decision {
            StageDecision::Approve(_) => {
                if self.stage == StageId::Inspection {
                    let (updated, completed) = machine::try_complete(&txn, work_order).await?;
                    work_order = updated;
                    work_order_completed = completed;
                }
            }
            StageDecision::Reject { reason } => {
                records::mark_failed(&txn, work_order.id, self.stage, reason).await?;
                let terminal = match self.stage {
                    StageId::Jsr => CurrentStage::RejectedByJsr,
                    _ => CurrentStage::RejectedByInspection,
                };
                work_order = machine::set_current_stage(&txn, work_order, terminal).await?;
            }
        }

        txn.commit().await?;

        counter!("pumptrack_stage_decisions", 1);
        if approved {
            info!(
                work_order = %work_order.work_order_number,
                stage = self.stage.record_name(),
                "Stage approved"
            );
        } else {
            warn!(
                work_order = %work_order.work_order_number,
                stage = self.stage.record_name(),
                "Stage rejected; work order is terminal"
            );
        }

        let event = match self.stage {
            StageId::Jsr => Event::JsrDecision {
                work_order_id: work_order.id,
                approved,
            },
            _ => Event::InspectionDecision {
                work_order_id: work_order.id,
                approved,
            },
        };
        event_sender.send_or_log(event).await;
        if work_order_completed {
            event_sender
                .send_or_log(Event::WorkOrderCompleted(work_order.id))
                .await;
        }

        Ok(DecisionOutcome {
            work_order,
            acting_user,
            approved,
            work_order_completed,
        })
    }
}

impl StageDecisionCommand {
    /// Approval artifacts persist on the stage's own ledger entry, which
    /// must exist: a decision before any units arrived is meaningless.
    async fn persist_artifacts(
        &self,
        txn: &sea_orm::DatabaseTransaction,
        work_order: &work_order::Model,
    ) -> Result<(), ServiceError> {
        let artifacts = match &self.decision {
            StageDecision::Approve(artifacts) => Some(artifacts),
            StageDecision::Reject { .. } => None,
        };

        match self.stage {
            StageId::Jsr => {
                let entry = jsr_entry::Entity::find()
                    .filter(jsr_entry::Column::WorkOrderId.eq(work_order.id))
                    .one(txn)
                    .await?
                    .ok_or_else(|| self.missing_entry(work_order))?;
                if let Some(a) = artifacts {
                    let mut photos = a.photos.iter();
                    let mut active: jsr_entry::ActiveModel = entry.into();
                    active.farmer_name = Set(Some(a.farmer_name.clone()));
                    active.state = Set(Some(a.state.clone()));
                    active.district = Set(Some(a.district.clone()));
                    active.taluka = Set(Some(a.taluka.clone()));
                    active.village = Set(Some(a.village.clone()));
                    active.photo_1 = Set(photos.next().cloned());
                    active.photo_2 = Set(photos.next().cloned());
                    active.photo_3 = Set(photos.next().cloned());
                    active.updated_at = Set(Utc::now());
                    active.update(txn).await?;
                }
            }
            _ => {
                let entry = inspection_entry::Entity::find()
                    .filter(inspection_entry::Column::WorkOrderId.eq(work_order.id))
                    .one(txn)
                    .await?
                    .ok_or_else(|| self.missing_entry(work_order))?;
                if let Some(a) = artifacts {
                    let mut photos = a.photos.iter();
                    let mut active: inspection_entry::ActiveModel = entry.into();
                    active.farmer_name = Set(Some(a.farmer_name.clone()));
                    active.state = Set(Some(a.state.clone()));
                    active.district = Set(Some(a.district.clone()));
                    active.taluka = Set(Some(a.taluka.clone()));
                    active.village = Set(Some(a.village.clone()));
                    active.photo_1 = Set(photos.next().cloned());
                    active.photo_2 = Set(photos.next().cloned());
                    active.photo_3 = Set(photos.next().cloned());
                    active.updated_at = Set(Utc::now());
                    active.update(txn).await?;
                }
            }
        }
        Ok(())
    }

    fn missing_entry(&self, work_order: &work_order::Model) -> ServiceError {
        ServiceError::InvalidOperation(format!(
            "No {} entry exists for work order {}; units must be received before a decision",
            self.stage.display_name(),
            work_order.work_order_number
        ))
    }
}
