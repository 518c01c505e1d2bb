//! One named method per stage operation. Every mutating call acquires the
//! per-work-order lock, runs its command (its own transaction), and then
//! delivers notifications best-effort. The notification sink is injected at
//! construction; there is no ambient transport handle.

use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::{
    commands::stages::{
        stage_decision_command::{ApprovalArtifacts, DecisionOutcome},
        DispatchStageCommand, ReceiveStageCommand, RecordManufacturingCommand,
        ReportDefectCommand, StageDecision, StageDecisionCommand,
    },
    commands::Command,
    db::DbPool,
    entities::work_order::CurrentStage,
    errors::ServiceError,
    events::EventSender,
    locks::WorkOrderLocks,
    notifications::{notify_stage_advanced, NotificationSink},
    stages::quantities::QuantitySet,
    stages::transition::{
        DispatchDestination, DispatchOutcome, ManufactureOutcome, ReceiveOutcome,
    },
    stages::StageId,
};

use crate::commands::stages::report_defect_command::ReportDefectOutcome;

#[derive(Clone)]
pub struct StageFlowService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
    locks: WorkOrderLocks,
    sink: Arc<dyn NotificationSink>,
}

impl StageFlowService {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
        locks: WorkOrderLocks,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            db_pool,
            event_sender,
            locks,
            sink,
        }
    }

    // -- factory ---------------------------------------------------------

    #[instrument(skip(self), err)]
    pub async fn record_manufacturing(
        &self,
        work_order_id: Uuid,
        acting_user_id: Uuid,
        quantity: QuantitySet,
    ) -> Result<ManufactureOutcome, ServiceError> {
        let _guard = self.locks.acquire(work_order_id).await;
        let outcome = RecordManufacturingCommand {
            work_order_id,
            acting_user_id,
            quantity,
        }
        .execute(self.db_pool.clone(), self.event_sender.clone())
        .await?;

        if let Some(from) = outcome.advanced_from {
            notify_stage_advanced(
                self.sink.as_ref(),
                &outcome.work_order,
                from.as_str(),
                outcome.work_order.current_stage.as_str(),
                &outcome.acting_user,
            )
            .await;
        }
        Ok(outcome)
    }

    #[instrument(skip(self), err)]
    pub async fn dispatch_to_jsr(
        &self,
        work_order_id: Uuid,
        acting_user_id: Uuid,
        quantity: QuantitySet,
        destination: Option<DispatchDestination>,
    ) -> Result<DispatchOutcome, ServiceError> {
        self.dispatch(StageId::Factory, work_order_id, acting_user_id, quantity, destination)
            .await
    }

    // -- jsr ---------------------------------------------------------------

    #[instrument(skip(self), err)]
    pub async fn receive_at_jsr(
        &self,
        work_order_id: Uuid,
        acting_user_id: Uuid,
        quantity: QuantitySet,
    ) -> Result<ReceiveOutcome, ServiceError> {
        self.receive(StageId::Jsr, work_order_id, acting_user_id, quantity)
            .await
    }

    #[instrument(skip(self, artifacts), err)]
    pub async fn approve_jsr(
        &self,
        work_order_id: Uuid,
        acting_user_id: Uuid,
        artifacts: ApprovalArtifacts,
    ) -> Result<DecisionOutcome, ServiceError> {
        self.decide(
            StageId::Jsr,
            work_order_id,
            acting_user_id,
            StageDecision::Approve(artifacts),
        )
        .await
    }

    #[instrument(skip(self), err)]
    pub async fn reject_jsr(
        &self,
        work_order_id: Uuid,
        acting_user_id: Uuid,
        reason: String,
    ) -> Result<DecisionOutcome, ServiceError> {
        self.decide(
            StageId::Jsr,
            work_order_id,
            acting_user_id,
            StageDecision::Reject { reason },
        )
        .await
    }

    #[instrument(skip(self), err)]
    pub async fn dispatch_to_warehouse(
        &self,
        work_order_id: Uuid,
        acting_user_id: Uuid,
        quantity: QuantitySet,
    ) -> Result<DispatchOutcome, ServiceError> {
        self.dispatch(StageId::Jsr, work_order_id, acting_user_id, quantity, None)
            .await
    }

    // -- warehouse ---------------------------------------------------------

    #[instrument(skip(self), err)]
    pub async fn receive_at_warehouse(
        &self,
        work_order_id: Uuid,
        acting_user_id: Uuid,
        quantity: QuantitySet,
    ) -> Result<ReceiveOutcome, ServiceError> {
        self.receive(StageId::Warehouse, work_order_id, acting_user_id, quantity)
            .await
    }

    #[instrument(skip(self), err)]
    pub async fn dispatch_to_cp(
        &self,
        work_order_id: Uuid,
        acting_user_id: Uuid,
        quantity: QuantitySet,
    ) -> Result<DispatchOutcome, ServiceError> {
        self.dispatch(StageId::Warehouse, work_order_id, acting_user_id, quantity, None)
            .await
    }

    // -- cp ----------------------------------------------------------------

    #[instrument(skip(self), err)]
    pub async fn receive_at_cp(
        &self,
        work_order_id: Uuid,
        acting_user_id: Uuid,
        quantity: QuantitySet,
    ) -> Result<ReceiveOutcome, ServiceError> {
        self.receive(StageId::Cp, work_order_id, acting_user_id, quantity)
            .await
    }

    #[instrument(skip(self), err)]
    pub async fn dispatch_to_contractor(
        &self,
        work_order_id: Uuid,
        acting_user_id: Uuid,
        quantity: QuantitySet,
    ) -> Result<DispatchOutcome, ServiceError> {
        self.dispatch(StageId::Cp, work_order_id, acting_user_id, quantity, None)
            .await
    }

    // -- contractor ---------------------------------------------------------

    #[instrument(skip(self), err)]
    pub async fn receive_at_contractor(
        &self,
        work_order_id: Uuid,
        acting_user_id: Uuid,
        quantity: QuantitySet,
    ) -> Result<ReceiveOutcome, ServiceError> {
        self.receive(StageId::Contractor, work_order_id, acting_user_id, quantity)
            .await
    }

    /// Completion here is the fan-out: both the farmer and inspection
    /// records activate and the custody pointer moves to farmer_inspection.
    #[instrument(skip(self), err)]
    pub async fn dispatch_to_farmer(
        &self,
        work_order_id: Uuid,
        acting_user_id: Uuid,
        quantity: QuantitySet,
    ) -> Result<DispatchOutcome, ServiceError> {
        self.dispatch(StageId::Contractor, work_order_id, acting_user_id, quantity, None)
            .await
    }

    // -- farmer / inspection (the fan-out leaves) ----------------------------

    #[instrument(skip(self), err)]
    pub async fn receive_at_farmer(
        &self,
        work_order_id: Uuid,
        acting_user_id: Uuid,
        quantity: QuantitySet,
    ) -> Result<ReceiveOutcome, ServiceError> {
        self.receive(StageId::Farmer, work_order_id, acting_user_id, quantity)
            .await
    }

    #[instrument(skip(self), err)]
    pub async fn receive_at_inspection(
        &self,
        work_order_id: Uuid,
        acting_user_id: Uuid,
        quantity: QuantitySet,
    ) -> Result<ReceiveOutcome, ServiceError> {
        self.receive(StageId::Inspection, work_order_id, acting_user_id, quantity)
            .await
    }

    #[instrument(skip(self, issue_description, photos), err)]
    pub async fn report_defect(
        &self,
        work_order_id: Uuid,
        acting_user_id: Uuid,
        issue_title: String,
        issue_description: String,
        photos: Vec<String>,
    ) -> Result<ReportDefectOutcome, ServiceError> {
        let _guard = self.locks.acquire(work_order_id).await;
        ReportDefectCommand {
            work_order_id,
            acting_user_id,
            issue_title,
            issue_description,
            photos,
        }
        .execute(self.db_pool.clone(), self.event_sender.clone())
        .await
    }

    #[instrument(skip(self, artifacts), err)]
    pub async fn approve_inspection(
        &self,
        work_order_id: Uuid,
        acting_user_id: Uuid,
        artifacts: ApprovalArtifacts,
    ) -> Result<DecisionOutcome, ServiceError> {
        self.decide(
            StageId::Inspection,
            work_order_id,
            acting_user_id,
            StageDecision::Approve(artifacts),
        )
        .await
    }

    #[instrument(skip(self), err)]
    pub async fn reject_inspection(
        &self,
        work_order_id: Uuid,
        acting_user_id: Uuid,
        reason: String,
    ) -> Result<DecisionOutcome, ServiceError> {
        self.decide(
            StageId::Inspection,
            work_order_id,
            acting_user_id,
            StageDecision::Reject { reason },
        )
        .await
    }

    // -- shared plumbing -----------------------------------------------------

    async fn dispatch(
        &self,
        stage: StageId,
        work_order_id: Uuid,
        acting_user_id: Uuid,
        quantity: QuantitySet,
        destination: Option<DispatchDestination>,
    ) -> Result<DispatchOutcome, ServiceError> {
        let _guard = self.locks.acquire(work_order_id).await;
        let outcome = DispatchStageCommand {
            work_order_id,
            stage,
            acting_user_id,
            quantity,
            destination,
        }
        .execute(self.db_pool.clone(), self.event_sender.clone())
        .await?;

        if let Some(from) = outcome.advanced_from {
            notify_stage_advanced(
                self.sink.as_ref(),
                &outcome.work_order,
                from.as_str(),
                outcome.work_order.current_stage.as_str(),
                &outcome.acting_user,
            )
            .await;
        }
        Ok(outcome)
    }

    async fn receive(
        &self,
        stage: StageId,
        work_order_id: Uuid,
        acting_user_id: Uuid,
        quantity: QuantitySet,
    ) -> Result<ReceiveOutcome, ServiceError> {
        let _guard = self.locks.acquire(work_order_id).await;
        let outcome = ReceiveStageCommand {
            work_order_id,
            stage,
            acting_user_id,
            quantity,
        }
        .execute(self.db_pool.clone(), self.event_sender.clone())
        .await?;

        if outcome.work_order_completed {
            notify_stage_advanced(
                self.sink.as_ref(),
                &outcome.work_order,
                CurrentStage::FarmerInspection.as_str(),
                outcome.work_order.current_stage.as_str(),
                &outcome.acting_user,
            )
            .await;
        }
        Ok(outcome)
    }

    async fn decide(
        &self,
        stage: StageId,
        work_order_id: Uuid,
        acting_user_id: Uuid,
        decision: StageDecision,
    ) -> Result<DecisionOutcome, ServiceError> {
        let _guard = self.locks.acquire(work_order_id).await;
        let outcome = StageDecisionCommand {
            work_order_id,
            stage,
            acting_user_id,
            decision,
        }
        .execute(self.db_pool.clone(), self.event_sender.clone())
        .await?;

        if outcome.work_order_completed {
            notify_stage_advanced(
                self.sink.as_ref(),
                &outcome.work_order,
                CurrentStage::FarmerInspection.as_str(),
                outcome.work_order.current_stage.as_str(),
                &outcome.acting_user,
            )
            .await;
        }
        Ok(outcome)
    }
}
