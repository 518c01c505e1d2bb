use metrics::counter;
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    commands::Command,
    db::DbPool,
    errors::ServiceError,
    events::{Event, EventSender},
    stages::quantities::QuantitySet,
    stages::transition::{self, ReceiveOutcome},
    stages::StageId,
};

/// One parameterized receive for every stage with an upstream ledger (JSR,
/// warehouse, CP, contractor, farmer, inspection). Cumulative and capped by
/// the upstream's committed dispatch; JSR receives carry the location gate.
/// Leaf receives may complete the work order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiveStageCommand {
    pub work_order_id: Uuid,
    pub stage: StageId,
    pub acting_user_id: Uuid,
    pub quantity: QuantitySet,
}

#[async_trait::async_trait]
impl Command for ReceiveStageCommand {
    type Result = ReceiveOutcome;

    #[instrument(
        skip(self, db_pool, event_sender),
        fields(work_order_id = %self.work_order_id, stage = self.stage.record_name())
    )]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let txn = db_pool.begin().await?;
        let outcome = transition::receive(
            &txn,
            self.stage,
            self.work_order_id,
            self.acting_user_id,
            self.quantity,
        )
        .await?;
        txn.commit().await?;

        counter!("pumptrack_units_received", self.quantity.total as u64);
        info!(
            work_order = %outcome.work_order.work_order_number,
            stage = self.stage.record_name(),
            received = self.quantity.total,
            "Units received"
        );

        event_sender
            .send_or_log(Event::UnitsReceived {
                work_order_id: outcome.work_order.id,
                stage: self.stage.record_name().to_string(),
                quantity: self.quantity.total,
            })
            .await;
        if outcome.work_order_completed {
            event_sender
                .send_or_log(Event::WorkOrderCompleted(outcome.work_order.id))
                .await;
        }

        Ok(outcome)
    }
}
