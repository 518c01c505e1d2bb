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
    stages::transition::{self, DispatchDestination, DispatchOutcome},
    stages::StageId,
};

/// One parameterized dispatch for every forwarding stage (factory, JSR,
/// warehouse, CP, contractor). Cumulative across partial calls; completion
/// advances the custody pointer and activates the downstream records.
/// The factory's first dispatch must carry the destination location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchStageCommand {
    pub work_order_id: Uuid,
    pub stage: StageId,
    pub acting_user_id: Uuid,
    pub quantity: QuantitySet,
    pub destination: Option<DispatchDestination>,
}

#[async_trait::async_trait]
impl Command for DispatchStageCommand {
    type Result = DispatchOutcome;

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
        let outcome = transition::dispatch(
            &txn,
            self.stage,
            self.work_order_id,
            self.acting_user_id,
            self.quantity,
            self.destination.clone(),
        )
        .await?;
        txn.commit().await?;

        counter!("pumptrack_units_dispatched", self.quantity.total as u64);
        info!(
            work_order = %outcome.work_order.work_order_number,
            stage = self.stage.record_name(),
            dispatched = self.quantity.total,
            all_dispatched = outcome.all_dispatched,
            "Units dispatched"
        );

        event_sender
            .send_or_log(Event::UnitsDispatched {
                work_order_id: outcome.work_order.id,
                stage: self.stage.record_name().to_string(),
                quantity: self.quantity.total,
            })
            .await;
        if outcome.all_dispatched {
            event_sender
                .send_or_log(Event::StageCompleted {
                    work_order_id: outcome.work_order.id,
                    stage: self.stage.record_name().to_string(),
                })
                .await;
        }
        if let Some(from) = outcome.advanced_from {
            event_sender
                .send_or_log(Event::StageAdvanced {
                    work_order_id: outcome.work_order.id,
                    from_stage: from.as_str().to_string(),
                    to_stage: outcome.work_order.current_stage.as_str().to_string(),
                })
                .await;
        }

        Ok(outcome)
    }
}
