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
    stages::transition::{self, ManufactureOutcome},
};

/// Records a cumulative manufacturing entry at the factory, validated
/// against the work order's admin-set totals. The first entry moves the
/// custody pointer out of admin_created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordManufacturingCommand {
    pub work_order_id: Uuid,
    pub acting_user_id: Uuid,
    pub quantity: QuantitySet,
}

#[async_trait::async_trait]
impl Command for RecordManufacturingCommand {
    type Result = ManufactureOutcome;

    #[instrument(skip(self, db_pool, event_sender), fields(work_order_id = %self.work_order_id))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let txn = db_pool.begin().await?;
        let outcome = transition::record_manufacturing(
            &txn,
            self.work_order_id,
            self.acting_user_id,
            self.quantity,
        )
        .await?;
        txn.commit().await?;

        counter!("pumptrack_units_manufactured", self.quantity.total as u64);
        info!(
            work_order = %outcome.work_order.work_order_number,
            manufactured = self.quantity.total,
            remaining = outcome.remaining_to_manufacture.total,
            "Manufacturing recorded"
        );

        event_sender
            .send_or_log(Event::ManufacturingRecorded {
                work_order_id: outcome.work_order.id,
                quantity: self.quantity.total,
            })
            .await;
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
