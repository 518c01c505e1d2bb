use chrono::Utc;
use metrics::counter;
use sea_orm::{ActiveModelTrait, EntityTrait, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    commands::Command,
    db::DbPool,
    entities::user::Role,
    entities::work_order::{self, WorkOrderStatus},
    errors::ServiceError,
    events::{Event, EventSender},
    stages::validate,
};

/// Cancels a work order. Work orders are never deleted; cancellation flips
/// the status and every stage operation refuses the order afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelWorkOrderCommand {
    pub work_order_id: Uuid,
    pub acting_user_id: Uuid,
}

#[async_trait::async_trait]
impl Command for CancelWorkOrderCommand {
    type Result = work_order::Model;

    #[instrument(skip(self, db_pool, event_sender), fields(work_order_id = %self.work_order_id))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let txn = db_pool.begin().await?;

        let acting_user = validate::load_acting_user(&txn, self.acting_user_id).await?;
        if acting_user.role != Role::Admin {
            return Err(ServiceError::Forbidden(format!(
                "Only admins may cancel work orders; {} has role '{}'",
                acting_user.full_name,
                acting_user.role.as_str()
            )));
        }

        let work_order = work_order::Entity::find_by_id(self.work_order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Work order {} not found", self.work_order_id))
            })?;
        if work_order.status == WorkOrderStatus::Cancelled {
            return Err(ServiceError::InvalidOperation(format!(
                "Work order {} is already cancelled",
                work_order.work_order_number
            )));
        }

        let mut active: work_order::ActiveModel = work_order.into();
        active.status = Set(WorkOrderStatus::Cancelled);
        active.updated_at = Set(Utc::now());
        let model = active.update(&txn).await?;

        txn.commit().await?;

        counter!("pumptrack_work_orders_cancelled", 1);
        info!(work_order = %model.work_order_number, "Work order cancelled");
        event_sender
            .send_or_log(Event::WorkOrderCancelled(model.id))
            .await;

        Ok(model)
    }
}
