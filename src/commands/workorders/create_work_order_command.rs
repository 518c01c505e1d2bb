use chrono::{DateTime, Utc};
use metrics::counter;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    commands::Command,
    db::DbPool,
    entities::work_order::{self, ApprovalStatus, CurrentStage, WorkOrderStatus},
    errors::ServiceError,
    events::{Event, EventSender},
    stages::{quantities::QuantitySet, records},
};

/// Admin creation of a work order: quantities validated against the HP-sum
/// invariant, an auto-assigned WOnn number, the mandatory farmer-list
/// attachment, and the eight audit records (admin_created completed, the
/// rest pending).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateWorkOrderCommand {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 100))]
    pub region: String,
    pub total_quantity: i32,
    pub hp_3_quantity: i32,
    pub hp_5_quantity: i32,
    pub hp_7_5_quantity: i32,
    /// Path returned by the file store for the mandatory farmer list.
    #[validate(length(min = 1))]
    pub farmer_list_path: String,
    #[validate(range(min = 0))]
    pub factory_timeline_days: i32,
    #[validate(range(min = 0))]
    pub jsr_timeline_days: i32,
    #[validate(range(min = 0))]
    pub whouse_timeline_days: i32,
    #[validate(range(min = 0))]
    pub cp_timeline_days: i32,
    #[validate(range(min = 0))]
    pub contractor_timeline_days: i32,
    #[validate(range(min = 0))]
    pub farmer_timeline_days: i32,
    #[validate(range(min = 0))]
    pub inspection_timeline_days: i32,
    pub start_date: Option<DateTime<Utc>>,
    pub created_by: Uuid,
}

impl CreateWorkOrderCommand {
    pub fn quantities(&self) -> QuantitySet {
        QuantitySet::new(
            self.total_quantity,
            self.hp_3_quantity,
            self.hp_5_quantity,
            self.hp_7_5_quantity,
        )
    }
}

#[async_trait::async_trait]
impl Command for CreateWorkOrderCommand {
    type Result = work_order::Model;

    #[instrument(skip(self, db_pool, event_sender), fields(title = %self.title))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        self.validate().map_err(|e| {
            let msg = format!("Invalid work order input: {}", e);
            error!("{}", msg);
            ServiceError::ValidationError(msg)
        })?;
        self.quantities().validate_movement()?;

        let txn = db_pool.begin().await?;

        // WOnn numbering inside the transaction; the unique index on
        // work_order_number is the backstop against a concurrent creator.
        let count = work_order::Entity::find().count(&txn).await?;
        let work_order_number = format!("WO{:02}", count + 1);

        let now = Utc::now();
        let model = work_order::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_order_number: Set(work_order_number),
            title: Set(self.title.clone()),
            region: Set(self.region.clone()),
            total_quantity: Set(self.total_quantity),
            hp_3_quantity: Set(self.hp_3_quantity),
            hp_5_quantity: Set(self.hp_5_quantity),
            hp_7_5_quantity: Set(self.hp_7_5_quantity),
            current_stage: Set(CurrentStage::AdminCreated),
            status: Set(WorkOrderStatus::Created),
            jsr_approval_status: Set(ApprovalStatus::Pending),
            inspection_approval_status: Set(ApprovalStatus::Pending),
            farmer_list_path: Set(self.farmer_list_path.clone()),
            factory_timeline_days: Set(self.factory_timeline_days),
            jsr_timeline_days: Set(self.jsr_timeline_days),
            whouse_timeline_days: Set(self.whouse_timeline_days),
            cp_timeline_days: Set(self.cp_timeline_days),
            contractor_timeline_days: Set(self.contractor_timeline_days),
            farmer_timeline_days: Set(self.farmer_timeline_days),
            inspection_timeline_days: Set(self.inspection_timeline_days),
            start_date: Set(self.start_date),
            created_by: Set(self.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        records::create_all(&txn, model.id, self.created_by).await?;

        txn.commit().await?;

        counter!("pumptrack_work_orders_created", 1);
        info!(
            work_order = %model.work_order_number,
            total = model.total_quantity,
            "Work order created"
        );
        event_sender.send_or_log(Event::WorkOrderCreated(model.id)).await;

        Ok(model)
    }
}
