use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::{
    commands::workorders::{CancelWorkOrderCommand, CreateWorkOrderCommand},
    commands::Command,
    db::DbPool,
    entities::work_order::{self, CurrentStage},
    errors::ServiceError,
    events::EventSender,
    queries::work_order_queries::{
        GetWorkOrderByIdQuery, GetWorkOrderByNumberQuery, GetWorkOrdersByStageQuery,
        ListWorkOrdersQuery, Query,
    },
};

/// Work order lifecycle outside the stage flow: creation, cancellation, and
/// the read side.
#[derive(Clone)]
pub struct WorkOrderService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl WorkOrderService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, command), err)]
    pub async fn create_work_order(
        &self,
        command: CreateWorkOrderCommand,
    ) -> Result<work_order::Model, ServiceError> {
        command
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    #[instrument(skip(self), err)]
    pub async fn cancel_work_order(
        &self,
        work_order_id: Uuid,
        acting_user_id: Uuid,
    ) -> Result<work_order::Model, ServiceError> {
        CancelWorkOrderCommand {
            work_order_id,
            acting_user_id,
        }
        .execute(self.db_pool.clone(), self.event_sender.clone())
        .await
    }

    #[instrument(skip(self), err)]
    pub async fn get_work_order(&self, id: Uuid) -> Result<work_order::Model, ServiceError> {
        GetWorkOrderByIdQuery { work_order_id: id }
            .execute(self.db_pool.as_ref())
            .await
    }

    #[instrument(skip(self), err)]
    pub async fn get_work_order_by_number(
        &self,
        work_order_number: &str,
    ) -> Result<work_order::Model, ServiceError> {
        GetWorkOrderByNumberQuery {
            work_order_number: work_order_number.to_string(),
        }
        .execute(self.db_pool.as_ref())
        .await
    }

    #[instrument(skip(self), err)]
    pub async fn list_work_orders(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<work_order::Model>, u64), ServiceError> {
        ListWorkOrdersQuery { page, page_size }
            .execute(self.db_pool.as_ref())
            .await
    }

    #[instrument(skip(self), err)]
    pub async fn list_by_stage(
        &self,
        stage: CurrentStage,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<work_order::Model>, ServiceError> {
        GetWorkOrdersByStageQuery {
            stage,
            limit,
            offset,
        }
        .execute(self.db_pool.as_ref())
        .await
    }
}
