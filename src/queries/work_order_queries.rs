use crate::entities::work_order::{self, CurrentStage, Entity as WorkOrderEntity};
use crate::errors::ServiceError;
use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[async_trait]
pub trait Query: Send + Sync {
    type Result: Send + Sync;

    async fn execute(&self, db_pool: &DatabaseConnection) -> Result<Self::Result, ServiceError>;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetWorkOrderByIdQuery {
    pub work_order_id: Uuid,
}

#[async_trait]
impl Query for GetWorkOrderByIdQuery {
    type Result = work_order::Model;

    async fn execute(&self, db_pool: &DatabaseConnection) -> Result<Self::Result, ServiceError> {
        WorkOrderEntity::find_by_id(self.work_order_id)
            .one(db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Work order {} not found", self.work_order_id))
            })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetWorkOrderByNumberQuery {
    pub work_order_number: String,
}

#[async_trait]
impl Query for GetWorkOrderByNumberQuery {
    type Result = work_order::Model;

    async fn execute(&self, db_pool: &DatabaseConnection) -> Result<Self::Result, ServiceError> {
        WorkOrderEntity::find()
            .filter(work_order::Column::WorkOrderNumber.eq(&self.work_order_number))
            .one(db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Work order {} not found",
                    self.work_order_number
                ))
            })
    }
}

/// Paginated listing, newest first. Returns the page plus the total count.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListWorkOrdersQuery {
    pub page: u64,
    pub page_size: u64,
}

#[async_trait]
impl Query for ListWorkOrdersQuery {
    type Result = (Vec<work_order::Model>, u64);

    async fn execute(&self, db_pool: &DatabaseConnection) -> Result<Self::Result, ServiceError> {
        let page = self.page.max(1);
        let total = WorkOrderEntity::find().count(db_pool).await?;
        let work_orders = WorkOrderEntity::find()
            .order_by_desc(work_order::Column::CreatedAt)
            .offset((page - 1) * self.page_size)
            .limit(self.page_size)
            .all(db_pool)
            .await?;
        Ok((work_orders, total))
    }
}

/// Work orders whose custody pointer sits at one stage, for the per-role
/// worklist views.
#[derive(Debug, Serialize, Deserialize)]
pub struct GetWorkOrdersByStageQuery {
    pub stage: CurrentStage,
    pub limit: u64,
    pub offset: u64,
}

#[async_trait]
impl Query for GetWorkOrdersByStageQuery {
    type Result = Vec<work_order::Model>;

    async fn execute(&self, db_pool: &DatabaseConnection) -> Result<Self::Result, ServiceError> {
        WorkOrderEntity::find()
            .filter(work_order::Column::CurrentStage.eq(self.stage))
            .order_by_desc(work_order::Column::CreatedAt)
            .limit(self.limit)
            .offset(self.offset)
            .all(db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }
}
