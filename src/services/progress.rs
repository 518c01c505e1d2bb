use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::TransactionTrait;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    db::DbPool,
    entities::work_order,
    errors::ServiceError,
    stages::deadlines::{self, StageDeadline},
    stages::progress::{self, StageProgress},
    stages::validate,
};

/// Read-only projections: per-stage progress derived from ledger quantities
/// and the deadline windows. Neither touches the state machine.
#[derive(Clone)]
pub struct ProgressService {
    db_pool: Arc<DbPool>,
}

impl ProgressService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// The authoritative per-stage status projection for one work order.
    #[instrument(skip(self), err)]
    pub async fn stage_progress(
        &self,
        work_order_id: Uuid,
    ) -> Result<(work_order::Model, Vec<StageProgress>), ServiceError> {
        // One read transaction so all seven ledgers are a consistent snapshot.
        let txn = self.db_pool.begin().await?;
        let work_order = validate::load_work_order(&txn, work_order_id).await?;
        let progress = progress::work_order_progress(&txn, &work_order).await?;
        txn.commit().await?;
        Ok((work_order, progress))
    }

    /// Deadline windows for every stage of one work order.
    #[instrument(skip(self), err)]
    pub async fn deadlines(
        &self,
        work_order_id: Uuid,
        today: DateTime<Utc>,
    ) -> Result<Vec<StageDeadline>, ServiceError> {
        let txn = self.db_pool.begin().await?;
        let work_order = validate::load_work_order(&txn, work_order_id).await?;
        txn.commit().await?;
        Ok(deadlines::all_deadlines(&work_order, today))
    }
}
