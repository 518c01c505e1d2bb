//! Cron-style deadline monitor: a read-only interval task that scans active
//! work orders and emits best-effort warnings. It never mutates ledger
//! state, and a failed scan only logs.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::{error, info, instrument};

use crate::{
    db::DbPool,
    entities::work_order::{self, WorkOrderStatus},
    errors::ServiceError,
    events::{Event, EventSender},
    notifications::{notify_deadline_warning, NotificationSink},
    stages::{deadlines, machine},
};

pub struct DeadlineMonitor {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
    sink: Arc<dyn NotificationSink>,
    interval: Duration,
    warning_days: i64,
}

impl DeadlineMonitor {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
        sink: Arc<dyn NotificationSink>,
        interval: Duration,
        warning_days: i64,
    ) -> Self {
        Self {
            db_pool,
            event_sender,
            sink,
            interval,
            warning_days,
        }
    }

    /// Runs forever; intended for `tokio::spawn`.
    pub async fn run(self) {
        info!(
            interval_secs = self.interval.as_secs(),
            warning_days = self.warning_days,
            "Deadline monitor started"
        );
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if let Err(e) = self.scan_once().await {
                error!("Deadline scan failed: {}", e);
            }
        }
    }

    /// One scan over the in-flight work orders. Returns the number of
    /// warnings emitted.
    #[instrument(skip(self), err)]
    pub async fn scan_once(&self) -> Result<usize, ServiceError> {
        let now = Utc::now();
        let work_orders = work_order::Entity::find()
            .filter(work_order::Column::Status.eq(WorkOrderStatus::Created))
            .all(self.db_pool.as_ref())
            .await?;

        let mut warnings = 0;
        for wo in work_orders {
            if machine::is_terminal(wo.current_stage) {
                continue;
            }
            for deadline in deadlines::current_stage_deadlines(&wo, now) {
                if deadline.days_remaining <= self.warning_days {
                    self.event_sender
                        .send_or_log(Event::DeadlineWarning {
                            work_order_id: wo.id,
                            stage: deadline.stage.to_string(),
                            days_remaining: deadline.days_remaining,
                        })
                        .await;
                    notify_deadline_warning(
                        self.sink.as_ref(),
                        &wo,
                        deadline.stage,
                        deadline.days_remaining,
                    )
                    .await;
                    warnings += 1;
                }
            }
        }
        Ok(warnings)
    }
}
