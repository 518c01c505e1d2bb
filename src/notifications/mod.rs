use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::entities::{user, work_order};

/// Notification delivery errors
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Outbound notification sink for stage events. Implementations wrap the
/// actual transports (push delivery, sockets); the core only knows this
/// trait and receives an implementation at service construction.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// A work order moved custody from one stage to the next.
    async fn stage_advanced(
        &self,
        work_order: &work_order::Model,
        from_stage: &str,
        to_stage: &str,
        acting_user: &user::Model,
    ) -> Result<(), NotificationError>;

    /// A stage deadline is approaching or has elapsed.
    async fn deadline_warning(
        &self,
        work_order: &work_order::Model,
        stage: &str,
        days_remaining: i64,
    ) -> Result<(), NotificationError>;
}

/// Default sink: structured log lines only. Useful on its own in
/// deployments without a push transport, and as the test stand-in.
#[derive(Debug, Clone, Default)]
pub struct TracingNotificationSink;

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    #[instrument(skip(self, work_order, acting_user), fields(work_order = %work_order.work_order_number))]
    async fn stage_advanced(
        &self,
        work_order: &work_order::Model,
        from_stage: &str,
        to_stage: &str,
        acting_user: &user::Model,
    ) -> Result<(), NotificationError> {
        info!(
            work_order = %work_order.work_order_number,
            from = %from_stage,
            to = %to_stage,
            acting_user = %acting_user.full_name,
            "Stage advanced"
        );
        Ok(())
    }

    #[instrument(skip(self, work_order), fields(work_order = %work_order.work_order_number))]
    async fn deadline_warning(
        &self,
        work_order: &work_order::Model,
        stage: &str,
        days_remaining: i64,
    ) -> Result<(), NotificationError> {
        info!(
            work_order = %work_order.work_order_number,
            stage = %stage,
            days_remaining = %days_remaining,
            "Deadline warning"
        );
        Ok(())
    }
}

/// Fire-and-forget delivery: a sink failure is logged and swallowed, never
/// surfaced to the stage operation that triggered it.
pub async fn notify_stage_advanced(
    sink: &dyn NotificationSink,
    work_order: &work_order::Model,
    from_stage: &str,
    to_stage: &str,
    acting_user: &user::Model,
) {
    if let Err(e) = sink
        .stage_advanced(work_order, from_stage, to_stage, acting_user)
        .await
    {
        warn!(
            work_order = %work_order.work_order_number,
            error = %e,
            "Stage-advanced notification failed; continuing"
        );
    }
}

/// Fire-and-forget deadline warning delivery.
pub async fn notify_deadline_warning(
    sink: &dyn NotificationSink,
    work_order: &work_order::Model,
    stage: &str,
    days_remaining: i64,
) {
    if let Err(e) = sink
        .deadline_warning(work_order, stage, days_remaining)
        .await
    {
        warn!(
            work_order = %work_order.work_order_number,
            error = %e,
            "Deadline-warning notification failed; continuing"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::mock;
    use uuid::Uuid;

    mock! {
        pub Sink {}

        #[async_trait]
        impl NotificationSink for Sink {
            async fn stage_advanced(
                &self,
                work_order: &work_order::Model,
                from_stage: &str,
                to_stage: &str,
                acting_user: &user::Model,
            ) -> Result<(), NotificationError>;

            async fn deadline_warning(
                &self,
                work_order: &work_order::Model,
                stage: &str,
                days_remaining: i64,
            ) -> Result<(), NotificationError>;
        }
    }

    fn sample_work_order() -> work_order::Model {
        let now = Utc::now();
        work_order::Model {
            id: Uuid::new_v4(),
            work_order_number: "WO01".into(),
            title: "Test".into(),
            region: "West".into(),
            total_quantity: 18,
            hp_3_quantity: 6,
            hp_5_quantity: 6,
            hp_7_5_quantity: 6,
            current_stage: work_order::CurrentStage::Factory,
            status: work_order::WorkOrderStatus::Created,
            jsr_approval_status: work_order::ApprovalStatus::Pending,
            inspection_approval_status: work_order::ApprovalStatus::Pending,
            farmer_list_path: "uploads/farmers.xlsx".into(),
            factory_timeline_days: 5,
            jsr_timeline_days: 5,
            whouse_timeline_days: 5,
            cp_timeline_days: 5,
            contractor_timeline_days: 5,
            farmer_timeline_days: 5,
            inspection_timeline_days: 5,
            start_date: None,
            created_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_user() -> user::Model {
        user::Model {
            id: Uuid::new_v4(),
            full_name: "Factory Operator".into(),
            email: "factory@example.com".into(),
            role: user::Role::Factory,
            state: None,
            district: None,
            taluka: None,
            village: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn sink_failure_is_swallowed() {
        let mut sink = MockSink::new();
        sink.expect_stage_advanced()
            .times(1)
            .returning(|_, _, _, _| Err(NotificationError::Transport("socket down".into())));

        // Must complete without propagating the failure.
        notify_stage_advanced(&sink, &sample_work_order(), "factory", "jsr", &sample_user()).await;
    }

    #[tokio::test]
    async fn deadline_warning_failure_is_swallowed() {
        let mut sink = MockSink::new();
        sink.expect_deadline_warning()
            .times(1)
            .returning(|_, _, _| Err(NotificationError::Transport("push service down".into())));

        notify_deadline_warning(&sink, &sample_work_order(), "cp", 2).await;
    }

    #[tokio::test]
    async fn tracing_sink_always_succeeds() {
        let sink = TracingNotificationSink;
        assert!(sink
            .stage_advanced(&sample_work_order(), "factory", "jsr", &sample_user())
            .await
            .is_ok());
        assert!(sink
            .deadline_warning(&sample_work_order(), "jsr", 3)
            .await
            .is_ok());
    }
}
