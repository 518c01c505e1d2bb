use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event, logging and swallowing any failure. Stage operations
    /// must never fail because the event pipeline is down.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event).await {
            error!("Event delivery failed: {}", e);
        }
    }
}

// The events that can occur in the custody pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Work order lifecycle
    WorkOrderCreated(Uuid),
    WorkOrderCancelled(Uuid),
    WorkOrderCompleted(Uuid),

    // Quantity flow
    ManufacturingRecorded {
        work_order_id: Uuid,
        quantity: i32,
    },
    UnitsReceived {
        work_order_id: Uuid,
        stage: String,
        quantity: i32,
    },
    UnitsDispatched {
        work_order_id: Uuid,
        stage: String,
        quantity: i32,
    },
    StageCompleted {
        work_order_id: Uuid,
        stage: String,
    },
    StageAdvanced {
        work_order_id: Uuid,
        from_stage: String,
        to_stage: String,
    },

    // Quality gates and failures
    JsrDecision {
        work_order_id: Uuid,
        approved: bool,
    },
    InspectionDecision {
        work_order_id: Uuid,
        approved: bool,
    },
    DefectReported {
        work_order_id: Uuid,
        issue_title: String,
    },

    // Deadline monitor
    DeadlineWarning {
        work_order_id: Uuid,
        stage: String,
        days_remaining: i64,
    },

    // Generic event for custom messages
    Generic {
        message: String,
        timestamp: DateTime<Utc>,
    },
}

impl Event {
    /// Create a generic event with string data
    pub fn with_data(data: String) -> Self {
        Event::Generic {
            message: data,
            timestamp: Utc::now(),
        }
    }
}

// Processes incoming events. Everything is logged; stage completions and
// failures are the signals downstream transports subscribe to.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::StageAdvanced {
                work_order_id,
                from_stage,
                to_stage,
            } => {
                info!(
                    work_order_id = %work_order_id,
                    from = %from_stage,
                    to = %to_stage,
                    "Work order advanced"
                );
            }
            Event::DefectReported {
                work_order_id,
                issue_title,
            } => {
                info!(
                    work_order_id = %work_order_id,
                    issue = %issue_title,
                    "Defect reported"
                );
            }
            Event::DeadlineWarning {
                work_order_id,
                stage,
                days_remaining,
            } => {
                info!(
                    work_order_id = %work_order_id,
                    stage = %stage,
                    days_remaining = %days_remaining,
                    "Stage deadline approaching"
                );
            }
            other => {
                info!("Received event: {:?}", other);
            }
        }
    }

    info!("Event processing loop stopped");
}
