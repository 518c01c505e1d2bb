use std::{sync::Arc, time::Duration};

use tokio::{signal, sync::mpsc};
use tracing::{error, info};

use pumptrack_api as api;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = api::config::load_config()?;
    api::config::init_tracing(cfg.log_level(), cfg.log_json);

    // Init DB
    let db_pool = api::db::establish_connection_from_app_config(&cfg).await?;
    if cfg.auto_migrate {
        api::db::run_migrations(&db_pool).await.map_err(|e| {
            error!("Failed running migrations: {}", e);
            e
        })?;
    }
    let db_arc = Arc::new(db_pool);

    // Init events
    let (event_tx, event_rx) = mpsc::channel(cfg.event_channel_capacity);
    let event_sender = api::events::EventSender::new(event_tx);
    tokio::spawn(api::events::process_events(event_rx));

    // Structured-log sink; push transports plug in through the same trait.
    let sink: Arc<dyn api::notifications::NotificationSink> =
        Arc::new(api::notifications::TracingNotificationSink);

    let state = api::AppState::new(
        db_arc.clone(),
        cfg.clone(),
        event_sender.clone(),
        sink.clone(),
    );

    // Background deadline scanner
    let monitor = api::services::DeadlineMonitor::new(
        db_arc,
        Arc::new(event_sender),
        sink,
        Duration::from_secs(cfg.deadline_check_interval_secs),
        cfg.deadline_warning_days,
    );
    tokio::spawn(monitor.run());

    info!(
        environment = %state.config.environment,
        "pumptrack-api started; press Ctrl-C to shut down"
    );
    signal::ctrl_c().await?;
    info!("Shutdown signal received; closing database connection pool");

    drop(state);
    Ok(())
}
