//! PumpTrack API Library
//!
//! Custody tracking for solar-irrigation-pump work orders: an eight-stage
//! hand-off pipeline with per-stage quantity ledgers, cumulative partial
//! dispatches, and conservation of units from factory to farmer.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod commands;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod locks;
pub mod migrator;
pub mod notifications;
pub mod queries;
pub mod services;
pub mod stages;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub work_orders: services::WorkOrderService,
    pub stage_flow: services::StageFlowService,
    pub progress: services::ProgressService,
}

impl AppState {
    /// Wires the full service stack over one database pool. The caller
    /// chooses the notification sink; the tracing-backed default suits
    /// deployments without a push transport.
    pub fn new(
        db: Arc<DatabaseConnection>,
        config: config::AppConfig,
        event_sender: events::EventSender,
        sink: Arc<dyn notifications::NotificationSink>,
    ) -> Self {
        let sender = Arc::new(event_sender.clone());
        let locks = locks::WorkOrderLocks::new();
        Self {
            work_orders: services::WorkOrderService::new(db.clone(), sender.clone()),
            stage_flow: services::StageFlowService::new(db.clone(), sender, locks, sink),
            progress: services::ProgressService::new(db.clone()),
            db,
            config,
            event_sender,
        }
    }
}
