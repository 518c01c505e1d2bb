use std::sync::Arc;

use chrono::Utc;
use pumptrack_api::{
    commands::stages::stage_decision_command::ApprovalArtifacts,
    commands::workorders::CreateWorkOrderCommand,
    config::AppConfig,
    db,
    entities::{user, work_order},
    events::{self, EventSender},
    notifications::TracingNotificationSink,
    stages::quantities::QuantitySet,
    stages::transition::DispatchDestination,
    AppState,
};
use sea_orm::{ActiveModelTrait, Set};
use tempfile::TempDir;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Test harness: application state over a fresh file-backed SQLite database,
/// with one seeded user per role.
pub struct TestApp {
    pub state: AppState,
    pub admin: user::Model,
    pub factory: user::Model,
    pub jsr: user::Model,
    pub warehouse: user::Model,
    pub cp: user::Model,
    pub contractor: user::Model,
    pub farmer: user::Model,
    pub inspection: user::Model,
    _event_task: tokio::task::JoinHandle<()>,
    _db_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_dir = TempDir::new().expect("create temp dir for test database");
        let db_file = db_dir.path().join("pumptrack_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_file.display()),
            "test".to_string(),
        );
        cfg.auto_migrate = true;
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let (event_tx, event_rx) = mpsc::channel(256);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let state = AppState::new(
            db_arc.clone(),
            cfg,
            event_sender,
            Arc::new(TracingNotificationSink),
        );

        let admin = seed_user(&state, user::Role::Admin, "Admin", None).await;
        let factory = seed_user(&state, user::Role::Factory, "Factory Operator", None).await;
        // The JSR verifier's location must match the factory's declared
        // dispatch destination for receives to pass the location gate.
        let jsr = seed_user(
            &state,
            user::Role::Jsr,
            "JSR Verifier",
            Some(("Maharashtra", "Pune", "Haveli", "Kothrud")),
        )
        .await;
        let warehouse = seed_user(&state, user::Role::Warehouse, "Warehouse Keeper", None).await;
        let cp = seed_user(&state, user::Role::Cp, "Channel Partner", None).await;
        let contractor = seed_user(&state, user::Role::Contractor, "Contractor", None).await;
        let farmer = seed_user(&state, user::Role::Farmer, "Farmer", None).await;
        let inspection = seed_user(&state, user::Role::Inspection, "Inspector", None).await;

        Self {
            state,
            admin,
            factory,
            jsr,
            warehouse,
            cp,
            contractor,
            farmer,
            inspection,
            _event_task: event_task,
            _db_dir: db_dir,
        }
    }

    /// Creates a work order with the given quantity breakdown and five-day
    /// timelines for every stage.
    pub async fn create_work_order(
        &self,
        total: i32,
        hp_3: i32,
        hp_5: i32,
        hp_7_5: i32,
    ) -> work_order::Model {
        self.state
            .work_orders
            .create_work_order(self.create_command(total, hp_3, hp_5, hp_7_5))
            .await
            .expect("create work order")
    }

    pub fn create_command(
        &self,
        total: i32,
        hp_3: i32,
        hp_5: i32,
        hp_7_5: i32,
    ) -> CreateWorkOrderCommand {
        CreateWorkOrderCommand {
            title: "Solar pump installation".to_string(),
            region: "Pune".to_string(),
            total_quantity: total,
            hp_3_quantity: hp_3,
            hp_5_quantity: hp_5,
            hp_7_5_quantity: hp_7_5,
            farmer_list_path: "uploads/farmer-list.xlsx".to_string(),
            factory_timeline_days: 5,
            jsr_timeline_days: 5,
            whouse_timeline_days: 5,
            cp_timeline_days: 5,
            contractor_timeline_days: 5,
            farmer_timeline_days: 5,
            inspection_timeline_days: 5,
            start_date: None,
            created_by: self.admin.id,
        }
    }

    /// The admin-assigned totals of a work order as a quantity set.
    pub fn totals(work_order: &work_order::Model) -> QuantitySet {
        QuantitySet::new(
            work_order.total_quantity,
            work_order.hp_3_quantity,
            work_order.hp_5_quantity,
            work_order.hp_7_5_quantity,
        )
    }

    /// Dispatch destination matching the seeded JSR verifier's location.
    pub fn destination() -> DispatchDestination {
        DispatchDestination {
            state: "Maharashtra".to_string(),
            district: "Pune".to_string(),
            taluka: "Haveli".to_string(),
            village: "Kothrud".to_string(),
        }
    }

    pub fn artifacts() -> ApprovalArtifacts {
        ApprovalArtifacts {
            farmer_name: "Ramesh Patil".to_string(),
            state: "Maharashtra".to_string(),
            district: "Pune".to_string(),
            taluka: "Haveli".to_string(),
            village: "Kothrud".to_string(),
            photos: vec![
                "uploads/photo-1.jpg".to_string(),
                "uploads/photo-2.jpg".to_string(),
                "uploads/photo-3.jpg".to_string(),
            ],
        }
    }

    /// Seeds an extra user, for tests needing a second principal in a role
    /// (names must be unique; the email is derived from the name).
    pub async fn seed_extra_user(
        &self,
        role: user::Role,
        name: &str,
        location: Option<(&str, &str, &str, &str)>,
    ) -> user::Model {
        seed_user(&self.state, role, name, location).await
    }

    /// Drives a work order from creation through the JSR approval: full
    /// manufacture, full dispatch, full receive, approve.
    pub async fn advance_through_jsr_approval(&self, work_order: &work_order::Model) {
        let q = Self::totals(work_order);
        let flow = &self.state.stage_flow;
        flow.record_manufacturing(work_order.id, self.factory.id, q)
            .await
            .expect("record manufacturing");
        flow.dispatch_to_jsr(work_order.id, self.factory.id, q, Some(Self::destination()))
            .await
            .expect("dispatch to jsr");
        flow.receive_at_jsr(work_order.id, self.jsr.id, q)
            .await
            .expect("receive at jsr");
        flow.approve_jsr(work_order.id, self.jsr.id, Self::artifacts())
            .await
            .expect("approve jsr");
    }

    /// Continues a JSR-approved work order through the contractor's full
    /// dispatch, leaving custody at farmer_inspection with nothing received
    /// on either branch yet.
    pub async fn advance_to_fan_out(&self, work_order: &work_order::Model) {
        let q = Self::totals(work_order);
        let flow = &self.state.stage_flow;
        flow.dispatch_to_warehouse(work_order.id, self.jsr.id, q)
            .await
            .expect("dispatch to warehouse");
        flow.receive_at_warehouse(work_order.id, self.warehouse.id, q)
            .await
            .expect("receive at warehouse");
        flow.dispatch_to_cp(work_order.id, self.warehouse.id, q)
            .await
            .expect("dispatch to cp");
        flow.receive_at_cp(work_order.id, self.cp.id, q)
            .await
            .expect("receive at cp");
        flow.dispatch_to_contractor(work_order.id, self.cp.id, q)
            .await
            .expect("dispatch to contractor");
        flow.receive_at_contractor(work_order.id, self.contractor.id, q)
            .await
            .expect("receive at contractor");
        flow.dispatch_to_farmer(work_order.id, self.contractor.id, q)
            .await
            .expect("dispatch to farmer");
    }
}

async fn seed_user(
    state: &AppState,
    role: user::Role,
    name: &str,
    location: Option<(&str, &str, &str, &str)>,
) -> user::Model {
    let (u_state, district, taluka, village) = match location {
        Some((s, d, t, v)) => (
            Some(s.to_string()),
            Some(d.to_string()),
            Some(t.to_string()),
            Some(v.to_string()),
        ),
        None => (None, None, None, None),
    };
    user::ActiveModel {
        id: Set(Uuid::new_v4()),
        full_name: Set(name.to_string()),
        email: Set(format!(
            "{}@example.com",
            name.to_lowercase().replace(' ', ".")
        )),
        role: Set(role),
        state: Set(u_state),
        district: Set(district),
        taluka: Set(taluka),
        village: Set(village),
        created_at: Set(Utc::now()),
    }
    .insert(state.db.as_ref())
    .await
    .expect("seed user")
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self._event_task.abort();
    }
}
