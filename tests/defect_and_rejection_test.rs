//! The three dead ends: a farmer defect report and the two quality-gate
//! rejections. Rejections are terminal; a defect keeps the leaf receives
//! open but the work order never completes.

mod common;

use common::TestApp;
use pumptrack_api::{
    entities::stage_record::{self, StageRecordStatus},
    entities::stage_status::FarmerStatus,
    entities::work_order::{ApprovalStatus, CurrentStage},
    errors::ServiceError,
    stages::quantities::QuantitySet,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

#[tokio::test]
async fn defect_report_pins_the_work_order() {
    let app = TestApp::new().await;
    let wo = app.create_work_order(6, 2, 2, 2).await;

    app.advance_through_jsr_approval(&wo).await;
    app.advance_to_fan_out(&wo).await;

    app.state
        .stage_flow
        .receive_at_farmer(wo.id, app.farmer.id, QuantitySet::new(3, 1, 1, 1))
        .await
        .unwrap();

    let outcome = app
        .state
        .stage_flow
        .report_defect(
            wo.id,
            app.farmer.id,
            "Pump head cracked".to_string(),
            "Two units arrived with cracked pump heads and cannot be installed.".to_string(),
            vec!["uploads/defect-1.jpg".to_string()],
        )
        .await
        .unwrap();

    assert_eq!(outcome.work_order.current_stage, CurrentStage::DefectReported);
    assert_eq!(outcome.entry.farmer_status, FarmerStatus::DefectReported);
    assert_eq!(outcome.entry.issue_title.as_deref(), Some("Pump head cracked"));
    assert_eq!(
        outcome.entry.photo_1.as_deref(),
        Some("uploads/defect-1.jpg")
    );
    assert!(outcome.entry.photo_2.is_none());

    // The farmer stage record is marked failed with the issue title.
    let record = stage_record::Entity::find()
        .filter(stage_record::Column::WorkOrderId.eq(wo.id))
        .filter(stage_record::Column::StageName.eq("farmer"))
        .one(app.state.db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.status, StageRecordStatus::Failed);
    assert_eq!(record.error_message.as_deref(), Some("Pump head cracked"));
}

#[tokio::test]
async fn defect_keeps_receives_open_but_never_completes() {
    let app = TestApp::new().await;
    let wo = app.create_work_order(6, 2, 2, 2).await;
    let q = TestApp::totals(&wo);

    app.advance_through_jsr_approval(&wo).await;
    app.advance_to_fan_out(&wo).await;

    app.state
        .stage_flow
        .receive_at_farmer(wo.id, app.farmer.id, QuantitySet::new(3, 1, 1, 1))
        .await
        .unwrap();
    app.state
        .stage_flow
        .report_defect(
            wo.id,
            app.farmer.id,
            "Controller missing".to_string(),
            "One crate was delivered without its pump controller.".to_string(),
            vec![],
        )
        .await
        .unwrap();

    // Both leaf stages may keep receiving under defect_reported.
    let rest = QuantitySet::new(3, 1, 1, 1);
    let farmer_outcome = app
        .state
        .stage_flow
        .receive_at_farmer(wo.id, app.farmer.id, rest)
        .await
        .unwrap();
    assert!(!farmer_outcome.work_order_completed);

    let inspection_outcome = app
        .state
        .stage_flow
        .receive_at_inspection(wo.id, app.inspection.id, q)
        .await
        .unwrap();
    assert!(!inspection_outcome.work_order_completed);

    // Even a full inspection approval cannot complete a defect-pinned order.
    let decision = app
        .state
        .stage_flow
        .approve_inspection(wo.id, app.inspection.id, TestApp::artifacts())
        .await
        .unwrap();
    assert!(decision.approved);
    assert!(!decision.work_order_completed);
    assert_eq!(
        decision.work_order.current_stage,
        CurrentStage::DefectReported
    );
}

#[tokio::test]
async fn defect_requires_received_units() {
    let app = TestApp::new().await;
    let wo = app.create_work_order(6, 2, 2, 2).await;

    app.advance_through_jsr_approval(&wo).await;
    app.advance_to_fan_out(&wo).await;

    let err = app
        .state
        .stage_flow
        .report_defect(
            wo.id,
            app.farmer.id,
            "Nothing arrived".to_string(),
            "No units were ever delivered.".to_string(),
            vec![],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidOperation(_)));
    assert!(err.to_string().contains("No units"), "{}", err);
}

#[tokio::test]
async fn defect_report_allows_at_most_three_photos() {
    let app = TestApp::new().await;
    let wo = app.create_work_order(6, 2, 2, 2).await;
    let q = TestApp::totals(&wo);

    app.advance_through_jsr_approval(&wo).await;
    app.advance_to_fan_out(&wo).await;
    app.state
        .stage_flow
        .receive_at_farmer(wo.id, app.farmer.id, q)
        .await
        .unwrap();

    let err = app
        .state
        .stage_flow
        .report_defect(
            wo.id,
            app.farmer.id,
            "Bent shaft".to_string(),
            "The drive shaft is visibly bent.".to_string(),
            (1..=4).map(|i| format!("uploads/defect-{}.jpg", i)).collect(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn jsr_rejection_is_terminal() {
    let app = TestApp::new().await;
    let wo = app.create_work_order(18, 6, 6, 6).await;
    let q = TestApp::totals(&wo);
    let flow = &app.state.stage_flow;

    flow.record_manufacturing(wo.id, app.factory.id, q)
        .await
        .unwrap();
    flow.dispatch_to_jsr(wo.id, app.factory.id, q, Some(TestApp::destination()))
        .await
        .unwrap();
    flow.receive_at_jsr(wo.id, app.jsr.id, q).await.unwrap();

    let decision = flow
        .reject_jsr(wo.id, app.jsr.id, "Serial numbers do not match the manifest".to_string())
        .await
        .unwrap();
    assert!(!decision.approved);
    assert_eq!(decision.work_order.current_stage, CurrentStage::RejectedByJsr);
    assert_eq!(
        decision.work_order.jsr_approval_status,
        ApprovalStatus::Rejected
    );

    // Nothing moves after a rejection.
    let err = flow
        .dispatch_to_warehouse(wo.id, app.jsr.id, q)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidOperation(_)));
    assert!(err.to_string().contains("'rejected_by_jsr'"), "{}", err);

    let record = stage_record::Entity::find()
        .filter(stage_record::Column::WorkOrderId.eq(wo.id))
        .filter(stage_record::Column::StageName.eq("jsr"))
        .one(app.state.db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.status, StageRecordStatus::Failed);
    assert_eq!(
        record.error_message.as_deref(),
        Some("Serial numbers do not match the manifest")
    );
}

#[tokio::test]
async fn inspection_rejection_is_terminal() {
    let app = TestApp::new().await;
    let wo = app.create_work_order(6, 2, 2, 2).await;
    let q = TestApp::totals(&wo);

    app.advance_through_jsr_approval(&wo).await;
    app.advance_to_fan_out(&wo).await;
    app.state
        .stage_flow
        .receive_at_inspection(wo.id, app.inspection.id, q)
        .await
        .unwrap();

    let decision = app
        .state
        .stage_flow
        .reject_inspection(wo.id, app.inspection.id, "Installation does not meet spec sheet".to_string())
        .await
        .unwrap();
    assert_eq!(
        decision.work_order.current_stage,
        CurrentStage::RejectedByInspection
    );

    // The farmer branch is frozen along with everything else.
    let err = app
        .state
        .stage_flow
        .receive_at_farmer(wo.id, app.farmer.id, q)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidOperation(_)));
}

#[tokio::test]
async fn rejection_must_state_a_reason() {
    let app = TestApp::new().await;
    let wo = app.create_work_order(18, 6, 6, 6).await;
    let q = TestApp::totals(&wo);
    let flow = &app.state.stage_flow;

    flow.record_manufacturing(wo.id, app.factory.id, q)
        .await
        .unwrap();
    flow.dispatch_to_jsr(wo.id, app.factory.id, q, Some(TestApp::destination()))
        .await
        .unwrap();
    flow.receive_at_jsr(wo.id, app.jsr.id, q).await.unwrap();

    let err = flow
        .reject_jsr(wo.id, app.jsr.id, "   ".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));
    assert!(err.to_string().contains("reason"), "{}", err);
}

#[tokio::test]
async fn approval_requires_exactly_three_photos() {
    let app = TestApp::new().await;
    let wo = app.create_work_order(18, 6, 6, 6).await;
    let q = TestApp::totals(&wo);
    let flow = &app.state.stage_flow;

    flow.record_manufacturing(wo.id, app.factory.id, q)
        .await
        .unwrap();
    flow.dispatch_to_jsr(wo.id, app.factory.id, q, Some(TestApp::destination()))
        .await
        .unwrap();
    flow.receive_at_jsr(wo.id, app.jsr.id, q).await.unwrap();

    let mut artifacts = TestApp::artifacts();
    artifacts.photos.pop();
    let err = flow
        .approve_jsr(wo.id, app.jsr.id, artifacts)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));
}
