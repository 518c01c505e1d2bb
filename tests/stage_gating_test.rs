//! Custody, role, and location gates: operations out of turn, by the wrong
//! role, or from a mismatched location are refused before anything is
//! written.

mod common;

use common::TestApp;
use pumptrack_api::{
    entities::user::Role,
    entities::work_order::CurrentStage,
    errors::ServiceError,
    stages::quantities::QuantitySet,
};

#[tokio::test]
async fn receive_out_of_turn_names_actual_and_required_stage() {
    let app = TestApp::new().await;
    let wo = app.create_work_order(18, 6, 6, 6).await;
    let q = TestApp::totals(&wo);

    // Custody is still at admin_created; the warehouse may not receive.
    let err = app
        .state
        .stage_flow
        .receive_at_warehouse(wo.id, app.warehouse.id, q)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidOperation(_)));
    let msg = err.to_string();
    assert!(msg.contains("'admin_created'"), "{}", msg);
    assert!(msg.contains("'whouse'"), "{}", msg);
}

#[tokio::test]
async fn wrong_role_is_forbidden() {
    let app = TestApp::new().await;
    let wo = app.create_work_order(18, 6, 6, 6).await;
    let q = TestApp::totals(&wo);

    app.state
        .stage_flow
        .record_manufacturing(wo.id, app.factory.id, q)
        .await
        .unwrap();
    app.state
        .stage_flow
        .dispatch_to_jsr(wo.id, app.factory.id, q, Some(TestApp::destination()))
        .await
        .unwrap();

    // The factory operator cannot act as the JSR verifier.
    let err = app
        .state
        .stage_flow
        .receive_at_jsr(wo.id, app.factory.id, q)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
    assert!(err.to_string().contains("'jsr'"), "{}", err);
}

#[tokio::test]
async fn jsr_location_mismatch_is_refused_with_both_locations() {
    let app = TestApp::new().await;
    let wo = app.create_work_order(18, 6, 6, 6).await;
    let q = TestApp::totals(&wo);

    app.state
        .stage_flow
        .record_manufacturing(wo.id, app.factory.id, q)
        .await
        .unwrap();
    // Destination is the seeded verifier's Pune location.
    app.state
        .stage_flow
        .dispatch_to_jsr(wo.id, app.factory.id, q, Some(TestApp::destination()))
        .await
        .unwrap();

    let nashik_verifier = app
        .seed_extra_user(
            Role::Jsr,
            "Nashik Verifier",
            Some(("Maharashtra", "Nashik", "Igatpuri", "Ghoti")),
        )
        .await;

    let err = app
        .state
        .stage_flow
        .receive_at_jsr(wo.id, nashik_verifier.id, q)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
    let msg = err.to_string();
    assert!(msg.contains("Pune"), "{}", msg);
    assert!(msg.contains("Nashik"), "{}", msg);

    // The matching verifier still passes.
    app.state
        .stage_flow
        .receive_at_jsr(wo.id, app.jsr.id, q)
        .await
        .unwrap();
}

#[tokio::test]
async fn first_factory_dispatch_requires_destination() {
    let app = TestApp::new().await;
    let wo = app.create_work_order(18, 6, 6, 6).await;
    let q = TestApp::totals(&wo);

    app.state
        .stage_flow
        .record_manufacturing(wo.id, app.factory.id, q)
        .await
        .unwrap();

    let err = app
        .state
        .stage_flow
        .dispatch_to_jsr(wo.id, app.factory.id, q, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));
    assert!(err.to_string().contains("destination"), "{}", err);
}

#[tokio::test]
async fn redeclaring_a_different_destination_is_refused() {
    let app = TestApp::new().await;
    let wo = app.create_work_order(18, 6, 6, 6).await;

    app.state
        .stage_flow
        .record_manufacturing(wo.id, app.factory.id, TestApp::totals(&wo))
        .await
        .unwrap();
    app.state
        .stage_flow
        .dispatch_to_jsr(
            wo.id,
            app.factory.id,
            QuantitySet::new(9, 3, 3, 3),
            Some(TestApp::destination()),
        )
        .await
        .unwrap();

    let mut other = TestApp::destination();
    other.district = "Nashik".to_string();
    let err = app
        .state
        .stage_flow
        .dispatch_to_jsr(wo.id, app.factory.id, QuantitySet::new(9, 3, 3, 3), Some(other))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidOperation(_)));
    assert!(err.to_string().contains("already declared"), "{}", err);

    // Omitting the destination on a later partial dispatch is fine.
    let outcome = app
        .state
        .stage_flow
        .dispatch_to_jsr(wo.id, app.factory.id, QuantitySet::new(9, 3, 3, 3), None)
        .await
        .unwrap();
    assert!(outcome.all_dispatched);
}

#[tokio::test]
async fn zero_quantity_movements_are_rejected() {
    let app = TestApp::new().await;
    let wo = app.create_work_order(18, 6, 6, 6).await;

    let err = app
        .state
        .stage_flow
        .record_manufacturing(wo.id, app.factory.id, QuantitySet::ZERO)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));
    assert!(
        err.to_string().contains("greater than zero"),
        "{}",
        err
    );
}

#[tokio::test]
async fn decision_requires_a_ledger_entry() {
    let app = TestApp::new().await;
    let wo = app.create_work_order(18, 6, 6, 6).await;
    let q = TestApp::totals(&wo);

    app.state
        .stage_flow
        .record_manufacturing(wo.id, app.factory.id, q)
        .await
        .unwrap();
    app.state
        .stage_flow
        .dispatch_to_jsr(wo.id, app.factory.id, q, Some(TestApp::destination()))
        .await
        .unwrap();

    // Custody is at JSR, but no units have been received there yet.
    let err = app
        .state
        .stage_flow
        .approve_jsr(wo.id, app.jsr.id, TestApp::artifacts())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidOperation(_)));
    assert!(err.to_string().contains("No JSR entry"), "{}", err);
}

#[tokio::test]
async fn leaf_stages_never_dispatch() {
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

    // There is no farmer dispatch method on the service; the underlying
    // transition refuses leaf dispatch outright.
    let db = app.state.db.clone();
    let txn = sea_orm::TransactionTrait::begin(db.as_ref()).await.unwrap();
    let err = pumptrack_api::stages::transition::dispatch(
        &txn,
        pumptrack_api::stages::StageId::Farmer,
        wo.id,
        app.farmer.id,
        q,
        None,
    )
    .await
    .unwrap_err();
    txn.rollback().await.unwrap();
    assert!(matches!(err, ServiceError::InvalidOperation(_)));
    assert!(err.to_string().contains("leaf custodian"), "{}", err);
}

#[tokio::test]
async fn receive_before_any_upstream_dispatch_is_refused() {
    let app = TestApp::new().await;
    let wo = app.create_work_order(18, 6, 6, 6).await;
    let q = TestApp::totals(&wo);

    app.state
        .stage_flow
        .record_manufacturing(wo.id, app.factory.id, q)
        .await
        .unwrap();

    // Still at factory custody: the JSR receive fails on the gate, naming
    // the stage it requires.
    let err = app
        .state
        .stage_flow
        .receive_at_jsr(wo.id, app.jsr.id, q)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidOperation(_)));
    assert_eq!(
        app.state
            .work_orders
            .get_work_order(wo.id)
            .await
            .unwrap()
            .current_stage,
        CurrentStage::Factory
    );
}
