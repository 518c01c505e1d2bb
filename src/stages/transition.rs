//! The single cumulative receive/dispatch routine. Every stage hand-off in
//! the pipeline is one of three entry points here, parameterized by the
//! stage metadata table: `record_manufacturing` (factory origin),
//! `dispatch` (any forwarding stage), `receive` (any stage with an
//! upstream). Callers hold the per-work-order lock and supply the open
//! transaction; events and notifications happen after commit, outside.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseTransaction, Set};
use uuid::Uuid;

use crate::entities::stage_status::EntryStatus;
use crate::entities::work_order::CurrentStage;
use crate::entities::{factory_entry, user, work_order};
use crate::errors::ServiceError;
use crate::stages::ledger::{store_for, LedgerRow, LedgerStore, NewLedgerRow};
use crate::stages::quantities::QuantitySet;
use crate::stages::{admin_totals, machine, records, validate, StageId};

/// Destination the factory declares on its first dispatch to JSR; the
/// receiving verifier's location must match it exactly.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DispatchDestination {
    pub state: String,
    pub district: String,
    pub taluka: String,
    pub village: String,
}

#[derive(Debug)]
pub struct ReceiveOutcome {
    pub work_order: work_order::Model,
    pub acting_user: user::Model,
    pub entry: LedgerRow,
    /// Both fan-out branches resolved; the work order just completed.
    pub work_order_completed: bool,
}

#[derive(Debug)]
pub struct DispatchOutcome {
    pub work_order: work_order::Model,
    pub acting_user: user::Model,
    pub entry: LedgerRow,
    pub all_dispatched: bool,
    /// Set when the custody pointer moved, for stage-advanced notifications.
    pub advanced_from: Option<CurrentStage>,
}

#[derive(Debug)]
pub struct ManufactureOutcome {
    pub work_order: work_order::Model,
    pub acting_user: user::Model,
    pub entry: LedgerRow,
    pub remaining_to_manufacture: QuantitySet,
    /// Set on the first entry, when admin_created flips to factory.
    pub advanced_from: Option<CurrentStage>,
}

fn ledger_store(stage: StageId) -> Result<&'static dyn LedgerStore, ServiceError> {
    store_for(stage).ok_or_else(|| {
        ServiceError::InternalError(format!(
            "{} stage has no quantity ledger",
            stage.record_name()
        ))
    })
}

/// Factory manufacturing entry: cumulative, validated against the work
/// order's admin-set totals rather than an upstream ledger. The first entry
/// is what moves a fresh work order out of admin_created.
pub async fn record_manufacturing(
    txn: &DatabaseTransaction,
    work_order_id: Uuid,
    acting_user_id: Uuid,
    quantity: QuantitySet,
) -> Result<ManufactureOutcome, ServiceError> {
    quantity.validate_movement()?;

    let spec = StageId::Factory.spec();
    let work_order = validate::load_work_order(txn, work_order_id).await?;
    validate::ensure_stage_gate(&work_order, spec.receive_gates, "manufacturing")?;
    let acting_user = validate::load_acting_user(txn, acting_user_id).await?;
    validate::ensure_role(&acting_user, spec)?;

    let totals = admin_totals(&work_order);
    let store = ledger_store(StageId::Factory)?;
    let existing = store.find(txn, work_order.id).await?;

    let manufactured_so_far = existing
        .as_ref()
        .map(|row| row.received)
        .unwrap_or(QuantitySet::ZERO);
    let new_manufactured = manufactured_so_far + quantity;

    if let Some(excess) = new_manufactured.first_excess(&totals) {
        return Err(ServiceError::InsufficientQuantity(format!(
            "cannot manufacture {} more units of {}: cumulative manufactured would be {} but the work order totals allow {}",
            quantity.total, excess.bucket, excess.attempted, excess.available
        )));
    }

    let entry = match existing {
        Some(row) => {
            store
                .set_received(txn, row.id, new_manufactured, row.status.clone())
                .await?;
            LedgerRow {
                received: new_manufactured,
                ..row
            }
        }
        None => {
            store
                .insert(
                    txn,
                    NewLedgerRow {
                        work_order_id: work_order.id,
                        upstream_entry_id: None,
                        received: new_manufactured,
                        status: EntryStatus::UnitsReceived,
                    },
                )
                .await?
        }
    };

    records::mark_in_progress(txn, work_order.id, StageId::Factory, Some(acting_user.id)).await?;
    let remaining = totals - new_manufactured;
    records::set_notes(
        txn,
        work_order.id,
        StageId::Factory,
        format!(
            "{} of {} units manufactured; {} remaining to manufacture",
            new_manufactured.total, totals.total, remaining.total
        ),
    )
    .await?;

    let mut advanced_from = None;
    let work_order = if work_order.current_stage == CurrentStage::AdminCreated {
        advanced_from = Some(CurrentStage::AdminCreated);
        machine::set_current_stage(txn, work_order, CurrentStage::Factory).await?
    } else {
        work_order
    };

    Ok(ManufactureOutcome {
        work_order,
        acting_user,
        entry,
        remaining_to_manufacture: remaining,
        advanced_from,
    })
}

/// Cumulative dispatch from any forwarding stage. Capped per bucket by the
/// stage's own received pool; completion is reached when cumulative
/// forwarded covers the work order's admin totals, which also forces the
/// factory's two conditions (everything manufactured and everything sent).
pub async fn dispatch(
    txn: &DatabaseTransaction,
    stage: StageId,
    work_order_id: Uuid,
    acting_user_id: Uuid,
    quantity: QuantitySet,
    destination: Option<DispatchDestination>,
) -> Result<DispatchOutcome, ServiceError> {
    quantity.validate_movement()?;

    let spec = stage.spec();
    let partial_status = spec.dispatch_status.clone().ok_or_else(|| {
        ServiceError::InvalidOperation(format!(
            "The {} stage is a leaf custodian and does not dispatch",
            spec.display_name
        ))
    })?;
    let advance_to = spec.advance_to.ok_or_else(|| {
        ServiceError::InternalError(format!("{} stage has no advance target", spec.record_name))
    })?;

    let work_order = validate::load_work_order(txn, work_order_id).await?;
    validate::ensure_stage_gate(
        &work_order,
        spec.dispatch_gates,
        &format!("{} dispatch", spec.display_name),
    )?;
    let acting_user = validate::load_acting_user(txn, acting_user_id).await?;
    validate::ensure_role(&acting_user, spec)?;

    let store = ledger_store(stage)?;
    let row = store.find(txn, work_order.id).await?.ok_or_else(|| {
        ServiceError::InvalidOperation(format!(
            "The {} stage holds no units for work order {}; receive units before dispatching",
            spec.display_name, work_order.work_order_number
        ))
    })?;

    let new_forwarded = row.forwarded + quantity;
    if let Some(excess) = new_forwarded.first_excess(&row.received) {
        return Err(ServiceError::InsufficientQuantity(format!(
            "cannot dispatch {} units of {} from the {} stage: cumulative dispatched would be {} but only {} are held",
            quantity.total, excess.bucket, spec.display_name, excess.attempted, excess.available
        )));
    }

    if stage == StageId::Factory {
        declare_factory_destination(txn, &row, destination).await?;
    }

    let totals = admin_totals(&work_order);
    let all_dispatched = new_forwarded.covers(&totals);
    let status = if all_dispatched {
        EntryStatus::AllUnitsDispatched
    } else {
        partial_status
    };
    store
        .set_forwarded(txn, row.id, new_forwarded, status.clone())
        .await?;
    let entry = LedgerRow {
        forwarded: new_forwarded,
        status,
        ..row
    };

    let mut advanced_from = None;
    let work_order = if all_dispatched {
        records::mark_completed(txn, work_order.id, stage).await?;
        for downstream in spec.downstream {
            records::mark_in_progress(txn, work_order.id, *downstream, None).await?;
        }
        advanced_from = Some(work_order.current_stage);
        machine::set_current_stage(txn, work_order, advance_to).await?
    } else {
        let remaining = entry.remaining();
        records::set_notes(
            txn,
            work_order.id,
            stage,
            format!(
                "{} of {} units dispatched; {} remaining at the {} stage",
                new_forwarded.total, entry.received.total, remaining.total, spec.display_name
            ),
        )
        .await?;
        work_order
    };

    Ok(DispatchOutcome {
        work_order,
        acting_user,
        entry,
        all_dispatched,
        advanced_from,
    })
}

/// Cumulative receive at any stage with an upstream: validates the custody
/// gate, the acting role, the upstream's committed dispatch, and (for JSR)
/// the dispatch destination location, then adds to the stage's received
/// pool. Leaf receives re-evaluate overall completion.
pub async fn receive(
    txn: &DatabaseTransaction,
    stage: StageId,
    work_order_id: Uuid,
    acting_user_id: Uuid,
    quantity: QuantitySet,
) -> Result<ReceiveOutcome, ServiceError> {
    quantity.validate_movement()?;

    let spec = stage.spec();
    if spec.upstream.is_none() {
        return Err(ServiceError::InvalidOperation(format!(
            "The {} stage does not receive from an upstream ledger",
            spec.display_name
        )));
    }

    let work_order = validate::load_work_order(txn, work_order_id).await?;
    validate::ensure_stage_gate(
        &work_order,
        spec.receive_gates,
        &format!("{} receive", spec.display_name),
    )?;
    let acting_user = validate::load_acting_user(txn, acting_user_id).await?;
    validate::ensure_role(&acting_user, spec)?;

    let upstream_row = validate::load_dispatching_upstream(txn, spec, &work_order).await?;

    if stage == StageId::Jsr {
        let factory = validate::load_factory_entry(txn, work_order.id)
            .await?
            .ok_or_else(|| {
                ServiceError::InvalidOperation(format!(
                    "No factory entry exists for work order {}",
                    work_order.work_order_number
                ))
            })?;
        validate::ensure_jsr_location(&acting_user, &factory)?;
    }

    let store = ledger_store(stage)?;
    let existing = store.find(txn, work_order.id).await?;
    let received_so_far = existing
        .as_ref()
        .map(|row| row.received)
        .unwrap_or(QuantitySet::ZERO);
    let new_received = received_so_far + quantity;

    if let Some(excess) = new_received.first_excess(&upstream_row.forwarded) {
        return Err(ServiceError::InsufficientQuantity(format!(
            "cannot receive {} units of {} at the {} stage: cumulative received would be {} but the upstream has only dispatched {}",
            quantity.total, excess.bucket, spec.display_name, excess.attempted, excess.available
        )));
    }

    let entry = match existing {
        Some(row) => {
            store
                .set_received(txn, row.id, new_received, row.status.clone())
                .await?;
            LedgerRow {
                received: new_received,
                ..row
            }
        }
        None => {
            store
                .insert(
                    txn,
                    NewLedgerRow {
                        work_order_id: work_order.id,
                        upstream_entry_id: Some(upstream_row.id),
                        received: new_received,
                        status: EntryStatus::UnitsReceived,
                    },
                )
                .await?
        }
    };

    records::mark_in_progress(txn, work_order.id, stage, Some(acting_user.id)).await?;

    let (work_order, work_order_completed) =
        if matches!(stage, StageId::Farmer | StageId::Inspection) {
            machine::try_complete(txn, work_order).await?
        } else {
            (work_order, false)
        };

    Ok(ReceiveOutcome {
        work_order,
        acting_user,
        entry,
        work_order_completed,
    })
}

/// Persists the factory's declared dispatch destination. Required with the
/// first dispatch; later partial dispatches go to the same destination and
/// may omit it (a differing re-declaration is rejected).
async fn declare_factory_destination(
    txn: &DatabaseTransaction,
    row: &LedgerRow,
    destination: Option<DispatchDestination>,
) -> Result<(), ServiceError> {
    let factory = validate::load_factory_entry(txn, row.work_order_id)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!(
                "factory entry for work order {} not found",
                row.work_order_id
            ))
        })?;

    match (&factory.dispatch_state, destination) {
        (None, Some(dest)) => {
            let mut active: factory_entry::ActiveModel = factory.into();
            active.dispatch_state = Set(Some(dest.state));
            active.dispatch_district = Set(Some(dest.district));
            active.dispatch_taluka = Set(Some(dest.taluka));
            active.dispatch_village = Set(Some(dest.village));
            active.updated_at = Set(Utc::now());
            active.update(txn).await?;
            Ok(())
        }
        (None, None) => Err(ServiceError::ValidationError(
            "the first factory dispatch must declare a destination location (state, district, taluka, village)"
                .to_string(),
        )),
        (Some(_), None) => Ok(()),
        (Some(declared_state), Some(dest)) => {
            let declared = DispatchDestination {
                state: declared_state.clone(),
                district: factory.dispatch_district.clone().unwrap_or_default(),
                taluka: factory.dispatch_taluka.clone().unwrap_or_default(),
                village: factory.dispatch_village.clone().unwrap_or_default(),
            };
            if declared == dest {
                Ok(())
            } else {
                Err(ServiceError::InvalidOperation(format!(
                    "dispatch destination is already declared as {}/{}/{}/{}; all partial dispatches go to the same location",
                    declared.state, declared.district, declared.taluka, declared.village
                )))
            }
        }
    }
}
