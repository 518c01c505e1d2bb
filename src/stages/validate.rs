use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::work_order::{CurrentStage, WorkOrderStatus};
use crate::entities::{factory_entry, user, work_order};
use crate::errors::ServiceError;
use crate::stages::ledger::{store_for, LedgerRow};
use crate::stages::StageSpec;

/// Loads a work order and refuses cancelled ones. Every stage operation
/// starts here; nothing is written before these checks pass.
pub async fn load_work_order(
    txn: &DatabaseTransaction,
    work_order_id: Uuid,
) -> Result<work_order::Model, ServiceError> {
    let work_order = work_order::Entity::find_by_id(work_order_id)
        .one(txn)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!("Work order {} not found", work_order_id))
        })?;

    if work_order.status == WorkOrderStatus::Cancelled {
        return Err(ServiceError::InvalidOperation(format!(
            "Work order {} is cancelled; no stage operations are accepted",
            work_order.work_order_number
        )));
    }

    Ok(work_order)
}

/// Custody gate: the operation is only reachable while `current_stage` is one
/// of the values the stage's metadata allows for it.
pub fn ensure_stage_gate(
    work_order: &work_order::Model,
    gates: &[CurrentStage],
    operation: &str,
) -> Result<(), ServiceError> {
    if gates.contains(&work_order.current_stage) {
        return Ok(());
    }

    let expected = gates
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" or ");
    Err(ServiceError::InvalidOperation(format!(
        "Work order {} is at stage '{}'; {} requires stage '{}'",
        work_order.work_order_number,
        work_order.current_stage.as_str(),
        operation,
        expected
    )))
}

/// Fetches the acting principal fresh. Role and location always come from
/// here, never from transport-layer claims.
pub async fn load_acting_user(
    txn: &DatabaseTransaction,
    user_id: Uuid,
) -> Result<user::Model, ServiceError> {
    user::Entity::find_by_id(user_id)
        .one(txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", user_id)))
}

/// Role gate for one stage's operations.
pub fn ensure_role(user: &user::Model, spec: &StageSpec) -> Result<(), ServiceError> {
    if user.role == spec.role {
        return Ok(());
    }
    Err(ServiceError::Forbidden(format!(
        "Only users with role '{}' may perform {} operations; {} has role '{}'",
        spec.role.as_str(),
        spec.display_name,
        user.full_name,
        user.role.as_str()
    )))
}

/// Loads the upstream ledger entry feeding `spec` and checks it has actually
/// dispatched: the entry must exist and its status must be in the stage's
/// accepted dispatch set.
pub async fn load_dispatching_upstream(
    txn: &DatabaseTransaction,
    spec: &StageSpec,
    work_order: &work_order::Model,
) -> Result<LedgerRow, ServiceError> {
    let upstream = spec.upstream.ok_or_else(|| {
        ServiceError::InternalError(format!("{} stage has no upstream ledger", spec.record_name))
    })?;
    let store = store_for(upstream).ok_or_else(|| {
        ServiceError::InternalError(format!("{} stage has no ledger store", upstream.record_name()))
    })?;

    let entry = store.find(txn, work_order.id).await?.ok_or_else(|| {
        ServiceError::InvalidOperation(format!(
            "No {} entry exists for work order {}; nothing has been dispatched to the {} stage",
            upstream.display_name(),
            work_order.work_order_number,
            spec.display_name
        ))
    })?;

    if !spec.accepted_upstream.contains(&entry.status) {
        return Err(ServiceError::InvalidOperation(format!(
            "The {} stage has not dispatched units for work order {} (status is '{}')",
            upstream.display_name(),
            work_order.work_order_number,
            entry.status.as_str()
        )));
    }

    Ok(entry)
}

/// JSR-only secondary authorization: the factory dispatches to a physical
/// location, and the receiving verifier's own assigned location must match it
/// field for field. A mismatch names both locations.
pub fn ensure_jsr_location(
    user: &user::Model,
    factory: &factory_entry::Model,
) -> Result<(), ServiceError> {
    let declared = [
        ("state", &factory.dispatch_state),
        ("district", &factory.dispatch_district),
        ("taluka", &factory.dispatch_taluka),
        ("village", &factory.dispatch_village),
    ];
    let assigned = [&user.state, &user.district, &user.taluka, &user.village];

    for ((field, dispatched), user_value) in declared.iter().zip(assigned.iter()) {
        let dispatched = dispatched.as_deref().ok_or_else(|| {
            ServiceError::InvalidOperation(
                "The factory has not declared a dispatch destination yet".to_string(),
            )
        })?;
        let user_value = user_value.as_deref().unwrap_or("");
        if dispatched != user_value {
            return Err(ServiceError::Forbidden(format!(
                "JSR user location does not match the dispatch destination: dispatch {} is '{}' but the user is assigned to '{}'",
                field, dispatched, user_value
            )));
        }
    }

    Ok(())
}

/// Loads the factory entry directly (for the JSR location gate and for
/// factory-side operations that need the declared destination).
pub async fn load_factory_entry(
    txn: &DatabaseTransaction,
    work_order_id: Uuid,
) -> Result<Option<factory_entry::Model>, ServiceError> {
    Ok(factory_entry::Entity::find()
        .filter(factory_entry::Column::WorkOrderId.eq(work_order_id))
        .one(txn)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::user::Role;
    use crate::entities::work_order::{ApprovalStatus, CurrentStage};
    use crate::stages::StageId;
    use chrono::Utc;

    fn work_order_at(stage: CurrentStage) -> work_order::Model {
        let now = Utc::now();
        work_order::Model {
            id: Uuid::new_v4(),
            work_order_number: "WO01".into(),
            title: "Pumps for Pune".into(),
            region: "West".into(),
            total_quantity: 18,
            hp_3_quantity: 6,
            hp_5_quantity: 6,
            hp_7_5_quantity: 6,
            current_stage: stage,
            status: WorkOrderStatus::Created,
            jsr_approval_status: ApprovalStatus::Pending,
            inspection_approval_status: ApprovalStatus::Pending,
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

    fn user_with(role: Role, district: Option<&str>) -> user::Model {
        user::Model {
            id: Uuid::new_v4(),
            full_name: "Asha Patil".into(),
            email: "asha@example.com".into(),
            role,
            state: Some("Maharashtra".into()),
            district: district.map(Into::into),
            taluka: Some("Haveli".into()),
            village: Some("Wagholi".into()),
            created_at: Utc::now(),
        }
    }

    fn factory_dispatching_to(district: &str) -> factory_entry::Model {
        let now = Utc::now();
        factory_entry::Model {
            id: Uuid::new_v4(),
            work_order_id: Uuid::new_v4(),
            manufactured_total: 18,
            manufactured_hp_3: 6,
            manufactured_hp_5: 6,
            manufactured_hp_7_5: 6,
            forwarded_total: 18,
            forwarded_hp_3: 6,
            forwarded_hp_5: 6,
            forwarded_hp_7_5: 6,
            status: crate::entities::stage_status::EntryStatus::AllUnitsDispatched,
            dispatch_state: Some("Maharashtra".into()),
            dispatch_district: Some(district.into()),
            dispatch_taluka: Some("Haveli".into()),
            dispatch_village: Some("Wagholi".into()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn stage_gate_names_actual_and_expected() {
        let work_order = work_order_at(CurrentStage::Factory);
        let err = ensure_stage_gate(
            &work_order,
            StageId::Cp.spec().dispatch_gates,
            "CP dispatch",
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'factory'"), "{}", msg);
        assert!(msg.contains("'cp'"), "{}", msg);
    }

    #[test]
    fn stage_gate_accepts_any_listed_value() {
        let work_order = work_order_at(CurrentStage::DefectReported);
        assert!(ensure_stage_gate(
            &work_order,
            StageId::Farmer.spec().receive_gates,
            "farmer receive"
        )
        .is_ok());
    }

    #[test]
    fn role_mismatch_is_forbidden() {
        let user = user_with(Role::Contractor, Some("Pune"));
        let err = ensure_role(&user, StageId::Cp.spec()).unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
        assert!(err.to_string().contains("'cp'"));
        assert!(err.to_string().contains("'contractor'"));
    }

    #[test]
    fn jsr_location_mismatch_names_both_districts() {
        let user = user_with(Role::Jsr, Some("Pune"));
        let factory = factory_dispatching_to("Nashik");
        let err = ensure_jsr_location(&user, &factory).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Nashik"), "{}", msg);
        assert!(msg.contains("Pune"), "{}", msg);
    }

    #[test]
    fn jsr_location_exact_match_passes() {
        let user = user_with(Role::Jsr, Some("Pune"));
        let factory = factory_dispatching_to("Pune");
        assert!(ensure_jsr_location(&user, &factory).is_ok());
    }

    #[test]
    fn jsr_receive_requires_declared_destination() {
        let user = user_with(Role::Jsr, Some("Pune"));
        let mut factory = factory_dispatching_to("Pune");
        factory.dispatch_state = None;
        let err = ensure_jsr_location(&user, &factory).unwrap_err();
        assert!(err.to_string().contains("dispatch destination"));
    }
}
