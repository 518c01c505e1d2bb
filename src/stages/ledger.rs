use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entities::stage_status::{EntryStatus, FarmerStatus};
use crate::entities::{
    contractor_entry, cp_entry, factory_entry, farmer_entry, inspection_entry, jsr_entry,
    warehouse_entry,
};
use crate::errors::ServiceError;
use crate::stages::quantities::QuantitySet;
use crate::stages::StageId;

/// Uniform view of one stage's ledger entry. The factory's manufactured
/// quantities surface as `received`; leaf stages always report zero
/// `forwarded`.
#[derive(Debug, Clone)]
pub struct LedgerRow {
    pub id: Uuid,
    pub work_order_id: Uuid,
    pub received: QuantitySet,
    pub forwarded: QuantitySet,
    pub status: EntryStatus,
}

impl LedgerRow {
    pub fn remaining(&self) -> QuantitySet {
        self.received - self.forwarded
    }
}

/// Data for a first receive at a stage.
#[derive(Debug, Clone)]
pub struct NewLedgerRow {
    pub work_order_id: Uuid,
    pub upstream_entry_id: Option<Uuid>,
    pub received: QuantitySet,
    pub status: EntryStatus,
}

/// One stage's persistence operations, uniform across the seven concrete
/// tables so the transition routine is written once. All writes run inside
/// the caller's transaction.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    fn stage(&self) -> StageId;

    async fn find(
        &self,
        txn: &DatabaseTransaction,
        work_order_id: Uuid,
    ) -> Result<Option<LedgerRow>, ServiceError>;

    async fn insert(
        &self,
        txn: &DatabaseTransaction,
        row: NewLedgerRow,
    ) -> Result<LedgerRow, ServiceError>;

    /// Overwrites the cumulative received quantities and status.
    async fn set_received(
        &self,
        txn: &DatabaseTransaction,
        id: Uuid,
        received: QuantitySet,
        status: EntryStatus,
    ) -> Result<(), ServiceError>;

    /// Overwrites the cumulative forwarded quantities and status.
    async fn set_forwarded(
        &self,
        txn: &DatabaseTransaction,
        id: Uuid,
        forwarded: QuantitySet,
        status: EntryStatus,
    ) -> Result<(), ServiceError>;
}

/// The ledger store for a stage, if it has one.
pub fn store_for(stage: StageId) -> Option<&'static dyn LedgerStore> {
    match stage {
        StageId::AdminCreated => None,
        StageId::Factory => Some(&FactoryLedger),
        StageId::Jsr => Some(&JsrLedger),
        StageId::Warehouse => Some(&WarehouseLedger),
        StageId::Cp => Some(&CpLedger),
        StageId::Contractor => Some(&ContractorLedger),
        StageId::Farmer => Some(&FarmerLedger),
        StageId::Inspection => Some(&InspectionLedger),
    }
}

fn missing_upstream_id(stage: &str) -> ServiceError {
    ServiceError::InternalError(format!("{} entry requires its upstream entry id", stage))
}

fn leaf_never_dispatches(stage: &str) -> ServiceError {
    ServiceError::InternalError(format!("{} stage does not dispatch", stage))
}

pub struct FactoryLedger;

#[async_trait]
impl LedgerStore for FactoryLedger {
    fn stage(&self) -> StageId {
        StageId::Factory
    }

    async fn find(
        &self,
        txn: &DatabaseTransaction,
        work_order_id: Uuid,
    ) -> Result<Option<LedgerRow>, ServiceError> {
        let entry = factory_entry::Entity::find()
            .filter(factory_entry::Column::WorkOrderId.eq(work_order_id))
            .one(txn)
            .await?;
        Ok(entry.map(|m| LedgerRow {
            id: m.id,
            work_order_id: m.work_order_id,
            received: QuantitySet::new(
                m.manufactured_total,
                m.manufactured_hp_3,
                m.manufactured_hp_5,
                m.manufactured_hp_7_5,
            ),
            forwarded: QuantitySet::new(
                m.forwarded_total,
                m.forwarded_hp_3,
                m.forwarded_hp_5,
                m.forwarded_hp_7_5,
            ),
            status: m.status,
        }))
    }

    async fn insert(
        &self,
        txn: &DatabaseTransaction,
        row: NewLedgerRow,
    ) -> Result<LedgerRow, ServiceError> {
        let now = Utc::now();
        let model = factory_entry::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_order_id: Set(row.work_order_id),
            manufactured_total: Set(row.received.total),
            manufactured_hp_3: Set(row.received.hp_3),
            manufactured_hp_5: Set(row.received.hp_5),
            manufactured_hp_7_5: Set(row.received.hp_7_5),
            forwarded_total: Set(0),
            forwarded_hp_3: Set(0),
            forwarded_hp_5: Set(0),
            forwarded_hp_7_5: Set(0),
            status: Set(row.status),
            dispatch_state: Set(None),
            dispatch_district: Set(None),
            dispatch_taluka: Set(None),
            dispatch_village: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(txn)
        .await?;
        Ok(LedgerRow {
            id: model.id,
            work_order_id: model.work_order_id,
            received: row.received,
            forwarded: QuantitySet::ZERO,
            status: model.status,
        })
    }

    async fn set_received(
        &self,
        txn: &DatabaseTransaction,
        id: Uuid,
        received: QuantitySet,
        status: EntryStatus,
    ) -> Result<(), ServiceError> {
        let model = factory_entry::Entity::find_by_id(id)
            .one(txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("factory entry {} not found", id)))?;
        let mut active: factory_entry::ActiveModel = model.into();
        active.manufactured_total = Set(received.total);
        active.manufactured_hp_3 = Set(received.hp_3);
        active.manufactured_hp_5 = Set(received.hp_5);
        active.manufactured_hp_7_5 = Set(received.hp_7_5);
        active.status = Set(status);
        active.updated_at = Set(Utc::now());
        active.update(txn).await?;
        Ok(())
    }

    async fn set_forwarded(
        &self,
        txn: &DatabaseTransaction,
        id: Uuid,
        forwarded: QuantitySet,
        status: EntryStatus,
    ) -> Result<(), ServiceError> {
        let model = factory_entry::Entity::find_by_id(id)
            .one(txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("factory entry {} not found", id)))?;
        let mut active: factory_entry::ActiveModel = model.into();
        active.forwarded_total = Set(forwarded.total);
        active.forwarded_hp_3 = Set(forwarded.hp_3);
        active.forwarded_hp_5 = Set(forwarded.hp_5);
        active.forwarded_hp_7_5 = Set(forwarded.hp_7_5);
        active.status = Set(status);
        active.updated_at = Set(Utc::now());
        active.update(txn).await?;
        Ok(())
    }
}

pub struct JsrLedger;

#[async_trait]
impl LedgerStore for JsrLedger {
    fn stage(&self) -> StageId {
        StageId::Jsr
    }

    async fn find(
        &self,
        txn: &DatabaseTransaction,
        work_order_id: Uuid,
    ) -> Result<Option<LedgerRow>, ServiceError> {
        let entry = jsr_entry::Entity::find()
            .filter(jsr_entry::Column::WorkOrderId.eq(work_order_id))
            .one(txn)
            .await?;
        Ok(entry.map(|m| LedgerRow {
            id: m.id,
            work_order_id: m.work_order_id,
            received: QuantitySet::new(
                m.received_total,
                m.received_hp_3,
                m.received_hp_5,
                m.received_hp_7_5,
            ),
            forwarded: QuantitySet::new(
                m.forwarded_total,
                m.forwarded_hp_3,
                m.forwarded_hp_5,
                m.forwarded_hp_7_5,
            ),
            status: m.status,
        }))
    }

    async fn insert(
        &self,
        txn: &DatabaseTransaction,
        row: NewLedgerRow,
    ) -> Result<LedgerRow, ServiceError> {
        let now = Utc::now();
        let factory_entry_id = row.upstream_entry_id.ok_or_else(|| missing_upstream_id("jsr"))?;
        let model = jsr_entry::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_order_id: Set(row.work_order_id),
            factory_entry_id: Set(factory_entry_id),
            received_total: Set(row.received.total),
            received_hp_3: Set(row.received.hp_3),
            received_hp_5: Set(row.received.hp_5),
            received_hp_7_5: Set(row.received.hp_7_5),
            forwarded_total: Set(0),
            forwarded_hp_3: Set(0),
            forwarded_hp_5: Set(0),
            forwarded_hp_7_5: Set(0),
            status: Set(row.status),
            farmer_name: Set(None),
            state: Set(None),
            district: Set(None),
            taluka: Set(None),
            village: Set(None),
            photo_1: Set(None),
            photo_2: Set(None),
            photo_3: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(txn)
        .await?;
        Ok(LedgerRow {
            id: model.id,
            work_order_id: model.work_order_id,
            received: row.received,
            forwarded: QuantitySet::ZERO,
            status: model.status,
        })
    }

    async fn set_received(
        &self,
        txn: &DatabaseTransaction,
        id: Uuid,
        received: QuantitySet,
        status: EntryStatus,
    ) -> Result<(), ServiceError> {
        let model = jsr_entry::Entity::find_by_id(id)
            .one(txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("jsr entry {} not found", id)))?;
        let mut active: jsr_entry::ActiveModel = model.into();
        active.received_total = Set(received.total);
        active.received_hp_3 = Set(received.hp_3);
        active.received_hp_5 = Set(received.hp_5);
        active.received_hp_7_5 = Set(received.hp_7_5);
        active.status = Set(status);
        active.updated_at = Set(Utc::now());
        active.update(txn).await?;
        Ok(())
    }

    async fn set_forwarded(
        &self,
        txn: &DatabaseTransaction,
        id: Uuid,
        forwarded: QuantitySet,
        status: EntryStatus,
    ) -> Result<(), ServiceError> {
        let model = jsr_entry::Entity::find_by_id(id)
            .one(txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("jsr entry {} not found", id)))?;
        let mut active: jsr_entry::ActiveModel = model.into();
        active.forwarded_total = Set(forwarded.total);
        active.forwarded_hp_3 = Set(forwarded.hp_3);
        active.forwarded_hp_5 = Set(forwarded.hp_5);
        active.forwarded_hp_7_5 = Set(forwarded.hp_7_5);
        active.status = Set(status);
        active.updated_at = Set(Utc::now());
        active.update(txn).await?;
        Ok(())
    }
}

pub struct WarehouseLedger;

#[async_trait]
impl LedgerStore for WarehouseLedger {
    fn stage(&self) -> StageId {
        StageId::Warehouse
    }

    async fn find(
        &self,
        txn: &DatabaseTransaction,
        work_order_id: Uuid,
    ) -> Result<Option<LedgerRow>, ServiceError> {
        let entry = warehouse_entry::Entity::find()
            .filter(warehouse_entry::Column::WorkOrderId.eq(work_order_id))
            .one(txn)
            .await?;
        Ok(entry.map(|m| LedgerRow {
            id: m.id,
            work_order_id: m.work_order_id,
            received: QuantitySet::new(
                m.received_total,
                m.received_hp_3,
                m.received_hp_5,
                m.received_hp_7_5,
            ),
            forwarded: QuantitySet::new(
                m.forwarded_total,
                m.forwarded_hp_3,
                m.forwarded_hp_5,
                m.forwarded_hp_7_5,
            ),
            status: m.status,
        }))
    }

    async fn insert(
        &self,
        txn: &DatabaseTransaction,
        row: NewLedgerRow,
    ) -> Result<LedgerRow, ServiceError> {
        let now = Utc::now();
        let jsr_entry_id = row
            .upstream_entry_id
            .ok_or_else(|| missing_upstream_id("warehouse"))?;
        let model = warehouse_entry::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_order_id: Set(row.work_order_id),
            jsr_entry_id: Set(jsr_entry_id),
            received_total: Set(row.received.total),
            received_hp_3: Set(row.received.hp_3),
            received_hp_5: Set(row.received.hp_5),
            received_hp_7_5: Set(row.received.hp_7_5),
            forwarded_total: Set(0),
            forwarded_hp_3: Set(0),
            forwarded_hp_5: Set(0),
            forwarded_hp_7_5: Set(0),
            status: Set(row.status),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(txn)
        .await?;
        Ok(LedgerRow {
            id: model.id,
            work_order_id: model.work_order_id,
            received: row.received,
            forwarded: QuantitySet::ZERO,
            status: model.status,
        })
    }

    async fn set_received(
        &self,
        txn: &DatabaseTransaction,
        id: Uuid,
        received: QuantitySet,
        status: EntryStatus,
    ) -> Result<(), ServiceError> {
        let model = warehouse_entry::Entity::find_by_id(id)
            .one(txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("warehouse entry {} not found", id)))?;
        let mut active: warehouse_entry::ActiveModel = model.into();
        active.received_total = Set(received.total);
        active.received_hp_3 = Set(received.hp_3);
        active.received_hp_5 = Set(received.hp_5);
        active.received_hp_7_5 = Set(received.hp_7_5);
        active.status = Set(status);
        active.updated_at = Set(Utc::now());
        active.update(txn).await?;
        Ok(())
    }

    async fn set_forwarded(
        &self,
        txn: &DatabaseTransaction,
        id: Uuid,
        forwarded: QuantitySet,
        status: EntryStatus,
    ) -> Result<(), ServiceError> {
        let model = warehouse_entry::Entity::find_by_id(id)
            .one(txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("warehouse entry {} not found", id)))?;
        let mut active: warehouse_entry::ActiveModel = model.into();
        active.forwarded_total = Set(forwarded.total);
        active.forwarded_hp_3 = Set(forwarded.hp_3);
        active.forwarded_hp_5 = Set(forwarded.hp_5);
        active.forwarded_hp_7_5 = Set(forwarded.hp_7_5);
        active.status = Set(status);
        active.updated_at = Set(Utc::now());
        active.update(txn).await?;
        Ok(())
    }
}

pub struct CpLedger;

#[async_trait]
impl LedgerStore for CpLedger {
    fn stage(&self) -> StageId {
        StageId::Cp
    }

    async fn find(
        &self,
        txn: &DatabaseTransaction,
        work_order_id: Uuid,
    ) -> Result<Option<LedgerRow>, ServiceError> {
        let entry = cp_entry::Entity::find()
            .filter(cp_entry::Column::WorkOrderId.eq(work_order_id))
            .one(txn)
            .await?;
        Ok(entry.map(|m| LedgerRow {
            id: m.id,
            work_order_id: m.work_order_id,
            received: QuantitySet::new(
                m.received_total,
                m.received_hp_3,
                m.received_hp_5,
                m.received_hp_7_5,
            ),
            forwarded: QuantitySet::new(
                m.forwarded_total,
                m.forwarded_hp_3,
                m.forwarded_hp_5,
                m.forwarded_hp_7_5,
            ),
            status: m.status,
        }))
    }

    async fn insert(
        &self,
        txn: &DatabaseTransaction,
        row: NewLedgerRow,
    ) -> Result<LedgerRow, ServiceError> {
        let now = Utc::now();
        let warehouse_entry_id =
            row.upstream_entry_id.ok_or_else(|| missing_upstream_id("cp"))?;
        let model = cp_entry::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_order_id: Set(row.work_order_id),
            warehouse_entry_id: Set(warehouse_entry_id),
            received_total: Set(row.received.total),
            received_hp_3: Set(row.received.hp_3),
            received_hp_5: Set(row.received.hp_5),
            received_hp_7_5: Set(row.received.hp_7_5),
            forwarded_total: Set(0),
            forwarded_hp_3: Set(0),
            forwarded_hp_5: Set(0),
            forwarded_hp_7_5: Set(0),
            status: Set(row.status),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(txn)
        .await?;
        Ok(LedgerRow {
            id: model.id,
            work_order_id: model.work_order_id,
            received: row.received,
            forwarded: QuantitySet::ZERO,
            status: model.status,
        })
    }

    async fn set_received(
        &self,
        txn: &DatabaseTransaction,
        id: Uuid,
        received: QuantitySet,
        status: EntryStatus,
    ) -> Result<(), ServiceError> {
        let model = cp_entry::Entity::find_by_id(id)
            .one(txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("cp entry {} not found", id)))?;
        let mut active: cp_entry::ActiveModel = model.into();
        active.received_total = Set(received.total);
        active.received_hp_3 = Set(received.hp_3);
        active.received_hp_5 = Set(received.hp_5);
        active.received_hp_7_5 = Set(received.hp_7_5);
        active.status = Set(status);
        active.updated_at = Set(Utc::now());
        active.update(txn).await?;
        Ok(())
    }

    async fn set_forwarded(
        &self,
        txn: &DatabaseTransaction,
        id: Uuid,
        forwarded: QuantitySet,
        status: EntryStatus,
    ) -> Result<(), ServiceError> {
        let model = cp_entry::Entity::find_by_id(id)
            .one(txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("cp entry {} not found", id)))?;
        let mut active: cp_entry::ActiveModel = model.into();
        active.forwarded_total = Set(forwarded.total);
        active.forwarded_hp_3 = Set(forwarded.hp_3);
        active.forwarded_hp_5 = Set(forwarded.hp_5);
        active.forwarded_hp_7_5 = Set(forwarded.hp_7_5);
        active.status = Set(status);
        active.updated_at = Set(Utc::now());
        active.update(txn).await?;
        Ok(())
    }
}

pub struct ContractorLedger;

#[async_trait]
impl LedgerStore for ContractorLedger {
    fn stage(&self) -> StageId {
        StageId::Contractor
    }

    async fn find(
        &self,
        txn: &DatabaseTransaction,
        work_order_id: Uuid,
    ) -> Result<Option<LedgerRow>, ServiceError> {
        let entry = contractor_entry::Entity::find()
            .filter(contractor_entry::Column::WorkOrderId.eq(work_order_id))
            .one(txn)
            .await?;
        Ok(entry.map(|m| LedgerRow {
            id: m.id,
            work_order_id: m.work_order_id,
            received: QuantitySet::new(
                m.received_total,
                m.received_hp_3,
                m.received_hp_5,
                m.received_hp_7_5,
            ),
            forwarded: QuantitySet::new(
                m.forwarded_total,
                m.forwarded_hp_3,
                m.forwarded_hp_5,
                m.forwarded_hp_7_5,
            ),
            status: m.status,
        }))
    }

    async fn insert(
        &self,
        txn: &DatabaseTransaction,
        row: NewLedgerRow,
    ) -> Result<LedgerRow, ServiceError> {
        let now = Utc::now();
        let cp_entry_id = row
            .upstream_entry_id
            .ok_or_else(|| missing_upstream_id("contractor"))?;
        let model = contractor_entry::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_order_id: Set(row.work_order_id),
            cp_entry_id: Set(cp_entry_id),
            received_total: Set(row.received.total),
            received_hp_3: Set(row.received.hp_3),
            received_hp_5: Set(row.received.hp_5),
            received_hp_7_5: Set(row.received.hp_7_5),
            forwarded_total: Set(0),
            forwarded_hp_3: Set(0),
            forwarded_hp_5: Set(0),
            forwarded_hp_7_5: Set(0),
            status: Set(row.status),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(txn)
        .await?;
        Ok(LedgerRow {
            id: model.id,
            work_order_id: model.work_order_id,
            received: row.received,
            forwarded: QuantitySet::ZERO,
            status: model.status,
        })
    }

    async fn set_received(
        &self,
        txn: &DatabaseTransaction,
        id: Uuid,
        received: QuantitySet,
        status: EntryStatus,
    ) -> Result<(), ServiceError> {
        let model = contractor_entry::Entity::find_by_id(id)
            .one(txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("contractor entry {} not found", id)))?;
        let mut active: contractor_entry::ActiveModel = model.into();
        active.received_total = Set(received.total);
        active.received_hp_3 = Set(received.hp_3);
        active.received_hp_5 = Set(received.hp_5);
        active.received_hp_7_5 = Set(received.hp_7_5);
        active.status = Set(status);
        active.updated_at = Set(Utc::now());
        active.update(txn).await?;
        Ok(())
    }

    async fn set_forwarded(
        &self,
        txn: &DatabaseTransaction,
        id: Uuid,
        forwarded: QuantitySet,
        status: EntryStatus,
    ) -> Result<(), ServiceError> {
        let model = contractor_entry::Entity::find_by_id(id)
            .one(txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("contractor entry {} not found", id)))?;
        let mut active: contractor_entry::ActiveModel = model.into();
        active.forwarded_total = Set(forwarded.total);
        active.forwarded_hp_3 = Set(forwarded.hp_3);
        active.forwarded_hp_5 = Set(forwarded.hp_5);
        active.forwarded_hp_7_5 = Set(forwarded.hp_7_5);
        active.status = Set(status);
        active.updated_at = Set(Utc::now());
        active.update(txn).await?;
        Ok(())
    }
}

pub struct FarmerLedger;

#[async_trait]
impl LedgerStore for FarmerLedger {
    fn stage(&self) -> StageId {
        StageId::Farmer
    }

    async fn find(
        &self,
        txn: &DatabaseTransaction,
        work_order_id: Uuid,
    ) -> Result<Option<LedgerRow>, ServiceError> {
        let entry = farmer_entry::Entity::find()
            .filter(farmer_entry::Column::WorkOrderId.eq(work_order_id))
            .one(txn)
            .await?;
        Ok(entry.map(|m| LedgerRow {
            id: m.id,
            work_order_id: m.work_order_id,
            received: QuantitySet::new(
                m.received_total,
                m.received_hp_3,
                m.received_hp_5,
                m.received_hp_7_5,
            ),
            forwarded: QuantitySet::ZERO,
            status: m.status,
        }))
    }

    async fn insert(
        &self,
        txn: &DatabaseTransaction,
        row: NewLedgerRow,
    ) -> Result<LedgerRow, ServiceError> {
        let now = Utc::now();
        let contractor_entry_id = row
            .upstream_entry_id
            .ok_or_else(|| missing_upstream_id("farmer"))?;
        let model = farmer_entry::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_order_id: Set(row.work_order_id),
            contractor_entry_id: Set(contractor_entry_id),
            received_total: Set(row.received.total),
            received_hp_3: Set(row.received.hp_3),
            received_hp_5: Set(row.received.hp_5),
            received_hp_7_5: Set(row.received.hp_7_5),
            status: Set(row.status),
            farmer_status: Set(FarmerStatus::UnitsReceived),
            issue_title: Set(None),
            issue_description: Set(None),
            photo_1: Set(None),
            photo_2: Set(None),
            photo_3: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(txn)
        .await?;
        Ok(LedgerRow {
            id: model.id,
            work_order_id: model.work_order_id,
            received: row.received,
            forwarded: QuantitySet::ZERO,
            status: model.status,
        })
    }

    async fn set_received(
        &self,
        txn: &DatabaseTransaction,
        id: Uuid,
        received: QuantitySet,
        status: EntryStatus,
    ) -> Result<(), ServiceError> {
        let model = farmer_entry::Entity::find_by_id(id)
            .one(txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("farmer entry {} not found", id)))?;
        let mut active: farmer_entry::ActiveModel = model.into();
        active.received_total = Set(received.total);
        active.received_hp_3 = Set(received.hp_3);
        active.received_hp_5 = Set(received.hp_5);
        active.received_hp_7_5 = Set(received.hp_7_5);
        active.status = Set(status);
        active.updated_at = Set(Utc::now());
        active.update(txn).await?;
        Ok(())
    }

    async fn set_forwarded(
        &self,
        _txn: &DatabaseTransaction,
        _id: Uuid,
        _forwarded: QuantitySet,
        _status: EntryStatus,
    ) -> Result<(), ServiceError> {
        Err(leaf_never_dispatches("farmer"))
    }
}

pub struct InspectionLedger;

#[async_trait]
impl LedgerStore for InspectionLedger {
    fn stage(&self) -> StageId {
        StageId::Inspection
    }

    async fn find(
        &self,
        txn: &DatabaseTransaction,
        work_order_id: Uuid,
    ) -> Result<Option<LedgerRow>, ServiceError> {
        let entry = inspection_entry::Entity::find()
            .filter(inspection_entry::Column::WorkOrderId.eq(work_order_id))
            .one(txn)
            .await?;
        Ok(entry.map(|m| LedgerRow {
            id: m.id,
            work_order_id: m.work_order_id,
            received: QuantitySet::new(
                m.received_total,
                m.received_hp_3,
                m.received_hp_5,
                m.received_hp_7_5,
            ),
            forwarded: QuantitySet::ZERO,
            status: m.status,
        }))
    }

    async fn insert(
        &self,
        txn: &DatabaseTransaction,
        row: NewLedgerRow,
    ) -> Result<LedgerRow, ServiceError> {
        let now = Utc::now();
        let contractor_entry_id = row
            .upstream_entry_id
            .ok_or_else(|| missing_upstream_id("inspection"))?;
        let model = inspection_entry::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_order_id: Set(row.work_order_id),
            contractor_entry_id: Set(contractor_entry_id),
            received_total: Set(row.received.total),
            received_hp_3: Set(row.received.hp_3),
            received_hp_5: Set(row.received.hp_5),
            received_hp_7_5: Set(row.received.hp_7_5),
            status: Set(row.status),
            farmer_name: Set(None),
            state: Set(None),
            district: Set(None),
            taluka: Set(None),
            village: Set(None),
            photo_1: Set(None),
            photo_2: Set(None),
            photo_3: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(txn)
        .await?;
        Ok(LedgerRow {
            id: model.id,
            work_order_id: model.work_order_id,
            received: row.received,
            forwarded: QuantitySet::ZERO,
            status: model.status,
        })
    }

    async fn set_received(
        &self,
        txn: &DatabaseTransaction,
        id: Uuid,
        received: QuantitySet,
        status: EntryStatus,
    ) -> Result<(), ServiceError> {
        let model = inspection_entry::Entity::find_by_id(id)
            .one(txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("inspection entry {} not found", id)))?;
        let mut active: inspection_entry::ActiveModel = model.into();
        active.received_total = Set(received.total);
        active.received_hp_3 = Set(received.hp_3);
        active.received_hp_5 = Set(received.hp_5);
        active.received_hp_7_5 = Set(received.hp_7_5);
        active.status = Set(status);
        active.updated_at = Set(Utc::now());
        active.update(txn).await?;
        Ok(())
    }

    async fn set_forwarded(
        &self,
        _txn: &DatabaseTransaction,
        _id: Uuid,
        _forwarded: QuantitySet,
        _status: EntryStatus,
    ) -> Result<(), ServiceError> {
        Err(leaf_never_dispatches("inspection"))
    }
}
