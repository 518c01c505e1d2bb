use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Registry of per-work-order mutexes.
///
/// Every mutating stage operation runs its read-validate-write sequence under
/// the lock for its work order, so two concurrent dispatches against the same
/// ledger row are applied one after the other instead of both reading the same
/// cumulative totals. Operations on different work orders never contend.
#[derive(Clone)]
pub struct WorkOrderLocks(Arc<DashMap<Uuid, Arc<Mutex<()>>>>);

impl Default for WorkOrderLocks {
    fn default() -> Self {
        Self(Arc::new(DashMap::new()))
    }
}

impl WorkOrderLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the mutex for one work order, inserting it on first use.
    /// The returned guard is held for the duration of one command execution.
    pub async fn acquire(&self, work_order_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let entry = self
                .0
                .entry(work_order_id)
                .or_insert_with(|| Arc::new(Mutex::new(())));
            Arc::clone(entry.value())
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_work_order_serializes() {
        let locks = WorkOrderLocks::new();
        let id = Uuid::new_v4();

        let guard = locks.acquire(id).await;
        let blocked =
            tokio::time::timeout(Duration::from_millis(50), locks.acquire(id)).await;
        assert!(blocked.is_err(), "second acquire should wait for the first");

        drop(guard);
        let unblocked =
            tokio::time::timeout(Duration::from_millis(50), locks.acquire(id)).await;
        assert!(unblocked.is_ok());
    }

    #[tokio::test]
    async fn different_work_orders_do_not_block() {
        let locks = WorkOrderLocks::new();
        let _guard = locks.acquire(Uuid::new_v4()).await;

        let other =
            tokio::time::timeout(Duration::from_millis(50), locks.acquire(Uuid::new_v4())).await;
        assert!(other.is_ok());
    }
}
