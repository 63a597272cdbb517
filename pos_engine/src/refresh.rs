//! Background snapshot refresh.
//!
//! The dashboard polls the catalog and customer lists on a timer. Each poll loop is an explicit task whose lifetime
//! is owned by a [`RefreshHandle`]; dropping the handle (or calling [`RefreshHandle::stop`]) aborts the loop, so a
//! closed POS view cannot leave an orphaned timer running. Fresh snapshots are published on a `watch` channel; a
//! failed poll logs a warning and the previous snapshot stays current.

use std::{future::Future, time::Duration};

use hardware_api::{CustomerFilter, HardwareApi, ProductFilter, StoreApiError};
use log::*;
use tokio::{sync::watch, task::JoinHandle, time::MissedTickBehavior};

use crate::snapshots::{CatalogSnapshot, CustomerDirectory};

pub struct RefreshHandle {
    handle: JoinHandle<()>,
}

impl RefreshHandle {
    pub fn stop(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Runs `fetch` on a fixed interval (first run immediately) and publishes each successful result. The loop ends on
/// its own when every receiver has been dropped.
pub fn spawn_refresh_loop<T, F, Fut>(initial: T, every: Duration, mut fetch: F) -> (watch::Receiver<T>, RefreshHandle)
where
    T: Send + Sync + 'static,
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, StoreApiError>> + Send,
{
    let (tx, rx) = watch::channel(initial);
    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match fetch().await {
                Ok(snapshot) => {
                    if tx.send(snapshot).is_err() {
                        debug!("All snapshot receivers dropped, stopping refresh loop");
                        break;
                    }
                },
                Err(e) => warn!("Snapshot refresh failed, keeping the previous snapshot: {e}"),
            }
        }
    });
    (rx, RefreshHandle { handle })
}

pub fn spawn_catalog_refresh(
    api: HardwareApi,
    filter: ProductFilter,
    every: Duration,
) -> (watch::Receiver<CatalogSnapshot>, RefreshHandle) {
    spawn_refresh_loop(CatalogSnapshot::empty(), every, move || {
        let api = api.clone();
        let filter = filter.clone();
        async move { api.fetch_products(&filter).await.map(CatalogSnapshot::new) }
    })
}

pub fn spawn_directory_refresh(
    api: HardwareApi,
    filter: CustomerFilter,
    every: Duration,
) -> (watch::Receiver<CustomerDirectory>, RefreshHandle) {
    spawn_refresh_loop(CustomerDirectory::empty(), every, move || {
        let api = api.clone();
        let filter = filter.clone();
        async move { api.fetch_customers(&filter).await.map(CustomerDirectory::new) }
    })
}
