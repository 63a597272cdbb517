//! Shared fixtures for the engine's unit tests.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
    Mutex,
};

use hardware_api::{NewSale, Product, ProductId, SaleConfirmation, StoreApiError};
use pos_common::{Quantity, Rupees};
use tokio::sync::Notify;

use crate::traits::SaleSubmitter;

pub fn product(id: i64, name: &str, price_rupees: i64) -> Product {
    Product {
        id: ProductId(id),
        name: name.to_string(),
        sku: format!("SKU-{id:03}"),
        price: Rupees::from_rupees(price_rupees),
        stock: Quantity::from_units(100),
        unit: "piece".to_string(),
        category: "General".to_string(),
    }
}

/// A sale submitter that plays back one scripted response, optionally holding the request at a gate so tests can
/// observe the in-flight state.
pub struct ScriptedSubmitter {
    response: Mutex<Option<Result<SaleConfirmation, StoreApiError>>>,
    gate: Option<Arc<Notify>>,
    call_count: AtomicUsize,
}

impl ScriptedSubmitter {
    pub fn succeeding(sale_id: i64) -> Self {
        let confirmation = SaleConfirmation { sale_id: Some(sale_id), message: Some("Sale recorded".to_string()) };
        Self { response: Mutex::new(Some(Ok(confirmation))), gate: None, call_count: AtomicUsize::new(0) }
    }

    pub fn failing(error: StoreApiError) -> Self {
        Self { response: Mutex::new(Some(Err(error))), gate: None, call_count: AtomicUsize::new(0) }
    }

    /// Succeeds with `sale_id`, but only after the gate is notified.
    pub fn gated(sale_id: i64, gate: Arc<Notify>) -> Self {
        let mut submitter = Self::succeeding(sale_id);
        submitter.gate = Some(gate);
        submitter
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl SaleSubmitter for ScriptedSubmitter {
    async fn create_sale(&self, _sale: &NewSale) -> Result<SaleConfirmation, StoreApiError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.response.lock().unwrap().take().expect("ScriptedSubmitter called more times than scripted")
    }
}
