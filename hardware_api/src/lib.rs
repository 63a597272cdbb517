//! HTTP client for the Usman Hardware store backend.
//!
//! The backend is a WordPress REST API and its response shapes are not perfectly uniform, so this crate owns the
//! single tolerant-parsing layer that normalizes the loose JSON into the strict [`data_objects`] types. Nothing
//! outside this crate should ever see a raw `serde_json::Value` from the backend.

mod api;
mod config;
mod error;
pub mod helpers;

pub mod data_objects;

pub use api::{CustomerFilter, HardwareApi, ProductFilter};
pub use config::{ApiKey, StoreApiConfig};
pub use data_objects::{
    Customer,
    CustomerId,
    NewCustomer,
    NewSale,
    OrderStatus,
    PaymentMethod,
    Product,
    ProductId,
    SaleConfirmation,
    SaleItem,
};
pub use error::StoreApiError;
