//! Usman Hardware POS engine
//!
//! The core of the point-of-sale screen: everything between "operator taps a product" and "the backend records a
//! sale", with no presentation code. The engine is presentation-independent by design; the dashboard's several cart
//! views (panel, sidebar) are all thin consumers of the same three pieces:
//!
//! 1. The [`cart::CartState`] store: the single mutable, memory-only record of the sale being assembled. It enforces
//!    the line-identity invariant (one line per product) and the quantity rules, and nothing else writes to it.
//! 2. The [`pricing`] functions: pure, recomputed on every read, so displayed totals can never go stale.
//! 3. The [`checkout::CheckoutAssembler`]: turns the cart into the order-creation payload, submits it once, and
//!    clears the cart only when the backend confirms. Any failure leaves the cart exactly as it was so the operator
//!    can retry.
//!
//! Read-only reference data (the product catalog and the customer directory) arrives as [`snapshots`] published by
//! the [`refresh`] background tasks. A refresh landing mid-edit replaces the snapshot without touching the cart.

pub mod cart;
pub mod checkout;
pub mod pricing;
pub mod refresh;
pub mod snapshots;
mod traits;

#[cfg(test)]
pub(crate) mod test_utils;

pub use cart::{CartError, CartLine, CartState};
pub use checkout::{CheckoutAssembler, CheckoutError};
pub use refresh::RefreshHandle;
pub use snapshots::{CatalogSnapshot, CustomerDirectory};
pub use traits::SaleSubmitter;
