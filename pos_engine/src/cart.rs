//! The in-memory cart store.
//!
//! One [`CartState`] exists per active POS view. It is created empty, mutated synchronously by operator actions,
//! and discarded (via [`CartState::clear`]) only after a confirmed checkout or an explicit reset. It never persists
//! anywhere.

use hardware_api::{CustomerId, OrderStatus, PaymentMethod, Product, ProductId};
use pos_common::{Quantity, Rupees};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("Negotiated price must be positive, got {0}")]
    PriceNotPositive(Rupees),
    #[error("The cart has no line for product {0}")]
    NoSuchLine(ProductId),
}

//--------------------------------------      CartLine       ---------------------------------------------------------
/// One product entry in the cart. The descriptive fields are copied from the catalog when the line is added and are
/// deliberately not re-synced if the catalog changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub sku: String,
    pub unit: String,
    /// Catalog unit price at the time the line was added.
    pub base_price: Rupees,
    /// Operator-entered override; supersedes `base_price` when present. Always positive.
    pub negotiated_price: Option<Rupees>,
    pub quantity: Quantity,
}

impl CartLine {
    fn for_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            sku: product.sku.clone(),
            unit: product.unit.clone(),
            base_price: product.price,
            negotiated_price: None,
            quantity: Quantity::ONE,
        }
    }
}

//--------------------------------------      CartState      ---------------------------------------------------------
/// The sale being assembled: the ordered line items plus the transaction-level fields. Insertion order is display
/// order. At most one line exists per product id; `lines` is private so the invariant cannot be bypassed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    lines: Vec<CartLine>,
    selected_customer: Option<CustomerId>,
    payment_method: PaymentMethod,
    order_status: OrderStatus,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// `None` means a walk-in sale.
    pub fn selected_customer(&self) -> Option<CustomerId> {
        self.selected_customer
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn order_status(&self) -> OrderStatus {
        self.order_status
    }

    /// Adds one unit of the product. An existing line for the same product is incremented rather than duplicated.
    pub fn add_product(&mut self, product: &Product) {
        match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => line.quantity += Quantity::ONE,
            None => self.lines.push(CartLine::for_product(product)),
        }
    }

    /// Sets a line's quantity. Anything at or below zero removes the line; there is no upper bound here, since
    /// stock sufficiency is the backend's call to make at checkout.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: Quantity) {
        if !quantity.is_positive() {
            self.remove_line(product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        }
    }

    /// Removes the line if present. Absence is a no-op, not an error.
    pub fn remove_line(&mut self, product_id: ProductId) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Applies a haggled unit price to a line. Non-positive prices are rejected without touching the cart.
    pub fn set_negotiated_price(&mut self, product_id: ProductId, price: Rupees) -> Result<(), CartError> {
        if !price.is_positive() {
            return Err(CartError::PriceNotPositive(price));
        }
        let line =
            self.lines.iter_mut().find(|l| l.product_id == product_id).ok_or(CartError::NoSuchLine(product_id))?;
        line.negotiated_price = Some(price);
        Ok(())
    }

    /// Reverts a line to its catalog price.
    pub fn clear_negotiated_price(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let line =
            self.lines.iter_mut().find(|l| l.product_id == product_id).ok_or(CartError::NoSuchLine(product_id))?;
        line.negotiated_price = None;
        Ok(())
    }

    pub fn set_customer(&mut self, customer: Option<CustomerId>) {
        self.selected_customer = customer;
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    pub fn set_order_status(&mut self, status: OrderStatus) {
        self.order_status = status;
    }

    /// Resets the whole cart to its just-opened state.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.selected_customer = None;
        self.payment_method = PaymentMethod::default();
        self.order_status = OrderStatus::default();
    }
}
