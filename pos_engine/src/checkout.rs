//! Checkout: cart in, recorded sale out.
//!
//! A checkout attempt is a single atomic request from this module's point of view. The per-attempt state machine is
//! `Idle → Submitting → { Succeeded → Idle(cart cleared), Failed → Idle(cart unchanged) }`. The assembler refuses a
//! second submission while one is outstanding, so a double-tap on the checkout button cannot create two orders.

use std::sync::atomic::{AtomicBool, Ordering};

use hardware_api::{NewSale, SaleConfirmation, SaleItem, StoreApiError};
use log::*;
use pos_common::PKR_CURRENCY_CODE;
use thiserror::Error;

use crate::{
    cart::CartState,
    pricing::{cart_total, effective_unit_price, line_total},
    traits::SaleSubmitter,
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cannot check out an empty cart")]
    EmptyCart,
    #[error("A checkout is already in flight")]
    SubmissionInFlight,
    #[error("Checkout failed: {0}")]
    Api(#[from] StoreApiError),
}

pub struct CheckoutAssembler<S: SaleSubmitter> {
    submitter: S,
    in_flight: AtomicBool,
}

impl<S: SaleSubmitter> CheckoutAssembler<S> {
    pub fn new(submitter: S) -> Self {
        Self { submitter, in_flight: AtomicBool::new(false) }
    }

    /// Whether a submission is currently outstanding, for the view to grey out the checkout button.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Builds the order-creation payload from the current cart. Pure; makes no network calls.
    pub fn assemble(cart: &CartState) -> NewSale {
        let items = cart
            .lines()
            .iter()
            .map(|line| SaleItem {
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price: effective_unit_price(line),
                total: line_total(line),
            })
            .collect();
        NewSale {
            customer_id: cart.selected_customer(),
            items,
            payment_method: cart.payment_method(),
            status: cart.order_status(),
            total_amount: cart_total(cart),
            currency: PKR_CURRENCY_CODE.to_string(),
        }
    }

    /// Submits the cart as a new sale. On a confirmed sale the cart is cleared; on any failure (rejection or
    /// transport) the cart is left untouched so the operator can retry. An empty cart and a checkout already in
    /// flight are both refused before any network traffic.
    pub async fn checkout(&self, cart: &mut CartState) -> Result<SaleConfirmation, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(CheckoutError::SubmissionInFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);
        let sale = Self::assemble(cart);
        debug!("🛒 Submitting sale: {} items, total {}", sale.items.len(), sale.total_amount);
        match self.submitter.create_sale(&sale).await {
            Ok(confirmation) => {
                info!("🛒 Sale confirmed (id {:?}), clearing cart", confirmation.sale_id);
                cart.clear();
                Ok(confirmation)
            },
            Err(e) => {
                warn!("🛒 Checkout failed, cart preserved: {e}");
                Err(e.into())
            },
        }
    }
}

/// Clears the in-flight flag when the attempt ends, including when the future is dropped mid-submission.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use hardware_api::{CustomerId, OrderStatus, PaymentMethod, ProductId};
    use pos_common::{Quantity, Rupees};
    use tokio::sync::Notify;

    use super::*;
    use crate::test_utils::{product, ScriptedSubmitter};

    fn loaded_cart() -> CartState {
        let mut cart = CartState::new();
        cart.add_product(&product(1, "Hinge", 450));
        cart.set_quantity(ProductId(1), Quantity::from_units(3));
        cart.set_negotiated_price(ProductId(1), Rupees::from_rupees(400)).unwrap();
        cart.add_product(&product(2, "Handle", 250));
        cart.set_customer(Some(CustomerId(12)));
        cart.set_payment_method(PaymentMethod::Credit);
        cart
    }

    #[test]
    fn payload_carries_effective_prices_and_totals() {
        let cart = loaded_cart();
        let sale = CheckoutAssembler::<ScriptedSubmitter>::assemble(&cart);
        assert_eq!(sale.customer_id, Some(CustomerId(12)));
        assert_eq!(sale.payment_method, PaymentMethod::Credit);
        assert_eq!(sale.status, OrderStatus::Completed);
        assert_eq!(sale.items.len(), 2);
        assert_eq!(sale.items[0].unit_price, Rupees::from_rupees(400));
        assert_eq!(sale.items[0].total, Rupees::from_rupees(1200));
        assert_eq!(sale.items[1].unit_price, Rupees::from_rupees(250));
        assert_eq!(sale.total_amount, Rupees::from_rupees(1450));
        assert_eq!(sale.currency, PKR_CURRENCY_CODE);
    }

    #[test]
    fn walk_in_sales_have_no_customer_id() {
        let mut cart = loaded_cart();
        cart.set_customer(None);
        let sale = CheckoutAssembler::<ScriptedSubmitter>::assemble(&cart);
        assert_eq!(sale.customer_id, None);
    }

    #[tokio::test]
    async fn empty_cart_makes_no_network_call() {
        let submitter = ScriptedSubmitter::succeeding(1);
        let assembler = CheckoutAssembler::new(submitter);
        let mut cart = CartState::new();
        assert!(matches!(assembler.checkout(&mut cart).await, Err(CheckoutError::EmptyCart)));
        assert_eq!(assembler.submitter.calls(), 0);
    }

    #[tokio::test]
    async fn success_clears_the_cart() {
        let _ = env_logger::try_init();
        let assembler = CheckoutAssembler::new(ScriptedSubmitter::succeeding(77));
        let mut cart = loaded_cart();
        let confirmation = assembler.checkout(&mut cart).await.unwrap();
        assert_eq!(confirmation.sale_id, Some(77));
        assert!(cart.is_empty());
        assert_eq!(cart.selected_customer(), None);
        assert_eq!(cart.payment_method(), PaymentMethod::Cash);
        assert_eq!(assembler.submitter.calls(), 1);
        assert!(!assembler.is_submitting());
    }

    #[tokio::test]
    async fn rejection_preserves_the_cart_exactly() {
        let assembler =
            CheckoutAssembler::new(ScriptedSubmitter::failing(StoreApiError::Rejected("Insufficient stock".into())));
        let mut cart = loaded_cart();
        let before = cart.clone();
        match assembler.checkout(&mut cart).await {
            Err(CheckoutError::Api(StoreApiError::Rejected(msg))) => assert_eq!(msg, "Insufficient stock"),
            other => panic!("Expected rejection, got {other:?}"),
        }
        assert_eq!(cart, before);
        // the operator can retry the identical checkout
        assert!(!assembler.is_submitting());
    }

    #[tokio::test]
    async fn transport_error_preserves_the_cart_exactly() {
        let error = StoreApiError::QueryError { status: 502, message: "Bad gateway".into() };
        let assembler = CheckoutAssembler::new(ScriptedSubmitter::failing(error));
        let mut cart = loaded_cart();
        let before = cart.clone();
        assert!(assembler.checkout(&mut cart).await.is_err());
        assert_eq!(cart, before);
    }

    #[tokio::test]
    async fn a_second_submission_is_refused_while_one_is_outstanding() {
        let gate = Arc::new(Notify::new());
        let assembler = Arc::new(CheckoutAssembler::new(ScriptedSubmitter::gated(11, gate.clone())));
        let first = {
            let assembler = Arc::clone(&assembler);
            tokio::spawn(async move {
                let mut cart = loaded_cart();
                assembler.checkout(&mut cart).await.map(|c| c.sale_id)
            })
        };
        // wait until the first submission is parked inside the submitter
        while !assembler.is_submitting() {
            tokio::task::yield_now().await;
        }
        let mut other_cart = loaded_cart();
        assert!(matches!(assembler.checkout(&mut other_cart).await, Err(CheckoutError::SubmissionInFlight)));
        gate.notify_one();
        assert_eq!(first.await.unwrap().unwrap(), Some(11));
        assert!(!assembler.is_submitting());
        assert_eq!(assembler.submitter.calls(), 1);
    }
}
