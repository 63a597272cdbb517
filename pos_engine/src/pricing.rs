//! Pure total computations over the cart.
//!
//! Nothing here caches: every display of a total calls straight back into these functions, so a mutation can never
//! leave a stale figure on screen. Given a well-formed cart they cannot fail; an empty cart totals zero.

use pos_common::{Quantity, Rupees};

use crate::cart::{CartLine, CartState};

/// The unit price a line actually sells at: the negotiated override when one is set, the catalog price otherwise.
pub fn effective_unit_price(line: &CartLine) -> Rupees {
    line.negotiated_price.unwrap_or(line.base_price)
}

pub fn line_total(line: &CartLine) -> Rupees {
    effective_unit_price(line) * line.quantity
}

pub fn cart_total(cart: &CartState) -> Rupees {
    cart.lines().iter().map(line_total).sum()
}

/// Sum of quantities across all lines, for the cart badge.
pub fn total_item_count(cart: &CartState) -> Quantity {
    cart.lines().iter().map(|l| l.quantity).sum()
}

#[cfg(test)]
mod test {
    use hardware_api::ProductId;

    use super::*;
    use crate::test_utils::product;

    #[test]
    fn negotiated_price_supersedes_base_price() {
        let mut cart = CartState::new();
        cart.add_product(&product(1, "Hinge", 450));
        assert_eq!(line_total(&cart.lines()[0]), Rupees::from_rupees(450));
        cart.set_negotiated_price(ProductId(1), Rupees::from_rupees(400)).unwrap();
        assert_eq!(effective_unit_price(&cart.lines()[0]), Rupees::from_rupees(400));
        assert_eq!(line_total(&cart.lines()[0]), Rupees::from_rupees(400));
        cart.clear_negotiated_price(ProductId(1)).unwrap();
        assert_eq!(effective_unit_price(&cart.lines()[0]), Rupees::from_rupees(450));
    }

    // The worked example from the POS hand-over notes: a 450-rupee hinge.
    #[test]
    fn hinge_scenario() {
        let hinge = product(1, "Hinge", 450);
        let mut cart = CartState::new();
        cart.add_product(&hinge);
        assert_eq!(cart_total(&cart), Rupees::from_rupees(450));
        cart.set_quantity(ProductId(1), Quantity::from_units(3));
        assert_eq!(cart_total(&cart), Rupees::from_rupees(1350));
        cart.set_negotiated_price(ProductId(1), Rupees::from_rupees(400)).unwrap();
        assert_eq!(cart_total(&cart), Rupees::from_rupees(1200));
        cart.remove_line(ProductId(1));
        assert_eq!(cart_total(&cart), Rupees::default());
    }

    #[test]
    fn totals_over_fractional_quantities() {
        let mut cart = CartState::new();
        cart.add_product(&product(5, "Rope per metre", 80));
        cart.set_quantity(ProductId(5), Quantity::from_hundredths(250));
        cart.add_product(&product(6, "Nails per kg", 320));
        cart.set_quantity(ProductId(6), Quantity::from_hundredths(25));
        // 80 * 2.5 + 320 * 0.25 = 200 + 80
        assert_eq!(cart_total(&cart), Rupees::from_rupees(280));
        assert_eq!(total_item_count(&cart), Quantity::from_hundredths(275));
    }

    #[test]
    fn empty_cart_totals_zero() {
        let cart = CartState::new();
        assert_eq!(cart_total(&cart), Rupees::default());
        assert_eq!(total_item_count(&cart), Quantity::ZERO);
    }
}
