//! Read-only reference data for the POS view.
//!
//! Snapshots are replaced wholesale by the [`crate::refresh`] tasks and never mutated in place. A refresh arriving
//! mid-edit swaps the lists under the selection UI without touching the cart; lines already in the cart keep the
//! prices they were added at.

use chrono::{DateTime, Utc};
use hardware_api::{Customer, CustomerId, Product, ProductId};

//--------------------------------------   CatalogSnapshot   ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub fetched_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub fn empty() -> Self {
        Self { products: Vec::new(), fetched_at: DateTime::<Utc>::MIN_UTC }
    }

    pub fn new(products: Vec<Product>) -> Self {
        Self { products, fetched_at: Utc::now() }
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Case-insensitive match on name or SKU, for the product search box.
    pub fn search(&self, term: &str) -> Vec<&Product> {
        let term = term.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&term) || p.sku.to_lowercase().contains(&term))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

//--------------------------------------  CustomerDirectory  ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct CustomerDirectory {
    pub customers: Vec<Customer>,
    pub fetched_at: DateTime<Utc>,
}

impl CustomerDirectory {
    pub fn empty() -> Self {
        Self { customers: Vec::new(), fetched_at: DateTime::<Utc>::MIN_UTC }
    }

    pub fn new(customers: Vec<Customer>) -> Self {
        Self { customers, fetched_at: Utc::now() }
    }

    pub fn find(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn search(&self, term: &str) -> Vec<&Customer> {
        let term = term.to_lowercase();
        self.customers.iter().filter(|c| c.name.to_lowercase().contains(&term) || c.phone.contains(&term)).collect()
    }

    /// Makes a quick-created customer selectable immediately, without waiting for the next poll. An existing record
    /// with the same id is replaced.
    pub fn insert(&mut self, customer: Customer) {
        match self.customers.iter_mut().find(|c| c.id == customer.id) {
            Some(existing) => *existing = customer,
            None => self.customers.push(customer),
        }
    }
}

#[cfg(test)]
mod test {
    use pos_common::{Quantity, Rupees};

    use super::*;
    use crate::test_utils::product;

    #[test]
    fn search_matches_name_or_sku() {
        let snapshot = CatalogSnapshot::new(vec![product(1, "Door Hinge", 450), product(2, "Cabinet Handle", 250)]);
        assert_eq!(snapshot.search("hinge").len(), 1);
        assert_eq!(snapshot.search("SKU-002").len(), 1);
        assert_eq!(snapshot.search("piano").len(), 0);
        assert_eq!(snapshot.find(ProductId(2)).unwrap().price, Rupees::from_rupees(250));
        assert_eq!(snapshot.find(ProductId(2)).unwrap().stock, Quantity::from_units(100));
    }

    #[test]
    fn quick_created_customer_is_immediately_findable() {
        let mut directory = CustomerDirectory::empty();
        directory.insert(Customer { id: CustomerId(5), name: "Bilal Traders".to_string(), phone: "0300".to_string() });
        assert!(directory.find(CustomerId(5)).is_some());
        // replacement, not duplication
        directory.insert(Customer { id: CustomerId(5), name: "Bilal & Sons".to_string(), phone: "0300".to_string() });
        assert_eq!(directory.customers.len(), 1);
        assert_eq!(directory.find(CustomerId(5)).unwrap().name, "Bilal & Sons");
        assert_eq!(directory.search("bilal").len(), 1);
    }
}
