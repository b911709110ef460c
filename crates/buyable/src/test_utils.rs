//! Shared fixtures for unit tests and downstream crates (`test_utils` feature).

use crate::entity::Entity;
use serde::{Deserialize, Serialize};

/// A minimal host entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Product {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: None,
        }
    }
}

impl Entity for Product {}

pub mod fixtures {
    use super::Product;
    use crate::buyable::Buyable;
    use crate::store::memory::InMemoryStore;

    pub struct StoreFixture {
        pub store: InMemoryStore<Product>,
        pub owners: Vec<Buyable<Product>>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                owners: Vec::new(),
            }
        }

        /// A saved product with no specs.
        pub fn with_product(mut self, title: &str) -> Self {
            let mut owner = self.store.make(Product::new(title));
            self.store.save(&mut owner).unwrap();
            self.owners.push(owner);
            self
        }

        /// A saved product with vendor "Fixture Co" and one spec per
        /// `(name, price)` pair.
        pub fn with_specs(mut self, title: &str, specs: &[(&str, i64)]) -> Self {
            let mut owner = self.store.make(Product::new(title));
            owner.set_buyable("vendor", "Fixture Co").unwrap();
            for (name, price) in specs {
                owner.set_spec("spec", *name).unwrap();
                owner.set_spec("price", *price).unwrap();
                self.store.save(&mut owner).unwrap();
            }
            if specs.is_empty() {
                self.store.save(&mut owner).unwrap();
            }
            self.owners.push(owner);
            self
        }

        /// The most recently added owner.
        pub fn last(&self) -> &Buyable<Product> {
            self.owners.last().expect("fixture has no owners")
        }
    }
}
