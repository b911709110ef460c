//! # Buyable
//!
//! Buyable turns any persisted entity into something that can be sold. An
//! owner entity (a product, a course, a ticket type) gains:
//!
//! - **Specs**: named purchasable variants with a price (minor currency
//!   units), a stock count and a SKU. An owner can have any number.
//! - **A buyable record**: one side-record of non-variant purchase metadata
//!   (the vendor).
//!
//! Both live in their own rows and point back to the owner through a
//! polymorphic `(buyable_type, buyable_id)` reference, so one spec table
//! serves every owner type.
//!
//! ## The Two Halves
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Buyable<E> (buyable.rs)                                    │
//! │  - Routes string-keyed reads/writes: spec / buyable / native│
//! │  - Holds pending fields, the buyable snapshot, selection    │
//! │  - Flattens everything into one map for output              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  BuyableStore<E, B> (store/)                                │
//! │  - Persists owners, fires lifecycle events                  │
//! │  - Syncs pending fields into spec and buyable rows          │
//! │  - Eager-loads children on every read                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  StorageBackend (store/backend.rs)                          │
//! │  - Raw row I/O; MemBackend ships in the crate               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use buyable::{Entity, InMemoryStore};
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Course {
//!     title: String,
//! }
//!
//! impl Entity for Course {}
//!
//! # fn main() -> buyable::Result<()> {
//! let store = InMemoryStore::<Course>::new();
//!
//! let mut course = store.make(Course { title: "Rust 101".into() });
//! let attrs = json!({"price": 4900, "stock": 30, "vendor": "Acme"});
//! course.fill(attrs.as_object().cloned().unwrap_or_default())?;
//! store.save(&mut course)?;
//!
//! let loaded = store.find(course.id().expect("saved"))?;
//! assert_eq!(loaded.price()?, Some(4900));
//! assert_eq!(loaded.vendor().as_deref(), Some("Acme"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`buyable`]: the owner wrapper and attribute routing
//! - [`store`]: lifecycle-aware persistence and storage backends
//! - [`hooks`]: lifecycle events and listeners
//! - [`model`]: spec and buyable rows, pending field sets
//! - [`attributes`]: recognized keys and value coercion
//! - [`selector`]: choosing a spec for single-value reads
//! - [`morph`]: type aliases for the polymorphic column
//! - [`config`]: layered configuration
//! - [`error`]: error types

pub mod attributes;
pub mod buyable;
pub mod config;
pub mod entity;
pub mod error;
pub mod hooks;
pub mod model;
pub mod morph;
pub mod selector;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use buyable::Buyable;
pub use config::BuyableConfig;
pub use entity::Entity;
pub use error::{BuyableError, Result};
pub use hooks::LifecycleEvent;
pub use model::{BuyableRecord, OwnerRef, Spec};
pub use selector::SpecSelector;
pub use store::memory::InMemoryStore;
pub use store::{BuyableStore, MemBackend, StorageBackend};
