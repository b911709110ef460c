//! # Storage Layer
//!
//! Storage is split in two, so the persistence engine stays swappable:
//!
//! - [`StorageBackend`]: raw row I/O for owners, specs and buyable records.
//!   It knows nothing about lifecycles or pending fields.
//! - [`BuyableStore`]: the lifecycle-aware service on top. It inserts and
//!   updates owners, fires [`LifecycleEvent`](crate::hooks::LifecycleEvent)s,
//!   synchronizes child rows and eager-loads them on every read.
//!
//! ## Implementations
//!
//! - [`mem_backend::MemBackend`]: in-memory rows, with write-error
//!   simulation for failure-path tests.
//! - [`memory::InMemoryStore`]: `BuyableStore` over `MemBackend`.
//!
//! ## Row Layout
//!
//! ```text
//! owners     (kind, id) -> native attributes (JSON object)
//! specs      id, name, price, stock, sku, buyable_type, buyable_id
//! buyables   id, vendor, buyable_type, buyable_id
//! ```
//!
//! ## Partial Failure
//!
//! Creating an owner is three writes: owner row, spec row, buyable row. They
//! are not wrapped in a transaction. If a child write fails the owner row
//! stays and the error is returned; wrap the call in a backend transaction
//! if that matters.

pub mod backend;
pub mod buyable_store;
pub mod mem_backend;
pub mod memory;

pub use backend::StorageBackend;
pub use buyable_store::BuyableStore;
pub use mem_backend::MemBackend;
