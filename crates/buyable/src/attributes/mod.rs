//! # Attribute Routing Tables
//!
//! A buyable owner answers to three families of attribute keys:
//!
//! | Target | Keys | Stored in |
//! |--------|------|-----------|
//! | Spec | `spec`, `price`, `stock`, `sku` | pending [`SpecFields`](crate::model::SpecFields), then a `Spec` row |
//! | Buyable | `vendor` | pending [`BuyableFields`](crate::model::BuyableFields), then the buyable row |
//! | Native | anything else | the wrapped entity itself |
//!
//! The key `spec` addresses the spec's `name` column. Plain `name` is *not* a
//! spec key and falls through to the entity's own attributes.
//!
//! Values travel as [`serde_json::Value`] and are coerced on write according
//! to the attribute's [`AttributeKind`]. See [`value`] for the rules.

mod registry;
pub mod value;

pub use registry::{AttributeKind, BuyableField, SpecField, BUYABLE_ATTRIBUTES, SPEC_ATTRIBUTES};
