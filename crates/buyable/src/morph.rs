//! Polymorphic type aliases.
//!
//! Child rows name their owner type in the `buyable_type` column. A short
//! alias keeps that column stable across module moves; without one the
//! fully qualified Rust type name is stored.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MorphMap {
    // alias -> type name
    aliases: BTreeMap<String, String>,
}

impl MorphMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, alias: &str, type_name: &str) {
        self.aliases
            .insert(alias.to_string(), type_name.to_string());
    }

    pub fn with(mut self, alias: &str, type_name: &str) -> Self {
        self.register(alias, type_name);
        self
    }

    /// The alias stored for `type_name`, or `type_name` itself.
    pub fn alias_for<'a>(&'a self, type_name: &'a str) -> &'a str {
        self.aliases
            .iter()
            .find(|(_, registered)| registered.as_str() == type_name)
            .map(|(alias, _)| alias.as_str())
            .unwrap_or(type_name)
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_alias_is_used() {
        let map = MorphMap::new().with("product", "shop::model::Product");
        assert_eq!(map.alias_for("shop::model::Product"), "product");
        assert_eq!(map.alias_for("shop::model::Service"), "shop::model::Service");
    }

    #[test]
    fn falls_back_to_type_name() {
        let map = MorphMap::new();
        assert!(map.is_empty());
        assert_eq!(map.alias_for("shop::model::Product"), "shop::model::Product");
    }
}
