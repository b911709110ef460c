//! # Configuration
//!
//! Buyable configuration is managed by [`confique`], layered from environment
//! variables and an optional TOML file.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `BUYABLE_DEFAULT_SPEC`, `BUYABLE_CASCADE_SPECS`
//! 2. **Config file**: the path passed to [`BuyableConfig::load`]
//! 3. **Compiled defaults**
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `default_spec` | `default` | Name of the spec `fill` creates when a price is given |
//! | `cascade_specs` | `true` | Delete every persisted spec when the owner is deleted |
//! | `morph_map` | none | Short type aliases for the `buyable_type` column |
//!
//! With `cascade_specs = false`, specs are only removed when the owner still
//! carries pending spec fields at deletion time.
//!
//! ```toml
//! default_spec = "standard"
//! cascade_specs = true
//!
//! [morph_map]
//! product = "shop::Product"
//! ```

use crate::error::Result;
use crate::morph::MorphMap;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_SPEC: &str = "default";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BuyableConfig {
    /// Name given to the spec created when `fill` receives a price
    #[config(default = "default", env = "BUYABLE_DEFAULT_SPEC")]
    pub default_spec: String,

    /// Delete all persisted specs together with their owner
    #[config(default = true, env = "BUYABLE_CASCADE_SPECS")]
    pub cascade_specs: bool,

    /// Alias -> fully qualified type name
    pub morph_map: Option<BTreeMap<String, String>>,
}

impl Default for BuyableConfig {
    fn default() -> Self {
        Self {
            default_spec: DEFAULT_SPEC.to_string(),
            cascade_specs: true,
            morph_map: None,
        }
    }
}

impl BuyableConfig {
    /// Load the layered configuration. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    pub fn morph_map(&self) -> MorphMap {
        let mut map = MorphMap::new();
        if let Some(aliases) = &self.morph_map {
            for (alias, type_name) in aliases {
                map.register(alias, type_name);
            }
        }
        map
    }
}
