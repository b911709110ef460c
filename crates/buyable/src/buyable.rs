//! # The Buyable Owner
//!
//! [`Buyable<E>`] wraps a host entity and gives it purchasable variants. It
//! is the in-memory half of the system: attribute routing, spec selection and
//! the flat external representation live here, while
//! [`BuyableStore`](crate::store::BuyableStore) does the persistence half.
//!
//! ## Routing
//!
//! Every string-keyed read or write is dispatched by key:
//!
//! - spec keys (`spec`, `price`, `stock`, `sku`) go to the pending spec fields
//! - buyable keys (`vendor`) go to the pending buyable fields
//! - `id` reads the owner id
//! - everything else is a native attribute of the wrapped entity
//!
//! ## Spec Reads
//!
//! An owner can have many specs, so a single-value read such as "the price"
//! is only meaningful once it is clear *which* spec is meant. A spec read
//! succeeds when either
//!
//! - a spec field was written this session, or [`specify`](Buyable::specify)
//!   was called, or
//! - the owner has exactly one persisted spec (single-spec).
//!
//! Pending fields always win. Otherwise a single-spec owner answers from its
//! only spec, and a specified owner from the spec its selector resolved to.
//! A selector that matched nothing makes such reads fail with
//! [`BuyableError::SpecNotFound`].

use crate::attributes::{BuyableField, SpecField, BUYABLE_ATTRIBUTES, SPEC_ATTRIBUTES};
use crate::config::DEFAULT_SPEC;
use crate::entity::{from_attributes, to_attributes, Attributes, Entity};
use crate::error::{BuyableError, Result};
use crate::model::{BuyableFields, BuyableRecord, OwnerRef, Spec, SpecFields};
use crate::selector::SpecSelector;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Which spec single-value reads are pinned to.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Selection {
    /// Nothing written, nothing selected
    Unspecified,
    /// Spec fields were written in memory; no persisted spec selected
    Drafting,
    Resolved(Spec),
    /// `specify` found no match
    Missing(SpecSelector),
}

#[derive(Debug, Clone)]
pub struct Buyable<E: Entity> {
    entity: E,
    id: Option<Uuid>,
    exists: bool,
    /// Native attributes as last persisted
    original: Attributes,
    pending_spec: SpecFields,
    pending_buyable: BuyableFields,
    loaded_buyable: BuyableFields,
    selection: Selection,
    specs: Vec<Spec>,
    buyable: Option<BuyableRecord>,
    default_spec: String,
}

impl<E: Entity> Buyable<E> {
    pub fn new(entity: E) -> Self {
        Self {
            entity,
            id: None,
            exists: false,
            original: Attributes::new(),
            pending_spec: SpecFields::default(),
            pending_buyable: BuyableFields::default(),
            loaded_buyable: BuyableFields::default(),
            selection: Selection::Unspecified,
            specs: Vec::new(),
            buyable: None,
            default_spec: DEFAULT_SPEC.to_string(),
        }
    }

    /// Use `name` instead of `"default"` for the spec `fill` creates.
    pub fn with_default_spec(mut self, name: impl Into<String>) -> Self {
        self.default_spec = name.into();
        self
    }

    pub(crate) fn from_storage(id: Uuid, attributes: Attributes, default_spec: &str) -> Result<Self> {
        let entity = from_attributes(attributes.clone())?;
        let mut owner = Self::new(entity).with_default_spec(default_spec);
        owner.id = Some(id);
        owner.exists = true;
        owner.original = attributes;
        Ok(owner)
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }

    pub fn entity_mut(&mut self) -> &mut E {
        &mut self.entity
    }

    pub fn into_entity(self) -> E {
        self.entity
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// True once saved and until deleted.
    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn default_spec(&self) -> &str {
        &self.default_spec
    }

    /// Eager-loaded specs, in storage order.
    pub fn specs(&self) -> &[Spec] {
        &self.specs
    }

    /// Eager-loaded buyable record.
    pub fn buyable_record(&self) -> Option<&BuyableRecord> {
        self.buyable.as_ref()
    }

    pub fn owner_ref(&self, kind: &str) -> Option<OwnerRef> {
        self.id.map(|id| OwnerRef::new(kind, id))
    }

    // --- Routing ---

    /// Route a write by key. See the module docs for the dispatch table.
    pub fn set_attribute(&mut self, key: &str, value: impl Into<Value>) -> Result<&mut Self> {
        let value = value.into();
        if SpecField::parse(key).is_some() {
            self.set_spec(key, value)?;
        } else if BuyableField::parse(key).is_some() {
            self.set_buyable(key, value)?;
        } else {
            self.set_native(key, value)?;
        }
        Ok(self)
    }

    /// Route a read by key.
    pub fn get_attribute(&self, key: &str) -> Result<Option<Value>> {
        if SpecField::parse(key).is_some() {
            return self.get_spec(key);
        }
        if BuyableField::parse(key).is_some() {
            return self.get_buyable(key);
        }
        if key == "id" {
            return Ok(self.id.map(|id| Value::String(id.to_string())));
        }
        Ok(to_attributes(&self.entity)?.remove(key))
    }

    pub fn set_spec(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let field =
            SpecField::parse(key).ok_or_else(|| BuyableError::UnknownSpecAttribute(key.into()))?;
        self.pending_spec.set(field, &value.into())?;
        if self.selection == Selection::Unspecified {
            self.selection = Selection::Drafting;
        }
        Ok(())
    }

    pub fn get_spec(&self, key: &str) -> Result<Option<Value>> {
        let field =
            SpecField::parse(key).ok_or_else(|| BuyableError::UnknownSpecAttribute(key.into()))?;
        if !(self.is_specified() || self.is_single_spec()) {
            return Err(BuyableError::SpecNotSpecified);
        }

        if let Some(value) = self.pending_spec.get(field) {
            return Ok(Some(value));
        }
        if self.is_single_spec() {
            return Ok(Some(self.specs[0].get(field)));
        }
        match &self.selection {
            Selection::Resolved(spec) => Ok(Some(spec.get(field))),
            Selection::Missing(selector) => Err(BuyableError::SpecNotFound(selector.to_string())),
            Selection::Drafting | Selection::Unspecified => Ok(None),
        }
    }

    pub fn set_buyable(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let field = BuyableField::parse(key)
            .ok_or_else(|| BuyableError::UnknownBuyableAttribute(key.into()))?;
        self.pending_buyable.set(field, &value.into())
    }

    /// Pending value first, then the snapshot of the loaded record.
    pub fn get_buyable(&self, key: &str) -> Result<Option<Value>> {
        let field = BuyableField::parse(key)
            .ok_or_else(|| BuyableError::UnknownBuyableAttribute(key.into()))?;
        Ok(self
            .pending_buyable
            .get(field)
            .or_else(|| self.loaded_buyable.get(field)))
    }

    /// Record a field of the persisted buyable record in the loaded snapshot.
    pub(crate) fn set_original_buyable(&mut self, field: BuyableField, value: Option<String>) {
        match field {
            BuyableField::Vendor => self.loaded_buyable.vendor = value,
        }
    }

    /// Bulk assignment.
    ///
    /// When `price` is present the owner is first pointed at a spec named
    /// after the default spec, then every spec key is routed (so an explicit
    /// `spec` key still wins). Spec keys without a price are dropped. Buyable
    /// keys are always routed. The remaining keys are assigned natively.
    ///
    /// All values are validated before anything is assigned: on error the
    /// owner is left untouched.
    pub fn fill(&mut self, mut attributes: Map<String, Value>) -> Result<&mut Self> {
        let has_price = attributes
            .get(SpecField::Price.key())
            .is_some_and(|v| !v.is_null());

        let mut spec = self.pending_spec.clone();
        if has_price {
            spec.set(SpecField::Name, &Value::String(self.default_spec.clone()))?;
            for field in SPEC_ATTRIBUTES {
                if let Some(value) = attributes.get(field.key()) {
                    spec.set(*field, value)?;
                }
            }
        }

        let mut buyable = self.pending_buyable.clone();
        for field in BUYABLE_ATTRIBUTES {
            if let Some(value) = attributes.get(field.key()) {
                buyable.set(*field, value)?;
            }
        }

        for field in SPEC_ATTRIBUTES {
            attributes.remove(field.key());
        }
        for field in BUYABLE_ATTRIBUTES {
            attributes.remove(field.key());
        }

        let entity = if attributes.is_empty() {
            None
        } else {
            let mut native = to_attributes(&self.entity)?;
            native.extend(attributes);
            Some(from_attributes(native)?)
        };

        self.pending_spec = spec;
        self.pending_buyable = buyable;
        if has_price && self.selection == Selection::Unspecified {
            self.selection = Selection::Drafting;
        }
        if let Some(entity) = entity {
            self.entity = entity;
        }
        Ok(self)
    }

    fn set_native(&mut self, key: &str, value: Value) -> Result<()> {
        let mut native = to_attributes(&self.entity)?;
        native.insert(key.to_string(), value);
        self.entity = from_attributes(native)?;
        Ok(())
    }

    // --- Spec selection ---

    /// Pin single-value spec reads to the spec `selector` resolves to among
    /// the loaded specs. The owner counts as specified even on a miss.
    pub fn specify(&mut self, selector: impl Into<SpecSelector>) -> &mut Self {
        let selector = selector.into();
        self.selection = match selector.resolve(&self.specs) {
            Some(spec) => Selection::Resolved(spec),
            None => Selection::Missing(selector),
        };
        self
    }

    /// The spec selected by the last `specify`, if it matched.
    pub fn resolved_spec(&self) -> Option<&Spec> {
        match &self.selection {
            Selection::Resolved(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn is_specified(&self) -> bool {
        self.selection != Selection::Unspecified
    }

    pub fn is_single_spec(&self) -> bool {
        self.specs.len() == 1
    }

    // --- Typed shortcuts ---

    pub fn price(&self) -> Result<Option<i64>> {
        Ok(self.get_spec("price")?.and_then(|v| v.as_i64()))
    }

    pub fn stock(&self) -> Result<Option<i64>> {
        Ok(self.get_spec("stock")?.and_then(|v| v.as_i64()))
    }

    pub fn sku(&self) -> Result<Option<String>> {
        Ok(self
            .get_spec("sku")?
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    pub fn vendor(&self) -> Option<String> {
        self.pending_buyable
            .vendor
            .clone()
            .or_else(|| self.loaded_buyable.vendor.clone())
    }

    // --- Dirty state ---

    pub fn spec_dirty(&self) -> &SpecFields {
        &self.pending_spec
    }

    pub fn buyable_dirty(&self) -> &BuyableFields {
        &self.pending_buyable
    }

    pub fn is_spec_dirty(&self) -> bool {
        !self.pending_spec.is_empty()
    }

    pub fn is_buyable_dirty(&self) -> bool {
        !self.pending_buyable.is_empty()
    }

    /// Native attributes differ from what was last persisted.
    pub fn is_native_dirty(&self) -> Result<bool> {
        Ok(to_attributes(&self.entity)? != self.original)
    }

    pub(crate) fn native_attributes(&self) -> Result<Attributes> {
        to_attributes(&self.entity)
    }

    // --- Store bookkeeping ---

    pub(crate) fn mark_persisted(&mut self, id: Uuid, attributes: Attributes) {
        self.id = Some(id);
        self.exists = true;
        self.original = attributes;
    }

    pub(crate) fn sync_original(&mut self, attributes: Attributes) {
        self.original = attributes;
    }

    pub(crate) fn mark_deleted(&mut self) {
        self.exists = false;
    }

    pub(crate) fn set_relations(&mut self, specs: Vec<Spec>, buyable: Option<BuyableRecord>) {
        self.specs = specs;
        self.buyable = buyable;
    }

    pub(crate) fn clear_specs(&mut self) {
        self.specs.clear();
    }

    // --- Serialization ---

    /// Flat external representation.
    ///
    /// Stages are merged in order, later keys overriding earlier ones:
    /// native attributes (with `id`), loaded relations (`specs`, `buyable`),
    /// single-spec fields, buyable fields.
    pub fn to_map(&self) -> Result<Map<String, Value>> {
        let mut map = Map::new();
        if let Some(id) = self.id {
            map.insert("id".into(), Value::String(id.to_string()));
        }
        map.extend(to_attributes(&self.entity)?);

        if self.exists {
            map.insert("specs".into(), serde_json::to_value(&self.specs)?);
            map.insert("buyable".into(), serde_json::to_value(&self.buyable)?);
        }

        map.extend(self.single_spec_to_map()?);
        map.extend(self.buyable_to_map()?);
        Ok(map)
    }

    /// Spec fields of a single-spec owner; empty otherwise.
    pub fn single_spec_to_map(&self) -> Result<Map<String, Value>> {
        let mut map = Map::new();
        if self.is_single_spec() {
            for field in SPEC_ATTRIBUTES {
                let value = self.get_spec(field.key())?.unwrap_or(Value::Null);
                map.insert(field.key().into(), value);
            }
        }
        Ok(map)
    }

    pub fn buyable_to_map(&self) -> Result<Map<String, Value>> {
        let mut map = Map::new();
        for field in BUYABLE_ATTRIBUTES {
            let value = self.get_buyable(field.key())?.unwrap_or(Value::Null);
            map.insert(field.key().into(), value);
        }
        Ok(map)
    }
}

impl<E: Entity> Serialize for Buyable<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_map()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}
