use super::backend::StorageBackend;
use crate::attributes::{BuyableField, BUYABLE_ATTRIBUTES};
use crate::buyable::Buyable;
use crate::config::BuyableConfig;
use crate::entity::Entity;
use crate::error::{BuyableError, Result};
use crate::hooks::{Hooks, LifecycleEvent};
use crate::model::{BuyableFields, BuyableRecord, OwnerRef, Spec, SpecFields};
use crate::morph::MorphMap;
use std::collections::HashMap;
use tracing::{debug, trace, warn};
use uuid::Uuid;

/// Persistence service for buyable owners of type `E`.
///
/// Every load joins the owner's specs and buyable record. Every mutation
/// fires lifecycle events, and the built-in handlers keep the child rows in
/// step with the owner's pending fields:
///
/// | Event | Action |
/// |-------|--------|
/// | Created | create a spec from pending spec fields (if any), always create the buyable record |
/// | Updated | upsert the spec by name, upsert the buyable record by owner |
/// | Deleted | delete the owner's specs (see [`BuyableConfig::cascade_specs`]) |
/// | Retrieved | copy the buyable record into the owner's snapshot |
pub struct BuyableStore<E: Entity, B: StorageBackend> {
    pub(crate) backend: B,
    config: BuyableConfig,
    morph: MorphMap,
    hooks: Hooks<E>,
}

impl<E: Entity, B: StorageBackend> BuyableStore<E, B> {
    pub fn with_backend(backend: B) -> Self {
        Self::with_config(backend, BuyableConfig::default())
    }

    pub fn with_config(backend: B, config: BuyableConfig) -> Self {
        let morph = config.morph_map();
        Self {
            backend,
            config,
            morph,
            hooks: Hooks::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &BuyableConfig {
        &self.config
    }

    /// The value written to `buyable_type` for owners of type `E`.
    pub fn owner_kind(&self) -> &str {
        self.morph.alias_for(E::type_name())
    }

    /// Register a listener, run after the built-in handler for `event`.
    pub fn on<F>(&mut self, event: LifecycleEvent, listener: F)
    where
        F: Fn(LifecycleEvent, &Buyable<E>) + 'static,
    {
        self.hooks.on(event, listener);
    }

    /// Wrap a fresh entity with this store's default spec name.
    pub fn make(&self, entity: E) -> Buyable<E> {
        Buyable::new(entity).with_default_spec(self.config.default_spec.clone())
    }

    pub fn find(&self, id: Uuid) -> Result<Buyable<E>> {
        let kind = self.owner_kind();
        let attributes =
            self.backend
                .load_owner(kind, id)?
                .ok_or_else(|| BuyableError::OwnerNotFound {
                    kind: kind.to_string(),
                    id,
                })?;
        let mut owner = Buyable::from_storage(id, attributes, &self.config.default_spec)?;
        self.load_relations(&mut owner)?;
        self.fire(LifecycleEvent::Retrieved, &mut owner)?;
        Ok(owner)
    }

    /// Every owner of type `E`, with relations loaded in one batched read
    /// per child table.
    pub fn all(&self) -> Result<Vec<Buyable<E>>> {
        let kind = self.owner_kind();
        let mut owners = self
            .backend
            .list_owners(kind)?
            .into_iter()
            .map(|(id, attributes)| Buyable::from_storage(id, attributes, &self.config.default_spec))
            .collect::<Result<Vec<_>>>()?;
        if owners.is_empty() {
            return Ok(owners);
        }

        let refs: Vec<OwnerRef> = owners
            .iter()
            .filter_map(|owner| owner.owner_ref(kind))
            .collect();
        let mut specs: HashMap<OwnerRef, Vec<Spec>> = HashMap::new();
        for spec in self.backend.specs_for_many(&refs)? {
            specs.entry(spec.owner.clone()).or_default().push(spec);
        }
        let mut buyables: HashMap<OwnerRef, BuyableRecord> = HashMap::new();
        for record in self.backend.buyables_for_many(&refs)? {
            buyables.entry(record.owner.clone()).or_insert(record);
        }
        trace!(kind, owners = owners.len(), "relations loaded in batch");

        for (owner, owner_ref) in owners.iter_mut().zip(&refs) {
            owner.set_relations(
                specs.remove(owner_ref).unwrap_or_default(),
                buyables.remove(owner_ref),
            );
            self.fire(LifecycleEvent::Retrieved, owner)?;
        }
        Ok(owners)
    }

    /// Persist the owner, then its pending spec and buyable fields.
    ///
    /// A failed owner write returns the error before any child row is
    /// touched. A failed child write leaves the owner row in place.
    pub fn save(&self, owner: &mut Buyable<E>) -> Result<()> {
        let attributes = owner.native_attributes()?;

        match owner.id() {
            None => {
                let id = self.backend.insert_owner(self.owner_kind(), &attributes)?;
                owner.mark_persisted(id, attributes);
                debug!(kind = self.owner_kind(), %id, "owner created");
                self.fire(LifecycleEvent::Created, owner)?;
                self.fire(LifecycleEvent::Saved, owner)?;
            }
            Some(id) => {
                if owner.is_native_dirty()? {
                    self.backend
                        .update_owner(self.owner_kind(), id, &attributes)?;
                    owner.sync_original(attributes);
                    debug!(kind = self.owner_kind(), %id, "owner updated");
                    self.fire(LifecycleEvent::Updated, owner)?;
                }
                self.fire(LifecycleEvent::Saved, owner)?;
            }
        }

        // Routed spec/buyable writes leave the owner row untouched, so they
        // get their own saved/updated round.
        if owner.exists() && (owner.is_spec_dirty() || owner.is_buyable_dirty()) {
            self.fire(LifecycleEvent::Saved, owner)?;
            self.fire(LifecycleEvent::Updated, owner)?;
        }

        self.load_relations(owner)?;
        self.on_retrieved(owner);
        Ok(())
    }

    pub fn delete(&self, owner: &mut Buyable<E>) -> Result<()> {
        let id = owner.id().ok_or(BuyableError::NotPersisted)?;
        if !self.backend.delete_owner(self.owner_kind(), id)? {
            return Err(BuyableError::OwnerNotFound {
                kind: self.owner_kind().to_string(),
                id,
            });
        }
        owner.mark_deleted();
        debug!(kind = self.owner_kind(), %id, "owner deleted");
        self.fire(LifecycleEvent::Deleted, owner)
    }

    /// Create or update the owner's spec named after `fields.name` (or the
    /// default spec name).
    pub fn upsert_spec(&self, owner: &OwnerRef, fields: &SpecFields) -> Result<Spec> {
        let name = fields
            .name
            .clone()
            .unwrap_or_else(|| self.config.default_spec.clone());

        let existing = self
            .backend
            .specs_for(owner)?
            .into_iter()
            .find(|spec| spec.name == name);

        match existing {
            Some(mut spec) => {
                spec.apply(fields);
                self.backend.update_spec(&spec)?;
                trace!(%owner, spec = %spec.name, "spec updated");
                Ok(spec)
            }
            None => {
                let spec = Spec::from_fields(owner.clone(), fields, &name);
                self.backend.insert_spec(&spec)?;
                trace!(%owner, spec = %spec.name, "spec created");
                Ok(spec)
            }
        }
    }

    /// Create or update the owner's buyable record.
    pub fn upsert_buyable(&self, owner: &OwnerRef, fields: &BuyableFields) -> Result<BuyableRecord> {
        match self.backend.buyable_for(owner)? {
            Some(mut record) => {
                record.apply(fields);
                self.backend.update_buyable(&record)?;
                trace!(%owner, "buyable record updated");
                Ok(record)
            }
            None => {
                let record = BuyableRecord::from_fields(owner.clone(), fields);
                self.backend.insert_buyable(&record)?;
                trace!(%owner, "buyable record created");
                Ok(record)
            }
        }
    }

    fn fire(&self, event: LifecycleEvent, owner: &mut Buyable<E>) -> Result<()> {
        match event {
            LifecycleEvent::Created => self.on_created(owner)?,
            LifecycleEvent::Updated => self.on_updated(owner)?,
            LifecycleEvent::Deleted => self.on_deleted(owner)?,
            LifecycleEvent::Retrieved => self.on_retrieved(owner),
            LifecycleEvent::Saved => {}
        }
        self.hooks.notify(event, owner);
        Ok(())
    }

    fn on_created(&self, owner: &mut Buyable<E>) -> Result<()> {
        let owner_ref = self.owner_ref(owner)?;

        if owner.is_spec_dirty() {
            let spec = Spec::from_fields(
                owner_ref.clone(),
                owner.spec_dirty(),
                &self.config.default_spec,
            );
            if let Err(err) = self.backend.insert_spec(&spec) {
                warn!(owner = %owner_ref, "owner created without its spec: {}", err);
                return Err(err);
            }
        }

        let record = BuyableRecord::from_fields(owner_ref.clone(), owner.buyable_dirty());
        if let Err(err) = self.backend.insert_buyable(&record) {
            warn!(owner = %owner_ref, "owner created without its buyable record: {}", err);
            return Err(err);
        }
        Ok(())
    }

    fn on_updated(&self, owner: &mut Buyable<E>) -> Result<()> {
        let owner_ref = self.owner_ref(owner)?;
        if owner.is_spec_dirty() {
            self.upsert_spec(&owner_ref, owner.spec_dirty())?;
        }
        if owner.is_buyable_dirty() {
            self.upsert_buyable(&owner_ref, owner.buyable_dirty())?;
        }
        Ok(())
    }

    fn on_deleted(&self, owner: &mut Buyable<E>) -> Result<()> {
        if !(self.config.cascade_specs || owner.is_spec_dirty()) {
            return Ok(());
        }
        let owner_ref = self.owner_ref(owner)?;
        let removed = self.backend.delete_specs_for(&owner_ref)?;
        owner.clear_specs();
        debug!(owner = %owner_ref, removed, "specs deleted with owner");
        Ok(())
    }

    fn on_retrieved(&self, owner: &mut Buyable<E>) {
        let Some(fields) = owner.buyable_record().map(BuyableRecord::fields) else {
            return;
        };
        for field in BUYABLE_ATTRIBUTES {
            let value = match field {
                BuyableField::Vendor => fields.vendor.clone(),
            };
            owner.set_original_buyable(*field, value);
        }
    }

    fn load_relations(&self, owner: &mut Buyable<E>) -> Result<()> {
        let owner_ref = self.owner_ref(owner)?;
        let specs = self.backend.specs_for(&owner_ref)?;
        let buyable = self.backend.buyable_for(&owner_ref)?;
        owner.set_relations(specs, buyable);
        Ok(())
    }

    fn owner_ref(&self, owner: &Buyable<E>) -> Result<OwnerRef> {
        owner
            .owner_ref(self.owner_kind())
            .ok_or(BuyableError::NotPersisted)
    }
}
