use super::backend::StorageBackend;
use crate::entity::Attributes;
use crate::error::{BuyableError, Result};
use crate::model::{BuyableRecord, OwnerRef, Spec};
use std::cell::RefCell;
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory storage backend.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
/// This keeps every `StorageBackend` method on `&self`.
pub struct MemBackend {
    owners: RefCell<HashMap<(String, Uuid), Attributes>>,
    owner_order: RefCell<Vec<(String, Uuid)>>,
    specs: RefCell<Vec<Spec>>,
    buyables: RefCell<Vec<BuyableRecord>>,
    simulate_write_error: RefCell<bool>,
    simulate_child_write_error: RefCell<bool>,
}

impl Default for MemBackend {
    fn default() -> Self {
        Self {
            owners: RefCell::new(HashMap::new()),
            owner_order: RefCell::new(Vec::new()),
            specs: RefCell::new(Vec::new()),
            buyables: RefCell::new(Vec::new()),
            simulate_write_error: RefCell::new(false),
            simulate_child_write_error: RefCell::new(false),
        }
    }
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write fail, for testing error propagation.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Make spec and buyable writes fail while owner writes succeed.
    pub fn set_simulate_child_write_error(&self, simulate: bool) {
        *self.simulate_child_write_error.borrow_mut() = simulate;
    }

    /// Total spec rows across all owners.
    pub fn spec_count(&self) -> usize {
        self.specs.borrow().len()
    }

    /// Total buyable rows across all owners.
    pub fn buyable_count(&self) -> usize {
        self.buyables.borrow().len()
    }

    fn check_write(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(BuyableError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }

    fn check_child_write(&self) -> Result<()> {
        self.check_write()?;
        if *self.simulate_child_write_error.borrow() {
            return Err(BuyableError::Store(
                "Simulated child write error".to_string(),
            ));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn insert_owner(&self, kind: &str, attributes: &Attributes) -> Result<Uuid> {
        self.check_write()?;
        let id = Uuid::new_v4();
        let key = (kind.to_string(), id);
        self.owners.borrow_mut().insert(key.clone(), attributes.clone());
        self.owner_order.borrow_mut().push(key);
        Ok(id)
    }

    fn update_owner(&self, kind: &str, id: Uuid, attributes: &Attributes) -> Result<()> {
        self.check_write()?;
        let mut owners = self.owners.borrow_mut();
        match owners.get_mut(&(kind.to_string(), id)) {
            Some(row) => {
                *row = attributes.clone();
                Ok(())
            }
            None => Err(BuyableError::OwnerNotFound {
                kind: kind.to_string(),
                id,
            }),
        }
    }

    fn load_owner(&self, kind: &str, id: Uuid) -> Result<Option<Attributes>> {
        let owners = self.owners.borrow();
        Ok(owners.get(&(kind.to_string(), id)).cloned())
    }

    fn list_owners(&self, kind: &str) -> Result<Vec<(Uuid, Attributes)>> {
        let order = self.owner_order.borrow();
        let owners = self.owners.borrow();
        Ok(order
            .iter()
            .filter(|(k, _)| k == kind)
            .filter_map(|key| owners.get(key).map(|row| (key.1, row.clone())))
            .collect())
    }

    fn delete_owner(&self, kind: &str, id: Uuid) -> Result<bool> {
        self.check_write()?;
        let key = (kind.to_string(), id);
        let removed = self.owners.borrow_mut().remove(&key).is_some();
        if removed {
            self.owner_order.borrow_mut().retain(|k| k != &key);
        }
        Ok(removed)
    }

    fn insert_spec(&self, spec: &Spec) -> Result<()> {
        self.check_child_write()?;
        self.specs.borrow_mut().push(spec.clone());
        Ok(())
    }

    fn update_spec(&self, spec: &Spec) -> Result<()> {
        self.check_child_write()?;
        let mut specs = self.specs.borrow_mut();
        match specs.iter_mut().find(|s| s.id == spec.id) {
            Some(row) => {
                *row = spec.clone();
                Ok(())
            }
            None => Err(BuyableError::Store(format!("Spec not found: {}", spec.id))),
        }
    }

    fn specs_for(&self, owner: &OwnerRef) -> Result<Vec<Spec>> {
        let specs = self.specs.borrow();
        Ok(specs.iter().filter(|s| &s.owner == owner).cloned().collect())
    }

    fn specs_for_many(&self, owners: &[OwnerRef]) -> Result<Vec<Spec>> {
        let specs = self.specs.borrow();
        Ok(specs
            .iter()
            .filter(|s| owners.contains(&s.owner))
            .cloned()
            .collect())
    }

    fn delete_specs_for(&self, owner: &OwnerRef) -> Result<usize> {
        self.check_child_write()?;
        let mut specs = self.specs.borrow_mut();
        let before = specs.len();
        specs.retain(|s| &s.owner != owner);
        Ok(before - specs.len())
    }

    fn insert_buyable(&self, record: &BuyableRecord) -> Result<()> {
        self.check_child_write()?;
        self.buyables.borrow_mut().push(record.clone());
        Ok(())
    }

    fn update_buyable(&self, record: &BuyableRecord) -> Result<()> {
        self.check_child_write()?;
        let mut buyables = self.buyables.borrow_mut();
        match buyables.iter_mut().find(|b| b.id == record.id) {
            Some(row) => {
                *row = record.clone();
                Ok(())
            }
            None => Err(BuyableError::Store(format!(
                "Buyable record not found: {}",
                record.id
            ))),
        }
    }

    fn buyable_for(&self, owner: &OwnerRef) -> Result<Option<BuyableRecord>> {
        let buyables = self.buyables.borrow();
        Ok(buyables.iter().find(|b| &b.owner == owner).cloned())
    }

    fn buyables_for_many(&self, owners: &[OwnerRef]) -> Result<Vec<BuyableRecord>> {
        let buyables = self.buyables.borrow();
        Ok(buyables
            .iter()
            .filter(|b| owners.contains(&b.owner))
            .cloned()
            .collect())
    }
}
