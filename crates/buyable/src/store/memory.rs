use super::buyable_store::BuyableStore;
use super::mem_backend::MemBackend;
use crate::entity::Entity;

pub type InMemoryStore<E> = BuyableStore<E, MemBackend>;

impl<E: Entity> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> InMemoryStore<E> {
    pub fn new() -> Self {
        BuyableStore::with_backend(MemBackend::new())
    }
}
