use crate::entity::Attributes;
use crate::error::Result;
use crate::model::{BuyableRecord, OwnerRef, Spec};
use uuid::Uuid;

/// Abstract interface for raw row storage.
///
/// This trait handles the "how" of storage (memory, SQL, anything else),
/// while [`BuyableStore`](super::BuyableStore) handles the "what": lifecycle
/// events, upserts and eager loading.
///
/// Every method is its own atomic operation. Nothing here spans rows, so a
/// sequence of calls can fail halfway.
pub trait StorageBackend {
    // --- Owner rows ---

    /// Insert a new owner row of type `kind` and return its id.
    fn insert_owner(&self, kind: &str, attributes: &Attributes) -> Result<Uuid>;

    /// Replace the attributes of an existing owner row.
    /// Returns `OwnerNotFound` if there is no such row.
    fn update_owner(&self, kind: &str, id: Uuid, attributes: &Attributes) -> Result<()>;

    /// Returns Ok(None) if the row does not exist.
    fn load_owner(&self, kind: &str, id: Uuid) -> Result<Option<Attributes>>;

    /// Every owner row of type `kind`, in insertion order.
    fn list_owners(&self, kind: &str) -> Result<Vec<(Uuid, Attributes)>>;

    /// Returns whether a row was removed.
    fn delete_owner(&self, kind: &str, id: Uuid) -> Result<bool>;

    // --- Spec rows ---

    fn insert_spec(&self, spec: &Spec) -> Result<()>;

    /// Replace the spec row with the same id.
    fn update_spec(&self, spec: &Spec) -> Result<()>;

    /// All specs of an owner, in insertion order.
    fn specs_for(&self, owner: &OwnerRef) -> Result<Vec<Spec>>;

    /// Specs of all `owners` in one read, in insertion order. Callers group
    /// the rows by [`Spec::owner`].
    fn specs_for_many(&self, owners: &[OwnerRef]) -> Result<Vec<Spec>>;

    /// Returns the number of removed rows.
    fn delete_specs_for(&self, owner: &OwnerRef) -> Result<usize>;

    // --- Buyable rows ---

    fn insert_buyable(&self, record: &BuyableRecord) -> Result<()>;

    /// Replace the buyable row with the same id.
    fn update_buyable(&self, record: &BuyableRecord) -> Result<()>;

    /// The first buyable row of an owner.
    fn buyable_for(&self, owner: &OwnerRef) -> Result<Option<BuyableRecord>>;

    /// Buyable rows of all `owners` in one read, in insertion order.
    fn buyables_for_many(&self, owners: &[OwnerRef]) -> Result<Vec<BuyableRecord>>;
}
