use crate::attributes::value::{coerce, AttrValue};
use crate::attributes::{BuyableField, SpecField};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Polymorphic reference from a child row to its owner.
///
/// `kind` is the owner's type alias (see [`MorphMap`](crate::morph::MorphMap)),
/// stored in the `buyable_type` column; `id` goes to `buyable_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerRef {
    #[serde(rename = "buyable_type")]
    pub kind: String,
    #[serde(rename = "buyable_id")]
    pub id: Uuid,
}

impl OwnerRef {
    pub fn new(kind: impl Into<String>, id: Uuid) -> Self {
        Self {
            kind: kind.into(),
            id,
        }
    }
}

impl std::fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

/// A persisted purchasable variant of an owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spec {
    pub id: Uuid,
    pub name: String,
    /// Minor currency units
    pub price: i64,
    pub stock: i64,
    pub sku: Option<String>,
    #[serde(flatten)]
    pub owner: OwnerRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Spec {
    /// Build a new spec row from pending fields. Missing counts default to 0,
    /// a missing name to `default_name`.
    pub fn from_fields(owner: OwnerRef, fields: &SpecFields, default_name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: fields
                .name
                .clone()
                .unwrap_or_else(|| default_name.to_string()),
            price: fields.price.unwrap_or(0),
            stock: fields.stock.unwrap_or(0),
            sku: fields.sku.clone(),
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every field that is pending in `fields`.
    pub fn apply(&mut self, fields: &SpecFields) {
        if let Some(name) = &fields.name {
            self.name = name.clone();
        }
        if let Some(price) = fields.price {
            self.price = price;
        }
        if let Some(stock) = fields.stock {
            self.stock = stock;
        }
        if let Some(sku) = &fields.sku {
            self.sku = Some(sku.clone());
        }
        self.updated_at = Utc::now();
    }

    pub fn get(&self, field: SpecField) -> Value {
        match field {
            SpecField::Name => Value::String(self.name.clone()),
            SpecField::Price => Value::from(self.price),
            SpecField::Stock => Value::from(self.stock),
            SpecField::Sku => self.sku.clone().map(Value::String).unwrap_or(Value::Null),
        }
    }
}

/// The one-per-owner record of non-variant purchase metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyableRecord {
    pub id: Uuid,
    pub vendor: Option<String>,
    #[serde(flatten)]
    pub owner: OwnerRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BuyableRecord {
    pub fn from_fields(owner: OwnerRef, fields: &BuyableFields) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            vendor: fields.vendor.clone(),
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, fields: &BuyableFields) {
        if let Some(vendor) = &fields.vendor {
            self.vendor = Some(vendor.clone());
        }
        self.updated_at = Utc::now();
    }

    /// Flat copy of the record's attribute fields.
    pub fn fields(&self) -> BuyableFields {
        BuyableFields {
            vendor: self.vendor.clone(),
        }
    }
}

/// Spec fields written in memory and not yet synchronized.
///
/// `None` means "not written", not "cleared".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecFields {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i64>,
    pub sku: Option<String>,
}

impl SpecFields {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.stock.is_none() && self.sku.is_none()
    }

    pub fn get(&self, field: SpecField) -> Option<Value> {
        match field {
            SpecField::Name => self.name.clone().map(Value::String),
            SpecField::Price => self.price.map(Value::from),
            SpecField::Stock => self.stock.map(Value::from),
            SpecField::Sku => self.sku.clone().map(Value::String),
        }
    }

    /// Coerce and store `value`. Fails without touching the field when the
    /// value has the wrong shape.
    pub fn set(&mut self, field: SpecField, value: &Value) -> Result<()> {
        let coerced = coerce(field.key(), field.kind(), value)?;
        match field {
            SpecField::Name => self.name = coerced.into_text(),
            SpecField::Price => self.price = coerced.as_count(),
            SpecField::Stock => self.stock = coerced.as_count(),
            SpecField::Sku => self.sku = coerced.into_text(),
        }
        Ok(())
    }
}

/// Buyable fields written in memory, or the snapshot of a loaded record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuyableFields {
    pub vendor: Option<String>,
}

impl BuyableFields {
    pub fn is_empty(&self) -> bool {
        self.vendor.is_none()
    }

    pub fn get(&self, field: BuyableField) -> Option<Value> {
        match field {
            BuyableField::Vendor => self.vendor.clone().map(Value::String),
        }
    }

    pub fn set(&mut self, field: BuyableField, value: &Value) -> Result<()> {
        let coerced: AttrValue = coerce(field.key(), field.kind(), value)?;
        match field {
            BuyableField::Vendor => self.vendor = coerced.into_text(),
        }
        Ok(())
    }
}
