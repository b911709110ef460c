//! Attribute registry for spec and buyable keys.

/// How a value written to an attribute is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Whole number that must not be negative (price in minor units, stock)
    Count,

    /// Free text (spec name, sku, vendor)
    Text,
}

/// A field of a purchasable variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpecField {
    Name,
    Price,
    Stock,
    Sku,
}

/// Keys recognized as spec attributes, in serialization order.
pub const SPEC_ATTRIBUTES: &[SpecField] = &[
    SpecField::Name,
    SpecField::Price,
    SpecField::Stock,
    SpecField::Sku,
];

impl SpecField {
    /// Parse a routing key. `"spec"` is the public alias of the name column.
    pub fn parse(key: &str) -> Option<Self> {
        SPEC_ATTRIBUTES.iter().copied().find(|field| field.key() == key)
    }

    /// The key callers use to address this field.
    pub const fn key(self) -> &'static str {
        match self {
            SpecField::Name => "spec",
            SpecField::Price => "price",
            SpecField::Stock => "stock",
            SpecField::Sku => "sku",
        }
    }

    pub const fn kind(self) -> AttributeKind {
        match self {
            SpecField::Price | SpecField::Stock => AttributeKind::Count,
            SpecField::Name | SpecField::Sku => AttributeKind::Text,
        }
    }
}

/// A field of the one-per-owner buyable record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuyableField {
    Vendor,
}

/// Keys recognized as buyable attributes.
pub const BUYABLE_ATTRIBUTES: &[BuyableField] = &[BuyableField::Vendor];

impl BuyableField {
    pub fn parse(key: &str) -> Option<Self> {
        BUYABLE_ATTRIBUTES
            .iter()
            .copied()
            .find(|field| field.key() == key)
    }

    pub const fn key(self) -> &'static str {
        match self {
            BuyableField::Vendor => "vendor",
        }
    }

    pub const fn kind(self) -> AttributeKind {
        match self {
            BuyableField::Vendor => AttributeKind::Text,
        }
    }
}
