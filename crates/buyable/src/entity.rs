//! Host entities that can be made buyable.
//!
//! Any `Serialize + DeserializeOwned` struct qualifies. Its serialized object
//! form is the entity's set of *native* attributes: what the store persists
//! as the owner row and what string-keyed routing falls through to.

use crate::error::{BuyableError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

pub trait Entity: Serialize + DeserializeOwned {
    /// Fully qualified type name, used for the `buyable_type` column when no
    /// alias is registered.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

pub type Attributes = Map<String, Value>;

pub(crate) fn to_attributes<E: Entity>(entity: &E) -> Result<Attributes> {
    match serde_json::to_value(entity)? {
        Value::Object(map) => Ok(map),
        other => Err(BuyableError::NotAnObject(other.to_string())),
    }
}

pub(crate) fn from_attributes<E: Entity>(attributes: Attributes) -> Result<E> {
    Ok(serde_json::from_value(Value::Object(attributes))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Widget {
        title: String,
    }

    impl Entity for Widget {}

    #[derive(Serialize, Deserialize)]
    struct Scalar(u32);

    impl Entity for Scalar {}

    #[test]
    fn attributes_round_trip() {
        let widget = Widget {
            title: "Lamp".into(),
        };
        let mut attrs = to_attributes(&widget).unwrap();
        assert_eq!(attrs["title"], json!("Lamp"));

        attrs.insert("title".into(), json!("Desk"));
        let widget: Widget = from_attributes(attrs).unwrap();
        assert_eq!(widget.title, "Desk");
    }

    #[test]
    fn non_object_entities_are_rejected() {
        let err = to_attributes(&Scalar(3)).unwrap_err();
        assert!(matches!(err, BuyableError::NotAnObject(_)));
    }

    #[test]
    fn default_type_name_is_qualified() {
        assert!(Widget::type_name().ends_with("Widget"));
        assert!(Widget::type_name().contains("::"));
    }
}
