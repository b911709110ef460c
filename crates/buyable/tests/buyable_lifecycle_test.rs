mod common;

use buyable::{BuyableConfig, BuyableError, BuyableStore, LifecycleEvent, MemBackend, StorageBackend};
use common::{attrs, item, store, Item};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn spec_fields_set_on_create_survive_reload() {
    let store = store();
    let mut owner = store.make(item("Lamp"));
    owner.set_attribute("spec", "default").unwrap();
    owner.set_attribute("price", 1250).unwrap();
    owner.set_attribute("stock", 4).unwrap();
    owner.set_attribute("sku", "LMP-1").unwrap();
    store.save(&mut owner).unwrap();

    let loaded = store.find(owner.id().unwrap()).unwrap();
    assert_eq!(loaded.specs().len(), 1);
    let spec = &loaded.specs()[0];
    assert_eq!(spec.name, "default");
    assert_eq!(spec.price, 1250);
    assert_eq!(spec.stock, 4);
    assert_eq!(spec.sku.as_deref(), Some("LMP-1"));
}

#[test]
fn single_spec_owner_reads_without_selector() {
    let store = store();
    let mut owner = store.make(item("Lamp"));
    owner.set_spec("price", 800).unwrap();
    owner.set_spec("stock", 2).unwrap();
    store.save(&mut owner).unwrap();

    let loaded = store.find(owner.id().unwrap()).unwrap();
    assert!(!loaded.is_specified());
    assert_eq!(loaded.get_attribute("price").unwrap(), Some(json!(800)));
    assert_eq!(loaded.get_attribute("stock").unwrap(), Some(json!(2)));
    assert_eq!(loaded.get_attribute("spec").unwrap(), Some(json!("default")));
}

#[test]
fn zero_or_many_specs_need_a_selector() {
    let store = store();
    let mut bare = store.make(item("Bare"));
    store.save(&mut bare).unwrap();
    let bare = store.find(bare.id().unwrap()).unwrap();
    assert!(matches!(
        bare.get_attribute("price").unwrap_err(),
        BuyableError::SpecNotSpecified
    ));

    let mut multi = store.make(item("Shirt"));
    for (name, price) in [("small", 100), ("large", 300)] {
        multi.set_spec("spec", name).unwrap();
        multi.set_spec("price", price).unwrap();
        store.save(&mut multi).unwrap();
    }
    let multi = store.find(multi.id().unwrap()).unwrap();
    assert_eq!(multi.specs().len(), 2);
    assert!(multi.get_spec("price").unwrap_err().is_invalid_argument());
}

#[test]
fn updating_by_name_upserts() {
    let store = store();
    let mut owner = store.make(item("Shirt"));
    owner.set_spec("spec", "small").unwrap();
    owner.set_spec("price", 100).unwrap();
    store.save(&mut owner).unwrap();

    let mut loaded = store.find(owner.id().unwrap()).unwrap();
    loaded.set_spec("spec", "small").unwrap();
    loaded.set_spec("price", 120).unwrap();
    store.save(&mut loaded).unwrap();
    assert_eq!(loaded.specs().len(), 1);
    assert_eq!(loaded.specs()[0].price, 120);

    let mut loaded = store.find(owner.id().unwrap()).unwrap();
    loaded.set_spec("spec", "large").unwrap();
    loaded.set_spec("price", 300).unwrap();
    store.save(&mut loaded).unwrap();

    let names: Vec<_> = store
        .find(owner.id().unwrap())
        .unwrap()
        .specs()
        .iter()
        .map(|s| s.name.clone())
        .collect();
    assert_eq!(names, vec!["small", "large"]);
}

#[test]
fn deleting_owner_with_pending_specs_removes_them_but_keeps_buyable() {
    let store = store();
    let mut owner = store.make(item("Lamp"));
    owner.set_spec("price", 500).unwrap();
    owner.set_buyable("vendor", "Acme").unwrap();
    store.save(&mut owner).unwrap();
    let owner_ref = owner.owner_ref(store.owner_kind()).unwrap();

    store.delete(&mut owner).unwrap();

    assert!(store.backend().specs_for(&owner_ref).unwrap().is_empty());
    let record = store.backend().buyable_for(&owner_ref).unwrap().unwrap();
    assert_eq!(record.vendor.as_deref(), Some("Acme"));
    assert!(matches!(
        store.find(owner_ref.id).unwrap_err(),
        BuyableError::OwnerNotFound { .. }
    ));
}

#[test]
fn deleting_reloaded_owner_removes_its_specs() {
    let store = store();
    let mut owner = store.make(item("Shirt"));
    owner.set_spec("spec", "small").unwrap();
    owner.set_spec("price", 100).unwrap();
    store.save(&mut owner).unwrap();
    let id = owner.id().unwrap();
    let owner_ref = owner.owner_ref(store.owner_kind()).unwrap();
    store
        .upsert_spec(
            &owner_ref,
            &buyable::model::SpecFields {
                name: Some("large".into()),
                price: Some(300),
                ..Default::default()
            },
        )
        .unwrap();

    let mut fresh = store.find(id).unwrap();
    assert!(!fresh.is_spec_dirty());
    assert_eq!(fresh.specs().len(), 2);

    store.delete(&mut fresh).unwrap();

    assert_eq!(store.backend().spec_count(), 0);
    assert_eq!(store.backend().buyable_count(), 1);
}

#[test]
fn failed_fill_persists_nothing() {
    let store = store();
    let mut owner = store.make(item("Chair"));
    let err = owner
        .fill(attrs(json!({"price": 500, "stock": -1, "published": true})))
        .unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(!owner.is_specified());
    assert!(!owner.entity().published);

    store.save(&mut owner).unwrap();
    assert_eq!(store.backend().spec_count(), 0);
}

#[test]
fn fill_save_reload_serialize_round_trip() {
    let store = store();
    let mut owner = store.make(item("Chair"));
    owner
        .fill(attrs(json!({
            "price": 500,
            "stock": 10,
            "sku": "X1",
            "vendor": "Acme",
            "published": true
        })))
        .unwrap();
    store.save(&mut owner).unwrap();

    let loaded = store.find(owner.id().unwrap()).unwrap();
    let map = loaded.to_map().unwrap();
    assert_eq!(map["price"], json!(500));
    assert_eq!(map["stock"], json!(10));
    assert_eq!(map["sku"], json!("X1"));
    assert_eq!(map["vendor"], json!("Acme"));
    assert_eq!(map["spec"], json!("default"));
    assert_eq!(map["title"], json!("Chair"));
    assert_eq!(map["published"], json!(true));
    assert_eq!(map["id"], json!(owner.id().unwrap().to_string()));
}

#[test]
fn unknown_keys_are_invalid_arguments() {
    let store = store();
    let mut owner = store.make(item("Lamp"));
    let err = owner.set_spec("color", "red").unwrap_err();
    assert!(err.is_invalid_argument());
    let err = owner.set_buyable("color", "red").unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn specify_by_name_picks_that_spec() {
    let store = store();
    let mut owner = store.make(item("Shirt"));
    for (name, price) in [("small", 100), ("medium", 200), ("large", 300)] {
        owner.set_spec("spec", name).unwrap();
        owner.set_spec("price", price).unwrap();
        store.save(&mut owner).unwrap();
    }

    let mut loaded = store.find(owner.id().unwrap()).unwrap();
    loaded.specify("large");
    assert_eq!(loaded.get_spec("price").unwrap(), Some(json!(300)));
    assert_eq!(loaded.price().unwrap(), Some(300));
}

#[test]
fn updated_listeners_see_routed_changes() {
    let mut store: BuyableStore<Item, MemBackend> = BuyableStore::with_backend(MemBackend::new());
    let titles = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&titles);
    store.on(LifecycleEvent::Updated, move |_, owner| {
        sink.borrow_mut().push(owner.vendor());
    });

    let mut owner = store.make(item("Lamp"));
    store.save(&mut owner).unwrap();
    assert!(titles.borrow().is_empty());

    let mut loaded = store.find(owner.id().unwrap()).unwrap();
    loaded.set_attribute("vendor", "Acme").unwrap();
    store.save(&mut loaded).unwrap();
    assert_eq!(*titles.borrow(), vec![Some("Acme".to_string())]);
}

#[test]
fn configured_default_spec_name_is_used_by_fill() {
    let config = BuyableConfig {
        default_spec: "standard".to_string(),
        ..Default::default()
    };
    let store: BuyableStore<Item, MemBackend> = BuyableStore::with_config(MemBackend::new(), config);
    let mut owner = store.make(item("Lamp"));
    owner.fill(attrs(json!({"price": 10}))).unwrap();
    store.save(&mut owner).unwrap();

    assert_eq!(owner.specs()[0].name, "standard");
    let loaded = store.find(owner.id().unwrap()).unwrap();
    assert_eq!(loaded.default_spec(), "standard");
}

#[test]
fn entity_is_reachable_through_typed_accessors() {
    let store = store();
    let mut owner = store.make(item("Lamp"));
    owner.entity_mut().published = true;
    store.save(&mut owner).unwrap();

    let loaded = store.find(owner.id().unwrap()).unwrap();
    assert_eq!(
        loaded.into_entity(),
        Item {
            title: "Lamp".into(),
            published: true
        }
    );
}
