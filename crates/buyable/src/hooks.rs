//! Lifecycle events and listener registration.
//!
//! The store fires an event at each transition of an owner. For every event
//! the built-in child-record synchronization runs first, then registered
//! listeners in registration order. Listeners observe; they cannot fail the
//! operation.

use crate::buyable::Buyable;
use crate::entity::Entity;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// Owner loaded from storage
    Retrieved,
    /// Owner row inserted
    Created,
    /// Owner row updated, or spec/buyable data saved through routing
    Updated,
    /// Any successful save
    Saved,
    /// Owner row removed
    Deleted,
}

impl std::fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LifecycleEvent::Retrieved => "retrieved",
            LifecycleEvent::Created => "created",
            LifecycleEvent::Updated => "updated",
            LifecycleEvent::Saved => "saved",
            LifecycleEvent::Deleted => "deleted",
        };
        write!(f, "{}", name)
    }
}

pub type Listener<E> = Box<dyn Fn(LifecycleEvent, &Buyable<E>)>;

pub struct Hooks<E: Entity> {
    listeners: HashMap<LifecycleEvent, Vec<Listener<E>>>,
}

impl<E: Entity> Default for Hooks<E> {
    fn default() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }
}

impl<E: Entity> Hooks<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&mut self, event: LifecycleEvent, listener: F)
    where
        F: Fn(LifecycleEvent, &Buyable<E>) + 'static,
    {
        self.listeners
            .entry(event)
            .or_default()
            .push(Box::new(listener));
    }

    pub fn notify(&self, event: LifecycleEvent, owner: &Buyable<E>) {
        if let Some(listeners) = self.listeners.get(&event) {
            for listener in listeners {
                listener(event, owner);
            }
        }
    }
}
