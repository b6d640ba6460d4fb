//! The process-wide polymorphic dispatch registrar.
//!
//! Serializing through a base-typed handle records the concrete type's
//! path as a discriminator; deserializing resolves that discriminator back
//! to an erased load function which reconstructs the concrete pod and
//! returns it as an owning base handle. This module owns the association.
//!
//! Registration is idempotent and must happen before the first
//! pointer-based deserialization of a hierarchy. Two paths feed the
//! tables:
//!
//! - explicit registration, triggered lazily by every pointer-mode
//!   serialization through
//!   [`ErasedShadow::register_shadow_types`];
//! - link-time collected [`PtrRegistration`] records (the `auto_register`
//!   feature), folded in once per hierarchy by the generated seeding hook
//!   before any lookup.
//!
//! Lookups for a type that never registered fail with a diagnostic that
//! lists what is registered.
//!
//! The tables are shared mutable state and are guarded by a lock: several
//! concrete types may race to self-register on first use in a threaded
//! host program.

mod erased;

pub use erased::{ErasedShadow, PtrRegistration};

use core::any::TypeId;
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::hash::HashMap;

/// Erased deserialization entry: reads a concrete pod and returns the
/// reconstructed instance as an owning handle of the hierarchy base `B`.
pub type LoadErasedFn<B> =
    fn(&mut dyn erased_serde::Deserializer<'_>) -> Result<Box<B>, erased_serde::Error>;

struct Hierarchy {
    base_name: &'static str,
    seeded: bool,
    entries: HashMap<&'static str, Box<dyn core::any::Any + Send + Sync>>,
}

impl Hierarchy {
    fn new(base_name: &'static str) -> Self {
        Self {
            base_name,
            seeded: false,
            entries: HashMap::default(),
        }
    }
}

#[derive(Default)]
struct Tables {
    hierarchies: HashMap<TypeId, Hierarchy>,
}

fn tables() -> &'static RwLock<Tables> {
    static TABLES: OnceLock<RwLock<Tables>> = OnceLock::new();
    TABLES.get_or_init(|| RwLock::new(Tables::default()))
}

/// Registers the concrete type `type_path` under the hierarchy base `B`.
///
/// Registering the same pair twice is a no-op.
pub fn register<B: ?Sized + 'static>(type_path: &'static str, load: LoadErasedFn<B>) {
    let mut tables = tables().write().unwrap_or_else(PoisonError::into_inner);
    let hierarchy = tables
        .hierarchies
        .entry(TypeId::of::<B>())
        .or_insert_with(|| Hierarchy::new(core::any::type_name::<B>()));

    if hierarchy.entries.contains_key(type_path) {
        return;
    }
    log::debug!(
        "registering `{type_path}` under polymorphic base `{}`",
        hierarchy.base_name
    );
    hierarchy.entries.insert(type_path, Box::new(load));
}

/// Folds link-time registrations for base `B` into the tables, once.
///
/// The closure receives a sink and submits `(type_path, load)` pairs;
/// repeated calls for the same hierarchy do nothing. Generated hierarchy
/// support invokes this before every lookup.
pub fn seed_once<B: ?Sized + 'static>(
    seed: impl FnOnce(&mut dyn FnMut(&'static str, LoadErasedFn<B>)),
) {
    {
        let tables = tables().read().unwrap_or_else(PoisonError::into_inner);
        if tables
            .hierarchies
            .get(&TypeId::of::<B>())
            .is_some_and(|hierarchy| hierarchy.seeded)
        {
            return;
        }
    }

    // Collected outside the lock; the closure iterates link-time state and
    // must not observe the tables mid-update.
    let mut pending: Vec<(&'static str, LoadErasedFn<B>)> = Vec::new();
    seed(&mut |type_path, load| pending.push((type_path, load)));

    let mut tables = tables().write().unwrap_or_else(PoisonError::into_inner);
    let hierarchy = tables
        .hierarchies
        .entry(TypeId::of::<B>())
        .or_insert_with(|| Hierarchy::new(core::any::type_name::<B>()));
    if hierarchy.seeded {
        return;
    }
    hierarchy.seeded = true;

    let mut added = 0usize;
    for (type_path, load) in pending {
        if !hierarchy.entries.contains_key(type_path) {
            hierarchy.entries.insert(type_path, Box::new(load));
            added += 1;
        }
    }
    log::debug!(
        "seeded {added} link-time registration(s) for polymorphic base `{}`",
        hierarchy.base_name
    );
}

/// Resolves a serialized discriminator to the erased load entry for the
/// hierarchy base `B`.
pub fn resolve<B: ?Sized + 'static>(type_path: &str) -> Option<LoadErasedFn<B>> {
    let tables = tables().read().unwrap_or_else(PoisonError::into_inner);
    let hierarchy = tables.hierarchies.get(&TypeId::of::<B>())?;
    let entry = hierarchy.entries.get(type_path)?;
    entry.downcast_ref::<LoadErasedFn<B>>().copied()
}

/// Whether `type_path` is registered under the hierarchy base `B`.
pub fn is_registered<B: ?Sized + 'static>(type_path: &str) -> bool {
    resolve::<B>(type_path).is_some()
}

/// The discriminators registered under the hierarchy base `B`, sorted.
pub fn registered_paths<B: ?Sized + 'static>() -> Vec<&'static str> {
    let tables = tables().read().unwrap_or_else(PoisonError::into_inner);
    let mut paths: Vec<&'static str> = tables
        .hierarchies
        .get(&TypeId::of::<B>())
        .map(|hierarchy| hierarchy.entries.keys().copied().collect())
        .unwrap_or_default();
    paths.sort_unstable();
    paths
}

/// Diagnostic for a lookup of an unregistered type.
pub fn unregistered_message<B: ?Sized + 'static>(type_path: &str) -> String {
    let known = registered_paths::<B>();
    format!(
        "type `{type_path}` is not registered under polymorphic base `{}` (registered: [{}]); \
         register the type before deserializing through this base",
        core::any::type_name::<B>(),
        known.join(", "),
    )
}

// -----------------------------------------------------------------------------
// Tests
