//! Shared-object mode: types whose lifetime is exclusively managed by a
//! shared-ownership handle.
//!
//! A `#[pod(shared)]` type never serializes by value; only `Arc`
//! round-trips are supported, and identity is preserved: within one
//! archive session, every occurrence of the same instance after the first
//! writes only an alias id, and deserialization yields clones of a single
//! reconstructed `Arc` rather than independent copies.

pub(crate) mod session;

use core::fmt;
use std::sync::Arc;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::member::PodMember;
use crate::pod::SerializationPod;
use crate::shadow::PodShadow;

const ID_ENTRY: &str = "id";
const VALUE_ENTRY: &str = "value";

/// Marker for types restricted to shared-handle serialization.
///
/// Implemented by the derive for `#[pod(shared)]` types, which also skips
/// their by-value entry points and member projection; `Arc<T>` is the
/// only way such a type crosses the wire.
pub trait SharedShadow: PodShadow + 'static {}

/// Runs `f` with one save session spanning every entry-point call made
/// inside it, so aliasing is preserved across separate top-level
/// serializations.
pub fn with_save_session<R>(f: impl FnOnce() -> R) -> R {
    let _scope = session::save_scope();
    f()
}

/// Counterpart of [`with_save_session`] for deserialization. The calls
/// made inside must mirror the save-side calls in order.
pub fn with_load_session<R>(f: impl FnOnce() -> R) -> R {
    let _scope = session::load_scope();
    f()
}

// -----------------------------------------------------------------------------
// SharedSaveRef

/// Session-aware serialize projection of an `Arc<T>`.
pub struct SharedSaveRef<'a, T: SharedShadow> {
    inner: &'a Arc<T>,
}

impl<'a, T: SharedShadow> SharedSaveRef<'a, T> {
    pub(crate) fn new(inner: &'a Arc<T>) -> Self {
        Self { inner }
    }
}

impl<T: SharedShadow> Serialize for SharedSaveRef<'_, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let addr = Arc::as_ptr(self.inner) as usize;
        let (id, first) = session::with_save(|session| session.intern(addr));

        let mut map = serializer.serialize_map(Some(if first { 2 } else { 1 }))?;
        map.serialize_entry(ID_ENTRY, &id)?;
        if first {
            map.serialize_entry(VALUE_ENTRY, &SerializationPod::from_value(&**self.inner))?;
        }
        map.end()
    }
}

// -----------------------------------------------------------------------------
// SharedLoadProxy

/// Session-aware deserialize placeholder for an `Arc<T>`.
///
/// The first occurrence of an instance materializes it through the pod and
/// records it in the load session; aliases resolve to clones of that same
/// `Arc`.
pub struct SharedLoadProxy<T: SharedShadow> {
    inner: Arc<T>,
}

impl<T: SharedShadow> SharedLoadProxy<T> {
    pub(crate) fn into_arc(self) -> Arc<T> {
        self.inner
    }
}

impl<'de, T: SharedShadow> Deserialize<'de> for SharedLoadProxy<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ProxyVisitor<T>(core::marker::PhantomData<fn() -> T>);

        impl<'de, T: SharedShadow> Visitor<'de> for ProxyVisitor<T> {
            type Value = SharedLoadProxy<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("shared object map with `id` and optional `value`")
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                match map.next_key::<String>()? {
                    Some(key) if key == ID_ENTRY => {}
                    Some(key) => {
                        return Err(de::Error::custom(format!(
                            "expected `{ID_ENTRY}` entry, found `{key}`"
                        )));
                    }
                    None => {
                        return Err(de::Error::custom(format!("missing `{ID_ENTRY}` entry")));
                    }
                }
                let id: u32 = map.next_value()?;

                let inner = match map.next_key::<String>()? {
                    Some(key) if key == VALUE_ENTRY => {
                        let pod: SerializationPod<'static, T> = map.next_value()?;
                        let shared = Arc::new(pod.construct());
                        session::with_load(|session| session.insert(id, shared.clone()));
                        shared
                    }
                    Some(key) => {
                        return Err(de::Error::custom(format!(
                            "expected `{VALUE_ENTRY}` entry, found `{key}`"
                        )));
                    }
                    None => session::with_load(|session| session.resolve::<T>(id)).ok_or_else(
                        || {
                            de::Error::custom(format!(
                                "shared object id {id} has no materialized instance in this \
                                 archive session"
                            ))
                        },
                    )?,
                };

                if map.next_key::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::custom("unexpected entry after shared object"));
                }

                Ok(SharedLoadProxy { inner })
            }
        }

        deserializer.deserialize_map(ProxyVisitor(core::marker::PhantomData))
    }
}

// -----------------------------------------------------------------------------
// Member projection

impl<T: SharedShadow> PodMember for Arc<T> {
    type SaveAs<'a>
        = SharedSaveRef<'a, T>
    where
        Self: 'a;
    type LoadAs = SharedLoadProxy<T>;

    #[inline]
    fn save_as(&self) -> SharedSaveRef<'_, T> {
        SharedSaveRef::new(self)
    }

    #[inline]
    fn materialize(data: SharedLoadProxy<T>) -> Self {
        data.into_arc()
    }
}
