use core::cell::Cell;
use core::marker::PhantomData;

use serde::de::{self, Deserialize, DeserializeSeed, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::pod::LoadState;
use crate::registry::{self, ErasedShadow, LoadErasedFn};

/// Wire entry holding the concrete-type discriminator.
pub(crate) const TYPE_ENTRY: &str = "type";
/// Wire entry holding the concrete pod payload.
pub(crate) const VALUE_ENTRY: &str = "value";

// -----------------------------------------------------------------------------
// PolymorphicSavePod

/// Pointer-mode serialization pod.
///
/// Created unset, then bound exactly once to the base-typed handle being
/// serialized; the back-reference is what the archive visit reads through.
/// Setting it twice, or serializing before it is set, is defective calling
/// code and panics.
pub struct PolymorphicSavePod<'a, B: ?Sized> {
    original_base: Cell<Option<&'a B>>,
}

impl<'a, B: ?Sized> PolymorphicSavePod<'a, B> {
    /// Builds a pod with the back-reference unset.
    pub fn new() -> Self {
        Self {
            original_base: Cell::new(None),
        }
    }

    /// Records the handle the archive visit serializes through.
    ///
    /// # Panics
    ///
    /// Panics when the original base has already been set.
    pub fn set_original_base(&self, base: &'a B) {
        if self.original_base.get().is_some() {
            panic!("the original base class has already been set");
        }
        self.original_base.set(Some(base));
    }

    /// The recorded handle.
    ///
    /// # Panics
    ///
    /// Panics when the original base has not been set.
    pub fn original_base(&self) -> &'a B {
        match self.original_base.get() {
            Some(base) => base,
            None => panic!("the original base class has not been set"),
        }
    }
}

impl<B: ?Sized + ErasedShadow> Serialize for PolymorphicSavePod<'_, B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let erased = self.original_base();

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(TYPE_ENTRY, erased.shadow_type_path())?;
        map.serialize_key(VALUE_ENTRY)?;

        let mut outcome: Option<Result<(), S::Error>> = None;
        erased.with_save_view(&mut |view| {
            outcome = Some(map.serialize_value(view));
        });
        match outcome {
            Some(result) => result?,
            None => panic!(
                "`with_save_view` for `{}` did not yield a view",
                erased.shadow_type_path()
            ),
        }

        map.end()
    }
}

// -----------------------------------------------------------------------------
// PolymorphicLoadPod

/// Pointer-mode deserialization pod.
///
/// The archive resolves the serialized discriminator through the
/// [`registry`] and populates the slot with an owning handle typed as the
/// declared base; [`construct_ptr`](Self::construct_ptr) hands it out
/// exactly once.
pub struct PolymorphicLoadPod<B: ?Sized + 'static> {
    slot: LoadState<Box<B>>,
}

impl<B: ?Sized + 'static> PolymorphicLoadPod<B> {
    /// Consumes the populated slot, returning the reconstructed instance
    /// as an owning base handle.
    ///
    /// # Panics
    ///
    /// Panics when the slot has been consumed already or was never
    /// populated.
    pub fn construct_ptr(&mut self) -> Box<B> {
        self.slot.take()
    }
}

impl<'de, B: ?Sized + 'static> Deserialize<'de> for PolymorphicLoadPod<B> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(PodVisitor(PhantomData))
    }
}

struct PodVisitor<B: ?Sized>(PhantomData<fn() -> Box<B>>);

impl<'de, B: ?Sized + 'static> Visitor<'de> for PodVisitor<B> {
    type Value = PolymorphicLoadPod<B>;

    fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
        formatter.write_str("polymorphic pod map with `type` and `value` entries")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        match map.next_key::<String>()? {
            Some(key) if key == TYPE_ENTRY => {}
            Some(key) => {
                return Err(de::Error::custom(format!(
                    "expected `{TYPE_ENTRY}` entry, found `{key}`"
                )));
            }
            None => {
                return Err(de::Error::custom(format!("missing `{TYPE_ENTRY}` entry")));
            }
        }
        let type_path: String = map.next_value()?;

        let load = registry::resolve::<B>(&type_path)
            .ok_or_else(|| de::Error::custom(registry::unregistered_message::<B>(&type_path)))?;

        match map.next_key::<String>()? {
            Some(key) if key == VALUE_ENTRY => {}
            Some(key) => {
                return Err(de::Error::custom(format!(
                    "expected `{VALUE_ENTRY}` entry, found `{key}`"
                )));
            }
            None => {
                return Err(de::Error::custom(format!("missing `{VALUE_ENTRY}` entry")));
            }
        }
        let boxed = map.next_value_seed(ErasedLoadSeed { load })?;

        if map.next_key::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::custom("unexpected entry after polymorphic pod"));
        }

        let mut slot = LoadState::Empty;
        slot.populate(boxed);
        Ok(PolymorphicLoadPod { slot })
    }
}

struct ErasedLoadSeed<B: ?Sized + 'static> {
    load: LoadErasedFn<B>,
}

impl<'de, B: ?Sized + 'static> DeserializeSeed<'de> for ErasedLoadSeed<B> {
    type Value = Box<B>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut erased = <dyn erased_serde::Deserializer>::erase(deserializer);
        (self.load)(&mut erased).map_err(de::Error::custom)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::PolymorphicSavePod;
    use crate::registry::ErasedShadow;

    struct Probe;

    impl ErasedShadow for Probe {
        fn shadow_type_path(&self) -> &'static str {
            "tests::Probe"
        }

        fn with_save_view(&self, _: &mut dyn FnMut(&dyn erased_serde::Serialize)) {}

        fn register_shadow_types(&self) {}
    }

    #[test]
    fn back_reference_set_once() {
        let probe = Probe;
        let pod = PolymorphicSavePod::<Probe>::new();
        pod.set_original_base(&probe);
        assert_eq!(pod.original_base().shadow_type_path(), "tests::Probe");
    }

    #[test]
    #[should_panic(expected = "already been set")]
    fn back_reference_double_set() {
        let probe = Probe;
        let pod = PolymorphicSavePod::<Probe>::new();
        pod.set_original_base(&probe);
        pod.set_original_base(&probe);
    }

    #[test]
    #[should_panic(expected = "has not been set")]
    fn back_reference_unset_read() {
        PolymorphicSavePod::<Probe>::new().original_base();
    }
}
