use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::pod::LoadState;
use crate::shadow::PodShadow;

/// The value-mode pod: exactly one of a serialize view or a deserialize
/// view, never both.
///
/// A pod built with [`from_value`] carries the serialize view and is what
/// the archive writes; it can be queried for the [`view`] but never
/// constructed from. A pod built with [`empty`] carries a deserialize
/// slot, is populated by the archive, and supports exactly one
/// [`construct`] call.
///
/// [`from_value`]: SerializationPod::from_value
/// [`view`]: SerializationPod::view
/// [`empty`]: SerializationPod::empty
/// [`construct`]: SerializationPod::construct
pub enum SerializationPod<'a, T: PodShadow + 'a> {
    /// Serialization half: a live object's view.
    Save(T::SerializeView<'a>),
    /// Deserialization half: the slot the archive populates.
    Load(LoadState<T::DeserializeView>),
}

impl<'a, T: PodShadow + 'a> SerializationPod<'a, T> {
    /// Builds a serializing pod over a live instance.
    pub fn from_value(value: &'a T) -> Self {
        Self::Save(value.serialize_view())
    }

    /// Builds an empty deserializing pod.
    pub fn empty() -> Self {
        Self::Load(LoadState::Empty)
    }

    /// Whether this pod carries the serialization half.
    #[inline]
    pub fn is_saving(&self) -> bool {
        matches!(self, Self::Save(_))
    }

    /// The serialize view.
    ///
    /// # Panics
    ///
    /// Panics on a deserializing pod.
    pub fn view(&self) -> &T::SerializeView<'a> {
        match self {
            Self::Save(view) => view,
            Self::Load(_) => panic!(
                "the serialize view of `{}` is not available on a deserializing pod",
                T::shadow_type_path()
            ),
        }
    }

    /// Stores the view read by the archive.
    ///
    /// # Panics
    ///
    /// Panics on a serializing pod, or when a view is already present.
    pub fn populate(&mut self, view: T::DeserializeView) {
        match self {
            Self::Load(slot) => slot.populate(view),
            Self::Save(_) => panic!(
                "`populate` invoked on a serializing pod of `{}`",
                T::shadow_type_path()
            ),
        }
    }

    /// Consumes the populated view, producing the fully constructed value.
    ///
    /// # Panics
    ///
    /// Panics on a serializing pod, and when the view has been consumed
    /// already or was never populated.
    pub fn construct(mut self) -> T {
        match &mut self {
            Self::Load(slot) => T::from_view(slot.take()),
            Self::Save(_) => panic!(
                "`construct` invoked on a serializing pod of `{}`",
                T::shadow_type_path()
            ),
        }
    }
}

impl<'a, T: PodShadow + 'a> Serialize for SerializationPod<'a, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.view().serialize(serializer)
    }
}

impl<'de, 'a, T: PodShadow + 'a> Deserialize<'de> for SerializationPod<'a, T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let view = <T::DeserializeView as Deserialize<'de>>::deserialize(deserializer)?;
        let mut pod = Self::empty();
        pod.populate(view);
        Ok(pod)
    }
}
