//! The top-level name/value wrapper.
//!
//! Only the outermost value carries a tag; everything below it is named by
//! the views themselves.

use core::fmt;
use core::marker::PhantomData;

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

pub(crate) struct Tagged<'a, T: ?Sized> {
    pub tag: &'a str,
    pub value: &'a T,
}

impl<T: ?Sized + Serialize> Serialize for Tagged<'_, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.tag, self.value)?;
        map.end()
    }
}

pub(crate) struct TaggedSeed<'a, T> {
    tag: &'a str,
    marker: PhantomData<fn() -> T>,
}

impl<'a, T> TaggedSeed<'a, T> {
    pub fn new(tag: &'a str) -> Self {
        Self {
            tag,
            marker: PhantomData,
        }
    }
}

impl<'de, T: serde::Deserialize<'de>> DeserializeSeed<'de> for TaggedSeed<'_, T> {
    type Value = T;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TaggedVisitor {
            tag: self.tag,
            marker: self.marker,
        })
    }
}

struct TaggedVisitor<'a, T> {
    tag: &'a str,
    marker: PhantomData<fn() -> T>,
}

impl<'de, T: serde::Deserialize<'de>> Visitor<'de> for TaggedVisitor<'_, T> {
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a single entry tagged `{}`", self.tag)
    }

    fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let found = match map.next_key::<String>()? {
            Some(found) => found,
            None => {
                return Err(de::Error::custom(format!(
                    "missing tagged entry `{}`",
                    self.tag
                )));
            }
        };
        if found != self.tag {
            return Err(de::Error::custom(format!(
                "expected tagged entry `{}`, found `{found}`",
                self.tag
            )));
        }

        let value = map.next_value::<T>()?;

        if map.next_key::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::custom(format!(
                "unexpected entry after `{}`",
                self.tag
            )));
        }

        Ok(value)
    }
}
