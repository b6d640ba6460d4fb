use std::io;

use serde::Serialize;
use serde::de::{DeserializeOwned, DeserializeSeed};

use crate::archive::{Archive, ArchiveError, Tagged, TaggedSeed};

/// Archive backed by `serde_json`, streaming straight to and from the
/// reader/writer.
pub struct JsonArchive;

impl Archive for JsonArchive {
    const NAME: &'static str = "json";

    fn save<W, T>(writer: W, tag: &str, value: &T) -> Result<(), ArchiveError>
    where
        W: io::Write,
        T: ?Sized + Serialize,
    {
        serde_json::to_writer(writer, &Tagged { tag, value })
            .map_err(|source| ArchiveError::format(Self::NAME, source))
    }

    fn load<R, T>(reader: R, tag: &str) -> Result<T, ArchiveError>
    where
        R: io::Read,
        T: DeserializeOwned,
    {
        let mut deserializer = serde_json::Deserializer::from_reader(reader);
        let value = TaggedSeed::<T>::new(tag)
            .deserialize(&mut deserializer)
            .map_err(|source| ArchiveError::format(Self::NAME, source))?;
        deserializer
            .end()
            .map_err(|source| ArchiveError::format(Self::NAME, source))?;
        Ok(value)
    }
}
