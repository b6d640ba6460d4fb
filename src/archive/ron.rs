use std::io;

use serde::Serialize;
use serde::de::{DeserializeOwned, DeserializeSeed};

use crate::archive::{Archive, ArchiveError, Tagged, TaggedSeed};

/// Text archive backed by `ron`.
///
/// The value is rendered to a RON string and written out whole; loading
/// consumes the reader to a string first. RON is a text format and this is
/// its native mode.
pub struct RonArchive;

impl Archive for RonArchive {
    const NAME: &'static str = "ron";

    fn save<W, T>(mut writer: W, tag: &str, value: &T) -> Result<(), ArchiveError>
    where
        W: io::Write,
        T: ?Sized + Serialize,
    {
        let text = ron::to_string(&Tagged { tag, value })
            .map_err(|source| ArchiveError::format(Self::NAME, source))?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    fn load<R, T>(mut reader: R, tag: &str) -> Result<T, ArchiveError>
    where
        R: io::Read,
        T: DeserializeOwned,
    {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        let mut deserializer = ron::Deserializer::from_str(&text)
            .map_err(|source| ArchiveError::format(Self::NAME, source))?;
        let value = TaggedSeed::<T>::new(tag)
            .deserialize(&mut deserializer)
            .map_err(|source| ArchiveError::format(Self::NAME, source))?;
        deserializer
            .end()
            .map_err(|source| ArchiveError::format(Self::NAME, source))?;
        Ok(value)
    }
}
