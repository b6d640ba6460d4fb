//! Archive engines: the collaborators that turn named values into bytes.
//!
//! The protocol never encodes anything itself; it hands the engine a
//! single named value (the pod) and lets the engine pick the wire format.
//! Two engines ship, [`RonArchive`] and [`JsonArchive`]; both write the
//! top-level value as a one-entry name/value map keyed by the tag and
//! verify that tag on the way back in.

mod counting;
mod error;
mod json;
mod ron;
mod tagged;

pub use counting::CountingSink;
pub use error::ArchiveError;
pub use json::JsonArchive;
pub use ron::RonArchive;

pub(crate) use tagged::{Tagged, TaggedSeed};

use std::io;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A wire-format engine.
///
/// Implementations couple an encoding with the top-level tagging
/// convention: `save` writes `value` under `tag`, `load` reads a value
/// back out from under the same `tag`, failing when the tag is absent or
/// different. Archive-level failures (malformed input, missing tags, type
/// mismatches) are propagated as [`ArchiveError`]s; the protocol adds no
/// retry or suppression on top.
pub trait Archive {
    /// Engine name used in diagnostics.
    const NAME: &'static str;

    /// Serializes `value` under `tag` into `writer`.
    fn save<W, T>(writer: W, tag: &str, value: &T) -> Result<(), ArchiveError>
    where
        W: io::Write,
        T: ?Sized + Serialize;

    /// Deserializes a value stored under `tag` from `reader`.
    fn load<R, T>(reader: R, tag: &str) -> Result<T, ArchiveError>
    where
        R: io::Read,
        T: DeserializeOwned;
}
