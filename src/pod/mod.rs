//! The pod wrappers the archive engines actually visit.
//!
//! [`SerializationPod`] mediates value-mode round-trips,
//! [`PolymorphicSavePod`]/[`PolymorphicLoadPod`] mediate pointer-mode
//! round-trips through a hierarchy base. All of them fail fast (a panic,
//! not an error) when driven against the wrong mode: that is
//! defective calling code, not a recoverable archive condition.

mod load_state;
mod polymorphic;
mod value;

pub use load_state::LoadState;
pub use polymorphic::{PolymorphicLoadPod, PolymorphicSavePod};
pub use value::SerializationPod;
