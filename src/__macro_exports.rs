//! Re-exports for generated code. Not public API.
//!
//! Everything the derive and the hierarchy macro emit resolves through
//! this module, so user crates only ever need `podshadow` itself in their
//! dependency graph.

pub use erased_serde;
pub use serde;

#[cfg(feature = "auto_register")]
pub use inventory;

pub use std::boxed::Box;
pub use std::io;
pub use std::string::String;
pub use std::sync::Arc;

pub use crate::archive::{Archive, ArchiveError};
pub use crate::hooks::ConstructionHooks;
pub use crate::member::PodMember;
pub use crate::ops;
pub use crate::pod::{PolymorphicLoadPod, SerializationPod};
pub use crate::registry::{self, ErasedShadow, PtrRegistration};
pub use crate::scrub::scrub_serialization_name;
pub use crate::shadow::PodShadow;
pub use crate::shared::{SharedLoadProxy, SharedSaveRef, SharedShadow};
