#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code always spells the crate `::podshadow`, including in this
// crate's own tests and doctests. `extern self` makes that name resolve here.
extern crate self as podshadow;

// -----------------------------------------------------------------------------
// Modules

mod hash;
mod hooks;
mod member;
mod scrub;
mod shadow;

pub mod archive;
pub mod impls;
pub mod ops;
pub mod pod;
pub mod registry;
pub mod shared;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use archive::{Archive, ArchiveError, CountingSink, JsonArchive, RonArchive};
pub use hooks::{ConstructionHooks, complete};
pub use member::PodMember;
pub use pod::{LoadState, PolymorphicLoadPod, PolymorphicSavePod, SerializationPod};
pub use scrub::scrub_serialization_name;
pub use shadow::PodShadow;
pub use shared::SharedShadow;

pub use podshadow_derive as derive;
