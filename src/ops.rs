//! Entry-point plumbing shared by the generated per-type methods.
//!
//! The derive emits thin inherent methods that delegate here; these
//! functions own the pod lifecycle, the archive session scoping, and the
//! size probes.

use std::io;
use std::sync::Arc;

use crate::archive::{Archive, ArchiveError, CountingSink};
use crate::pod::{PolymorphicLoadPod, PolymorphicSavePod, SerializationPod};
use crate::registry::ErasedShadow;
use crate::shadow::PodShadow;
use crate::shared::{SharedLoadProxy, SharedShadow, session};

// -----------------------------------------------------------------------------
// Value mode

/// Writes `value` under `tag` through archive `A`.
pub fn serialize_value<A, T, W>(value: &T, writer: W, tag: &str) -> Result<(), ArchiveError>
where
    A: Archive,
    T: PodShadow,
    W: io::Write,
{
    let _session = session::save_scope();
    let pod = SerializationPod::from_value(value);
    A::save(writer, tag, &pod)
}

/// Reads a `T` stored under `tag` through archive `A` and constructs it.
pub fn deserialize_value<A, T, R>(reader: R, tag: &str) -> Result<T, ArchiveError>
where
    A: Archive,
    T: PodShadow,
    R: io::Read,
{
    let _session = session::load_scope();
    let pod: SerializationPod<'_, T> = A::load(reader, tag)?;
    Ok(pod.construct())
}

/// Size of `value` under archive `A`: a real serialization pass into a
/// counting sink.
pub fn serialized_size<A, T>(value: &T, tag: &str) -> Result<u64, ArchiveError>
where
    A: Archive,
    T: PodShadow,
{
    let mut sink = CountingSink::new();
    serialize_value::<A, T, _>(value, &mut sink, tag)?;
    Ok(sink.bytes_written())
}

// -----------------------------------------------------------------------------
// Pointer mode

/// Writes a base-typed handle under `tag` through archive `A`, recording
/// the concrete type for dispatch on the way back in.
pub fn serialize_ptr<A, B, W>(value: &B, writer: W, tag: &str) -> Result<(), ArchiveError>
where
    A: Archive,
    B: ?Sized + ErasedShadow,
    W: io::Write,
{
    let _session = session::save_scope();
    value.register_shadow_types();

    let pod = PolymorphicSavePod::new();
    pod.set_original_base(value);
    A::save(writer, tag, &pod)
}

/// Reads a polymorphic pod stored under `tag` and constructs the concrete
/// instance as an owning `Box<B>`.
pub fn deserialize_ptr<A, B, R>(reader: R, tag: &str) -> Result<Box<B>, ArchiveError>
where
    A: Archive,
    B: ?Sized + 'static,
    R: io::Read,
{
    let _session = session::load_scope();
    let mut pod: PolymorphicLoadPod<B> = A::load(reader, tag)?;
    Ok(pod.construct_ptr())
}

/// Serde-level pointer-mode serialization: what `Serialize for dyn Base`
/// delegates to when a polymorphic member is embedded in another view.
pub fn serialize_dyn<B, S>(value: &B, serializer: S) -> Result<S::Ok, S::Error>
where
    B: ?Sized + ErasedShadow,
    S: serde::Serializer,
{
    value.register_shadow_types();

    let pod = PolymorphicSavePod::new();
    pod.set_original_base(value);
    serde::Serialize::serialize(&pod, serializer)
}

/// Pointer-mode counterpart of [`serialized_size`].
pub fn serialized_ptr_size<A, B>(value: &B, tag: &str) -> Result<u64, ArchiveError>
where
    A: Archive,
    B: ?Sized + ErasedShadow,
{
    let mut sink = CountingSink::new();
    serialize_ptr::<A, B, _>(value, &mut sink, tag)?;
    Ok(sink.bytes_written())
}

// -----------------------------------------------------------------------------
// Shared mode

/// Writes a shared handle under `tag`, preserving instance identity within
/// the enclosing archive session.
pub fn serialize_shared<A, T, W>(this: &Arc<T>, writer: W, tag: &str) -> Result<(), ArchiveError>
where
    A: Archive,
    T: SharedShadow,
    W: io::Write,
{
    let _session = session::save_scope();
    A::save(writer, tag, &crate::PodMember::save_as(this))
}

/// Reads a shared handle stored under `tag`; aliases written in the same
/// session resolve to one instance.
pub fn deserialize_shared<A, T, R>(reader: R, tag: &str) -> Result<Arc<T>, ArchiveError>
where
    A: Archive,
    T: SharedShadow,
    R: io::Read,
{
    let _session = session::load_scope();
    let proxy: SharedLoadProxy<T> = A::load(reader, tag)?;
    Ok(proxy.into_arc())
}

/// Shared-mode counterpart of [`serialized_size`].
pub fn serialized_shared_size<A, T>(this: &Arc<T>, tag: &str) -> Result<u64, ArchiveError>
where
    A: Archive,
    T: SharedShadow,
{
    let mut sink = CountingSink::new();
    serialize_shared::<A, T, _>(this, &mut sink, tag)?;
    Ok(sink.bytes_written())
}
