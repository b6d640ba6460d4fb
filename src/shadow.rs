use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::hooks::ConstructionHooks;
use crate::scrub::scrub_serialization_name;

/// The per-type serialization protocol.
///
/// An implementation, normally generated by
/// [`#[derive(PodShadow)]`](crate::derive::PodShadow), pairs a type with
/// its two shadow aggregates:
///
/// - [`SerializeView`]: an ephemeral, non-owning projection of a live
///   instance. It exists for the duration of a single serialization call
///   and is what the archive actually visits.
/// - [`DeserializeView`]: an owned, movable aggregate populated by the
///   archive while no instance exists yet, then consumed exactly once by
///   [`from_view`] to produce a fully formed instance.
///
/// Deserialization therefore never requires a default constructor and
/// never exposes a partially initialized value: [`from_view`] is the only
/// way in, and it takes the complete aggregate by value.
///
/// Implementing the trait by hand is supported and is the escape hatch
/// for types whose serialization mechanics are too involved for the
/// derive (the derive's `custom_construct` flag covers the lighter case
/// of a hand-written consuming constructor over generated views).
///
/// [`SerializeView`]: PodShadow::SerializeView
/// [`DeserializeView`]: PodShadow::DeserializeView
/// [`from_view`]: PodShadow::from_view
pub trait PodShadow: ConstructionHooks + Sized {
    /// Read-only projection of a live instance.
    type SerializeView<'a>: Serialize
    where
        Self: 'a;

    /// Owned aggregate the archive populates during deserialization.
    type DeserializeView: DeserializeOwned;

    /// Projects the instance into its serialize view.
    fn serialize_view(&self) -> Self::SerializeView<'_>;

    /// Consumes a populated deserialize view, producing a complete
    /// instance. Runs the [`ConstructionHooks`] in deserialization order.
    fn from_view(view: Self::DeserializeView) -> Self;

    /// Full path of the type, used as the polymorphic discriminator.
    fn shadow_type_path() -> &'static str;

    /// Default archive tag: the scrubbed type path.
    #[inline]
    fn default_tag() -> &'static str {
        scrub_serialization_name(Self::shadow_type_path())
    }
}
