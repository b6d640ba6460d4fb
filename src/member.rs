use serde::Serialize;
use serde::de::DeserializeOwned;

/// Decides how a field projects into the shadow views of its containing
/// type.
///
/// Every field of a derived type resolves through this trait:
///
/// 1. Types implementing [`PodShadow`](crate::PodShadow) project to their
///    own nested views (the derive emits this implementation alongside the
///    protocol one).
/// 2. Owning handles around such types re-wrap on the way back in: see the
///    [`Box`] implementation here, the per-hierarchy `Box<dyn Base>`
///    implementations emitted by
///    [`#[polymorphic_base]`](crate::derive::polymorphic_base), and the
///    session-tracked [`Arc`](std::sync::Arc) implementation in
///    [`shared`](crate::shared).
/// 3. Everything else is an opaque primitive forwarded verbatim to the
///    archive by name; see [`impls`](crate::impls) for the provided set.
pub trait PodMember: Sized {
    /// Read-only representation stored in a serialize view.
    type SaveAs<'a>: Serialize
    where
        Self: 'a;

    /// Owned placeholder stored in a deserialize view.
    type LoadAs: DeserializeOwned;

    /// Projects the member for serialization.
    fn save_as(&self) -> Self::SaveAs<'_>;

    /// Rebuilds the member from its deserialized placeholder.
    fn materialize(data: Self::LoadAs) -> Self;
}

impl<T: PodMember> PodMember for Box<T> {
    type SaveAs<'a>
        = T::SaveAs<'a>
    where
        Self: 'a;
    type LoadAs = T::LoadAs;

    #[inline]
    fn save_as(&self) -> Self::SaveAs<'_> {
        (**self).save_as()
    }

    #[inline]
    fn materialize(data: Self::LoadAs) -> Self {
        Box::new(T::materialize(data))
    }
}

impl<T: PodMember> PodMember for Option<T> {
    type SaveAs<'a>
        = Option<T::SaveAs<'a>>
    where
        Self: 'a;
    type LoadAs = Option<T::LoadAs>;

    #[inline]
    fn save_as(&self) -> Self::SaveAs<'_> {
        self.as_ref().map(PodMember::save_as)
    }

    #[inline]
    fn materialize(data: Self::LoadAs) -> Self {
        data.map(T::materialize)
    }
}

impl<T: PodMember> PodMember for Vec<T> {
    type SaveAs<'a>
        = Vec<T::SaveAs<'a>>
    where
        Self: 'a;
    type LoadAs = Vec<T::LoadAs>;

    fn save_as(&self) -> Self::SaveAs<'_> {
        self.iter().map(PodMember::save_as).collect()
    }

    fn materialize(data: Self::LoadAs) -> Self {
        data.into_iter().map(T::materialize).collect()
    }
}
