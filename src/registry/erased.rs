use crate::registry::LoadErasedFn;

/// Object-safe face of the protocol, implemented by every concrete type of
/// a polymorphic hierarchy and required as a supertrait of the hierarchy
/// root (injected by
/// [`#[polymorphic_base]`](crate::derive::polymorphic_base)).
///
/// This is what pointer-mode serialization reaches the concrete pod
/// through once the static type is gone.
pub trait ErasedShadow: 'static {
    /// The concrete type's discriminator, written to the wire.
    fn shadow_type_path(&self) -> &'static str;

    /// Projects the concrete serialize view and hands it, type-erased, to
    /// `f`. The view only lives for the duration of the call.
    fn with_save_view(&self, f: &mut dyn FnMut(&dyn erased_serde::Serialize));

    /// Performs the explicit registry registrations for this type: its
    /// declared hierarchy base plus any additional ancestors. Invoked
    /// lazily by every pointer-mode serialization; idempotent.
    fn register_shadow_types(&self);
}

/// A link-time registration record for one concrete type under one
/// hierarchy base.
///
/// The hierarchy macro emits an `inventory` collection of these per base;
/// each concrete type submits one record per base it registers under. The
/// generated seeding hook folds the collected records into the
/// [`registry`](crate::registry) before the first lookup.
pub struct PtrRegistration<B: ?Sized + 'static> {
    type_path: &'static str,
    load: LoadErasedFn<B>,
}

impl<B: ?Sized + 'static> PtrRegistration<B> {
    /// Builds a registration record.
    pub const fn new(type_path: &'static str, load: LoadErasedFn<B>) -> Self {
        Self { type_path, load }
    }

    /// The concrete type's discriminator.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// The erased load entry.
    #[inline]
    pub fn load(&self) -> LoadErasedFn<B> {
        self.load
    }
}
