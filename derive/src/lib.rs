//! Derive macros for `podshadow`.
//!
//! - [`PodShadow`](macro@PodShadow): generates the shadow views, the
//!   protocol implementation, and the entry points for a struct.
//! - [`polymorphic_base`](macro@polymorphic_base): equips a hierarchy
//!   root trait with pointer-mode serialization support.
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemTrait, parse_macro_input};

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;

// -----------------------------------------------------------------------------
// Macros

/// Generates the POD-shadow serialization protocol for a struct.
///
/// For a type `Name`, the expansion produces:
///
/// - `NameSerializeView`: a non-owning projection of every serialized
///   field, built fresh for each serialization call.
/// - `NameDeserializeView`: an owned aggregate the archive populates
///   field by field while no `Name` exists yet.
/// - implementations of `PodShadow`, `PodMember`, and (unless
///   `#[pod(hooks)]` is present) an empty `ConstructionHooks`.
/// - entry points `serialize`/`serialize_tagged`/`serialized_size` and
///   `deserialize`/`deserialize_tagged`, parameterized over an archive
///   engine (skipped for `data_only` and `shared` types).
///
/// # Attributes
///
/// Type level, via `#[pod(...)]`:
///
/// - `data_only`: the type participates in base composition and member
///   nesting but exposes no standalone entry points.
/// - `polymorphic(Base)`: the type is a concrete member of the hierarchy
///   rooted at trait `Base` (which must carry
///   [`#[polymorphic_base]`](macro@polymorphic_base)).
/// - `additional_bases(BaseA, BaseB)`: extra hierarchy roots this type
///   registers under, for serialization through an intermediate base.
/// - `shared`: the type round-trips exclusively through `Arc` handles;
///   generates `serialize_ptr`/`deserialize_ptr` associated functions
///   instead of the value entry points.
/// - `custom_construct`: the type provides
///   `fn deserialize_construct(view: <Self as PodShadow>::DeserializeView) -> Self`
///   instead of the generated field-wise constructor.
/// - `hooks`: the type implements `ConstructionHooks` itself.
///
/// Field level:
///
/// - `#[pod(base)]`: the field is a base slot: serialized before all
///   members under the scrubbed name of its type, reconstructed first on
///   deserialization. Base fields must precede member fields.
/// - `#[pod(skip)]`: the field stays off the wire and is rebuilt with
///   `Default` on deserialization.
///
/// Generic types are not supported.
#[proc_macro_derive(PodShadow, attributes(pod))]
pub fn derive_pod_shadow(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_data::ShadowInput::parse(&input) {
        Ok(shadow) => impls::expand(&shadow).into(),
        Err(error) => error.to_compile_error().into(),
    }
}

/// Equips a hierarchy root trait with pointer-mode serialization.
///
/// The macro injects the `ErasedShadow` supertrait and generates, for
/// `dyn Base`:
///
/// - `Serialize for dyn Base` and `Deserialize for Box<dyn Base>`, so
///   polymorphic handles nest inside other shadow types;
/// - `PodMember for Box<dyn Base>`;
/// - entry points `serialize_ptr`/`serialize_ptr_tagged`/
///   `serialized_ptr_size` and `deserialize_ptr`/`deserialize_ptr_tagged`;
/// - the link-time registration collection and the registry seeding hook
///   for the hierarchy.
///
/// ```rust,ignore
/// #[polymorphic_base]
/// pub trait Shape {
///     fn area(&self) -> f64;
/// }
///
/// #[derive(PodShadow)]
/// #[pod(polymorphic(Shape))]
/// struct Circle { radius: f64 }
///
/// impl Shape for Circle {
///     fn area(&self) -> f64 { core::f64::consts::PI * self.radius * self.radius }
/// }
/// ```
#[proc_macro_attribute]
pub fn polymorphic_base(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as ItemTrait);
    match impls::hierarchy::expand(attr.into(), item) {
        Ok(expanded) => expanded.into(),
        Err(error) => error.to_compile_error().into(),
    }
}
