//! Code generation for the derive and the hierarchy attribute.

pub(crate) mod entry;
pub(crate) mod hierarchy;
pub(crate) mod polymorphic;
pub(crate) mod shadow;
pub(crate) mod views;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::derive_data::ShadowInput;

/// Expands everything `#[derive(PodShadow)]` generates for one struct.
pub(crate) fn expand(shadow: &ShadowInput) -> TokenStream {
    let (view_structs, view_impls) = views::expand(shadow);
    let shadow_impls = shadow::expand(shadow);
    let entry_impls = entry::expand(shadow);
    let polymorphic_impls = polymorphic::expand(shadow);

    quote! {
        #view_structs

        const _: () = {
            use ::podshadow::__macro_exports as _sp;

            #view_impls
            #shadow_impls
            #entry_impls
            #polymorphic_impls
        };
    }
}

pub(crate) fn serialize_view_ident(shadow: &ShadowInput) -> proc_macro2::Ident {
    format_ident!("{}SerializeView", shadow.ident)
}

pub(crate) fn deserialize_view_ident(shadow: &ShadowInput) -> proc_macro2::Ident {
    format_ident!("{}DeserializeView", shadow.ident)
}

/// The wire key of a base slot: the scrubbed rendering of its type, as a
/// string the runtime scrubber reduces to the trailing identifier.
pub(crate) fn base_key_literal(ty: &syn::Type) -> syn::LitStr {
    let rendered = quote!(#ty).to_string();
    syn::LitStr::new(&rendered, proc_macro2::Span::call_site())
}
