//! Concrete-type support for polymorphic hierarchies: the erased face of
//! the pod, the explicit registry registrations (declared base plus any
//! additional ancestors), and the link-time registration records.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Path;

use crate::derive_data::ShadowInput;

pub(crate) fn expand(shadow: &ShadowInput) -> TokenStream {
    let Some(declared) = &shadow.flags.polymorphic else {
        return TokenStream::new();
    };

    let name = &shadow.ident;
    let name_str = name.to_string();

    let mut bases: Vec<&Path> = vec![declared];
    bases.extend(shadow.flags.additional_bases.iter());

    let mut load_fns = Vec::new();
    let mut register_fns = Vec::new();
    let mut register_calls = Vec::new();
    let mut submissions = Vec::new();

    for (index, base) in bases.into_iter().enumerate() {
        let load_fn = format_ident!("__podshadow_load_{index}");
        let register_fn = format_ident!("__podshadow_register_{index}");

        load_fns.push(quote! {
            fn #load_fn(
                __deserializer: &mut dyn _sp::erased_serde::Deserializer<'_>,
            ) -> ::core::result::Result<_sp::Box<dyn #base>, _sp::erased_serde::Error> {
                let __view = <<#name as _sp::PodShadow>::DeserializeView
                    as _sp::serde::Deserialize>::deserialize(__deserializer)?;
                ::core::result::Result::Ok(
                    _sp::Box::new(<#name as _sp::PodShadow>::from_view(__view))
                        as _sp::Box<dyn #base>,
                )
            }
        });
        register_fns.push(quote! {
            fn #register_fn() {
                _sp::registry::register::<dyn #base>(
                    <#name as _sp::PodShadow>::shadow_type_path(),
                    #load_fn,
                );
            }
        });
        register_calls.push(quote! { #register_fn(); });
        submissions.push(expand_submission(&name_str, base, &load_fn));
    }

    quote! {
        #(#load_fns)*
        #(#register_fns)*
        #(#submissions)*

        impl _sp::ErasedShadow for #name {
            fn shadow_type_path(&self) -> &'static str {
                <#name as _sp::PodShadow>::shadow_type_path()
            }

            fn with_save_view(
                &self,
                __f: &mut dyn ::core::ops::FnMut(&dyn _sp::erased_serde::Serialize),
            ) {
                let __view = _sp::PodShadow::serialize_view(self);
                __f(&__view);
            }

            fn register_shadow_types(&self) {
                #(#register_calls)*
            }
        }
    }
}

#[cfg(feature = "auto_register")]
fn expand_submission(name_str: &str, base: &Path, load_fn: &proc_macro2::Ident) -> TokenStream {
    quote! {
        _sp::inventory::submit! {
            _sp::PtrRegistration::<dyn #base>::new(
                ::core::concat!(::core::module_path!(), "::", #name_str),
                #load_fn,
            )
        }
    }
}

#[cfg(not(feature = "auto_register"))]
fn expand_submission(_: &str, _: &Path, _: &proc_macro2::Ident) -> TokenStream {
    TokenStream::new()
}
