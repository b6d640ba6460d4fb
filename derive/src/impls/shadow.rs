//! The `PodShadow` implementation and its satellites.

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ShadowInput;
use crate::impls::{deserialize_view_ident, serialize_view_ident};

pub(crate) fn expand(shadow: &ShadowInput) -> TokenStream {
    let name = &shadow.ident;
    let name_str = name.to_string();
    let ser_view = serialize_view_ident(shadow);
    let de_view = deserialize_view_ident(shadow);

    let base_idents: Vec<_> = shadow.bases().map(|field| &field.ident).collect();
    let base_tys: Vec<_> = shadow.bases().map(|field| &field.ty).collect();
    let member_idents: Vec<_> = shadow.members().map(|field| &field.ident).collect();
    let member_tys: Vec<_> = shadow.members().map(|field| &field.ty).collect();
    let skipped_idents: Vec<_> = shadow.skipped().map(|field| &field.ident).collect();

    // Bases are rebuilt before members, honoring base-before-member
    // initialization order; skipped fields fall back to `Default`.
    let construct = if shadow.flags.custom_construct {
        quote! { #name::deserialize_construct(__view) }
    } else {
        quote! {
            #name {
                #(#base_idents: <#base_tys as _sp::PodShadow>::from_view(__view.#base_idents),)*
                #(#member_idents: <#member_tys as _sp::PodMember>::materialize(
                    __view.#member_idents,
                ),)*
                #(#skipped_idents: ::core::default::Default::default(),)*
            }
        }
    };

    let hooks_impl = if shadow.flags.hooks {
        TokenStream::new()
    } else {
        quote! {
            impl _sp::ConstructionHooks for #name {}
        }
    };

    let member_impl = if shadow.flags.shared {
        quote! {
            impl _sp::SharedShadow for #name {}
        }
    } else {
        quote! {
            impl _sp::PodMember for #name {
                type SaveAs<'a>
                    = <#name as _sp::PodShadow>::SerializeView<'a>
                where
                    Self: 'a;
                type LoadAs = <#name as _sp::PodShadow>::DeserializeView;

                fn save_as(&self) -> Self::SaveAs<'_> {
                    _sp::PodShadow::serialize_view(self)
                }

                fn materialize(__data: Self::LoadAs) -> Self {
                    <#name as _sp::PodShadow>::from_view(__data)
                }
            }
        }
    };

    quote! {
        impl _sp::PodShadow for #name {
            type SerializeView<'a>
                = #ser_view<'a>
            where
                Self: 'a;
            type DeserializeView = #de_view;

            fn serialize_view(&self) -> #ser_view<'_> {
                #ser_view {
                    #(#base_idents: _sp::PodShadow::serialize_view(&self.#base_idents),)*
                    #(#member_idents: _sp::PodMember::save_as(&self.#member_idents),)*
                    __phantom: ::core::marker::PhantomData,
                }
            }

            fn from_view(__view: #de_view) -> Self {
                let mut __value = #construct;
                _sp::ConstructionHooks::deserialize_final_construct(&mut __value);
                _sp::ConstructionHooks::final_construct(&mut __value);
                __value
            }

            fn shadow_type_path() -> &'static str {
                ::core::concat!(::core::module_path!(), "::", #name_str)
            }
        }

        #hooks_impl
        #member_impl
    }
}
