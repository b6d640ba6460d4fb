//! The generated view pair: the non-owning serialize projection and the
//! owned deserialize aggregate, with their hand-rolled serde impls.
//!
//! Both sides speak the same wire shape: a map of name/value entries,
//! bases first (keyed by the scrubbed base type name), then members
//! (keyed by field name). The deserialize visitor accepts entries in any
//! order but rejects unknown, duplicate, and missing ones.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::derive_data::ShadowInput;
use crate::impls::{base_key_literal, deserialize_view_ident, serialize_view_ident};

/// Returns the view struct definitions (module scope) and their serde
/// impls (const-block scope) separately.
pub(crate) fn expand(shadow: &ShadowInput) -> (TokenStream, TokenStream) {
    (expand_structs(shadow), expand_serde_impls(shadow))
}

fn expand_structs(shadow: &ShadowInput) -> TokenStream {
    let vis = &shadow.vis;
    let name = &shadow.ident;
    let ser_view = serialize_view_ident(shadow);
    let de_view = deserialize_view_ident(shadow);

    let base_idents: Vec<_> = shadow.bases().map(|field| &field.ident).collect();
    let base_tys: Vec<_> = shadow.bases().map(|field| &field.ty).collect();
    let member_idents: Vec<_> = shadow.members().map(|field| &field.ident).collect();
    let member_tys: Vec<_> = shadow.members().map(|field| &field.ty).collect();

    let ser_doc = format!("Serialize view generated for [`{name}`].");
    let de_doc = format!("Deserialize view generated for [`{name}`].");

    quote! {
        #[doc = #ser_doc]
        #vis struct #ser_view<'a> {
            #(#base_idents: <#base_tys as ::podshadow::PodShadow>::SerializeView<'a>,)*
            #(#member_idents: <#member_tys as ::podshadow::PodMember>::SaveAs<'a>,)*
            __phantom: ::core::marker::PhantomData<&'a ()>,
        }

        #[doc = #de_doc]
        #vis struct #de_view {
            #(#base_idents: <#base_tys as ::podshadow::PodShadow>::DeserializeView,)*
            #(#member_idents: <#member_tys as ::podshadow::PodMember>::LoadAs,)*
        }
    }
}

fn expand_serde_impls(shadow: &ShadowInput) -> TokenStream {
    let serialize = expand_serialize(shadow);
    let deserialize = expand_deserialize(shadow);
    quote! {
        #serialize
        #deserialize
    }
}

fn expand_serialize(shadow: &ShadowInput) -> TokenStream {
    let ser_view = serialize_view_ident(shadow);

    let base_idents: Vec<_> = shadow.bases().map(|field| &field.ident).collect();
    let base_keys: Vec<_> = shadow
        .bases()
        .map(|field| base_key_literal(&field.ty))
        .collect();
    let member_idents: Vec<_> = shadow.members().map(|field| &field.ident).collect();
    let member_keys: Vec<_> = shadow
        .members()
        .map(|field| field.ident.to_string())
        .collect();

    let entry_count = base_idents.len() + member_idents.len();

    quote! {
        impl<'a> _sp::serde::Serialize for #ser_view<'a> {
            fn serialize<__S>(
                &self,
                serializer: __S,
            ) -> ::core::result::Result<__S::Ok, __S::Error>
            where
                __S: _sp::serde::Serializer,
            {
                use _sp::serde::ser::SerializeMap as _;
                let mut __map =
                    serializer.serialize_map(::core::option::Option::Some(#entry_count))?;
                #(
                    __map.serialize_entry(
                        _sp::scrub_serialization_name(#base_keys),
                        &self.#base_idents,
                    )?;
                )*
                #(
                    __map.serialize_entry(#member_keys, &self.#member_idents)?;
                )*
                __map.end()
            }
        }
    }
}

fn expand_deserialize(shadow: &ShadowInput) -> TokenStream {
    let name_str = shadow.ident.to_string();
    let de_view = deserialize_view_ident(shadow);

    let mut key_bindings = Vec::new();
    let mut slot_bindings = Vec::new();
    let mut match_arms = Vec::new();
    let mut unwraps = Vec::new();
    let mut field_idents = Vec::new();

    for field in shadow.bases() {
        let ident = &field.ident;
        let ty = &field.ty;
        let key_var = format_ident!("__key_{}", ident);
        let key_lit = base_key_literal(ty);
        key_bindings.push(quote! {
            let #key_var: &'static str = _sp::scrub_serialization_name(#key_lit);
        });
        slot_bindings.push(quote! {
            let mut #ident: ::core::option::Option<
                <#ty as _sp::PodShadow>::DeserializeView,
            > = ::core::option::Option::None;
        });
        match_arms.push(quote! {
            if __key == #key_var {
                if #ident.is_some() {
                    return ::core::result::Result::Err(
                        <__M::Error as _sp::serde::de::Error>::duplicate_field(#key_var),
                    );
                }
                #ident = ::core::option::Option::Some(__map.next_value()?);
            } else
        });
        unwraps.push(quote! {
            let #ident = match #ident {
                ::core::option::Option::Some(__value) => __value,
                ::core::option::Option::None => {
                    return ::core::result::Result::Err(
                        <__M::Error as _sp::serde::de::Error>::missing_field(#key_var),
                    );
                }
            };
        });
        field_idents.push(ident.clone());
    }

    for field in shadow.members() {
        let ident = &field.ident;
        let ty = &field.ty;
        let key_lit = ident.to_string();
        slot_bindings.push(quote! {
            let mut #ident: ::core::option::Option<
                <#ty as _sp::PodMember>::LoadAs,
            > = ::core::option::Option::None;
        });
        match_arms.push(quote! {
            if __key == #key_lit {
                if #ident.is_some() {
                    return ::core::result::Result::Err(
                        <__M::Error as _sp::serde::de::Error>::duplicate_field(#key_lit),
                    );
                }
                #ident = ::core::option::Option::Some(__map.next_value()?);
            } else
        });
        unwraps.push(quote! {
            let #ident = match #ident {
                ::core::option::Option::Some(__value) => __value,
                ::core::option::Option::None => {
                    return ::core::result::Result::Err(
                        <__M::Error as _sp::serde::de::Error>::missing_field(#key_lit),
                    );
                }
            };
        });
        field_idents.push(ident.clone());
    }

    let expecting = format!("shadow view map for `{name_str}`");

    quote! {
        impl<'de> _sp::serde::Deserialize<'de> for #de_view {
            fn deserialize<__D>(deserializer: __D) -> ::core::result::Result<Self, __D::Error>
            where
                __D: _sp::serde::Deserializer<'de>,
            {
                struct __Visitor;

                impl<'de> _sp::serde::de::Visitor<'de> for __Visitor {
                    type Value = #de_view;

                    fn expecting(
                        &self,
                        formatter: &mut ::core::fmt::Formatter,
                    ) -> ::core::fmt::Result {
                        formatter.write_str(#expecting)
                    }

                    fn visit_map<__M>(
                        self,
                        mut __map: __M,
                    ) -> ::core::result::Result<Self::Value, __M::Error>
                    where
                        __M: _sp::serde::de::MapAccess<'de>,
                    {
                        #(#key_bindings)*
                        #(#slot_bindings)*

                        while let ::core::option::Option::Some(__key) =
                            __map.next_key::<_sp::String>()?
                        {
                            #(#match_arms)* {
                                return ::core::result::Result::Err(
                                    <__M::Error as _sp::serde::de::Error>::custom(
                                        ::std::format!(
                                            "unknown entry `{}` for `{}`",
                                            __key,
                                            #name_str,
                                        ),
                                    ),
                                );
                            }
                        }

                        #(#unwraps)*

                        ::core::result::Result::Ok(#de_view { #(#field_idents,)* })
                    }
                }

                deserializer.deserialize_map(__Visitor)
            }
        }
    }
}
