//! Expansion of `#[polymorphic_base]` on a hierarchy root trait.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ItemTrait;

pub(crate) fn expand(attr: TokenStream, mut item: ItemTrait) -> syn::Result<TokenStream> {
    if !attr.is_empty() {
        return Err(syn::Error::new_spanned(
            attr,
            "`#[polymorphic_base]` takes no arguments",
        ));
    }
    if !item.generics.params.is_empty() || item.generics.where_clause.is_some() {
        return Err(syn::Error::new_spanned(
            &item.generics,
            "`#[polymorphic_base]` does not support generic traits",
        ));
    }

    let trait_ident = item.ident.clone();
    let trait_name_str = trait_ident.to_string();

    // Every implementor must expose the erased protocol face.
    item.colon_token.get_or_insert_with(Default::default);
    item.supertraits
        .push(syn::parse_quote!(::podshadow::registry::ErasedShadow));

    let seeding = expand_seeding(&trait_ident);
    let collection = expand_collection(&trait_ident);

    Ok(quote! {
        #item

        const _: () = {
            use ::podshadow::__macro_exports as _sp;

            #collection

            #seeding

            impl _sp::serde::Serialize for dyn #trait_ident {
                fn serialize<__S>(
                    &self,
                    serializer: __S,
                ) -> ::core::result::Result<__S::Ok, __S::Error>
                where
                    __S: _sp::serde::Serializer,
                {
                    _sp::ops::serialize_dyn::<dyn #trait_ident, __S>(self, serializer)
                }
            }

            impl<'de> _sp::serde::Deserialize<'de> for _sp::Box<dyn #trait_ident> {
                fn deserialize<__D>(
                    deserializer: __D,
                ) -> ::core::result::Result<Self, __D::Error>
                where
                    __D: _sp::serde::Deserializer<'de>,
                {
                    __seed_registry();
                    let mut __pod = <_sp::PolymorphicLoadPod<dyn #trait_ident>
                        as _sp::serde::Deserialize>::deserialize(deserializer)?;
                    ::core::result::Result::Ok(__pod.construct_ptr())
                }
            }

            impl _sp::PodMember for _sp::Box<dyn #trait_ident> {
                type SaveAs<'a>
                    = &'a (dyn #trait_ident + 'static)
                where
                    Self: 'a;
                type LoadAs = _sp::Box<dyn #trait_ident>;

                fn save_as(&self) -> &(dyn #trait_ident + 'static) {
                    &**self
                }

                fn materialize(__data: Self::LoadAs) -> Self {
                    __data
                }
            }

            impl dyn #trait_ident {
                pub fn serialize_ptr<__A, __W>(
                    &self,
                    writer: __W,
                ) -> ::core::result::Result<(), _sp::ArchiveError>
                where
                    __A: _sp::Archive,
                    __W: _sp::io::Write,
                {
                    _sp::ops::serialize_ptr::<__A, dyn #trait_ident, __W>(
                        self,
                        writer,
                        __default_ptr_tag(),
                    )
                }

                pub fn serialize_ptr_tagged<__A, __W>(
                    &self,
                    writer: __W,
                    tag: &str,
                ) -> ::core::result::Result<(), _sp::ArchiveError>
                where
                    __A: _sp::Archive,
                    __W: _sp::io::Write,
                {
                    _sp::ops::serialize_ptr::<__A, dyn #trait_ident, __W>(self, writer, tag)
                }

                pub fn serialized_ptr_size<__A>(
                    &self,
                ) -> ::core::result::Result<u64, _sp::ArchiveError>
                where
                    __A: _sp::Archive,
                {
                    _sp::ops::serialized_ptr_size::<__A, dyn #trait_ident>(
                        self,
                        __default_ptr_tag(),
                    )
                }

                pub fn deserialize_ptr<__A, __R>(
                    reader: __R,
                ) -> ::core::result::Result<_sp::Box<dyn #trait_ident>, _sp::ArchiveError>
                where
                    __A: _sp::Archive,
                    __R: _sp::io::Read,
                {
                    __seed_registry();
                    _sp::ops::deserialize_ptr::<__A, dyn #trait_ident, __R>(
                        reader,
                        __default_ptr_tag(),
                    )
                }

                pub fn deserialize_ptr_tagged<__A, __R>(
                    reader: __R,
                    tag: &str,
                ) -> ::core::result::Result<_sp::Box<dyn #trait_ident>, _sp::ArchiveError>
                where
                    __A: _sp::Archive,
                    __R: _sp::io::Read,
                {
                    __seed_registry();
                    _sp::ops::deserialize_ptr::<__A, dyn #trait_ident, __R>(reader, tag)
                }
            }

            fn __default_ptr_tag() -> &'static str {
                _sp::scrub_serialization_name(::core::concat!(#trait_name_str, "Ptr"))
            }
        };
    })
}

#[cfg(feature = "auto_register")]
fn expand_collection(trait_ident: &proc_macro2::Ident) -> TokenStream {
    quote! {
        _sp::inventory::collect!(_sp::PtrRegistration<dyn #trait_ident>);
    }
}

#[cfg(not(feature = "auto_register"))]
fn expand_collection(_: &proc_macro2::Ident) -> TokenStream {
    TokenStream::new()
}

#[cfg(feature = "auto_register")]
fn expand_seeding(trait_ident: &proc_macro2::Ident) -> TokenStream {
    quote! {
        fn __seed_registry() {
            _sp::registry::seed_once::<dyn #trait_ident>(|__sink| {
                for __entry in _sp::inventory::iter::<_sp::PtrRegistration<dyn #trait_ident>> {
                    __sink(__entry.type_path(), __entry.load());
                }
            });
        }
    }
}

#[cfg(not(feature = "auto_register"))]
fn expand_seeding(trait_ident: &proc_macro2::Ident) -> TokenStream {
    quote! {
        fn __seed_registry() {
            _sp::registry::seed_once::<dyn #trait_ident>(|__sink| {
                let _ = __sink;
            });
        }
    }
}
