//! The per-type entry points.
//!
//! Value-mode methods for ordinary types, `Arc`-based associated
//! functions for `shared` types, nothing for `data_only` types.

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ShadowInput;

pub(crate) fn expand(shadow: &ShadowInput) -> TokenStream {
    if shadow.flags.data_only {
        return TokenStream::new();
    }
    if shadow.flags.shared {
        return expand_shared(shadow);
    }
    expand_value(shadow)
}

fn expand_value(shadow: &ShadowInput) -> TokenStream {
    let name = &shadow.ident;

    quote! {
        impl #name {
            pub fn serialize<__A, __W>(
                &self,
                writer: __W,
            ) -> ::core::result::Result<(), _sp::ArchiveError>
            where
                __A: _sp::Archive,
                __W: _sp::io::Write,
            {
                _sp::ops::serialize_value::<__A, Self, __W>(
                    self,
                    writer,
                    <Self as _sp::PodShadow>::default_tag(),
                )
            }

            pub fn serialize_tagged<__A, __W>(
                &self,
                writer: __W,
                tag: &str,
            ) -> ::core::result::Result<(), _sp::ArchiveError>
            where
                __A: _sp::Archive,
                __W: _sp::io::Write,
            {
                _sp::ops::serialize_value::<__A, Self, __W>(self, writer, tag)
            }

            pub fn serialized_size<__A>(&self) -> ::core::result::Result<u64, _sp::ArchiveError>
            where
                __A: _sp::Archive,
            {
                _sp::ops::serialized_size::<__A, Self>(
                    self,
                    <Self as _sp::PodShadow>::default_tag(),
                )
            }

            pub fn deserialize<__A, __R>(
                reader: __R,
            ) -> ::core::result::Result<Self, _sp::ArchiveError>
            where
                __A: _sp::Archive,
                __R: _sp::io::Read,
            {
                _sp::ops::deserialize_value::<__A, Self, __R>(
                    reader,
                    <Self as _sp::PodShadow>::default_tag(),
                )
            }

            pub fn deserialize_tagged<__A, __R>(
                reader: __R,
                tag: &str,
            ) -> ::core::result::Result<Self, _sp::ArchiveError>
            where
                __A: _sp::Archive,
                __R: _sp::io::Read,
            {
                _sp::ops::deserialize_value::<__A, Self, __R>(reader, tag)
            }
        }
    }
}

fn expand_shared(shadow: &ShadowInput) -> TokenStream {
    let name = &shadow.ident;
    let name_str = name.to_string();

    quote! {
        impl #name {
            pub fn serialize_ptr<__A, __W>(
                this: &_sp::Arc<Self>,
                writer: __W,
            ) -> ::core::result::Result<(), _sp::ArchiveError>
            where
                __A: _sp::Archive,
                __W: _sp::io::Write,
            {
                _sp::ops::serialize_shared::<__A, Self, __W>(this, writer, Self::__shared_tag())
            }

            pub fn serialize_ptr_tagged<__A, __W>(
                this: &_sp::Arc<Self>,
                writer: __W,
                tag: &str,
            ) -> ::core::result::Result<(), _sp::ArchiveError>
            where
                __A: _sp::Archive,
                __W: _sp::io::Write,
            {
                _sp::ops::serialize_shared::<__A, Self, __W>(this, writer, tag)
            }

            pub fn serialized_ptr_size<__A>(
                this: &_sp::Arc<Self>,
            ) -> ::core::result::Result<u64, _sp::ArchiveError>
            where
                __A: _sp::Archive,
            {
                _sp::ops::serialized_shared_size::<__A, Self>(this, Self::__shared_tag())
            }

            pub fn deserialize_ptr<__A, __R>(
                reader: __R,
            ) -> ::core::result::Result<_sp::Arc<Self>, _sp::ArchiveError>
            where
                __A: _sp::Archive,
                __R: _sp::io::Read,
            {
                _sp::ops::deserialize_shared::<__A, Self, __R>(reader, Self::__shared_tag())
            }

            pub fn deserialize_ptr_tagged<__A, __R>(
                reader: __R,
                tag: &str,
            ) -> ::core::result::Result<_sp::Arc<Self>, _sp::ArchiveError>
            where
                __A: _sp::Archive,
                __R: _sp::io::Read,
            {
                _sp::ops::deserialize_shared::<__A, Self, __R>(reader, tag)
            }

            fn __shared_tag() -> &'static str {
                _sp::scrub_serialization_name(::core::concat!(#name_str, "Ptr"))
            }
        }
    }
}
