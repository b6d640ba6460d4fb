//! Parsed model of a `#[derive(PodShadow)]` input.

use syn::{Data, DeriveInput, Fields, Ident, Path, Token, Type, Visibility};

pub(crate) enum FieldKind {
    /// `#[pod(base)]`: a base slot, serialized before all members.
    Base,
    /// A regular serialized member.
    Member,
    /// `#[pod(skip)]`: off the wire, rebuilt with `Default`.
    Skipped,
}

pub(crate) struct ShadowField {
    pub ident: Ident,
    pub ty: Type,
    pub kind: FieldKind,
}

#[derive(Default)]
pub(crate) struct TypeFlags {
    pub data_only: bool,
    pub shared: bool,
    pub custom_construct: bool,
    pub hooks: bool,
    pub polymorphic: Option<Path>,
    pub additional_bases: Vec<Path>,
}

pub(crate) struct ShadowInput {
    pub vis: Visibility,
    pub ident: Ident,
    pub fields: Vec<ShadowField>,
    pub flags: TypeFlags,
}

impl ShadowInput {
    pub fn parse(input: &DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() || input.generics.where_clause.is_some() {
            return Err(syn::Error::new_spanned(
                &input.generics,
                "`derive(PodShadow)` does not support generic types",
            ));
        }

        let data = match &input.data {
            Data::Struct(data) => data,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "`derive(PodShadow)` only supports structs",
                ));
            }
        };

        let flags = Self::parse_type_flags(input)?;
        let fields = Self::parse_fields(&data.fields)?;

        if flags.data_only && (flags.shared || flags.polymorphic.is_some()) {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "`data_only` types have no standalone identity and cannot be `shared` or \
                 `polymorphic`",
            ));
        }
        if flags.shared && flags.polymorphic.is_some() {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "`shared` types round-trip through `Arc` handles only and cannot also be \
                 `polymorphic`",
            ));
        }
        if !flags.additional_bases.is_empty() && flags.polymorphic.is_none() {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "`additional_bases` requires `polymorphic(...)`",
            ));
        }

        Ok(Self {
            vis: input.vis.clone(),
            ident: input.ident.clone(),
            fields,
            flags,
        })
    }

    fn parse_type_flags(input: &DeriveInput) -> syn::Result<TypeFlags> {
        let mut flags = TypeFlags::default();
        for attr in &input.attrs {
            if !attr.path().is_ident("pod") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("data_only") {
                    flags.data_only = true;
                } else if meta.path.is_ident("shared") {
                    flags.shared = true;
                } else if meta.path.is_ident("custom_construct") {
                    flags.custom_construct = true;
                } else if meta.path.is_ident("hooks") {
                    flags.hooks = true;
                } else if meta.path.is_ident("polymorphic") {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    flags.polymorphic = Some(content.parse::<Path>()?);
                } else if meta.path.is_ident("additional_bases") {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    let bases = content.parse_terminated(Path::parse_mod_style, Token![,])?;
                    flags.additional_bases.extend(bases);
                } else {
                    return Err(meta.error("unknown `pod` type attribute"));
                }
                Ok(())
            })?;
        }
        Ok(flags)
    }

    fn parse_fields(fields: &Fields) -> syn::Result<Vec<ShadowField>> {
        let named = match fields {
            Fields::Named(named) => &named.named,
            Fields::Unit => return Ok(Vec::new()),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    fields,
                    "`derive(PodShadow)` requires named fields",
                ));
            }
        };

        let mut parsed = Vec::with_capacity(named.len());
        let mut seen_member = false;
        for field in named {
            let mut kind = FieldKind::Member;
            for attr in &field.attrs {
                if !attr.path().is_ident("pod") {
                    continue;
                }
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("base") {
                        kind = FieldKind::Base;
                    } else if meta.path.is_ident("skip") {
                        kind = FieldKind::Skipped;
                    } else {
                        return Err(meta.error("unknown `pod` field attribute"));
                    }
                    Ok(())
                })?;
            }

            match kind {
                FieldKind::Base if seen_member => {
                    return Err(syn::Error::new_spanned(
                        field,
                        "base fields must precede member fields",
                    ));
                }
                FieldKind::Member => seen_member = true,
                _ => {}
            }

            parsed.push(ShadowField {
                ident: field.ident.clone().expect("named field"),
                ty: field.ty.clone(),
                kind,
            });
        }
        Ok(parsed)
    }

    pub fn bases(&self) -> impl Iterator<Item = &ShadowField> {
        self.fields
            .iter()
            .filter(|field| matches!(field.kind, FieldKind::Base))
    }

    pub fn members(&self) -> impl Iterator<Item = &ShadowField> {
        self.fields
            .iter()
            .filter(|field| matches!(field.kind, FieldKind::Member))
    }

    pub fn skipped(&self) -> impl Iterator<Item = &ShadowField> {
        self.fields
            .iter()
            .filter(|field| matches!(field.kind, FieldKind::Skipped))
    }
}
