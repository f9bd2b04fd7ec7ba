use locations_paths::LocationPattern;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::parse_quote;

use crate::serde_attrs::{ContainerAttrs, FieldAttrs};

/// Parsed `#[derive(Location)]` input.
#[derive(Debug, Clone)]
pub struct Location {
    pub id: syn::Ident,
    pub generics: syn::Generics,
    pub meta: LocationMeta,
    /// Serde container name of the type.
    pub name: String,
}

impl Location {
    pub fn parse(mut input: syn::DeriveInput) -> syn::Result<Self> {
        let meta = deluxe::extract_attributes::<_, LocationMeta>(&mut input);
        let container = ContainerAttrs::parse(&input.attrs);
        let fields = serialized_fields(&input);

        let (meta, container, fields) = match (meta, container, fields) {
            (Ok(meta), Ok(container), Ok(fields)) => (meta, container, fields),
            (meta, container, fields) => {
                let errors = [meta.err(), container.err(), fields.err()];

                return Err(join_errors(errors.into_iter().flatten()).unwrap_or_else(|| {
                    syn::Error::new(Span::call_site(), "Invalid `Location` input.")
                }));
            }
        };

        let name = container.name(&input.ident);
        let fields = fields.map(|fields| {
            fields
                .into_iter()
                .map(|(ident, attrs)| match (attrs.rename, container.rename_all) {
                    (Some(rename), _) => rename,
                    (None, Some(rule)) => rule.apply(&ident),
                    (None, None) => ident,
                })
                .collect::<Vec<_>>()
        });

        validate_template(meta.path_lit(), &input.ident, fields.as_deref())?;

        Ok(Self {
            id: input.ident,
            generics: input.generics,
            meta,
            name,
        })
    }
}

#[derive(Debug, Clone, deluxe::ExtractAttributes)]
#[deluxe(attributes(location))]
pub struct LocationMeta(
    /// Location template
    pub syn::LitStr,
    /// Options
    #[deluxe(flatten)]
    pub LocationOptions,
);

impl LocationMeta {
    pub fn path(&self) -> String {
        self.0.value()
    }

    pub fn path_lit(&self) -> &syn::LitStr {
        &self.0
    }

    pub fn options(&self) -> &LocationOptions {
        &self.1
    }
}

#[derive(Debug, Clone, Default, deluxe::ParseMetaItem)]
#[deluxe(default)]
pub struct LocationOptions {
    /// Path to `locations` crate, for re-exported crates.
    pub root: Option<syn::Path>,
}

impl LocationOptions {
    pub fn root(&self) -> syn::Path {
        self.root.clone().unwrap_or_else(|| parse_quote!(::locations))
    }
}

pub fn implement(location: &Location) -> TokenStream {
    let id = &location.id;
    let root = location.meta.options().root();
    let name = &location.name;
    let path = location.meta.path_lit();

    let mut generics = location.generics.clone();
    generics
        .make_where_clause()
        .predicates
        .push(parse_quote!(Self: #root::serde::Serialize));

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        #[automatically_derived]
        impl #impl_generics #root::Location for #id #ty_generics #where_clause {
            const NAME: &'static str = #name;
            const PATH: &'static str = #path;
        }
    }
}

/// Snake cased idents of serialized fields with their serde options.
///
/// `None`, when serialized names can't be known statically (flattened fields).
fn serialized_fields(input: &syn::DeriveInput) -> syn::Result<Option<Vec<(String, FieldAttrs)>>> {
    let fields = match &input.data {
        syn::Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "`Location` can only be derived for structs.",
            ))
        }
    };

    let named = match fields {
        syn::Fields::Named(named) => &named.named,
        syn::Fields::Unit => return Ok(Some(vec![])),
        syn::Fields::Unnamed(unnamed) => {
            return Err(syn::Error::new_spanned(
                unnamed,
                "Tuple structs can't be locations, as their fields have no names to bind captures to.",
            ))
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    let mut errors = Vec::new();

    for field in named {
        let ident = field
            .ident
            .as_ref()
            .map(|ident| ident.unraw().to_string())
            .unwrap_or_default();

        match FieldAttrs::parse(&field.attrs) {
            Ok(attrs) => fields.push((ident, attrs)),
            Err(err) => errors.push(err),
        }
    }

    if let Some(err) = join_errors(errors) {
        return Err(err);
    }

    if fields.iter().any(|(_, attrs)| attrs.flatten) {
        return Ok(None);
    }

    Ok(Some(
        fields.into_iter().filter(|(_, attrs)| !attrs.skip).collect(),
    ))
}

fn validate_template(
    path: &syn::LitStr,
    id: &syn::Ident,
    fields: Option<&[String]>,
) -> syn::Result<()> {
    let path_str = path.value();
    let pattern = LocationPattern::new(&path_str)
        .map_err(|err| syn::Error::new_spanned(path, format!("Invalid location: {err}.")))?;

    let Some(fields) = fields else {
        return Ok(());
    };

    let errors = pattern
        .path_parameter_names()
        .iter()
        .filter(|ident| !fields.iter().any(|field| field == *ident))
        .map(|ident| {
            syn::Error::new_spanned(
                path,
                format!("Capture `{ident}` doesn't match any serialized field of `{id}`."),
            )
        });

    match join_errors(errors) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Single error reporting every one of `errors`, `None` when there are none.
fn join_errors(errors: impl IntoIterator<Item = syn::Error>) -> Option<syn::Error> {
    errors.into_iter().reduce(|mut joined, err| {
        joined.combine(err);
        joined
    })
}
