//! Reading of `#[serde(...)]` attributes, that affect serialized names.
//!
//! Only `rename`, `rename_all`, `skip`, `skip_serializing` and `flatten` are
//! interpreted, everything else is skipped over.

use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;

/// Container level serde options.
#[derive(Debug, Clone, Default)]
pub struct ContainerAttrs {
    pub rename: Option<String>,
    pub rename_all: Option<RenameRule>,
}

impl ContainerAttrs {
    pub fn parse(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in serde_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if let Some(lit) = serialize_value(&meta)? {
                        parsed.rename = Some(lit.value());
                    }
                } else if meta.path.is_ident("rename_all") {
                    if let Some(lit) = serialize_value(&meta)? {
                        parsed.rename_all = Some(RenameRule::from_lit(&lit)?);
                    }
                } else {
                    skip(&meta)?;
                }

                Ok(())
            })?;
        }

        Ok(parsed)
    }

    /// Serde container name of a type with ident `id`.
    pub fn name(&self, id: &syn::Ident) -> String {
        self.rename
            .clone()
            .unwrap_or_else(|| id.unraw().to_string())
    }
}

/// Field level serde options.
#[derive(Debug, Clone, Default)]
pub struct FieldAttrs {
    pub rename: Option<String>,
    pub skip: bool,
    pub flatten: bool,
}

impl FieldAttrs {
    pub fn parse(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in serde_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if let Some(lit) = serialize_value(&meta)? {
                        parsed.rename = Some(lit.value());
                    }
                } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                    parsed.skip = true;
                } else if meta.path.is_ident("flatten") {
                    parsed.flatten = true;
                } else {
                    skip(&meta)?;
                }

                Ok(())
            })?;
        }

        Ok(parsed)
    }
}

/// Serde `rename_all` rule, as applied to field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    fn from_lit(lit: &syn::LitStr) -> syn::Result<Self> {
        match lit.value().as_str() {
            "lowercase" => Ok(Self::Lower),
            "UPPERCASE" => Ok(Self::Upper),
            "PascalCase" => Ok(Self::Pascal),
            "camelCase" => Ok(Self::Camel),
            "snake_case" => Ok(Self::Snake),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            "kebab-case" => Ok(Self::Kebab),
            "SCREAMING-KEBAB-CASE" => Ok(Self::ScreamingKebab),
            _ => Err(syn::Error::new_spanned(lit, "Unknown rename rule.")),
        }
    }

    /// Rename snake cased field name.
    pub fn apply(self, field: &str) -> String {
        match self {
            Self::Lower | Self::Snake => field.to_owned(),
            Self::Upper | Self::ScreamingSnake => field.to_ascii_uppercase(),
            Self::Pascal => stringcase::pascal_case(field),
            Self::Camel => stringcase::camel_case(field),
            Self::Kebab => field.replace('_', "-"),
            Self::ScreamingKebab => field.replace('_', "-").to_ascii_uppercase(),
        }
    }
}

fn serde_attrs(attrs: &[syn::Attribute]) -> impl Iterator<Item = &syn::Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("serde"))
}

/// Read either `name = "value"` or the serialize half of `name(serialize = "value")`.
fn serialize_value(meta: &ParseNestedMeta) -> syn::Result<Option<syn::LitStr>> {
    if meta.input.peek(syn::Token![=]) {
        return meta.value()?.parse().map(Some);
    }

    let mut value = None;

    meta.parse_nested_meta(|inner| {
        let lit: syn::LitStr = inner.value()?.parse()?;

        if inner.path.is_ident("serialize") {
            value = Some(lit);
        }

        Ok(())
    })?;

    Ok(value)
}

fn skip(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|inner| skip(&inner))?;
    }

    Ok(())
}
