use std::fmt::Display;

use http::codecs::{encode_url_path, encode_url_path_part};
use http::Parameters;

type Result<T> = std::result::Result<T, Error>;

/// Parsed location template, like `/users/{id}/posts/{post_id}`.
///
/// Literal parts of the template are kept verbatim, `{name}` captures are substituted
/// for percent-encoded values by [`LocationPattern::format`].
#[derive(Debug, Clone, PartialEq)]
pub struct LocationPattern<'s> {
    template: &'s str,
    segments: Vec<Segment<'s>>,
    idents: Vec<&'s str>,
    wildcard: Option<&'s str>,
}

impl<'s> LocationPattern<'s> {
    /// Parse location template.
    ///
    /// A capture may take a whole path segment (`/{id}`) or a part of it (`/{name}.{ext}`).
    /// The last segment may be a wildcard capture (`/{*rest}`), which value keeps its `/`.
    pub fn new(template: &'s str) -> Result<Self> {
        let mut segments = vec![];
        let mut idents = vec![];
        let mut wildcard = None;
        let mut rest = template;

        while !rest.is_empty() {
            let Some(start) = rest.find(['{', '}']) else {
                segments.push(Segment::Static(assert_url_literal(rest)?));
                break;
            };

            if rest[start..].starts_with('}') {
                return Err(Error::UnclosedCapture);
            }

            if start > 0 {
                segments.push(Segment::Static(assert_url_literal(&rest[..start])?));
            }

            let preceding = &template[..template.len() - rest.len() + start];
            let body = &rest[start + 1..];
            let end = match body.find(['{', '}']) {
                Some(idx) if body[idx..].starts_with('}') => idx,
                _ => return Err(Error::UnclosedCapture),
            };
            let capture = &body[..end];
            rest = &body[end + 1..];

            if let Some(ident) = capture.strip_prefix('*') {
                let ident = assert_ident(ident)?;
                let whole_segment = preceding.is_empty() || preceding.ends_with('/');

                if !whole_segment || !rest.is_empty() {
                    return Err(Error::InvalidWildcard);
                }

                push_unique(&mut idents, ident);
                wildcard = Some(ident);
            } else {
                let ident = assert_ident(capture)?;
                push_unique(&mut idents, ident);
                segments.push(Segment::Capture(ident));
            }
        }

        Ok(Self {
            template,
            segments,
            idents,
            wildcard,
        })
    }

    /// Raw template this pattern was parsed from.
    pub fn template(&self) -> &'s str {
        self.template
    }

    /// Template pieces (without wildcard capture).
    pub fn segments(&self) -> &[Segment<'s>] {
        &self.segments
    }

    /// Distinct names of all captures, including wildcard.
    pub fn path_parameter_names(&self) -> &[&'s str] {
        &self.idents
    }

    /// Check, if `name` is bound to the path.
    pub fn contains(&self, name: &str) -> bool {
        self.idents.contains(&name)
    }

    /// Get ident of wildcard capture (if present).
    pub fn wildcard(&self) -> Option<&'s str> {
        self.wildcard
    }

    /// Check, if template has no captures.
    pub fn is_static(&self) -> bool {
        self.idents.is_empty()
    }

    /// Substitute every capture for percent-encoded value of the same name.
    ///
    /// Fails, if `values` miss any capture name.
    pub fn format(&self, values: &Parameters) -> std::result::Result<String, FormatError> {
        let mut output = String::with_capacity(self.template.len());

        for segment in &self.segments {
            match segment {
                Segment::Static(literal) => output.push_str(literal),
                Segment::Capture(ident) => {
                    output.push_str(&encode_url_path_part(required(values, ident)?))
                }
            }
        }

        if let Some(ident) = self.wildcard {
            output.push_str(&encode_url_path(required(values, ident)?));
        }

        Ok(output)
    }
}

fn required<'v>(values: &'v Parameters, ident: &str) -> std::result::Result<&'v str, FormatError> {
    values
        .get(ident)
        .ok_or_else(|| FormatError::MissingPathParameter(ident.to_owned()))
}

fn push_unique<'s>(idents: &mut Vec<&'s str>, ident: &'s str) {
    if !idents.contains(&ident) {
        idents.push(ident);
    }
}

/// A piece of location template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'s> {
    /// Literal text, that is copied into output as is.
    Static(&'s str),
    /// A capture, that should be substituted for a value
    /// (contains a name of capture variable, that is a valid Rust ident).
    Capture(&'s str),
}

/// An error type for parsing location templates.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    UnclosedCapture,
    /// Wildcard captures are only accepted as the whole last segment.
    InvalidWildcard,
    /// Capture variable wasn't a valid Rust ident.
    InvalidIdent,
    /// Literal text contained invalid URL path character.
    InvalidPathChar,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnclosedCapture => write!(f, "unclosed capture"),
            Self::InvalidWildcard => {
                write!(f, "wildcard can only be the last segment of location template")
            }
            Self::InvalidIdent => write!(f, "capture ident should be a valid Rust ident"),
            Self::InvalidPathChar => write!(
                f,
                "literal parts of template should be valid url path substrings"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// An error type for formatting location templates.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No value was provided for a capture.
    MissingPathParameter(String),
}

impl Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPathParameter(name) => write!(f, "missing path parameter: {name}"),
        }
    }
}

impl std::error::Error for FormatError {}

fn is_valid_ident(segment: &str) -> bool {
    segment.starts_with(|ch| char::is_alphabetic(ch) || ch == '_')
        && segment.chars().all(|ch| ch.is_alphanumeric() || ch == '_')
}

fn assert_ident(seg: &str) -> Result<&str> {
    if is_valid_ident(seg) {
        Ok(seg)
    } else {
        Err(Error::InvalidIdent)
    }
}

fn is_valid_url_path_char(ch: char) -> bool {
    matches!(ch,
        'A'..='Z'
        | 'a'..='z'
        | '0'..='9'
        | '-'
        | '.'
        | '_'
        | '~'
        | '!'
        | '$'
        | '&'
        | '\''
        | '('
        | ')'
        | '*'
        | '+'
        | ','
        | ';'
        | '='
        | ':'
        | '@'
        | '%'
        | '/'
    )
}

fn assert_url_literal(literal: &str) -> Result<&str> {
    if literal.chars().all(is_valid_url_path_char) {
        Ok(literal)
    } else {
        Err(Error::InvalidPathChar)
    }
}
