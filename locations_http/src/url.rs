use std::fmt::{Display, Write};

use crate::codecs::encode_url_path_part;
use crate::parameters::{Parameters, ParametersBuilder};
use crate::protocol::UrlProtocol;

/// Immutable, encoded URL.
///
/// Built with [`UrlBuilder`]. Port is kept as specified, so an explicitly set
/// default port survives copying into a builder and building again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    protocol: UrlProtocol,
    host: String,
    specified_port: Option<u16>,
    encoded_path: String,
    parameters: Parameters,
    fragment: String,
    user: Option<String>,
    password: Option<String>,
    trailing_query: bool,
}

impl Url {
    pub fn protocol(&self) -> &UrlProtocol {
        &self.protocol
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port, as it was set explicitly (if it was).
    pub fn specified_port(&self) -> Option<u16> {
        self.specified_port
    }

    /// Effective port: the specified one, or default port of protocol.
    pub fn port(&self) -> u16 {
        self.specified_port
            .unwrap_or_else(|| self.protocol.default_port())
    }

    pub fn encoded_path(&self) -> &str {
        &self.encoded_path
    }

    /// Query parameters (not encoded).
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Whether `?` is rendered even when there are no query parameters.
    pub fn trailing_query(&self) -> bool {
        self.trailing_query
    }

    /// Encoded path with query string, but without scheme, host, port and fragment.
    pub fn full_path(&self) -> String {
        let mut output = String::new();
        append_full_path(
            &mut output,
            &self.encoded_path,
            &self.parameters,
            self.trailing_query,
        );

        output
    }

    /// `host:port` pair. Port is always present, even if it's the default one for protocol.
    pub fn host_with_port(&self) -> String {
        format!("{}:{}", self.host, self.port())
    }
}

impl Display for Url {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://", self.protocol.name())?;

        if let Some(user) = &self.user {
            f.write_str(user)?;
            if let Some(password) = &self.password {
                write!(f, ":{password}")?;
            }
            f.write_char('@')?;
        }

        f.write_str(&self.host)?;

        if let Some(port) = self
            .specified_port
            .filter(|port| *port != self.protocol.default_port())
        {
            write!(f, ":{port}")?;
        }

        f.write_str(&self.full_path())?;

        if !self.fragment.is_empty() {
            write!(f, "#{}", self.fragment)?;
        }

        Ok(())
    }
}

impl From<&UrlBuilder> for Url {
    fn from(value: &UrlBuilder) -> Self {
        value.build()
    }
}

/// Mutable counterpart of [`Url`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    pub protocol: UrlProtocol,
    pub host: String,
    /// Explicitly specified port. `None` means default port of protocol.
    pub port: Option<u16>,
    pub encoded_path: String,
    pub parameters: ParametersBuilder,
    pub fragment: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub trailing_query: bool,
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self {
            protocol: UrlProtocol::HTTP,
            host: "localhost".to_owned(),
            port: None,
            encoded_path: String::new(),
            parameters: ParametersBuilder::new(),
            fragment: String::new(),
            user: None,
            password: None,
            trailing_query: false,
        }
    }
}

impl UrlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take components from built [`Url`].
    ///
    /// Port is copied as specified, not as effective one.
    /// Parameters are appended to the already present ones.
    pub fn take_from_url(&mut self, url: &Url) -> &mut Self {
        self.protocol = url.protocol.clone();
        self.host = url.host.clone();
        self.port = url.specified_port;
        self.encoded_path = url.encoded_path.clone();
        self.user = url.user.clone();
        self.password = url.password.clone();
        self.parameters.append_all(url.parameters.entries());
        self.fragment = url.fragment.clone();
        self.trailing_query = url.trailing_query;

        self
    }

    /// Take components from another builder.
    ///
    /// Parameters are appended to the already present ones.
    pub fn take_from_builder(&mut self, other: &UrlBuilder) -> &mut Self {
        self.protocol = other.protocol.clone();
        self.host = other.host.clone();
        self.port = other.port;
        self.encoded_path = other.encoded_path.clone();
        self.user = other.user.clone();
        self.password = other.password.clone();
        self.parameters.append_all(other.parameters.entries());
        self.fragment = other.fragment.clone();
        self.trailing_query = other.trailing_query;

        self
    }

    /// Set encoded path from not encoded segments.
    pub fn path<S: AsRef<str>>(&mut self, segments: impl IntoIterator<Item = S>) -> &mut Self {
        let mut path = String::new();

        for segment in segments {
            path.push('/');
            path.push_str(&encode_url_path_part(segment.as_ref()));
        }

        self.encoded_path = path;
        self
    }

    pub fn build(&self) -> Url {
        Url {
            protocol: self.protocol.clone(),
            host: self.host.clone(),
            specified_port: self.port,
            encoded_path: self.encoded_path.clone(),
            parameters: self.parameters.build(),
            fragment: self.fragment.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            trailing_query: self.trailing_query,
        }
    }
}

impl From<&Url> for UrlBuilder {
    fn from(value: &Url) -> Self {
        let mut builder = Self::new();
        builder.take_from_url(value);

        builder
    }
}

fn append_full_path(
    output: &mut String,
    encoded_path: &str,
    parameters: &Parameters,
    trailing_query: bool,
) {
    if !encoded_path.starts_with('/') {
        output.push('/');
    }

    output.push_str(encoded_path);

    if !parameters.is_empty() || trailing_query {
        output.push('?');
    }

    output.push_str(&parameters.form_url_encode());
}
