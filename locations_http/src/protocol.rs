use std::borrow::Cow;

/// URL scheme together with its default port.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlProtocol {
    name: Cow<'static, str>,
    default_port: u16,
}

impl UrlProtocol {
    pub const HTTP: Self = Self::new_static("http", 80);
    pub const HTTPS: Self = Self::new_static("https", 443);
    pub const WS: Self = Self::new_static("ws", 80);
    pub const WSS: Self = Self::new_static("wss", 443);
    pub const SOCKS: Self = Self::new_static("socks", 1080);

    const KNOWN: [Self; 5] = [Self::HTTP, Self::HTTPS, Self::WS, Self::WSS, Self::SOCKS];

    pub const fn new_static(name: &'static str, default_port: u16) -> Self {
        Self {
            name: Cow::Borrowed(name),
            default_port,
        }
    }

    pub fn new(name: impl Into<String>, default_port: u16) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            default_port,
        }
    }

    /// Lookup one of well-known protocols (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        Self::KNOWN
            .into_iter()
            .find(|protocol| protocol.name.eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_port(&self) -> u16 {
        self.default_port
    }
}

impl Default for UrlProtocol {
    fn default() -> Self {
        Self::HTTP
    }
}
