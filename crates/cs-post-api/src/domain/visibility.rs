use std::fmt;

/// Access class of a post as read back from storage.
///
/// Only `Public` is accepted on write; `Friends` is a legacy value that can
/// still be read and must still be enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Friends,
    Other(String),
}

impl Visibility {
    pub const PUBLIC: &'static str = "public";
    pub const FRIENDS: &'static str = "friends";

    /// Lenient read-side parse: blank means public, unknown values are kept as-is.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "" | Self::PUBLIC => Visibility::Public,
            Self::FRIENDS => Visibility::Friends,
            _ => Visibility::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Visibility::Public => Self::PUBLIC,
            Visibility::Friends => Self::FRIENDS,
            Visibility::Other(value) => value,
        }
    }

    /// Strict write-side check. The raw value must be exactly `public`.
    pub fn is_writable(raw: &str) -> bool {
        raw == Self::PUBLIC
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
