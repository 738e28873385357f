use std::fmt;

/// Result type for worklog-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the engine layer
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// TOML deserialization failed
    TomlDe(toml::de::Error),

    /// TOML serialization failed
    TomlSer(toml::ser::Error),

    /// Configuration problem (unresolvable data dir, bad values, etc.)
    Config(String),

    /// Team registry problem (unknown team, no roster identifier, etc.)
    Team(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::TomlDe(err) => write!(f, "TOML parse error: {}", err),
            Error::TomlSer(err) => write!(f, "TOML serialize error: {}", err),
            Error::Config(msg) => write!(f, "Config error: {}", msg),
            Error::Team(msg) => write!(f, "Team error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::TomlDe(err) => Some(err),
            Error::TomlSer(err) => Some(err),
            Error::Config(_) | Error::Team(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::TomlDe(err)
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::TomlSer(err)
    }
}
