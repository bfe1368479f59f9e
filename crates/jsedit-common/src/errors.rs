use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// A call from the host into the embedded context could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("entry point not registered: {0}")]
    NotRegistered(&'static str),

    #[error("embedded context disconnected")]
    Disconnected,

    #[error("embedded context unreachable for this session")]
    Unreachable,

    #[error("script error: {0}")]
    Script(String),
}

/// A channel payload that does not decode to an intent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("empty payload")]
    Empty,

    #[error("unknown intent tag: {0:?}")]
    UnknownTag(char),

    #[error("intent tag {0:?} carries no data")]
    UnexpectedData(char),
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("file selection cancelled")]
    Cancelled,

    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that end startup of the binary.
#[derive(Debug, thiserror::Error)]
pub enum JseditError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("webview error: {0}")]
    WebView(String),

    #[error("{0}")]
    Other(String),
}
