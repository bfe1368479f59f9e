pub mod errors;

pub use errors::{
    ConfigError, JseditError, PersistenceError, ProtocolError, TransportError,
};

pub type Result<T> = std::result::Result<T, JseditError>;
