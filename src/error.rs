use thiserror::Error;

/// Errors from the remote store client.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Store returned HTTP {status} for table {table}")]
    Status { table: String, status: u16 },

    #[error("Failed to decode response from table {table}: {message}")]
    Decode { table: String, message: String },
}

/// Errors from boundary geometry helpers.
///
/// Boundary data is assumed well-formed; an empty geometry is a programmer
/// error upstream and must fail fast rather than produce a bogus center.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Boundary feature '{0}' has no vertices")]
    EmptyGeometry(String),
}

/// Errors while loading a boundary document.
#[derive(Error, Debug)]
pub enum BoundaryError {
    #[error("Failed to read boundary document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse boundary document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors while loading configuration from the environment.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, &'static str),
}
