use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The stored gradebook could not be read or written.
    #[error("I/O error on gradebook storage: {0}")]
    Io(#[from] std::io::Error),
    /// The stored slot exists but does not hold a list of classes.
    #[error("Stored gradebook at `{path}` is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not serialize gradebook: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Could not determine home directory")]
    NoHomeDir,
}
