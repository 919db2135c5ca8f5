use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML manifest {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid manifest: {message}")]
    InvalidManifest { message: String },

    #[error("invalid manifest path {path}: {message}")]
    InvalidPath { path: PathBuf, message: String },

    #[error("duplicate table in manifest: {table}")]
    DuplicateTable { table: String },

    #[error("missing file listed in manifest: {path}")]
    MissingFile { path: PathBuf },
}

impl ReferenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReferenceError>;
