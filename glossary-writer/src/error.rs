use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("entry needs at least one word")]
    NoWords,

    #[error("unknown output format '{0}'")]
    UnknownFormat(String),

    #[error("dictionary data exceeds 4 GiB at entry '{word}'")]
    OffsetOverflow { word: String },

    #[error("compressed dictzip chunk of {size} bytes does not fit the chunk table")]
    ChunkTooLarge { size: usize },

    #[error("dictzip chunk table cannot hold {count} chunks")]
    TooManyChunks { count: usize },

    #[error("deflate failed: {0}")]
    Deflate(#[from] flate2::CompressError),

    #[error("inflate of {path} failed: {source}")]
    Inflate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
