use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Duplicate test name: {0}")]
    DuplicateTest(String),

    #[error("Unknown test: {0}")]
    UnknownTest(String),

    #[error("Test {0} is not a fuzz test")]
    NotAFuzzTest(String),

    #[error("Corpus I/O error at {path}: {source}")]
    CorpusIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid corpus entry: {0}")]
    CorpusFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl HarnessError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CorpusIo {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
