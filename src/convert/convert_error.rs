use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("failed opening feed archive {path}: {message}")]
    ArchiveOpenError { path: PathBuf, message: String },
    #[error("required table {0} not found in feed archive")]
    MissingRequiredTable(String),
    #[error("failed reading table {table}: {message}")]
    TableReadError { table: String, message: String },
    #[error("output file {0} already exists (pass --overwrite to replace it)")]
    OutputExistsError(PathBuf),
    #[error("failed writing {path}: {message}")]
    OutputWriteError { path: PathBuf, message: String },
    #[error("failed serializing dense feed: {0}")]
    SerializeError(String),
    #[error("failed loading dense feed {path}: {message}")]
    DenseReadError { path: PathBuf, message: String },
}
