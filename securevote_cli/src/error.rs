use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    SecureVote(#[from] securevote::Error),

    #[error("unable to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("unable to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("invalid {name}: {value}")]
    Config { name: &'static str, value: String },

    #[error("unable to expand path {0}")]
    Expand(String),

    #[error("{0} already exists, pass --force to overwrite")]
    Exists(String),

    #[error("request rejected: {0}")]
    Rejected(String),
}
