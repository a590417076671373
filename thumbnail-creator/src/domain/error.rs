use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Set the {0} env variable")]
    MissingVariable(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid thumbnail url {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("thumbnail service request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("invalid repository url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid datastream pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("repository url {0} cannot take path segments")]
    NotABase(String),
    #[error("repository request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("repository returned {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum CreatorError {
    #[error("{pid}: could not list datastreams: {source}")]
    ListDatastreams {
        pid: String,
        source: RepositoryError,
    },
    #[error("{pid}: {source}")]
    Resolve { pid: String, source: ResolveError },
}
