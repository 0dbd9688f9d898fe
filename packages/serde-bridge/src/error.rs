use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("projection error: {0}")]
    Projection(#[from] tagmap_core::Error),

    #[error("cannot encode {kind} value at {key}")]
    Unsupported { key: String, kind: &'static str },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
