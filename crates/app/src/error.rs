use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("source error: {0}")]
    Source(#[from] worker::SourceError),
    #[error("invalid cost estimate: {0}")]
    Engine(#[from] engine::EngineError),
    #[error(transparent)]
    Job(#[from] worker::JobError),
    #[error("cost estimate {0} not found")]
    NotFound(uuid::Uuid),
}
