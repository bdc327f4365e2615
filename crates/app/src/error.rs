use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("api error: {0}")]
    Client(#[from] client::ClientError),
    #[error("{0}")]
    Engine(#[from] engine::EngineError),
    #[error("fixture error: {0}")]
    Fixture(#[from] fixture_server::FixtureError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("usage error: {0}")]
    Usage(String),
}
