use thiserror::Error;

#[derive(Error, Debug)]
pub enum AcceleratorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),

    #[error("{0} stream closed: filter engine is not running")]
    ChannelClosed(&'static str),

    #[error("Filter engine task failed: {0}")]
    EngineTask(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AcceleratorError>;
