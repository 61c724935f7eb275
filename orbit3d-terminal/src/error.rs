/// Errors surfaced by the terminal host
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("logger setup failed: {0}")]
    Logger(#[from] log::SetLoggerError),
}
