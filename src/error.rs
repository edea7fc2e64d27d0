use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("no drawable surface: terminal reports {width}x{height} cells")]
    SurfaceUnavailable { width: u16, height: u16 },

    #[error("stdout is not a terminal")]
    NotATerminal,

    #[error("{0}")]
    InvalidArgument(String),

    #[error("could not set up logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;
