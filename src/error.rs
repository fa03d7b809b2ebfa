use std::error;
use std::fmt;

#[derive(Debug)]

/**
 * Error to represent an invalid run configuration, or a failure to set up
 * the worker pool or write the final snapshot.
 */
pub enum Error {
    EmptyGrid { width: usize, height: usize },
    GridTooLarge { width: usize, height: usize },
    TooFewBuffers(usize),
    NoThreads,
    ThreadPool(String),
    WindowOutOfRange,
    Io(std::io::Error),
    Snapshot(String),
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        use Error::*;

        match self {
            EmptyGrid { width, height } => write!(fmt, "grid {}x{} has no cells", width, height),
            GridTooLarge { width, height } => write!(fmt, "grid {}x{} is too large to allocate", width, height),
            TooFewBuffers(n) => write!(fmt, "at least 2 buffers are required, got {}", n),
            NoThreads => write!(fmt, "thread count must be at least 1"),
            ThreadPool(msg) => write!(fmt, "failed to build thread pool: {}", msg),
            WindowOutOfRange => write!(fmt, "display window is outside the grid"),
            Io(e) => write!(fmt, "i/o error: {}", e),
            Snapshot(msg) => write!(fmt, "snapshot encoding error: {}", msg),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        Error::ThreadPool(e.to_string())
    }
}
