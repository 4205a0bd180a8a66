use std::fmt;

/// Result type for rsreport-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can abort the assembly or rendering of a report
#[derive(Debug)]
pub enum Error {
    /// Reading a style sheet / template or writing the artifact failed
    Io(std::io::Error),

    /// The row source rejected or failed a query
    Source(Box<dyn std::error::Error + Send + Sync>),

    /// A data row does not have the same number of cells as the header
    ColumnMismatch { expected: usize, found: usize },

    /// The templating pass failed
    Template(minijinja::Error),
}

impl Error {
    /// Wrap an error raised by a row source implementation
    pub fn from_source<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Source(Box::new(err))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Source(err) => write!(f, "Row source error: {}", err),
            Error::ColumnMismatch { expected, found } => write!(
                f,
                "Column mismatch: table declares {} columns but a row has {}",
                expected, found
            ),
            Error::Template(err) => write!(f, "Template error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Source(err) => Some(err.as_ref()),
            Error::Template(err) => Some(err),
            Error::ColumnMismatch { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        Error::Template(err)
    }
}
