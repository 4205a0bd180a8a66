use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Reading the descriptor failed
    Io(PathBuf, std::io::Error),

    /// The descriptor is not well-formed XML
    Xml(roxmltree::Error),

    /// A required element is absent
    Missing(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(path, err) => {
                write!(f, "Failed to read project {}: {}", path.display(), err)
            }
            Error::Xml(err) => write!(f, "Invalid project XML: {}", err),
            Error::Missing(what) => write!(f, "Project is missing <{}>", what),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(_, err) => Some(err),
            Error::Xml(err) => Some(err),
            Error::Missing(_) => None,
        }
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::Xml(err)
    }
}
