use std::path::PathBuf;

/// Result type alias for the generator core
pub type Result<T> = std::result::Result<T, GenError>;

/// Error types for the generator core.
///
/// Every variant is a mechanical failure. Annotation problems never surface here;
/// they only cause a route to be left out of the generated file.
#[derive(Debug)]
pub enum GenError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { file: PathBuf, message: String },
    InvalidArgument(String),
    Serialization(String),
}

impl GenError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}

impl std::fmt::Display for GenError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            GenError::Io { path, source } => write!(f, "IO error at {}: {}", path.display(), source),
            GenError::Parse { file, message } => {
                write!(f, "parse error in {}: {}", file.display(), message)
            }
            GenError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            GenError::Serialization(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for GenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GenError {
    fn from(err: serde_json::Error) -> Self {
        GenError::Serialization(format!("JSON serialization failed: {}", err))
    }
}

impl From<walkdir::Error> for GenError {
    fn from(err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("<unknown>"));
        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
        GenError::Io { path, source }
    }
}
