//! Content loading error types.

use std::path::PathBuf;

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Front-matter could not be parsed.
    Parse,
    /// Other/unknown error category.
    Other,
}

/// Content error with semantic kind and optional source.
#[derive(Debug)]
pub struct ContentError {
    /// Semantic error category.
    pub kind: ContentErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    message: Option<String>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ContentError {
    /// Create a new content error.
    #[must_use]
    pub fn new(kind: ContentErrorKind) -> Self {
        Self {
            kind,
            path: None,
            message: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach a human-readable message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a front-matter parse error.
    #[must_use]
    pub fn parse(err: serde_yaml::Error) -> Self {
        Self::new(ContentErrorKind::Parse).with_source(err)
    }

    /// Create a content error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ContentErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ContentErrorKind::PermissionDenied,
            _ => ContentErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "Kind: message: source (path: /foo/bar)"
        let kind_str = match self.kind {
            ContentErrorKind::NotFound => "Not found",
            ContentErrorKind::PermissionDenied => "Permission denied",
            ContentErrorKind::Parse => "Invalid front-matter",
            ContentErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}
