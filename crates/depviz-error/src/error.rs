//! The error type shared by every depviz crate.

use std::fmt;

use crate::ErrorKind;

type Source = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failure somewhere between reading the input and writing the artifact.
///
/// Besides the kind and message it records where it happened: the innermost
/// `operation` (`"collect::load_forest"`, `"dot::graphviz"`, ...), the
/// operations it was passed up through, and key/value details such as the
/// path or the engine program involved.
pub struct Error {
    kind: ErrorKind,
    message: String,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<Source>,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            operation: "",
            context: Vec::new(),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The most recent operation recorded, or `""`.
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// First context value stored under `key`.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find_map(|(k, v)| (*k == key).then_some(v.as_str()))
    }

    /// Record the operation this error passes through.
    ///
    /// An earlier operation is kept in context under `"called"`.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            let called = std::mem::replace(&mut self.operation, operation);
            self.context.push(("called", called.to_string()));
        } else {
            self.operation = operation;
        }
        self
    }

    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Attach the foreign error this one wraps. Only the first call counts.
    pub fn set_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        if self.source.is_none() {
            self.source = Some(Box::new(source));
        }
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.operation.is_empty() {
            write!(f, " in {}", self.operation)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            write!(f, " [{}]", pairs.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Error");
        debug
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("operation", &self.operation);
        if !self.context.is_empty() {
            debug.field("context", &self.context);
        }
        if let Some(source) = &self.source {
            debug.field("source", source);
        }
        debug.finish()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IoFailed,
        };
        Error::new(kind, err.to_string())
            .with_operation("io")
            .set_source(err)
    }
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// Wrap an IO error that happened while touching `path`.
    pub fn io_at(err: std::io::Error, path: impl Into<String>) -> Self {
        Error::from(err).with_context("path", path)
    }

    pub fn deserialization_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DeserializationFailed, message)
    }

    pub fn serialization_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SerializationFailed, message)
    }

    pub fn render_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RenderFailed, message)
    }

    pub fn template_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TemplateFailed, message)
    }

    pub fn viewer_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ViewerFailed, message)
    }
}
