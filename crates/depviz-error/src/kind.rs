use strum_macros::{Display, IntoStaticStr};

/// What went wrong.
///
/// Input kinds abort before anything is rendered. Output kinds abort after
/// the input was read. `ViewerFailed` is the only kind callers are expected
/// to log and ignore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Bad command-line derived configuration
    InvalidArgument,

    // input
    FileNotFound,
    PermissionDenied,
    IoFailed,
    /// Malformed JSON, or JSON of the wrong shape
    DeserializationFailed,

    // output
    SerializationFailed,
    /// The layout engine could not be started or exited with failure
    RenderFailed,
    /// Page template failed to parse or render
    TemplateFailed,
    ViewerFailed,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Errors raised while locating, reading or parsing the input document.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::FileNotFound
                | ErrorKind::PermissionDenied
                | ErrorKind::IoFailed
                | ErrorKind::DeserializationFailed
        )
    }
}
