//! Error taxonomy shared by every layer of the crate.
//!
//! Callers match on [`ErrorKind`] to decide how to react:
//!
//! - `Configuration`: a parameter, preset, grid or optimizer target is outside
//!   its declared domain. Nothing is clamped or defaulted; the caller fixes input.
//! - `Computation`: the model could not produce a usable result (degenerate grid,
//!   non-finite output). The previous result of the affected trace is kept.
//! - `FileIo`: preset import/export could not touch the filesystem.
//! - `Terminal`: the interactive front-end could not drive the terminal.

/// Broad category of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Computation,
    FileIo,
    Terminal,
}

impl ErrorKind {
    /// Process exit code used by the `hydra` binary.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Configuration => 2,
            ErrorKind::FileIo => 3,
            ErrorKind::Computation => 4,
            ErrorKind::Terminal => 5,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn computation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Computation, message)
    }

    pub fn file_io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::FileIo, message)
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Terminal, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_kind() {
        assert_eq!(AppError::configuration("x").exit_code(), 2);
        assert_eq!(AppError::file_io("x").exit_code(), 3);
        assert_eq!(AppError::computation("x").exit_code(), 4);
        assert_eq!(AppError::terminal("x").exit_code(), 5);
    }

    #[test]
    fn display_is_the_message() {
        let err = AppError::computation("grid has 1 point");
        assert_eq!(err.to_string(), "grid has 1 point");
        assert_eq!(err.kind(), ErrorKind::Computation);
    }
}
