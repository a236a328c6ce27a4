//! Process-level error type and the exit-code policy.
//!
//! Every failure the binary can surface is an [`AppError`] carrying one of
//! three exit classes:
//!
//! - [`EXIT_INPUT`] (2): bad flags, schema problems, unreadable files,
//!   invalid budget — the caller must correct the input and re-run
//! - [`EXIT_EMPTY`] (3): the fetched dataset had zero job rows
//! - [`EXIT_RUNTIME`] (4): network or terminal failures outside the
//!   caller's control
//!
//! Pipeline stages use their own [`crate::pipeline::PipelineError`];
//! `app::pipeline` maps those onto these classes at the boundary.

/// Caller-correctable input or configuration problem.
pub const EXIT_INPUT: u8 = 2;
/// The input data source produced no job rows.
pub const EXIT_EMPTY: u8 = 3;
/// Network, terminal, or other environment failure.
pub const EXIT_RUNTIME: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
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
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prints_the_message_only() {
        let err = AppError::new(EXIT_INPUT, "Missing required columns: `Status`");
        assert_eq!(err.to_string(), "Missing required columns: `Status`");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn exit_classes_are_distinct() {
        assert_ne!(EXIT_INPUT, EXIT_EMPTY);
        assert_ne!(EXIT_EMPTY, EXIT_RUNTIME);
        assert_ne!(EXIT_INPUT, EXIT_RUNTIME);
    }
}
