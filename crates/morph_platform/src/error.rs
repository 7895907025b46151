//! Windowing errors

use thiserror::Error;

/// Failures starting or running the windowing layer
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The event loop could not start or stopped abnormally
    #[error("event loop error: {0}")]
    EventLoop(String),

    /// The OS refused to open the window
    #[error("could not open window: {0}")]
    WindowCreation(String),
}

pub type Result<T> = std::result::Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_cause() {
        let err = PlatformError::WindowCreation("no display".into());
        assert_eq!(err.to_string(), "could not open window: no display");
    }
}
