use crate::errors::RoostError;

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("A window is already open")]
    AlreadyOpen,
}

impl RoostError for WindowError {
    fn error_code(&self) -> &'static str {
        match self {
            WindowError::AlreadyOpen => "WINDOW_ALREADY_OPEN",
        }
    }
}
