use crate::errors::RoostError;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Shell is stopped - command not accepted")]
    Stopped,
}

impl RoostError for DispatchError {
    fn error_code(&self) -> &'static str {
        match self {
            DispatchError::Stopped => "DISPATCH_STOPPED",
        }
    }
}
