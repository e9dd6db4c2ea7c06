use crate::errors::RoostError;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Backend executable '{executable}' not found on PATH")]
    ExecutableNotFound { executable: String },

    #[error("Failed to spawn backend '{command}': {source}")]
    SpawnFailed {
        command: String,
        source: std::io::Error,
    },
}

impl RoostError for BackendError {
    fn error_code(&self) -> &'static str {
        match self {
            BackendError::ExecutableNotFound { .. } => "BACKEND_EXECUTABLE_NOT_FOUND",
            BackendError::SpawnFailed { .. } => "BACKEND_SPAWN_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, BackendError::ExecutableNotFound { .. })
    }
}
