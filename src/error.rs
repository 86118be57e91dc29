use thiserror::Error;
use uuid::Uuid;

/// Recoverable failures surfaced to the caller of a command
///
/// Validation failures leave the state untouched. Lookups of missing ids
/// are no-ops for most operations; only `edit` reports `NotFound`.
#[derive(Debug, Error)]
pub enum HubError {
    #[error("Task text cannot be empty")]
    EmptyInput,

    #[error("Please select your mood first!")]
    MissingMoodSelection,

    #[error("No task with id {0}")]
    NotFound(Uuid),

    #[error("No single task matches '{0}'")]
    UnknownTaskRef(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl HubError {
    /// Validation errors never touch state; storage errors may have
    /// happened after the in-memory mutation succeeded.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::MissingMoodSelection | Self::NotFound(_) | Self::UnknownTaskRef(_)
        )
    }
}

pub type HubResult<T> = Result<T, HubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(HubError::EmptyInput.to_string(), "Task text cannot be empty");
        assert_eq!(
            HubError::MissingMoodSelection.to_string(),
            "Please select your mood first!"
        );
    }

    #[test]
    fn test_storage_is_not_validation() {
        let err: HubError = anyhow::anyhow!("disk full").into();
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "disk full");
        assert!(HubError::EmptyInput.is_validation());
    }
}
