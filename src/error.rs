//! Error taxonomy shared by the loader, the inference engine and the host
//! commands.

use std::path::PathBuf;

/// Malformed or missing training resource. Always fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Failed to open training table at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to read training table header: {0}")]
    Read(#[source] csv::Error),

    #[error("Training table is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Malformed training row {row}: {source}")]
    Malformed {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Training table is empty")]
    EmptyTable,
}

/// A categorical value that was never seen while fitting an encoder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown value '{value}' for column '{column}'")]
pub struct UnknownCategoryError {
    pub column: String,
    pub value: String,
}

/// Failure while scoring a single observation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategoryError),

    /// The forest produced a class code the label encoder never assigned.
    #[error("Model produced label code {code}, but only {known} labels are known")]
    UndecodableLabel { code: usize, known: usize },

    #[error("Model produced an empty probability vector")]
    EmptyDistribution,
}

/// A predicted label with no registered message or icon. Means the
/// presentation table and the training labels have drifted apart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No presentation data registered for label '{label}'")]
pub struct MissingPresentationDataError {
    pub label: String,
}

/// Failure surfaced to the host by a command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The user submitted something the model cannot accept; re-prompt.
    #[error("Rejected input: {0}")]
    RejectedInput(#[from] UnknownCategoryError),

    /// Internal consistency fault; the host should stop.
    #[error("Internal error: {0}")]
    Internal(#[from] MissingPresentationDataError),

    /// The trained model and its label encoder disagree; the host should stop.
    #[error("Model fault: {0}")]
    Model(PredictError),
}

impl From<PredictError> for CommandError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::UnknownCategory(err) => CommandError::RejectedInput(err),
            other => CommandError::Model(other),
        }
    }
}

impl CommandError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, CommandError::Internal(_) | CommandError::Model(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_errors_split_into_rejected_input_and_model_faults() {
        let unknown = UnknownCategoryError {
            column: "music_listened".into(),
            value: "techno".into(),
        };
        let rejected = CommandError::from(PredictError::UnknownCategory(unknown.clone()));
        assert!(matches!(&rejected, CommandError::RejectedInput(err) if *err == unknown));
        assert!(!rejected.is_fatal());

        let fault = CommandError::from(PredictError::UndecodableLabel { code: 3, known: 2 });
        assert!(matches!(fault, CommandError::Model(_)));
        assert!(fault.is_fatal());
        assert!(CommandError::from(PredictError::EmptyDistribution).is_fatal());
    }
}
