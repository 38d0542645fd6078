//! Errors from recording and storing data series.

use cap_core::ObserverError;
use thiserror::Error;

/// Errors from [`DataSeries`](crate::DataSeries) and
/// [`KeyPathStore`](crate::KeyPathStore) operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DataError {
    /// The series has no sequence with this name.
    #[error("unknown series '{key}'")]
    UnknownSeries {
        /// The requested series name.
        key: String,
    },
    /// The store already holds this key and is not in overwrite mode.
    #[error("key '{key}' already exists")]
    KeyExists {
        /// The conflicting key path.
        key: String,
    },
    /// The store has no entry for this key.
    #[error("no such key '{key}'")]
    MissingKey {
        /// The requested key path.
        key: String,
    },
    /// The key path is empty or has an empty segment.
    #[error("invalid key path '{key}'")]
    InvalidKey {
        /// The offending key path.
        key: String,
    },
}

impl From<DataError> for ObserverError {
    fn from(e: DataError) -> Self {
        ObserverError::UpdateFailed {
            reason: e.to_string(),
        }
    }
}
