//! Error types for the Cap framework.
//!
//! Organized by subsystem: configuration tree access, polymorphic
//! construction, observer wiring, experiment execution, and devices.
//! Every failure is surfaced to the immediate caller; nothing in the
//! core retries or rolls back.

use thiserror::Error;

/// Errors from reading or writing a [`PropertyTree`](crate::PropertyTree).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TreeError {
    /// No entry exists at the requested path.
    #[error("no such key '{path}'")]
    MissingKey {
        /// The dotted path that was looked up.
        path: String,
    },
    /// An entry exists but holds a value of a different kind.
    #[error("key '{path}' holds {found}, expected {expected}")]
    TypeMismatch {
        /// The dotted path that was looked up.
        path: String,
        /// The requested value kind.
        expected: &'static str,
        /// The kind actually stored.
        found: String,
    },
    /// The path is empty or contains an empty segment.
    #[error("invalid path '{path}'")]
    InvalidPath {
        /// The offending path.
        path: String,
    },
    /// Structured input could not be turned into a tree.
    #[error("parse error: {reason}")]
    Parse {
        /// Description of the parse failure.
        reason: String,
    },
}

/// Errors from the polymorphic factory.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    /// An abstract family was asked to build with no configuration at all.
    #[error("{family} cannot be built without a configuration")]
    MissingConfiguration {
        /// Name of the abstract family.
        family: &'static str,
    },
    /// The configuration has no `type` key.
    #[error("{family} configuration has no 'type' key")]
    MissingTypeKey {
        /// Name of the abstract family.
        family: &'static str,
    },
    /// The `type` value names nothing registered in the family.
    #[error("invalid {family} type '{type_name}'")]
    UnknownType {
        /// Name of the abstract family.
        family: &'static str,
        /// The unresolved type string.
        type_name: String,
    },
    /// A concrete constructor could not read its configuration.
    #[error("configuration: {0}")]
    Config(#[from] TreeError),
    /// A concrete constructor rejected its configuration.
    #[error("construction failed: {reason}")]
    Failed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

/// Errors from attaching, detaching and notifying observers.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ObserverError {
    /// The observer is already attached to this subject.
    #[error("observer is already attached")]
    AlreadyAttached,
    /// The observer is not currently attached to this subject.
    #[error("observer is not attached")]
    NotAttached,
    /// An attachment no longer resolves to a live observer.
    #[error("observer at position {position} was dropped while attached")]
    DeadObserver {
        /// Position of the dangling attachment, in attachment order.
        position: usize,
    },
    /// A base operation was invoked without a concrete override.
    #[error("{operation}() must be overridden")]
    NotImplemented {
        /// Name of the operation.
        operation: &'static str,
    },
    /// A concrete observer failed while handling a notification.
    #[error("update failed: {reason}")]
    UpdateFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

/// Errors from a simulated device.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DeviceError {
    /// The device cannot be driven with the requested control.
    #[error("unsupported control: {control}")]
    Unsupported {
        /// Description of the rejected control.
        control: String,
    },
    /// The device failed to advance.
    #[error("device failed: {reason}")]
    Failed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

/// Errors from [`Experiment::run`]-style scenario execution.
///
/// The trait itself lives in `cap-observer`; the error is defined here so
/// devices and observers can both feed into it.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ExperimentError {
    /// A base operation was invoked without a concrete override.
    #[error("{operation}() must be overridden")]
    NotImplemented {
        /// Name of the operation.
        operation: &'static str,
    },
    /// Notifying observers failed mid-run.
    #[error("notify: {0}")]
    Notify(#[from] ObserverError),
    /// The device under test failed mid-run.
    #[error("device: {0}")]
    Device(#[from] DeviceError),
    /// The experiment could not read its configuration.
    #[error("configuration: {0}")]
    Config(#[from] TreeError),
    /// The scenario failed for another reason.
    #[error("experiment failed: {reason}")]
    Failed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_names_the_unresolved_string() {
        let err = BuildError::UnknownType {
            family: "Observer",
            type_name: "Invalid".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Observer"));
        assert!(msg.contains("'Invalid'"));
    }

    #[test]
    fn tree_error_converts_into_build_error() {
        let err: BuildError = TreeError::MissingKey {
            path: "geometry.area".to_string(),
        }
        .into();
        assert!(matches!(err, BuildError::Config(TreeError::MissingKey { .. })));
        assert_eq!(err.to_string(), "configuration: no such key 'geometry.area'");
    }

    #[test]
    fn observer_error_converts_into_experiment_error() {
        let err: ExperimentError = ObserverError::DeadObserver { position: 2 }.into();
        assert_eq!(
            err,
            ExperimentError::Notify(ObserverError::DeadObserver { position: 2 })
        );
        assert!(err.to_string().contains("position 2"));
    }

    #[test]
    fn not_implemented_display() {
        let err = ObserverError::NotImplemented { operation: "update" };
        assert_eq!(err.to_string(), "update() must be overridden");
    }
}
