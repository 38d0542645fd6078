//! The [`Experiment`] trait.

use cap_core::{Device, ExperimentError};

use crate::observable::Observable;

/// A runnable scenario that drives a [`Device`] and notifies observers.
///
/// Attach, detach and notify behave exactly as for any [`Observable`].
/// Concrete experiments override [`run`](Self::run), typically calling
/// [`notify`](Observable::notify) after each step so recorders can sample
/// the device.
pub trait Experiment: Observable {
    /// Run the scenario against `device`.
    ///
    /// The default fails with [`ExperimentError::NotImplemented`].
    fn run(&mut self, _device: &mut dyn Device) -> Result<(), ExperimentError> {
        Err(ExperimentError::NotImplemented { operation: "run" })
    }
}
