//! Family markers for observers, observables, experiments and devices,
//! plus the [`Builders`] bundle that wires them.

use std::rc::Rc;

use cap_core::{BuildError, Device, PropertyTree};
use cap_factory::{Family, TypeRegistry};

use crate::experiment::Experiment;
use crate::observable::Observable;
use crate::observer::Observer;

/// Family of [`Observer`]s. Built observers are shared, hence `Rc`.
pub struct ObserverFamily;

impl Family for ObserverFamily {
    const NAME: &'static str = "Observer";
    type Product = Rc<dyn Observer>;
}

/// Family of [`Observable`] subjects.
pub struct ObservableFamily;

impl Family for ObservableFamily {
    const NAME: &'static str = "Observable";
    type Product = Box<dyn Observable>;
}

/// Family of [`Experiment`]s.
pub struct ExperimentFamily;

impl Family for ExperimentFamily {
    const NAME: &'static str = "Experiment";
    type Product = Box<dyn Experiment>;
}

/// Family of simulated [`Device`]s.
pub struct DeviceFamily;

impl Family for DeviceFamily {
    const NAME: &'static str = "Device";
    type Product = Box<dyn Device>;
}

/// One registry per family, owned by the program's wiring code.
///
/// Concrete types register here once, before the first build. Tests
/// create a fresh `Builders` per case, which keeps them isolated.
#[derive(Debug, Default)]
pub struct Builders {
    /// Observer registry.
    pub observers: TypeRegistry<ObserverFamily>,
    /// Observable registry.
    pub observables: TypeRegistry<ObservableFamily>,
    /// Experiment registry.
    pub experiments: TypeRegistry<ExperimentFamily>,
    /// Device registry.
    pub devices: TypeRegistry<DeviceFamily>,
}

impl Builders {
    /// Create a bundle of empty registries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an observer from `config`.
    pub fn build_observer(
        &self,
        config: Option<&PropertyTree>,
    ) -> Result<Rc<dyn Observer>, BuildError> {
        self.observers.build(config)
    }

    /// Build an observable from `config`.
    ///
    /// Experiments are observables too: a `type` missing from the
    /// observable registry but present in the experiment registry builds
    /// that experiment.
    pub fn build_observable(
        &self,
        config: Option<&PropertyTree>,
    ) -> Result<Box<dyn Observable>, BuildError> {
        match self.observables.build(config) {
            Err(BuildError::UnknownType { type_name, .. })
                if self.experiments.contains(&type_name) =>
            {
                let experiment: Box<dyn Observable> = self.experiments.build(config)?;
                Ok(experiment)
            }
            other => other,
        }
    }

    /// Build an experiment from `config`.
    pub fn build_experiment(
        &self,
        config: Option<&PropertyTree>,
    ) -> Result<Box<dyn Experiment>, BuildError> {
        self.experiments.build(config)
    }

    /// Build a device from `config`.
    pub fn build_device(&self, config: Option<&PropertyTree>) -> Result<Box<dyn Device>, BuildError> {
        self.devices.build(config)
    }
}
