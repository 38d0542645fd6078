//! Test utilities and fixture types for Cap development.
//!
//! Provides a [`MockDevice`], concrete observers and subjects for
//! exercising the attach/detach/notify contract, and experiments with
//! and without a `run` override. [`wire`] registers all of them into a
//! [`Builders`] so factory paths can be tested end to end.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod device;
pub mod experiments;
pub mod observers;

pub use device::MockDevice;
pub use experiments::{charge_probe, ChargeExperiment, DummyExperiment, ScriptedExperiment};
pub use observers::{
    subject_address, Echo, EventLog, LogEntry, NamedSubject, PlainObserver, ScriptedObserver,
};

use std::rc::Rc;

use cap_core::PropertyTree;
use cap_observer::{Builders, Observer};

/// Register every fixture type under its conventional name.
///
/// | Family | Name | Type |
/// |---|---|---|
/// | observer | `Echo` | [`Echo`] writing to `log` |
/// | observer | `Plain` | [`PlainObserver`] |
/// | observable | `NamedSubject` | [`NamedSubject`] |
/// | experiment | `Dummy` | [`DummyExperiment`] |
/// | experiment | `Charge` | [`ChargeExperiment`] |
/// | device | `Mock` | [`MockDevice`] |
pub fn wire(builders: &mut Builders, log: &EventLog) {
    let echo_log = log.clone();
    builders.observers.register("Echo", move |_: &PropertyTree| {
        Ok(Rc::new(Echo::new(echo_log.clone())) as Rc<dyn Observer>)
    });
    builders
        .observers
        .register("Plain", |_: &PropertyTree| Ok(Rc::new(PlainObserver) as Rc<dyn Observer>));
    builders.observables.register("NamedSubject", |ptree: &PropertyTree| {
        Ok(Box::new(NamedSubject::from_ptree(ptree)?) as Box<dyn cap_observer::Observable>)
    });
    builders.experiments.register("Dummy", |ptree: &PropertyTree| {
        Ok(Box::new(DummyExperiment::from_ptree(ptree)) as Box<dyn cap_observer::Experiment>)
    });
    builders.experiments.register("Charge", |ptree: &PropertyTree| {
        Ok(Box::new(ChargeExperiment::from_ptree(ptree)?) as Box<dyn cap_observer::Experiment>)
    });
    builders.devices.register("Mock", |ptree: &PropertyTree| {
        Ok(Box::new(MockDevice::from_ptree(ptree)?) as Box<dyn cap_core::Device>)
    });
}
