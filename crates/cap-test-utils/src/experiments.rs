//! Experiments with and without a `run` override.

use cap_core::{Control, Device, ExperimentError, ObserverError, PropertyTree, TreeError};
use cap_data::Sample;
use cap_observer::{Attachments, Experiment, Observable};

/// An experiment that never overrides `run`.
#[derive(Debug, Default)]
pub struct DummyExperiment {
    attachments: Attachments,
}

impl DummyExperiment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignores its configuration entirely.
    pub fn from_ptree(_ptree: &PropertyTree) -> Self {
        Self::new()
    }
}

impl Observable for DummyExperiment {
    fn attachments(&self) -> &Attachments {
        &self.attachments
    }

    fn attachments_mut(&mut self) -> &mut Attachments {
        &mut self.attachments
    }
}

impl Experiment for DummyExperiment {}

type RunHook = Box<dyn FnMut(&mut dyn Device) -> Result<(), ExperimentError>>;

/// An experiment whose `run` can be installed after construction.
#[derive(Default)]
pub struct ScriptedExperiment {
    attachments: Attachments,
    hook: Option<RunHook>,
}

impl ScriptedExperiment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_run<F>(&mut self, hook: F)
    where
        F: FnMut(&mut dyn Device) -> Result<(), ExperimentError> + 'static,
    {
        self.hook = Some(Box::new(hook));
    }
}

impl Observable for ScriptedExperiment {
    fn attachments(&self) -> &Attachments {
        &self.attachments
    }

    fn attachments_mut(&mut self) -> &mut Attachments {
        &mut self.attachments
    }
}

impl Experiment for ScriptedExperiment {
    fn run(&mut self, device: &mut dyn Device) -> Result<(), ExperimentError> {
        match self.hook.as_mut() {
            Some(hook) => hook(device),
            None => Err(ExperimentError::NotImplemented { operation: "run" }),
        }
    }
}

/// Charges a device at constant current, notifying after every step.
///
/// Observers are notified once before the first step (t = 0) and once
/// after each of the `steps` steps.
#[derive(Debug)]
pub struct ChargeExperiment {
    pub current: f64,
    pub time_step: f64,
    pub steps: usize,
    time: f64,
    reading: Option<(f64, f64)>,
    attachments: Attachments,
}

impl ChargeExperiment {
    pub fn new(current: f64, time_step: f64, steps: usize) -> Self {
        Self {
            current,
            time_step,
            steps,
            time: 0.0,
            reading: None,
            attachments: Attachments::new(),
        }
    }

    /// Reads `current`, `time_step` and `steps`.
    pub fn from_ptree(ptree: &PropertyTree) -> Result<Self, TreeError> {
        let steps = ptree.get_i64("steps")?;
        let steps = usize::try_from(steps).map_err(|_| TreeError::TypeMismatch {
            path: "steps".to_string(),
            expected: "non-negative int",
            found: steps.to_string(),
        })?;
        Ok(Self::new(
            ptree.get_f64("current")?,
            ptree.get_f64("time_step")?,
            steps,
        ))
    }

    /// Simulation time reached so far.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Latest `(current, voltage)` polled from the device.
    pub fn reading(&self) -> Option<(f64, f64)> {
        self.reading
    }

    fn poll(&mut self, device: &dyn Device) {
        self.reading = Some((device.current(), device.voltage()));
    }
}

impl Observable for ChargeExperiment {
    fn attachments(&self) -> &Attachments {
        &self.attachments
    }

    fn attachments_mut(&mut self) -> &mut Attachments {
        &mut self.attachments
    }
}

impl Experiment for ChargeExperiment {
    fn run(&mut self, device: &mut dyn Device) -> Result<(), ExperimentError> {
        self.time = 0.0;
        self.poll(device);
        self.notify()?;
        for _ in 0..self.steps {
            device.evolve(self.time_step, Control::ConstantCurrent(self.current))?;
            self.time += self.time_step;
            self.poll(device);
            self.notify()?;
        }
        Ok(())
    }
}

/// Probe for a [`Recorder`](cap_data::Recorder) attached to a
/// [`ChargeExperiment`].
pub fn charge_probe(subject: &dyn Observable) -> Result<Sample, ObserverError> {
    let any: &dyn std::any::Any = subject;
    let experiment =
        any.downcast_ref::<ChargeExperiment>()
            .ok_or_else(|| ObserverError::UpdateFailed {
                reason: "subject is not a ChargeExperiment".to_string(),
            })?;
    let (current, voltage) = experiment
        .reading()
        .ok_or_else(|| ObserverError::UpdateFailed {
            reason: "no reading yet".to_string(),
        })?;
    Ok(Sample {
        time: experiment.time(),
        current,
        voltage,
    })
}
