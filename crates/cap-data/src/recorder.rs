//! The [`Recorder`] observer.

use std::cell::{Ref, RefCell};

use cap_core::{Device, ObserverError};
use cap_observer::{Observable, Observer};

use crate::series::DataSeries;

/// One reading of a device at a point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Simulation time, in seconds.
    pub time: f64,
    /// Current, in amperes.
    pub current: f64,
    /// Voltage, in volts.
    pub voltage: f64,
}

impl Sample {
    /// Poll `device` at `time`.
    pub fn from_device(time: f64, device: &dyn Device) -> Self {
        Self {
            time,
            current: device.current(),
            voltage: device.voltage(),
        }
    }
}

type Probe = Box<dyn Fn(&dyn Observable) -> Result<Sample, ObserverError>>;

/// Appends a [`Sample`] to its [`DataSeries`] on every notification.
///
/// The probe extracts the sample from the notifying subject, usually by
/// downcasting it to the concrete experiment type.
pub struct Recorder {
    probe: Probe,
    data: RefCell<DataSeries>,
}

impl Recorder {
    /// Create a recorder with empty standard series.
    pub fn new<P>(probe: P) -> Self
    where
        P: Fn(&dyn Observable) -> Result<Sample, ObserverError> + 'static,
    {
        Self {
            probe: Box::new(probe),
            data: RefCell::new(DataSeries::new()),
        }
    }

    /// Borrow the recorded data.
    ///
    /// Notifications arriving while the borrow is held fail with
    /// [`ObserverError::UpdateFailed`] and record nothing.
    pub fn data(&self) -> Ref<'_, DataSeries> {
        self.data.borrow()
    }

    /// Take the recorded data, leaving empty series behind.
    pub fn take(&self) -> DataSeries {
        let mut data = self.data.borrow_mut();
        let fresh = DataSeries::with_keys(data.keys().map(str::to_string).collect::<Vec<_>>());
        std::mem::replace(&mut *data, fresh)
    }
}

impl Observer for Recorder {
    fn update(&self, subject: &dyn Observable) -> Result<(), ObserverError> {
        let sample = (self.probe)(subject)?;
        let mut data = self
            .data
            .try_borrow_mut()
            .map_err(|_| ObserverError::UpdateFailed {
                reason: "recorded data is borrowed".to_string(),
            })?;
        data.push_sample(sample)?;
        Ok(())
    }
}
