//! The [`Device`] capability consumed by experiments and recorders.
//!
//! Cap never implements a device itself. Concrete devices (equivalent
//! circuits, finite-element supercapacitor models, hardware shims) live
//! with whoever links them in and register through the device family.

use std::fmt;

use crate::error::DeviceError;

/// How a device is driven over one time step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Control {
    /// Impose a current, in amperes.
    ConstantCurrent(f64),
    /// Impose a voltage, in volts.
    ConstantVoltage(f64),
    /// Impose a power, in watts.
    ConstantPower(f64),
    /// Impose a load resistance, in ohms.
    ConstantLoad(f64),
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConstantCurrent(a) => write!(f, "constant current {a} A"),
            Self::ConstantVoltage(v) => write!(f, "constant voltage {v} V"),
            Self::ConstantPower(w) => write!(f, "constant power {w} W"),
            Self::ConstantLoad(r) => write!(f, "constant load {r} ohm"),
        }
    }
}

/// A simulated energy storage device.
///
/// Readings are polled at whatever cadence the caller chooses; the
/// device keeps no history.
pub trait Device {
    /// Current through the device, in amperes.
    fn current(&self) -> f64;

    /// Voltage across the device, in volts.
    fn voltage(&self) -> f64;

    /// Advance the device by `time_step` seconds under `control`.
    ///
    /// Devices that cannot honour a control mode return
    /// [`DeviceError::Unsupported`].
    fn evolve(&mut self, time_step: f64, control: Control) -> Result<(), DeviceError>;
}
