//! A series-RC mock device.

use cap_core::{BuildError, Control, Device, DeviceError, PropertyTree};

/// An ideal capacitor behind a series resistance.
///
/// Supports constant-current and constant-voltage control; other modes
/// are rejected with [`DeviceError::Unsupported`].
#[derive(Clone, Debug, PartialEq)]
pub struct MockDevice {
    pub capacitance: f64,
    pub series_resistance: f64,
    pub charge: f64,
    pub current: f64,
    pub evolutions: usize,
}

impl MockDevice {
    pub fn new(capacitance: f64, series_resistance: f64) -> Self {
        Self {
            capacitance,
            series_resistance,
            charge: 0.0,
            current: 0.0,
            evolutions: 0,
        }
    }

    /// Reads `capacitance`, `series_resistance` and optional `initial_voltage`.
    ///
    /// The capacitance must be positive and the resistance non-negative.
    pub fn from_ptree(ptree: &PropertyTree) -> Result<Self, BuildError> {
        let capacitance = ptree.get_f64("capacitance")?;
        let series_resistance = ptree.get_f64("series_resistance")?;
        if capacitance.is_nan()
            || capacitance <= 0.0
            || series_resistance.is_nan()
            || series_resistance < 0.0
        {
            return Err(BuildError::Failed {
                reason: format!(
                    "capacitance {capacitance} and series resistance {series_resistance} are not physical"
                ),
            });
        }
        let mut device = Self::new(capacitance, series_resistance);
        if ptree.contains("initial_voltage") {
            device.charge = ptree.get_f64("initial_voltage")? * device.capacitance;
        }
        Ok(device)
    }

    fn open_circuit_voltage(&self) -> f64 {
        self.charge / self.capacitance
    }
}

impl Device for MockDevice {
    fn current(&self) -> f64 {
        self.current
    }

    fn voltage(&self) -> f64 {
        self.open_circuit_voltage() + self.current * self.series_resistance
    }

    fn evolve(&mut self, time_step: f64, control: Control) -> Result<(), DeviceError> {
        if time_step.is_nan() || time_step <= 0.0 {
            return Err(DeviceError::Failed {
                reason: format!("time step {time_step} is not positive"),
            });
        }
        match control {
            Control::ConstantCurrent(current) => self.current = current,
            Control::ConstantVoltage(voltage) => {
                self.current = (voltage - self.open_circuit_voltage()) / self.series_resistance;
            }
            other => {
                return Err(DeviceError::Unsupported {
                    control: other.to_string(),
                })
            }
        }
        self.charge += self.current * time_step;
        self.evolutions += 1;
        Ok(())
    }
}
