//! Named numeric sequences grown one sample at a time.

use cap_core::Device;
use indexmap::IndexMap;

use crate::error::DataError;
use crate::recorder::Sample;
use crate::store::{validate_key, KeyPathStore, WriteMode, KEY_SEPARATOR};

/// Name of the time series, in seconds.
pub const TIME: &str = "time";
/// Name of the current series, in amperes.
pub const CURRENT: &str = "current";
/// Name of the voltage series, in volts.
pub const VOLTAGE: &str = "voltage";

/// A mapping from series name to its recorded values.
///
/// # Examples
///
/// ```
/// use cap_data::{DataSeries, KeyPathStore, MemoryStore, WriteMode};
///
/// let mut data = DataSeries::new();
/// data.push("time", 0.0).unwrap();
/// data.push("current", 1.0).unwrap();
/// data.push("voltage", 2.1).unwrap();
///
/// let mut store = MemoryStore::new(WriteMode::Exclusive);
/// data.save("discharge", &mut store).unwrap();
/// assert_eq!(store.read("discharge/voltage").unwrap(), &[2.1]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DataSeries {
    series: IndexMap<String, Vec<f64>>,
}

impl DataSeries {
    /// Create empty `time`, `current` and `voltage` series.
    pub fn new() -> Self {
        Self::with_keys([TIME, CURRENT, VOLTAGE])
    }

    /// Create empty series with the given names, in order.
    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            series: keys.into_iter().map(|k| (k.into(), Vec::new())).collect(),
        }
    }

    /// Append `value` to the series `key`.
    pub fn push(&mut self, key: &str, value: f64) -> Result<(), DataError> {
        self.series
            .get_mut(key)
            .ok_or_else(|| DataError::UnknownSeries {
                key: key.to_string(),
            })?
            .push(value);
        Ok(())
    }

    /// Append one sample to each of `time`, `current` and `voltage`.
    ///
    /// Nothing is appended unless all three series exist.
    pub fn push_sample(&mut self, sample: Sample) -> Result<(), DataError> {
        for key in [TIME, CURRENT, VOLTAGE] {
            if !self.series.contains_key(key) {
                return Err(DataError::UnknownSeries {
                    key: key.to_string(),
                });
            }
        }
        self.push(TIME, sample.time)?;
        self.push(CURRENT, sample.current)?;
        self.push(VOLTAGE, sample.voltage)
    }

    /// Poll `device` and append its readings at `time`.
    pub fn report(&mut self, time: f64, device: &dyn Device) -> Result<(), DataError> {
        self.push_sample(Sample::from_device(time, device))
    }

    /// The values recorded under `key`.
    pub fn get(&self, key: &str) -> Option<&[f64]> {
        self.series.get(key).map(Vec::as_slice)
    }

    /// Series names, in creation order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Length of the longest series.
    pub fn len(&self) -> usize {
        self.series.values().map(Vec::len).max().unwrap_or(0)
    }

    /// `true` if no value has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every recorded value, keeping the series names.
    pub fn clear(&mut self) {
        self.series.values_mut().for_each(Vec::clear);
    }

    /// Write every series to `store` under `path/<name>`.
    ///
    /// Every target key is validated first, and in exclusive mode checked
    /// for conflicts, so a failed save leaves the store untouched.
    pub fn save(&self, path: &str, store: &mut dyn KeyPathStore) -> Result<(), DataError> {
        validate_key(path)?;
        let targets: Vec<(String, &[f64])> = self
            .series
            .iter()
            .map(|(name, values)| (format!("{path}{KEY_SEPARATOR}{name}"), values.as_slice()))
            .collect();
        for (key, _) in &targets {
            validate_key(key)?;
        }
        if store.write_mode() == WriteMode::Exclusive {
            if let Some((key, _)) = targets.iter().find(|(key, _)| store.contains(key)) {
                return Err(DataError::KeyExists { key: key.clone() });
            }
        }
        for (key, values) in &targets {
            store.write(key, values)?;
        }
        tracing::debug!(path, series = targets.len(), samples = self.len(), "saved series");
        Ok(())
    }
}

impl Default for DataSeries {
    fn default() -> Self {
        Self::new()
    }
}
