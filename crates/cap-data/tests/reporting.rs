//! Integration test: polling a device into a `DataSeries` and building
//! devices from configuration.

use cap_core::{BuildError, Control, Device, PropertyTree};
use cap_data::{DataSeries, KeyPathStore, MemoryStore, Sample, WriteMode};
use cap_observer::Builders;
use cap_test_utils::{wire, EventLog, MockDevice};

#[test]
fn report_polls_the_device_at_each_time() {
    let mut device = MockDevice::new(2.0, 0.5);
    let mut data = DataSeries::new();
    data.report(0.0, &device).unwrap();
    for step in 1..=2 {
        device.evolve(1.0, Control::ConstantCurrent(1.0)).unwrap();
        data.report(f64::from(step), &device).unwrap();
    }

    assert_eq!(data.len(), 3);
    assert_eq!(data.get("time").unwrap(), &[0.0, 1.0, 2.0]);
    assert_eq!(data.get("current").unwrap(), &[0.0, 1.0, 1.0]);
    // V = q / C + I R
    assert_eq!(data.get("voltage").unwrap(), &[0.0, 1.0, 1.5]);

    let mut store = MemoryStore::new(WriteMode::Exclusive);
    data.save("cc", &mut store).unwrap();
    assert_eq!(store.read("cc/current").unwrap(), &[0.0, 1.0, 1.0]);
}

#[test]
fn sample_from_device_matches_report() {
    let mut device = MockDevice::new(1.0, 1.0);
    device.evolve(0.5, Control::ConstantVoltage(1.0)).unwrap();
    let sample = Sample::from_device(0.5, &device);
    assert_eq!(
        sample,
        Sample {
            time: 0.5,
            current: 1.0,
            voltage: 1.5,
        }
    );

    let mut data = DataSeries::new();
    data.report(0.5, &device).unwrap();
    assert_eq!(data.get("voltage").unwrap(), &[sample.voltage]);
}

#[test]
fn report_without_standard_series_fails() {
    let device = MockDevice::new(1.0, 1.0);
    let mut data = DataSeries::with_keys(["time"]);
    assert!(data.report(0.0, &device).is_err());
    assert!(data.is_empty());
}

#[test]
fn unphysical_device_configuration_fails_to_build() {
    let mut builders = Builders::new();
    wire(&mut builders, &EventLog::new());

    let mut ptree = PropertyTree::new();
    ptree.put("type", "Mock").unwrap();
    ptree.put("capacitance", -1.0).unwrap();
    ptree.put("series_resistance", 0.1).unwrap();
    assert!(matches!(
        builders.build_device(Some(&ptree)),
        Err(BuildError::Failed { .. })
    ));

    ptree.put("capacitance", 3.0).unwrap();
    let device = builders.build_device(Some(&ptree)).unwrap();
    assert_eq!(device.voltage(), 0.0);
}
