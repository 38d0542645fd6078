//! Cap: configuration-driven factories and observer wiring for energy
//! storage simulations.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Cap sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use std::rc::Rc;
//! use cap::prelude::*;
//!
//! // A subject with one piece of state.
//! #[derive(Default)]
//! struct Cycle {
//!     attachments: Attachments,
//!     count: u32,
//! }
//! impl Observable for Cycle {
//!     fn attachments(&self) -> &Attachments { &self.attachments }
//!     fn attachments_mut(&mut self) -> &mut Attachments { &mut self.attachments }
//! }
//!
//! // An observer that checks it is notified by a `Cycle`.
//! struct Check;
//! impl Observer for Check {
//!     fn update(&self, subject: &dyn Observable) -> Result<(), ObserverError> {
//!         let any: &dyn std::any::Any = subject;
//!         match any.downcast_ref::<Cycle>() {
//!             Some(_) => Ok(()),
//!             None => Err(ObserverError::UpdateFailed { reason: "not a cycle".into() }),
//!         }
//!     }
//! }
//!
//! // Wire the types once, then build from configuration.
//! let mut builders = Builders::new();
//! builders.observers.register("Check", |_: &PropertyTree| {
//!     Ok(Rc::new(Check) as Rc<dyn Observer>)
//! });
//!
//! let ptree = PropertyTree::from_json_str(r#"{ "type": "Check" }"#).unwrap();
//! let observer = builders.build_observer(Some(&ptree)).unwrap();
//!
//! let mut cycle = Cycle::default();
//! cycle.attach(&observer).unwrap();
//! cycle.count += 1;
//! cycle.notify().unwrap();
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cap-core` | `PropertyTree`, errors, `Device` |
//! | [`factory`] | `cap-factory` | `Family`, `TypeRegistry` |
//! | [`observer`] | `cap-observer` | `Observer`, `Observable`, `Experiment`, `Builders` |
//! | [`data`] | `cap-data` | `DataSeries`, `KeyPathStore`, `Recorder` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Configuration tree, error types and the device capability (`cap-core`).
pub use cap_core as types;

/// Type registries and polymorphic construction (`cap-factory`).
pub use cap_factory as factory;

/// Observers, observables, experiments and builders (`cap-observer`).
pub use cap_observer as observer;

/// Time-series recording and key-path storage (`cap-data`).
pub use cap_data as data;

/// Common imports for typical Cap usage.
///
/// ```rust
/// use cap::prelude::*;
/// ```
pub mod prelude {
    // Configuration and devices
    pub use cap_core::{Control, Device, PropertyTree, Value};

    // Errors
    pub use cap_core::{BuildError, DeviceError, ExperimentError, ObserverError, TreeError};

    // Factory
    pub use cap_factory::{Family, TypeRegistry};

    // Observer pattern
    pub use cap_observer::{Attachments, Builders, Experiment, Observable, Observer};

    // Recording
    pub use cap_data::{DataError, DataSeries, KeyPathStore, MemoryStore, Recorder, Sample};
}
