//! Observer/observable notification and experiments for Cap.
//!
//! An [`Observable`] keeps weak references to its attached [`Observer`]s
//! and fans a notification out to them synchronously, in attachment
//! order. An [`Experiment`] is an observable that can also drive a
//! [`Device`](cap_core::Device) through a scenario.
//!
//! Every trait here is also a buildable [`Family`](cap_factory::Family);
//! [`Builders`] bundles one registry per family.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod attachments;
pub mod builders;
pub mod experiment;
pub mod observable;
pub mod observer;

pub use attachments::Attachments;
pub use builders::{Builders, DeviceFamily, ExperimentFamily, ObservableFamily, ObserverFamily};
pub use experiment::Experiment;
pub use observable::{AsObservable, Observable};
pub use observer::Observer;
