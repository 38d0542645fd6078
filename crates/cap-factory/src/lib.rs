//! Configuration-driven polymorphic construction for Cap.
//!
//! A [`Family`] names an abstract capability set (observers, experiments,
//! devices, ...). Each family gets a [`TypeRegistry`] mapping type names
//! to constructors; [`TypeRegistry::build`] reads the `type` key of a
//! [`PropertyTree`](cap_core::PropertyTree) and dispatches to the matching
//! constructor.
//!
//! Registries are ordinary values owned by the caller. There is no
//! process-wide table: a program wires its concrete types at one point
//! and hands the registries to whatever needs to build from configuration.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod family;
pub mod registry;

pub use family::{Family, TYPE_KEY};
pub use registry::{Builder, TypeRegistry};
