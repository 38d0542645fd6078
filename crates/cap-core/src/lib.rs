//! Core types for the Cap framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! configuration tree consumed by the polymorphic factories, the error
//! taxonomy shared by every other crate, and the [`Device`] capability
//! that experiments drive.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod device;
pub mod error;
pub mod list;
pub mod tree;

pub use device::{Control, Device};
pub use error::{BuildError, DeviceError, ExperimentError, ObserverError, TreeError};
pub use list::{join_list, split_list};
pub use tree::{PropertyTree, Value, PATH_SEPARATOR};
