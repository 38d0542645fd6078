//! Time-series recording and key-path storage for Cap observers.
//!
//! [`DataSeries`] accumulates named numeric sequences one sample at a
//! time, [`KeyPathStore`] persists them under hierarchical `a/b/c` keys,
//! and [`Recorder`] is an observer that samples its subject on every
//! notification.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod recorder;
pub mod series;
pub mod store;

pub use error::DataError;
pub use recorder::{Recorder, Sample};
pub use series::{DataSeries, CURRENT, TIME, VOLTAGE};
pub use store::{KeyPathStore, MemoryStore, WriteMode, KEY_SEPARATOR};
