//! dirsnap — a convenience layer over filesystem primitives.
//!
//! [`PathHandle`] wraps one resolved, immutable filesystem location and
//! offers single-entity operations (read, write, append, mkdir, delete,
//! copy, move) plus metadata queries. On top of it, [`TreeRenderer`] draws a
//! directory's structure as indented text, [`SearchEngine`] enumerates a
//! subtree through a conjunction of filters, and [`ReportAggregator`]
//! combines both with file contents into a single, safety-bounded report.
//!
//! Logging goes through `tracing`; install a subscriber in the host
//! application to observe operation start/success/failure messages.

pub mod config;
pub mod core;
pub mod utils;

pub use config::ReportConfig;
pub use core::{
    CoreError, PathHandle, ReportAggregator, SearchEngine, SearchFilter, TreeRenderer,
};
