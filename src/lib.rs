pub mod aggregate;
pub mod catalog;
pub mod concurrent;
pub mod config;
pub mod http_client;
pub mod output;
pub mod probe;
pub mod search;
pub mod utils;

// re-export the search surface used by front ends and tests
pub use crate::aggregate::normalize;
pub use crate::catalog::{Catalog, ErrorSignal, ErrorStrategy, ServiceDescriptor};
pub use crate::config::ProbeConfig;
pub use crate::probe::{HttpProber, Probe, ProbeVerdict};
pub use crate::search::{probe_all, ProbeBatch};
