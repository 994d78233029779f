pub mod classify;
pub mod http_probe;
pub mod progress;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::ServiceDescriptor;

pub use classify::classify;
pub use http_probe::HttpProber;
pub use progress::ProgressProbe;

/// Outcome of checking one service for one username.
///
/// Field order defines the derived ordering used by the aggregator:
/// service name first, then URL, then `found`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProbeVerdict {
    pub service_name: String,
    pub resolved_url: String,
    pub found: bool,
}

impl ProbeVerdict {
    /// Negative verdict for a service that could not be checked.
    pub fn not_found(service: &ServiceDescriptor, username: &str) -> Self {
        Self {
            service_name: service.name.clone(),
            resolved_url: service.resolve_url(username),
            found: false,
        }
    }
}

/// Checks a single service. Implementations never fail: any error is a
/// negative verdict.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, service: &ServiceDescriptor, username: &str) -> ProbeVerdict;
}
