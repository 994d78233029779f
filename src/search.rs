//! Fan-out of one probe per catalog service under a bounded worker pool.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::concurrent::ConcurrentProbe;
use crate::probe::{Probe, ProbeVerdict};

/// Every verdict of one run, in no particular order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeBatch {
    verdicts: Vec<ProbeVerdict>,
}

impl ProbeBatch {
    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProbeVerdict> {
        self.verdicts.iter()
    }

    pub fn found_count(&self) -> usize {
        self.verdicts.iter().filter(|v| v.found).count()
    }

    pub fn into_vec(self) -> Vec<ProbeVerdict> {
        self.verdicts
    }
}

impl From<Vec<ProbeVerdict>> for ProbeBatch {
    fn from(verdicts: Vec<ProbeVerdict>) -> Self {
        Self { verdicts }
    }
}

impl IntoIterator for ProbeBatch {
    type Item = ProbeVerdict;
    type IntoIter = std::vec::IntoIter<ProbeVerdict>;

    fn into_iter(self) -> Self::IntoIter {
        self.verdicts.into_iter()
    }
}

/// Probe every service in `catalog` for `username`, with at most
/// `concurrency` requests in flight.
///
/// Always returns one verdict per service. Probes that panic are reported
/// as not found.
pub async fn probe_all<P>(prober: Arc<P>, catalog: &Catalog, username: &str, concurrency: usize) -> ProbeBatch
where
    P: Probe + 'static,
{
    // the catalog never holds the `$schema` entry
    let services: Vec<_> = catalog.iter().cloned().collect();
    if services.is_empty() {
        return ProbeBatch::default();
    }

    let fallbacks: Vec<ProbeVerdict> = services
        .iter()
        .map(|s| ProbeVerdict::not_found(s, username))
        .collect();

    tracing::info!(username = %username, services = services.len(), concurrency, "starting search");

    let pool = ConcurrentProbe::new(concurrency);
    let username: Arc<str> = Arc::from(username);
    let results = pool
        .execute(services, move |service| {
            let prober = prober.clone();
            let username = username.clone();
            async move { prober.probe(&service, &username).await }
        })
        .await;

    let batch: ProbeBatch = results
        .into_iter()
        .zip(fallbacks)
        .map(|(result, fallback)| result.unwrap_or(fallback))
        .collect::<Vec<_>>()
        .into();

    let (completed, panicked) = pool.get_stats();
    tracing::info!(completed, panicked, found = batch.found_count(), "search finished");
    batch
}
