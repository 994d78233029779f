use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};

use crate::catalog::ServiceDescriptor;
use crate::probe::{Probe, ProbeVerdict};

/// Wraps another probe and advances a progress bar as each check completes.
pub struct ProgressProbe<P> {
    inner: P,
    bar: ProgressBar,
}

impl<P: Probe> ProgressProbe<P> {
    pub fn new(inner: P, total: u64) -> Self {
        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::with_template("   [{bar:40.cyan/blue}] {pos}/{len} sites ({elapsed})") {
            bar.set_style(style.progress_chars("=> "));
        }
        Self { inner, bar }
    }

    pub fn hidden(inner: P) -> Self {
        Self { inner, bar: ProgressBar::hidden() }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[async_trait]
impl<P: Probe> Probe for ProgressProbe<P> {
    async fn probe(&self, service: &ServiceDescriptor, username: &str) -> ProbeVerdict {
        let verdict = self.inner.probe(service, username).await;
        self.bar.inc(1);
        verdict
    }
}
