use std::time::{Duration, Instant};

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::catalog::{ErrorStrategy, ServiceDescriptor};
use crate::config::ProbeConfig;
use crate::http_client::build_client;
use crate::probe::{classify, Probe, ProbeVerdict};

fn extract_host(url: &str) -> Option<String> {
    Url::parse(url).ok().and_then(|u| u.host_str().map(|s| s.to_string()))
}

/// Probes services over HTTP with one shared, pooled client.
#[derive(Clone)]
pub struct HttpProber {
    client: Client,
    timeout: Duration,
}

impl HttpProber {
    pub fn new(config: &ProbeConfig) -> anyhow::Result<Self> {
        Ok(Self::with_client(build_client(config)?, config.timeout()))
    }

    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Issue the GET and classify the response. Errors are handled by the caller.
    async fn fetch_and_classify(&self, service: &ServiceDescriptor, url: &str) -> anyhow::Result<bool> {
        let request = async {
            let resp = self.client.get(url).send().await?;
            let status = resp.status().as_u16();
            let body = match service.strategy {
                ErrorStrategy::Message => Some(resp.text().await?),
                _ => None,
            };
            Ok::<_, reqwest::Error>((status, body))
        };

        let (status, body) = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| anyhow!("timed out after {}ms", self.timeout.as_millis()))??;

        tracing::trace!(service = %service.name, status, "response received");
        Ok(classify(&service.strategy, service.error_signal.as_ref(), status, body.as_deref()))
    }
}

#[async_trait]
impl Probe for HttpProber {
    async fn probe(&self, service: &ServiceDescriptor, username: &str) -> ProbeVerdict {
        let resolved_url = service.resolve_url(username);
        let start = Instant::now();

        let found = match self.fetch_and_classify(service, &resolved_url).await {
            Ok(found) => found,
            Err(e) => {
                tracing::debug!(
                    service = %service.name,
                    host = %extract_host(&resolved_url).unwrap_or_default(),
                    error = %e,
                    "probe failed, reporting not found"
                );
                false
            }
        };

        tracing::debug!(
            service = %service.name,
            found,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "probe complete"
        );

        ProbeVerdict {
            service_name: service.name.clone(),
            resolved_url,
            found,
        }
    }
}
