use anyhow::Context;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

use crate::config::ProbeConfig;

/// Idle connections kept per host; most catalog hosts are hit once per run.
const MAX_IDLE_PER_HOST: usize = 4;

/// Build the HTTP client shared by every probe in a run.
pub fn build_client(config: &ProbeConfig) -> anyhow::Result<Client> {
    ClientBuilder::new()
        // Connection pooling - reuse connections across probes
        .pool_max_idle_per_host(MAX_IDLE_PER_HOST)
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .tcp_nodelay(true)

        // Timeouts
        .timeout(config.timeout())
        .connect_timeout(config.timeout())

        // Compression
        .gzip(true)
        .brotli(true)

        .use_rustls_tls()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(config.user_agent.as_str())
        .build()
        .context("failed to build HTTP client")
}
