use async_trait::async_trait;
use handle_hunter::{
    normalize, probe_all, Catalog, ErrorStrategy, HttpProber, Probe, ProbeConfig, ProbeVerdict, ServiceDescriptor,
};
use httpmock::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn http_prober() -> Arc<HttpProber> {
    Arc::new(HttpProber::new(&ProbeConfig::default().with_timeout(Duration::from_secs(2))).unwrap())
}

/// Records how many probes are running at once.
#[derive(Default)]
struct InstrumentedProbe {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: AtomicUsize,
}

#[async_trait]
impl Probe for InstrumentedProbe {
    async fn probe(&self, service: &ServiceDescriptor, username: &str) -> ProbeVerdict {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(25)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        ProbeVerdict {
            service_name: service.name.clone(),
            resolved_url: service.resolve_url(username),
            found: true,
        }
    }
}

/// Panics for one service, answers normally for the rest.
struct FlakyProbe;

#[async_trait]
impl Probe for FlakyProbe {
    async fn probe(&self, service: &ServiceDescriptor, username: &str) -> ProbeVerdict {
        if service.name == "Crashy" {
            panic!("probe blew up");
        }
        ProbeVerdict {
            service_name: service.name.clone(),
            resolved_url: service.resolve_url(username),
            found: true,
        }
    }
}

fn numbered_catalog(n: usize) -> Catalog {
    Catalog::from_services(
        (0..n)
            .map(|i| ServiceDescriptor::new(format!("Site{:02}", i), format!("http://site{}.test/{{}}", i), ErrorStrategy::StatusCode))
            .collect(),
    )
}

#[tokio::test]
async fn end_to_end_two_sites() {
    let server = MockServer::start_async().await;
    let a = server
        .mock_async(|when, then| {
            when.method(GET).path("/x/alice");
            then.status(200);
        })
        .await;
    let b = server
        .mock_async(|when, then| {
            when.method(GET).path("/y/alice");
            then.status(200).body("welcome alice");
        })
        .await;

    let json = format!(
        r#"{{
            "$schema": "data.schema.json",
            "SiteB": {{"url": "{}", "errorType": "message", "errorMsg": "not found"}},
            "SiteA": {{"url": "{}", "errorType": "status_code"}}
        }}"#,
        server.url("/y/{}"),
        server.url("/x/{}"),
    );
    let catalog = Catalog::from_json_str(&json).unwrap();

    let batch = probe_all(http_prober(), &catalog, "alice", 20).await;
    assert_eq!(batch.found_count(), 2);
    let results = normalize(batch);

    a.assert_async().await;
    b.assert_async().await;
    assert_eq!(
        results,
        vec![
            ProbeVerdict { service_name: "SiteA".into(), resolved_url: server.url("/x/alice"), found: true },
            ProbeVerdict { service_name: "SiteB".into(), resolved_url: server.url("/y/alice"), found: true },
        ]
    );
}

#[tokio::test]
async fn one_verdict_per_service_despite_failures() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/ok/carol");
            then.status(200);
        })
        .await;

    let json = format!(
        r#"{{
            "$schema": "ignored",
            "Up": {{"url": "{}", "errorType": "status_code"}},
            "Missing": {{"url": "{}", "errorType": "status_code"}},
            "Refused": {{"url": "http://127.0.0.1:1/{{}}", "errorType": "status_code"}},
            "BadUrl": {{"url": "::nope::{{}}", "errorType": "status_code"}},
            "NoUrl": {{"errorType": "status_code"}},
            "Weird": {{"url": "{}", "errorType": "response_url"}},
            "NoSignal": {{"url": "{}", "errorType": "message"}}
        }}"#,
        server.url("/ok/{}"),
        server.url("/missing/{}"),
        server.url("/ok/{}"),
        server.url("/ok/{}"),
    );
    let catalog = Catalog::from_json_str(&json).unwrap();
    assert_eq!(catalog.len(), 7);

    let results = normalize(probe_all(http_prober(), &catalog, "carol", 20).await);

    assert_eq!(results.len(), 7);
    assert!(results.iter().all(|v| v.service_name != "$schema"));
    let found: Vec<_> = results.iter().filter(|v| v.found).map(|v| v.service_name.as_str()).collect();
    assert_eq!(found, ["Up"]);
    let refused = results.iter().find(|v| v.service_name == "Refused").unwrap();
    assert_eq!(refused.resolved_url, "http://127.0.0.1:1/carol");
}

#[tokio::test]
async fn schema_entry_never_probed() {
    let probe = Arc::new(InstrumentedProbe::default());
    let mut services = vec![ServiceDescriptor::new("$schema", "http://meta/{}", ErrorStrategy::StatusCode)];
    services.push(ServiceDescriptor::new("Real", "http://real/{}", ErrorStrategy::StatusCode));
    let catalog = Catalog::from_services(services);

    let batch = probe_all(probe.clone(), &catalog, "dave", 20).await;

    assert_eq!(batch.len(), 1);
    assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
    assert!(batch.iter().all(|v| v.service_name == "Real"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn never_more_than_twenty_in_flight() {
    let probe = Arc::new(InstrumentedProbe::default());
    let catalog = numbered_catalog(50);

    let batch = probe_all(probe.clone(), &catalog, "erin", 20).await;

    assert_eq!(batch.len(), 50);
    assert_eq!(probe.calls.load(Ordering::SeqCst), 50);
    let max = probe.max_in_flight.load(Ordering::SeqCst);
    assert!(max <= 20, "saw {} probes in flight", max);
    assert!(max > 1, "probes did not overlap");
    assert_eq!(probe.in_flight.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn oversized_limit_still_completes() {
    let probe = Arc::new(InstrumentedProbe::default());
    let batch = probe_all(probe.clone(), &numbered_catalog(1), "ivy", usize::MAX).await;

    assert_eq!(batch.len(), 1);
    assert_eq!(batch.found_count(), 1);
}

#[tokio::test]
async fn custom_limit_is_respected() {
    let probe = Arc::new(InstrumentedProbe::default());
    let batch = probe_all(probe.clone(), &numbered_catalog(12), "erin", 3).await;

    assert_eq!(batch.len(), 12);
    assert!(probe.max_in_flight.load(Ordering::SeqCst) <= 3);
}

#[tokio::test]
async fn panicking_probe_still_yields_negative_verdict() {
    let catalog = Catalog::from_services(vec![
        ServiceDescriptor::new("Calm", "http://calm/{}", ErrorStrategy::StatusCode),
        ServiceDescriptor::new("Crashy", "http://crashy/{}", ErrorStrategy::StatusCode),
    ]);

    let results = normalize(probe_all(Arc::new(FlakyProbe), &catalog, "frank", 20).await);

    assert_eq!(
        results,
        vec![
            ProbeVerdict { service_name: "Calm".into(), resolved_url: "http://calm/frank".into(), found: true },
            ProbeVerdict { service_name: "Crashy".into(), resolved_url: "http://crashy/frank".into(), found: false },
        ]
    );
}

#[tokio::test]
async fn empty_catalog_gives_empty_batch() {
    let batch = probe_all(Arc::new(InstrumentedProbe::default()), &Catalog::default(), "gina", 20).await;
    assert!(batch.is_empty());
}

#[tokio::test]
async fn repeated_runs_produce_identical_output() {
    let probe = Arc::new(InstrumentedProbe::default());
    let catalog = numbered_catalog(30);

    let first = normalize(probe_all(probe.clone(), &catalog, "hank", 7).await);
    let second = normalize(probe_all(probe.clone(), &catalog, "hank", 7).await);

    assert_eq!(first, second);
    assert_eq!(first.first().map(|v| v.service_name.as_str()), Some("Site00"));
}
